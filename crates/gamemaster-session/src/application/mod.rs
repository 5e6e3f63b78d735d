//! Session handlers.

pub mod command_handlers;
pub mod query_handlers;
