//! Module import.

pub mod import;
