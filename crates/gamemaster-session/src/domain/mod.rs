//! Session domain: state, commands and player-facing prompts.

pub mod commands;
pub mod prompts;
pub mod state;
