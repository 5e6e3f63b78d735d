//! GameMaster API — HTTP surface of the narrated RPG engine.
//!
//! Each player message is one stateless request: the client sends back the
//! state token it received last time and gets the reply plus the next token.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
