//! GameMaster — Session context.
//!
//! Responsible for the closed state machine that walks a player through
//! adventure creation and then mediates play, one inbound message at a time.
//! The state travels with each request, so the server keeps nothing between
//! messages except the persisted adventures.

pub mod application;
pub mod domain;
