//! GameMaster Core — shared domain model and seams.
//!
//! This crate defines the transcript, rule-system and character-sheet types,
//! the persisted adventure record, and the traits every other crate plugs
//! into (clock, model gateway, adventure repository). It contains no
//! infrastructure code.

pub mod clock;
pub mod command;
pub mod error;
pub mod gateway;
pub mod message;
pub mod record;
pub mod repository;
pub mod sheet;
