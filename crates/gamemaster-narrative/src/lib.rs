//! GameMaster — Narrative context.
//!
//! Responsible for what the model sees and what the player gets back:
//! bounding the transcript, seeding the narrator instruction, shaping replies
//! so they close cleanly without taking decisions away from the player, and
//! summarising an adventure on resume.

pub mod application;
pub mod domain;
