//! GameMaster — Character context.
//!
//! Responsible for character sheets: collecting the player's sheet field by
//! field during onboarding, and asking the model to write companion sheets.

pub mod application;
pub mod domain;
