//! GameMaster — Content context.
//!
//! Responsible for the rule systems an adventure can be played under: the
//! built-in D20 preset and campaign modules imported from structured files
//! (JSON or YAML) or from documents (Markdown).

pub mod application;
pub mod domain;
pub mod error;
