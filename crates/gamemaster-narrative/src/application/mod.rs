//! Model-facing operations built on the narrative domain rules.

pub mod recap;
pub mod shaper;
