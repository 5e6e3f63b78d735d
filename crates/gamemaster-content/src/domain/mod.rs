//! Rule-system presets and module source types.

pub mod module;
pub mod presets;
