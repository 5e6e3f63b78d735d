//! Pure narrative rules: windowing and narrator policy text.

pub mod policy;
pub mod window;
