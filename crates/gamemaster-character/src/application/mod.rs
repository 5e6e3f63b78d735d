//! Model-assisted sheet generation.

pub mod generate;
