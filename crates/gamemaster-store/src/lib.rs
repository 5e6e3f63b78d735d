//! GameMaster Store — durable adventure records.
//!
//! One pretty-printed JSON document per adventure, named after the adventure.
//! Every write replaces the whole document through a temporary file and an
//! atomic rename.

pub mod error;
pub mod json_file_repository;

pub use error::StoreError;
pub use json_file_repository::JsonFileRepository;
