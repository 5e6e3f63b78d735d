//! Shared test doubles for the GameMaster engine.

mod clock;
mod gateway;
mod repository;

pub use clock::FixedClock;
pub use gateway::{FailingGateway, ScriptedGateway};
pub use repository::{FailingAdventureRepository, InMemoryAdventureRepository};
