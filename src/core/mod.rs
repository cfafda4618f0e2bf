//! Core types: identifiers, configuration, RNG, errors.

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;

pub use config::GameConfig;
pub use error::{ConfigError, SubmitError};
pub use ids::{CardId, PlayerId, PlayerMap, SlotId};
pub use rng::GameRng;
