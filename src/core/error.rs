//! Error types.
//!
//! The engine's runtime error surface is deliberately small: stale actions,
//! empty claims, and interrupted waits are all handled locally and never
//! propagate (see the board and actor modules). What remains is
//! configuration validation and the lossy action-submission contract.

use thiserror::Error;

use super::ids::{PlayerId, SlotId};

/// A `GameConfig` failed validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one player is required")]
    NoPlayers,

    #[error("{players} players exceeds the supported maximum of 255")]
    TooManyPlayers { players: usize },

    #[error("{human_players} human players exceeds the total of {players}")]
    TooManyHumans { human_players: usize, players: usize },

    #[error("board has zero slots (rows * columns == 0)")]
    EmptyBoard,

    #[error("board of {slots} slots exceeds the supported maximum of 65535")]
    BoardTooLarge { slots: usize },

    #[error("feature size must be at least 1")]
    ZeroFeatureSize,

    #[error("feature size {feature_size} exceeds the board of {slots} slots")]
    FeatureSizeExceedsBoard { feature_size: usize, slots: usize },

    #[error("deck of {deck_size} cards cannot contain a set of {feature_size}")]
    DeckTooSmall { deck_size: usize, feature_size: usize },
}

/// An action submission was not accepted.
///
/// Submission is non-blocking and lossy: a saturated queue drops the action
/// rather than applying back-pressure to the input source. Callers log these
/// as warnings; none of them are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("action queue of {player} is full, dropped action on {slot}")]
    QueueSaturated { player: PlayerId, slot: SlotId },

    #[error("{player} has stopped and no longer accepts actions")]
    Stopped { player: PlayerId },

    #[error("no player with id {player}")]
    UnknownPlayer { player: PlayerId },

    #[error("slot {slot} is outside the board")]
    UnknownSlot { slot: SlotId },
}
