//! # matchboard
//!
//! A concurrent arbitration engine for shared-board matching card games.
//!
//! A fixed board of slots holds cards. Each player owns a private selection
//! of slots marked with tokens; when a selection reaches the matching-set
//! size the player claims it, and a single dealer judges the claim under
//! mutual exclusion with every in-flight board mutation, awards or
//! penalizes, and keeps the board rotating on a wall-clock countdown.
//!
//! ## Design Principles
//!
//! 1. **Rules-Agnostic**: What makes cards a "matching set" is supplied by
//!    the embedding game through the `MatchRules` trait. The engine never
//!    inspects card features.
//!
//! 2. **Slot-Granular Locking**: Every slot owns one mutex guarding its
//!    card and every player's token bit for it. Multi-slot acquisition is
//!    always in ascending slot order, which keeps the lock graph acyclic.
//!
//! 3. **FIFO Arbitration**: Claims are judged strictly in arrival order
//!    over a dedicated channel, decoupled from all board locks. Judgment
//!    re-reads the claimant's cards from the board, never from the
//!    claimant's cache.
//!
//! 4. **Cooperative Teardown**: Termination is a flag plus an explicit wake
//!    on every blocking wait; player threads are joined in reverse id order
//!    before the dealer exits.
//!
//! ## Modules
//!
//! - `core`: ids, configuration, RNG, errors
//! - `board`: slot↔card bijection and token matrix under per-slot locks
//! - `rules`: the consumed matching-set interface
//! - `display`: the consumed rendering interface
//! - `player`: worker actors (one thread each, plus synthetic siblings)
//! - `dealer`: the coordinator actor (claims, countdown, rotation)
//! - `game`: assembly and lifecycle

pub mod board;
pub mod core;
pub mod dealer;
pub mod display;
pub mod game;
pub mod player;
pub mod rules;

// Re-export commonly used types
pub use crate::core::{
    CardId, ConfigError, GameConfig, GameRng, PlayerId, PlayerMap, SlotId, SubmitError,
};

pub use crate::board::Board;

pub use crate::rules::{FnRules, MatchRules};

pub use crate::display::{
    DisplayEvent, DisplaySink, LogDisplay, NullDisplay, RecordingDisplay,
};

pub use crate::player::PlayerHandle;

pub use crate::dealer::{Claim, Dealer, Verdict};

pub use crate::game::{Game, GameHandle};
