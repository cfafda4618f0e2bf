//! Matching-set rules seam.
//!
//! The engine never inspects card features. What makes a selection of cards
//! a "matching set" is supplied by the embedding application through
//! `MatchRules`; the engine only calls it at two points:
//!
//! - at judgment time, on the cards a claimant actually has tokens on;
//! - after dealing, to decide whether any set remains in play at all
//!   (deck plus board) and to log hints.

pub mod matcher;

pub use matcher::{FnRules, MatchRules};
