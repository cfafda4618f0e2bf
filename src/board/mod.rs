//! The shared board: slot↔card bijection and per-player token matrix.
//!
//! ## Locking discipline
//!
//! Every slot owns one mutex guarding that slot's card occupancy and every
//! player's token bit for that slot. The crate-wide rules that keep the lock
//! graph acyclic:
//!
//! 1. Multiple slot locks are only ever acquired in ascending slot order
//!    (workers hold at most one; the dealer holds several during judgment
//!    and all of them during a sweep).
//! 2. The card-to-slot reverse index lock is only acquired while already
//!    holding the lock of the slot involved (or during lock-free reads).
//! 3. The dealer never acquires a player's token-set mutex while holding
//!    any slot lock; workers may hold their own token-set mutex while
//!    taking a single slot lock.

pub mod slots;

pub use slots::Board;
