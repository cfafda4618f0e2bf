//! The `DisplaySink` trait and the no-op sink.

use std::time::Duration;

use crate::core::{CardId, PlayerId, SlotId};

/// Sink for everything a front end would render.
///
/// Calls arrive from multiple threads concurrently (workers notify token
/// changes, the dealer notifies cards, countdown and scores), so
/// implementations must be `Send + Sync` and should not block: several
/// notifications are delivered while a slot lock is held.
pub trait DisplaySink: Send + Sync {
    /// A card was placed on a slot.
    fn show_card(&self, slot: SlotId, card: CardId);

    /// A slot was emptied.
    fn clear_slot(&self, slot: SlotId);

    /// A player placed a token on a slot.
    fn show_token(&self, player: PlayerId, slot: SlotId);

    /// A player's token was removed from a slot.
    fn clear_token(&self, player: PlayerId, slot: SlotId);

    /// Countdown update; `warn` is set when the remaining time is below the
    /// configured warning threshold.
    fn show_countdown(&self, remaining: Duration, warn: bool);

    /// Freeze-timer update for a player; `Duration::ZERO` ends the freeze.
    fn show_freeze(&self, player: PlayerId, remaining: Duration);

    /// A player's score changed.
    fn show_score(&self, player: PlayerId, score: u32);

    /// The game ended; every listed player achieved the maximum score.
    fn announce_winners(&self, winners: &[PlayerId]);
}

/// Sink that discards every notification.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDisplay;

impl DisplaySink for NullDisplay {
    fn show_card(&self, _slot: SlotId, _card: CardId) {}
    fn clear_slot(&self, _slot: SlotId) {}
    fn show_token(&self, _player: PlayerId, _slot: SlotId) {}
    fn clear_token(&self, _player: PlayerId, _slot: SlotId) {}
    fn show_countdown(&self, _remaining: Duration, _warn: bool) {}
    fn show_freeze(&self, _player: PlayerId, _remaining: Duration) {}
    fn show_score(&self, _player: PlayerId, _score: u32) {}
    fn announce_winners(&self, _winners: &[PlayerId]) {}
}
