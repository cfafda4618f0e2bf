//! Tracing-backed display sink.

use std::time::Duration;

use tracing::{debug, info};

use crate::core::{CardId, PlayerId, SlotId};

use super::sink::DisplaySink;

/// Sink that forwards every notification to `tracing`.
///
/// Board and token churn is logged at debug level; scores and the winner
/// announcement at info. Countdown ticks are throttled to the warn
/// transition by the caller's cadence, not here.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDisplay;

impl DisplaySink for LogDisplay {
    fn show_card(&self, slot: SlotId, card: CardId) {
        debug!(%slot, %card, "card placed");
    }

    fn clear_slot(&self, slot: SlotId) {
        debug!(%slot, "slot cleared");
    }

    fn show_token(&self, player: PlayerId, slot: SlotId) {
        debug!(%player, %slot, "token placed");
    }

    fn clear_token(&self, player: PlayerId, slot: SlotId) {
        debug!(%player, %slot, "token removed");
    }

    fn show_countdown(&self, remaining: Duration, warn: bool) {
        debug!(remaining_ms = remaining.as_millis() as u64, warn, "countdown");
    }

    fn show_freeze(&self, player: PlayerId, remaining: Duration) {
        debug!(%player, remaining_ms = remaining.as_millis() as u64, "freeze");
    }

    fn show_score(&self, player: PlayerId, score: u32) {
        info!(%player, score, "score");
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        info!(?winners, "winners");
    }
}
