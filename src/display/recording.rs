//! In-memory recording display sink.

use std::time::Duration;

use parking_lot::Mutex;

use crate::core::{CardId, PlayerId, SlotId};

use super::sink::DisplaySink;

/// One recorded display notification.
///
/// Countdown and freeze ticks are not recorded; they arrive on a timer
/// cadence and would make recordings nondeterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayEvent {
    CardShown { slot: SlotId, card: CardId },
    SlotCleared { slot: SlotId },
    TokenShown { player: PlayerId, slot: SlotId },
    TokenCleared { player: PlayerId, slot: SlotId },
    ScoreShown { player: PlayerId, score: u32 },
    WinnersAnnounced { winners: Vec<PlayerId> },
}

/// Sink that records state-changing notifications for later inspection.
///
/// Intended for tests and for front ends that want to replay the event
/// stream on their own schedule.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    events: Mutex<Vec<DisplayEvent>>,
}

impl RecordingDisplay {
    /// Create an empty recording sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all events recorded so far, in arrival order.
    #[must_use]
    pub fn events(&self) -> Vec<DisplayEvent> {
        self.events.lock().clone()
    }

    /// Number of events recorded so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// True if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// The announced winners, if the game has ended.
    #[must_use]
    pub fn winners(&self) -> Option<Vec<PlayerId>> {
        self.events.lock().iter().rev().find_map(|e| match e {
            DisplayEvent::WinnersAnnounced { winners } => Some(winners.clone()),
            _ => None,
        })
    }

    /// The last score shown for a player, if any.
    #[must_use]
    pub fn score_of(&self, player: PlayerId) -> Option<u32> {
        self.events.lock().iter().rev().find_map(|e| match e {
            DisplayEvent::ScoreShown { player: p, score } if *p == player => Some(*score),
            _ => None,
        })
    }

    fn push(&self, event: DisplayEvent) {
        self.events.lock().push(event);
    }
}

impl DisplaySink for RecordingDisplay {
    fn show_card(&self, slot: SlotId, card: CardId) {
        self.push(DisplayEvent::CardShown { slot, card });
    }

    fn clear_slot(&self, slot: SlotId) {
        self.push(DisplayEvent::SlotCleared { slot });
    }

    fn show_token(&self, player: PlayerId, slot: SlotId) {
        self.push(DisplayEvent::TokenShown { player, slot });
    }

    fn clear_token(&self, player: PlayerId, slot: SlotId) {
        self.push(DisplayEvent::TokenCleared { player, slot });
    }

    fn show_countdown(&self, _remaining: Duration, _warn: bool) {}

    fn show_freeze(&self, _player: PlayerId, _remaining: Duration) {}

    fn show_score(&self, player: PlayerId, score: u32) {
        self.push(DisplayEvent::ScoreShown { player, score });
    }

    fn announce_winners(&self, winners: &[PlayerId]) {
        self.push(DisplayEvent::WinnersAnnounced { winners: winners.to_vec() });
    }
}
