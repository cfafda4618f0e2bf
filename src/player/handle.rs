//! Shared player state and the external handle.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use crossbeam_channel::Sender;
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{PlayerId, SlotId, SubmitError};
use crate::dealer::claims::Verdict;

/// State shared between a player's thread, the dealer, and input sources.
///
/// The token selection lives here (not inside the player thread) because the
/// dealer clears it on awards and rotation sweeps. The dealer only touches
/// it while holding no slot lock; the player thread holds it across at most
/// one slot-lock acquisition.
pub(crate) struct PlayerShared {
    pub(crate) id: PlayerId,
    pub(crate) score: AtomicU32,
    pub(crate) stopping: AtomicBool,
    pub(crate) tokens: Mutex<SmallVec<[SlotId; 3]>>,
    pub(crate) actions_tx: Sender<SlotId>,
    pub(crate) stop_tx: Sender<()>,
    pub(crate) verdict_tx: Sender<Verdict>,
    pub(crate) slot_count: usize,
}

impl PlayerShared {
    /// Non-blocking, lossy action submission.
    pub(crate) fn submit(&self, slot: SlotId) -> Result<(), SubmitError> {
        if self.stopping.load(Ordering::SeqCst) {
            return Err(SubmitError::Stopped { player: self.id });
        }
        if slot.index() >= self.slot_count {
            return Err(SubmitError::UnknownSlot { slot });
        }
        self.actions_tx
            .try_send(slot)
            .map_err(|_| SubmitError::QueueSaturated { player: self.id, slot })
    }
}

/// Cloneable handle to one player.
///
/// Input sources push actions through it; the dealer resolves claims,
/// clears selections, and awards points through its crate-internal surface.
#[derive(Clone)]
pub struct PlayerHandle {
    pub(crate) shared: Arc<PlayerShared>,
}

impl PlayerHandle {
    /// This player's id.
    #[must_use]
    pub fn id(&self) -> PlayerId {
        self.shared.id
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.shared.score.load(Ordering::SeqCst)
    }

    /// Snapshot of the player's current token selection.
    #[must_use]
    pub fn tokens(&self) -> Vec<SlotId> {
        self.shared.tokens.lock().to_vec()
    }

    /// Submit an action (a slot toggle) to this player.
    ///
    /// Never blocks: when the player's action queue is full the action is
    /// dropped and `SubmitError::QueueSaturated` is returned. Actions
    /// arriving during a freeze are queued but discarded when the freeze
    /// ends.
    pub fn submit_action(&self, slot: SlotId) -> Result<(), SubmitError> {
        self.shared.submit(slot)
    }

    /// Increment the score, returning the new value. Dealer-only.
    pub(crate) fn add_point(&self) -> u32 {
        self.shared.score.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Empty the token selection without the claim protocol. Dealer-only,
    /// called on awards and rotation sweeps; must not be called while
    /// holding any slot lock.
    pub(crate) fn clear_tokens(&self) {
        self.shared.tokens.lock().clear();
    }

    /// Deliver a claim resolution. Dealer-only; at most one claim is
    /// outstanding per player, so the one-slot channel never backs up. A
    /// failed send means the player already stopped, which is fine.
    pub(crate) fn resolve(&self, verdict: Verdict) {
        if self.shared.verdict_tx.try_send(verdict).is_err() {
            debug!(player = %self.shared.id, ?verdict, "verdict dropped, player gone");
        }
    }

    /// Request this player to stop, waking any blocked wait.
    pub(crate) fn stop(&self) {
        self.shared.stopping.store(true, Ordering::SeqCst);
        let _ = self.shared.stop_tx.send(());
    }
}
