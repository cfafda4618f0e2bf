//! Claims and verdicts.
//!
//! A claim is a player's request to have its current full-size token
//! selection judged. Claims travel over a FIFO multi-producer channel that
//! is synchronized independently of any slot lock; the dealer dequeues and
//! judges them strictly in arrival order, and resolves each exactly once by
//! sending a `Verdict` down the claimant's one-shot channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use crate::core::PlayerId;

/// A pending judgment request.
///
/// Carries only the player id: the dealer re-reads the player's tokens from
/// the board at judgment time rather than trusting any snapshot taken when
/// the claim was created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Claim {
    /// The player whose selection should be judged.
    pub player: PlayerId,
}

/// Outcome of a judged claim, delivered back to the claimant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The selection was a valid matching set: score went up, the selection
    /// was cleared, and the award freeze applies.
    Awarded,

    /// The selection was judged and found invalid: the penalty freeze
    /// applies; the selection is kept but will not be re-judged until it
    /// changes.
    Penalized,

    /// The selection was destroyed by a concurrent award or rotation before
    /// it could be judged: no score change, no freeze.
    Invalidated,
}

/// Create the claim handoff channel: many workers, one dealer, FIFO.
pub(crate) fn claim_channel() -> (Sender<Claim>, Receiver<Claim>) {
    unbounded()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_dequeue_in_submission_order() {
        let (tx, rx) = claim_channel();

        for id in [2u8, 0, 1, 0] {
            tx.send(Claim { player: PlayerId::new(id) }).unwrap();
        }

        let order: Vec<u8> = rx.try_iter().map(|c| c.player.0).collect();
        assert_eq!(order, vec![2, 0, 1, 0]);
    }

    #[test]
    fn test_channel_survives_producer_clones() {
        let (tx, rx) = claim_channel();
        let tx2 = tx.clone();

        tx.send(Claim { player: PlayerId::new(0) }).unwrap();
        tx2.send(Claim { player: PlayerId::new(1) }).unwrap();
        drop(tx);
        drop(tx2);

        assert_eq!(rx.try_recv().unwrap().player, PlayerId::new(0));
        assert_eq!(rx.try_recv().unwrap().player, PlayerId::new(1));
        assert!(rx.try_recv().is_err());
    }
}
