//! Synthetic action generation.
//!
//! Non-human players get a sibling thread that does nothing but enqueue
//! random slot toggles at a configured pace. It never touches the board:
//! everything flows through the same lossy action queue human input uses,
//! so the player loop cannot tell the two apart.

use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::{debug, trace};

use crate::core::{GameRng, SlotId};

use super::handle::PlayerShared;

/// Main loop of the synthetic sibling thread.
///
/// The pacing interval doubles as the stop-poll: each tick either generates
/// one action or observes the stop signal. A saturated queue is routine
/// here (the player may be frozen or awaiting judgment), so drops are
/// logged at trace level only.
pub(crate) fn run_synthetic(
    shared: Arc<PlayerShared>,
    stop_rx: Receiver<()>,
    interval: Duration,
    mut rng: GameRng,
) {
    debug!(player = %shared.id, "synthetic thread starting");

    loop {
        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {
                let slot = SlotId::new(rng.gen_range_usize(0..shared.slot_count) as u16);
                if let Err(err) = shared.submit(slot) {
                    trace!(player = %shared.id, %err, "synthetic action dropped");
                }
            }
        }
    }

    debug!(player = %shared.id, "synthetic thread terminated");
}
