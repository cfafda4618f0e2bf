//! The player actor: one thread per participant.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{bounded, select, unbounded, Receiver, RecvTimeoutError, Sender};
use parking_lot::Mutex;
use smallvec::SmallVec;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::core::{GameConfig, GameRng, PlayerId, SlotId};
use crate::dealer::claims::{Claim, Verdict};
use crate::display::DisplaySink;

use super::handle::{PlayerHandle, PlayerShared};
use super::synth::run_synthetic;

/// Cadence of freeze-countdown display updates.
const FREEZE_TICK: Duration = Duration::from_secs(1);

/// The movable half of a player: consumed by the player's thread.
///
/// Lifecycle per iteration: wait out any freeze (flushing actions queued
/// during it), dequeue one action, apply it against the board, and when the
/// selection reaches full size submit a claim and block until the dealer
/// resolves it. Every blocking point also listens on the stop channel.
pub(crate) struct Player {
    shared: Arc<PlayerShared>,
    board: Arc<Board>,
    display: Arc<dyn DisplaySink>,
    claims_tx: Sender<Claim>,
    actions_rx: Receiver<SlotId>,
    stop_rx: Receiver<()>,
    pub(crate) verdict_rx: Receiver<Verdict>,
    feature_size: usize,
    point_freeze: Duration,
    penalty_freeze: Duration,
    synthetic_action_interval: Duration,
    human: bool,
    rng: Option<GameRng>,
    freeze_until: Option<Instant>,
    /// The current selection has already been judged (penalized) and must
    /// change before it is claimed again.
    judged: bool,
}

impl Player {
    /// Build a player and its external handle.
    pub(crate) fn new(
        id: PlayerId,
        config: &GameConfig,
        board: Arc<Board>,
        display: Arc<dyn DisplaySink>,
        claims_tx: Sender<Claim>,
        human: bool,
        rng: GameRng,
    ) -> (Player, PlayerHandle) {
        let (actions_tx, actions_rx) = bounded(config.feature_size);
        let (stop_tx, stop_rx) = unbounded();
        let (verdict_tx, verdict_rx) = bounded(1);

        let shared = Arc::new(PlayerShared {
            id,
            score: AtomicU32::new(0),
            stopping: AtomicBool::new(false),
            tokens: Mutex::new(SmallVec::new()),
            actions_tx,
            stop_tx,
            verdict_tx,
            slot_count: config.table_size(),
        });

        let player = Player {
            shared: shared.clone(),
            board,
            display,
            claims_tx,
            actions_rx,
            stop_rx,
            verdict_rx,
            feature_size: config.feature_size,
            point_freeze: config.point_freeze,
            penalty_freeze: config.penalty_freeze,
            synthetic_action_interval: config.synthetic_action_interval,
            human,
            rng: Some(rng),
            freeze_until: None,
            judged: false,
        };

        (player, PlayerHandle { shared })
    }

    pub(crate) fn id(&self) -> PlayerId {
        self.shared.id
    }

    /// The player thread's main loop.
    pub(crate) fn run(mut self) {
        info!(player = %self.id(), human = self.human, "player thread starting");

        let synthetic = if self.human { None } else { Some(self.spawn_synthetic()) };

        while !self.stopping() {
            if !self.wait_out_freeze() {
                break;
            }
            let Some(slot) = self.next_action() else { break };
            self.apply_action(slot);
            if self.selection_full() && !self.judged {
                if !self.submit_claim_and_wait() {
                    break;
                }
            }
        }

        if let Some((stop_tx, join)) = synthetic {
            let _ = stop_tx.send(());
            let _ = join.join();
        }

        info!(player = %self.id(), "player thread terminated");
    }

    fn stopping(&self) -> bool {
        self.shared.stopping.load(Ordering::SeqCst)
    }

    fn spawn_synthetic(&mut self) -> (Sender<()>, std::thread::JoinHandle<()>) {
        let (stop_tx, stop_rx) = unbounded();
        let shared = self.shared.clone();
        let interval = self.synthetic_action_interval;
        let rng = self.rng.take().expect("synthetic rng already taken");
        let join = std::thread::Builder::new()
            .name(format!("synthetic-{}", self.id().index()))
            .spawn(move || run_synthetic(shared, stop_rx, interval, rng))
            .expect("spawn synthetic thread");
        (stop_tx, join)
    }

    /// Block until the freeze window elapses, updating the freeze display
    /// once per tick, then discard every action queued during the freeze.
    /// Returns `false` when stopped mid-freeze.
    fn wait_out_freeze(&mut self) -> bool {
        let Some(until) = self.freeze_until else { return true };

        loop {
            let now = Instant::now();
            if now >= until {
                break;
            }
            let remaining = until - now;
            self.display.show_freeze(self.id(), remaining);
            match self.stop_rx.recv_timeout(remaining.min(FREEZE_TICK)) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => return false,
                Err(RecvTimeoutError::Timeout) => {}
            }
        }

        self.freeze_until = None;
        self.display.show_freeze(self.id(), Duration::ZERO);

        let mut flushed = 0;
        while self.actions_rx.try_recv().is_ok() {
            flushed += 1;
        }
        if flushed > 0 {
            debug!(player = %self.id(), flushed, "discarded actions queued during freeze");
        }
        true
    }

    /// Dequeue the next action, blocking until one arrives or the player is
    /// stopped.
    fn next_action(&self) -> Option<SlotId> {
        select! {
            recv(self.actions_rx) -> action => action.ok(),
            recv(self.stop_rx) -> _ => None,
        }
    }

    /// Toggle a token on `slot`.
    ///
    /// A slot already in the selection is toggled off (pruning the entry
    /// even when the board reports the token already gone, which means a
    /// concurrent removal beat us). A new slot is toggled on only while the
    /// selection has room and the slot is occupied; the board's occupancy
    /// check resolves ties against concurrent rotations by no-opping.
    fn apply_action(&mut self, slot: SlotId) {
        let mut tokens = self.shared.tokens.lock();

        if let Some(pos) = tokens.iter().position(|&s| s == slot) {
            if !self.board.remove_token(self.id(), slot) {
                trace!(player = %self.id(), %slot, "token already gone, pruning stale entry");
            }
            tokens.remove(pos);
            self.judged = false;
        } else if tokens.len() < self.feature_size {
            if self.board.place_token(self.id(), slot) {
                tokens.push(slot);
                self.judged = false;
            } else {
                trace!(player = %self.id(), %slot, "ignored action on empty slot");
            }
        }
    }

    fn selection_full(&self) -> bool {
        self.shared.tokens.lock().len() == self.feature_size
    }

    /// Hand the selection to the dealer and block until resolved. Returns
    /// `false` when stopped while waiting.
    fn submit_claim_and_wait(&mut self) -> bool {
        debug!(player = %self.id(), "selection full, submitting claim");
        if self.claims_tx.send(Claim { player: self.id() }).is_err() {
            return false;
        }

        let verdict = select! {
            recv(self.verdict_rx) -> verdict => match verdict {
                Ok(verdict) => verdict,
                Err(_) => return false,
            },
            recv(self.stop_rx) -> _ => return false,
        };

        debug!(player = %self.id(), ?verdict, "claim resolved");
        match verdict {
            Verdict::Awarded => {
                // Selection already cleared by the dealer.
                self.judged = false;
                self.freeze_until = Some(Instant::now() + self.point_freeze);
            }
            Verdict::Penalized => {
                self.judged = true;
                self.freeze_until = Some(Instant::now() + self.penalty_freeze);
            }
            Verdict::Invalidated => {
                self.prune_stale_tokens();
            }
        }
        true
    }

    /// Drop selection entries whose board token is gone (cleared by a
    /// concurrent award or sweep), restoring the set↔matrix invariant.
    fn prune_stale_tokens(&mut self) {
        let mut tokens = self.shared.tokens.lock();
        let id = self.id();
        let board = &self.board;
        tokens.retain(|slot| board.has_token(id, *slot));
        self.judged = false;
    }
}
