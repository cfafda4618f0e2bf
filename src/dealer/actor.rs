//! The dealer actor: single coordinator thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::core::{CardId, GameConfig, GameRng, PlayerId, PlayerMap, SlotId};
use crate::display::DisplaySink;
use crate::player::{Player, PlayerHandle};
use crate::rules::MatchRules;

use super::claims::{Claim, Verdict};

/// Cadence of countdown display updates while no claim is pending.
const COUNTDOWN_TICK: Duration = Duration::from_millis(100);

/// The coordinator.
///
/// Owns the deck, the countdown deadline, and the claim queue's receiving
/// end. Runs the rotation cycle (deal, countdown loop servicing claims,
/// sweep) and the termination sequence. Claims are judged strictly in
/// arrival order; judgment mutates the board (card removal and
/// replacement), so serializing it here is what preserves the slot↔card
/// bijection.
pub struct Dealer {
    config: GameConfig,
    board: Arc<Board>,
    display: Arc<dyn DisplaySink>,
    rules: Arc<dyn MatchRules>,
    deck: Vec<CardId>,
    rng: GameRng,
    claims_rx: Receiver<Claim>,
    players: PlayerMap<PlayerHandle>,
    runners: Vec<Player>,
    deadline: Instant,
    terminate: Arc<AtomicBool>,
}

impl Dealer {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        config: &GameConfig,
        board: Arc<Board>,
        display: Arc<dyn DisplaySink>,
        rules: Arc<dyn MatchRules>,
        players: PlayerMap<PlayerHandle>,
        runners: Vec<Player>,
        claims_rx: Receiver<Claim>,
        terminate: Arc<AtomicBool>,
    ) -> Self {
        Self {
            board,
            display,
            rules,
            deck: (0..config.deck_size as u32).map(CardId::new).collect(),
            rng: GameRng::new(config.seed),
            claims_rx,
            players,
            runners,
            deadline: Instant::now() + config.turn_timeout,
            terminate,
            config: config.clone(),
        }
    }

    /// The dealer thread's main loop: spawn the players, run rotation
    /// rounds until no matching set remains in play (or termination is
    /// requested), then announce winners and tear everything down.
    pub fn run(mut self) {
        info!("dealer thread starting");

        let mut workers: Vec<(PlayerId, JoinHandle<()>)> = Vec::with_capacity(self.runners.len());
        for runner in std::mem::take(&mut self.runners) {
            let id = runner.id();
            let join = std::thread::Builder::new()
                .name(format!("player-{}", id.index()))
                .spawn(move || runner.run())
                .expect("spawn player thread");
            workers.push((id, join));
        }

        loop {
            self.deal();
            if self.no_sets_left() {
                debug!("no matching set left in deck or on board, finishing");
                break;
            }
            if self.terminated() {
                break;
            }
            self.countdown_loop();
            self.sweep();
            if self.terminated() {
                break;
            }
        }

        self.announce_winners();
        self.shutdown(workers);

        info!("dealer thread terminated");
    }

    fn terminated(&self) -> bool {
        self.terminate.load(Ordering::SeqCst)
    }

    /// Fill every empty slot from the deck, visiting slots in randomized
    /// order, then log the sets now available.
    fn deal(&mut self) {
        self.rng.shuffle(&mut self.deck);
        let mut order: Vec<SlotId> = SlotId::all(self.board.slot_count()).collect();
        self.rng.shuffle(&mut order);

        let mut placed = 0;
        for slot in order {
            if self.board.card_at(slot).is_none() {
                let Some(card) = self.deck.pop() else { break };
                self.board.place_card(card, slot);
                placed += 1;
            }
        }

        if placed > 0 {
            debug!(placed, deck_remaining = self.deck.len(), "dealt cards");
            self.log_hints();
        }
    }

    /// Log every matching set currently on the board, with its slots.
    fn log_hints(&self) {
        let on_board = self.board.cards_on_board();
        for set in self.rules.find_sets(&on_board, usize::MAX) {
            let mut slots: Vec<SlotId> =
                set.iter().filter_map(|&card| self.board.slot_of(card)).collect();
            slots.sort();
            debug!(?slots, cards = ?set, "matching set available");
        }
    }

    /// True when neither the deck nor the board holds any matching set.
    fn no_sets_left(&self) -> bool {
        let mut in_play = self.deck.clone();
        in_play.extend(self.board.cards_on_board());
        self.rules.find_sets(&in_play, 1).is_empty()
    }

    /// Service claims until the countdown deadline passes or termination is
    /// requested. A judgment in flight always completes before the deadline
    /// is honored.
    fn countdown_loop(&mut self) {
        self.reset_countdown();

        while !self.terminated() {
            let now = Instant::now();
            if now >= self.deadline {
                break;
            }
            let remaining = self.deadline - now;

            match self.claims_rx.recv_timeout(remaining.min(COUNTDOWN_TICK)) {
                Ok(claim) => {
                    if self.judge(claim) {
                        self.reset_countdown();
                    } else {
                        self.update_countdown();
                    }
                }
                Err(RecvTimeoutError::Timeout) => self.update_countdown(),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    fn reset_countdown(&mut self) {
        self.deadline = Instant::now() + self.config.turn_timeout;
        self.display.show_countdown(self.config.turn_timeout, false);
    }

    fn update_countdown(&self) {
        let remaining = self.deadline.saturating_duration_since(Instant::now());
        self.display
            .show_countdown(remaining, remaining < self.config.turn_timeout_warning);
    }

    /// Judge one claim. Returns `true` iff a set was awarded (which resets
    /// the countdown).
    ///
    /// The claimant's cards are re-materialized from the token matrix, then
    /// re-read under the involved slot locks (ascending); the claimant is
    /// blocked until `resolve` is called, so its selection cannot change
    /// underneath the judgment.
    fn judge(&mut self, claim: Claim) -> bool {
        let player = self.players[claim.player].clone();
        let snapshot = self.board.snapshot_player_cards(claim.player);

        if snapshot.is_empty() {
            debug!(player = %claim.player, "claim invalidated before judgment");
            player.resolve(Verdict::Invalidated);
            return false;
        }

        let slots: Vec<SlotId> = snapshot.iter().map(|&(slot, _)| slot).collect();
        let mut guards = self.board.lock_slots(&slots);

        let mut cards = Vec::with_capacity(slots.len());
        let mut intact = true;
        for (guard, &(_, seen)) in guards.iter().zip(&snapshot) {
            match guard.card {
                Some(card) if card == seen && guard.tokens[claim.player.index()] => {
                    cards.push(card);
                }
                _ => {
                    intact = false;
                    break;
                }
            }
        }

        if !intact {
            Board::release_descending(guards);
            debug!(player = %claim.player, "claim invalidated under lock");
            player.resolve(Verdict::Invalidated);
            return false;
        }

        if self.rules.is_valid_set(&cards) {
            for (guard, &slot) in guards.iter_mut().zip(&slots) {
                self.board.clear_cell(slot, guard);
            }
            Board::release_descending(guards);

            player.clear_tokens();
            let score = player.add_point();
            self.display.show_score(claim.player, score);
            player.resolve(Verdict::Awarded);
            info!(player = %claim.player, score, "matching set awarded");

            // Keep the board fully populated while the countdown runs.
            self.deal();
            true
        } else {
            Board::release_descending(guards);
            player.resolve(Verdict::Penalized);
            debug!(player = %claim.player, "claim penalized");
            false
        }
    }

    /// Rotation sweep: resolve anything still queued, return every card on
    /// the board to the deck, and clear all selections.
    fn sweep(&mut self) {
        debug!("sweeping board");
        self.drain_claims();

        let mut guards = self.board.lock_all();
        for (index, guard) in guards.iter_mut().enumerate() {
            if let Some(card) = self.board.clear_cell(SlotId::new(index as u16), guard) {
                self.deck.push(card);
            }
        }
        Board::release_descending(guards);

        for (_, player) in self.players.iter() {
            player.clear_tokens();
        }
    }

    /// Resolve every queued claim as a no-op. Used when the board is about
    /// to be (or has been) invalidated wholesale, so no claimant stays
    /// blocked across a rotation or shutdown.
    fn drain_claims(&self) {
        while let Ok(claim) = self.claims_rx.try_recv() {
            debug!(player = %claim.player, "resolving queued claim as no-op");
            self.players[claim.player].resolve(Verdict::Invalidated);
        }
    }

    /// Report every player with the maximum score as a winner.
    fn announce_winners(&self) {
        let max = self.players.iter().map(|(_, p)| p.score()).max().unwrap_or(0);
        let winners: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|(_, p)| p.score() == max)
            .map(|(id, _)| id)
            .collect();
        info!(?winners, score = max, "game over");
        self.display.announce_winners(&winners);
    }

    /// Stop every player and join the threads in reverse id order.
    fn shutdown(&mut self, workers: Vec<(PlayerId, JoinHandle<()>)>) {
        self.terminate.store(true, Ordering::SeqCst);
        for (_, player) in self.players.iter() {
            player.stop();
        }
        self.drain_claims();

        for (id, join) in workers.into_iter().rev() {
            debug!(player = %id, "joining player thread");
            if join.join().is_err() {
                warn!(player = %id, "player thread panicked");
            }
        }
    }
}
