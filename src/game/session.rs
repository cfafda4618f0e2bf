//! Wiring a complete game: board, players, dealer, shutdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use tracing::warn;

use crate::board::Board;
use crate::core::{ConfigError, GameConfig, GameRng, PlayerId, PlayerMap, SlotId, SubmitError};
use crate::dealer::claims::claim_channel;
use crate::dealer::Dealer;
use crate::display::DisplaySink;
use crate::player::{Player, PlayerHandle};
use crate::rules::MatchRules;

/// A fully wired game, ready to run.
///
/// `Game::new` validates the configuration and builds every component;
/// nothing starts until [`Game::run`] (blocking) or [`Game::spawn`]. The
/// dealer thread spawns the player threads itself and joins them in reverse
/// id order on the way out, so a returned `run`/joined `spawn` means every
/// thread has terminated.
///
/// ## Example
///
/// ```no_run
/// use std::sync::Arc;
/// use matchboard::core::{CardId, GameConfig};
/// use matchboard::display::LogDisplay;
/// use matchboard::game::Game;
/// use matchboard::rules::FnRules;
///
/// let config = GameConfig::new(2, 3, 4).with_seed(7);
/// let rules = Arc::new(FnRules::new(
///     |cards: &[CardId]| cards.len() == 3,
///     |cards: &[CardId], _| vec![cards.to_vec()],
/// ));
///
/// let game = Game::new(config, rules, Arc::new(LogDisplay)).unwrap();
/// let handle = game.handle();
/// game.run(); // blocks until the game finishes
/// # let _ = handle;
/// ```
pub struct Game {
    dealer: Dealer,
    handle: GameHandle,
}

impl Game {
    /// Build a game from a configuration, matching rules, and display sink.
    pub fn new(
        config: GameConfig,
        rules: Arc<dyn MatchRules>,
        display: Arc<dyn DisplaySink>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let board = Arc::new(Board::new(&config, display.clone()));
        let terminate = Arc::new(AtomicBool::new(false));
        let (claims_tx, claims_rx) = claim_channel();

        let mut rng = GameRng::new(config.seed);
        let mut runners = Vec::with_capacity(config.players);
        let mut players = Vec::with_capacity(config.players);
        for id in PlayerId::all(config.players) {
            let human = id.index() < config.human_players;
            let (runner, handle) = Player::new(
                id,
                &config,
                board.clone(),
                display.clone(),
                claims_tx.clone(),
                human,
                rng.fork(),
            );
            runners.push(runner);
            players.push(handle);
        }

        let dealer = Dealer::new(
            &config,
            board,
            display,
            rules,
            PlayerMap::new(config.players, |id| players[id.index()].clone()),
            runners,
            claims_rx,
            terminate.clone(),
        );

        let handle = GameHandle { players, terminate };
        Ok(Self { dealer, handle })
    }

    /// A handle for input delivery and termination.
    #[must_use]
    pub fn handle(&self) -> GameHandle {
        self.handle.clone()
    }

    /// Run the game on the current thread; returns when every thread has
    /// terminated.
    pub fn run(self) {
        self.dealer.run();
    }

    /// Run the game on a dedicated dealer thread.
    pub fn spawn(self) -> (GameHandle, JoinHandle<()>) {
        let handle = self.handle.clone();
        let dealer = self.dealer;
        let join = std::thread::Builder::new()
            .name("dealer".into())
            .spawn(move || dealer.run())
            .expect("spawn dealer thread");
        (handle, join)
    }
}

/// Cloneable handle to a running (or not-yet-running) game.
///
/// This is the seam input sources talk to: human key handlers and remote
/// feeds call [`GameHandle::submit_action`] from any thread.
#[derive(Clone)]
pub struct GameHandle {
    players: Vec<PlayerHandle>,
    terminate: Arc<AtomicBool>,
}

impl GameHandle {
    /// Number of players in the game.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Handle to one player, if the id is in range.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerHandle> {
        self.players.get(player.index())
    }

    /// Deliver an action (a slot toggle) to a player.
    ///
    /// Non-blocking and lossy: a saturated queue drops the action. Drops
    /// are logged as warnings and also reported to the caller.
    pub fn submit_action(&self, player: PlayerId, slot: SlotId) -> Result<(), SubmitError> {
        let Some(target) = self.players.get(player.index()) else {
            return Err(SubmitError::UnknownPlayer { player });
        };
        let result = target.submit_action(slot);
        if let Err(err) = &result {
            warn!(%err, "action not accepted");
        }
        result
    }

    /// Request cooperative termination: the dealer finishes its current
    /// step, announces winners, and joins every player thread.
    pub fn terminate(&self) {
        self.terminate.store(true, Ordering::SeqCst);
        for player in &self.players {
            player.stop();
        }
    }

    /// Has termination been requested (or the game finished)?
    #[must_use]
    pub fn terminating(&self) -> bool {
        self.terminate.load(Ordering::SeqCst)
    }
}
