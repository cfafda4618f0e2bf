//! End-to-end game scenarios.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use matchboard::core::{CardId, GameConfig, PlayerId, SlotId};
use matchboard::display::RecordingDisplay;
use matchboard::game::Game;
use matchboard::rules::{FnRules, MatchRules};

/// Wait for a spawned game to finish, failing loudly instead of hanging.
fn join_within(join: thread::JoinHandle<()>, timeout: Duration) {
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let _ = join.join();
        let _ = tx.send(());
    });
    rx.recv_timeout(timeout).expect("game did not shut down in time");
}

/// Rules where any single card is a valid set.
fn single_card_rules() -> Arc<dyn MatchRules> {
    Arc::new(FnRules::new(
        |cards: &[CardId]| cards.len() == 1,
        |cards: &[CardId], limit| cards.iter().take(limit).map(|&c| vec![c]).collect(),
    ))
}

/// Rules where claims always fail but sets always "exist" while cards
/// remain, keeping the game alive until terminated.
fn never_match_rules() -> Arc<dyn MatchRules> {
    Arc::new(FnRules::new(
        |_: &[CardId]| false,
        |cards: &[CardId], _| {
            if cards.is_empty() {
                Vec::new()
            } else {
                vec![vec![cards[0]]]
            }
        },
    ))
}

/// Rules where nothing ever matches and no set ever exists.
fn dead_rules() -> Arc<dyn MatchRules> {
    Arc::new(FnRules::new(|_: &[CardId]| false, |_: &[CardId], _| Vec::new()))
}

/// Degenerate board: one slot, one card, matching-set size one. Placing a
/// token on the only occupied slot must yield an awarded claim, a score of
/// one, and (with the deck exhausted) the game ends on its own.
#[test]
fn test_degenerate_single_slot_game_awards_and_finishes() {
    let config = GameConfig::new(1, 1, 1)
        .with_human_players(1)
        .with_deck_size(1)
        .with_feature_size(1)
        .with_turn_timeout(Duration::from_millis(200))
        .with_freezes(Duration::from_millis(1), Duration::from_millis(1))
        .with_seed(3);

    let display = Arc::new(RecordingDisplay::new());
    let game = Game::new(config, single_card_rules(), display.clone()).unwrap();
    let (handle, join) = game.spawn();

    let player = PlayerId::new(0);
    let deadline = Instant::now() + Duration::from_secs(5);
    while handle.player(player).unwrap().score() == 0 && Instant::now() < deadline {
        let _ = handle.submit_action(player, SlotId::new(0));
        thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(handle.player(player).unwrap().score(), 1);

    // Deck and board are now empty, so the game finishes without help.
    join_within(join, Duration::from_secs(5));
    assert_eq!(display.winners(), Some(vec![player]));
    assert_eq!(display.score_of(player), Some(1));
}

/// No matching set exists anywhere: the dealer deals once, sees a dead
/// game, and goes straight to the winner announcement.
#[test]
fn test_dead_game_finishes_immediately() {
    let config = GameConfig::new(2, 3, 4)
        .with_deck_size(20)
        .with_turn_timeout(Duration::from_secs(30))
        .with_seed(11);

    let display = Arc::new(RecordingDisplay::new());
    let game = Game::new(config, dead_rules(), display.clone()).unwrap();
    let (_handle, join) = game.spawn();

    join_within(join, Duration::from_secs(5));

    // Every player tied at zero, so all are winners.
    assert_eq!(display.winners(), Some(vec![PlayerId::new(0), PlayerId::new(1)]));
}

/// An invalid claim penalizes: no score, selection retained, and actions
/// submitted during the penalty freeze are discarded at flush rather than
/// applied late.
#[test]
fn test_penalty_retains_selection_and_freeze_discards_actions() {
    let config = GameConfig::new(1, 2, 2)
        .with_human_players(1)
        .with_deck_size(8)
        .with_feature_size(2)
        .with_turn_timeout(Duration::from_secs(30))
        .with_freezes(Duration::from_millis(1), Duration::from_millis(1500))
        .with_seed(5);

    let display = Arc::new(RecordingDisplay::new());
    let game = Game::new(config, never_match_rules(), display).unwrap();
    let (handle, join) = game.spawn();

    let player = PlayerId::new(0);
    let target = handle.player(player).unwrap().clone();

    // Build a full selection; the player claims it and gets penalized.
    let deadline = Instant::now() + Duration::from_secs(5);
    while target.tokens().len() < 2 && Instant::now() < deadline {
        let _ = handle.submit_action(player, SlotId::new(0));
        let _ = handle.submit_action(player, SlotId::new(1));
        thread::sleep(Duration::from_millis(5));
    }
    assert_eq!(target.tokens().len(), 2);
    let freeze_started = Instant::now();

    // Judgment is immediate; give it a margin, then poke the frozen player.
    thread::sleep(Duration::from_millis(300));
    let _ = handle.submit_action(player, SlotId::new(0));

    // Wait out the rest of the freeze plus slack: the poke must have been
    // discarded at flush, never applied late.
    thread::sleep(Duration::from_millis(1600).saturating_sub(freeze_started.elapsed()));
    thread::sleep(Duration::from_millis(200));
    assert_eq!(target.tokens().len(), 2, "freeze-window action was applied");
    assert_eq!(target.score(), 0);

    // After the freeze the player is responsive again: a single toggle
    // shrinks the selection.
    handle.submit_action(player, SlotId::new(0)).unwrap();
    let deadline = Instant::now() + Duration::from_secs(5);
    while target.tokens().len() == 2 && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(target.tokens().len(), 1);

    handle.terminate();
    join_within(join, Duration::from_secs(5));
}

/// Termination while players are blocked (empty action queues, mid-freeze)
/// still tears the game down promptly.
#[test]
fn test_terminate_wakes_blocked_players() {
    let config = GameConfig::new(3, 3, 4)
        .with_human_players(3)
        .with_deck_size(30)
        .with_turn_timeout(Duration::from_secs(30))
        .with_seed(9);

    let display = Arc::new(RecordingDisplay::new());
    let game = Game::new(config, never_match_rules(), display.clone()).unwrap();
    let (handle, join) = game.spawn();

    // Players are parked on their empty action queues.
    thread::sleep(Duration::from_millis(100));
    handle.terminate();
    join_within(join, Duration::from_secs(5));

    assert!(display.winners().is_some());
}
