//! Board invariant tests.
//!
//! The bijection and token-occupancy invariants must hold not only under
//! sequential mutation but under concurrent token churn from many player
//! threads while cards rotate.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use proptest::prelude::*;

use matchboard::core::{CardId, GameConfig, PlayerId, SlotId};
use matchboard::display::NullDisplay;
use matchboard::Board;

fn test_board(players: usize, rows: usize, columns: usize, deck: usize) -> Board {
    let config = GameConfig::new(players, rows, columns).with_deck_size(deck);
    Board::new(&config, Arc::new(NullDisplay))
}

#[test]
fn test_bijection_after_sequential_churn() {
    let board = test_board(2, 3, 4, 24);

    for i in 0..12u16 {
        board.place_card(CardId::new(i as u32), SlotId::new(i));
    }
    assert!(board.bijection_holds());
    assert_eq!(board.count_cards(), 12);

    // Replace half the board.
    for i in (0..12u16).step_by(2) {
        board.remove_card(SlotId::new(i));
        board.place_card(CardId::new(12 + i as u32), SlotId::new(i));
    }
    assert!(board.bijection_holds());
    assert_eq!(board.count_cards(), 12);
}

#[test]
fn test_token_gone_after_concurrent_removal() {
    // Two players race the same slot while the card is pulled out from
    // under them: at no point may a token survive on an empty slot.
    let board = Arc::new(test_board(2, 1, 1, 4));
    board.place_card(CardId::new(0), SlotId::new(0));

    let b1 = board.clone();
    let placer = thread::spawn(move || {
        let mut placed = 0;
        for _ in 0..1000 {
            if b1.place_token(PlayerId::new(0), SlotId::new(0)) {
                placed += 1;
                b1.remove_token(PlayerId::new(0), SlotId::new(0));
            }
        }
        placed
    });

    let b2 = board.clone();
    let rotator = thread::spawn(move || {
        for round in 0..200u32 {
            b2.remove_card(SlotId::new(0));
            b2.place_card(CardId::new(round % 4), SlotId::new(0));
        }
    });

    let placed = placer.join().unwrap();
    rotator.join().unwrap();

    // Some placements succeeded, and every removal left the slot clean.
    assert!(placed > 0);
    assert!(board.bijection_holds());
    if board.card_at(SlotId::new(0)).is_none() {
        assert!(!board.has_token(PlayerId::new(0), SlotId::new(0)));
    }
}

#[test]
fn test_concurrent_toggles_and_rotation_make_progress() {
    let players = 4;
    let board = Arc::new(test_board(players, 2, 3, 12));
    for i in 0..6u16 {
        board.place_card(CardId::new(i as u32), SlotId::new(i));
    }

    let stop_at = Instant::now() + Duration::from_millis(300);

    let mut togglers = Vec::new();
    for p in 0..players as u8 {
        let board = board.clone();
        togglers.push(thread::spawn(move || {
            let player = PlayerId::new(p);
            let mut ops: u64 = 0;
            while Instant::now() < stop_at {
                let slot = SlotId::new((ops % 6) as u16);
                if !board.remove_token(player, slot) {
                    board.place_token(player, slot);
                }
                ops += 1;
            }
            ops
        }));
    }

    let rotator = {
        let board = board.clone();
        thread::spawn(move || {
            let mut next_card = 6u32;
            while Instant::now() < stop_at {
                for slot in SlotId::all(6) {
                    if board.remove_card(slot).is_some() {
                        board.place_card(CardId::new(next_card % 12), slot);
                        next_card += 1;
                    }
                }
            }
        })
    };

    // Deadlock-freedom: every thread finishes and did work.
    for toggler in togglers {
        assert!(toggler.join().unwrap() > 0);
    }
    rotator.join().unwrap();

    assert!(board.bijection_holds());
    for slot in SlotId::all(6) {
        if board.card_at(slot).is_none() {
            for player in PlayerId::all(players) {
                assert!(!board.has_token(player, slot));
            }
        }
    }
}

#[test]
fn test_snapshot_matches_tokens_under_contention() {
    let board = Arc::new(test_board(2, 2, 2, 8));
    for i in 0..4u16 {
        board.place_card(CardId::new(i as u32), SlotId::new(i));
    }

    let player = PlayerId::new(0);
    board.place_token(player, SlotId::new(0));
    board.place_token(player, SlotId::new(3));

    // Another player's churn must never leak into this snapshot.
    let board2 = board.clone();
    let noise = thread::spawn(move || {
        for _ in 0..500 {
            board2.place_token(PlayerId::new(1), SlotId::new(1));
            board2.remove_token(PlayerId::new(1), SlotId::new(1));
        }
    });

    for _ in 0..100 {
        let snapshot = board.snapshot_player_cards(player);
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].0, SlotId::new(0));
        assert_eq!(snapshot[1].0, SlotId::new(3));
    }
    noise.join().unwrap();
}

proptest! {
    /// Arbitrary interleavings of sequential board operations preserve the
    /// bijection and the token-occupancy invariant.
    #[test]
    fn prop_sequential_ops_preserve_invariants(ops in prop::collection::vec((0u8..4, 0u16..6, 0u32..12), 1..200)) {
        let board = test_board(3, 2, 3, 12);

        for (op, slot, card) in ops {
            let slot = SlotId::new(slot);
            let player = PlayerId::new((card % 3) as u8);
            match op {
                0 => {
                    if board.card_at(slot).is_none() && board.slot_of(CardId::new(card)).is_none() {
                        board.place_card(CardId::new(card), slot);
                    }
                }
                1 => { board.remove_card(slot); }
                2 => { board.place_token(player, slot); }
                _ => { board.remove_token(player, slot); }
            }

            prop_assert!(board.bijection_holds());
            if board.card_at(slot).is_none() {
                for p in PlayerId::all(3) {
                    prop_assert!(!board.has_token(p, slot));
                }
            }
        }
    }
}
