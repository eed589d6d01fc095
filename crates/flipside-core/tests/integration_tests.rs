//! Integration tests for the Flipside game engine.
//!
//! These tests drive complete games through the public API, from the deal
//! through to a winner.

use flipside_core::*;
use std::sync::mpsc;

/// Upper bound on commands in one game before we call it stuck
const MAX_COMMANDS: usize = 50_000;

fn names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("Bot {i}")).collect()
}

fn all_bots(count: usize, seed: u64) -> Game {
    Game::with_seed(count, names(count), vec![true; count], seed).unwrap()
}

/// Check the invariants that must hold after every command
fn assert_invariants(game: &Game) {
    assert_eq!(game.total_cards(), DECK_SIZE, "cards must be conserved");
    assert!(game.current_player_id() < game.player_count());
    if !game.is_finished() {
        assert_ne!(game.active_color(), Color::None);
        assert!(game.active_color().is_concrete());
        assert_eq!(game.active_color().is_dark(), game.is_dark());
    }
}

/// Run AI turns until the game ends, checking invariants along the way
fn play_out(game: &mut Game) -> usize {
    let mut commands = 0;
    while !game.is_finished() && commands < MAX_COMMANDS {
        let before = game.current_player_id();
        let steps = game.pending_steps();
        let direction = game.direction();
        let n = game.player_count() as isize;

        let action = game.run_ai_turn().unwrap();
        assert_invariants(game);

        if action == GameAction::AdvanceTurn {
            let expected = (before as isize + direction.sign() * steps as isize).rem_euclid(n);
            assert_eq!(game.current_player_id(), expected as usize);
            assert!(!game.must_press_next());
        } else if !game.is_finished() {
            assert!(game.must_press_next());
        }
        commands += 1;
    }
    commands
}

#[test]
fn test_bot_games_finish() {
    for seed in 0..12 {
        let count = 2 + (seed as usize % 3);
        let mut game = all_bots(count, seed);
        assert_invariants(&game);

        let commands = play_out(&mut game);

        assert!(game.is_finished(), "seed {seed} did not finish in {commands} commands");
        let winner = game.winner().unwrap();
        assert!(winner.has_empty_hand());
        assert_eq!(game.final_score(), Some(game.score()));
    }
}

#[test]
fn test_game_over_notified_once() {
    let mut game = all_bots(3, 99);
    let (tx, rx) = mpsc::channel::<GameEvent>();
    game.register_observer(Box::new(tx));

    play_out(&mut game);
    assert!(game.is_finished());

    let events: Vec<GameEvent> = rx.try_iter().collect();
    let endings: Vec<&str> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::GameOver { message } => Some(message.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(endings.len(), 1);
    assert!(endings[0].contains("won"));
    assert_eq!(endings[0], game.info());

    // The last update shows the finished table
    match events.last() {
        Some(GameEvent::Update(snapshot)) => {
            assert!(snapshot.hand.is_empty());
            assert_eq!(snapshot.info, game.info());
        }
        other => panic!("expected a final update, got {other:?}"),
    }
}

#[test]
fn test_every_command_notifies() {
    let mut game = all_bots(2, 5);
    let (tx, rx) = mpsc::channel::<GameEvent>();
    game.register_observer(Box::new(tx));
    assert_eq!(rx.try_iter().count(), 1);

    for _ in 0..20 {
        if game.is_finished() {
            break;
        }
        game.run_ai_turn().unwrap();
        let updates = rx
            .try_iter()
            .filter(|e| matches!(e, GameEvent::Update(_)))
            .count();
        assert_eq!(updates, 1);
    }
}

#[test]
fn test_same_seed_same_game() {
    let mut a = all_bots(4, 2024);
    let mut b = all_bots(4, 2024);

    let commands_a = play_out(&mut a);
    let commands_b = play_out(&mut b);

    assert_eq!(commands_a, commands_b);
    assert_eq!(a.winner().map(|p| p.id), b.winner().map(|p| p.id));
    assert_eq!(a.final_score(), b.final_score());
}

#[test]
fn test_sequencing_errors_leave_state_unchanged() {
    let mut game = all_bots(3, 11);

    for _ in 0..200 {
        if game.is_finished() {
            break;
        }
        let before = game.snapshot();
        let total = game.total_cards();

        if game.must_press_next() {
            assert_eq!(game.draw(), Err(GameError::MustAdvanceTurn));
            assert_eq!(game.play(0), Err(GameError::MustAdvanceTurn));
            assert_eq!(game.play_wild(0, Color::Red), Err(GameError::MustAdvanceTurn));
        } else {
            assert_eq!(game.advance_turn(), Err(GameError::ActionRequired));
        }

        assert_eq!(game.snapshot(), before);
        assert_eq!(game.total_cards(), total);
        game.run_ai_turn().unwrap();
    }
}

#[test]
fn test_legality_matches_valid_plays() {
    let mut game = all_bots(2, 77);

    for _ in 0..100 {
        if game.is_finished() {
            break;
        }
        if !game.must_press_next() {
            let valid = game.valid_plays();
            let hand_size = game.current_player().hand_size();
            for index in 0..hand_size {
                let card = game.peek_card(index).unwrap();
                let top = game.top_card().face(game.is_dark());
                let face = card.face(game.is_dark());
                let legal = face.is_wild()
                    || face.color == game.active_color()
                    || face.rank == top.rank;
                assert_eq!(valid.contains(&index), legal);

                if !legal {
                    assert!(matches!(
                        game.play(index),
                        Err(GameError::IllegalPlay { .. })
                    ));
                }
            }
        }
        game.run_ai_turn().unwrap();
    }
}

#[test]
fn test_mixed_table() {
    let mut game = Game::with_seed(
        2,
        vec!["Human".into(), "Bot".into()],
        vec![false, true],
        3,
    )
    .unwrap();

    assert!(game.peek_card(0).is_some());
    assert!(game.peek_card(HAND_SIZE).is_none());
    assert_eq!(game.run_ai_turn(), Err(GameError::NotAiTurn));

    // Human draws and passes, then the bot moves
    game.draw().unwrap();
    game.advance_turn().unwrap();
    assert!(game.snapshot().current_is_ai);

    let before = game.current_player().hand_size();
    let action = game.run_ai_turn().unwrap();
    let after = game.current_player().hand_size();
    match action {
        GameAction::Draw => assert_eq!(after, before + 1),
        GameAction::Play(_) | GameAction::PlayWild(..) => {
            assert!(after < before || game.is_finished())
        }
        GameAction::AdvanceTurn => panic!("bot should act before advancing"),
    }
    assert!(game.must_press_next() || game.is_finished());
}

#[test]
fn test_invalid_construction() {
    assert_eq!(
        Game::new(1, names(1), vec![false]).unwrap_err(),
        GameError::InvalidPlayerCount(1)
    );
    assert_eq!(
        Game::new(5, names(5), vec![false; 5]).unwrap_err(),
        GameError::InvalidPlayerCount(5)
    );
    assert!(Game::new(4, names(4), vec![false; 4]).is_ok());
}
