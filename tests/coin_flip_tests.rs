//! Coin flip integration tests.

use pocket_arcade::{
    CoinFlip, CoinFlipEvent, CoinSide, FlipResult, GameKind, GameRng, LeaderboardStore, MemoryStorage,
    PendingPrompt, ScriptedRng, Timings,
};
use std::time::Duration;

const FLIP: Duration = Duration::from_millis(1500);

fn flip(game: &mut CoinFlip<ScriptedRng>, store: &mut LeaderboardStore<MemoryStorage>, guess: CoinSide) -> FlipResult {
    assert!(game.flip(guess));
    match game.advance(store, FLIP).as_slice() {
        [CoinFlipEvent::Landed(result)] => *result,
        other => panic!("expected one landing, got {:?}", other),
    }
}

// =============================================================================
// Streaks
// =============================================================================

#[test]
fn test_streak_builds_and_breaks() {
    // Heads, heads, heads, tails
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0, 0, 0, 1]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();

    for expected in 1..=3 {
        let result = flip(&mut game, &mut store, CoinSide::Heads);
        assert!(result.won);
        assert_eq!(result.streak, expected);
        assert_eq!(result.new_best, Some(expected));
    }

    let miss = flip(&mut game, &mut store, CoinSide::Heads);
    assert_eq!(miss.outcome, CoinSide::Tails);
    assert_eq!(miss.streak, 0);
    assert_eq!(miss.ended_streak, Some(3));
    assert_eq!(game.best_streak(), 3);
    assert_eq!(
        game.pending_prompt(),
        Some(PendingPrompt { game: GameKind::CoinFlip, score: 3 })
    );
}

#[test]
fn test_best_streak_from_storage_must_be_beaten() {
    let mut game = CoinFlip::new(ScriptedRng::new(vec![1]), &Timings::default(), 2);
    let mut store = LeaderboardStore::in_memory();

    assert_eq!(flip(&mut game, &mut store, CoinSide::Tails).new_best, None);
    assert_eq!(flip(&mut game, &mut store, CoinSide::Tails).new_best, None);
    assert_eq!(flip(&mut game, &mut store, CoinSide::Tails).new_best, Some(3));
}

#[test]
fn test_double_flip_is_ignored() {
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();
    assert!(game.flip(CoinSide::Heads));
    assert!(!game.flip(CoinSide::Heads));

    let events = game.advance(&mut store, FLIP * 3);
    assert_eq!(events.len(), 1);
    assert_eq!(game.streak(), 1);
}

#[test]
fn test_seeded_flips_are_reproducible() {
    let outcomes = |seed| {
        let mut game = CoinFlip::new(GameRng::new(seed), &Timings::instant(), 0);
        let mut store = LeaderboardStore::in_memory();
        (0..16)
            .map(|_| {
                game.flip(CoinSide::Heads);
                match game.advance(&mut store, Duration::ZERO).as_slice() {
                    [CoinFlipEvent::Landed(result)] => result.outcome,
                    other => panic!("expected one landing, got {:?}", other),
                }
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(outcomes(77), outcomes(77));
}

// =============================================================================
// Best Streak Persistence
// =============================================================================

#[test]
fn test_store_tracks_best_streak_through_play() {
    // Heads twice, tails, heads three times, tails
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0, 0, 1, 0, 0, 0, 1]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();

    for _ in 0..7 {
        flip(&mut game, &mut store, CoinSide::Heads);
        assert_eq!(store.best_streak(), game.best_streak());
    }
    assert_eq!(store.best_streak(), 3);
}

#[test]
fn test_reopened_session_resumes_stored_best() {
    let mut store = LeaderboardStore::in_memory();
    let mut first = CoinFlip::new(ScriptedRng::new(vec![0, 0, 1]), &Timings::default(), store.best_streak());
    for _ in 0..3 {
        flip(&mut first, &mut store, CoinSide::Heads);
    }
    drop(first);

    let mut second = CoinFlip::new(ScriptedRng::new(vec![0]), &Timings::default(), store.best_streak());
    assert_eq!(second.best_streak(), 2);
    assert_eq!(flip(&mut second, &mut store, CoinSide::Heads).new_best, None);
    assert_eq!(flip(&mut second, &mut store, CoinSide::Heads).new_best, None);
    assert_eq!(flip(&mut second, &mut store, CoinSide::Heads).new_best, Some(3));
    assert_eq!(store.best_streak(), 3);
}

// =============================================================================
// Prompt
// =============================================================================

#[test]
fn test_cancelled_prompt_saves_nothing() {
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0, 1]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();
    flip(&mut game, &mut store, CoinSide::Heads);
    flip(&mut game, &mut store, CoinSide::Heads);

    let mut cancel = |_: &PendingPrompt| -> Option<String> { None };
    assert!(!game.resolve_prompt(&mut store, &mut cancel));
    assert_eq!(game.pending_prompt(), None);
    assert!(store.load("coinflip").is_empty());
}

#[test]
fn test_blank_name_keeps_prompt_open() {
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0, 1]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();
    flip(&mut game, &mut store, CoinSide::Heads);
    flip(&mut game, &mut store, CoinSide::Heads);

    assert!(!game.save_name(&mut store, "   "));
    assert!(game.pending_prompt().is_some());
    assert!(game.save_name(&mut store, "Ann"));
    assert_eq!(store.load("coinflip")[0].score, 1);
}

#[test]
fn test_smaller_streak_does_not_lower_score() {
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0, 0, 1, 0, 1]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();

    // Streak of 2, saved
    for _ in 0..3 {
        flip(&mut game, &mut store, CoinSide::Heads);
    }
    assert!(game.save_name(&mut store, "Ann"));

    // Streak of 1, saved under the same name
    flip(&mut game, &mut store, CoinSide::Heads);
    flip(&mut game, &mut store, CoinSide::Heads);
    assert!(game.save_name(&mut store, "Ann"));

    assert_eq!(store.load("coinflip")[0].score, 2);
}

// =============================================================================
// Reset and Teardown
// =============================================================================

#[test]
fn test_reset_leaves_best_streak() {
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();
    flip(&mut game, &mut store, CoinSide::Heads);
    flip(&mut game, &mut store, CoinSide::Heads);
    game.reset();

    assert_eq!(game.streak(), 0);
    assert_eq!(game.best_streak(), 2);
    assert_eq!(game.snapshot().result, None);
}

#[test]
fn test_teardown_mid_flip() {
    let mut game = CoinFlip::new(ScriptedRng::new(vec![0]), &Timings::default(), 0);
    let mut store = LeaderboardStore::in_memory();
    game.flip(CoinSide::Heads);
    game.advance(&mut store, FLIP / 2);
    game.teardown();

    assert!(game.advance(&mut store, FLIP).is_empty());
    assert_eq!(game.streak(), 0);
    assert!(game.snapshot().flipping);
}
