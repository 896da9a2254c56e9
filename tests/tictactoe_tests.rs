//! Tic-tac-toe integration tests.
//!
//! Cover board evaluation, the opponent heuristic, and full sessions driven
//! through the virtual clock.

use pocket_arcade::{
    compute_opponent_move, evaluate, Board, GameKind, GameRng, LeaderboardStore, Mark, Outcome, PendingPrompt,
    ScriptedRng, TicTacToe, TicTacToeEvent, TimedSession, Timings,
};
use std::time::Duration;

const THINK: Duration = Duration::from_millis(500);

fn board(s: &str) -> Board {
    s.parse().unwrap()
}

/// Session whose opponent always takes the first option it is offered.
fn session() -> TicTacToe<ScriptedRng> {
    TicTacToe::new(ScriptedRng::new(vec![0]), &Timings::default())
}

// =============================================================================
// Evaluation
// =============================================================================

#[test]
fn test_evaluate_rows_columns_diagonals() {
    assert_eq!(evaluate(&board("XXX ... ...")), Outcome::PlayerWins);
    assert_eq!(evaluate(&board("O.. O.. O..")), Outcome::OpponentWins);
    assert_eq!(evaluate(&board("..X .X. X..")), Outcome::PlayerWins);
    assert_eq!(evaluate(&board("... ... ...")), Outcome::InProgress);
}

#[test]
fn test_evaluate_draw_needs_full_board() {
    assert_eq!(evaluate(&board("XOX XOO OXX")), Outcome::Draw);
    assert_eq!(evaluate(&board("XOX XOO OX.")), Outcome::InProgress);
}

#[test]
fn test_win_on_last_cell_is_not_a_draw() {
    assert_eq!(evaluate(&board("XOX OXO OXX")), Outcome::PlayerWins);
}

// =============================================================================
// Opponent Heuristic
// =============================================================================

#[test]
fn test_opponent_completes_row_instead_of_blocking() {
    let b = board("XX. OO. ...");
    assert_eq!(compute_opponent_move(&b, &mut GameRng::new(5)), Some(5));
}

#[test]
fn test_opponent_blocks_column() {
    let b = board("X.. X.. .O.");
    assert_eq!(compute_opponent_move(&b, &mut GameRng::new(5)), Some(6));
}

#[test]
fn test_opponent_corner_is_random_but_legal() {
    let b = board("... .X. ...");
    let mut rng = GameRng::new(99);
    for _ in 0..20 {
        let choice = compute_opponent_move(&b, &mut rng).unwrap();
        assert!([0, 2, 6, 8].contains(&choice));
    }
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_opponent_answers_after_think_time() {
    let mut game = session();
    assert!(game.apply_player_move(0));
    assert_eq!(game.turn(), Mark::Opponent);
    assert!(game.snapshot().thinking);

    assert!(game.advance(Duration::from_millis(499)).is_empty());
    let events = game.advance(Duration::from_millis(1));

    assert_eq!(events, vec![TicTacToeEvent::OpponentMoved { index: 4 }]);
    assert_eq!(game.turn(), Mark::Player);
    assert_eq!(game.board().get(4), Some(Mark::Opponent));
}

#[test]
fn test_moves_rejected_while_thinking() {
    let mut game = session();
    game.apply_player_move(0);

    assert!(!game.apply_player_move(1));
    assert_eq!(game.board().count(Mark::Player), 1);
}

#[test]
fn test_occupied_and_off_board_moves_rejected() {
    let mut game = session();
    game.apply_player_move(0);
    game.advance(THINK);

    assert!(!game.apply_player_move(0));
    assert!(!game.apply_player_move(4));
    assert!(!game.apply_player_move(9));
}

#[test]
fn test_fork_beats_opponent_and_opens_prompt() {
    // Opponent corner picks come from the script: index 0 of the open corners
    let mut game = session();
    let mut store = LeaderboardStore::in_memory();

    game.apply_player_move(0);
    game.advance(THINK); // O takes the center
    game.apply_player_move(8);
    game.advance(THINK); // O takes corner 2
    game.apply_player_move(6);
    game.advance(THINK); // O must block at 3
    assert_eq!(game.board().get(3), Some(Mark::Opponent));

    assert!(game.apply_player_move(7));
    assert_eq!(game.outcome(), Outcome::PlayerWins);
    assert_eq!(game.player_wins(), 1);
    assert_eq!(
        game.pending_prompt(),
        Some(PendingPrompt { game: GameKind::TicTacToe, score: 1 })
    );
    assert!(!game.apply_player_move(1));

    assert!(game.save_name(&mut store, "Ann"));
    assert_eq!(store.load("tictactoe")[0].score, 1);
    assert_eq!(game.pending_prompt(), None);
}

#[test]
fn test_opponent_win_counts_without_prompt() {
    let mut game = session();

    // X never threatens; O wins on the diagonal
    game.apply_player_move(1);
    game.advance(THINK); // O center
    game.apply_player_move(3);
    game.advance(THINK); // O corner 0
    game.apply_player_move(5);
    let events = game.advance(THINK);

    assert_eq!(game.outcome(), Outcome::OpponentWins);
    assert!(events.contains(&TicTacToeEvent::Finished(Outcome::OpponentWins)));
    assert_eq!(game.opponent_wins(), 1);
    assert_eq!(game.pending_prompt(), None);
}

#[test]
fn test_reset_cancels_thinking_opponent() {
    let mut game = session();
    game.apply_player_move(0);
    game.reset();

    assert!(game.advance(THINK * 4).is_empty());
    assert_eq!(game.board(), &Board::new());
    assert_eq!(game.turn(), Mark::Player);
}

#[test]
fn test_teardown_mid_think_leaves_board_alone() {
    let mut game = session();
    game.apply_player_move(0);
    game.teardown();

    assert!(game.advance(THINK * 4).is_empty());
    assert_eq!(game.board().count(Mark::Opponent), 0);
    assert!(!game.apply_player_move(1));
}

#[test]
fn test_run_until_idle_with_instant_timings() {
    let mut game = TicTacToe::new(GameRng::new(3), &Timings::instant());
    game.apply_player_move(4);
    let events = game.run_until_idle(Duration::ZERO, 10);

    assert_eq!(events.len(), 1);
    assert!(!game.is_busy());
    assert_eq!(game.board().count(Mark::Opponent), 1);
}
