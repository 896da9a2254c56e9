//! Tic-tac-toe against a greedy heuristic opponent.
//!
//! - `Board` / `evaluate`: board contents and the outcome they imply
//! - `compute_opponent_move`: one-ply priority heuristic
//! - `TicTacToe`: a session with turns, think time, and scores

mod ai;
mod board;
mod session;

pub use ai::{compute_opponent_move, CENTER, CORNERS};
pub use board::{evaluate, winning_line, Board, Mark, Outcome, ParseBoardError, BOARD_LEN, WINNING_LINES};
pub use session::{TicTacToe, TicTacToeEvent, TicTacToeSnapshot};
