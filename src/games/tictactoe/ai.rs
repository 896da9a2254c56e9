//! Opponent move heuristic.
//!
//! Greedy one-ply priority rules, checked in order:
//!
//! 1. a move that wins immediately
//! 2. a move that blocks an immediate player win
//! 3. the center
//! 4. a random open corner
//! 5. a random open cell
//!
//! This is deliberately not minimax. A player who sets up two threats at
//! once (a fork) beats it, and that weakness is part of the game.

use smallvec::SmallVec;

use super::board::{evaluate, Board, Mark, Outcome};
use crate::core::{pick, RandomSource};

pub const CENTER: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];

/// Choose the opponent's cell, or `None` if the board is full.
///
/// Never returns an occupied cell.
pub fn compute_opponent_move<R: RandomSource + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    let open = board.empty_cells();
    if open.is_empty() {
        return None;
    }

    if let Some(win) = completing_move(board, &open, Mark::Opponent) {
        return Some(win);
    }
    if let Some(block) = completing_move(board, &open, Mark::Player) {
        return Some(block);
    }
    if board.is_open(CENTER) {
        return Some(CENTER);
    }

    let corners: SmallVec<[usize; 4]> = CORNERS.iter().copied().filter(|&c| board.is_open(c)).collect();
    if let Some(corner) = pick(rng, &corners) {
        return Some(corner);
    }

    pick(rng, &open)
}

/// First open cell (ascending) where `mark` would complete a line.
fn completing_move(board: &Board, open: &[usize], mark: Mark) -> Option<usize> {
    open.iter()
        .copied()
        .find(|&i| evaluate(&board.with(i, mark)) == Outcome::won_by(mark))
}
