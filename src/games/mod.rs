//! The three mini-games.
//!
//! Each game is a self-contained session on its own virtual clock.
//! Tic-tac-toe and the shell game implement
//! [`TimedSession`](crate::core::TimedSession); the coin flip advances
//! against a leaderboard store so its best streak is persisted.

pub mod coinflip;
pub mod shell;
pub mod tictactoe;
