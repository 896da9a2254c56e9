//! # pocket-arcade
//!
//! Game logic for a small arcade of casual mini-games with local leaderboards.
//!
//! ## Design Principles
//!
//! 1. **Pure engines**: Each game is a session owning its own state. Nothing
//!    is global; a host can run several arcades side by side.
//!
//! 2. **Virtual time**: Animation and "thinking" delays are scheduled on a
//!    per-session virtual clock. The host advances it; tests advance it
//!    instantly. Tearing a session down drops every pending step.
//!
//! 3. **Injectable randomness**: Every random decision goes through
//!    `RandomSource`, seeded per game or scripted in tests.
//!
//! 4. **Fail soft**: Game input never errors (invalid moves are ignored) and
//!    storage trouble degrades to empty leaderboards.
//!
//! ## Modules
//!
//! - `core`: RNG, configuration, scheduler, session trait, game identity
//! - `leaderboard`: top-N name/score lists, storage backends, name prompt
//! - `games`: tic-tac-toe, shell game, coin flip
//! - `arcade`: one session of each game over a shared leaderboard store

pub mod arcade;
pub mod core;
pub mod games;
pub mod leaderboard;

// Re-export commonly used types
pub use crate::core::{
    ArcadeConfig, Timings,
    GameRng, RandomSource, ScriptedRng,
    Scheduler, TaskHandle,
    GameKind, Scoring, TimedSession,
};

pub use crate::leaderboard::{
    LeaderboardEntry, LeaderboardStore,
    Storage, StorageError, MemoryStorage, FileStorage,
    NamePrompt, PendingPrompt,
};

pub use crate::games::tictactoe::{
    Board, Mark, Outcome, evaluate, compute_opponent_move,
    TicTacToe, TicTacToeEvent, TicTacToeSnapshot,
};

pub use crate::games::shell::{Cups, Phase, ShellEvent, ShellGame, ShellSnapshot};

pub use crate::games::coinflip::{CoinFlip, CoinFlipEvent, CoinFlipSnapshot, CoinSide, FlipResult};

pub use crate::arcade::{Arcade, ArcadeEvent, ArcadeSnapshot, LeaderboardView};
