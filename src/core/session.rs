//! Timed game sessions.
//!
//! Every game is a session that owns its board/round state and a private
//! `Scheduler`. The host calls `advance` as time passes; the session fires
//! whatever delayed steps came due and reports what happened as events.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The three mini-games. Each owns an independent leaderboard namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    TicTacToe,
    ShellGame,
    CoinFlip,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::TicTacToe, GameKind::ShellGame, GameKind::CoinFlip];

    /// Leaderboard namespace for this game.
    #[must_use]
    pub const fn namespace(self) -> &'static str {
        match self {
            GameKind::TicTacToe => "tictactoe",
            GameKind::ShellGame => "shellgame",
            GameKind::CoinFlip => "coinflip",
        }
    }

    /// How a saved name is credited on this game's leaderboard.
    #[must_use]
    pub const fn scoring(self) -> Scoring {
        match self {
            GameKind::TicTacToe | GameKind::ShellGame => Scoring::WinCount,
            GameKind::CoinFlip => Scoring::BestStreak,
        }
    }
}

impl std::fmt::Display for GameKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.namespace())
    }
}

/// Leaderboard crediting rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Scoring {
    /// Each saved win adds one to the name's score.
    WinCount,
    /// The name keeps the best score ever submitted.
    BestStreak,
}

/// A game session driven by a virtual clock.
pub trait TimedSession {
    /// What the session reports when delayed steps fire.
    type Event;

    /// Move time forward by `elapsed`, firing every step that comes due.
    fn advance(&mut self, elapsed: Duration) -> Vec<Self::Event>;

    /// End the session. Pending steps are dropped and never fire.
    fn teardown(&mut self);

    /// Whether `teardown` has been called.
    fn is_torn_down(&self) -> bool;

    /// Whether any delayed step is still waiting.
    fn is_busy(&self) -> bool;

    /// Advance until no delayed step remains, in `step` increments.
    ///
    /// Stops after `max_steps` increments so a misbehaving session cannot spin.
    fn run_until_idle(&mut self, step: Duration, max_steps: usize) -> Vec<Self::Event> {
        let mut events = Vec::new();
        for _ in 0..max_steps {
            if !self.is_busy() {
                break;
            }
            events.extend(self.advance(step));
        }
        events
    }
}
