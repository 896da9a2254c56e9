//! Arcade configuration.
//!
//! - `Timings`: animation and "thinking" delays, in milliseconds
//! - `ArcadeConfig`: timings plus leaderboard and shuffle parameters
//!
//! Every field has a default matching the shipped games, and `#[serde(default)]`
//! lets a partial JSON document override just the fields it names.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Delays used by the timed sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    /// Shell game: how long the ball is shown before shuffling starts.
    pub reveal_ms: u64,

    /// Shell game: pause between entering `shuffling` and the first swap.
    pub shuffle_lead_in_ms: u64,

    /// Shell game: duration of one swap animation.
    pub swap_ms: u64,

    /// Shell game: pause after a swap lands before the next one starts.
    pub swap_pause_ms: u64,

    /// Tic-tac-toe: opponent "thinking" time before its mark appears.
    pub think_ms: u64,

    /// Coin flip: time the coin spends in the air.
    pub flip_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            reveal_ms: 1500,
            shuffle_lead_in_ms: 500,
            swap_ms: 300,
            swap_pause_ms: 300,
            think_ms: 500,
            flip_ms: 1500,
        }
    }
}

impl Timings {
    /// All delays set to zero. Sessions then settle on the next `advance`.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            reveal_ms: 0,
            shuffle_lead_in_ms: 0,
            swap_ms: 0,
            swap_pause_ms: 0,
            think_ms: 0,
            flip_ms: 0,
        }
    }

    #[must_use]
    pub fn reveal(&self) -> Duration {
        Duration::from_millis(self.reveal_ms)
    }

    #[must_use]
    pub fn shuffle_lead_in(&self) -> Duration {
        Duration::from_millis(self.shuffle_lead_in_ms)
    }

    #[must_use]
    pub fn swap(&self) -> Duration {
        Duration::from_millis(self.swap_ms)
    }

    #[must_use]
    pub fn swap_pause(&self) -> Duration {
        Duration::from_millis(self.swap_pause_ms)
    }

    #[must_use]
    pub fn think(&self) -> Duration {
        Duration::from_millis(self.think_ms)
    }

    #[must_use]
    pub fn flip(&self) -> Duration {
        Duration::from_millis(self.flip_ms)
    }
}

/// Top-level configuration shared by all sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    /// Entries kept per leaderboard namespace.
    pub leaderboard_size: usize,

    /// Characters kept from a submitted player name.
    pub max_name_len: usize,

    /// Swaps performed in each shell-game round.
    pub shuffle_swaps: u32,

    /// Fixed RNG seed. `None` seeds from OS entropy.
    pub seed: Option<u64>,

    pub timings: Timings,
}

impl Default for ArcadeConfig {
    fn default() -> Self {
        Self {
            leaderboard_size: 5,
            max_name_len: 20,
            shuffle_swaps: 5,
            seed: None,
            timings: Timings::default(),
        }
    }
}

impl ArcadeConfig {
    /// Parse a (possibly partial) JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set a fixed seed for deterministic sessions.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_timings(mut self, timings: Timings) -> Self {
        self.timings = timings;
        self
    }

    #[must_use]
    pub fn with_leaderboard_size(mut self, size: usize) -> Self {
        self.leaderboard_size = size;
        self
    }

    #[must_use]
    pub fn with_max_name_len(mut self, len: usize) -> Self {
        self.max_name_len = len;
        self
    }

    #[must_use]
    pub fn with_shuffle_swaps(mut self, swaps: u32) -> Self {
        self.shuffle_swaps = swaps;
        self
    }
}
