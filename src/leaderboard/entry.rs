//! Leaderboard records and player-name rules.

use serde::{Deserialize, Serialize};

/// One row of a leaderboard.
///
/// Records written by older builds stored the score as `wins` or `streak`;
/// both are still accepted when reading.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub name: String,
    #[serde(alias = "wins", alias = "streak")]
    pub score: u32,
}

impl LeaderboardEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

impl std::fmt::Display for LeaderboardEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.score)
    }
}

/// Trim a user-supplied name and cap it at `max_len` characters.
///
/// Returns `None` for empty or whitespace-only input.
#[must_use]
pub fn normalize_name(raw: &str, max_len: usize) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let capped: String = trimmed.chars().take(max_len).collect();
    let capped = capped.trim_end();
    if capped.is_empty() {
        return None;
    }
    Some(capped.to_string())
}
