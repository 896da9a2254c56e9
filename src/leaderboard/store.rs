//! Namespaced top-N leaderboards over a `Storage` backend.
//!
//! Each game namespace is stored under `"<namespace>-leaderboard"` as a JSON
//! array of `{name, score}`. The list is kept sorted descending by score with
//! at most one entry per name, and is truncated to `capacity` on every write.
//! Equal scores keep their insertion order.
//!
//! Storage failures never reach the caller: unreadable data loads as an
//! empty list, and failed writes are logged and dropped.

use log::{debug, info, warn};

use super::entry::{normalize_name, LeaderboardEntry};
use super::storage::{MemoryStorage, Storage};
use crate::core::ArcadeConfig;

/// Storage key for the coin-flip best streak.
pub const BEST_STREAK_KEY: &str = "coinflip-best-streak";

/// Storage key for a namespace's leaderboard.
#[must_use]
pub fn leaderboard_key(namespace: &str) -> String {
    format!("{}-leaderboard", namespace)
}

/// Leaderboards for every game, sharing one storage backend.
#[derive(Clone, Debug)]
pub struct LeaderboardStore<S: Storage = MemoryStorage> {
    storage: S,
    capacity: usize,
    max_name_len: usize,
}

impl LeaderboardStore<MemoryStorage> {
    /// Store backed by fresh in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }
}

impl<S: Storage> LeaderboardStore<S> {
    /// Create a store with the default capacity (5) and name length (20).
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, &ArcadeConfig::default())
    }

    #[must_use]
    pub fn with_config(storage: S, config: &ArcadeConfig) -> Self {
        Self {
            storage,
            capacity: config.leaderboard_size,
            max_name_len: config.max_name_len,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Entries stored for `namespace`, best first.
    ///
    /// Missing or unparseable data yields an empty list.
    #[must_use]
    pub fn load(&self, namespace: &str) -> Vec<LeaderboardEntry> {
        let key = leaderboard_key(namespace);
        let raw = match self.storage.get(&key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(target: "leaderboard", "Failed to read {}: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<LeaderboardEntry>>(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(target: "leaderboard", "Ignoring unparseable {}: {}", key, e);
                Vec::new()
            }
        }
    }

    /// Offer `score` for `name`, keeping each name's best score.
    ///
    /// An existing entry is only overwritten by a strictly greater score.
    /// Blank names and zero scores are ignored. Returns `true` if the stored
    /// list changed.
    pub fn submit(&mut self, namespace: &str, name: &str, score: u32) -> bool {
        let Some(name) = normalize_name(name, self.max_name_len) else {
            debug!(target: "leaderboard", "Ignoring submit with blank name");
            return false;
        };
        if score == 0 {
            debug!(target: "leaderboard", "Ignoring zero score for {}", name);
            return false;
        }

        let mut entries = self.load(namespace);
        match entries.iter_mut().find(|e| e.name == name) {
            Some(existing) if score > existing.score => existing.score = score,
            Some(_) => return false,
            None => entries.push(LeaderboardEntry::new(name.clone(), score)),
        }

        info!(target: "leaderboard", "{}: {} scored {}", namespace, name, score);
        self.save(namespace, entries);
        true
    }

    /// Credit one win to `name`, creating the entry at 1.
    ///
    /// Blank names are ignored. Returns `true` if the stored list changed.
    pub fn record_win(&mut self, namespace: &str, name: &str) -> bool {
        let Some(name) = normalize_name(name, self.max_name_len) else {
            debug!(target: "leaderboard", "Ignoring win with blank name");
            return false;
        };

        let mut entries = self.load(namespace);
        match entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.score = existing.score.saturating_add(1),
            None => entries.push(LeaderboardEntry::new(name.clone(), 1)),
        }

        info!(target: "leaderboard", "{}: win recorded for {}", namespace, name);
        self.save(namespace, entries);
        true
    }

    /// Persisted coin-flip best streak, or 0 if absent or unreadable.
    #[must_use]
    pub fn best_streak(&self) -> u32 {
        match self.storage.get(BEST_STREAK_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                warn!(target: "leaderboard", "Ignoring unparseable best streak {:?}", raw);
                0
            }),
            Ok(None) => 0,
            Err(e) => {
                warn!(target: "leaderboard", "Failed to read best streak: {}", e);
                0
            }
        }
    }

    /// Persist `streak` if it beats the stored best. Returns `true` if written.
    pub fn record_best_streak(&mut self, streak: u32) -> bool {
        if streak <= self.best_streak() {
            return false;
        }
        if let Err(e) = self.storage.set(BEST_STREAK_KEY, &streak.to_string()) {
            warn!(target: "leaderboard", "Failed to write best streak: {}", e);
            return false;
        }
        debug!(target: "leaderboard", "Best streak is now {}", streak);
        true
    }

    fn save(&mut self, namespace: &str, mut entries: Vec<LeaderboardEntry>) {
        // Stable: equal scores keep insertion order.
        entries.sort_by(|a, b| b.score.cmp(&a.score));
        entries.truncate(self.capacity);

        let key = leaderboard_key(namespace);
        let result = serde_json::to_string(&entries)
            .map_err(Into::into)
            .and_then(|json| self.storage.set(&key, &json));
        if let Err(e) = result {
            warn!(target: "leaderboard", "Failed to write {}: {}", key, e);
        }
    }
}
