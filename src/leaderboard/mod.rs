//! Local leaderboards.
//!
//! - `LeaderboardEntry`: one `{name, score}` row
//! - `LeaderboardStore`: namespaced top-N lists with load/submit semantics
//! - `Storage`: the key-value seam, with memory and file backends
//! - `PromptSlot`: the name prompt opened after a recordable game

pub mod entry;
pub mod prompt;
pub mod storage;
pub mod store;

pub use entry::{normalize_name, LeaderboardEntry};
pub use prompt::{NamePrompt, PendingPrompt, PromptSlot};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{leaderboard_key, LeaderboardStore, BEST_STREAK_KEY};
