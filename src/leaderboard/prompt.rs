//! The "enter your name" step after a recordable game.
//!
//! When a game ends in a way worth recording, the session offers a
//! `PendingPrompt`. It stays open until the player saves a non-blank name
//! or skips. Saving credits the leaderboard according to the game's
//! `Scoring` rule.

use log::debug;
use serde::{Deserialize, Serialize};

use super::storage::Storage;
use super::store::LeaderboardStore;
use crate::core::{GameKind, Scoring};

/// A finished game waiting for the player to enter a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPrompt {
    pub game: GameKind,
    /// Score offered for the leaderboard (1 for a win, streak length for coin flip).
    pub score: u32,
}

/// External collaborator that asks the player for a name.
///
/// Returns `None` when the player cancels.
pub trait NamePrompt {
    fn request_name(&mut self, prompt: &PendingPrompt) -> Option<String>;
}

impl<F> NamePrompt for F
where
    F: FnMut(&PendingPrompt) -> Option<String>,
{
    fn request_name(&mut self, prompt: &PendingPrompt) -> Option<String> {
        self(prompt)
    }
}

impl<S: Storage> LeaderboardStore<S> {
    /// Credit `name` for a finished game.
    ///
    /// Win-count games add one win; streak games keep the best score.
    pub fn credit(&mut self, prompt: &PendingPrompt, name: &str) -> bool {
        let namespace = prompt.game.namespace();
        match prompt.game.scoring() {
            Scoring::WinCount => self.record_win(namespace, name),
            Scoring::BestStreak => self.submit(namespace, name, prompt.score),
        }
    }
}

/// Holds at most one open prompt for a session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptSlot {
    pending: Option<PendingPrompt>,
}

impl PromptSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a prompt, replacing any unanswered one.
    pub fn offer(&mut self, game: GameKind, score: u32) {
        debug!(target: "leaderboard", "{}: name prompt opened (score {})", game, score);
        self.pending = Some(PendingPrompt { game, score });
    }

    #[must_use]
    pub fn pending(&self) -> Option<PendingPrompt> {
        self.pending
    }

    /// Close the prompt without saving.
    pub fn dismiss(&mut self) -> Option<PendingPrompt> {
        self.pending.take()
    }

    /// Save `name` for the open prompt and close it.
    ///
    /// A blank name leaves the prompt open and returns `false`. A score that
    /// does not beat the name's stored best still closes the prompt.
    pub fn save<S: Storage>(&mut self, store: &mut LeaderboardStore<S>, name: &str) -> bool {
        let Some(prompt) = self.pending else {
            return false;
        };
        if name.trim().is_empty() {
            return false;
        }
        store.credit(&prompt, name);
        self.pending = None;
        true
    }

    /// Ask `prompter` for a name and save it.
    ///
    /// Cancellation closes the prompt. Returns `true` if a name was saved.
    pub fn resolve<S, P>(&mut self, store: &mut LeaderboardStore<S>, prompter: &mut P) -> bool
    where
        S: Storage,
        P: NamePrompt + ?Sized,
    {
        let Some(prompt) = self.pending else {
            return false;
        };
        match prompter.request_name(&prompt) {
            Some(name) => self.save(store, &name),
            None => {
                self.pending = None;
                false
            }
        }
    }
}
