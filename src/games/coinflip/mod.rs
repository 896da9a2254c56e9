//! Heads-or-tails streak game.
//!
//! Each correct guess extends the current streak. A miss ends it, and if the
//! streak was non-zero the player is offered a leaderboard entry for it. The
//! best streak ever reached is kept separately from the leaderboard.
//!
//! Unlike the other games the best streak is durable state, so `advance`
//! takes the store and writes a new best as soon as it is reached.

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::core::{GameKind, GameRng, RandomSource, Scheduler, Timings};
use crate::leaderboard::{LeaderboardStore, NamePrompt, PendingPrompt, PromptSlot, Storage};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoinSide {
    Heads,
    Tails,
}

impl CoinSide {
    /// Map a uniform draw from `{0, 1}` onto a side.
    #[must_use]
    pub const fn from_index(index: usize) -> CoinSide {
        if index == 0 {
            CoinSide::Heads
        } else {
            CoinSide::Tails
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    Land { guess: CoinSide },
}

/// How a flip came out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlipResult {
    pub guess: CoinSide,
    pub outcome: CoinSide,
    pub won: bool,
    /// Streak after this flip.
    pub streak: u32,
    /// Set when this flip raised the best streak.
    pub new_best: Option<u32>,
    /// Streak that this miss ended, if it was non-zero.
    pub ended_streak: Option<u32>,
}

/// Reported when a delayed step fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinFlipEvent {
    Landed(FlipResult),
}

/// Read-only view for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoinFlipSnapshot {
    pub flipping: bool,
    pub guess: Option<CoinSide>,
    pub result: Option<CoinSide>,
    pub streak: u32,
    pub best_streak: u32,
    pub prompt: Option<PendingPrompt>,
}

/// One coin-flip session.
pub struct CoinFlip<R: RandomSource = GameRng> {
    streak: u32,
    best_streak: u32,
    guess: Option<CoinSide>,
    result: Option<CoinSide>,
    flipping: bool,
    flip_time: Duration,
    rng: R,
    scheduler: Scheduler<Task>,
    prompt: PromptSlot,
    torn_down: bool,
}

impl<R: RandomSource> CoinFlip<R> {
    /// Create a session. `best_streak` is the previously persisted best.
    #[must_use]
    pub fn new(rng: R, timings: &Timings, best_streak: u32) -> Self {
        Self {
            streak: 0,
            best_streak,
            guess: None,
            result: None,
            flipping: false,
            flip_time: timings.flip(),
            rng,
            scheduler: Scheduler::new(),
            prompt: PromptSlot::new(),
            torn_down: false,
        }
    }

    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> u32 {
        self.best_streak
    }

    #[must_use]
    pub fn is_flipping(&self) -> bool {
        self.flipping
    }

    #[must_use]
    pub fn pending_prompt(&self) -> Option<PendingPrompt> {
        self.prompt.pending()
    }

    #[must_use]
    pub fn snapshot(&self) -> CoinFlipSnapshot {
        CoinFlipSnapshot {
            flipping: self.flipping,
            guess: self.guess,
            result: self.result,
            streak: self.streak,
            best_streak: self.best_streak,
            prompt: self.prompt.pending(),
        }
    }

    /// Toss the coin on `guess`. It lands after the flip delay.
    ///
    /// Ignored (returns `false`) while a flip is already in the air.
    pub fn flip(&mut self, guess: CoinSide) -> bool {
        if self.torn_down || self.flipping {
            return false;
        }
        self.flipping = true;
        self.guess = Some(guess);
        self.result = None;
        self.scheduler.schedule(self.flip_time, Task::Land { guess });
        debug!(target: "coinflip", "Flipping on {:?}", guess);
        true
    }

    /// Zero the current streak. The best streak is untouched, and a coin
    /// already in the air still lands.
    pub fn reset(&mut self) {
        if self.torn_down {
            return;
        }
        self.streak = 0;
        self.guess = None;
        self.result = None;
    }

    /// Save a name for the open prompt with the ended streak as score.
    pub fn save_name<S: Storage>(&mut self, store: &mut LeaderboardStore<S>, name: &str) -> bool {
        self.prompt.save(store, name)
    }

    pub fn resolve_prompt<S: Storage, P: NamePrompt + ?Sized>(
        &mut self,
        store: &mut LeaderboardStore<S>,
        prompter: &mut P,
    ) -> bool {
        self.prompt.resolve(store, prompter)
    }

    pub fn dismiss_prompt(&mut self) -> Option<PendingPrompt> {
        self.prompt.dismiss()
    }

    /// Move the clock forward by `elapsed`, landing a coin that comes due.
    ///
    /// The session and `store` agree on the best streak afterwards: a higher
    /// stored best is adopted and a higher session best is written back.
    pub fn advance<S: Storage>(&mut self, store: &mut LeaderboardStore<S>, elapsed: Duration) -> Vec<CoinFlipEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        self.best_streak = self.best_streak.max(store.best_streak());

        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            match task {
                Task::Land { guess } => events.push(CoinFlipEvent::Landed(self.land(guess))),
            }
        }
        self.scheduler.settle(until);

        store.record_best_streak(self.best_streak);
        events
    }

    /// End the session. A coin in the air never lands.
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.torn_down = true;
        debug!(target: "coinflip", "Session torn down");
    }

    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        !self.scheduler.is_idle()
    }

    fn land(&mut self, guess: CoinSide) -> FlipResult {
        let outcome = CoinSide::from_index(self.rng.below(2));
        self.flipping = false;
        self.result = Some(outcome);

        let won = outcome == guess;
        let mut new_best = None;
        let mut ended_streak = None;
        if won {
            self.streak += 1;
            if self.streak > self.best_streak {
                self.best_streak = self.streak;
                new_best = Some(self.streak);
            }
        } else {
            if self.streak > 0 {
                ended_streak = Some(self.streak);
                self.prompt.offer(GameKind::CoinFlip, self.streak);
            }
            self.streak = 0;
        }
        debug!(target: "coinflip", "Landed {:?} (guessed {:?}), streak {}", outcome, guess, self.streak);

        FlipResult {
            guess,
            outcome,
            won,
            streak: self.streak,
            new_best,
            ended_streak,
        }
    }
}
