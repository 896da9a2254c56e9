//! Shell game session.
//!
//! ## Round lifecycle
//!
//! ```text
//! ready ──start()──▶ showing ──reveal──▶ shuffling ──N swaps──▶ guessing
//!   ▲                   ▲                                           │
//!   └──reset()──┐       └──────────────start()─────── result ◀──select_cup()
//! ```
//!
//! During `shuffling` each swap is two steps: the two cups start moving
//! (`SwapStarted`), and after the swap duration they land in each other's
//! place (`SwapLanded`). A pause separates one landing from the next start.
//! After the last landing and its pause the round opens for guessing.

use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::cups::{Cups, CUP_COUNT};
use crate::core::{ArcadeConfig, GameKind, GameRng, RandomSource, Scheduler, TimedSession, Timings};
use crate::leaderboard::{LeaderboardStore, NamePrompt, PendingPrompt, PromptSlot, Storage};

/// Round phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No round in play; no ball assigned.
    Ready,
    /// Ball shown under its cup.
    Showing,
    /// Cups being swapped.
    Shuffling,
    /// Waiting for exactly one `select_cup`.
    Guessing,
    /// Guess resolved; ball shown again.
    Result,
}

impl Phase {
    /// Whether the ball is visible in this phase.
    #[must_use]
    pub const fn reveals_ball(self) -> bool {
        matches!(self, Phase::Showing | Phase::Result)
    }

    /// Whether `start()` is accepted in this phase.
    #[must_use]
    pub const fn can_start(self) -> bool {
        matches!(self, Phase::Ready | Phase::Result)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Task {
    BeginShuffle,
    NextSwap,
    LandSwap(usize, usize),
}

/// Reported when a delayed step fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellEvent {
    PhaseChanged(Phase),
    /// Cups at these two visible positions started moving.
    SwapStarted(usize, usize),
    /// Cups at these two visible positions finished trading places.
    SwapLanded(usize, usize),
}

/// Read-only view for rendering.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShellSnapshot {
    pub phase: Phase,
    /// Visible position → ground-truth slot.
    pub cups: [usize; CUP_COUNT],
    /// Visible position where the ball shows; `None` while it is hidden.
    pub ball_visible_at: Option<usize>,
    pub selected: Option<usize>,
    /// Whether the last resolved guess found the ball.
    pub last_guess_won: Option<bool>,
    /// Visible positions exchanging places right now.
    pub moving: Option<(usize, usize)>,
    pub swaps_done: u32,
    pub swaps_total: u32,
    pub wins: u32,
    pub losses: u32,
    pub prompt: Option<PendingPrompt>,
}

/// One shell-game session.
pub struct ShellGame<R: RandomSource = GameRng> {
    phase: Phase,
    ball: Option<usize>,
    cups: Cups,
    selected: Option<usize>,
    last_guess_won: Option<bool>,
    moving: Option<(usize, usize)>,
    swaps_done: u32,
    swaps_total: u32,
    wins: u32,
    losses: u32,
    timings: Timings,
    rng: R,
    scheduler: Scheduler<Task>,
    prompt: PromptSlot,
    torn_down: bool,
}

impl<R: RandomSource> ShellGame<R> {
    #[must_use]
    pub fn new(rng: R, config: &ArcadeConfig) -> Self {
        Self {
            phase: Phase::Ready,
            ball: None,
            cups: Cups::identity(),
            selected: None,
            last_guess_won: None,
            moving: None,
            swaps_done: 0,
            swaps_total: config.shuffle_swaps,
            wins: 0,
            losses: 0,
            timings: config.timings.clone(),
            rng,
            scheduler: Scheduler::new(),
            prompt: PromptSlot::new(),
            torn_down: false,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Ground-truth slot holding the ball, once a round has started.
    #[must_use]
    pub fn ball_position(&self) -> Option<usize> {
        self.ball
    }

    #[must_use]
    pub fn cups(&self) -> Cups {
        self.cups
    }

    #[must_use]
    pub fn wins(&self) -> u32 {
        self.wins
    }

    #[must_use]
    pub fn losses(&self) -> u32 {
        self.losses
    }

    #[must_use]
    pub fn pending_prompt(&self) -> Option<PendingPrompt> {
        self.prompt.pending()
    }

    #[must_use]
    pub fn snapshot(&self) -> ShellSnapshot {
        let ball_visible_at = if self.phase.reveals_ball() {
            self.ball.and_then(|slot| self.cups.position_of(slot))
        } else {
            None
        };
        ShellSnapshot {
            phase: self.phase,
            cups: self.cups.as_array(),
            ball_visible_at,
            selected: self.selected,
            last_guess_won: self.last_guess_won,
            moving: self.moving,
            swaps_done: self.swaps_done,
            swaps_total: self.swaps_total,
            wins: self.wins,
            losses: self.losses,
            prompt: self.prompt.pending(),
        }
    }

    /// Start a round: hide the ball under a random cup and show it.
    ///
    /// Only accepted from `ready` or `result`; the previous round's
    /// arrangement is discarded.
    pub fn start(&mut self) -> bool {
        if self.torn_down || !self.phase.can_start() {
            return false;
        }
        let ball = self.rng.below(CUP_COUNT);
        self.ball = Some(ball);
        self.cups = Cups::identity();
        self.selected = None;
        self.last_guess_won = None;
        self.moving = None;
        self.swaps_done = 0;
        self.phase = Phase::Showing;
        self.scheduler.schedule(self.timings.reveal(), Task::BeginShuffle);
        debug!(target: "shellgame", "Round started, ball in slot {}", ball);
        true
    }

    /// Guess the cup at visible position `visual`.
    ///
    /// Returns whether the ball was there, or `None` if no guess is being
    /// accepted (wrong phase, already guessed, or position out of range).
    pub fn select_cup(&mut self, visual: usize) -> Option<bool> {
        if self.torn_down || self.phase != Phase::Guessing {
            return None;
        }
        let slot = self.cups.slot_at(visual)?;
        let won = Some(slot) == self.ball;

        self.selected = Some(visual);
        self.last_guess_won = Some(won);
        self.phase = Phase::Result;
        if won {
            self.wins += 1;
            self.prompt.offer(GameKind::ShellGame, 1);
        } else {
            self.losses += 1;
        }
        debug!(target: "shellgame", "Guessed position {}: {}", visual, if won { "win" } else { "loss" });
        Some(won)
    }

    /// Abandon the round and return to `ready`. Pending animation steps
    /// are cancelled; scores and any open name prompt are kept.
    pub fn reset(&mut self) {
        if self.torn_down {
            return;
        }
        self.scheduler.cancel_all();
        self.phase = Phase::Ready;
        self.ball = None;
        self.cups = Cups::identity();
        self.selected = None;
        self.last_guess_won = None;
        self.moving = None;
        self.swaps_done = 0;
    }

    /// Save a name for the open prompt (one win on the leaderboard).
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

    fn run(&mut self, task: Task, events: &mut Vec<ShellEvent>) {
        match task {
            Task::BeginShuffle => {
                if self.phase != Phase::Showing {
                    return;
                }
                self.set_phase(Phase::Shuffling, events);
                self.scheduler.schedule(self.timings.shuffle_lead_in(), Task::NextSwap);
            }
            Task::NextSwap => {
                if self.phase != Phase::Shuffling {
                    return;
                }
                if self.swaps_done >= self.swaps_total {
                    self.set_phase(Phase::Guessing, events);
                    return;
                }
                let (a, b) = self.pick_swap();
                self.moving = Some((a, b));
                events.push(ShellEvent::SwapStarted(a, b));
                self.scheduler.schedule(self.timings.swap(), Task::LandSwap(a, b));
            }
            Task::LandSwap(a, b) => {
                if self.phase != Phase::Shuffling {
                    return;
                }
                self.cups.swap(a, b);
                self.moving = None;
                self.swaps_done += 1;
                events.push(ShellEvent::SwapLanded(a, b));
                self.scheduler.schedule(self.timings.swap_pause(), Task::NextSwap);
            }
        }
    }

    /// Two distinct visible positions, resampling the second until it differs.
    fn pick_swap(&mut self) -> (usize, usize) {
        let a = self.rng.below(CUP_COUNT);
        let mut b = self.rng.below(CUP_COUNT);
        while b == a {
            b = self.rng.below(CUP_COUNT);
        }
        (a, b)
    }

    fn set_phase(&mut self, phase: Phase, events: &mut Vec<ShellEvent>) {
        debug!(target: "shellgame", "{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        events.push(ShellEvent::PhaseChanged(phase));
    }
}

impl<R: RandomSource> TimedSession for ShellGame<R> {
    type Event = ShellEvent;

    fn advance(&mut self, elapsed: Duration) -> Vec<ShellEvent> {
        let mut events = Vec::new();
        if self.torn_down {
            return events;
        }
        let until = self.scheduler.now() + elapsed;
        while let Some(task) = self.scheduler.pop_due(until) {
            self.run(task, &mut events);
        }
        self.scheduler.settle(until);
        events
    }

    fn teardown(&mut self) {
        self.scheduler.cancel_all();
        self.torn_down = true;
        debug!(target: "shellgame", "Session torn down");
    }

    fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn is_busy(&self) -> bool {
        !self.scheduler.is_idle()
    }
}
