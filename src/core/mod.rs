//! Core engine types: randomness, configuration, scheduling, sessions.
//!
//! This module contains the building blocks shared by every mini-game.
//! Games hold their own state; nothing here is global.

pub mod config;
pub mod rng;
pub mod scheduler;
pub mod session;

pub use config::{ArcadeConfig, Timings};
pub use rng::{pick, GameRng, RandomSource, ScriptedRng};
pub use scheduler::{Scheduler, TaskHandle};
pub use session::{GameKind, Scoring, TimedSession};
