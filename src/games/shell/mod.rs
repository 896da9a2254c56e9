//! Three-cup shell game.
//!
//! The ball's ground-truth slot never moves; shuffling permutes which slot
//! each visible cup covers. A guess wins when the chosen visible cup covers
//! the ball's slot.

mod cups;
mod session;

pub use cups::{Cups, CUP_COUNT};
pub use session::{Phase, ShellEvent, ShellGame, ShellSnapshot};
