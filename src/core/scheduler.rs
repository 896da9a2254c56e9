//! Cancellable scheduled tasks on a virtual clock.
//!
//! Sessions never block. A delay ("show the ball for 1.5s", "think for
//! half a second") is a task scheduled on the session's own `Scheduler`,
//! and the host drives time forward through the session's `advance`.
//!
//! Tasks are plain values, not closures: the owning session interprets them
//! when they come due. Dropping or tearing down a session therefore drops its
//! pending tasks with it, and nothing can fire into a dead session.
//!
//! ## Ordering
//!
//! Due tasks are delivered by due time, then by scheduling order. A task
//! scheduled while draining (with `now` set to the firing task's due time)
//! is delivered in the same drain if it falls inside the window.
//!
//! ```
//! use std::time::Duration;
//! use pocket_arcade::core::Scheduler;
//!
//! let mut scheduler = Scheduler::new();
//! let late = scheduler.schedule(Duration::from_millis(200), "late");
//! scheduler.schedule(Duration::from_millis(100), "early");
//! scheduler.cancel(late);
//!
//! let until = scheduler.now() + Duration::from_millis(500);
//! assert_eq!(scheduler.pop_due(until), Some("early"));
//! assert_eq!(scheduler.pop_due(until), None);
//! ```

use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled task, used to cancel it before it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    due: Duration,
    id: u64,
}

impl TaskHandle {
    /// Virtual time at which the task fires.
    #[must_use]
    pub fn due(self) -> Duration {
        self.due
    }
}

/// Single-threaded task queue keyed by virtual time.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    pending: BTreeMap<(Duration, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: BTreeMap::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `task` to fire `delay` after the current virtual time.
    pub fn schedule(&mut self, delay: Duration, task: T) -> TaskHandle {
        let handle = TaskHandle {
            due: self.now + delay,
            id: self.next_id,
        };
        self.next_id += 1;
        self.pending.insert((handle.due, handle.id), task);
        handle
    }

    /// Cancel a pending task. Returns `false` if it already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        self.pending.remove(&(handle.due, handle.id)).is_some()
    }

    /// Cancel every pending task.
    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Whether `handle` is still waiting to fire.
    #[must_use]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.pending.contains_key(&(handle.due, handle.id))
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    /// Remove and return the earliest task due at or before `until`.
    ///
    /// Moves the clock to that task's due time, so follow-up tasks scheduled
    /// by the caller are timed from the moment this one fired.
    pub fn pop_due(&mut self, until: Duration) -> Option<T> {
        let (&(due, id), _) = self.pending.iter().next()?;
        if due > until {
            return None;
        }
        self.now = self.now.max(due);
        self.pending.remove(&(due, id))
    }

    /// Move the clock forward to `until` once draining is done.
    pub fn settle(&mut self, until: Duration) {
        self.now = self.now.max(until);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(300), 3);
        scheduler.schedule(ms(100), 1);
        scheduler.schedule(ms(200), 2);

        let fired: Vec<_> = std::iter::from_fn(|| scheduler.pop_due(ms(1000))).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_fire_in_scheduling_order() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(100), "a");
        scheduler.schedule(ms(100), "b");

        assert_eq!(scheduler.pop_due(ms(100)), Some("a"));
        assert_eq!(scheduler.pop_due(ms(100)), Some("b"));
    }

    #[test]
    fn test_not_due_yet() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(ms(500), ());

        assert_eq!(scheduler.pop_due(ms(499)), None);
        assert!(scheduler.is_pending(handle));
        assert_eq!(scheduler.pop_due(ms(500)), Some(()));
        assert!(!scheduler.is_pending(handle));
    }

    #[test]
    fn test_cancel() {
        let mut scheduler = Scheduler::new();
        let handle = scheduler.schedule(ms(10), 1);

        assert!(scheduler.cancel(handle));
        assert!(!scheduler.cancel(handle));
        assert_eq!(scheduler.pop_due(ms(100)), None);
    }

    #[test]
    fn test_cancel_all() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(10), 1);
        scheduler.schedule(ms(20), 2);
        assert_eq!(scheduler.pending_count(), 2);

        scheduler.cancel_all();
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_clock_follows_fired_task() {
        let mut scheduler = Scheduler::new();
        scheduler.schedule(ms(100), 1);

        scheduler.pop_due(ms(1000));
        assert_eq!(scheduler.now(), ms(100));

        // Follow-up is timed from the firing moment, not the window end
        let handle = scheduler.schedule(ms(50), 2);
        assert_eq!(handle.due(), ms(150));

        scheduler.settle(ms(1000));
        assert_eq!(scheduler.now(), ms(1000));
    }

    #[test]
    fn test_settle_never_rewinds() {
        let mut scheduler: Scheduler<()> = Scheduler::new();
        scheduler.settle(ms(500));
        scheduler.settle(ms(100));
        assert_eq!(scheduler.now(), ms(500));
    }
}
