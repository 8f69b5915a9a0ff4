//! One-shot timer abstraction used by the checkpoint scheduler.
//!
//! The scheduler never sleeps itself. It asks a [`Timer`] to arm a one-shot
//! delay and gets back a [`TimerId`]; the host later reports the firing with
//! that id. Ids are monotonically increasing, so a firing whose id is not the
//! scheduler's live id is stale and can be dropped.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Identifies one armed one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Host-provided one-shot timer service.
pub trait Timer {
    /// Arm a one-shot timer that fires once after `delay`.
    fn arm(&mut self, delay: Duration) -> TimerId;

    /// Cancel a previously armed timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// A timer that has been armed and not yet cancelled or fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArmedTimer {
    pub id: TimerId,
    pub delay: Duration,
}

#[derive(Debug, Default)]
struct ManualTimerState {
    next_id: u64,
    armed: Vec<ArmedTimer>,
    arm_count: usize,
    cancel_count: usize,
}

/// Timer that never fires by itself; the caller inspects and fires it.
///
/// Clones share state so a test can keep a handle after giving one to the
/// scheduler.
#[derive(Debug, Clone, Default)]
pub struct ManualTimer {
    state: Rc<RefCell<ManualTimerState>>,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timers currently armed, oldest first.
    pub fn armed(&self) -> Vec<ArmedTimer> {
        self.state.borrow().armed.clone()
    }

    /// The most recently armed timer that is still live.
    pub fn last_armed(&self) -> Option<ArmedTimer> {
        self.state.borrow().armed.last().copied()
    }

    pub fn arm_count(&self) -> usize {
        self.state.borrow().arm_count
    }

    pub fn cancel_count(&self) -> usize {
        self.state.borrow().cancel_count
    }

    /// Remove `id` from the armed set as if it had fired.
    ///
    /// Returns false if it was not armed.
    pub fn take(&self, id: TimerId) -> bool {
        let mut state = self.state.borrow_mut();
        let before = state.armed.len();
        state.armed.retain(|t| t.id != id);
        state.armed.len() != before
    }
}

impl Timer for ManualTimer {
    fn arm(&mut self, delay: Duration) -> TimerId {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        state.arm_count += 1;
        let id = TimerId(state.next_id);
        state.armed.push(ArmedTimer { id, delay });
        id
    }

    fn cancel(&mut self, id: TimerId) {
        let mut state = self.state.borrow_mut();
        state.cancel_count += 1;
        state.armed.retain(|t| t.id != id);
    }
}
