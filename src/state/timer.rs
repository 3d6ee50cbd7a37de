//! Single-shot deadlines with cancel-and-replace semantics.
//!
//! Nothing runs here; the driver loop sleeps until [`TimerSlot::deadline`]
//! and hands the current time back to the state machine.

use tokio::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline<T> {
    pub at: Instant,
    pub tag: T,
}

/// At most one pending deadline per slot.
#[derive(Debug)]
pub struct TimerSlot<T> {
    pending: Option<Deadline<T>>,
}

impl<T: Copy> TimerSlot<T> {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Arm the slot, returning whatever deadline it replaced.
    pub fn arm(&mut self, at: Instant, tag: T) -> Option<Deadline<T>> {
        self.pending.replace(Deadline { at, tag })
    }

    pub fn cancel(&mut self) -> Option<Deadline<T>> {
        self.pending.take()
    }

    /// Take the deadline if it has passed.
    pub fn take_due(&mut self, now: Instant) -> Option<Deadline<T>> {
        match self.pending {
            Some(deadline) if deadline.at <= now => self.pending.take(),
            _ => None,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|d| d.at)
    }

    pub fn pending(&self) -> Option<Deadline<T>> {
        self.pending
    }
}

impl<T: Copy> Default for TimerSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
