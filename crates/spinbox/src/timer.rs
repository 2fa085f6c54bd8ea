#![forbid(unsafe_code)]

//! Deadline queue for the repeat timers.
//!
//! The core asks for timers through `Effect::ArmTimer`; the shell keeps them
//! here as absolute deadlines and fires the due ones whenever the host calls
//! `tick`. The queue never sleeps and never reads the clock; every instant
//! comes from the caller.
//!
//! # Invariants
//!
//! 1. A handle appears at most once; re-arming replaces the old deadline.
//! 2. [`poll`](TimerQueue::poll) yields each handle at most once per call and
//!    in deadline order (ties broken by handle id).
//! 3. A periodic entry whose next deadline is already in the past is pushed
//!    to `now + period`. A stalled host loop gets one tick per poll, never a
//!    burst of catch-up ticks.

use std::time::Duration;

use spinbox_core::TimerHandle;
use web_time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    handle: TimerHandle,
    deadline: Instant,
    period: Option<Duration>,
}

/// Armed timers keyed by handle.
#[derive(Debug, Clone, Default)]
pub struct TimerQueue {
    entries: Vec<Entry>,
}

impl TimerQueue {
    /// Create an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `handle` to fire at `deadline`, then every `period` if given.
    pub fn arm(&mut self, handle: TimerHandle, deadline: Instant, period: Option<Duration>) {
        let entry = Entry {
            handle,
            deadline,
            period: period.filter(|p| !p.is_zero()),
        };
        match self.entries.iter_mut().find(|e| e.handle == handle) {
            Some(existing) => *existing = entry,
            None => self.entries.push(entry),
        }
    }

    /// Disarm `handle`. Returns whether it was armed.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    /// Disarm everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of armed timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no timers are armed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `handle` is armed.
    #[must_use]
    pub fn contains(&self, handle: TimerHandle) -> bool {
        self.entries.iter().any(|e| e.handle == handle)
    }

    /// Earliest armed deadline, for hosts that schedule their next wakeup.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.iter().map(|e| e.deadline).min()
    }

    /// Collect every timer due at `now` with the deadline it was due at.
    ///
    /// One-shot timers are removed; periodic timers are re-armed one period
    /// later.
    pub fn poll(&mut self, now: Instant) -> Vec<(TimerHandle, Instant)> {
        let mut due: Vec<(TimerHandle, Instant)> = self
            .entries
            .iter()
            .filter(|e| e.deadline <= now)
            .map(|e| (e.handle, e.deadline))
            .collect();
        if due.is_empty() {
            return due;
        }
        due.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));

        self.entries.retain_mut(|e| {
            if e.deadline > now {
                return true;
            }
            match e.period {
                Some(period) => {
                    let next = e.deadline + period;
                    e.deadline = if next > now { next } else { now + period };
                    true
                }
                None => false,
            }
        });

        due
    }
}
