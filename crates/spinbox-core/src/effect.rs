#![forbid(unsafe_code)]

//! Effects produced by the arbiter and the repeat timer.
//!
//! The core never owns a clock or a value. Instead every transition returns a
//! list of [`Effect`]s that the widget shell executes in order: arm or cancel
//! a timer, step the value, toggle the page-level release listener, or commit.

use std::time::Duration;

use crate::stepping::{Bound, Direction};

/// Which of the two repeat timers a handle belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimerKind {
    /// One-shot initial delay.
    Delay,
    /// Recurring repeat interval.
    Interval,
}

/// Opaque identity of an armed timer.
///
/// Ids are unique for the lifetime of a [`RepeatTimer`](crate::repeat::RepeatTimer),
/// so a firing that races a cancellation is recognized as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle {
    id: u64,
    kind: TimerKind,
}

impl TimerHandle {
    pub(crate) const fn new(id: u64, kind: TimerKind) -> Self {
        Self { id, kind }
    }

    /// Monotonic id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Delay or interval.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> TimerKind {
        self.kind
    }
}

/// A side effect requested by the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Step the value by `magnitude` steps in `direction`.
    Step {
        /// Stepping direction.
        direction: Direction,
        /// Number of base steps (1 for single steps).
        magnitude: u32,
    },

    /// Set the value to a bound (Home / End).
    Jump(Bound),

    /// Arm a timer that fires after `after`; if `repeating`, keep firing
    /// every `after` until cancelled.
    ArmTimer {
        /// Identity delivered back as `SpinEvent::Timer`.
        handle: TimerHandle,
        /// Delay before the (first) firing.
        after: Duration,
        /// Whether the timer re-arms itself.
        repeating: bool,
    },

    /// Cancel a previously armed timer.
    CancelTimer(TimerHandle),

    /// Start listening for pointer releases anywhere on the page.
    SubscribeRelease,

    /// Stop listening for page-level pointer releases.
    UnsubscribeRelease,

    /// The gesture is complete: notify `changed` with the settled value.
    Commit,

    /// The triggering device event was handled; suppress its default action.
    Consume,
}
