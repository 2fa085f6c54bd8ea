#![forbid(unsafe_code)]

//! Press-and-hold auto-repeat timer.
//!
//! [`RepeatTimer`] implements the two-phase repeat used by spin buttons: one
//! step immediately, a longer initial delay, then a fixed-rate interval whose
//! step size grows once a threshold number of ticks has elapsed.
//!
//! The timer owns no clock. [`start`](RepeatTimer::start),
//! [`fire`](RepeatTimer::fire), and [`reset`](RepeatTimer::reset) return
//! [`Effect`]s; the shell arms real timers and feeds firings back through
//! `fire`.
//!
//! # State Machine
//!
//! ```text
//!              start                 delay fires
//! ┌──────┐  (Step x1, arm delay)  ┌──────────┐  (arm interval)  ┌───────────┐
//! │ Idle │───────────────────────▶│ Delaying │─────────────────▶│ Repeating │──┐
//! └──────┘                        └──────────┘                  └───────────┘  │
//!    ▲                                 │                          ▲      │ tick (Step x1
//!    │              reset              │                          └──────┘  or x multiplier)
//!    └─────────────────────────────────┴──────────────────────────────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one delay handle and one interval handle are live.
//! 2. `start` always emits its immediate step before arming the delay.
//! 3. Firings of handles that are no longer live produce no effects.
//! 4. `reset` is idempotent: a second call returns no effects.
//!
//! # Configuration
//!
//! | Setting | Default | Fallback rule |
//! |---------|---------|---------------|
//! | `delay` | 500ms | non-positive or unparsable → default |
//! | `interval` | 100ms | non-positive or unparsable → default |
//! | `threshold` | 10 | unparsable → default; floored to 1 |
//! | `step_multiplier` | 4 | unparsable → default; floored to 1 |
//!
//! # Environment Variables
//!
//! | Variable | Type | Default | Description |
//! |----------|------|---------|-------------|
//! | `SPINBOX_REPEAT_DELAY_MS` | u64 | 500 | Hold time before repeating |
//! | `SPINBOX_REPEAT_INTERVAL_MS` | u64 | 100 | Time between repeats |
//! | `SPINBOX_REPEAT_THRESHOLD` | u32 | 10 | Repeats before accelerating |
//! | `SPINBOX_REPEAT_STEP_MULTIPLIER` | u32 | 4 | Accelerated step size |

use std::time::Duration;

use crate::coerce::coerce_repeat_integer;
use crate::effect::{Effect, TimerHandle, TimerKind};
use crate::stepping::Direction;

/// Default hold time before auto-repeat starts.
pub const DEFAULT_REPEAT_DELAY_MS: u64 = 500;

/// Default time between auto-repeat ticks.
pub const DEFAULT_REPEAT_INTERVAL_MS: u64 = 100;

/// Default number of single-step ticks before acceleration.
pub const DEFAULT_REPEAT_THRESHOLD: u32 = 10;

/// Default step multiplier after acceleration (also used by PageUp/PageDown).
pub const DEFAULT_REPEAT_STEP_MULTIPLIER: u32 = 4;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing and acceleration settings for auto-repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepeatConfig {
    /// Hold time between the immediate step and the first repeat.
    pub delay: Duration,

    /// Time between repeat ticks.
    pub interval: Duration,

    /// Ticks stepped by 1 before switching to `step_multiplier`.
    pub threshold: u32,

    /// Step magnitude once `threshold` ticks have elapsed.
    pub step_multiplier: u32,
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(DEFAULT_REPEAT_DELAY_MS),
            interval: Duration::from_millis(DEFAULT_REPEAT_INTERVAL_MS),
            threshold: DEFAULT_REPEAT_THRESHOLD,
            step_multiplier: DEFAULT_REPEAT_STEP_MULTIPLIER,
        }
    }
}

impl RepeatConfig {
    /// Set the initial delay (builder).
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Set the repeat interval (builder).
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Set the acceleration threshold (builder).
    #[must_use]
    pub fn with_threshold(mut self, threshold: u32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the accelerated step multiplier (builder).
    #[must_use]
    pub fn with_step_multiplier(mut self, multiplier: u32) -> Self {
        self.step_multiplier = multiplier;
        self
    }

    /// Coerce a raw delay in milliseconds.
    #[must_use]
    pub fn coerce_delay(raw: &str) -> Duration {
        positive_millis(raw, DEFAULT_REPEAT_DELAY_MS)
    }

    /// Coerce a raw interval in milliseconds.
    #[must_use]
    pub fn coerce_interval(raw: &str) -> Duration {
        positive_millis(raw, DEFAULT_REPEAT_INTERVAL_MS)
    }

    /// Coerce a raw acceleration threshold.
    #[must_use]
    pub fn coerce_threshold(raw: &str) -> u32 {
        at_least_one(raw, DEFAULT_REPEAT_THRESHOLD)
    }

    /// Coerce a raw step multiplier.
    #[must_use]
    pub fn coerce_step_multiplier(raw: &str) -> u32 {
        at_least_one(raw, DEFAULT_REPEAT_STEP_MULTIPLIER)
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `SPINBOX_REPEAT_DELAY_MS`
    /// - `SPINBOX_REPEAT_INTERVAL_MS`
    /// - `SPINBOX_REPEAT_THRESHOLD`
    /// - `SPINBOX_REPEAT_STEP_MULTIPLIER`
    ///
    /// Unset variables keep their defaults; set ones are coerced with the
    /// same rules as raw widget options.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("SPINBOX_REPEAT_DELAY_MS") {
            config.delay = Self::coerce_delay(&val);
        }
        if let Ok(val) = std::env::var("SPINBOX_REPEAT_INTERVAL_MS") {
            config.interval = Self::coerce_interval(&val);
        }
        if let Ok(val) = std::env::var("SPINBOX_REPEAT_THRESHOLD") {
            config.threshold = Self::coerce_threshold(&val);
        }
        if let Ok(val) = std::env::var("SPINBOX_REPEAT_STEP_MULTIPLIER") {
            config.step_multiplier = Self::coerce_step_multiplier(&val);
        }

        config
    }

    /// Replace zero durations with defaults and floor counts to 1.
    #[must_use]
    pub fn validated(mut self) -> Self {
        if self.delay.is_zero() {
            self.delay = Duration::from_millis(DEFAULT_REPEAT_DELAY_MS);
        }
        if self.interval.is_zero() {
            self.interval = Duration::from_millis(DEFAULT_REPEAT_INTERVAL_MS);
        }
        self.threshold = self.threshold.max(1);
        self.step_multiplier = self.step_multiplier.max(1);
        self
    }

    /// Check if values are usable without [`validated`](Self::validated).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.delay.is_zero()
            && !self.interval.is_zero()
            && self.threshold >= 1
            && self.step_multiplier >= 1
    }
}

fn positive_millis(raw: &str, default_ms: u64) -> Duration {
    let ms = coerce_repeat_integer(raw, 0);
    let ms = u64::try_from(ms)
        .ok()
        .filter(|&ms| ms > 0)
        .unwrap_or(default_ms);
    Duration::from_millis(ms)
}

fn at_least_one(raw: &str, default: u32) -> u32 {
    let value = coerce_repeat_integer(raw, i64::from(default));
    u32::try_from(value.max(1)).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// Repeat timer
// ---------------------------------------------------------------------------

/// Phase of the repeat timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RepeatPhase {
    /// No timers live.
    #[default]
    Idle,
    /// Immediate step taken; waiting for the initial delay.
    Delaying,
    /// Interval timer live; stepping on every tick.
    Repeating,
}

/// Two-phase auto-repeat state machine.
#[derive(Debug, Clone)]
pub struct RepeatTimer {
    config: RepeatConfig,
    phase: RepeatPhase,
    direction: Option<Direction>,
    delay: Option<TimerHandle>,
    interval: Option<TimerHandle>,
    repeat_count: u32,
    next_id: u64,
}

impl Default for RepeatTimer {
    fn default() -> Self {
        Self::new(RepeatConfig::default())
    }
}

impl RepeatTimer {
    /// Create an idle timer. The config is validated.
    #[must_use]
    pub fn new(config: RepeatConfig) -> Self {
        Self {
            config: config.validated(),
            phase: RepeatPhase::Idle,
            direction: None,
            delay: None,
            interval: None,
            repeat_count: 0,
            next_id: 0,
        }
    }

    /// Begin a repeat cycle stepping in `direction`.
    ///
    /// Returns no effects when `interactive` is false (control disabled or
    /// read-only). Otherwise cancels any live cycle, steps once immediately,
    /// and arms the initial delay.
    pub fn start(&mut self, direction: Direction, interactive: bool) -> Vec<Effect> {
        if !interactive {
            return Vec::new();
        }

        let mut out = self.reset();
        out.push(Effect::Step {
            direction,
            magnitude: 1,
        });

        let handle = self.allocate(TimerKind::Delay);
        self.delay = Some(handle);
        self.direction = Some(direction);
        self.phase = RepeatPhase::Delaying;
        out.push(Effect::ArmTimer {
            handle,
            after: self.config.delay,
            repeating: false,
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(?direction, delay_id = handle.id(), "repeat.start");

        out
    }

    /// Handle a timer firing.
    ///
    /// The delay handle transitions to [`RepeatPhase::Repeating`] and arms the
    /// interval; each interval firing steps by 1 while fewer than `threshold`
    /// ticks have elapsed, by `step_multiplier` afterwards. Unknown or stale
    /// handles are ignored.
    pub fn fire(&mut self, handle: TimerHandle) -> Vec<Effect> {
        let Some(direction) = self.direction else {
            return Vec::new();
        };

        if self.delay == Some(handle) {
            self.delay = None;
            let interval = self.allocate(TimerKind::Interval);
            self.interval = Some(interval);
            self.repeat_count = 0;
            self.phase = RepeatPhase::Repeating;

            #[cfg(feature = "tracing")]
            tracing::trace!(interval_id = interval.id(), "repeat.delay_elapsed");

            return vec![Effect::ArmTimer {
                handle: interval,
                after: self.config.interval,
                repeating: true,
            }];
        }

        if self.interval == Some(handle) {
            let magnitude = if self.repeat_count < self.config.threshold {
                1
            } else {
                self.config.step_multiplier
            };
            self.repeat_count = self.repeat_count.saturating_add(1);
            return vec![Effect::Step {
                direction,
                magnitude,
            }];
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(stale_id = handle.id(), "repeat.stale_timer");

        Vec::new()
    }

    /// Cancel any live timers and return to [`RepeatPhase::Idle`].
    pub fn reset(&mut self) -> Vec<Effect> {
        let mut out = Vec::new();
        if let Some(handle) = self.delay.take() {
            out.push(Effect::CancelTimer(handle));
        }
        if let Some(handle) = self.interval.take() {
            out.push(Effect::CancelTimer(handle));
        }

        #[cfg(feature = "tracing")]
        if self.phase != RepeatPhase::Idle {
            tracing::trace!(repeat_count = self.repeat_count, "repeat.reset");
        }

        self.phase = RepeatPhase::Idle;
        self.direction = None;
        self.repeat_count = 0;
        out
    }

    fn allocate(&mut self, kind: TimerKind) -> TimerHandle {
        self.next_id = self.next_id.wrapping_add(1);
        TimerHandle::new(self.next_id, kind)
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> RepeatPhase {
        self.phase
    }

    /// Whether a cycle is in progress.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase != RepeatPhase::Idle
    }

    /// Interval ticks delivered in the current cycle.
    #[inline]
    #[must_use]
    pub fn repeat_count(&self) -> u32 {
        self.repeat_count
    }

    /// Direction of the current cycle, if any.
    #[inline]
    #[must_use]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Live timer handles (delay, interval).
    #[must_use]
    pub fn live_handles(&self) -> (Option<TimerHandle>, Option<TimerHandle>) {
        (self.delay, self.interval)
    }

    /// Get a reference to the current configuration.
    #[must_use]
    pub fn config(&self) -> &RepeatConfig {
        &self.config
    }

    /// Update the configuration.
    ///
    /// Takes effect at the next `start`; a running cycle keeps its armed
    /// timers.
    pub fn set_config(&mut self, config: RepeatConfig) {
        self.config = config.validated();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);
    const MS_500: Duration = Duration::from_millis(500);

    fn armed(effects: &[Effect]) -> TimerHandle {
        effects
            .iter()
            .find_map(|e| match e {
                Effect::ArmTimer { handle, .. } => Some(*handle),
                _ => None,
            })
            .expect("an ArmTimer effect")
    }

    fn magnitude(effects: &[Effect]) -> Option<u32> {
        effects.iter().find_map(|e| match e {
            Effect::Step { magnitude, .. } => Some(*magnitude),
            _ => None,
        })
    }

    // --- Config ---

    #[test]
    fn config_defaults() {
        let config = RepeatConfig::default();
        assert_eq!(config.delay, MS_500);
        assert_eq!(config.interval, MS_100);
        assert_eq!(config.threshold, 10);
        assert_eq!(config.step_multiplier, 4);
        assert!(config.is_valid());
    }

    #[test]
    fn config_builder() {
        let config = RepeatConfig::default()
            .with_delay(Duration::from_millis(300))
            .with_interval(Duration::from_millis(50))
            .with_threshold(3)
            .with_step_multiplier(10);
        assert_eq!(config.delay.as_millis(), 300);
        assert_eq!(config.interval.as_millis(), 50);
        assert_eq!(config.threshold, 3);
        assert_eq!(config.step_multiplier, 10);
    }

    #[test]
    fn config_validated_replaces_zeroes() {
        let config = RepeatConfig::default()
            .with_delay(Duration::ZERO)
            .with_interval(Duration::ZERO)
            .with_threshold(0)
            .with_step_multiplier(0);
        assert!(!config.is_valid());

        let config = config.validated();
        assert_eq!(config.delay, MS_500);
        assert_eq!(config.interval, MS_100);
        assert_eq!(config.threshold, 1);
        assert_eq!(config.step_multiplier, 1);
        assert!(config.is_valid());
    }

    #[test]
    fn coerce_durations() {
        assert_eq!(RepeatConfig::coerce_delay("250"), Duration::from_millis(250));
        assert_eq!(RepeatConfig::coerce_delay("0"), MS_500);
        assert_eq!(RepeatConfig::coerce_delay("-20"), MS_500);
        assert_eq!(RepeatConfig::coerce_delay("soon"), MS_500);
        assert_eq!(RepeatConfig::coerce_interval("33.9"), Duration::from_millis(33));
        assert_eq!(RepeatConfig::coerce_interval(""), MS_100);
    }

    #[test]
    fn coerce_counts() {
        assert_eq!(RepeatConfig::coerce_threshold("5"), 5);
        assert_eq!(RepeatConfig::coerce_threshold("0"), 1);
        assert_eq!(RepeatConfig::coerce_threshold("-8"), 1);
        assert_eq!(RepeatConfig::coerce_threshold("many"), 10);
        assert_eq!(RepeatConfig::coerce_step_multiplier("x"), 4);
        assert_eq!(RepeatConfig::coerce_step_multiplier("99999999999"), u32::MAX);
    }

    // --- Timer ---

    #[test]
    fn start_steps_then_arms_delay() {
        let mut timer = RepeatTimer::default();
        let effects = timer.start(Direction::Up, true);

        assert_eq!(
            effects[0],
            Effect::Step {
                direction: Direction::Up,
                magnitude: 1
            }
        );
        assert!(matches!(
            effects[1],
            Effect::ArmTimer { after, repeating: false, .. } if after == MS_500
        ));
        assert_eq!(effects.len(), 2);
        assert_eq!(timer.phase(), RepeatPhase::Delaying);
        assert!(timer.is_active());
    }

    #[test]
    fn start_is_guarded() {
        let mut timer = RepeatTimer::default();
        assert!(timer.start(Direction::Up, false).is_empty());
        assert_eq!(timer.phase(), RepeatPhase::Idle);
    }

    #[test]
    fn delay_arms_interval() {
        let mut timer = RepeatTimer::default();
        let delay = armed(&timer.start(Direction::Down, true));

        let effects = timer.fire(delay);
        assert_eq!(effects.len(), 1);
        assert!(matches!(
            effects[0],
            Effect::ArmTimer { handle, after, repeating: true }
                if after == MS_100 && handle.kind() == TimerKind::Interval
        ));
        assert_eq!(timer.phase(), RepeatPhase::Repeating);
        assert_eq!(timer.live_handles().0, None);
    }

    #[test]
    fn acceleration_after_threshold() {
        let mut timer = RepeatTimer::new(
            RepeatConfig::default()
                .with_threshold(10)
                .with_step_multiplier(4),
        );
        let delay = armed(&timer.start(Direction::Up, true));
        let interval = armed(&timer.fire(delay));

        for tick in 1..=10 {
            assert_eq!(magnitude(&timer.fire(interval)), Some(1), "tick {tick}");
        }
        for tick in 11..=15 {
            assert_eq!(magnitude(&timer.fire(interval)), Some(4), "tick {tick}");
        }
        assert_eq!(timer.repeat_count(), 15);
    }

    #[test]
    fn reset_cancels_live_handles() {
        let mut timer = RepeatTimer::default();
        let delay = armed(&timer.start(Direction::Up, true));

        let effects = timer.reset();
        assert_eq!(effects, vec![Effect::CancelTimer(delay)]);
        assert_eq!(timer.phase(), RepeatPhase::Idle);
        assert_eq!(timer.live_handles(), (None, None));
    }

    #[test]
    fn reset_is_idempotent() {
        let mut timer = RepeatTimer::default();
        let delay = armed(&timer.start(Direction::Up, true));
        timer.fire(delay);

        assert_eq!(timer.reset().len(), 1);
        assert!(timer.reset().is_empty());
        assert!(timer.reset().is_empty());
        assert_eq!(timer.phase(), RepeatPhase::Idle);
        assert_eq!(timer.repeat_count(), 0);
    }

    #[test]
    fn stale_handles_are_ignored() {
        let mut timer = RepeatTimer::default();
        let first_delay = armed(&timer.start(Direction::Up, true));
        let second_delay = armed(&timer.start(Direction::Up, true));
        assert_ne!(first_delay, second_delay);

        assert!(timer.fire(first_delay).is_empty());
        assert_eq!(timer.phase(), RepeatPhase::Delaying);

        timer.reset();
        assert!(timer.fire(second_delay).is_empty());
    }

    #[test]
    fn restart_cancels_previous_cycle() {
        let mut timer = RepeatTimer::default();
        let delay = armed(&timer.start(Direction::Up, true));
        let interval = armed(&timer.fire(delay));

        let effects = timer.start(Direction::Down, true);
        assert_eq!(effects[0], Effect::CancelTimer(interval));
        assert_eq!(
            effects[1],
            Effect::Step {
                direction: Direction::Down,
                magnitude: 1
            }
        );
        assert_eq!(timer.direction(), Some(Direction::Down));
        assert_eq!(timer.repeat_count(), 0);
    }

    #[test]
    fn set_config_validates() {
        let mut timer = RepeatTimer::default();
        timer.set_config(RepeatConfig::default().with_threshold(0));
        assert_eq!(timer.config().threshold, 1);
    }
}
