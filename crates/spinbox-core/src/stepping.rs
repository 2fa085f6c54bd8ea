#![forbid(unsafe_code)]

//! Stepping engine: range configuration and value arithmetic.
//!
//! All functions here are pure. They never format, never touch timers, and
//! never fail: invalid configuration is replaced by defaults when a
//! [`SpinRange`] is built, and every computed value is finite.
//!
//! # Algorithm
//!
//! Stepping mirrors a native range input. The current value is first snapped
//! onto the step grid anchored at `min`, then advanced by one effective step:
//!
//! ```text
//! effective = step * direction * magnitude
//! candidate = round((value - min) / effective) * effective + min + effective
//! ```
//!
//! The candidate is rounded to the step's decimal precision, then clamped to
//! `[min, max]` (or wrapped to the opposite bound when `wrap` is set).
//!
//! # Invariants
//!
//! 1. `step > 0` and finite; `min` and `max` finite.
//! 2. Every result is rounded to [`SpinRange::precision`].
//! 3. With `wrap == false` and `min <= max`, results lie in `[min, max]`.
//! 4. The empty value steps to a bound, never to NaN.
//!
//! # Failure Modes
//!
//! - `min > max` (after max snapping): no panic. The upper bound is checked
//!   first, so values above `max` resolve to `max` (or `min` when wrapping)
//!   even if that lies below `min`.

use crate::coerce::{derive_precision, finite_or, js_round, multiplier_for, round_to_precision};

/// Default lower bound when none (or a non-finite one) is configured.
pub const DEFAULT_MIN: f64 = 1.0;

/// Default upper bound when none (or a non-finite one) is configured.
pub const DEFAULT_MAX: f64 = 100.0;

/// Default step when none (or a non-positive one) is configured.
pub const DEFAULT_STEP: f64 = 1.0;

/// Quotients within this distance of an integer count as integral when
/// snapping `max` onto the step grid (`0.3 / 0.1 == 2.9999999999999996`).
const GRID_EPSILON: f64 = 1e-9;

/// Stepping direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Increase the value.
    Up,
    /// Decrease the value.
    Down,
}

impl Direction {
    /// `+1.0` for [`Up`](Direction::Up), `-1.0` for [`Down`](Direction::Down).
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Up => 1.0,
            Self::Down => -1.0,
        }
    }
}

/// Target of an absolute jump (Home / End).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bound {
    /// The configured minimum.
    Min,
    /// The (grid-snapped) maximum.
    Max,
}

/// Resolved range configuration.
///
/// Construct with [`SpinRange::new`], which coerces every field:
///
/// | Field | Default | Replaced when |
/// |-------|---------|---------------|
/// | `min` | 1 | not finite |
/// | `max` | 100 | not finite |
/// | `step` | 1 | not finite or `<= 0` |
///
/// `max` is snapped down onto the step grid anchored at `min` so the top of
/// the range is reachable by stepping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinRange {
    min: f64,
    max: f64,
    step: f64,
    precision: u32,
    wrap: bool,
}

impl Default for SpinRange {
    fn default() -> Self {
        Self::new(DEFAULT_MIN, DEFAULT_MAX, DEFAULT_STEP)
    }
}

impl SpinRange {
    /// Build a range, replacing invalid fields with their defaults.
    #[must_use]
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        let min = finite_or(min, DEFAULT_MIN);
        let step = if step.is_finite() && step > 0.0 {
            step
        } else {
            DEFAULT_STEP
        };
        let precision = derive_precision(step);
        let max = snap_max(min, finite_or(max, DEFAULT_MAX), step, precision);
        Self {
            min,
            max,
            step,
            precision,
            wrap: false,
        }
    }

    /// Set wrap-around behaviour (builder).
    #[must_use]
    pub const fn with_wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Lower bound.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound, snapped onto the step grid.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Step size (always positive).
    #[inline]
    #[must_use]
    pub const fn step(&self) -> f64 {
        self.step
    }

    /// Decimal places derived from the step.
    #[inline]
    #[must_use]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    /// Whether stepping past a bound cycles to the other bound.
    #[inline]
    #[must_use]
    pub const fn wrap(&self) -> bool {
        self.wrap
    }

    /// `10^precision`.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        multiplier_for(self.precision)
    }

    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Whether a present value lies outside the range.
    ///
    /// The empty value is never out of range.
    #[must_use]
    pub fn is_out_of_range(&self, value: Option<f64>) -> bool {
        value.is_some_and(|v| !self.contains(v))
    }

    /// The value a [`Bound`] jumps to.
    #[must_use]
    pub const fn bound(&self, bound: Bound) -> f64 {
        match bound {
            Bound::Min => self.min,
            Bound::Max => self.max,
        }
    }
}

fn snap_max(min: f64, max: f64, step: f64, precision: u32) -> f64 {
    let quotient = (max - min) / step;
    let nearest = quotient.round();
    let steps = if (quotient - nearest).abs() < GRID_EPSILON {
        nearest
    } else {
        quotient.floor()
    };
    let snapped = round_to_precision(steps * step + min, precision);
    finite_or(snapped, max)
}

/// Advance a present value by `magnitude` steps in `direction`.
///
/// `magnitude == 0` is treated as 1.
#[must_use]
pub fn step_value(current: f64, direction: Direction, magnitude: u32, range: &SpinRange) -> f64 {
    let effective = range.step * direction.sign() * f64::from(magnitude.max(1));
    let snapped = js_round((current - range.min) / effective) * effective + range.min + effective;
    let candidate = round_to_precision(snapped, range.precision);

    if !candidate.is_finite() {
        return range.min;
    }

    if candidate > range.max {
        if range.wrap { range.min } else { range.max }
    } else if candidate < range.min {
        if range.wrap { range.max } else { range.min }
    } else {
        candidate
    }
}

/// Step up from a possibly-empty value.
///
/// The empty value (or a non-finite one) seeds to `min`.
#[must_use]
pub fn step_up(current: Option<f64>, magnitude: u32, range: &SpinRange) -> f64 {
    match current {
        Some(value) if value.is_finite() => step_value(value, Direction::Up, magnitude, range),
        _ => range.min,
    }
}

/// Step down from a possibly-empty value.
///
/// The empty value seeds to `max` when wrapping, otherwise to `min`.
#[must_use]
pub fn step_down(current: Option<f64>, magnitude: u32, range: &SpinRange) -> f64 {
    match current {
        Some(value) if value.is_finite() => step_value(value, Direction::Down, magnitude, range),
        _ if range.wrap => range.max,
        _ => range.min,
    }
}

/// Step in either direction from a possibly-empty value.
#[must_use]
pub fn step(current: Option<f64>, direction: Direction, magnitude: u32, range: &SpinRange) -> f64 {
    match direction {
        Direction::Up => step_up(current, magnitude, range),
        Direction::Down => step_down(current, magnitude, range),
    }
}

/// Absolute jump to a bound. Not subject to wrap or grid snapping.
#[must_use]
pub const fn jump(bound: Bound, range: &SpinRange) -> f64 {
    range.bound(bound)
}

/// Locale-independent fixed-decimal text, e.g. for a hidden form field.
///
/// The empty value renders as the empty string.
#[must_use]
pub fn fixed_string(value: Option<f64>, precision: u32) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", precision as usize, v + 0.0),
        _ => String::new(),
    }
}
