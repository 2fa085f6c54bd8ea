#![forbid(unsafe_code)]

//! Numeric coercion and precision helpers.
//!
//! Configuration reaches the engine as loosely-typed text (attribute values,
//! environment variables, host bindings). Everything in this module turns that
//! text into a finite number or a caller-chosen fallback, so nothing past this
//! boundary ever sees NaN or infinity.
//!
//! # Parsing rules
//!
//! Parsing is prefix-based: leading whitespace is skipped, the longest numeric
//! prefix is taken, and trailing garbage is ignored (`"12px"` parses as 12).
//! A string with no numeric prefix fails and yields the fallback.
//!
//! # Precision
//!
//! [`derive_precision`] counts the decimal places of the configured step so
//! that stepping results can be rounded back onto the step grid with
//! [`round_to_precision`] instead of accumulating binary floating-point error.

use std::num::IntErrorKind;

/// Upper bound on derived precision.
///
/// `f64` carries at most 17 significant decimal digits; rounding to more
/// places than that is a no-op and `10^p` would overflow for absurd steps.
pub const MAX_PRECISION: u32 = 17;

/// Parse `raw` as a float and return it if finite, otherwise `fallback`.
///
/// `fallback` may be `None`, the empty-value sentinel.
#[must_use]
pub fn coerce_number(raw: &str, fallback: Option<f64>) -> Option<f64> {
    parse_float_prefix(raw)
        .filter(|value| value.is_finite())
        .or(fallback)
}

/// Return `value` when finite, otherwise `fallback`.
#[inline]
#[must_use]
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() { value } else { fallback }
}

/// Parse `raw` as a base-10 integer, returning `abs(fallback)` on failure.
///
/// Fractional parts are truncated (`"7.9"` → 7). Out-of-range digit runs
/// saturate instead of failing. Callers apply their own lower bounds.
#[must_use]
pub fn coerce_repeat_integer(raw: &str, fallback: i64) -> i64 {
    parse_int_prefix(raw).unwrap_or_else(|| fallback.saturating_abs())
}

/// Parse the longest float prefix of `raw`.
#[must_use]
pub fn parse_float_prefix(raw: &str) -> Option<f64> {
    let prefix = float_prefix(raw.trim_start());
    if prefix.is_empty() {
        return None;
    }
    prefix.parse::<f64>().ok()
}

/// Parse the longest integer prefix of `raw`.
#[must_use]
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end == digits_start {
        return None;
    }
    match s[..end].parse::<i64>() {
        Ok(value) => Some(value),
        Err(err) => match err.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

fn float_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent is only taken when it has at least one digit ("1e" → "1").
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    &s[..end]
}

/// Decimal places of `step`, taken from its shortest round-trip representation.
///
/// Integral and non-finite steps have precision 0. The result is capped at
/// [`MAX_PRECISION`].
#[must_use]
pub fn derive_precision(step: f64) -> u32 {
    if !step.is_finite() || step.fract() == 0.0 {
        return 0;
    }
    let repr = step.abs().to_string();
    let places = repr.split_once('.').map_or(0, |(_, frac)| frac.len());
    u32::try_from(places).map_or(MAX_PRECISION, |p| p.min(MAX_PRECISION))
}

/// `10^precision`, the scale used to snap values back onto the precision grid.
#[must_use]
pub fn multiplier_for(precision: u32) -> f64 {
    10f64.powi(precision.min(MAX_PRECISION) as i32)
}

/// Round half toward positive infinity (`-2.5` → `-2`, `2.5` → `3`).
///
/// This is the rounding native range inputs use when snapping to the step
/// grid; `f64::round` rounds half away from zero and disagrees on negatives.
#[must_use]
pub fn js_round(x: f64) -> f64 {
    let floor = x.floor();
    if x - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// Round `value` to `precision` decimal places.
///
/// Negative zero is normalized to positive zero. Values too large to scale
/// are returned unchanged.
#[must_use]
pub fn round_to_precision(value: f64, precision: u32) -> f64 {
    let multiplier = multiplier_for(precision);
    let scaled = value * multiplier;
    if !scaled.is_finite() {
        return value;
    }
    js_round(scaled) / multiplier + 0.0
}
