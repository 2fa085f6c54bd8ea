#![no_main]

use libfuzzer_sys::fuzz_target;
use spinbox_core::coerce::{MAX_PRECISION, coerce_number, coerce_repeat_integer};
use spinbox_core::repeat::RepeatConfig;
use spinbox_core::stepping::{Direction, SpinRange, step};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if text.len() > 1024 {
        return;
    }

    // Coercion must never panic and never yield a non-finite number.
    if let Some(n) = coerce_number(text, None) {
        assert!(n.is_finite(), "coerced {text:?} to {n}");
    }
    let _ = coerce_repeat_integer(text, 10);

    // Repeat settings are always usable.
    assert!(RepeatConfig::coerce_delay(text) > std::time::Duration::ZERO);
    assert!(RepeatConfig::coerce_interval(text) > std::time::Duration::ZERO);
    assert!(RepeatConfig::coerce_threshold(text) >= 1);
    assert!(RepeatConfig::coerce_step_multiplier(text) >= 1);

    // Split the input three ways and build a range from the pieces.
    let mut parts = text.splitn(3, ',');
    let min = coerce_number(parts.next().unwrap_or(""), Some(0.0)).unwrap_or(0.0);
    let max = coerce_number(parts.next().unwrap_or(""), Some(100.0)).unwrap_or(100.0);
    let raw_step = coerce_number(parts.next().unwrap_or(""), Some(1.0)).unwrap_or(1.0);
    let range = SpinRange::new(min, max, raw_step);

    assert!(range.step() > 0.0);
    assert!(range.precision() <= MAX_PRECISION);
    assert!(range.max().is_finite() && range.min().is_finite());

    // Stepping from empty or any bound is total.
    for current in [None, Some(range.min()), Some(range.max())] {
        let up = step(current, Direction::Up, 1, &range);
        let down = step(current, Direction::Down, 1, &range);
        assert!(!up.is_nan(), "step up from {current:?} in {range:?}");
        assert!(!down.is_nan(), "step down from {current:?} in {range:?}");
    }
});
