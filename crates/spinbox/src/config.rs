#![forbid(unsafe_code)]

//! Spin button configuration.
//!
//! Two layers, as with the repeat settings in `spinbox-core`:
//!
//! - [`SpinConfig`]: typed, already valid. Built with `Default` + `with_*`.
//! - [`SpinOptions`]: raw text exactly as a host received it (attributes,
//!   form data, bindings). [`SpinOptions::resolve`] coerces every field
//!   independently; an unparsable field falls back to its default and never
//!   affects the others.
//!
//! # Environment Variables
//!
//! [`SpinConfig::from_env`] reads the `SPINBOX_REPEAT_*` variables (see
//! [`RepeatConfig::from_env`]) and the numeric locale from `LC_ALL`,
//! `LC_NUMERIC`, or `LANG`.

use spinbox_core::coerce::coerce_number;
use spinbox_core::repeat::RepeatConfig;
use spinbox_core::stepping::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP, SpinRange};
use spinbox_i18n::Locale;

/// Typed spin button configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinConfig {
    /// Bounds, step, and wrap.
    pub range: SpinRange,
    /// Auto-repeat timing.
    pub repeat: RepeatConfig,
    /// Ignore all interaction and refuse focus.
    pub disabled: bool,
    /// Show the value but ignore interaction.
    pub readonly: bool,
    /// An empty value is invalid.
    pub required: bool,
    /// Lay the buttons out vertically.
    pub vertical: bool,
    /// Explicit validity override: `Some(true)` valid, `Some(false)` invalid.
    pub state: Option<bool>,
    /// Form field name for submission.
    pub name: Option<String>,
    /// Display locale.
    pub locale: Locale,
}

impl Default for SpinConfig {
    fn default() -> Self {
        Self {
            range: SpinRange::default(),
            repeat: RepeatConfig::default(),
            disabled: false,
            readonly: false,
            required: false,
            vertical: false,
            state: None,
            name: None,
            locale: Locale::default(),
        }
    }
}

impl SpinConfig {
    /// Default config with repeat timing and locale taken from the
    /// environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            repeat: RepeatConfig::from_env(),
            locale: Locale::from_env(),
            ..Self::default()
        }
    }

    /// Set the range (builder).
    #[must_use]
    pub fn with_range(mut self, range: SpinRange) -> Self {
        self.range = range;
        self
    }

    /// Set the repeat timing (builder).
    #[must_use]
    pub fn with_repeat(mut self, repeat: RepeatConfig) -> Self {
        self.repeat = repeat;
        self
    }

    /// Set the disabled flag (builder).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the read-only flag (builder).
    #[must_use]
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Set the required flag (builder).
    #[must_use]
    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set vertical orientation (builder).
    #[must_use]
    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Set the validity override (builder).
    #[must_use]
    pub fn with_state(mut self, state: Option<bool>) -> Self {
        self.state = state;
        self
    }

    /// Set the form field name (builder).
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the locale (builder).
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }
}

/// Raw, string-valued options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpinOptions {
    /// Initial value.
    pub value: Option<String>,
    /// Lower bound.
    pub min: Option<String>,
    /// Upper bound.
    pub max: Option<String>,
    /// Step size.
    pub step: Option<String>,
    /// Wrap at the bounds.
    pub wrap: bool,
    /// Disabled flag.
    pub disabled: bool,
    /// Read-only flag.
    pub readonly: bool,
    /// Required flag.
    pub required: bool,
    /// Vertical orientation.
    pub vertical: bool,
    /// Validity override.
    pub state: Option<bool>,
    /// Form field name.
    pub name: Option<String>,
    /// Locale tag.
    pub locale: Option<String>,
    /// Initial repeat delay in milliseconds.
    pub repeat_delay: Option<String>,
    /// Repeat interval in milliseconds.
    pub repeat_interval: Option<String>,
    /// Single-step ticks before acceleration.
    pub repeat_threshold: Option<String>,
    /// Accelerated step multiplier.
    pub repeat_step_multiplier: Option<String>,
}

impl SpinOptions {
    /// Empty options: every field takes its default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the raw initial value (builder).
    #[must_use]
    pub fn value(mut self, raw: impl ToString) -> Self {
        self.value = Some(raw.to_string());
        self
    }

    /// Set the raw lower bound (builder).
    #[must_use]
    pub fn min(mut self, raw: impl ToString) -> Self {
        self.min = Some(raw.to_string());
        self
    }

    /// Set the raw upper bound (builder).
    #[must_use]
    pub fn max(mut self, raw: impl ToString) -> Self {
        self.max = Some(raw.to_string());
        self
    }

    /// Set the raw step (builder).
    #[must_use]
    pub fn step(mut self, raw: impl ToString) -> Self {
        self.step = Some(raw.to_string());
        self
    }

    /// Set wrap (builder).
    #[must_use]
    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    /// Set disabled (builder).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set read-only (builder).
    #[must_use]
    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Set required (builder).
    #[must_use]
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set vertical (builder).
    #[must_use]
    pub fn vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// Set the validity override (builder).
    #[must_use]
    pub fn state(mut self, state: Option<bool>) -> Self {
        self.state = state;
        self
    }

    /// Set the form field name (builder).
    #[must_use]
    pub fn name(mut self, name: impl ToString) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Set the locale tag (builder).
    #[must_use]
    pub fn locale(mut self, tag: impl ToString) -> Self {
        self.locale = Some(tag.to_string());
        self
    }

    /// Set the raw repeat delay (builder).
    #[must_use]
    pub fn repeat_delay(mut self, raw: impl ToString) -> Self {
        self.repeat_delay = Some(raw.to_string());
        self
    }

    /// Set the raw repeat interval (builder).
    #[must_use]
    pub fn repeat_interval(mut self, raw: impl ToString) -> Self {
        self.repeat_interval = Some(raw.to_string());
        self
    }

    /// Set the raw acceleration threshold (builder).
    #[must_use]
    pub fn repeat_threshold(mut self, raw: impl ToString) -> Self {
        self.repeat_threshold = Some(raw.to_string());
        self
    }

    /// Set the raw step multiplier (builder).
    #[must_use]
    pub fn repeat_step_multiplier(mut self, raw: impl ToString) -> Self {
        self.repeat_step_multiplier = Some(raw.to_string());
        self
    }

    /// The initial value, or `None` when absent or not a finite number.
    #[must_use]
    pub fn initial_value(&self) -> Option<f64> {
        self.value.as_deref().and_then(|raw| coerce_number(raw, None))
    }

    /// Coerce every field into a [`SpinConfig`].
    #[must_use]
    pub fn resolve(&self) -> SpinConfig {
        let range = SpinRange::new(
            number_or(self.min.as_deref(), DEFAULT_MIN),
            number_or(self.max.as_deref(), DEFAULT_MAX),
            number_or(self.step.as_deref(), DEFAULT_STEP),
        )
        .with_wrap(self.wrap);

        let defaults = RepeatConfig::default();
        let repeat = RepeatConfig {
            delay: self
                .repeat_delay
                .as_deref()
                .map_or(defaults.delay, RepeatConfig::coerce_delay),
            interval: self
                .repeat_interval
                .as_deref()
                .map_or(defaults.interval, RepeatConfig::coerce_interval),
            threshold: self
                .repeat_threshold
                .as_deref()
                .map_or(defaults.threshold, RepeatConfig::coerce_threshold),
            step_multiplier: self
                .repeat_step_multiplier
                .as_deref()
                .map_or(defaults.step_multiplier, RepeatConfig::coerce_step_multiplier),
        };

        SpinConfig {
            range,
            repeat,
            disabled: self.disabled,
            readonly: self.readonly,
            required: self.required,
            vertical: self.vertical,
            state: self.state,
            name: self.name.clone().filter(|name| !name.is_empty()),
            locale: self
                .locale
                .as_deref()
                .map_or_else(Locale::default, Locale::parse),
        }
    }
}

fn number_or(raw: Option<&str>, default: f64) -> f64 {
    raw.and_then(|raw| coerce_number(raw, None))
        .unwrap_or(default)
}
