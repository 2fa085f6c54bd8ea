#![forbid(unsafe_code)]

//! The spin button widget shell.
//!
//! [`SpinButton`] owns the value and executes the effects produced by the
//! core: it steps the value, arms timers in its [`TimerQueue`], tracks the
//! page-level release subscription, and queues notifications for the host.
//!
//! # Host loop
//!
//! ```
//! use spinbox::prelude::*;
//! use web_time::{Duration, Instant};
//!
//! let mut spin = SpinButton::new(SpinConfig::default()).with_value(Some(5.0));
//! let t0 = Instant::now();
//!
//! spin.handle_event(&SpinEvent::Key(KeyEvent::new(KeyCode::Up)), t0);
//! spin.tick(t0 + Duration::from_millis(500)); // delay elapses
//! spin.tick(t0 + Duration::from_millis(600)); // first repeat
//! spin.handle_event(&SpinEvent::Key(KeyEvent::release(KeyCode::Up)), t0);
//!
//! assert_eq!(spin.value(), Some(7.0));
//! let changed: Vec<_> = spin
//!     .drain_notifications()
//!     .into_iter()
//!     .filter(|n| matches!(n, SpinNotification::Changed(_)))
//!     .collect();
//! assert_eq!(changed, vec![SpinNotification::Changed(Some(7.0))]);
//! ```
//!
//! # Invariants
//!
//! 1. The stored value is `None` or finite.
//! 2. `Input` is queued exactly when the stored value changes.
//! 3. `Changed` is queued once per completed gesture, never on blur, disable,
//!    read-only, or teardown.
//! 4. After `teardown` (or drop) no timer remains armed.

use std::fmt;

use spinbox_core::arbiter::SpinArbiter;
use spinbox_core::effect::Effect;
use spinbox_core::event::SpinEvent;
use spinbox_core::stepping::{self, SpinRange};
use spinbox_i18n::{NumberFormatter, ValueFormatter};
use web_time::Instant;

use crate::config::{SpinConfig, SpinOptions};
use crate::error::ShellError;
use crate::timer::TimerQueue;

/// ARIA role exposed by the control.
pub const ROLE: &str = "spinbutton";

/// Host-side focus control.
///
/// Both calls are best effort: the shell logs a returned error and carries
/// on.
pub trait FocusSurface {
    /// Move keyboard focus to the control.
    fn focus(&mut self) -> Result<(), ShellError>;

    /// Remove keyboard focus from the control.
    fn blur(&mut self) -> Result<(), ShellError>;
}

/// Notification queued for the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpinNotification {
    /// The value changed (every mutation; for live binding).
    Input(Option<f64>),
    /// A gesture finished; carries the settled value.
    Changed(Option<f64>),
}

/// Result of feeding one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventOutcome {
    /// The event was handled; the host should suppress its default action.
    pub consumed: bool,
}

/// Validity indicator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Validity {
    /// Nothing to flag.
    Valid,
    /// Out of range, required but empty, or explicitly invalid.
    Invalid,
}

/// Button layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    /// Decrement left, increment right.
    #[default]
    Horizontal,
    /// Increment above, decrement below.
    Vertical,
}

impl Orientation {
    /// `aria-orientation` value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Accessibility attributes for the control.
#[derive(Debug, Clone, PartialEq)]
pub struct SpinAccessibility {
    /// Always [`ROLE`].
    pub role: &'static str,
    /// `aria-valuemin`.
    pub value_min: f64,
    /// `aria-valuemax` (grid-snapped).
    pub value_max: f64,
    /// `aria-valuenow`; absent for the empty value.
    pub value_now: Option<f64>,
    /// `aria-valuetext`; the formatted value, absent when empty.
    pub value_text: Option<String>,
    /// `aria-invalid`: explicitly invalid, or required and empty.
    pub invalid: bool,
    /// `aria-required`.
    pub required: bool,
    /// `aria-disabled`.
    pub disabled: bool,
    /// `aria-readonly`.
    pub readonly: bool,
    /// `aria-orientation`.
    pub orientation: Orientation,
    /// Right-to-left locale.
    pub rtl: bool,
}

enum Formatter {
    Locale(NumberFormatter),
    Custom(Box<dyn ValueFormatter>),
}

impl Formatter {
    fn format(&self, value: f64) -> String {
        match self {
            Self::Locale(formatter) => formatter.format_value(value),
            Self::Custom(formatter) => formatter.format(value),
        }
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Locale(formatter) => f.debug_tuple("Locale").field(formatter).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Numeric spin button.
#[derive(Debug)]
pub struct SpinButton {
    config: SpinConfig,
    arbiter: SpinArbiter,
    value: Option<f64>,
    formatter: Formatter,
    timers: TimerQueue,
    notifications: Vec<SpinNotification>,
}

impl Default for SpinButton {
    fn default() -> Self {
        Self::new(SpinConfig::default())
    }
}

impl SpinButton {
    /// Create an empty spin button.
    #[must_use]
    pub fn new(config: SpinConfig) -> Self {
        let arbiter = SpinArbiter::new(config.repeat)
            .with_disabled(config.disabled)
            .with_readonly(config.readonly);
        let formatter = Formatter::Locale(NumberFormatter::new(
            config.locale.clone(),
            config.range.precision(),
        ));
        Self {
            config,
            arbiter,
            value: None,
            formatter,
            timers: TimerQueue::new(),
            notifications: Vec::new(),
        }
    }

    /// Create from raw options, including the initial value.
    #[must_use]
    pub fn from_options(options: &SpinOptions) -> Self {
        Self::new(options.resolve()).with_value(options.initial_value())
    }

    /// Set the initial value without notifying (builder).
    #[must_use]
    pub fn with_value(mut self, value: Option<f64>) -> Self {
        self.value = normalize(value);
        self
    }

    /// Replace the locale formatter (builder).
    #[must_use]
    pub fn with_formatter(mut self, formatter: impl ValueFormatter + 'static) -> Self {
        self.formatter = Formatter::Custom(Box::new(formatter));
        self
    }

    // ---------- Value ----------

    /// Current value; `None` is empty.
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Assign a value. Non-finite values clear it.
    pub fn set_value(&mut self, value: Option<f64>) {
        self.assign(normalize(value));
    }

    /// Assign from text; unparsable text clears the value.
    pub fn set_value_str(&mut self, raw: &str) {
        self.assign(spinbox_core::coerce::coerce_number(raw, None));
    }

    /// Locale-independent fixed-decimal text for form submission.
    #[must_use]
    pub fn fixed_value(&self) -> String {
        stepping::fixed_string(self.value, self.config.range.precision())
    }

    /// Display text; empty for the empty value.
    #[must_use]
    pub fn formatted_value(&self) -> String {
        self.value
            .map(|value| self.formatter.format(value))
            .unwrap_or_default()
    }

    /// Step up by `multiplier` steps. No-op while disabled.
    pub fn step_up(&mut self, multiplier: u32) {
        if self.config.disabled {
            return;
        }
        let next = stepping::step_up(self.value, multiplier, &self.config.range);
        self.assign(Some(next));
    }

    /// Step down by `multiplier` steps. No-op while disabled.
    pub fn step_down(&mut self, multiplier: u32) {
        if self.config.disabled {
            return;
        }
        let next = stepping::step_down(self.value, multiplier, &self.config.range);
        self.assign(Some(next));
    }

    fn assign(&mut self, value: Option<f64>) {
        if self.value != value {
            self.value = value;
            self.notifications.push(SpinNotification::Input(value));
        }
    }

    // ---------- Events ----------

    /// Feed a device or lifecycle event received at `now`.
    ///
    /// `SetDisabled` and `SetReadonly` also update [`config`](Self::config),
    /// so every guard and attribute sees the same flags.
    pub fn handle_event(&mut self, event: &SpinEvent, now: Instant) -> EventOutcome {
        match *event {
            SpinEvent::SetDisabled(disabled) => self.config.disabled = disabled,
            SpinEvent::SetReadonly(readonly) => self.config.readonly = readonly,
            _ => {}
        }
        let effects = self.arbiter.handle(event);
        self.apply(effects, now)
    }

    /// Fire every timer due at `now`. Returns the number fired.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.timers.poll(now);
        let fired = due.len();
        for (handle, deadline) in due {
            tracing::trace!(timer_id = handle.id(), kind = ?handle.kind(), "spinbutton.timer");
            let effects = self.arbiter.handle(&SpinEvent::Timer(handle));
            // Timers armed in response are scheduled from the firing's own
            // deadline so a late tick does not stretch the cadence.
            self.apply(effects, deadline);
        }
        fired
    }

    /// When the host should call [`tick`](Self::tick) next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn apply(&mut self, effects: Vec<Effect>, base: Instant) -> EventOutcome {
        let mut outcome = EventOutcome::default();
        for effect in effects {
            match effect {
                Effect::Step {
                    direction,
                    magnitude,
                } => {
                    let next = stepping::step(self.value, direction, magnitude, &self.config.range);
                    self.assign(Some(next));
                }
                Effect::Jump(bound) => {
                    self.assign(Some(stepping::jump(bound, &self.config.range)));
                }
                Effect::ArmTimer {
                    handle,
                    after,
                    repeating,
                } => self.timers.arm(handle, base + after, repeating.then_some(after)),
                Effect::CancelTimer(handle) => {
                    self.timers.cancel(handle);
                }
                Effect::SubscribeRelease => tracing::trace!("spinbutton.release_subscribed"),
                Effect::UnsubscribeRelease => tracing::trace!("spinbutton.release_unsubscribed"),
                Effect::Commit => self.commit(),
                Effect::Consume => outcome.consumed = true,
            }
        }
        outcome
    }

    fn commit(&mut self) {
        let _span = tracing::debug_span!(
            "spinbutton.commit",
            value = self.value.unwrap_or(f64::NAN),
            empty = self.value.is_none()
        )
        .entered();
        self.notifications.push(SpinNotification::Changed(self.value));
    }

    /// Take all queued notifications, oldest first.
    pub fn drain_notifications(&mut self) -> Vec<SpinNotification> {
        std::mem::take(&mut self.notifications)
    }

    // ---------- State ----------

    /// Enable or disable the control. Disabling cancels any gesture and
    /// drops focus.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.handle_event(&SpinEvent::SetDisabled(disabled), Instant::now());
    }

    /// Toggle read-only. Becoming read-only cancels any gesture.
    pub fn set_readonly(&mut self, readonly: bool) {
        self.handle_event(&SpinEvent::SetReadonly(readonly), Instant::now());
    }

    /// Record a focus change reported by the host.
    pub fn set_focused(&mut self, focused: bool) {
        self.handle_event(&SpinEvent::Focus(focused), Instant::now());
    }

    /// Ask the host to focus the control. Skipped while disabled; errors are
    /// logged and swallowed.
    pub fn focus(&mut self, surface: &mut dyn FocusSurface) {
        if self.config.disabled {
            return;
        }
        match surface.focus() {
            Ok(()) => self.set_focused(true),
            Err(err) => tracing::debug!(
                error = %err,
                error_type = err.error_type(),
                "spinbutton.focus failed"
            ),
        }
    }

    /// Ask the host to blur the control. Errors are logged and swallowed.
    pub fn blur(&mut self, surface: &mut dyn FocusSurface) {
        match surface.blur() {
            Ok(()) => self.set_focused(false),
            Err(err) => tracing::debug!(
                error = %err,
                error_type = err.error_type(),
                "spinbutton.blur failed"
            ),
        }
    }

    /// Cancel any gesture and disarm every timer. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.handle_event(&SpinEvent::Teardown, Instant::now());
        self.timers.clear();
    }

    /// Replace the configuration. The value is kept as is.
    pub fn set_config(&mut self, config: SpinConfig) {
        if let Formatter::Locale(_) = self.formatter {
            self.formatter = Formatter::Locale(NumberFormatter::new(
                config.locale.clone(),
                config.range.precision(),
            ));
        }
        self.arbiter.set_repeat_config(config.repeat);

        let disabled = config.disabled;
        let readonly = config.readonly;
        let was_disabled = self.config.disabled;
        let was_readonly = self.config.readonly;
        self.config = config;

        if disabled != was_disabled {
            self.handle_event(&SpinEvent::SetDisabled(disabled), Instant::now());
        }
        if readonly != was_readonly {
            self.handle_event(&SpinEvent::SetReadonly(readonly), Instant::now());
        }
    }

    // ---------- Queries ----------

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> &SpinConfig {
        &self.config
    }

    /// Resolved range.
    #[must_use]
    pub fn range(&self) -> &SpinRange {
        &self.config.range
    }

    /// Whether the host should deliver page-level pointer releases.
    #[must_use]
    pub fn wants_release_events(&self) -> bool {
        self.arbiter.release_subscribed()
    }

    /// Whether a press-and-hold cycle is running.
    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.arbiter.timer().is_active()
    }

    /// Whether the control has focus.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.arbiter.is_focused()
    }

    /// Number of armed timers.
    #[must_use]
    pub fn armed_timers(&self) -> usize {
        self.timers.len()
    }

    /// Validity indicator state.
    ///
    /// An explicit `state` wins; otherwise out-of-range and required-but-empty
    /// values are flagged.
    #[must_use]
    pub fn validity(&self) -> Validity {
        match self.config.state {
            Some(true) => Validity::Valid,
            Some(false) => Validity::Invalid,
            None => {
                let out_of_range = self.config.range.is_out_of_range(self.value);
                let missing = self.config.required && self.value.is_none();
                if out_of_range || missing {
                    Validity::Invalid
                } else {
                    Validity::Valid
                }
            }
        }
    }

    /// Accessibility attributes.
    #[must_use]
    pub fn accessibility(&self) -> SpinAccessibility {
        SpinAccessibility {
            role: ROLE,
            value_min: self.config.range.min(),
            value_max: self.config.range.max(),
            value_now: self.value,
            value_text: self.value.map(|value| self.formatter.format(value)),
            invalid: self.aria_invalid(),
            required: self.config.required,
            disabled: self.config.disabled,
            readonly: self.config.readonly,
            orientation: if self.config.vertical {
                Orientation::Vertical
            } else {
                Orientation::Horizontal
            },
            rtl: self.config.locale.is_rtl(),
        }
    }

    /// `aria-invalid`: explicitly invalid, or required and empty. Range
    /// violations only reach the validity indicator.
    fn aria_invalid(&self) -> bool {
        self.config.state == Some(false) || (self.config.required && self.value.is_none())
    }

    /// Hidden form field `(name, fixed value)` when a name is configured.
    ///
    /// Disabled controls are not submitted.
    #[must_use]
    pub fn form_field(&self) -> Option<(&str, String)> {
        if self.config.disabled {
            return None;
        }
        self.config
            .name
            .as_deref()
            .map(|name| (name, self.fixed_value()))
    }
}

impl Drop for SpinButton {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn normalize(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite()).map(|v| v + 0.0)
}
