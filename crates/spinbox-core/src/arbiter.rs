#![forbid(unsafe_code)]

//! Interaction arbiter: device events in, effects out.
//!
//! [`SpinArbiter`] is the transition function of the spin button. It decides
//! which device events step the value, keeps keyboard auto-repeat and the
//! custom repeat timer from fighting each other, and emits exactly one
//! [`Effect::Commit`] per finished gesture.
//!
//! # Gestures
//!
//! | Gesture | Starts on | Repeats via | Commits on |
//! |---------|-----------|-------------|------------|
//! | Arrow key hold | `Up`/`Down` press | repeat timer | key release |
//! | Page key | `PageUp`/`PageDown` press | native key repeat | key release |
//! | Home/End | press | none | key release |
//! | Button hold | primary pointer down on a button | repeat timer | pointer release anywhere |
//!
//! # Invariants
//!
//! 1. While `key_is_down` is set, further presses of handled keys are
//!    consumed without stepping (OS auto-repeat never re-arms the timer).
//! 2. `SubscribeRelease` is never emitted twice without an intervening
//!    `UnsubscribeRelease`.
//! 3. Losing focus, becoming disabled or read-only, and teardown leave the
//!    repeat timer idle, the release subscription off, and `key_is_down`
//!    clear, without committing.
//! 4. No value-mutating effect is emitted while disabled or read-only.
//!
//! # Failure Modes
//!
//! - A key release without a matching press still commits. The commit
//!   carries whatever value is current, so this is harmless.
//! - A pointer release that arrives while no release subscription is active
//!   (for example after a blur cancelled the gesture) is ignored.

use crate::effect::Effect;
use crate::event::{KeyCode, KeyEvent, KeyEventKind, PointerEvent, PointerPhase, SpinEvent};
use crate::repeat::{RepeatConfig, RepeatTimer};
use crate::stepping::{Bound, Direction};

/// What a handled key does when pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    /// Up/Down: single step plus custom repeat.
    Step(Direction),
    /// PageUp/PageDown: one multiplied step.
    Page(Direction),
    /// Home/End: jump to a bound.
    Jump(Bound),
}

impl KeyAction {
    const fn for_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Up => Some(Self::Step(Direction::Up)),
            KeyCode::Down => Some(Self::Step(Direction::Down)),
            KeyCode::PageUp => Some(Self::Page(Direction::Up)),
            KeyCode::PageDown => Some(Self::Page(Direction::Down)),
            KeyCode::Home => Some(Self::Jump(Bound::Min)),
            KeyCode::End => Some(Self::Jump(Bound::Max)),
            _ => None,
        }
    }
}

/// Spin button interaction state.
#[derive(Debug, Clone, Default)]
pub struct SpinArbiter {
    timer: RepeatTimer,
    key_is_down: bool,
    release_subscribed: bool,
    focused: bool,
    disabled: bool,
    readonly: bool,
}

impl SpinArbiter {
    /// Create an enabled, writable, unfocused arbiter.
    #[must_use]
    pub fn new(config: RepeatConfig) -> Self {
        Self {
            timer: RepeatTimer::new(config),
            ..Self::default()
        }
    }

    /// Set the initial disabled flag (builder).
    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the initial read-only flag (builder).
    #[must_use]
    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    /// Feed one event and return the effects to execute, in order.
    pub fn handle(&mut self, event: &SpinEvent) -> Vec<Effect> {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("spin.arbiter", event = event.name()).entered();

        let effects = match event {
            SpinEvent::Key(key) => self.on_key(key),
            SpinEvent::Pointer(pointer) => self.on_pointer(pointer),
            SpinEvent::Timer(handle) => {
                if self.is_interactive() {
                    self.timer.fire(*handle)
                } else {
                    Vec::new()
                }
            }
            SpinEvent::Focus(true) => {
                self.focused = !self.disabled;
                Vec::new()
            }
            SpinEvent::Focus(false) => {
                self.focused = false;
                self.clear_repeat()
            }
            SpinEvent::SetDisabled(disabled) => {
                self.disabled = *disabled;
                if *disabled {
                    self.focused = false;
                    self.clear_repeat()
                } else {
                    Vec::new()
                }
            }
            SpinEvent::SetReadonly(readonly) => {
                self.readonly = *readonly;
                if *readonly {
                    self.clear_repeat()
                } else {
                    Vec::new()
                }
            }
            SpinEvent::Teardown => self.clear_repeat(),
        };

        #[cfg(feature = "tracing")]
        if !effects.is_empty() {
            tracing::trace!(effects = effects.len(), key_is_down = self.key_is_down, "handled");
        }

        effects
    }

    fn on_key(&mut self, key: &KeyEvent) -> Vec<Effect> {
        let Some(action) = KeyAction::for_code(key.code) else {
            return Vec::new();
        };
        if !self.is_interactive() || key.has_command_modifier() {
            return Vec::new();
        }

        if key.kind == KeyEventKind::Release {
            let mut out = vec![Effect::Consume];
            out.extend(self.timer.reset());
            self.key_is_down = false;
            out.push(Effect::Commit);
            return out;
        }

        let mut out = vec![Effect::Consume];
        if self.key_is_down {
            return out;
        }
        out.extend(self.timer.reset());

        match action {
            KeyAction::Step(direction) => {
                self.key_is_down = true;
                out.extend(self.timer.start(direction, true));
            }
            KeyAction::Page(direction) => out.push(Effect::Step {
                direction,
                magnitude: self.timer.config().step_multiplier,
            }),
            KeyAction::Jump(bound) => out.push(Effect::Jump(bound)),
        }
        out
    }

    fn on_pointer(&mut self, pointer: &PointerEvent) -> Vec<Effect> {
        if !pointer.device.is_primary() {
            return Vec::new();
        }

        match pointer.phase {
            PointerPhase::Down => {
                let Some(direction) = pointer.target.direction() else {
                    return Vec::new();
                };
                if !self.is_interactive() {
                    return Vec::new();
                }
                // Pressing a button focuses the control.
                self.focused = true;
                let mut out = vec![Effect::Consume];
                out.extend(self.timer.reset());
                if !self.release_subscribed {
                    self.release_subscribed = true;
                    out.push(Effect::SubscribeRelease);
                }
                out.extend(self.timer.start(direction, true));
                out
            }
            PointerPhase::Up => {
                if !self.release_subscribed {
                    return Vec::new();
                }
                let mut out = self.timer.reset();
                self.release_subscribed = false;
                out.push(Effect::UnsubscribeRelease);
                out.push(Effect::Commit);
                out
            }
        }
    }

    /// Cancel any gesture in progress without committing.
    fn clear_repeat(&mut self) -> Vec<Effect> {
        let mut out = self.timer.reset();
        if self.release_subscribed {
            self.release_subscribed = false;
            out.push(Effect::UnsubscribeRelease);
        }
        self.key_is_down = false;
        out
    }

    /// Neither disabled nor read-only.
    #[inline]
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        !self.disabled && !self.readonly
    }

    /// Whether an arrow key is being held.
    #[inline]
    #[must_use]
    pub fn key_is_down(&self) -> bool {
        self.key_is_down
    }

    /// Whether the page-level pointer-release listener should be active.
    #[inline]
    #[must_use]
    pub fn release_subscribed(&self) -> bool {
        self.release_subscribed
    }

    /// Whether the control has focus.
    #[inline]
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the control is disabled.
    #[inline]
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the control is read-only.
    #[inline]
    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// The repeat timer.
    #[must_use]
    pub fn timer(&self) -> &RepeatTimer {
        &self.timer
    }

    /// Current repeat configuration.
    #[must_use]
    pub fn repeat_config(&self) -> &RepeatConfig {
        self.timer.config()
    }

    /// Replace the repeat configuration. A running cycle keeps its timers.
    pub fn set_repeat_config(&mut self, config: RepeatConfig) {
        self.timer.set_config(config);
    }
}
