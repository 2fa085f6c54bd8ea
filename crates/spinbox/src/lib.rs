#![forbid(unsafe_code)]

//! Spinbox public facade crate.
//!
//! An accessible numeric spin button: keyboard and pointer stepping,
//! press-and-hold auto-repeat with acceleration, locale-aware display, and
//! exactly one `changed` notification per gesture.
//!
//! This crate provides the widget shell ([`SpinButton`]) and re-exports the
//! engine from `spinbox-core` and the formatting layer from `spinbox-i18n`.
//! Most users only need the [`prelude`].

pub mod config;
pub mod error;
pub mod timer;
pub mod widget;

// --- Shell re-exports ------------------------------------------------------

pub use config::{SpinConfig, SpinOptions};
pub use error::{Result, ShellError};
pub use timer::TimerQueue;
pub use widget::{
    EventOutcome, FocusSurface, Orientation, ROLE, SpinAccessibility, SpinButton,
    SpinNotification, Validity,
};

// --- Core re-exports -------------------------------------------------------

pub use spinbox_core::{
    Bound, Direction, Effect, KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton,
    PointerDevice, PointerEvent, PointerPhase, PointerTarget, RepeatConfig, RepeatPhase,
    SpinArbiter, SpinEvent, SpinRange, TimerHandle, TimerKind,
};

// --- i18n re-exports -------------------------------------------------------

pub use spinbox_i18n::{Locale, NumberFormatter, ValueFormatter};

/// Common imports for spin button hosts.
pub mod prelude {
    pub use crate::config::{SpinConfig, SpinOptions};
    pub use crate::error::ShellError;
    pub use crate::widget::{
        EventOutcome, FocusSurface, SpinAccessibility, SpinButton, SpinNotification, Validity,
    };
    pub use spinbox_core::{
        Direction, KeyCode, KeyEvent, KeyEventKind, Modifiers, PointerEvent, PointerTarget,
        RepeatConfig, SpinEvent, SpinRange,
    };
    pub use spinbox_i18n::{Locale, ValueFormatter};
}

pub use spinbox_core as core;
pub use spinbox_i18n as i18n;
