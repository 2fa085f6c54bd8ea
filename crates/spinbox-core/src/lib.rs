#![forbid(unsafe_code)]

//! Core: stepping arithmetic, auto-repeat, and input arbitration for numeric
//! spin buttons.
//!
//! # Role in Spinbox
//! `spinbox-core` is the framework-agnostic engine. It owns no clock, no
//! value, and no display; every transition is a pure function of its inputs
//! plus a small amount of explicit state, so the whole control can be driven
//! and tested without an event loop.
//!
//! # Primary responsibilities
//! - **Coercion**: turn loosely-typed configuration into finite numbers.
//! - **Stepping**: grid-snapped, precision-rounded stepping with clamp/wrap.
//! - **Repeat**: press-and-hold delay/interval timer with acceleration.
//! - **Arbiter**: device events in, [`Effect`]s out, one commit per gesture.
//!
//! # How it fits in the system
//! The `spinbox` crate wraps these pieces in a `SpinButton` that stores the
//! value, runs the timers against wall-clock instants, and emits `input` and
//! `changed` notifications. Hosts with their own widget layer can drive
//! [`SpinArbiter`] directly and execute the effects themselves.

pub mod arbiter;
pub mod coerce;
pub mod effect;
pub mod event;
pub mod repeat;
pub mod stepping;

pub use arbiter::SpinArbiter;
pub use effect::{Effect, TimerHandle, TimerKind};
pub use event::{
    KeyCode, KeyEvent, KeyEventKind, Modifiers, MouseButton, PointerDevice, PointerEvent,
    PointerPhase, PointerTarget, SpinEvent,
};
pub use repeat::{RepeatConfig, RepeatPhase, RepeatTimer};
pub use stepping::{Bound, Direction, SpinRange};
