#![forbid(unsafe_code)]

//! Internationalization (i18n) for Spinbox.
//!
//! Provides BCP 47-style locale parsing with fallback chains, writing
//! direction detection, and locale-aware fixed-decimal number formatting.
//!
//! # Role in Spinbox
//! `spinbox-i18n` keeps display concerns out of the stepping engine. The
//! engine only ever sees `f64`; this crate turns values into the text a
//! spin button shows and announces.
//!
//! # How it fits in the system
//! The `spinbox` widget shell resolves its configured [`Locale`] into a
//! [`NumberFormatter`] whenever the step precision changes. Hosts can swap in
//! any [`ValueFormatter`], including a plain closure.

pub mod locale;
pub mod number;

pub use locale::Locale;
pub use number::{Digits, NumberFormatter, NumberSymbols, ValueFormatter};
