#![forbid(unsafe_code)]

//! Spinbox error model.
//!
//! # Design Principles
//!
//! 1. **Nothing fails in the engine**: configuration is coerced, values are
//!    normalized, and stepping is total. The only fallible operations are the
//!    host calls the shell makes on a [`FocusSurface`](crate::FocusSurface).
//! 2. **Best effort**: the shell logs host errors and carries on. Errors are
//!    typed so hosts implementing `FocusSurface` can report precisely.
//! 3. **Observability**: [`ShellError::error_type`] gives a stable label for
//!    tracing fields without the error depending on tracing.

use std::fmt;

/// Failure reported by the host when the shell asks it to move focus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// No display surface is active (headless, not yet mounted).
    NoSurface,
    /// The control has been removed from its surface.
    Detached,
    /// The host refused the request.
    Rejected(String),
}

/// Result type for host-facing shell operations.
pub type Result<T> = std::result::Result<T, ShellError>;

impl ShellError {
    /// Error type label for tracing.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::NoSurface => "no_surface",
            Self::Detached => "detached",
            Self::Rejected(_) => "rejected",
        }
    }

    /// Whether retrying later could succeed.
    ///
    /// A detached control will never regain a surface.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Detached)
    }
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSurface => write!(f, "no active display surface"),
            Self::Detached => write!(f, "control is detached from its surface"),
            Self::Rejected(reason) => write!(f, "host rejected request: {reason}"),
        }
    }
}

impl std::error::Error for ShellError {}
