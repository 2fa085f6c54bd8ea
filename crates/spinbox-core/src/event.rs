#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The widget shell translates whatever its host delivers (DOM events,
//! terminal input, winit events) into these types before handing them to the
//! [`SpinArbiter`](crate::arbiter::SpinArbiter). All events derive `Clone`,
//! `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the host cannot distinguish.
//! - OS key auto-repeat arrives as `KeyEventKind::Repeat` (or as a second
//!   `Press` on hosts that cannot tell them apart; the arbiter treats both
//!   the same way).
//! - Pointer releases are delivered for the whole page, not just the control,
//!   while the arbiter holds its release subscription.

use bitflags::bitflags;

use crate::effect::TimerHandle;
use crate::stepping::Direction;

/// Event consumed by the arbiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinEvent {
    /// A keyboard event while the control has focus.
    Key(KeyEvent),

    /// A pointer (mouse or touch) event.
    Pointer(PointerEvent),

    /// A timer previously armed through an effect has fired.
    Timer(TimerHandle),

    /// Focus gained or lost.
    ///
    /// `true` = focus gained, `false` = focus lost.
    Focus(bool),

    /// The control was enabled or disabled.
    SetDisabled(bool),

    /// The control became read-only or writable.
    SetReadonly(bool),

    /// The control is being destroyed or deactivated.
    Teardown,
}

impl SpinEvent {
    /// Short label for tracing.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Key(key) => match key.kind {
                KeyEventKind::Press => "key_press",
                KeyEventKind::Repeat => "key_repeat",
                KeyEventKind::Release => "key_release",
            },
            Self::Pointer(pointer) => match pointer.phase {
                PointerPhase::Down => "pointer_down",
                PointerPhase::Up => "pointer_up",
            },
            Self::Timer(_) => "timer",
            Self::Focus(_) => "focus",
            Self::SetDisabled(_) => "set_disabled",
            Self::SetReadonly(_) => "set_readonly",
            Self::Teardown => "teardown",
        }
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,

    /// The type of key event (press, repeat, or release).
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a new key event with default modifiers and Press kind.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: Modifiers::NONE,
            kind: KeyEventKind::Press,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Create a key event with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for a release of `code`.
    #[must_use]
    pub const fn release(code: KeyCode) -> Self {
        Self::new(code).with_kind(KeyEventKind::Release)
    }

    /// Check if Ctrl modifier is held.
    #[must_use]
    pub const fn ctrl(&self) -> bool {
        self.modifiers.contains(Modifiers::CTRL)
    }

    /// Check if Alt modifier is held.
    #[must_use]
    pub const fn alt(&self) -> bool {
        self.modifiers.contains(Modifiers::ALT)
    }

    /// Check if Shift modifier is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }

    /// Check if Super/Meta/Cmd modifier is held.
    #[must_use]
    pub const fn super_key(&self) -> bool {
        self.modifiers.contains(Modifiers::SUPER)
    }

    /// Alt, Ctrl, or Super held: the spin button leaves such keys alone so
    /// browser and OS shortcuts keep working.
    #[must_use]
    pub const fn has_command_modifier(&self) -> bool {
        self.modifiers.intersects(Modifiers::COMMAND)
    }
}

/// Key codes for keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A regular character key.
    Char(char),

    /// Enter/Return key.
    Enter,

    /// Escape key.
    Escape,

    /// Tab key.
    Tab,

    /// Home key.
    Home,

    /// End key.
    End,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,
}

/// The type of key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (OS repeat event).
    Repeat,

    /// Key was released.
    Release,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
        /// Super/Meta/Command key.
        const SUPER = 0b1000;
        /// Modifiers that turn a key into a shortcut.
        const COMMAND = Self::ALT.bits() | Self::CTRL.bits() | Self::SUPER.bits();
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

/// A pointer event on (or, for releases, anywhere around) the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// Press or release.
    pub phase: PointerPhase,

    /// Which device produced the event.
    pub device: PointerDevice,

    /// Which part of the control is under the pointer.
    pub target: PointerTarget,
}

impl PointerEvent {
    /// Create a pointer event.
    #[must_use]
    pub const fn new(phase: PointerPhase, device: PointerDevice, target: PointerTarget) -> Self {
        Self {
            phase,
            device,
            target,
        }
    }

    /// Primary mouse button pressed on `target`.
    #[must_use]
    pub const fn press(target: PointerTarget) -> Self {
        Self::new(
            PointerPhase::Down,
            PointerDevice::Mouse(MouseButton::Left),
            target,
        )
    }

    /// Primary mouse button released over `target`.
    #[must_use]
    pub const fn release(target: PointerTarget) -> Self {
        Self::new(
            PointerPhase::Up,
            PointerDevice::Mouse(MouseButton::Left),
            target,
        )
    }

    /// Same event from a touch screen.
    #[must_use]
    pub const fn touch(mut self) -> Self {
        self.device = PointerDevice::Touch;
        self
    }
}

/// Pointer press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// Button pressed or finger down.
    Down,
    /// Button released or finger lifted.
    Up,
}

/// The device behind a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerDevice {
    /// A mouse button.
    Mouse(MouseButton),
    /// A single touch point.
    Touch,
}

impl PointerDevice {
    /// Touches and the left mouse button drive the control; other buttons
    /// are ignored.
    #[must_use]
    pub const fn is_primary(self) -> bool {
        matches!(self, Self::Touch | Self::Mouse(MouseButton::Left))
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button.
    Left,

    /// Right mouse button.
    Right,

    /// Middle mouse button (scroll wheel click).
    Middle,
}

/// Part of the control a pointer event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerTarget {
    /// The increment button.
    Increment,
    /// The decrement button.
    Decrement,
    /// Anywhere else on the page.
    Elsewhere,
}

impl PointerTarget {
    /// The stepping direction of a button target.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Self::Increment => Some(Direction::Up),
            Self::Decrement => Some(Direction::Down),
            Self::Elsewhere => None,
        }
    }
}
