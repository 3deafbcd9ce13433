#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! The host forwards document-level pointer input as [`PointerEvent`]
//! values. Positions are viewport-space (the same space as element bounds),
//! so no per-event coordinate translation is needed before hit-testing.
//!
//! # Design Notes
//!
//! - A single pointing device is modelled; touch and pen input is expected
//!   to be folded into primary-button events by the host.
//! - `Move` carries no button state; the controller tracks whether a gesture
//!   is in progress.

use bitflags::bitflags;

use crate::geometry::Point;

/// A pointer event delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The type of pointer event.
    pub kind: PointerEventKind,

    /// Pointer position in viewport space.
    pub position: Point,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[must_use]
    pub const fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::new(x, y),
            modifiers: Modifiers::NONE,
        }
    }

    /// Primary-button press at `(x, y)`.
    #[must_use]
    pub const fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down(PointerButton::Primary), x, y)
    }

    /// Pointer movement to `(x, y)`.
    #[must_use]
    pub const fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    /// Primary-button release at `(x, y)`.
    #[must_use]
    pub const fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up(PointerButton::Primary), x, y)
    }

    /// Create a pointer event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// The type of pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// Button pressed down.
    Down(PointerButton),

    /// Button released.
    Up(PointerButton),

    /// Pointer moved, with or without a button held.
    Move,
}

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left mouse button, pen contact, or touch contact.
    Primary,

    /// Right mouse button.
    Secondary,

    /// Middle mouse button.
    Auxiliary,
}

bitflags! {
    /// Modifier keys that can be held during a pointer event.
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
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}
