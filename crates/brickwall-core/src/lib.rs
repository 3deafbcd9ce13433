#![forbid(unsafe_code)]

//! Core: geometry primitives and canonical pointer events.
//!
//! # Role in Brickwall
//! `brickwall-core` is the vocabulary layer. It owns the viewport-space
//! geometry used for every hit-test and placement, and the pointer event
//! type the controller consumes.
//!
//! # How it fits in the system
//! `brickwall-layout` builds items, zones and the flow-packing reflow on top
//! of these primitives, and `brickwall` drives them from pointer events.

pub mod event;
pub mod geometry;

pub use event::{Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use geometry::{Offset, Point, Rect, Size};
