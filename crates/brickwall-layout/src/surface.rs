#![forbid(unsafe_code)]

//! Host surface seam.
//!
//! The reflow engine never owns visual elements. Every geometry query and
//! every presentation change goes through [`Surface`], which a host
//! implements over its element tree (DOM nodes in a browser binding, the
//! in-memory [`SceneTree`](crate::scene::SceneTree) elsewhere).
//!
//! Queries must reflect the current layout at call time: the engine never
//! caches bounds across a mutation.

use std::fmt;
use std::time::Duration;

use brickwall_core::geometry::{Offset, Rect, Size};
use serde::{Deserialize, Serialize};

/// Opaque handle to a host element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(u32);

impl ElementId {
    /// Wrap a raw host handle.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw handle value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stacking layer of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    /// Normal stacking.
    #[default]
    Resting,
    /// Above every other item, used while dragging.
    Lifted,
}

/// Pointer cursor shown over an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cursor {
    /// Host default, before the engine touched the element.
    #[default]
    Default,
    /// Item can be picked up.
    Grab,
    /// Item is being carried.
    Grabbing,
}

/// Left/right border thickness.
///
/// `None` stands for a border the host could not resolve to a number; it
/// counts as zero.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HorizontalBorders {
    pub left: Option<f64>,
    pub right: Option<f64>,
}

impl HorizontalBorders {
    /// Borders of equal width on both sides.
    #[must_use]
    pub const fn both(width: f64) -> Self {
        Self {
            left: Some(width),
            right: Some(width),
        }
    }

    /// Sum of both sides, treating unset or non-finite values as zero.
    #[must_use]
    pub fn total(&self) -> f64 {
        fn resolved(value: Option<f64>) -> f64 {
            value.filter(|v| v.is_finite()).unwrap_or(0.0)
        }
        resolved(self.left) + resolved(self.right)
    }
}

/// Element tree and presentation sink provided by the host.
pub trait Surface {
    /// Viewport-space bounding rectangle of `element`.
    fn bounds(&self, element: ElementId) -> Rect;

    /// The element's structural parent, if any.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Immediate element children in document order.
    fn children(&self, element: ElementId) -> Vec<ElementId>;

    /// Identifier attribute (e.g. a DOM `id`).
    fn identifier(&self, element: ElementId) -> Option<&str>;

    /// Intrinsic content width, excluding borders.
    fn content_width(&self, element: ElementId) -> f64;

    /// Inner size, excluding borders.
    fn client_size(&self, element: ElementId) -> Size;

    fn borders(&self, element: ElementId) -> HorizontalBorders;

    /// Minimum-height style currently applied to a container.
    fn min_height(&self, element: ElementId) -> Option<f64>;

    /// Position `element` at `offset` relative to its parent's origin.
    fn set_offset(&mut self, element: ElementId, offset: Offset);

    /// Transition used for position changes; `None` snaps immediately.
    fn set_transition(&mut self, element: ElementId, transition: Option<Duration>);

    fn set_layer(&mut self, element: ElementId, layer: Layer);

    fn set_cursor(&mut self, element: ElementId, cursor: Cursor);

    /// Set a container's rendered height.
    fn set_height(&mut self, element: ElementId, height: f64);

    fn set_min_height(&mut self, element: ElementId, height: f64);

    /// Transition used for container height changes.
    fn set_height_transition(&mut self, element: ElementId, transition: Option<Duration>);
}
