#![forbid(unsafe_code)]

//! A draggable block.
//!
//! An [`Item`] wraps one host element and remembers the [`Zone`] that
//! currently owns it. Items are owned by value by their zone's order list,
//! so an item can only ever sit in one list; the owner key travels with it
//! and is rewritten by [`Zone::insert_at`].
//!
//! # Coordinate spaces
//!
//! An item stays structurally under the container it was discovered in even
//! after it logically moves to another zone. Offsets are applied relative to
//! that original parent, so every placement adds the difference between the
//! owning zone's origin and the parent's origin.

use std::time::Duration;

use brickwall_core::geometry::{Offset, Point, Rect};

use crate::surface::{Cursor, ElementId, Layer, Surface};
use crate::zone::{Zone, ZoneKey};

/// One draggable block.
///
/// Not `Clone`: an item enters a zone only by being moved into it.
#[derive(Debug, PartialEq, Eq)]
pub struct Item {
    element: ElementId,
    zone: ZoneKey,
}

impl Item {
    pub(crate) const fn new(element: ElementId, zone: ZoneKey) -> Self {
        Self { element, zone }
    }

    /// The host element this item renders as.
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    /// The zone whose order list currently holds this item.
    #[must_use]
    pub const fn zone(&self) -> ZoneKey {
        self.zone
    }

    pub(crate) fn set_zone(&mut self, zone: ZoneKey) {
        self.zone = zone;
    }

    /// Current bounding rectangle, queried fresh from the host.
    pub fn bounds<S: Surface + ?Sized>(&self, surface: &S) -> Rect {
        surface.bounds(self.element)
    }

    /// True iff `pointer` lies strictly inside the item.
    pub fn hit_test<S: Surface + ?Sized>(&self, surface: &S, pointer: Point) -> bool {
        self.bounds(surface).contains(pointer)
    }

    /// True iff `pointer` is left of the item's horizontal midpoint.
    pub fn is_left_half_hit<S: Surface + ?Sized>(&self, surface: &S, pointer: Point) -> bool {
        pointer.x < self.bounds(surface).center_x()
    }

    /// True iff `pointer` hovers the empty space trailing this item's row.
    ///
    /// The pointer must be right of the item, inside the zone horizontally,
    /// inside the item's row band vertically, and the following item (if
    /// any) must start a new row. `dragged` rides the pointer rather than
    /// its slot, so it never counts as the following item.
    pub fn is_adjacent_free_space_hit<S: Surface + ?Sized>(
        &self,
        surface: &S,
        pointer: Point,
        zone: &Zone,
        dragged: Option<ElementId>,
    ) -> bool {
        let rect = self.bounds(surface);
        let zone_rect = zone.bounds(surface);
        let next_starts_row = match zone.index_of(self.element) {
            Some(index) => zone.items()[index + 1..]
                .iter()
                .find(|next| Some(next.element()) != dragged)
                .is_none_or(|next| next.bounds(surface).y != rect.y),
            None => true,
        };
        next_starts_row
            && pointer.x > rect.right()
            && pointer.x < zone_rect.right()
            && rect.spans_y(pointer.y)
    }

    /// Content width plus left and right borders.
    pub fn full_width<S: Surface + ?Sized>(&self, surface: &S) -> f64 {
        surface.content_width(self.element) + surface.borders(self.element).total()
    }

    /// Lift the item above its siblings and snap it under the pointer.
    pub fn set_drag_visual_state<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        zone_container: ElementId,
        pointer: Point,
    ) {
        surface.set_cursor(self.element, Cursor::Grabbing);
        surface.set_transition(self.element, None);
        surface.set_layer(self.element, Layer::Lifted);
        self.follow_pointer(surface, zone_container, pointer);
    }

    /// Return the item to normal stacking.
    pub fn set_resting_visual_state<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        animated: bool,
        speed: Duration,
    ) {
        surface.set_layer(self.element, Layer::Resting);
        surface.set_cursor(self.element, Cursor::Grab);
        self.set_animated(surface, animated, speed);
    }

    /// Enable or disable the position transition.
    pub fn set_animated<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        enabled: bool,
        speed: Duration,
    ) {
        surface.set_transition(self.element, enabled.then_some(speed));
    }

    /// Center the item on `pointer`.
    pub fn follow_pointer<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        zone_container: ElementId,
        pointer: Point,
    ) {
        let half = surface.client_size(self.element);
        let zone_origin = surface.bounds(zone_container).origin();
        let correction = self.parent_correction(surface, zone_container);
        let offset = Offset::new(
            pointer.x - half.width / 2.0 - zone_origin.x,
            pointer.y - half.height / 2.0 - zone_origin.y,
        ) + correction;
        surface.set_offset(self.element, offset);
    }

    /// Put the item at `offset` inside its zone. Visual state is left alone.
    pub fn place<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        zone_container: ElementId,
        offset: Offset,
    ) {
        let correction = self.parent_correction(surface, zone_container);
        surface.set_offset(self.element, offset + correction);
    }

    /// Zone origin relative to the original parent (or the viewport when
    /// the element has no parent).
    fn parent_correction<S: Surface + ?Sized>(
        &self,
        surface: &S,
        zone_container: ElementId,
    ) -> Offset {
        let zone_origin = surface.bounds(zone_container).origin();
        match surface.parent(self.element) {
            Some(parent) => zone_origin.offset_from(surface.bounds(parent).origin()),
            None => Offset::new(zone_origin.x, zone_origin.y),
        }
    }
}
