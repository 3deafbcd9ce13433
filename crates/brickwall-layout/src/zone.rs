#![forbid(unsafe_code)]

//! Zones: ordered item lists with row-wrapping flow layout.
//!
//! A [`Zone`] owns its [`Item`]s by value. Index-level mutation
//! ([`insert_at`](Zone::insert_at), [`remove_at`](Zone::remove_at),
//! [`swap`](Zone::swap)) keeps the order contiguous and rewrites the owner
//! key of an inserted item in the same call, so list membership and the
//! item's back-reference never diverge.
//!
//! # Reflow
//!
//! [`Zone::reflow`] recomputes every position from scratch. Items are walked
//! in order with a horizontal cursor and a row offset, both starting at the
//! grid gap. An item that would overrun the container width (including its
//! trailing gap) wraps: the cursor returns to the gap and the row offset
//! jumps to the accumulated container height. The container height starts at
//! the zone's minimum height and grows to `row_offset + item_height + gap`
//! whenever an item reaches below it.

use std::fmt;
use std::time::Duration;

use brickwall_core::geometry::{Offset, Point, Rect};
use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::surface::{Cursor, ElementId, Surface};

/// Position of a zone in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneKey(usize);

impl ZoneKey {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Discovery index.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "zone{}", self.0)
    }
}

/// Where one item landed during a reflow pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub element: ElementId,
    /// Offset inside the zone.
    pub offset: Offset,
    /// Zero-based row index.
    pub row: usize,
}

/// Result of one reflow pass over a zone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub height: f64,
    pub slots: Vec<Slot>,
}

impl ZoneLayout {
    /// Number of rows used.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.slots.last().map_or(0, |slot| slot.row + 1)
    }
}

/// A named, ordered container of items.
#[derive(Debug, PartialEq)]
pub struct Zone {
    key: ZoneKey,
    id: String,
    container: ElementId,
    items: Vec<Item>,
    min_height: f64,
    stretch: Option<Duration>,
}

impl Zone {
    /// Build a zone over `container`, one item per child element.
    ///
    /// A container without a minimum-height style gets `default_min_height`
    /// written to it.
    pub fn from_container<S: Surface + ?Sized>(
        surface: &mut S,
        key: ZoneKey,
        container: ElementId,
        default_min_height: f64,
    ) -> Self {
        let id = surface.identifier(container).unwrap_or_default().to_owned();
        let min_height = match surface.min_height(container) {
            Some(height) => height,
            None => {
                surface.set_min_height(container, default_min_height);
                default_min_height
            }
        };
        let items = surface
            .children(container)
            .into_iter()
            .map(|element| Item::new(element, key))
            .collect();
        Self {
            key,
            id,
            container,
            items,
            min_height,
            stretch: None,
        }
    }

    #[must_use]
    pub const fn key(&self) -> ZoneKey {
        self.key
    }

    /// Stable identifier reported to the host.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The container element anchoring this zone.
    #[must_use]
    pub const fn container(&self) -> ElementId {
        self.container
    }

    /// Items in layout order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn min_height(&self) -> f64 {
        self.min_height
    }

    /// Height transition, once enabled.
    #[must_use]
    pub const fn stretch_transition(&self) -> Option<Duration> {
        self.stretch
    }

    /// Container bounds.
    pub fn bounds<S: Surface + ?Sized>(&self, surface: &S) -> Rect {
        surface.bounds(self.container)
    }

    /// Index of the item rendered by `element`.
    #[must_use]
    pub fn index_of(&self, element: ElementId) -> Option<usize> {
        self.items.iter().position(|item| item.element() == element)
    }

    /// Splice `item` in at `index` and make this zone its owner.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_at(&mut self, index: usize, mut item: Item) {
        item.set_zone(self.key);
        self.items.insert(index, item);
    }

    /// Excise the item at `index`, shifting later items left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Item {
        self.items.remove(index)
    }

    /// Move the item at `from` so it ends up at `to`.
    ///
    /// This is remove-then-reinsert, not a pairwise exchange: `swap(0, 2)` on
    /// `[A, B, C]` yields `[B, C, A]`.
    pub fn swap(&mut self, from: usize, to: usize) {
        let item = self.remove_at(from);
        self.insert_at(to, item);
    }

    /// True iff the zone holds no items and `pointer` is inside it.
    pub fn is_empty_and_hit<S: Surface + ?Sized>(&self, surface: &S, pointer: Point) -> bool {
        self.items.is_empty() && self.bounds(surface).contains(pointer)
    }

    /// True iff `pointer` hovers the trailing row space after `item`,
    /// looking past `dragged` for the item that follows it.
    pub fn is_available_space_near_item<S: Surface + ?Sized>(
        &self,
        surface: &S,
        item: &Item,
        pointer: Point,
        dragged: Option<ElementId>,
    ) -> bool {
        item.is_adjacent_free_space_hit(surface, pointer, self, dragged)
    }

    /// Lay out every item and resize the container.
    ///
    /// `excluded` (the dragged item) is always placed without a transition
    /// so it never glides behind the pointer, and keeps its drag cursor.
    pub fn reflow<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        animated: bool,
        animation_speed: Duration,
        grid_gap: f64,
        excluded: Option<ElementId>,
    ) -> ZoneLayout {
        let _span = tracing::debug_span!(
            target: "brickwall.reflow",
            "zone.reflow",
            zone = %self.id,
            items = self.items.len(),
            height = tracing::field::Empty,
        )
        .entered();

        let max_width = surface.client_size(self.container).width;
        let mut cursor = grid_gap;
        let mut row_offset = grid_gap;
        let mut height = self.min_height;
        let mut row = 0;
        let mut row_occupied = false;
        let mut slots = Vec::with_capacity(self.items.len());

        for item in &self.items {
            let full_width = item.full_width(surface);
            if cursor + full_width + grid_gap > max_width {
                cursor = grid_gap;
                row_offset = height;
                if row_occupied {
                    row += 1;
                }
            }

            let resting = excluded != Some(item.element());
            item.set_animated(surface, animated && resting, animation_speed);

            let offset = Offset::new(cursor, row_offset);
            item.place(surface, self.container, offset);
            if resting {
                surface.set_cursor(item.element(), Cursor::Grab);
            }
            slots.push(Slot {
                element: item.element(),
                offset,
                row,
            });
            row_occupied = true;

            cursor += full_width + grid_gap;

            let item_height = item.bounds(surface).height;
            if row_offset + item_height > height {
                height = row_offset + item_height + grid_gap;
            }
        }

        surface.set_height(self.container, height);
        tracing::Span::current().record("height", height);

        ZoneLayout { height, slots }
    }

    /// Animate subsequent container height changes.
    pub fn enable_stretch_transition<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        speed: Duration,
    ) {
        self.stretch = Some(speed);
        surface.set_height_transition(self.container, Some(speed));
    }
}
