#![forbid(unsafe_code)]

//! Serializable view of zone membership.

use brickwall_layout::ElementId;
use serde::{Deserialize, Serialize};

/// One zone's order at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub id: String,
    pub container: ElementId,
    pub items: Vec<ElementId>,
}

/// Every zone's order plus the dragged element, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub zones: Vec<ZoneSnapshot>,
    pub dragging: Option<ElementId>,
}

impl LayoutSnapshot {
    /// Items of the zone named `id`.
    #[must_use]
    pub fn items_of(&self, id: &str) -> Option<&[ElementId]> {
        self.zones
            .iter()
            .find(|zone| zone.id == id)
            .map(|zone| zone.items.as_slice())
    }

    /// Total number of items across all zones.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.zones.iter().map(|zone| zone.items.len()).sum()
    }
}
