#![forbid(unsafe_code)]

//! Zone discovery over a host element tree.

use crate::surface::{ElementId, Surface};
use crate::zone::{Zone, ZoneKey};

/// Identifier prefix marking an element as a zone container.
pub const ZONE_ID_PREFIX: &str = "bw-dz";

/// True iff an element with this identifier is a zone container.
#[must_use]
pub fn is_zone_boundary(identifier: Option<&str>) -> bool {
    identifier.is_some_and(|id| id.starts_with(ZONE_ID_PREFIX))
}

/// Partition the descendants of `root` into zones, in document order.
///
/// A matching child becomes a zone (its own children become items and are
/// not searched further); any other child is searched into. `root` itself is
/// never a zone.
pub fn discover_zones<S: Surface + ?Sized>(
    surface: &mut S,
    root: ElementId,
    default_min_height: f64,
) -> Vec<Zone> {
    let mut containers = Vec::new();
    collect_containers(surface, root, &mut containers);

    let zones: Vec<Zone> = containers
        .into_iter()
        .enumerate()
        .map(|(index, container)| {
            Zone::from_container(surface, ZoneKey::new(index), container, default_min_height)
        })
        .collect();

    tracing::debug!(
        target: "brickwall.discovery",
        root = %root,
        zones = zones.len(),
        items = zones.iter().map(Zone::len).sum::<usize>(),
        "zones discovered"
    );
    zones
}

fn collect_containers<S: Surface + ?Sized>(
    surface: &S,
    element: ElementId,
    out: &mut Vec<ElementId>,
) {
    for child in surface.children(element) {
        if is_zone_boundary(surface.identifier(child)) {
            out.push(child);
        } else {
            collect_containers(surface, child, out);
        }
    }
}
