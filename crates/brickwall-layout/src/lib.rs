#![forbid(unsafe_code)]

//! Items, zones and the flow-packing reflow.
//!
//! # Role in Brickwall
//! `brickwall-layout` owns the logical model the controller mutates: an
//! ordered list of [`Item`]s per [`Zone`], the row-wrapping reflow that
//! turns that order into positions, and [`discover_zones`] which builds the
//! zones from a host element tree.
//!
//! The host's element tree is reached only through the [`Surface`] trait.
//! [`SceneTree`] is an in-memory implementation for headless hosts and tests.

pub mod discovery;
pub mod item;
pub mod scene;
pub mod surface;
pub mod zone;

pub use brickwall_core::geometry::{Offset, Point, Rect, Size};
pub use discovery::{ZONE_ID_PREFIX, discover_zones, is_zone_boundary};
pub use item::Item;
pub use scene::{NodeSpec, SceneTree};
pub use surface::{Cursor, ElementId, HorizontalBorders, Layer, Surface};
pub use zone::{Slot, Zone, ZoneKey, ZoneLayout};
