#![forbid(unsafe_code)]

//! Brickwall public facade crate.
//!
//! Drag-and-drop reordering for blocks laid out in rows across named zones.
//! A host describes its element tree through [`Surface`], hands the root to
//! a [`Controller`], forwards pointer events, and receives one [`ItemMove`]
//! per finished gesture through its [`MoveListener`].
//!
//! ```
//! use std::time::Duration;
//!
//! use brickwall::prelude::*;
//!
//! let mut scene = SceneTree::new(Size::new(800.0, 600.0));
//! let root = scene.root();
//! let todo = scene.append(root, NodeSpec::sized(400.0, 0.0).identifier("bw-dz-todo"));
//! scene.append(todo, NodeSpec::sized(100.0, 40.0));
//! scene.append(todo, NodeSpec::sized(100.0, 40.0));
//!
//! let mut moves = Vec::new();
//! let config = BrickwallConfig::default().with_grid_gap(10.0);
//! let mut controller = Controller::new(scene, config, |m: &ItemMove| moves.push(m.clone()));
//! controller.setup(Some(root));
//!
//! let now = Instant::now();
//! controller.handle_event(&PointerEvent::down(60.0, 30.0), now);
//! controller.handle_event(&PointerEvent::moved(200.0, 30.0), now);
//! controller.handle_event(&PointerEvent::up(200.0, 30.0), now);
//! controller.tick(now + Duration::from_millis(150));
//! drop(controller);
//!
//! assert_eq!(moves.len(), 1);
//! assert_eq!(moves[0].to_index, 1);
//! ```

use thiserror::Error;

pub mod commit;
pub mod config;
pub mod controller;
pub mod data_source;
pub mod placement;
pub mod snapshot;

// --- Core re-exports -------------------------------------------------------

pub use brickwall_core::event::{Modifiers, PointerButton, PointerEvent, PointerEventKind};
pub use brickwall_core::geometry::{Offset, Point, Rect, Size};

// --- Layout re-exports -----------------------------------------------------

pub use brickwall_layout::{
    Cursor, ElementId, HorizontalBorders, Item, Layer, NodeSpec, SceneTree, Surface, Zone,
    ZoneKey, ZoneLayout, ZONE_ID_PREFIX,
};

// --- Controller -------------------------------------------------------------

pub use commit::{ItemMove, MoveListener};
pub use config::{BrickwallConfig, ConfigError, DEFAULT_ANIMATION_SPEED, DEFAULT_MIN_HEIGHT};
pub use controller::{
    Controller, ControllerStats, DispatchOutcome, HoverTarget, IgnoredReason, Location,
};
pub use data_source::{DataSourceError, ZoneLists};
pub use placement::Decision;
pub use snapshot::{LayoutSnapshot, ZoneSnapshot};
pub use web_time::Instant;

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Brickwall hosts.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}

/// Standard result type for Brickwall APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        BrickwallConfig, Controller, DispatchOutcome, ElementId, Instant, ItemMove, MoveListener,
        NodeSpec, Point, PointerEvent, SceneTree, Size, Surface, ZoneLists,
    };

    pub use crate::{core, layout};
}

pub use brickwall_core as core;
pub use brickwall_layout as layout;
