#![forbid(unsafe_code)]

//! Drag/drop state machine.
//!
//! [`Controller`] owns the zones discovered under a root element, the
//! host [`Surface`] and the host [`MoveListener`]. The host forwards every
//! document-level pointer event to [`Controller::handle_event`] and calls
//! [`Controller::tick`] so settle delays can elapse.
//!
//! # State Machine
//!
//! ```text
//!            grab (primary down over an item)
//!   Idle ───────────────────────────────────────▶ Dragging
//!    ▲                                              │  ▲
//!    │ release (any up): resting visuals,           │  │ move: follow pointer,
//!    │ reflow, schedule commit                      │  │ hit-test, place, reflow
//!    └──────────────────────────────────────────────┘  └──┘
//! ```
//!
//! # Invariants
//!
//! 1. At most one item is dragged at a time; a second grab is ignored.
//! 2. Every item is in exactly one zone's list, including the dragged one.
//! 3. Each move event makes at most one placement decision: zones then items
//!    in discovery order, first match wins.
//! 4. A placement that would not change the index mutates nothing and does
//!    not reflow.
//! 5. Each completed gesture is reported exactly once, never before its
//!    settle delay elapses (teardown excepted). Commits queue in release
//!    order, so a new gesture may start while earlier ones still settle.
//!
//! # Failure Modes
//!
//! - Events before [`setup`](Controller::setup) or after
//!   [`teardown`](Controller::teardown) are ignored.
//! - [`rebuild`](Controller::rebuild) abandons an in-flight drag without a
//!   commit, since the dragged element may no longer exist.

use std::collections::VecDeque;
use std::fmt;

use brickwall_core::event::{PointerButton, PointerEvent, PointerEventKind};
use brickwall_core::geometry::Point;
use brickwall_layout::{ElementId, Surface, Zone, ZoneKey, discover_zones};
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::commit::{ItemMove, MoveListener, PendingCommit};
use crate::config::BrickwallConfig;
use crate::placement::{Decision, decide_body, decide_trailing};
use crate::snapshot::{LayoutSnapshot, ZoneSnapshot};

/// A position in the layout: zone plus index within its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub zone: ZoneKey,
    pub index: usize,
}

impl Location {
    #[must_use]
    pub const fn new(zone: ZoneKey, index: usize) -> Self {
        Self { zone, index }
    }
}

/// What the pointer matched during a hit-test pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    /// Inside a zone with no items.
    EmptyZone,
    /// Over another item's body.
    ItemBody,
    /// Over the empty space that ends an item's row.
    TrailingSpace,
}

/// Why an incoming event changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    /// Not set up, or torn down.
    Detached,
    NotDragging,
    AlreadyDragging,
    ButtonNotAllowed,
    NoItemUnderPointer,
    /// The element is not an item of any zone.
    UnknownItem,
}

/// Result of dispatching one event.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Grabbed {
        element: ElementId,
        origin: Location,
    },
    /// The dragged item followed the pointer; the order is unchanged.
    Followed {
        element: ElementId,
    },
    Placed {
        element: ElementId,
        target: HoverTarget,
        location: Location,
    },
    /// The gesture ended; its commit fires at `due`.
    Released {
        element: ElementId,
        origin: Location,
        current: Location,
        due: Instant,
    },
    Ignored(IgnoredReason),
}

/// Running counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ControllerStats {
    /// Full passes over every zone.
    pub reflow_passes: u64,
    /// Order mutations applied during drags.
    pub placements: u64,
    /// Moves reported to the listener.
    pub commits: u64,
    pub ignored_events: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct DragSession {
    element: ElementId,
    origin: Location,
    current: Location,
    pointer: Point,
}

/// Drag/drop/reflow controller.
pub struct Controller<S, L> {
    surface: S,
    listener: L,
    config: BrickwallConfig,
    root: Option<ElementId>,
    attached: bool,
    zones: Vec<Zone>,
    drag: Option<DragSession>,
    pending: VecDeque<PendingCommit>,
    stats: ControllerStats,
}

impl<S, L> fmt::Debug for Controller<S, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("root", &self.root)
            .field("attached", &self.attached)
            .field("zones", &self.zones.len())
            .field("dragging", &self.drag.map(|session| session.element))
            .field("pending", &self.pending.len())
            .finish()
    }
}

impl<S: Surface, L: MoveListener> Controller<S, L> {
    /// Create a detached controller. Call [`setup`](Self::setup) next.
    pub fn new(surface: S, config: BrickwallConfig, listener: L) -> Self {
        Self {
            surface,
            listener,
            config,
            root: None,
            attached: false,
            zones: Vec::new(),
            drag: None,
            pending: VecDeque::new(),
            stats: ControllerStats::default(),
        }
    }

    /// Attach to `root`: discover zones, lay them out without animation,
    /// then enable height transitions. A `None` root is a no-op.
    pub fn setup(&mut self, root: Option<ElementId>) {
        let Some(root) = root else {
            tracing::debug!(target: "brickwall.controller", "setup skipped: no root element");
            return;
        };
        self.abandon_drag();
        self.root = Some(root);
        self.attached = true;
        self.initialize_zones(root);
        tracing::info!(
            target: "brickwall.controller",
            root = %root,
            zones = self.zones.len(),
            "controller attached"
        );
    }

    /// Re-run discovery after the host changed the element set, then lay
    /// out again without animation.
    pub fn rebuild(&mut self) {
        let Some(root) = self.root else {
            return;
        };
        self.abandon_drag();
        self.initialize_zones(root);
        tracing::info!(
            target: "brickwall.controller",
            zones = self.zones.len(),
            "zones rebuilt"
        );
    }

    /// Stop listening. An in-flight drag is abandoned and settling commits
    /// are delivered immediately.
    pub fn teardown(&mut self) {
        self.attached = false;
        self.abandon_drag();
        while self.pop_pending().is_some() {}
        tracing::info!(target: "brickwall.controller", "controller detached");
    }

    /// Dispatch one document-level pointer event.
    pub fn handle_event(&mut self, event: &PointerEvent, now: Instant) -> DispatchOutcome {
        if !self.attached {
            return self.ignore(IgnoredReason::Detached);
        }
        match event.kind {
            PointerEventKind::Down(PointerButton::Primary) => {
                self.pointer_down(event.position, now)
            }
            PointerEventKind::Down(_) => self.ignore(IgnoredReason::ButtonNotAllowed),
            PointerEventKind::Move => self.pointer_move(event.position),
            PointerEventKind::Up(_) => self.pointer_up(now),
        }
    }

    /// Start dragging `element`, as a per-item pointer-down hook would.
    pub fn grab(&mut self, element: ElementId, pointer: Point, now: Instant) -> DispatchOutcome {
        if !self.attached {
            return self.ignore(IgnoredReason::Detached);
        }
        if self.drag.is_some() {
            return self.ignore(IgnoredReason::AlreadyDragging);
        }
        let Some(origin) = self.locate(element) else {
            return self.ignore(IgnoredReason::UnknownItem);
        };

        // Anything already due goes out before the new origin is captured.
        self.tick(now);

        let zone = &self.zones[origin.zone.get()];
        zone.items()[origin.index].set_drag_visual_state(
            &mut self.surface,
            zone.container(),
            pointer,
        );
        self.drag = Some(DragSession {
            element,
            origin,
            current: origin,
            pointer,
        });

        tracing::debug!(
            target: "brickwall.controller",
            element = %element,
            zone = %zone.id(),
            index = origin.index,
            "item grabbed"
        );
        DispatchOutcome::Grabbed { element, origin }
    }

    /// Fire every settling commit whose delay has elapsed, oldest first.
    pub fn tick(&mut self, now: Instant) -> Vec<ItemMove> {
        let mut fired = Vec::new();
        while self.pending.front().is_some_and(|pending| pending.is_due(now)) {
            fired.extend(self.pop_pending());
        }
        fired
    }

    /// When the host should next call [`tick`](Self::tick).
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.front().map(|pending| pending.due)
    }

    /// Commits released but not yet delivered.
    #[must_use]
    pub fn settling(&self) -> usize {
        self.pending.len()
    }

    /// Lay out every zone. During a drag the dragged item snaps and then
    /// returns under the pointer.
    pub fn reflow(&mut self, animated: bool) {
        let excluded = self.drag.map(|session| session.element);
        for zone in &self.zones {
            zone.reflow(
                &mut self.surface,
                animated,
                self.config.animation_speed,
                self.config.grid_gap,
                excluded,
            );
        }
        self.stats.reflow_passes += 1;
        self.follow_pointer();
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    #[must_use]
    pub fn dragged_element(&self) -> Option<ElementId> {
        self.drag.map(|session| session.element)
    }

    /// Where the current (or settling) gesture started.
    #[must_use]
    pub fn origin_location(&self) -> Option<Location> {
        self.drag
            .map(|session| session.origin)
            .or_else(|| self.pending.back().map(|pending| pending.origin))
    }

    /// Where the current (or settling) gesture's item sits now.
    #[must_use]
    pub fn current_location(&self) -> Option<Location> {
        self.drag
            .map(|session| session.current)
            .or_else(|| self.pending.back().map(|pending| pending.current))
    }

    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// Look up a zone by its identifier.
    #[must_use]
    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id() == id)
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for host-driven element changes; follow up with
    /// [`rebuild`](Self::rebuild) when the item set changed.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn listener(&self) -> &L {
        &self.listener
    }

    #[must_use]
    pub fn config(&self) -> &BrickwallConfig {
        &self.config
    }

    #[must_use]
    pub fn stats(&self) -> ControllerStats {
        self.stats
    }

    /// Zone ids and item order as they stand.
    #[must_use]
    pub fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            zones: self
                .zones
                .iter()
                .map(|zone| ZoneSnapshot {
                    id: zone.id().to_owned(),
                    container: zone.container(),
                    items: zone.items().iter().map(|item| item.element()).collect(),
                })
                .collect(),
            dragging: self.dragged_element(),
        }
    }

    fn initialize_zones(&mut self, root: ElementId) {
        self.zones = discover_zones(&mut self.surface, root, self.config.min_height);
        self.reflow(false);
        for zone in &mut self.zones {
            zone.enable_stretch_transition(&mut self.surface, self.config.animation_speed);
        }
    }

    fn pointer_down(&mut self, pointer: Point, now: Instant) -> DispatchOutcome {
        if self.drag.is_some() {
            return self.ignore(IgnoredReason::AlreadyDragging);
        }
        let hit = self.zones.iter().find_map(|zone| {
            zone.items()
                .iter()
                .find(|item| item.hit_test(&self.surface, pointer))
                .map(|item| item.element())
        });
        match hit {
            Some(element) => self.grab(element, pointer, now),
            None => self.ignore(IgnoredReason::NoItemUnderPointer),
        }
    }

    fn pointer_move(&mut self, pointer: Point) -> DispatchOutcome {
        let Some(mut session) = self.drag else {
            return self.ignore(IgnoredReason::NotDragging);
        };
        session.pointer = pointer;
        self.drag = Some(session);
        let element = session.element;
        self.follow_pointer();

        match self.hover(element, pointer) {
            Some((zone, target, decision)) => self.apply(zone, target, decision),
            None => DispatchOutcome::Followed { element },
        }
    }

    fn pointer_up(&mut self, now: Instant) -> DispatchOutcome {
        let Some(session) = self.drag.take() else {
            return self.ignore(IgnoredReason::NotDragging);
        };
        let speed = self.config.animation_speed;
        if let Some(item) = self
            .zones
            .get(session.current.zone.get())
            .and_then(|zone| zone.items().get(session.current.index))
        {
            item.set_resting_visual_state(&mut self.surface, true, speed);
        }
        self.reflow(true);

        let due = now + speed;
        let item_move = ItemMove {
            from_zone: self.zone_id(session.origin.zone),
            from_index: session.origin.index,
            to_zone: self.zone_id(session.current.zone),
            to_index: session.current.index,
        };
        tracing::debug!(
            target: "brickwall.controller",
            element = %session.element,
            from_zone = %item_move.from_zone,
            from_index = item_move.from_index,
            to_zone = %item_move.to_zone,
            to_index = item_move.to_index,
            "item released"
        );
        self.pending.push_back(PendingCommit {
            due,
            origin: session.origin,
            current: session.current,
            item_move,
        });

        DispatchOutcome::Released {
            element: session.element,
            origin: session.origin,
            current: session.current,
            due,
        }
    }

    /// First zone/item the pointer matches, with the placement it implies.
    fn hover(
        &self,
        dragged: ElementId,
        pointer: Point,
    ) -> Option<(ZoneKey, HoverTarget, Decision)> {
        for zone in &self.zones {
            if zone.is_empty_and_hit(&self.surface, pointer) {
                return Some((zone.key(), HoverTarget::EmptyZone, Decision::Insert { index: 0 }));
            }

            let dragged_index = zone.index_of(dragged);
            for (index, item) in zone.items().iter().enumerate() {
                if item.element() == dragged {
                    continue;
                }
                if item.hit_test(&self.surface, pointer) {
                    let left_half = item.is_left_half_hit(&self.surface, pointer);
                    let decision = decide_body(dragged_index, index, left_half);
                    return Some((zone.key(), HoverTarget::ItemBody, decision));
                }
                let lifted = Some(dragged);
                if zone.is_available_space_near_item(&self.surface, item, pointer, lifted) {
                    let decision = decide_trailing(dragged_index, index);
                    return Some((zone.key(), HoverTarget::TrailingSpace, decision));
                }
            }
        }
        None
    }

    fn apply(
        &mut self,
        zone: ZoneKey,
        target: HoverTarget,
        decision: Decision,
    ) -> DispatchOutcome {
        let Some(session) = self.drag else {
            return self.ignore(IgnoredReason::NotDragging);
        };
        let element = session.element;
        if zone.get() >= self.zones.len() {
            return DispatchOutcome::Followed { element };
        }

        let index = match decision {
            Decision::Stay => return DispatchOutcome::Followed { element },
            Decision::Insert { index } => {
                let from = session.current.zone;
                let Some(from_index) = self
                    .zones
                    .get(from.get())
                    .and_then(|current| current.index_of(element))
                else {
                    return self.ignore(IgnoredReason::UnknownItem);
                };
                let item = self.zones[from.get()].remove_at(from_index);
                let destination = &mut self.zones[zone.get()];
                let index = index.min(destination.len());
                destination.insert_at(index, item);
                index
            }
            Decision::Move { from, to } => {
                self.zones[zone.get()].swap(from, to);
                to
            }
        };

        let location = Location::new(zone, index);
        if let Some(session) = self.drag.as_mut() {
            session.current = location;
        }
        self.stats.placements += 1;
        tracing::debug!(
            target: "brickwall.controller",
            element = %element,
            zone = %self.zones[zone.get()].id(),
            index,
            hover = ?target,
            "item placed"
        );
        self.reflow(true);

        DispatchOutcome::Placed {
            element,
            target,
            location,
        }
    }

    fn follow_pointer(&mut self) {
        let Some(session) = self.drag else {
            return;
        };
        let Some(zone) = self.zones.get(session.current.zone.get()) else {
            return;
        };
        if let Some(item) = zone.items().get(session.current.index) {
            item.follow_pointer(&mut self.surface, zone.container(), session.pointer);
        }
    }

    fn abandon_drag(&mut self) {
        let Some(session) = self.drag.take() else {
            return;
        };
        let speed = self.config.animation_speed;
        if let Some(item) = self
            .zones
            .get(session.current.zone.get())
            .and_then(|zone| zone.items().get(session.current.index))
        {
            item.set_resting_visual_state(&mut self.surface, false, speed);
        }
        tracing::debug!(
            target: "brickwall.controller",
            element = %session.element,
            "drag abandoned without commit"
        );
    }

    fn pop_pending(&mut self) -> Option<ItemMove> {
        let pending = self.pending.pop_front()?;
        self.listener.on_item_moved(&pending.item_move);
        self.stats.commits += 1;
        tracing::info!(
            target: "brickwall.controller",
            from_zone = %pending.item_move.from_zone,
            from_index = pending.item_move.from_index,
            to_zone = %pending.item_move.to_zone,
            to_index = pending.item_move.to_index,
            "move committed"
        );
        Some(pending.item_move)
    }

    fn locate(&self, element: ElementId) -> Option<Location> {
        self.zones.iter().find_map(|zone| {
            zone.index_of(element)
                .map(|index| Location::new(zone.key(), index))
        })
    }

    fn zone_id(&self, key: ZoneKey) -> String {
        self.zones
            .get(key.get())
            .map(|zone| zone.id().to_owned())
            .unwrap_or_default()
    }

    fn ignore(&mut self, reason: IgnoredReason) -> DispatchOutcome {
        self.stats.ignored_events += 1;
        tracing::trace!(target: "brickwall.controller", reason = ?reason, "event ignored");
        DispatchOutcome::Ignored(reason)
    }
}
