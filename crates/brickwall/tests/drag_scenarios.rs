//! End-to-end drag scenarios over a headless scene.
//!
//! The standard board (grid gap 20, every item 100x50):
//!
//! ```text
//! bw-dz-a  at (0, 0),   width 500: A0 (20,20)  A1 (140,20)  A2 (260,20)
//! bw-dz-b  at (0, 400), width 500: B0 (20,420) B1 (140,420)
//! bw-dz-c  at (600, 0), width 300: empty, collapsed to 30px
//! ```

use std::time::Duration;

use brickwall::{
    BrickwallConfig, Controller, DispatchOutcome, ElementId, HoverTarget, IgnoredReason, Instant,
    ItemMove, Location, MoveListener, NodeSpec, PointerEvent, Rect, SceneTree, Size, Surface,
    ZoneLists,
};
use pretty_assertions::assert_eq;

const SPEED: Duration = Duration::from_millis(150);

/// Pointer heights inside the `bw-dz-a` row band (items span y 20..70).
const ROW_A_YS: [f64; 5] = [21.0, 30.0, 45.0, 60.0, 69.0];

/// Pointer heights inside the `bw-dz-b` row band (items span y 420..470).
const ROW_B_YS: [f64; 5] = [421.0, 430.0, 445.0, 460.0, 469.0];

#[derive(Debug, Default)]
struct Log(Vec<ItemMove>);

impl MoveListener for Log {
    fn on_item_moved(&mut self, item_move: &ItemMove) {
        self.0.push(item_move.clone());
    }
}

type Board = Controller<SceneTree, Log>;

fn build(zones: &[(&str, Rect, &[f64])]) -> Board {
    let mut scene = SceneTree::new(Size::new(1000.0, 800.0));
    let root = scene.root();
    for &(id, frame, widths) in zones {
        let container = scene.append(root, NodeSpec::new(frame).identifier(id));
        for &width in widths {
            scene.append(container, NodeSpec::sized(width, 50.0));
        }
    }
    let config = BrickwallConfig::default().with_grid_gap(20.0);
    let mut controller = Controller::new(scene, config, Log::default());
    controller.setup(Some(root));
    controller
}

fn board() -> Board {
    build(&[
        ("bw-dz-a", Rect::new(0.0, 0.0, 500.0, 0.0), &[100.0; 3]),
        ("bw-dz-b", Rect::new(0.0, 400.0, 500.0, 0.0), &[100.0; 2]),
        ("bw-dz-c", Rect::new(600.0, 0.0, 300.0, 0.0), &[]),
    ])
}

fn order(controller: &Board, zone: &str) -> Vec<ElementId> {
    controller
        .zone(zone)
        .expect("zone exists")
        .items()
        .iter()
        .map(|item| item.element())
        .collect()
}

fn location(controller: &Board, zone: &str, index: usize) -> Location {
    Location::new(controller.zone(zone).expect("zone exists").key(), index)
}

/// Press at `from`, move to `to`, and return the move outcome.
fn drag_to(
    controller: &mut Board,
    from: (f64, f64),
    to: (f64, f64),
    now: Instant,
) -> DispatchOutcome {
    let grabbed = controller.handle_event(&PointerEvent::down(from.0, from.1), now);
    assert!(matches!(grabbed, DispatchOutcome::Grabbed { .. }), "{grabbed:?}");
    controller.handle_event(&PointerEvent::moved(to.0, to.1), now)
}

#[test]
fn cross_zone_left_half_lands_before_hovered_item() {
    let mut c = board();
    let now = Instant::now();
    let a = order(&c, "bw-dz-a");
    let b = order(&c, "bw-dz-b");

    let outcome = drag_to(&mut c, (70.0, 45.0), (150.0, 440.0), now);
    assert_eq!(
        outcome,
        DispatchOutcome::Placed {
            element: a[0],
            target: HoverTarget::ItemBody,
            location: location(&c, "bw-dz-b", 1),
        }
    );
    assert_eq!(order(&c, "bw-dz-a"), vec![a[1], a[2]]);
    assert_eq!(order(&c, "bw-dz-b"), vec![b[0], a[0], b[1]]);

    let zone_b = c.zone("bw-dz-b").expect("zone b");
    assert_eq!(zone_b.items()[1].zone(), zone_b.key());
    // Later items in the destination make room; the source closes the gap.
    assert_eq!(c.surface().bounds(b[1]).origin(), brickwall::Point::new(260.0, 420.0));
    assert_eq!(c.surface().bounds(a[1]).origin(), brickwall::Point::new(20.0, 20.0));
}

#[test]
fn cross_zone_right_half_lands_after_hovered_item() {
    let mut c = board();
    let a = order(&c, "bw-dz-a");
    let b = order(&c, "bw-dz-b");

    drag_to(&mut c, (70.0, 45.0), (200.0, 440.0), Instant::now());
    assert_eq!(order(&c, "bw-dz-b"), vec![b[0], b[1], a[0]]);
    assert_eq!(c.current_location(), Some(location(&c, "bw-dz-b", 2)));
}

#[test]
fn trailing_space_of_last_row_appends() {
    let mut c = board();
    let a = order(&c, "bw-dz-a");
    let b = order(&c, "bw-dz-b");

    let outcome = drag_to(&mut c, (70.0, 45.0), (450.0, 440.0), Instant::now());
    assert!(matches!(
        outcome,
        DispatchOutcome::Placed {
            target: HoverTarget::TrailingSpace,
            ..
        }
    ));
    assert_eq!(order(&c, "bw-dz-b"), vec![b[0], b[1], a[0]]);
}

#[test]
fn same_zone_tie_break_table() {
    // (grab x, hover x, expected order as indices into the original order)
    let cases: [(f64, f64, [usize; 3]); 4] = [
        // Left half, moving right: one before the hovered item.
        (70.0, 280.0, [1, 0, 2]),
        // Right half, moving right: takes the hovered index.
        (70.0, 340.0, [1, 2, 0]),
        // Left half, moving left: takes the hovered index.
        (310.0, 40.0, [2, 0, 1]),
        // Right half, moving left: one after the hovered item.
        (310.0, 100.0, [0, 2, 1]),
    ];

    for (grab_x, hover_x, expected) in cases {
        for y in ROW_A_YS {
            let mut c = board();
            let a = order(&c, "bw-dz-a");
            let (from, to) = ((grab_x, 45.0), (hover_x, y));
            let outcome = drag_to(&mut c, from, to, Instant::now());
            assert!(
                matches!(
                    outcome,
                    DispatchOutcome::Placed {
                        target: HoverTarget::ItemBody,
                        ..
                    }
                ),
                "{from:?} -> {to:?}: {outcome:?}"
            );
            assert_eq!(
                order(&c, "bw-dz-a"),
                expected.iter().map(|&i| a[i]).collect::<Vec<_>>(),
                "{from:?} -> {to:?}"
            );
        }
    }
}

#[test]
fn carrying_right_past_the_next_item_off_the_row_center() {
    // The lifted middle item sits away from its slot; its left neighbour's
    // row still continues with the third item.
    for y in ROW_A_YS {
        let mut c = board();
        let a = order(&c, "bw-dz-a");
        let outcome = drag_to(&mut c, (190.0, 45.0), (340.0, y), Instant::now());
        assert_eq!(
            outcome,
            DispatchOutcome::Placed {
                element: a[1],
                target: HoverTarget::ItemBody,
                location: location(&c, "bw-dz-a", 2),
            },
            "y = {y}"
        );
        assert_eq!(order(&c, "bw-dz-a"), vec![a[0], a[2], a[1]], "y = {y}");
    }
}

#[test]
fn cross_zone_follow_up_reorders_inside_destination() {
    for y in ROW_B_YS {
        let mut c = board();
        let now = Instant::now();
        let a = order(&c, "bw-dz-a");
        let b = order(&c, "bw-dz-b");
        drag_to(&mut c, (70.0, 45.0), (150.0, y), now);
        assert_eq!(order(&c, "bw-dz-b"), vec![b[0], a[0], b[1]], "y = {y}");

        // B1 now sits at (260, 420); its right half takes its index.
        let outcome = c.handle_event(&PointerEvent::moved(340.0, y), now);
        assert_eq!(
            outcome,
            DispatchOutcome::Placed {
                element: a[0],
                target: HoverTarget::ItemBody,
                location: location(&c, "bw-dz-b", 2),
            },
            "y = {y}"
        );
        assert_eq!(order(&c, "bw-dz-b"), vec![b[0], b[1], a[0]], "y = {y}");

        c.handle_event(&PointerEvent::up(340.0, y), now);
        assert_eq!(
            c.tick(now + SPEED),
            vec![ItemMove {
                from_zone: "bw-dz-a".into(),
                from_index: 0,
                to_zone: "bw-dz-b".into(),
                to_index: 2,
            }]
        );
    }
}

#[test]
fn same_zone_trailing_space_before_a_wrap() {
    // Row one holds items 0 and 1; item 2 wraps.
    let widths = [100.0, 100.0, 300.0];
    let mut c = build(&[("bw-dz-a", Rect::new(0.0, 0.0, 400.0, 0.0), &widths)]);
    let a = order(&c, "bw-dz-a");

    let outcome = drag_to(&mut c, (70.0, 45.0), (300.0, 45.0), Instant::now());
    assert!(matches!(
        outcome,
        DispatchOutcome::Placed {
            target: HoverTarget::TrailingSpace,
            ..
        }
    ));
    assert_eq!(order(&c, "bw-dz-a"), vec![a[1], a[0], a[2]]);
}

#[test]
fn hovering_the_current_slot_changes_nothing() {
    for y in ROW_A_YS {
        let mut c = board();
        let now = Instant::now();
        let a = order(&c, "bw-dz-a");

        // Left half of the right-hand neighbour resolves to the dragged index.
        let outcome = drag_to(&mut c, (70.0, 45.0), (150.0, y), now);
        assert_eq!(outcome, DispatchOutcome::Followed { element: a[0] }, "y = {y}");
        let passes = c.stats().reflow_passes;
        for _ in 0..5 {
            c.handle_event(&PointerEvent::moved(150.0, y), now);
        }
        assert_eq!(c.stats().reflow_passes, passes);
        assert_eq!(c.stats().placements, 0);
        assert_eq!(order(&c, "bw-dz-a"), a);
    }
}

#[test]
fn stationary_pointer_after_cross_zone_move_does_not_thrash() {
    for y in ROW_B_YS {
        let mut c = board();
        let now = Instant::now();
        drag_to(&mut c, (70.0, 45.0), (150.0, y), now);
        let after_first = order(&c, "bw-dz-b");
        let passes = c.stats().reflow_passes;

        for _ in 0..5 {
            let outcome = c.handle_event(&PointerEvent::moved(150.0, y), now);
            assert!(matches!(outcome, DispatchOutcome::Followed { .. }), "{outcome:?}");
        }
        assert_eq!(order(&c, "bw-dz-b"), after_first, "y = {y}");
        assert_eq!(c.stats().placements, 1);
        assert_eq!(c.stats().reflow_passes, passes);
    }
}

#[test]
fn only_one_item_is_dragged_at_a_time() {
    let mut c = board();
    let now = Instant::now();
    let a = order(&c, "bw-dz-a");

    c.handle_event(&PointerEvent::down(70.0, 45.0), now);
    assert_eq!(
        c.handle_event(&PointerEvent::down(190.0, 45.0), now),
        DispatchOutcome::Ignored(IgnoredReason::AlreadyDragging)
    );
    assert_eq!(
        c.grab(a[2], brickwall::Point::new(310.0, 45.0), now),
        DispatchOutcome::Ignored(IgnoredReason::AlreadyDragging)
    );
    assert_eq!(c.dragged_element(), Some(a[0]));
}

#[test]
fn commit_fires_once_after_settle_delay() {
    let mut c = board();
    let now = Instant::now();
    drag_to(&mut c, (70.0, 45.0), (150.0, 440.0), now);

    let released = c.handle_event(&PointerEvent::up(150.0, 440.0), now);
    assert!(matches!(released, DispatchOutcome::Released { due, .. } if due == now + SPEED));
    assert!(!c.is_dragging());
    assert_eq!(c.next_deadline(), Some(now + SPEED));

    // Still settling: nothing reported, locations retained.
    assert!(c.tick(now + Duration::from_millis(149)).is_empty());
    assert!(c.listener().0.is_empty());
    assert_eq!(c.origin_location(), Some(location(&c, "bw-dz-a", 0)));
    assert_eq!(c.current_location(), Some(location(&c, "bw-dz-b", 1)));

    let expected = ItemMove {
        from_zone: "bw-dz-a".into(),
        from_index: 0,
        to_zone: "bw-dz-b".into(),
        to_index: 1,
    };
    assert_eq!(c.tick(now + SPEED), vec![expected.clone()]);
    assert_eq!(c.listener().0, vec![expected]);
    assert_eq!(c.origin_location(), None);
    assert_eq!(c.current_location(), None);
    assert_eq!(c.next_deadline(), None);

    assert!(c.tick(now + SPEED * 10).is_empty());
    assert_eq!(c.listener().0.len(), 1);
    assert_eq!(c.stats().commits, 1);
}

#[test]
fn release_restores_resting_visuals_and_snaps_into_slot() {
    let mut c = board();
    let now = Instant::now();
    let a = order(&c, "bw-dz-a");
    drag_to(&mut c, (70.0, 45.0), (150.0, 440.0), now);
    c.handle_event(&PointerEvent::up(150.0, 440.0), now);

    let scene = c.surface();
    assert_eq!(scene.layer(a[0]), brickwall::Layer::Resting);
    assert_eq!(scene.cursor(a[0]), brickwall::Cursor::Grab);
    assert_eq!(scene.transition(a[0]), Some(SPEED));
    assert_eq!(scene.bounds(a[0]).origin(), brickwall::Point::new(140.0, 420.0));
}

#[test]
fn release_without_moving_reports_a_noop() {
    let mut c = board();
    let now = Instant::now();
    c.handle_event(&PointerEvent::down(190.0, 45.0), now);
    c.handle_event(&PointerEvent::up(190.0, 45.0), now);

    let item_move = c.tick(now + SPEED).pop().expect("commit fires");
    assert!(item_move.is_noop());
    assert_eq!(item_move.from_index, 1);
}

#[test]
fn empty_zone_accepts_a_drop() {
    let mut c = board();
    let now = Instant::now();
    let a = order(&c, "bw-dz-a");

    let outcome = drag_to(&mut c, (190.0, 45.0), (700.0, 15.0), now);
    assert_eq!(
        outcome,
        DispatchOutcome::Placed {
            element: a[1],
            target: HoverTarget::EmptyZone,
            location: location(&c, "bw-dz-c", 0),
        }
    );
    assert_eq!(order(&c, "bw-dz-c"), vec![a[1]]);
    assert_eq!(order(&c, "bw-dz-a"), vec![a[0], a[2]]);

    let container = c.zone("bw-dz-c").expect("zone c").container();
    assert_eq!(c.surface().height(container), Some(90.0));

    c.handle_event(&PointerEvent::up(700.0, 15.0), now);
    assert_eq!(
        c.tick(now + SPEED),
        vec![ItemMove {
            from_zone: "bw-dz-a".into(),
            from_index: 1,
            to_zone: "bw-dz-c".into(),
            to_index: 0,
        }]
    );
}

#[test]
fn new_gesture_leaves_earlier_commit_settling() {
    let mut c = board();
    let now = Instant::now();
    drag_to(&mut c, (70.0, 45.0), (150.0, 440.0), now);
    c.handle_event(&PointerEvent::up(150.0, 440.0), now);

    let early = now + Duration::from_millis(10);
    let outcome = c.handle_event(&PointerEvent::down(70.0, 445.0), early);
    assert!(matches!(outcome, DispatchOutcome::Grabbed { .. }));
    assert!(c.listener().0.is_empty());
    assert_eq!(c.settling(), 1);
    // Locations describe the gesture in progress.
    assert_eq!(c.origin_location(), Some(location(&c, "bw-dz-b", 0)));
    c.handle_event(&PointerEvent::up(70.0, 445.0), early);
    assert_eq!(c.settling(), 2);
    assert_eq!(c.next_deadline(), Some(now + SPEED));

    // Each commit waits out its own delay, in release order.
    let first = c.tick(now + SPEED);
    assert_eq!(
        first,
        vec![ItemMove {
            from_zone: "bw-dz-a".into(),
            from_index: 0,
            to_zone: "bw-dz-b".into(),
            to_index: 1,
        }]
    );
    assert_eq!(c.next_deadline(), Some(early + SPEED));
    assert!(c.tick(early + SPEED - Duration::from_millis(1)).is_empty());

    let second = c.tick(early + SPEED);
    assert_eq!(
        second,
        vec![ItemMove {
            from_zone: "bw-dz-b".into(),
            from_index: 0,
            to_zone: "bw-dz-b".into(),
            to_index: 0,
        }]
    );
    assert_eq!(c.listener().0.len(), 2);
    assert_eq!(c.stats().commits, 2);
    assert_eq!(c.next_deadline(), None);
}

#[test]
fn late_tick_delivers_every_due_commit_in_order() {
    let mut c = board();
    let now = Instant::now();
    c.handle_event(&PointerEvent::down(70.0, 45.0), now);
    c.handle_event(&PointerEvent::up(70.0, 45.0), now);
    let later = now + Duration::from_millis(50);
    c.handle_event(&PointerEvent::down(190.0, 45.0), later);
    c.handle_event(&PointerEvent::up(190.0, 45.0), later);

    let fired = c.tick(later + SPEED);
    let from: Vec<usize> = fired.iter().map(|item_move| item_move.from_index).collect();
    assert_eq!(from, vec![0, 1]);
    assert_eq!(c.listener().0, fired);
}

#[test]
fn rebuild_discovers_new_items_and_abandons_drag() {
    let mut c = board();
    let now = Instant::now();
    c.handle_event(&PointerEvent::down(70.0, 45.0), now);

    let container = c.zone("bw-dz-a").expect("zone a").container();
    let added = c.surface_mut().append(container, NodeSpec::sized(100.0, 50.0));
    c.rebuild();

    assert!(!c.is_dragging());
    assert_eq!(c.zone("bw-dz-a").expect("zone a").len(), 4);
    assert_eq!(c.surface().bounds(added).origin(), brickwall::Point::new(380.0, 20.0));
    assert!(c.tick(now + SPEED).is_empty());
    assert!(c.listener().0.is_empty());
    assert_eq!(
        c.handle_event(&PointerEvent::up(70.0, 45.0), now),
        DispatchOutcome::Ignored(IgnoredReason::NotDragging)
    );
}

#[test]
fn host_lists_follow_committed_moves() {
    let mut c = board();
    let mut lists = ZoneLists::new();
    lists.insert_zone("bw-dz-a", vec!["a0", "a1", "a2"]);
    lists.insert_zone("bw-dz-b", vec!["b0", "b1"]);
    lists.insert_zone("bw-dz-c", vec![]);
    let labels: Vec<(ElementId, &str)> = order(&c, "bw-dz-a")
        .into_iter()
        .zip(["a0", "a1", "a2"])
        .chain(order(&c, "bw-dz-b").into_iter().zip(["b0", "b1"]))
        .collect();
    let label = |element: ElementId| {
        labels
            .iter()
            .find(|(candidate, _)| *candidate == element)
            .map(|(_, label)| *label)
            .expect("known element")
    };

    let mut now = Instant::now();
    let gestures = [
        ((70.0, 45.0), (150.0, 440.0)),
        ((190.0, 45.0), (700.0, 15.0)),
        ((310.0, 445.0), (40.0, 445.0)),
    ];
    for (from, to) in gestures {
        drag_to(&mut c, from, to, now);
        c.handle_event(&PointerEvent::up(to.0, to.1), now);
        now += SPEED;
        let item_move = c.tick(now).pop().expect("commit fires");
        lists.apply(&item_move).expect("move fits host lists");
    }

    for zone in ["bw-dz-a", "bw-dz-b", "bw-dz-c"] {
        let rendered: Vec<&str> = order(&c, zone).into_iter().map(label).collect();
        assert_eq!(lists.get(zone), Some(rendered.as_slice()), "{zone}");
    }
}

#[test]
fn facade_error_wraps_component_errors() {
    fn load(json: &str) -> brickwall::Result<BrickwallConfig> {
        Ok(BrickwallConfig::from_json_str(json)?)
    }
    assert!(load(r#"{ "grid_gap": 4 }"#).is_ok());
    let err = load(r#"{ "min_height": -1 }"#).unwrap_err();
    assert!(matches!(err, brickwall::Error::Config(_)));
    assert_eq!(
        err.to_string(),
        "minimum height must be a finite, non-negative number (got -1)"
    );
}
