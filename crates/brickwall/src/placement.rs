#![forbid(unsafe_code)]

//! Index placement decisions.
//!
//! Given where the dragged item currently sits in the hovered zone (if at
//! all) and what the pointer is over, decide which index it should occupy.
//! These functions are pure; the controller applies the result.
//!
//! # Same-zone tie-break
//!
//! `direction_left` means the dragged item currently sits after the hovered
//! item, i.e. it is being carried leftward past it.
//!
//! | left half | direction_left | target |
//! |-----------|----------------|--------|
//! | yes       | no             | hovered - 1 |
//! | yes       | yes            | hovered |
//! | no        | no             | hovered |
//! | no        | yes            | hovered + 1 |
//!
//! Negative targets clamp to 0. A target equal to the current index is a
//! no-op, which keeps a stationary pointer from thrashing the order.

/// What to do with the dragged item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Bring the item over from another zone at `index`.
    Insert { index: usize },
    /// Reorder within the zone via remove-then-reinsert.
    Move { from: usize, to: usize },
    /// Already in place.
    Stay,
}

/// Pointer over the body of the item at `hovered`.
#[must_use]
pub fn decide_body(dragged: Option<usize>, hovered: usize, left_half: bool) -> Decision {
    let Some(dragged) = dragged else {
        let index = if left_half { hovered } else { hovered + 1 };
        return Decision::Insert { index };
    };

    let direction_left = dragged > hovered;
    let target = match (left_half, direction_left) {
        (true, false) => hovered.saturating_sub(1),
        (true, true) | (false, false) => hovered,
        (false, true) => hovered + 1,
    };
    reorder(dragged, target)
}

/// Pointer over the empty space trailing the row of the item at `hovered`.
#[must_use]
pub fn decide_trailing(dragged: Option<usize>, hovered: usize) -> Decision {
    let Some(dragged) = dragged else {
        return Decision::Insert { index: hovered + 1 };
    };

    let direction_left = dragged > hovered;
    let target = if direction_left { hovered + 1 } else { hovered };
    reorder(dragged, target)
}

fn reorder(from: usize, to: usize) -> Decision {
    if from == to {
        Decision::Stay
    } else {
        Decision::Move { from, to }
    }
}
