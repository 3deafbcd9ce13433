#![forbid(unsafe_code)]

//! Committed moves and the host callback.
//!
//! When a gesture ends the controller snapshots the move into a
//! [`PendingCommit`] due one settle delay later. The snapshot carries zone
//! ids, not live references, so a rebuild or a new gesture cannot change what
//! gets reported.

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::Location;

/// A finished move, as reported to the host.
///
/// `from_*` is where the item was grabbed; `to_*` is where it was dropped.
/// Both are reported even when equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemMove {
    pub from_zone: String,
    pub from_index: usize,
    pub to_zone: String,
    pub to_index: usize,
}

impl ItemMove {
    /// True iff the item ended where it started.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from_zone == self.to_zone && self.from_index == self.to_index
    }
}

/// Receives the final position of every completed gesture.
///
/// Called exactly once per gesture, after the settle delay. Implementations
/// should not panic; the controller has no recovery path for it.
pub trait MoveListener {
    fn on_item_moved(&mut self, item_move: &ItemMove);
}

impl<F> MoveListener for F
where
    F: FnMut(&ItemMove),
{
    fn on_item_moved(&mut self, item_move: &ItemMove) {
        self(item_move);
    }
}

/// A released gesture waiting out its settle delay.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PendingCommit {
    pub(crate) due: Instant,
    pub(crate) origin: Location,
    pub(crate) current: Location,
    pub(crate) item_move: ItemMove,
}

impl PendingCommit {
    pub(crate) fn is_due(&self, now: Instant) -> bool {
        now >= self.due
    }
}
