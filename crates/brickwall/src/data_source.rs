#![forbid(unsafe_code)]

//! Host-side ordered lists, kept in sync with committed moves.
//!
//! The controller only rearranges elements; the host owns the data those
//! elements render. [`ZoneLists`] is the usual shape of that data (one
//! ordered list per zone id) and applies an [`ItemMove`] exactly the way the
//! controller moved the element: remove at `from_index`, then insert at
//! `to_index`.
//!
//! ```
//! use brickwall::{ItemMove, ZoneLists};
//!
//! let mut lists = ZoneLists::new();
//! lists.insert_zone("bw-dz-todo", vec!["write", "test"]);
//! lists.insert_zone("bw-dz-done", vec![]);
//!
//! lists
//!     .apply(&ItemMove {
//!         from_zone: "bw-dz-todo".into(),
//!         from_index: 1,
//!         to_zone: "bw-dz-done".into(),
//!         to_index: 0,
//!     })
//!     .unwrap();
//! assert_eq!(lists.get("bw-dz-done"), Some(&["test"][..]));
//! ```

use std::collections::BTreeMap;

use thiserror::Error;

use crate::commit::ItemMove;

/// Errors raised when a move does not fit the host's lists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataSourceError {
    #[error("unknown zone {0:?}")]
    UnknownZone(String),
    #[error("index {index} out of range for zone {zone:?} of length {len}")]
    IndexOutOfRange {
        zone: String,
        index: usize,
        len: usize,
    },
}

pub type Result<T> = std::result::Result<T, DataSourceError>;

/// One ordered list per zone id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneLists<T> {
    lists: BTreeMap<String, Vec<T>>,
}

impl<T> Default for ZoneLists<T> {
    fn default() -> Self {
        Self {
            lists: BTreeMap::new(),
        }
    }
}

impl<T> ZoneLists<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the list for `zone`.
    pub fn insert_zone(&mut self, zone: impl Into<String>, items: Vec<T>) -> Option<Vec<T>> {
        self.lists.insert(zone.into(), items)
    }

    #[must_use]
    pub fn get(&self, zone: &str) -> Option<&[T]> {
        self.lists.get(zone).map(Vec::as_slice)
    }

    /// Zone ids in sorted order.
    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.lists.keys().map(String::as_str)
    }

    /// Total number of items across zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mirror a committed move.
    ///
    /// Validation happens before any mutation: on error the lists are
    /// unchanged.
    pub fn apply(&mut self, item_move: &ItemMove) -> Result<()> {
        let from_len = self.len_of(&item_move.from_zone)?;
        if item_move.from_index >= from_len {
            return Err(DataSourceError::IndexOutOfRange {
                zone: item_move.from_zone.clone(),
                index: item_move.from_index,
                len: from_len,
            });
        }

        let same_zone = item_move.from_zone == item_move.to_zone;
        let to_len = if same_zone {
            from_len - 1
        } else {
            self.len_of(&item_move.to_zone)?
        };
        if item_move.to_index > to_len {
            return Err(DataSourceError::IndexOutOfRange {
                zone: item_move.to_zone.clone(),
                index: item_move.to_index,
                len: to_len,
            });
        }

        let item = self.list_mut(&item_move.from_zone)?.remove(item_move.from_index);
        self.list_mut(&item_move.to_zone)?
            .insert(item_move.to_index, item);
        Ok(())
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, Vec<T>> {
        self.lists
    }

    fn len_of(&self, zone: &str) -> Result<usize> {
        self.lists
            .get(zone)
            .map(Vec::len)
            .ok_or_else(|| DataSourceError::UnknownZone(zone.to_owned()))
    }

    fn list_mut(&mut self, zone: &str) -> Result<&mut Vec<T>> {
        self.lists
            .get_mut(zone)
            .ok_or_else(|| DataSourceError::UnknownZone(zone.to_owned()))
    }
}

impl<T> FromIterator<(String, Vec<T>)> for ZoneLists<T> {
    fn from_iter<I: IntoIterator<Item = (String, Vec<T>)>>(iter: I) -> Self {
        Self {
            lists: iter.into_iter().collect(),
        }
    }
}
