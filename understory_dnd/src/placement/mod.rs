// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement engine: pure functions from drag state and geometry to new values.
//!
//! Everything here is side-effect free. The controller decides *when* a
//! placement applies (validators, hooks, pending state); these functions only
//! decide *what* the resulting values are.
//!
//! Dragged items are addressed by their positions in the source values, as
//! returned by [`positions_of`]. All functions preserve the multiset of values:
//! nothing is duplicated or lost.

use alloc::vec::Vec;

mod insert;
mod place;
mod sort;
mod swap;
mod transfer;

pub use insert::{InsertPoint, InsertZone, find_insert_point, insert_zones, inserted_values};
pub use place::{placed_range, placed_values};
pub use sort::{Direction, crosses_threshold, incoming_direction, sorted_values};
pub use swap::{swapped_across, swapped_values};
pub use transfer::transferred_values;

/// Locates `dragged` inside `values` by equality.
///
/// Each dragged value claims the first unclaimed equal entry. Returns the
/// positions in ascending order, or `None` if some dragged value is missing.
///
/// ```
/// use understory_dnd::placement::positions_of;
///
/// assert_eq!(positions_of(&["a", "b", "a"], &["a", "a"]), Some(vec![0, 2]));
/// assert_eq!(positions_of(&["a", "b"], &["c"]), None);
/// ```
pub fn positions_of<V: PartialEq>(values: &[V], dragged: &[V]) -> Option<Vec<usize>> {
    let mut claimed = Vec::with_capacity(dragged.len());
    for value in dragged {
        let pos = values
            .iter()
            .enumerate()
            .position(|(i, v)| v == value && !claimed.contains(&i))?;
        claimed.push(pos);
    }
    claimed.sort_unstable();
    Some(claimed)
}

/// Splits `values` into the entries at `positions` and the rest, both in order.
fn split_out<V: Clone>(values: &[V], positions: &[usize]) -> (Vec<V>, Vec<V>) {
    let mut moved = Vec::with_capacity(positions.len());
    let mut rest = Vec::with_capacity(values.len());
    for (i, value) in values.iter().enumerate() {
        if positions.contains(&i) {
            moved.push(value.clone());
        } else {
            rest.push(value.clone());
        }
    }
    (moved, rest)
}
