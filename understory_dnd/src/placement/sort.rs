// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`
use kurbo::{Point, Rect};

use super::split_out;
use crate::config::Threshold;

/// Side from which the dragged node approaches a hovered node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Coming from above, moving down.
    Above,
    /// Coming from below, moving up.
    Below,
    /// Coming from the left, moving right.
    Left,
    /// Coming from the right, moving left.
    Right,
}

/// Direction of approach, from the larger axis of the center-to-center delta.
///
/// Vertical wins ties.
#[must_use]
pub fn incoming_direction(hovered: Rect, dragged: Rect) -> Direction {
    let delta = hovered.center() - dragged.center();
    if delta.y.abs() >= delta.x.abs() {
        if delta.y > 0.0 {
            Direction::Above
        } else {
            Direction::Below
        }
    } else if delta.x > 0.0 {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Whether `pointer` is far enough into `hovered` to accept a sort.
///
/// The acceptance line sits past the midpoint on the far side, offset by the
/// threshold fraction of the half-extent along the direction of travel.
#[must_use]
pub fn crosses_threshold(
    direction: Direction,
    hovered: Rect,
    pointer: Point,
    threshold: Threshold,
) -> bool {
    let center = hovered.center();
    let half_h = hovered.height() / 2.0 * threshold.vertical;
    let half_w = hovered.width() / 2.0 * threshold.horizontal;
    match direction {
        Direction::Above => pointer.y >= center.y + half_h,
        Direction::Below => pointer.y <= center.y - half_h,
        Direction::Left => pointer.x >= center.x + half_w,
        Direction::Right => pointer.x <= center.x - half_w,
    }
}

/// Moves the entries at `positions` so that the first lands at `index`.
///
/// `index` is the hovered node's index in `values`; it is clamped to the
/// remaining length once the dragged entries are removed.
///
/// ```
/// use understory_dnd::placement::sorted_values;
///
/// let fruit = ["Apple", "Banana", "Orange"];
/// assert_eq!(sorted_values(&fruit, &[0], 1), ["Banana", "Apple", "Orange"]);
/// ```
#[must_use]
pub fn sorted_values<V: Clone>(values: &[V], positions: &[usize], index: usize) -> Vec<V> {
    let (moved, mut rest) = split_out(values, positions);
    let at = index.min(rest.len());
    rest.splice(at..at, moved);
    rest
}
