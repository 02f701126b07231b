// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use super::split_out;

/// Thickness of insertion markers.
const MARKER_THICKNESS: f64 = 2.0;

/// Acceptance zones of one enabled node.
///
/// The node's box is split at its midpoint along the list axis. Each half is
/// extended by half the gap to the neighbor on that side, so the zones of
/// adjacent nodes tile the space between them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InsertZone {
    /// Index of the node among the enabled nodes.
    pub index: usize,
    /// The node's neighbors sit beside it rather than above and below.
    pub horizontal: bool,
    /// Leading half: inserting here puts the dragged values before the node.
    pub descending: Rect,
    /// Trailing half: inserting here puts the dragged values after the node.
    pub ascending: Rect,
    /// Marker drawn for an insertion before the node.
    pub before_marker: Rect,
    /// Marker drawn for an insertion after the node.
    pub after_marker: Rect,
}

/// An insertion point chosen by [`find_insert_point`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InsertPoint {
    /// Insertion index among the enabled nodes, in `0..=len`.
    pub index: usize,
    /// Where to draw the marker.
    pub marker: Rect,
}

fn same_line(a: Rect, b: Rect) -> bool {
    a.y0 < b.y1 && b.y0 < a.y1
}

/// Computes the insertion zones of nodes laid out at `rects`, in index order.
///
/// Nodes that share a line with a neighbor (overlapping vertical extents) are
/// split horizontally; the rest are split vertically. This keeps wrapped rows
/// working: each row behaves like a horizontal list and rows stack.
#[must_use]
pub fn insert_zones(rects: &[Rect]) -> Vec<InsertZone> {
    let mut zones = Vec::with_capacity(rects.len());
    for (index, &rect) in rects.iter().enumerate() {
        let prev = index.checked_sub(1).map(|i| rects[i]);
        let next = rects.get(index + 1).copied();
        let horizontal = prev.is_some_and(|p| same_line(p, rect))
            || next.is_some_and(|n| same_line(n, rect));
        let half = MARKER_THICKNESS / 2.0;
        let zone = if horizontal {
            let lead = prev
                .filter(|p| same_line(*p, rect) && p.x1 <= rect.x0)
                .map_or(0.0, |p| (rect.x0 - p.x1) / 2.0);
            let trail = next
                .filter(|n| same_line(*n, rect) && n.x0 >= rect.x1)
                .map_or(0.0, |n| (n.x0 - rect.x1) / 2.0);
            let mid = rect.center().x;
            let before = rect.x0 - lead;
            let after = rect.x1 + trail;
            InsertZone {
                index,
                horizontal,
                descending: Rect::new(before, rect.y0, mid, rect.y1),
                ascending: Rect::new(mid, rect.y0, after, rect.y1),
                before_marker: Rect::new(before - half, rect.y0, before + half, rect.y1),
                after_marker: Rect::new(after - half, rect.y0, after + half, rect.y1),
            }
        } else {
            let lead = prev
                .filter(|p| p.y1 <= rect.y0)
                .map_or(0.0, |p| (rect.y0 - p.y1) / 2.0);
            let trail = next
                .filter(|n| n.y0 >= rect.y1)
                .map_or(0.0, |n| (n.y0 - rect.y1) / 2.0);
            let mid = rect.center().y;
            let before = rect.y0 - lead;
            let after = rect.y1 + trail;
            InsertZone {
                index,
                horizontal,
                descending: Rect::new(rect.x0, before, rect.x1, mid),
                ascending: Rect::new(rect.x0, mid, rect.x1, after),
                before_marker: Rect::new(rect.x0, before - half, rect.x1, before + half),
                after_marker: Rect::new(rect.x0, after - half, rect.x1, after + half),
            }
        };
        zones.push(zone);
    }
    zones
}

/// Returns the insertion point of the first zone containing `pt`.
#[must_use]
pub fn find_insert_point(zones: &[InsertZone], pt: Point) -> Option<InsertPoint> {
    zones.iter().find_map(|zone| {
        if zone.descending.contains(pt) {
            Some(InsertPoint {
                index: zone.index,
                marker: zone.before_marker,
            })
        } else if zone.ascending.contains(pt) {
            Some(InsertPoint {
                index: zone.index + 1,
                marker: zone.after_marker,
            })
        } else {
            None
        }
    })
}

/// Moves the entries at `positions` to insertion index `index` (in `0..=len`).
///
/// The index refers to gaps between the original entries, so inserting a node
/// right before or right after itself leaves the values unchanged.
///
/// ```
/// use understory_dnd::placement::inserted_values;
///
/// assert_eq!(inserted_values(&['a', 'b', 'c', 'd'], &[0], 3), ['b', 'c', 'a', 'd']);
/// assert_eq!(inserted_values(&['a', 'b', 'c', 'd'], &[0], 1), ['a', 'b', 'c', 'd']);
/// ```
#[must_use]
pub fn inserted_values<V: Clone>(values: &[V], positions: &[usize], index: usize) -> Vec<V> {
    let shift = positions.iter().filter(|&&p| p < index).count();
    let (moved, mut rest) = split_out(values, positions);
    let at = index.saturating_sub(shift).min(rest.len());
    rest.splice(at..at, moved);
    rest
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(n: usize) -> Vec<Rect> {
        (0..n)
            .map(|i| {
                let y = i as f64 * 60.0;
                Rect::new(0.0, y, 100.0, y + 50.0)
            })
            .collect()
    }

    #[test]
    fn vertical_zones_split_gaps() {
        let zones = insert_zones(&column(3));
        assert!(!zones[1].horizontal);
        assert_eq!(zones[1].descending, Rect::new(0.0, 55.0, 100.0, 85.0));
        assert_eq!(zones[1].ascending, Rect::new(0.0, 85.0, 100.0, 115.0));
        assert_eq!(zones[0].descending.y0, 0.0);
        assert_eq!(zones[2].ascending.y1, 170.0);
        assert_eq!(zones[1].before_marker, Rect::new(0.0, 54.0, 100.0, 56.0));
    }

    #[test]
    fn rows_split_horizontally() {
        let row = [
            Rect::new(0.0, 0.0, 40.0, 40.0),
            Rect::new(50.0, 0.0, 90.0, 40.0),
        ];
        let zones = insert_zones(&row);
        assert!(zones[0].horizontal);
        assert_eq!(zones[0].ascending, Rect::new(20.0, 0.0, 45.0, 40.0));
        assert_eq!(zones[1].descending, Rect::new(45.0, 0.0, 70.0, 40.0));
    }

    #[test]
    fn finds_the_gap_under_the_pointer() {
        let zones = insert_zones(&column(3));
        let pt = find_insert_point(&zones, Point::new(10.0, 110.0)).unwrap();
        assert_eq!(pt.index, 2);
        assert_eq!(pt.marker, zones[1].after_marker);
        let pt = find_insert_point(&zones, Point::new(10.0, 2.0)).unwrap();
        assert_eq!(pt.index, 0);
        assert!(find_insert_point(&zones, Point::new(150.0, 10.0)).is_none());
    }

    #[test]
    fn inserting_moves_across_the_gap() {
        let v = [1, 2, 3, 4];
        assert_eq!(inserted_values(&v, &[3], 0), [4, 1, 2, 3]);
        assert_eq!(inserted_values(&v, &[0], 4), [2, 3, 4, 1]);
        assert_eq!(inserted_values(&v, &[1, 2], 4), [1, 4, 2, 3]);
    }
}
