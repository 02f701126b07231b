// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use super::{sorted_values, transferred_values};

/// The prospective target range of a place: `count` entries from `index`, clipped to `len`.
#[must_use]
pub fn placed_range(index: usize, count: usize, len: usize) -> Range<usize> {
    let start = index.min(len);
    start..(start + count).min(len)
}

/// Values after placing the dragged entries at `index` on release.
///
/// With no `target`, the move happens inside `source` and only the source
/// values are returned; otherwise the entries move into `target`.
#[must_use]
pub fn placed_values<V: Clone>(
    source: &[V],
    positions: &[usize],
    target: Option<&[V]>,
    index: usize,
) -> (Vec<V>, Option<Vec<V>>) {
    match target {
        None => (sorted_values(source, positions, index), None),
        Some(target) => {
            let (source, target) = transferred_values(source, positions, target, index);
            (source, Some(target))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_clipped() {
        assert_eq!(placed_range(1, 2, 5), 1..3);
        assert_eq!(placed_range(4, 3, 5), 4..5);
        assert_eq!(placed_range(9, 1, 5), 5..5);
    }

    #[test]
    fn places_within_and_across() {
        let (v, none) = placed_values(&['a', 'b', 'c', 'd'], &[0], None, 2);
        assert_eq!(v, ['b', 'c', 'a', 'd']);
        assert!(none.is_none());

        let (a, b) = placed_values(&['a', 'b'], &[1], Some(&['x'][..]), 0);
        assert_eq!(a, ['a']);
        assert_eq!(b.unwrap(), ['b', 'x']);
    }
}
