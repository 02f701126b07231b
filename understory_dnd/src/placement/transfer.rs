// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use super::split_out;

/// Moves the entries at `positions` of `source` into `target` at `index`.
///
/// `index` is clamped to the target length, so passing `target.len()` (or
/// anything larger) appends. Returns the new source and target values.
///
/// ```
/// use understory_dnd::placement::transferred_values;
///
/// let (a, b) = transferred_values(&["Apple", "Banana", "Orange"], &[0], &["Cherry", "Grape"], 2);
/// assert_eq!(a, ["Banana", "Orange"]);
/// assert_eq!(b, ["Cherry", "Grape", "Apple"]);
/// ```
#[must_use]
pub fn transferred_values<V: Clone>(
    source: &[V],
    positions: &[usize],
    target: &[V],
    index: usize,
) -> (Vec<V>, Vec<V>) {
    let (moved, rest) = split_out(source, positions);
    let mut target = target.to_vec();
    let at = index.min(target.len());
    target.splice(at..at, moved);
    (rest, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inserts_at_the_hovered_index() {
        let (a, b) = transferred_values(&["Apple", "Banana", "Orange"], &[0], &["Cherry", "Grape"], 1);
        assert_eq!(a, ["Banana", "Orange"]);
        assert_eq!(b, ["Cherry", "Apple", "Grape"]);
    }

    #[test]
    fn into_an_empty_target() {
        let (a, b) = transferred_values(&[1, 2, 3], &[0, 2], &[], 0);
        assert_eq!(a, [2]);
        assert_eq!(b, [1, 3]);
    }
}
