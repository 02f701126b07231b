// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// Exchanges the entries at `positions` with the run starting at `index`.
///
/// The run has as many entries as there are positions. Returns `None` when the
/// run does not fit, is empty, or overlaps the dragged entries.
///
/// ```
/// use understory_dnd::placement::swapped_values;
///
/// assert_eq!(swapped_values(&["a", "b", "c", "d"], &[0], 2), Some(vec!["c", "b", "a", "d"]));
/// assert_eq!(swapped_values(&["a", "b", "c", "d"], &[0, 1], 1), None);
/// ```
#[must_use]
pub fn swapped_values<V: Clone>(values: &[V], positions: &[usize], index: usize) -> Option<Vec<V>> {
    let count = positions.len();
    if count == 0 || index + count > values.len() || positions.iter().any(|&p| p >= values.len()) {
        return None;
    }
    let run = index..index + count;
    if positions.iter().any(|p| run.contains(p)) {
        return None;
    }
    let mut out = values.to_vec();
    for (offset, &pos) in positions.iter().enumerate() {
        out.swap(pos, index + offset);
    }
    Some(out)
}

/// Exchanges the entries at `positions` of `source` with the run of `target` starting at `index`.
///
/// Returns the new source and target values, or `None` when the run does not fit.
#[must_use]
pub fn swapped_across<V: Clone>(
    source: &[V],
    positions: &[usize],
    target: &[V],
    index: usize,
) -> Option<(Vec<V>, Vec<V>)> {
    let count = positions.len();
    if count == 0 || index + count > target.len() || positions.iter().any(|&p| p >= source.len()) {
        return None;
    }
    let mut source = source.to_vec();
    let mut target = target.to_vec();
    for (offset, &pos) in positions.iter().enumerate() {
        core::mem::swap(&mut source[pos], &mut target[index + offset]);
    }
    Some((source, target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swaps_runs_of_equal_length() {
        let v = [1, 2, 3, 4, 5, 6];
        assert_eq!(swapped_values(&v, &[0, 1], 3), Some(alloc::vec![4, 5, 3, 1, 2, 6]));
        assert_eq!(swapped_values(&v, &[4], 0), Some(alloc::vec![5, 2, 3, 4, 1, 6]));
    }

    #[test]
    fn rejects_runs_that_do_not_fit() {
        assert_eq!(swapped_values(&[1, 2, 3], &[0, 1], 2), None);
        assert_eq!(swapped_values(&[1, 2, 3], &[], 0), None);
    }

    #[test]
    fn swaps_across_containers() {
        let (a, b) = swapped_across(&["a", "b"], &[1], &["x", "y", "z"], 2).unwrap();
        assert_eq!(a, ["a", "z"]);
        assert_eq!(b, ["x", "y", "b"]);
        assert!(swapped_across(&["a", "b"], &[0, 1], &["x"], 0).is_none());
    }
}
