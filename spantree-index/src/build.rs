//! Packing a sorted batch of values into an implicit complete binary tree.
//!
//! Slot `i` has children `2i + 1` and `2i + 2`. For `N` values the tree has
//! `L = floor(log2(N + 1))` full levels holding `2^L - 1` values, and the
//! remaining `E` values sit on a partial last level, filled left to right.
//! In sorted order those last-level values are exactly the ones at positions
//! `0, 2, .., 2(E - 1)`: each is followed by the upper-level value that is its
//! parent or the next ancestor in the in-order walk.

use spantree_core::models::Introspector;

#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) max_end_node: usize,
}

#[inline]
pub(crate) fn left(slot: usize) -> usize {
    2 * slot + 1
}

#[inline]
pub(crate) fn right(slot: usize) -> usize {
    2 * slot + 2
}

/// Number of full levels, and of values left over for the partial last level.
pub(crate) fn level_split(count: usize) -> (u32, usize) {
    let full_levels = usize::BITS - 1 - (count + 1).leading_zeros();
    let perfect = (1usize << full_levels) - 1;
    (full_levels, count - perfect)
}

///
/// Compute the destination slot of every sorted position.
///
/// `slots[p]` is the tree slot receiving the value at sorted position `p`.
///
pub(crate) fn slot_order(count: usize) -> Vec<usize> {
    let (_, last_level) = level_split(count);
    let perfect = count - last_level;

    let mut slots = vec![0; count];
    for k in 0..last_level {
        slots[2 * k] = perfect + k;
    }
    place_upper_levels(&mut slots, 0, perfect, 0, last_level);

    slots
}

/// Sorted position of the `k`th value that belongs to the full upper levels.
#[inline]
fn upper_source(k: usize, last_level: usize) -> usize {
    if k < last_level {
        2 * k + 1
    } else {
        k + last_level
    }
}

/// Put the median of upper-level values `[lo, hi)` at `slot`, then recurse into its children.
fn place_upper_levels(slots: &mut [usize], lo: usize, hi: usize, slot: usize, last_level: usize) {
    if lo >= hi {
        return;
    }
    let mid = lo + (hi - lo) / 2;
    slots[upper_source(mid, last_level)] = slot;
    place_upper_levels(slots, lo, mid, left(slot), last_level);
    place_upper_levels(slots, mid + 1, hi, right(slot), last_level);
}

/// Move every value to its slot in place, following permutation cycles.
fn apply_slots<T>(values: &mut [T], slots: &mut [usize]) {
    for i in 0..values.len() {
        while slots[i] != i {
            let target = slots[i];
            values.swap(i, target);
            slots.swap(i, target);
        }
    }
}

///
/// Pack values already sorted by start into tree slots and compute the
/// max-end augmentation bottom up.
///
/// On equal ends a node prefers itself over its children, and its left child
/// over its right child.
///
pub(crate) fn pack<T, I>(mut values: Vec<T>, introspector: &I) -> Vec<Node<T>>
where
    I: Introspector<T>,
{
    let count = values.len();
    let mut slots = slot_order(count);
    apply_slots(&mut values, &mut slots);

    let mut nodes: Vec<Node<T>> = values
        .into_iter()
        .enumerate()
        .map(|(slot, value)| Node {
            value,
            max_end_node: slot,
        })
        .collect();

    for slot in (0..count).rev() {
        let mut best = slot;
        let mut best_end = introspector.end(&nodes[slot].value);

        for child in [left(slot), right(slot)] {
            if child < count {
                let candidate = nodes[child].max_end_node;
                let candidate_end = introspector.end(&nodes[candidate].value);
                if candidate_end > best_end {
                    best = candidate;
                    best_end = candidate_end;
                }
            }
        }

        nodes[slot].max_end_node = best;
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use spantree_core::models::{Interval, IntervalSpan};

    /// In-order slot sequence of the complete tree on `count` nodes.
    fn in_order_slots(count: usize) -> Vec<usize> {
        let mut order = Vec::with_capacity(count);
        let mut stack = Vec::new();
        let mut current = (count > 0).then_some(0);
        loop {
            while let Some(slot) = current {
                stack.push(slot);
                current = (left(slot) < count).then_some(left(slot));
            }
            let Some(slot) = stack.pop() else { break };
            order.push(slot);
            current = (right(slot) < count).then_some(right(slot));
        }
        order
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(1, 1, 0)]
    #[case(2, 1, 1)]
    #[case(3, 2, 0)]
    #[case(6, 2, 3)]
    #[case(7, 3, 0)]
    #[case(8, 3, 1)]
    fn test_level_split(#[case] count: usize, #[case] levels: u32, #[case] last_level: usize) {
        assert_eq!(level_split(count), (levels, last_level));
    }

    #[rstest]
    fn test_slot_order_matches_in_order_walk() {
        for count in 0..200 {
            assert_eq!(slot_order(count), in_order_slots(count), "count = {}", count);
        }
    }

    #[rstest]
    fn test_slot_order_small() {
        // position 3 at the root, 1 and 5 below it, 0 2 4 on the last level
        assert_eq!(slot_order(6), vec![3, 1, 4, 0, 5, 2]);
    }

    #[rstest]
    fn test_pack_places_values_and_augments() {
        let values: Vec<Interval<i32, char>> = vec![
            Interval { start: 0, end: 3, val: 'a' },
            Interval { start: 5, end: 7, val: 'b' },
            Interval { start: 10, end: 11, val: 'c' },
            Interval { start: 12, end: 16, val: 'd' },
        ];
        let nodes = pack(values, &IntervalSpan);

        let labels: Vec<char> = nodes.iter().map(|n| n.value.val).collect();
        assert_eq!(labels, vec!['c', 'b', 'd', 'a']);

        let max_end: Vec<usize> = nodes.iter().map(|n| n.max_end_node).collect();
        assert_eq!(max_end, vec![2, 1, 2, 3]);
    }

    #[rstest]
    fn test_augmentation_tie_prefers_self_then_left() {
        let values: Vec<Interval<i32, u8>> = vec![
            Interval { start: 0, end: 9, val: 0 },
            Interval { start: 1, end: 9, val: 1 },
            Interval { start: 2, end: 9, val: 2 },
        ];
        let nodes = pack(values, &IntervalSpan);
        assert_eq!(nodes[0].max_end_node, 0);

        let values: Vec<Interval<i32, u8>> = vec![
            Interval { start: 0, end: 9, val: 0 },
            Interval { start: 1, end: 2, val: 1 },
            Interval { start: 2, end: 9, val: 2 },
        ];
        let nodes = pack(values, &IntervalSpan);
        assert_eq!(nodes[0].max_end_node, 1);
    }
}
