use spantree_core::errors::SpanResult;
use spantree_core::models::{Introspector, Span};

use crate::build::{self, Node};
use crate::pool::{self, ScratchPool};
use crate::predicates;
use crate::traits::NodeTree;
use crate::traversal::{self, InOrder};

/// A static interval tree packed into a single array.
///
/// The tree is the complete binary tree on its `N` values: slot `i` has
/// children `2i + 1` and `2i + 2`, an in-order walk visits values by
/// ascending start, and every slot records which slot of its subtree holds
/// the greatest end. It is built once and never modified, so it can be
/// shared freely across threads.
///
/// # Examples
///
/// ```
/// use spantree_index::{SpanTree, predicates};
/// use spantree_core::models::{Interval, IntervalSpan};
///
/// let diagnostics = vec![
///     Interval { start: 12i64, end: 16, val: "unused import" },
///     Interval { start: 0, end: 3, val: "missing semicolon" },
///     Interval { start: 5, end: 7, val: "type mismatch" },
/// ];
///
/// let tree = SpanTree::build(diagnostics, IntervalSpan).unwrap();
///
/// assert_eq!(tree.any_overlap(4, 2, predicates::overlaps).unwrap(), true);
/// assert_eq!(tree.any_overlap(7, 2, predicates::overlaps).unwrap(), false);
///
/// let mut hits = Vec::new();
/// tree.collect_matching(0, 20, predicates::overlaps, &mut hits, false).unwrap();
/// assert_eq!(hits.len(), 3);
/// assert_eq!(hits[0].val, "missing semicolon");
/// ```
#[derive(Debug, Clone)]
pub struct SpanTree<T, I> {
    nodes: Box<[Node<T>]>,
    introspector: I,
}

impl<T, I> SpanTree<T, I> {
    /// A tree with no values. Does not allocate.
    pub fn empty(introspector: I) -> Self {
        SpanTree {
            nodes: Vec::new().into_boxed_slice(),
            introspector,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels, zero for an empty tree.
    pub fn depth(&self) -> usize {
        (usize::BITS - self.nodes.len().leading_zeros()) as usize
    }

    pub fn introspector(&self) -> &I {
        &self.introspector
    }

    /// Iterate over all values in ascending start order.
    pub fn iter(&self) -> InOrder<'_, Self> {
        traversal::in_order(self)
    }
}

impl<T, I> SpanTree<T, I>
where
    I: Introspector<T>,
{
    ///
    /// Build a tree from values in any order.
    ///
    /// `values` is sorted in place by start (unstable: the relative order of
    /// values with equal starts is unspecified) and then packed.
    ///
    /// # Errors
    /// - [`spantree_core::errors::SpanError::InvertedSpan`] if a value's end precedes its start
    ///
    pub fn build(mut values: Vec<T>, introspector: I) -> SpanResult<Self> {
        values.sort_unstable_by_key(|value| introspector.start(value));
        Self::build_sorted(values, introspector)
    }

    ///
    /// Build a tree from values already sorted by start.
    ///
    /// Passing unsorted values is a caller bug: debug builds panic, release
    /// builds produce a tree whose query results are unreliable.
    ///
    /// # Errors
    /// - [`spantree_core::errors::SpanError::InvertedSpan`] if a value's end precedes its start
    ///
    pub fn build_sorted(values: Vec<T>, introspector: I) -> SpanResult<Self> {
        for value in values.iter() {
            let span = introspector.span(value);
            Span::new(span.start, span.end)?;
        }

        debug_assert!(
            values
                .windows(2)
                .all(|pair| introspector.start(&pair[0]) <= introspector.start(&pair[1])),
            "values passed to build_sorted must be ordered by start"
        );

        if values.is_empty() {
            return Ok(Self::empty(introspector));
        }

        let tree = SpanTree {
            nodes: build::pack(values, &introspector).into_boxed_slice(),
            introspector,
        };
        log::debug!(
            "built span tree with {} values over {} levels",
            tree.len(),
            tree.depth()
        );

        Ok(tree)
    }

    /// The greatest end over all values, `None` for an empty tree.
    pub fn max_end(&self) -> Option<I::Position> {
        self.try_get_root()
            .map(|root| traversal::subtree_max_end(self, &self.introspector, root))
    }

    ///
    /// Append the values matching `predicate` to `out` in ascending start order.
    ///
    /// See [`traversal::collect_matching`].
    ///
    pub fn collect_matching<'a, F>(
        &'a self,
        start: I::Position,
        length: I::Position,
        predicate: F,
        out: &mut Vec<&'a T>,
        stop_after_first: bool,
    ) -> SpanResult<usize>
    where
        F: FnMut(&T, I::Position, I::Position, &I) -> bool,
    {
        traversal::collect_matching(
            self,
            &self.introspector,
            start,
            length,
            predicate,
            out,
            stop_after_first,
        )
    }

    ///
    /// Check whether any value matches `predicate`, pruning subtrees that cannot.
    ///
    /// See [`traversal::any_overlap`].
    ///
    pub fn any_overlap<F>(
        &self,
        start: I::Position,
        length: I::Position,
        predicate: F,
    ) -> SpanResult<bool>
    where
        F: FnMut(&T, I::Position, I::Position, &I) -> bool,
    {
        traversal::any_overlap(self, &self.introspector, start, length, predicate)
    }

    /// Every value overlapping `[start, start + length)`, ascending by start.
    pub fn find_overlapping(&self, start: I::Position, length: I::Position) -> SpanResult<Vec<&T>> {
        let mut hits = Vec::new();
        self.collect_matching(start, length, predicates::overlaps, &mut hits, false)?;
        Ok(hits)
    }

    /// The lowest-start value overlapping `[start, start + length)`.
    pub fn first_overlapping(
        &self,
        start: I::Position,
        length: I::Position,
    ) -> SpanResult<Option<&T>> {
        let mut hits = Vec::with_capacity(1);
        self.collect_matching(start, length, predicates::overlaps, &mut hits, true)?;
        Ok(hits.pop())
    }

    pub fn has_overlap(&self, start: I::Position, length: I::Position) -> SpanResult<bool> {
        self.any_overlap(start, length, predicates::overlaps)
    }

    /// Every value overlapping or touching `[start, start + length)`.
    pub fn find_intersecting(
        &self,
        start: I::Position,
        length: I::Position,
    ) -> SpanResult<Vec<&T>> {
        let mut hits = Vec::new();
        self.collect_matching(start, length, predicates::intersects, &mut hits, false)?;
        Ok(hits)
    }

    pub fn has_intersecting(&self, start: I::Position, length: I::Position) -> SpanResult<bool> {
        self.any_overlap(start, length, predicates::intersects)
    }

    /// Every value whose span contains all of `[start, start + length)`.
    pub fn find_containing(
        &self,
        start: I::Position,
        length: I::Position,
    ) -> SpanResult<Vec<&T>> {
        let mut hits = Vec::new();
        self.collect_matching(start, length, predicates::contains, &mut hits, false)?;
        Ok(hits)
    }

    pub fn has_containing(&self, start: I::Position, length: I::Position) -> SpanResult<bool> {
        self.any_overlap(start, length, predicates::contains)
    }
}

impl<T, I: Default> Default for SpanTree<T, I> {
    fn default() -> Self {
        Self::empty(I::default())
    }
}

impl<T, I> NodeTree for SpanTree<T, I> {
    type Value = T;
    type Node = usize;

    #[inline]
    fn try_get_root(&self) -> Option<usize> {
        (!self.nodes.is_empty()).then_some(0)
    }

    #[inline]
    fn try_get_left_child(&self, node: usize) -> Option<usize> {
        let child = build::left(node);
        (child < self.nodes.len()).then_some(child)
    }

    #[inline]
    fn try_get_right_child(&self, node: usize) -> Option<usize> {
        let child = build::right(node);
        (child < self.nodes.len()).then_some(child)
    }

    #[inline]
    fn value(&self, node: usize) -> &T {
        &self.nodes[node].value
    }

    #[inline]
    fn max_end_node(&self, node: usize) -> usize {
        self.nodes[node].max_end_node
    }

    fn scratch_pool(&self) -> Option<&ScratchPool<usize>> {
        Some(pool::shared())
    }
}

impl<'a, T, I> IntoIterator for &'a SpanTree<T, I> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, SpanTree<T, I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};
    use spantree_core::errors::SpanError;
    use spantree_core::models::{Interval, IntervalSpan};

    type Tree = SpanTree<Interval<i32, &'static str>, IntervalSpan>;

    fn interval(start: i32, length: i32, val: &'static str) -> Interval<i32, &'static str> {
        Interval {
            start,
            end: start + length,
            val,
        }
    }

    #[fixture]
    fn intervals() -> Vec<Interval<i32, &'static str>> {
        vec![
            interval(0, 3, "a"),
            interval(5, 2, "b"),
            interval(10, 1, "c"),
            interval(12, 4, "d"),
        ]
    }

    #[fixture]
    fn tree(intervals: Vec<Interval<i32, &'static str>>) -> Tree {
        SpanTree::build_sorted(intervals, IntervalSpan).unwrap()
    }

    fn vals(hits: &[&Interval<i32, &'static str>]) -> Vec<&'static str> {
        hits.iter().map(|i| i.val).collect()
    }

    #[rstest]
    fn test_build_and_len(tree: Tree) {
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.is_empty(), false);
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.max_end(), Some(16));
    }

    #[rstest]
    fn test_any_overlap(tree: Tree) {
        assert_eq!(tree.any_overlap(4, 2, predicates::overlaps), Ok(true));
        assert_eq!(tree.any_overlap(7, 2, predicates::overlaps), Ok(false));
    }

    #[rstest]
    fn test_collect_everything_in_order(tree: Tree) {
        let mut hits = Vec::new();
        let count = tree
            .collect_matching(0, 20, predicates::overlaps, &mut hits, false)
            .unwrap();
        assert_eq!(count, 4);
        assert_eq!(vals(&hits), vec!["a", "b", "c", "d"]);
    }

    #[rstest]
    fn test_collect_appends_to_existing_buffer(tree: Tree) {
        let extra = interval(100, 1, "x");
        let mut hits = vec![&extra];
        let count = tree
            .collect_matching(9, 4, predicates::overlaps, &mut hits, false)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(vals(&hits), vec!["x", "c", "d"]);
    }

    #[rstest]
    fn test_stop_after_first_returns_lowest_start(tree: Tree) {
        let mut hits = Vec::new();
        let count = tree
            .collect_matching(6, 10, predicates::overlaps, &mut hits, true)
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(vals(&hits), vec!["b"]);
        assert_eq!(tree.first_overlapping(6, 10).unwrap().map(|i| i.val), Some("b"));
        assert_eq!(tree.first_overlapping(7, 2).unwrap(), None);
    }

    #[rstest]
    fn test_custom_predicate(tree: Tree) {
        let mut hits = Vec::new();
        tree.collect_matching(
            0,
            0,
            |value, _, _, _| value.length() > 1,
            &mut hits,
            false,
        )
        .unwrap();
        assert_eq!(vals(&hits), vec!["a", "b", "d"]);
    }

    #[rstest]
    fn test_named_queries(tree: Tree) {
        assert_eq!(vals(&tree.find_overlapping(2, 4).unwrap()), vec!["a", "b"]);
        assert_eq!(vals(&tree.find_intersecting(3, 2).unwrap()), vec!["a", "b"]);
        assert_eq!(vals(&tree.find_containing(13, 2).unwrap()), vec!["d"]);
        assert_eq!(tree.has_overlap(3, 2), Ok(false));
        assert_eq!(tree.has_intersecting(3, 2), Ok(true));
        assert_eq!(tree.has_containing(13, 2), Ok(true));
        assert_eq!(tree.has_containing(9, 3), Ok(false));
    }

    #[rstest]
    fn test_negative_query_length_rejected(tree: Tree) {
        let err = tree.any_overlap(5, -1, predicates::overlaps).unwrap_err();
        assert_eq!(matches!(err, SpanError::NegativeLength { .. }), true);

        let mut hits = Vec::new();
        let result = tree.collect_matching(5, -1, predicates::overlaps, &mut hits, false);
        assert_eq!(result.is_err(), true);
        assert_eq!(hits.is_empty(), true);
    }

    #[rstest]
    fn test_negative_stored_length_rejected() {
        let bad = vec![Interval {
            start: 5,
            end: 2,
            val: "bad",
        }];
        let result = SpanTree::build(bad, IntervalSpan);
        assert_eq!(matches!(result, Err(SpanError::InvertedSpan { .. })), true);
    }

    #[rstest]
    fn test_empty_tree() {
        let tree: Tree = SpanTree::build(vec![], IntervalSpan).unwrap();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.is_empty(), true);
        assert_eq!(tree.depth(), 0);
        assert_eq!(tree.max_end(), None);
        assert_eq!(tree.iter().count(), 0);
        assert_eq!(tree.any_overlap(0, 100, predicates::overlaps), Ok(false));
        assert_eq!(tree.find_overlapping(0, 100).unwrap().is_empty(), true);

        let default: Tree = SpanTree::default();
        assert_eq!(default.is_empty(), true);
    }

    #[rstest]
    fn test_point_interval() {
        let tree = SpanTree::build(vec![interval(5, 0, "p")], IntervalSpan).unwrap();
        assert_eq!(tree.any_overlap(5, 0, predicates::overlaps), Ok(true));
        assert_eq!(tree.any_overlap(6, 0, predicates::overlaps), Ok(false));
        assert_eq!(tree.any_overlap(4, 2, predicates::overlaps), Ok(true));
        assert_eq!(tree.any_overlap(3, 2, predicates::overlaps), Ok(false));
    }

    #[rstest]
    fn test_build_sorts_unsorted_input(intervals: Vec<Interval<i32, &'static str>>) {
        let mut shuffled = intervals.clone();
        shuffled.reverse();
        shuffled.swap(0, 2);
        let tree = SpanTree::build(shuffled, IntervalSpan).unwrap();
        let order: Vec<&str> = tree.iter().map(|i| i.val).collect();
        assert_eq!(order, vec!["a", "b", "c", "d"]);
    }

    #[rstest]
    fn test_iteration_is_restartable(tree: Tree) {
        let first: Vec<&str> = tree.iter().map(|i| i.val).collect();
        let second: Vec<&str> = (&tree).into_iter().map(|i| i.val).collect();
        assert_eq!(first, second);
    }

    #[rstest]
    #[should_panic(expected = "must be ordered by start")]
    #[cfg(debug_assertions)]
    fn test_unsorted_input_asserts_in_debug(intervals: Vec<Interval<i32, &'static str>>) {
        let mut unsorted = intervals;
        unsorted.reverse();
        let _ = SpanTree::build_sorted(unsorted, IntervalSpan);
    }

    #[rstest]
    fn test_concurrent_queries() {
        let values: Vec<_> = (0..2000)
            .map(|i| interval(i * 3, i % 7, "v"))
            .collect();
        let tree = SpanTree::build(values, IntervalSpan).unwrap();

        std::thread::scope(|scope| {
            for worker in 0..4 {
                let tree = &tree;
                scope.spawn(move || {
                    for q in (worker..6000).step_by(4) {
                        let exists = tree.has_overlap(q, 1).unwrap();
                        let found = tree.find_overlapping(q, 1).unwrap();
                        assert_eq!(exists, !found.is_empty());
                    }
                });
            }
        });
    }
}
