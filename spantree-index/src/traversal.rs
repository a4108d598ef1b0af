//! Query algorithms over any [`NodeTree`].
//!
//! All traversals use an explicit stack borrowed from the tree's scratch pool,
//! never recursion, so deep trees cannot exhaust the call stack.

use spantree_core::errors::SpanResult;
use spantree_core::models::{Introspector, Span};

use crate::pool::PooledStack;
use crate::traits::NodeTree;

/// In-order iterator over the values of a [`NodeTree`], ascending by start.
///
/// Created by [`in_order`]. The traversal stack goes back to the pool when the
/// iterator is dropped.
pub struct InOrder<'a, S>
where
    S: NodeTree,
{
    tree: &'a S,
    stack: PooledStack<'a, S::Node>,
    current: Option<S::Node>,
}

/// Walk every value of `tree` in ascending start order.
///
/// Each call starts an independent traversal from the root.
pub fn in_order<S: NodeTree>(tree: &S) -> InOrder<'_, S> {
    InOrder {
        tree,
        stack: PooledStack::acquire_from(tree.scratch_pool()),
        current: tree.try_get_root(),
    }
}

impl<'a, S> Iterator for InOrder<'a, S>
where
    S: NodeTree,
{
    type Item = &'a S::Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = self.tree.try_get_left_child(node);
        }

        let node = self.stack.pop()?;
        self.current = self.tree.try_get_right_child(node);
        Some(self.tree.value(node))
    }
}

///
/// Append every value matching `predicate` to `out`, in ascending start order.
///
/// This is an exhaustive in-order scan: the max-end augmentation is not used to
/// prune, which keeps the output sorted and lets `predicate` be arbitrary. With
/// `stop_after_first`, the scan ends at the first match, which is therefore
/// the lowest-start matching value.
///
/// # Returns
/// - the number of values appended to `out`
///
/// # Errors
/// - [`spantree_core::errors::SpanError::NegativeLength`] when `length < 0`
///
pub fn collect_matching<'a, S, I, F>(
    tree: &'a S,
    introspector: &I,
    start: I::Position,
    length: I::Position,
    mut predicate: F,
    out: &mut Vec<&'a S::Value>,
    stop_after_first: bool,
) -> SpanResult<usize>
where
    S: NodeTree,
    I: Introspector<S::Value>,
    F: FnMut(&S::Value, I::Position, I::Position, &I) -> bool,
{
    Span::from_start_length(start, length)?;

    let mut matched = 0;
    for value in in_order(tree) {
        if predicate(value, start, length, introspector) {
            out.push(value);
            matched += 1;
            if stop_after_first {
                break;
            }
        }
    }

    Ok(matched)
}

///
/// Check whether any value matches `predicate`, pruning with the max-end augmentation.
///
/// Candidates are explored depth first from a LIFO stack, so which match is
/// found first is unspecified. A subtree is skipped when its greatest end lies
/// before the query start; a right subtree is also skipped when its parent
/// already starts past the query end. `predicate` must only accept values that
/// satisfy both bounds, as every predicate in [`crate::predicates`] does.
///
/// # Errors
/// - [`spantree_core::errors::SpanError::NegativeLength`] when `length < 0`
///
pub fn any_overlap<S, I, F>(
    tree: &S,
    introspector: &I,
    start: I::Position,
    length: I::Position,
    mut predicate: F,
) -> SpanResult<bool>
where
    S: NodeTree,
    I: Introspector<S::Value>,
    F: FnMut(&S::Value, I::Position, I::Position, &I) -> bool,
{
    let query = Span::from_start_length(start, length)?;

    let Some(root) = tree.try_get_root() else {
        return Ok(false);
    };

    let mut candidates = PooledStack::acquire_from(tree.scratch_pool());
    candidates.push(root);

    while let Some(node) = candidates.pop() {
        let value = tree.value(node);
        if predicate(value, start, length, introspector) {
            return Ok(true);
        }

        if let Some(right) = tree.try_get_right_child(node) {
            if introspector.start(value) <= query.end
                && subtree_max_end(tree, introspector, right) >= query.start
            {
                candidates.push(right);
            }
        }

        if let Some(left) = tree.try_get_left_child(node) {
            if subtree_max_end(tree, introspector, left) >= query.start {
                candidates.push(left);
            }
        }
    }

    Ok(false)
}

/// The greatest end over the subtree rooted at `node`.
#[inline]
pub fn subtree_max_end<S, I>(tree: &S, introspector: &I, node: S::Node) -> I::Position
where
    S: NodeTree,
    I: Introspector<S::Value>,
{
    introspector.end(tree.value(tree.max_end_node(node)))
}
