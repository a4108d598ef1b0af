use crate::pool::ScratchPool;

///
/// The capabilities the query engine needs from a tree shape.
///
/// Any binary tree whose in-order sequence is sorted by start and whose nodes
/// know which node of their subtree has the greatest end can be queried by the
/// algorithms in [`crate::traversal`]. [`crate::SpanTree`] identifies nodes by
/// array index; a pointer based tree could use references instead.
///
pub trait NodeTree {
    type Value;
    type Node: Copy;

    fn try_get_root(&self) -> Option<Self::Node>;

    fn try_get_left_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn try_get_right_child(&self, node: Self::Node) -> Option<Self::Node>;

    fn value(&self, node: Self::Node) -> &Self::Value;

    /// The node within `node`'s subtree (itself included) holding the greatest end.
    fn max_end_node(&self, node: Self::Node) -> Self::Node;

    /// Pool to borrow traversal stacks from. Without one, each traversal allocates.
    fn scratch_pool(&self) -> Option<&ScratchPool<Self::Node>> {
        None
    }
}
