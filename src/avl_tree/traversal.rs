/// The depth-first order in which [`AvlTree::traverse`](crate::AvlTree::traverse) visits nodes.
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTree, DfsOrder};
///
/// let mut tree = AvlTree::new();
/// for key in [4, 2, 6] {
///     tree.insert(key).unwrap();
/// }
///
/// assert_eq!(tree.traverse(DfsOrder::PreOrder), [4, 2, 6]);
/// assert_eq!(tree.traverse(DfsOrder::InOrder), [2, 4, 6]);
/// assert_eq!(tree.traverse(DfsOrder::PostOrder), [2, 6, 4]);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum DfsOrder {
    /// Node, then left subtree, then right subtree.
    PreOrder,
    /// Left subtree, then node, then right subtree. Yields keys in ascending order.
    InOrder,
    /// Left subtree, then right subtree, then node.
    PostOrder,
}
