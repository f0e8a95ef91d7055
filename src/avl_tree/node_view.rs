use core::fmt;

use crate::raw::{Handle, RawAvlTree};

/// A read-only view of one node in an [`AvlTree`](crate::AvlTree).
///
/// Returned by [`find`](crate::AvlTree::find), [`get`](crate::AvlTree::get) and
/// [`root`](crate::AvlTree::root). The view borrows the tree, so the tree cannot be
/// mutated while a view is alive.
///
/// # Examples
///
/// ```
/// use avl_tree::AvlTree;
///
/// let mut tree = AvlTree::new();
/// for key in [4, 2, 6] {
///     tree.insert(key).unwrap();
/// }
///
/// let root = tree.root().unwrap();
/// assert_eq!(*root.key(), 4);
/// assert_eq!(root.height(), 1);
/// assert_eq!(root.left().map(|node| *node.key()), Some(2));
/// assert_eq!(root.right().map(|node| node.height()), Some(0));
/// ```
pub struct NodeView<'a, K> {
    tree: &'a RawAvlTree<K>,
    handle: Handle,
}

impl<'a, K> NodeView<'a, K> {
    pub(crate) fn new(tree: &'a RawAvlTree<K>, handle: Handle) -> Self {
        Self {
            tree,
            handle,
        }
    }

    /// The stored key.
    #[must_use]
    pub fn key(&self) -> &'a K {
        self.tree.node(self.handle).key()
    }

    /// Longest path from this node down to a leaf. A leaf has height 0.
    #[must_use]
    pub fn height(&self) -> usize {
        usize::from(self.tree.node(self.handle).levels())
    }

    /// Height of the left subtree minus height of the right subtree, where an
    /// absent subtree counts as -1. Always within `-1..=1`.
    #[must_use]
    pub fn balance_factor(&self) -> isize {
        isize::from(self.tree.balance_factor(self.handle))
    }

    #[must_use]
    pub fn left(&self) -> Option<Self> {
        self.tree.node(self.handle).left().map(|handle| Self::new(self.tree, handle))
    }

    #[must_use]
    pub fn right(&self) -> Option<Self> {
        self.tree.node(self.handle).right().map(|handle| Self::new(self.tree, handle))
    }

    /// Returns true if the node has no children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.tree.node(self.handle).is_leaf()
    }
}

impl<K> Clone for NodeView<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for NodeView<'_, K> {}

impl<K: fmt::Debug> fmt::Debug for NodeView<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView").field("key", self.key()).field("height", &self.height()).finish()
    }
}
