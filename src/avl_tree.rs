use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;

use crate::error::{DuplicateKey, KeyNotFound};
use crate::raw::RawAvlTree;

mod capacity;
mod node_view;
mod traversal;

pub use node_view::NodeView;
pub use traversal::DfsOrder;

/// An ordered set of keys kept in a height-balanced binary search tree.
///
/// After every insertion and deletion the heights of any node's two subtrees
/// differ by at most one, so lookups, insertions and deletions all take
/// O(log n) time.
///
/// Unlike the standard collections, inserting a key that is already present
/// and deleting one that is absent are reported as errors ([`DuplicateKey`]
/// and [`KeyNotFound`]). The tree is unchanged after either.
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key, as determined by the [`Ord`] trait, changes while
/// it is in the tree. The behavior resulting from such a logic error is not
/// specified, but will be encapsulated to the `AvlTree` that observed it and
/// not result in undefined behavior.
///
/// # Deletion policy
///
/// A node with two children is removed by promoting its in-order successor
/// (the minimum of its right subtree) into its place. The policy never
/// alternates, so the same sequence of operations always produces the same
/// shape. Over long runs of deletions this shifts density toward left
/// subtrees; balance is unaffected.
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTree, DfsOrder, DuplicateKey, KeyNotFound};
///
/// let mut tree = AvlTree::new();
/// for key in 1..=8 {
///     tree.insert(key).unwrap();
/// }
///
/// assert_eq!(tree.traverse(DfsOrder::PreOrder), [4, 2, 1, 3, 6, 5, 7, 8]);
/// assert_eq!(tree.insert(5), Err(DuplicateKey));
///
/// tree.delete(&7).unwrap();
/// assert_eq!(tree.traverse(DfsOrder::PreOrder), [4, 2, 1, 3, 6, 5, 8]);
/// assert_eq!(tree.delete(&7), Err(KeyNotFound));
/// assert_eq!(tree.len(), 7);
/// ```
pub struct AvlTree<K> {
    raw: RawAvlTree<K>,
}

impl<K> AvlTree<K> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlTree {
            raw: RawAvlTree::new(),
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1).unwrap();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(tree.root().is_none());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the height of the whole tree, or `None` if it is empty.
    ///
    /// A tree holding a single key has height 0. For `n` keys the height is
    /// at least `floor(log2(n))` and below `1.44 * log2(n + 2)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.height(), None);
    /// for key in 0..1024 {
    ///     tree.insert(key).unwrap();
    /// }
    /// assert_eq!(tree.height(), Some(10));
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.root().map(|root| root.height())
    }

    /// Returns a view of the root node, or `None` if the tree is empty.
    #[must_use]
    pub fn root(&self) -> Option<NodeView<'_, K>> {
        self.raw.root().map(|handle| NodeView::new(&self.raw, handle))
    }

    /// Returns the smallest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&K> {
        self.raw.first()
    }

    /// Returns the largest key, or `None` if the tree is empty.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&K> {
        self.raw.last()
    }

    /// Returns the keys in the given depth-first order.
    ///
    /// The sequence is produced eagerly; the tree cannot change while the
    /// call is in progress.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{AvlTree, DfsOrder};
    ///
    /// let mut tree = AvlTree::new();
    /// for key in [3, 1, 2] {
    ///     tree.insert(key).unwrap();
    /// }
    /// assert_eq!(tree.traverse(DfsOrder::InOrder), [1, 2, 3]);
    /// assert_eq!(tree.traverse(DfsOrder::PreOrder), [2, 1, 3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn traverse(&self, order: DfsOrder) -> Vec<K>
    where
        K: Clone,
    {
        self.raw.dfs(order).into_iter().map(|handle| self.raw.node(handle).key().clone()).collect()
    }
}

impl<K: Ord> AvlTree<K> {
    /// Adds a key to the tree.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKey`] if an equal key is already present. The tree is
    /// left unchanged and `key` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{AvlTree, DuplicateKey};
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.insert(5), Ok(()));
    /// assert_eq!(tree.insert(5), Err(DuplicateKey));
    /// assert_eq!(tree.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K) -> Result<(), DuplicateKey> {
        self.raw.insert(key)
    }

    /// Removes a key from the tree.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if no equal key is present. The tree is left
    /// unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_tree::{AvlTree, KeyNotFound};
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.delete(&2), Err(KeyNotFound));
    /// tree.insert(2).unwrap();
    /// assert_eq!(tree.delete(&2), Ok(()));
    /// assert!(tree.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete<Q>(&mut self, key: &Q) -> Result<(), KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.delete(key)
    }

    /// Returns a view of the node holding `key`, if present.
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
    /// let node = tree.find(&2).unwrap();
    /// assert_eq!((*node.key(), node.height()), (2, 0));
    /// assert!(tree.find(&5).is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<NodeView<'_, K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.find(key).map(|handle| NodeView::new(&self.raw, handle))
    }

    /// Like [`find`](Self::find), but reports a missing key as an error.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFound`] if no equal key is present.
    pub fn get<Q>(&self, key: &Q) -> Result<NodeView<'_, K>, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).ok_or(KeyNotFound)
    }

    /// Returns `true` if the tree contains `key`.
    #[must_use]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.raw.find(key).is_some()
    }
}

impl<K> Default for AvlTree<K> {
    /// Creates an empty `AvlTree`.
    fn default() -> Self {
        AvlTree::new()
    }
}

impl<K: Clone> Clone for AvlTree<K> {
    fn clone(&self) -> Self {
        AvlTree {
            raw: self.raw.clone(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.raw.dfs(DfsOrder::InOrder).into_iter().map(|handle| self.raw.node(handle).key());
        f.debug_set().entries(keys).finish()
    }
}
