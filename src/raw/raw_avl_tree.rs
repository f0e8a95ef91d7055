use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{EMPTY_HEIGHT, Node};
use crate::DfsOrder;
use crate::error::{DuplicateKey, KeyNotFound};

/// Largest height difference tolerated between sibling subtrees.
pub(crate) const ALLOWED_IMBALANCE: i16 = 1;

// No tree addressable by a `u32` handle is taller than 46, so traversal
// stacks stay inline.
const STACK_DEPTH: usize = 64;

type Stack = SmallVec<[Handle; STACK_DEPTH]>;

/// The AVL core backing `AvlTree`.
///
/// Every recursive helper returns the handle of the subtree root it leaves
/// behind; the caller writes that handle back into its own child slot.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Number of live nodes reachable from `root`.
    len: usize,
}

impl<K> RawAvlTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn reserve(&mut self, additional: usize) {
        self.nodes.reserve(additional);
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K> {
        self.nodes.get(handle)
    }

    /// Height of the subtree in `slot`, -1 when the slot is empty.
    #[inline]
    pub(crate) fn height_of(&self, slot: Option<Handle>) -> i16 {
        slot.map_or(EMPTY_HEIGHT, |handle| self.nodes.get(handle).height())
    }

    /// Left height minus right height.
    pub(crate) fn balance_factor(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        self.height_of(node.left()) - self.height_of(node.right())
    }

    pub(crate) fn first(&self) -> Option<&K> {
        let mut handle = self.root?;
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        Some(self.nodes.get(handle).key())
    }

    pub(crate) fn last(&self) -> Option<&K> {
        let mut handle = self.root?;
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        Some(self.nodes.get(handle).key())
    }

    /// Collects node handles in one depth-first walk.
    pub(crate) fn dfs(&self, order: DfsOrder) -> Vec<Handle> {
        let mut visited = Vec::with_capacity(self.len);
        let mut stack = Stack::new();

        match order {
            DfsOrder::PreOrder => {
                stack.extend(self.root);
                while let Some(handle) = stack.pop() {
                    visited.push(handle);
                    let node = self.nodes.get(handle);
                    stack.extend(node.right());
                    stack.extend(node.left());
                }
            }
            DfsOrder::InOrder => {
                let mut cursor = self.root;
                loop {
                    while let Some(handle) = cursor {
                        stack.push(handle);
                        cursor = self.nodes.get(handle).left();
                    }
                    let Some(handle) = stack.pop() else {
                        break;
                    };
                    visited.push(handle);
                    cursor = self.nodes.get(handle).right();
                }
            }
            DfsOrder::PostOrder => {
                // Node, right, left reversed is left, right, node.
                stack.extend(self.root);
                while let Some(handle) = stack.pop() {
                    visited.push(handle);
                    let node = self.nodes.get(handle);
                    stack.extend(node.left());
                    stack.extend(node.right());
                }
                visited.reverse();
            }
        }

        visited
    }

    /// Recomputes a node's height from its children's stored heights.
    fn fix_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.nodes.get_mut(handle).set_height(height);
    }

    /// Promotes the left child of `handle`, returning the new subtree root.
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes.get(handle).left();
        let pivot = pivot.expect("`RawAvlTree::rotate_right()` - node has no left child!");
        let inner = self.nodes.get(pivot).right();
        self.nodes.get_mut(handle).set_left(inner);
        self.nodes.get_mut(pivot).set_right(Some(handle));

        // Child first: the pivot's height reads the demoted node's.
        self.fix_height(handle);
        self.fix_height(pivot);

        trace!("rotate right: {handle:?} demoted below {pivot:?}");
        pivot
    }

    /// Promotes the right child of `handle`, returning the new subtree root.
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let pivot = self.nodes.get(handle).right();
        let pivot = pivot.expect("`RawAvlTree::rotate_left()` - node has no right child!");
        let inner = self.nodes.get(pivot).left();
        self.nodes.get_mut(handle).set_right(inner);
        self.nodes.get_mut(pivot).set_left(Some(handle));

        self.fix_height(handle);
        self.fix_height(pivot);

        trace!("rotate left: {handle:?} demoted below {pivot:?}");
        pivot
    }

    /// Refreshes the height at `handle` and restores balance there with at
    /// most two rotations. Returns the root of the repaired subtree.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        self.fix_height(handle);

        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let (left_height, right_height) = (self.height_of(left), self.height_of(right));

        if left_height - right_height > ALLOWED_IMBALANCE {
            let left = left.expect("`RawAvlTree::rebalance()` - left-heavy node has no left child!");
            let child = self.nodes.get(left);
            if self.height_of(child.left()) < self.height_of(child.right()) {
                // Inner case: straighten the zig-zag first.
                let left = self.rotate_left(left);
                self.nodes.get_mut(handle).set_left(Some(left));
            }
            self.rotate_right(handle)
        } else if right_height - left_height > ALLOWED_IMBALANCE {
            let right = right.expect("`RawAvlTree::rebalance()` - right-heavy node has no right child!");
            let child = self.nodes.get(right);
            if self.height_of(child.right()) < self.height_of(child.left()) {
                let right = self.rotate_right(right);
                self.nodes.get_mut(handle).set_right(Some(right));
            }
            self.rotate_left(handle)
        } else {
            handle
        }
    }

    /// Detaches the minimum of the subtree at `handle`, returning the
    /// repaired subtree root and the detached key.
    fn take_min(&mut self, handle: Handle) -> (Option<Handle>, K) {
        match self.nodes.get(handle).left() {
            Some(left) => {
                let (left, key) = self.take_min(left);
                self.nodes.get_mut(handle).set_left(left);
                (Some(self.rebalance(handle)), key)
            }
            None => {
                let right = self.nodes.get(handle).right();
                (right, self.release(handle))
            }
        }
    }

    fn release(&mut self, handle: Handle) -> K {
        trace!("release node {handle:?}");
        self.nodes.take(handle).into_key()
    }
}

impl<K: Ord> RawAvlTree<K> {
    /// Searches for a key and returns the handle of the node holding it.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut slot = self.root;
        while let Some(handle) = slot {
            let node = self.nodes.get(handle);
            slot = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return Some(handle),
            };
        }
        None
    }

    /// Inserts `key`, leaving the tree untouched if it is already present.
    pub(crate) fn insert(&mut self, key: K) -> Result<(), DuplicateKey> {
        let root = self.insert_at(self.root, key).inspect_err(|_| debug!("insert rejected: key already present"))?;
        self.root = Some(root);
        self.len += 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        Ok(())
    }

    fn insert_at(&mut self, slot: Option<Handle>, key: K) -> Result<Handle, DuplicateKey> {
        let Some(handle) = slot else {
            let handle = self.nodes.alloc(Node::new(key));
            trace!("new leaf {handle:?}");
            return Ok(handle);
        };

        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());

        match key.cmp(node.key()) {
            Less => {
                let left = self.insert_at(left, key)?;
                self.nodes.get_mut(handle).set_left(Some(left));
            }
            Greater => {
                let right = self.insert_at(right, key)?;
                self.nodes.get_mut(handle).set_right(Some(right));
            }
            Equal => return Err(DuplicateKey),
        }

        Ok(self.rebalance(handle))
    }

    /// Removes `key`, leaving the tree untouched if it is absent.
    pub(crate) fn delete<Q>(&mut self, key: &Q) -> Result<(), KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let root = self.delete_at(self.root, key).inspect_err(|_| debug!("delete rejected: key not present"))?;
        self.root = root;
        self.len -= 1;
        debug_assert_eq!(self.nodes.len(), self.len);
        Ok(())
    }

    fn delete_at<Q>(&mut self, slot: Option<Handle>, key: &Q) -> Result<Option<Handle>, KeyNotFound>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let handle = slot.ok_or(KeyNotFound)?;
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());

        match key.cmp(node.key().borrow()) {
            Less => {
                let left = self.delete_at(left, key)?;
                self.nodes.get_mut(handle).set_left(left);
            }
            Greater => {
                let right = self.delete_at(right, key)?;
                self.nodes.get_mut(handle).set_right(right);
            }
            Equal => match (left, right) {
                (Some(_), Some(right)) => {
                    // The node stays put and takes over its in-order successor's key.
                    let (right, successor) = self.take_min(right);
                    let node = self.nodes.get_mut(handle);
                    node.set_right(right);
                    drop(node.replace_key(successor));
                }
                (only, None) | (None, only) => {
                    drop(self.release(handle));
                    return Ok(only);
                }
            },
        }

        Ok(Some(self.rebalance(handle)))
    }
}
