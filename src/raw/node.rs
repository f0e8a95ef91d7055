use super::handle::Handle;

/// Height of an empty subtree.
pub(crate) const EMPTY_HEIGHT: i16 = -1;

/// One stored key and the two child slots it exclusively owns.
#[derive(Clone)]
pub(crate) struct Node<K> {
    key: K,
    // Longest path down to a leaf; a leaf is 0.
    height: u8,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<K> Node<K> {
    /// Creates a leaf.
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key,
            height: 0,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    /// Replaces the key in place, returning the old one.
    pub(crate) fn replace_key(&mut self, key: K) -> K {
        core::mem::replace(&mut self.key, key)
    }

    /// Consumes the node, yielding its key.
    pub(crate) fn into_key(self) -> K {
        self.key
    }

    #[inline]
    pub(crate) fn height(&self) -> i16 {
        i16::from(self.height)
    }

    /// The stored height, which is never negative.
    #[inline]
    pub(crate) const fn levels(&self) -> u8 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: i16) {
        self.height = u8::try_from(height).expect("`Node::set_height()` - `height` out of range!");
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    /// Returns true if neither child slot is occupied.
    pub(crate) const fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}
