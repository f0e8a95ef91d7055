use core::num::NonZero;

// Narrow in unit tests so the capacity limit can be reached.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the tree's arena.
///
/// Stored off by one inside a `NonZero` so that an empty child slot,
/// `Option<Handle>`, costs nothing extra.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Number of distinct slots a handle can name.
    pub(crate) const CAPACITY: usize = RawHandle::MAX as usize - 1;

    /// Names slot `index`, or `None` once the arena has outgrown the handle width.
    #[inline]
    pub(crate) fn for_slot(index: usize) -> Option<Self> {
        if index >= Self::CAPACITY {
            return None;
        }
        RawHandle::try_from(index + 1).ok().and_then(NonZero::new).map(Self)
    }

    #[inline]
    pub(crate) const fn slot(self) -> usize {
        self.0.get() as usize - 1
    }
}
