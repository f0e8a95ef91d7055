use thiserror::Error;

/// Returned by [`AvlTree::insert`](crate::AvlTree::insert) when the key is already stored.
///
/// The tree is left exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[error("duplicate key")]
pub struct DuplicateKey;

/// Returned when a key that must be present is not stored in the tree.
///
/// Produced by [`AvlTree::delete`](crate::AvlTree::delete) and the strict
/// lookup [`AvlTree::get`](crate::AvlTree::get). The tree is left exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[error("key not found")]
pub struct KeyNotFound;

/// Either domain error, for callers mixing insertions and deletions behind `?`.
///
/// # Examples
///
/// ```
/// use avl_tree::{AvlTree, Error};
///
/// fn churn(tree: &mut AvlTree<u32>) -> Result<(), Error> {
///     tree.insert(1)?;
///     tree.delete(&1)?;
///     Ok(())
/// }
///
/// let mut tree = AvlTree::new();
/// assert_eq!(churn(&mut tree), Ok(()));
/// tree.insert(1).unwrap();
/// assert_eq!(churn(&mut tree), Err(Error::DuplicateKey(avl_tree::DuplicateKey)));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum Error {
    #[error(transparent)]
    DuplicateKey(#[from] DuplicateKey),
    #[error(transparent)]
    KeyNotFound(#[from] KeyNotFound),
}
