//! A height-balanced (AVL) ordered tree for Rust.
//!
//! This crate provides [`AvlTree`], an ordered set of keys stored in a binary
//! search tree that rebalances itself with local rotations after every
//! insertion and deletion. For every node the heights of its two subtrees
//! differ by at most one, which bounds the height of a tree of `n` keys by
//! roughly `1.44 * log2(n)`.
//!
//! # Example
//!
//! ```
//! use avl_tree::{AvlTree, DfsOrder, KeyNotFound};
//!
//! let mut tree = AvlTree::new();
//! for key in [4, 2, 6] {
//!     tree.insert(key).unwrap();
//! }
//!
//! // Lookups return a read-only view of the stored node.
//! let root = tree.find(&4).unwrap();
//! assert_eq!(root.height(), 1);
//!
//! // Traversals are produced eagerly in the requested depth-first order.
//! assert_eq!(tree.traverse(DfsOrder::PreOrder), [4, 2, 6]);
//!
//! // Missing keys are reported, never silently ignored.
//! assert_eq!(tree.delete(&5), Err(KeyNotFound));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Strict mutations** - Duplicate inserts and missing deletes return [`DuplicateKey`] / [`KeyNotFound`]
//! - **Inspectable** - [`NodeView`] exposes each node's key, height and children read-only
//!
//! # Implementation
//!
//! Nodes live in a slot arena and refer to their children by handle. Insertion
//! and deletion recurse down to the affected slot; on the way back up each
//! ancestor recomputes its height and, if its subtrees now differ by two,
//! performs a single or double rotation. Rotations are logged at `trace` level
//! through the [`log`] facade.

#![no_std]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod raw;

pub mod avl_tree;

pub use avl_tree::{AvlTree, DfsOrder, NodeView};
pub use error::{DuplicateKey, Error, KeyNotFound};
