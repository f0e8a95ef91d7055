use std::collections::BTreeSet;
use std::sync::Once;

use avl_tree::{AvlTree, DfsOrder, DuplicateKey, Error, KeyNotFound, NodeView};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use simplelog::{Config, LevelFilter, TestLogger};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Routes the crate's `log` output to the test harness. Safe to call from every test.
fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = TestLogger::init(LevelFilter::Debug, Config::default());
    });
}

/// Generates keys in a range small enough to cause collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn tree_from(keys: impl IntoIterator<Item = i64>) -> AvlTree<i64> {
    let mut tree = AvlTree::new();
    for key in keys {
        tree.insert(key).unwrap();
    }
    tree
}

/// Walks the tree through its public views, asserting balance and stored
/// heights at every node. Returns the number of nodes visited.
fn assert_balanced(tree: &AvlTree<i64>) -> usize {
    fn walk(node: NodeView<'_, i64>) -> (isize, usize) {
        let (left_height, left_count) = node.left().map_or((-1, 0), walk);
        let (right_height, right_count) = node.right().map_or((-1, 0), walk);
        let key = node.key();
        assert!((left_height - right_height).abs() <= 1, "unbalanced at {key}: {left_height}/{right_height}");
        assert_eq!(node.balance_factor(), left_height - right_height, "balance factor at {key}");
        let height = 1 + left_height.max(right_height);
        assert_eq!(node.height() as isize, height, "stale height at {key}");
        assert_eq!(node.is_leaf(), left_count + right_count == 0);
        (height, 1 + left_count + right_count)
    }

    let count = tree.root().map_or(0, |root| walk(root).1);
    assert_eq!(count, tree.len(), "len disagrees with reachable nodes");
    count
}

fn assert_strictly_increasing(keys: &[i64]) {
    assert!(keys.windows(2).all(|pair| pair[0] < pair[1]), "in-order keys out of order: {keys:?}");
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn height_bounds(n: usize) -> (usize, usize) {
    let n = n as f64;
    let lower = n.log2().floor() as usize;
    let upper = (1.44 * (n + 2.0).log2() - 1.328).ceil() as usize;
    (lower, upper)
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn three_keys_form_a_single_level() {
    init_logging();
    let tree = tree_from([4, 2, 6]);
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![4, 2, 6]);
    assert_eq!(tree.find(&4).map(|node| node.height()), Some(1));
    assert_eq!(tree.find(&2).map(|node| node.height()), Some(0));
    assert_eq!(tree.find(&6).map(|node| node.height()), Some(0));
}

#[test]
fn ascending_inserts_stay_balanced() {
    init_logging();
    let tree = tree_from(1..=8);
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![4, 2, 1, 3, 6, 5, 7, 8]);
    assert_eq!(tree.traverse(DfsOrder::InOrder), vec![1, 2, 3, 4, 5, 6, 7, 8]);
    assert_eq!(tree.traverse(DfsOrder::PostOrder), vec![1, 3, 2, 5, 8, 7, 6, 4]);
    assert_balanced(&tree);
}

#[test]
fn delete_splices_single_child() {
    init_logging();
    let mut tree = tree_from(1..=8);
    tree.delete(&7).unwrap();
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![4, 2, 1, 3, 6, 5, 8]);
    assert_eq!(tree.len(), 7);
    assert_balanced(&tree);
}

#[test]
fn duplicate_insert_is_rejected() {
    init_logging();
    let mut tree = AvlTree::new();
    assert_eq!(tree.insert(5), Ok(()));
    assert_eq!(tree.insert(5), Err(DuplicateKey));
    assert_eq!(tree.len(), 1);
}

#[test]
fn delete_from_empty_tree() {
    init_logging();
    let mut tree: AvlTree<i64> = AvlTree::new();
    assert_eq!(tree.delete(&3), Err(KeyNotFound));
    assert_eq!(tree.len(), 0);
    assert!(tree.root().is_none());
}

#[test]
fn ascending_build_then_ascending_teardown() {
    init_logging();
    let mut tree = tree_from(0..256);
    assert_eq!(tree.len(), 256);
    for key in 0..256 {
        tree.delete(&key).unwrap();
        assert_balanced(&tree);
    }
    assert_eq!(tree.len(), 0);
    assert!(tree.is_empty());
    assert!(tree.root().is_none());
    assert_eq!(tree.height(), None);
}

#[test]
fn missing_keys_in_a_deep_tree() {
    init_logging();
    let mut tree = tree_from(0..32);
    assert_eq!(tree.delete(&-1), Err(KeyNotFound));
    assert_eq!(tree.delete(&32), Err(KeyNotFound));
    assert!(tree.find(&367).is_none());
    assert!(tree.find(&-1).is_none());
    assert_eq!(tree.get(&16).map(|node| *node.key()), Ok(16));
    assert_eq!(tree.get(&99).map(|node| *node.key()), Err(KeyNotFound));
    assert_eq!(tree.len(), 32);
}

#[test]
fn delete_root_with_two_children_promotes_successor() {
    init_logging();
    let mut tree = tree_from([4, 2, 6, 1, 3, 5, 7]);
    tree.delete(&4).unwrap();
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![5, 2, 1, 3, 6, 7]);
    tree.delete(&5).unwrap();
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![6, 2, 1, 3, 7]);
    assert_balanced(&tree);
}

#[test]
fn two_child_deletes_always_promote_right_minimum() {
    init_logging();
    let mut tree = tree_from(1..=15);
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![8, 4, 2, 1, 3, 6, 5, 7, 12, 10, 9, 11, 14, 13, 15]);

    tree.delete(&8).unwrap();
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![9, 4, 2, 1, 3, 6, 5, 7, 12, 10, 11, 14, 13, 15]);

    tree.delete(&9).unwrap();
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![10, 4, 2, 1, 3, 6, 5, 7, 12, 11, 14, 13, 15]);

    // Taking 11 leaves 12 right-heavy over a balanced 14: one left rotation.
    tree.delete(&10).unwrap();
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![11, 4, 2, 1, 3, 6, 5, 7, 14, 12, 13, 15]);

    tree.delete(&4).unwrap();
    assert_eq!(tree.traverse(DfsOrder::PreOrder), vec![11, 5, 2, 1, 3, 6, 7, 14, 12, 13, 15]);
    assert_eq!(tree.len(), 11);
    assert_balanced(&tree);
}

#[test]
fn errors_compose_behind_question_mark() {
    fn replace(tree: &mut AvlTree<i64>, old: i64, new: i64) -> Result<(), Error> {
        tree.delete(&old)?;
        tree.insert(new)?;
        Ok(())
    }

    let mut tree = tree_from([1, 2, 3]);
    assert_eq!(replace(&mut tree, 2, 20), Ok(()));
    assert_eq!(replace(&mut tree, 2, 30), Err(Error::KeyNotFound(KeyNotFound)));
    assert_eq!(replace(&mut tree, 1, 3), Err(Error::DuplicateKey(DuplicateKey)));
    assert_eq!(tree.traverse(DfsOrder::InOrder), vec![3, 20]);
}

#[test]
fn reverse_inserts_respect_height_bound() {
    let tree = tree_from((0..4_096).rev());
    let (lower, upper) = height_bounds(tree.len());
    let height = tree.height().unwrap();
    assert!((lower..=upper).contains(&height), "height {height} outside {lower}..={upper}");
    assert_balanced(&tree);
}

// ─── Randomized properties ───────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum TreeOp {
    Insert(i64),
    Delete(i64),
    Find(i64),
}

fn tree_op_strategy() -> impl Strategy<Value = TreeOp> {
    prop_oneof![
        5 => key_strategy().prop_map(TreeOp::Insert),
        3 => key_strategy().prop_map(TreeOp::Delete),
        2 => key_strategy().prop_map(TreeOp::Find),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays random operations on both `AvlTree` and `BTreeSet`, checking
    /// results after every step and the tree's shape at the end.
    #[test]
    fn ops_match_btreeset(ops in proptest::collection::vec(tree_op_strategy(), TEST_SIZE)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();
        let (mut inserted, mut deleted) = (0usize, 0usize);

        for op in &ops {
            match op {
                TreeOp::Insert(key) => {
                    let expected = model.insert(*key);
                    let result = tree.insert(*key);
                    prop_assert_eq!(result.is_ok(), expected, "insert({})", key);
                    inserted += usize::from(expected);
                }
                TreeOp::Delete(key) => {
                    let expected = model.remove(key);
                    let result = tree.delete(key);
                    prop_assert_eq!(result.is_ok(), expected, "delete({})", key);
                    deleted += usize::from(expected);
                }
                TreeOp::Find(key) => {
                    prop_assert_eq!(tree.find(key).map(|node| *node.key()), model.get(key).copied(), "find({})", key);
                }
            }
        }

        prop_assert_eq!(tree.len(), inserted - deleted);
        prop_assert_eq!(tree.first(), model.first());
        prop_assert_eq!(tree.last(), model.last());
        let keys = tree.traverse(DfsOrder::InOrder);
        assert_strictly_increasing(&keys);
        prop_assert_eq!(keys, model.into_iter().collect::<Vec<_>>());
        assert_balanced(&tree);
    }

    /// Height stays within the AVL bounds for any set of keys.
    #[test]
    fn height_within_avl_bounds(keys in proptest::collection::btree_set(key_strategy(), 1..TEST_SIZE)) {
        let tree = tree_from(keys.iter().copied());
        let (lower, upper) = height_bounds(tree.len());
        let height = tree.height().unwrap();
        prop_assert!(lower <= height && height <= upper, "height {} outside {}..={}", height, lower, upper);
    }

    /// Inserting a new key and deleting it again restores the key sequence.
    #[test]
    fn insert_then_delete_restores_keys(
        keys in proptest::collection::btree_set(key_strategy(), 0..500),
        extra in key_strategy(),
    ) {
        prop_assume!(!keys.contains(&extra));
        let mut tree = tree_from(keys.iter().copied());
        let before = tree.traverse(DfsOrder::InOrder);

        tree.insert(extra).unwrap();
        prop_assert!(tree.contains(&extra));
        tree.delete(&extra).unwrap();

        prop_assert_eq!(tree.traverse(DfsOrder::InOrder), before);
        prop_assert_eq!(tree.len(), keys.len());
        assert_balanced(&tree);
    }

    /// Pre-order and post-order visit the same keys as in-order, with the
    /// root first and last respectively.
    #[test]
    fn traversals_agree(keys in proptest::collection::btree_set(key_strategy(), 1..500)) {
        let tree = tree_from(keys.iter().copied());
        let root = *tree.root().unwrap().key();

        let pre = tree.traverse(DfsOrder::PreOrder);
        let post = tree.traverse(DfsOrder::PostOrder);
        prop_assert_eq!(pre.first(), Some(&root));
        prop_assert_eq!(post.last(), Some(&root));

        let mut pre_sorted = pre;
        pre_sorted.sort_unstable();
        let mut post_sorted = post;
        post_sorted.sort_unstable();
        let in_order = tree.traverse(DfsOrder::InOrder);
        prop_assert_eq!(&pre_sorted, &in_order);
        prop_assert_eq!(&post_sorted, &in_order);
    }
}
