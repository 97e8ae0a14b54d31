//! Tests for the BinaryTree query operations

use bintree::config::DisplaySettings;
use bintree::tree_traits::TreeNodeConvert;
use bintree::util::testing;
use bintree::{BinaryTree, NodeId};
use rstest::{fixture, rstest};

fn leaf(tree: &mut BinaryTree, value: i64) -> NodeId {
    tree.add_node(value, None, None).unwrap()
}

fn single(value: i64) -> BinaryTree {
    let mut tree = BinaryTree::new();
    let root = leaf(&mut tree, value);
    tree.set_root(Some(root)).unwrap();
    tree
}

/// Cousin fixture
///
/// ```text
///       1
///      / \
///     2   3
///    /     \
///   4       5
/// ```
struct Cousins {
    tree: BinaryTree,
    n1: NodeId,
    n2: NodeId,
    n3: NodeId,
    n4: NodeId,
    n5: NodeId,
}

#[fixture]
fn cousins() -> Cousins {
    testing::init_test_setup();
    let mut tree = BinaryTree::new();
    let n4 = leaf(&mut tree, 4);
    let n5 = leaf(&mut tree, 5);
    let n2 = tree.add_node(2, Some(n4), None).unwrap();
    let n3 = tree.add_node(3, None, Some(n5)).unwrap();
    let n1 = tree.add_node(1, Some(n2), Some(n3)).unwrap();
    tree.set_root(Some(n1)).unwrap();
    Cousins { tree, n1, n2, n3, n4, n5 }
}

// ============================================================
// Depth
// ============================================================

#[test]
fn given_empty_tree_when_measuring_depth_then_both_are_zero() {
    let tree = BinaryTree::new();
    assert_eq!(tree.min_depth(), 0);
    assert_eq!(tree.max_depth(), 0);
}

#[test]
fn given_single_node_when_measuring_depth_then_both_are_one() {
    let tree = single(7);
    assert_eq!(tree.min_depth(), 1);
    assert_eq!(tree.max_depth(), 1);
}

#[test]
fn given_root_with_only_right_child_when_min_depth_then_goes_through_child() {
    // 1 -> right 2 -> (left 3, right 4)
    let mut tree = BinaryTree::new();
    let n3 = leaf(&mut tree, 3);
    let n4 = leaf(&mut tree, 4);
    let n2 = tree.add_node(2, Some(n3), Some(n4)).unwrap();
    let n1 = tree.add_node(1, None, Some(n2)).unwrap();
    tree.set_root(Some(n1)).unwrap();

    assert_eq!(tree.min_depth(), 3);
    assert_eq!(tree.max_depth(), 3);
}

#[test]
fn given_unbalanced_tree_when_measuring_depth_then_min_is_below_max() {
    let tree: BinaryTree = "[1,2,3,4,null,null,null,null,5,null,null]".parse().unwrap();
    assert_eq!(tree.min_depth(), 2);
    assert_eq!(tree.max_depth(), 4);
}

#[test]
fn given_very_deep_chain_when_querying_then_no_stack_overflow() {
    let depth = 200_000;
    let mut tree = BinaryTree::new();
    let mut below = None;
    for value in 0..depth {
        below = Some(tree.add_node(value, below, None).unwrap());
    }
    tree.set_root(below).unwrap();

    assert_eq!(tree.min_depth(), depth as usize);
    assert_eq!(tree.max_depth(), depth as usize);
    assert_eq!(tree.next_larger(depth - 2), Some(depth - 1));
    assert_eq!(tree.max_sum(), (0..depth).sum::<i64>());

    let text = tree.serialize();
    let back = BinaryTree::deserialize(&text).unwrap();
    assert_eq!(back.max_depth(), depth as usize);
}

#[test]
fn given_very_deep_chain_when_rendering_then_levels_below_cap_are_elided() {
    let depth = 200_000;
    let mut tree = BinaryTree::new();
    let mut below = None;
    for value in 0..depth {
        below = Some(tree.add_node(value, below, None).unwrap());
    }
    tree.set_root(below).unwrap();

    let display = DisplaySettings::default();
    let rendered = tree.to_tree_string_with(&display).to_string();
    let lines: Vec<&str> = rendered.lines().collect();

    // each open level adds a node line and a marker for the missing right child;
    // the last shown level contributes its node line and the elision marker
    assert_eq!(lines.len(), 2 * display.max_depth);
    assert_eq!(lines[0], (depth - 1).to_string());
    let elided: Vec<&&str> = lines
        .iter()
        .filter(|line| line.ends_with(display.elided_label.as_str()))
        .collect();
    assert_eq!(elided.len(), 1);
    let deepest_shown = depth - display.max_depth as i64;
    assert!(rendered.contains(&format!(" {}\n", deepest_shown)));
}

// ============================================================
// maxSum
// ============================================================

#[rstest]
#[case("[null]", 0)]
#[case("[1,null,null]", 1)]
#[case("[-3,null,null]", 0)]
#[case("[-1,-2,null,null,-3,null,null]", 0)]
#[case("[1,2,null,null,3,null,null]", 6)]
#[case("[-10,9,null,null,20,15,null,null,7,null,null]", 42)]
#[case("[2,-1,null,null,-2,null,null]", 2)]
#[case("[5,4,11,7,null,null,2,null,null,null,8,13,null,null,4,null,1,null,null]", 48)]
fn given_tree_when_max_sum_then_matches_best_path(#[case] text: &str, #[case] expected: i64) {
    let tree = BinaryTree::deserialize(text).unwrap();
    assert_eq!(tree.max_sum(), expected);
}

// ============================================================
// nextLarger
// ============================================================

#[rstest]
#[case(5, Some(10))]
#[case(15, None)]
#[case(0, Some(5))]
#[case(9, Some(10))]
fn given_values_5_10_15_when_next_larger_then_smallest_above_bound(
    #[case] bound: i64,
    #[case] expected: Option<i64>,
) {
    // not a search tree: 15 at the root, 5 on the right
    let tree: BinaryTree = "[15,10,null,null,5,null,null]".parse().unwrap();
    assert_eq!(tree.next_larger(bound), expected);
}

#[test]
fn given_empty_tree_when_next_larger_then_none() {
    assert_eq!(BinaryTree::new().next_larger(i64::MIN), None);
}

// ============================================================
// areCousins
// ============================================================

#[rstest]
fn given_nodes_on_same_level_with_different_parents_then_cousins(cousins: Cousins) {
    assert!(cousins.tree.are_cousins(cousins.n4, cousins.n5));
    assert!(cousins.tree.are_cousins(cousins.n5, cousins.n4));
}

#[rstest]
fn given_siblings_then_not_cousins(cousins: Cousins) {
    assert!(!cousins.tree.are_cousins(cousins.n2, cousins.n3));
}

#[rstest]
fn given_root_then_never_cousins(cousins: Cousins) {
    for other in [cousins.n1, cousins.n2, cousins.n3, cousins.n4, cousins.n5] {
        assert!(!cousins.tree.are_cousins(other, cousins.n1));
        assert!(!cousins.tree.are_cousins(cousins.n1, other));
    }
}

#[rstest]
fn given_different_levels_then_not_cousins(cousins: Cousins) {
    assert!(!cousins.tree.are_cousins(cousins.n2, cousins.n5));
    assert!(!cousins.tree.are_cousins(cousins.n4, cousins.n3));
}

#[rstest]
fn given_same_node_twice_then_not_cousins(cousins: Cousins) {
    assert!(!cousins.tree.are_cousins(cousins.n4, cousins.n4));
}

#[rstest]
fn given_detached_or_foreign_node_then_not_cousins(mut cousins: Cousins) {
    let stray = cousins.tree.add_node(9, None, None).unwrap();
    assert!(!cousins.tree.are_cousins(cousins.n4, stray));

    let foreign = single(4);
    let foreign_root = foreign.root().unwrap();
    assert!(!cousins.tree.are_cousins(cousins.n4, foreign_root));
}

#[test]
fn given_equal_values_when_checking_cousins_then_identity_decides() {
    //       0
    //      / \
    //     7   7
    //    /     \
    //   7       7
    let tree: BinaryTree = "[0,7,7,null,null,null,7,null,7,null,null]".parse().unwrap();
    let left_leaf = tree.nth_preorder(2).unwrap();
    let right_leaf = tree.nth_preorder(4).unwrap();
    let left_child = tree.nth_preorder(1).unwrap();
    assert!(tree.are_cousins(left_leaf, right_leaf));
    assert!(!tree.are_cousins(left_leaf, left_child));
}

// ============================================================
// lowestCommonAncestor
// ============================================================

#[test]
fn given_root_with_two_children_when_lca_then_root() {
    let mut tree = BinaryTree::new();
    let n5 = leaf(&mut tree, 5);
    let n1 = leaf(&mut tree, 1);
    let n3 = tree.add_node(3, Some(n5), Some(n1)).unwrap();
    tree.set_root(Some(n3)).unwrap();

    assert_eq!(tree.lowest_common_ancestor(n5, n1), Some(n3));
    assert_eq!(tree.lowest_common_ancestor(n5, n5), Some(n5));
}

#[rstest]
fn given_ancestor_and_descendant_when_lca_then_ancestor(cousins: Cousins) {
    assert_eq!(cousins.tree.lowest_common_ancestor(cousins.n2, cousins.n4), Some(cousins.n2));
    assert_eq!(cousins.tree.lowest_common_ancestor(cousins.n4, cousins.n5), Some(cousins.n1));
    assert_eq!(cousins.tree.lowest_common_ancestor(cousins.n5, cousins.n3), Some(cousins.n3));
}

#[test]
fn given_empty_tree_when_lca_then_none() {
    let foreign = single(1);
    let id = foreign.root().unwrap();
    assert_eq!(BinaryTree::new().lowest_common_ancestor(id, id), None);
}

// ============================================================
// Invariants
// ============================================================

#[rstest]
#[case("[null]")]
#[case("[1,null,null]")]
#[case("[1,null,2,null,3,null,null]")]
#[case("[1,2,4,null,null,5,null,null,3,null,null]")]
fn given_any_tree_then_min_depth_not_above_max_depth(#[case] text: &str) {
    let tree = BinaryTree::deserialize(text).unwrap();
    assert!(tree.min_depth() <= tree.max_depth());
    assert_eq!(tree.min_depth() == 0, tree.is_empty());
    assert_eq!(tree.max_depth() == 0, tree.is_empty());
}
