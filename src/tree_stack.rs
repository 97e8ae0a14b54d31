use std::collections::HashMap;

use tracing::{debug, instrument};

use crate::arena::{BinaryTree, NodeId};

/*
Explicit-stack versions of the recursive tree algorithms.

Bottom-up reductions (max_sum, lowest_common_ancestor) run over the post-order
iterator and keep each child's partial result in a map until the parent
consumes it, so the map never holds more than one frontier of the tree.
 */
impl BinaryTree {
    /// Maximum sum over any path in the tree, floored at 0.
    ///
    /// A path may start and end at any node but never revisits one. Negative
    /// subtrees contribute nothing (the path simply does not extend there),
    /// so an empty or all-negative tree yields 0.
    #[instrument(level = "debug", skip(self))]
    pub fn max_sum(&self) -> i64 {
        let mut best = 0i64;
        let mut gains: HashMap<NodeId, i64> = HashMap::new();

        for (id, node) in self.postorder() {
            let left_gain = node.left.and_then(|c| gains.remove(&c)).unwrap_or(0).max(0);
            let right_gain = node.right.and_then(|c| gains.remove(&c)).unwrap_or(0).max(0);

            let through = node.value.saturating_add(left_gain).saturating_add(right_gain);
            best = best.max(through);
            // only one side can be chained further up
            gains.insert(id, node.value.saturating_add(left_gain.max(right_gain)));
        }

        debug!(max_sum = best, "computed max path sum");
        best
    }

    /// Smallest value strictly greater than `lower_bound`.
    ///
    /// Visits every node: values are not assumed to be in search-tree order.
    #[instrument(level = "debug", skip(self))]
    pub fn next_larger(&self, lower_bound: i64) -> Option<i64> {
        self.preorder()
            .map(|(_, node)| node.value)
            .filter(|&value| value > lower_bound)
            .min()
    }

    /// Level (root = 0) and parent of `target`, first match in pre-order.
    fn locate(&self, target: NodeId) -> Option<(usize, Option<NodeId>)> {
        let mut stack: Vec<(NodeId, usize, Option<NodeId>)> =
            self.root().into_iter().map(|root| (root, 0, None)).collect();

        while let Some((id, level, parent)) = stack.pop() {
            if id == target {
                return Some((level, parent));
            }
            if let Some(node) = self.node(id) {
                stack.extend(node.right.map(|child| (child, level + 1, Some(id))));
                stack.extend(node.left.map(|child| (child, level + 1, Some(id))));
            }
        }
        None
    }

    /// Whether `a` and `b` sit on the same level under different parents.
    ///
    /// The root has no cousins, and nodes that are not part of the tree are
    /// never cousins of anything.
    #[instrument(level = "debug", skip(self))]
    pub fn are_cousins(&self, a: NodeId, b: NodeId) -> bool {
        let Some(root) = self.root() else {
            return false;
        };
        if a == root || b == root {
            return false;
        }

        match (self.locate(a), self.locate(b)) {
            (Some((level_a, parent_a)), Some((level_b, parent_b))) => {
                debug!(level_a, level_b, "located both nodes");
                level_a == level_b && parent_a != parent_b
            }
            _ => false,
        }
    }

    /// Deepest node having both `a` and `b` in its subtree.
    ///
    /// A node counts as its own ancestor. When one handle is not part of the
    /// tree the result is whatever the reduction yields: the other node if it
    /// is found, otherwise None.
    #[instrument(level = "debug", skip(self))]
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> Option<NodeId> {
        // only subtrees that produced a hit are recorded
        let mut hits: HashMap<NodeId, NodeId> = HashMap::new();

        for (id, node) in self.postorder() {
            let left = node.left.and_then(|c| hits.remove(&c));
            let right = node.right.and_then(|c| hits.remove(&c));

            let hit = if id == a || id == b {
                Some(id)
            } else {
                match (left, right) {
                    (Some(_), Some(_)) => Some(id),
                    (left, right) => left.or(right),
                }
            };
            if let Some(hit) = hit {
                hits.insert(id, hit);
            }
        }

        self.root().and_then(|root| hits.remove(&root))
    }
}
