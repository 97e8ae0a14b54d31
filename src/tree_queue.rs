use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::arena::BinaryTree;

impl BinaryTree {
    /// Length in nodes of the shortest root-to-leaf path, 0 for an empty tree.
    ///
    /// Breadth-first, so the first leaf dequeued is the shallowest one. A node
    /// with a single child is not a leaf: the missing side is never a path.
    #[instrument(level = "debug", skip(self))]
    pub fn min_depth(&self) -> usize {
        let mut queue = VecDeque::new();
        queue.extend(self.root().map(|root| (root, 1)));

        while let Some((id, depth)) = queue.pop_front() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if node.is_leaf() {
                debug!(min_depth = depth, "found shallowest leaf");
                return depth;
            }
            queue.extend(node.children().map(|child| (child, depth + 1)));
        }

        0
    }
}
