use std::collections::HashMap;

use termtree::Tree;
use tracing::instrument;

use crate::arena::{BinaryTree, NodeId};
use crate::config::DisplaySettings;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String> {
        self.to_tree_string_with(&DisplaySettings::default())
    }

    fn to_tree_string_with(&self, display: &DisplaySettings) -> Tree<String>;
}

impl TreeNodeConvert for BinaryTree {
    /// Renders at most `display.max_depth` levels; deeper subtrees collapse
    /// into a single `display.elided_label` leaf.
    #[instrument(level = "debug", skip(self, display))]
    fn to_tree_string_with(&self, display: &DisplaySettings) -> Tree<String> {
        let Some(root_id) = self.root() else {
            return Tree::new("Empty tree".to_string());
        };

        let positions: HashMap<NodeId, usize> = self
            .preorder()
            .enumerate()
            .map(|(pos, (id, _))| (id, pos))
            .collect();
        let label = |id: NodeId| -> String {
            let value = self.value(id).unwrap_or_default();
            match (display.show_positions, positions.get(&id)) {
                (true, Some(pos)) => format!("[{}] {}", pos, value),
                _ => value.to_string(),
            }
        };

        // post-order: a subtree is assembled once both children are built
        let mut built: HashMap<NodeId, Tree<String>> = HashMap::new();
        let mut stack = vec![(root_id, 1usize, false)];

        while let Some((id, depth, expanded)) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            let open = !node.is_leaf() && depth < display.max_depth;
            if open && !expanded {
                stack.push((id, depth, true));
                stack.extend(node.children().map(|child| (child, depth + 1, false)));
                continue;
            }

            let mut subtree = Tree::new(label(id));
            if open {
                // both sides are shown once one exists, so left and right stay distinguishable
                for child in [node.left, node.right] {
                    let leaf = child
                        .and_then(|child_id| built.remove(&child_id))
                        .unwrap_or_else(|| Tree::new(display.absent_label.clone()));
                    subtree.push(leaf);
                }
            } else if !node.is_leaf() {
                subtree.push(Tree::new(display.elided_label.clone()));
            }
            built.insert(id, subtree);
        }

        built
            .remove(&root_id)
            .unwrap_or_else(|| Tree::new(label(root_id)))
    }
}
