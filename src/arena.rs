use generational_arena::{Arena, Index};
use std::fmt;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::{TreeError, TreeResult};

/// Handle to a node stored in a [`BinaryTree`].
///
/// Equality is identity: two nodes holding the same value are different
/// handles. A handle also remembers which tree issued it, so a handle from
/// one tree never resolves inside another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: Uuid,
    index: Index,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "node {}.{}", slot, generation)
    }
}

/// Tree node in the arena-based binary tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    /// Integer payload
    pub value: i64,
    /// Parent handle, None for the root and for detached nodes
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Present children, left before right.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Arena-based binary tree.
///
/// All nodes live in a generational arena owned by the tree; callers work with
/// [`NodeId`] handles. Nodes that are in the arena but not reachable from the
/// root are detached and take no part in any query.
#[derive(Debug)]
pub struct BinaryTree {
    id: Uuid,
    arena: Arena<TreeNode>,
    root: Option<NodeId>,
}

impl Default for BinaryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl BinaryTree {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            arena: Arena::new(),
            root: None,
        }
    }

    fn handle(&self, index: Index) -> NodeId {
        NodeId {
            tree: self.id,
            index,
        }
    }

    fn resolve(&self, id: NodeId) -> TreeResult<Index> {
        if id.tree == self.id && self.arena.contains(id.index) {
            Ok(id.index)
        } else {
            Err(TreeError::UnknownNode(id.to_string()))
        }
    }

    fn ensure_detached(&self, id: NodeId) -> TreeResult<()> {
        let index = self.resolve(id)?;
        if self.arena[index].parent.is_some() || self.root == Some(id) {
            return Err(TreeError::AlreadyAttached(id.to_string()));
        }
        Ok(())
    }

    /// Creates a node owning the given children and returns its handle.
    ///
    /// Children must be detached nodes of this tree. The new node itself is
    /// detached until it becomes the root or a child of another node.
    #[instrument(level = "trace", skip(self))]
    pub fn add_node(
        &mut self,
        value: i64,
        left: Option<NodeId>,
        right: Option<NodeId>,
    ) -> TreeResult<NodeId> {
        for child in left.iter().chain(right.iter()) {
            self.ensure_detached(*child)?;
        }
        if let (Some(l), Some(r)) = (left, right) {
            if l == r {
                return Err(TreeError::AlreadyAttached(l.to_string()));
            }
        }

        let index = self.arena.insert(TreeNode {
            value,
            parent: None,
            left,
            right,
        });
        let id = self.handle(index);
        for child in left.into_iter().chain(right) {
            self.arena[child.index].parent = Some(id);
        }
        Ok(id)
    }

    /// Replaces the left child of `parent`, returning the previous child,
    /// which becomes detached.
    #[instrument(level = "trace", skip(self))]
    pub fn set_left(&mut self, parent: NodeId, child: Option<NodeId>) -> TreeResult<Option<NodeId>> {
        self.attach(parent, Side::Left, child)
    }

    /// Replaces the right child of `parent`, returning the previous child,
    /// which becomes detached.
    #[instrument(level = "trace", skip(self))]
    pub fn set_right(&mut self, parent: NodeId, child: Option<NodeId>) -> TreeResult<Option<NodeId>> {
        self.attach(parent, Side::Right, child)
    }

    fn attach(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) -> TreeResult<Option<NodeId>> {
        let parent_index = self.resolve(parent)?;
        if let Some(child) = child {
            self.ensure_detached(child)?;
            // a detached child heads its own subtree, so reaching it from
            // `parent` upwards means `parent` lives inside that subtree
            let mut cursor = Some(parent);
            while let Some(current) = cursor {
                if current == child {
                    return Err(TreeError::CycleDetected {
                        parent: parent.to_string(),
                        child: child.to_string(),
                    });
                }
                cursor = self.arena[current.index].parent;
            }
        }

        let slot = match side {
            Side::Left => &mut self.arena[parent_index].left,
            Side::Right => &mut self.arena[parent_index].right,
        };
        let previous = std::mem::replace(slot, child);
        if let Some(previous) = previous {
            self.arena[previous.index].parent = None;
        }
        if let Some(child) = child {
            self.arena[child.index].parent = Some(parent);
        }
        Ok(previous)
    }

    /// Wires a freshly created node below `parent` without validation.
    pub(crate) fn link(&mut self, parent: NodeId, side: Side, child: NodeId) {
        match side {
            Side::Left => self.arena[parent.index].left = Some(child),
            Side::Right => self.arena[parent.index].right = Some(child),
        }
        self.arena[child.index].parent = Some(parent);
    }

    /// Makes `root` the root of the tree and returns the previous root.
    ///
    /// The new root must be a node of this tree without a parent.
    #[instrument(level = "trace", skip(self))]
    pub fn set_root(&mut self, root: Option<NodeId>) -> TreeResult<Option<NodeId>> {
        if let Some(id) = root {
            let index = self.resolve(id)?;
            if self.arena[index].parent.is_some() {
                return Err(TreeError::AlreadyAttached(id.to_string()));
            }
        }
        Ok(std::mem::replace(&mut self.root, root))
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.resolve(id).ok().map(|index| &self.arena[index])
    }

    pub fn value(&self, id: NodeId) -> Option<i64> {
        self.node(id).map(|node| node.value)
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.right)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of nodes reachable from the root.
    pub fn len(&self) -> usize {
        self.preorder().count()
    }

    /// Whether `id` is reachable from the root.
    #[instrument(level = "trace", skip(self))]
    pub fn contains(&self, id: NodeId) -> bool {
        let mut cursor = match self.node(id) {
            Some(_) => Some(id),
            None => return false,
        };
        while let Some(current) = cursor {
            if Some(current) == self.root {
                return true;
            }
            cursor = self.parent(current);
        }
        false
    }

    /// Handle of the `n`-th node in pre-order (0-based), which is also the
    /// order in which deserialization creates nodes.
    pub fn nth_preorder(&self, n: usize) -> Option<NodeId> {
        self.preorder().nth(n).map(|(id, _)| id)
    }

    pub fn preorder(&self) -> PreOrderIterator<'_> {
        PreOrderIterator::new(self)
    }

    pub fn postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Length in nodes of the longest root-to-leaf path, 0 for an empty tree.
    #[instrument(level = "debug", skip(self))]
    pub fn max_depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.into_iter().map(|root| (root, 1)).collect();

        while let Some((id, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.node(id) {
                stack.extend(node.children().map(|child| (child, depth + 1)));
            }
        }

        debug!(max_depth, "computed max depth");
        max_depth
    }
}

/// Pre-order (node, left, right) traversal over the nodes reachable from the root.
pub struct PreOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<NodeId>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Push right first so the left subtree is visited first
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current, node));
            }
        }
        None
    }
}

/// Post-order (left, right, node) traversal over the nodes reachable from the root.
pub struct PostOrderIterator<'a> {
    tree: &'a BinaryTree,
    stack: Vec<(NodeId, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(tree: &'a BinaryTree) -> Self {
        Self {
            tree,
            stack: tree.root.into_iter().map(|root| (root, false)).collect(),
        }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (NodeId, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                self.stack.extend(node.right.map(|child| (child, false)));
                self.stack.extend(node.left.map(|child| (child, false)));
            }
        }
        None
    }
}
