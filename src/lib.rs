//! In-memory binary tree of integer values with structural queries.
//!
//! Nodes live in an arena owned by [`BinaryTree`] and are addressed through
//! [`NodeId`] handles, so node identity never depends on node values.
//!
//! ```
//! use bintree::BinaryTree;
//!
//! let tree: BinaryTree = "[3,5,null,null,1,null,null]".parse().unwrap();
//! assert_eq!(tree.max_depth(), 2);
//! assert_eq!(tree.next_larger(3), Some(5));
//!
//! let five = tree.nth_preorder(1).unwrap();
//! let one = tree.nth_preorder(2).unwrap();
//! assert_eq!(tree.lowest_common_ancestor(five, one), tree.root());
//! assert_eq!(tree.serialize(), "[3,5,null,null,1,null,null]");
//! ```

pub mod arena;
pub mod builder;
pub mod cli;
pub mod codec;
pub mod config;
pub mod errors;
pub mod exitcode;
pub mod tree_traits;
pub mod util;
mod tree_queue;
mod tree_stack;

pub use arena::{BinaryTree, NodeId, TreeNode};
pub use builder::TreeBuilder;
pub use errors::{TreeError, TreeResult};
