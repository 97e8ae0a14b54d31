//! Text form of a tree: the pre-order value sequence with `null` standing in
//! for every absent child, written as a whitespace-free JSON array.
//!
//! ```text
//!     1
//!    / \        [1,2,null,null,3,null,null]
//!   2   3
//! ```
//!
//! The empty tree is `[null]`.

use std::fmt;
use std::str::FromStr;

use tracing::instrument;

use crate::arena::BinaryTree;
use crate::builder::TreeBuilder;
use crate::errors::TreeResult;

/// One element of the serialized sequence: a value, or None for an absent child.
pub type Token = Option<i64>;

/// Textual marker for an absent child.
pub const SENTINEL: &str = "null";

/// Renders tokens as `[v,v,null,...]`.
pub fn encode(tokens: &[Token]) -> String {
    let mut out = String::with_capacity(tokens.len() * 4 + 2);
    out.push('[');
    for (i, token) in tokens.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        match token {
            Some(value) => out.push_str(&value.to_string()),
            None => out.push_str(SENTINEL),
        }
    }
    out.push(']');
    out
}

/// Parses a JSON array whose elements are integers or `null`.
///
/// Anything else (floats, strings, nested arrays, integers outside the i64
/// range) is a parse error.
pub fn decode(text: &str) -> TreeResult<Vec<Token>> {
    Ok(serde_json::from_str(text.trim())?)
}

impl BinaryTree {
    /// Pre-order values of the tree with a sentinel for every absent child.
    pub fn tokens(&self) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut stack = vec![self.root()];

        while let Some(slot) = stack.pop() {
            match slot.and_then(|id| self.node(id)) {
                Some(node) => {
                    tokens.push(Some(node.value));
                    stack.push(node.right);
                    stack.push(node.left);
                }
                None => tokens.push(None),
            }
        }
        tokens
    }

    #[instrument(level = "debug", skip(self))]
    pub fn serialize(&self) -> String {
        encode(&self.tokens())
    }

    /// Rebuilds a tree from its serialized form using default limits.
    #[instrument(level = "debug", skip(text), fields(len = text.len()))]
    pub fn deserialize(text: &str) -> TreeResult<Self> {
        TreeBuilder::new().build_from_str(text)
    }
}

impl FromStr for BinaryTree {
    type Err = crate::errors::TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::deserialize(s)
    }
}

impl fmt::Display for BinaryTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

/// Structural equality: same shape and same values, node identity ignored.
impl PartialEq for BinaryTree {
    fn eq(&self, other: &Self) -> bool {
        self.tokens() == other.tokens()
    }
}

impl Eq for BinaryTree {}
