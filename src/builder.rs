use tracing::{debug, instrument};

use crate::arena::{BinaryTree, NodeId, Side};
use crate::codec::{self, Token};
use crate::errors::{TreeError, TreeResult};

/// Default upper bound on the number of tokens accepted by [`TreeBuilder`].
pub const DEFAULT_MAX_TOKENS: usize = 1_000_000;

/// Where the next non-sentinel token gets attached.
#[derive(Debug, Clone, Copy)]
enum Slot {
    Root,
    Child(NodeId, Side),
}

/// Rebuilds trees from their pre-order token form.
#[derive(Debug, Clone)]
pub struct TreeBuilder {
    max_tokens: usize,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    #[instrument(level = "debug", skip(self, text), fields(len = text.len()))]
    pub fn build_from_str(&self, text: &str) -> TreeResult<BinaryTree> {
        let tokens = codec::decode(text)?;
        self.build_from_tokens(&tokens)
    }

    /// Consumes tokens left to right: a sentinel leaves the current slot
    /// empty, a value creates a node whose left and then right subtrees are
    /// filled from the tokens that follow.
    ///
    /// Every token must be used exactly once: running out early is
    /// [`TreeError::Truncated`], leftovers are [`TreeError::TrailingTokens`].
    #[instrument(level = "debug", skip(self, tokens), fields(count = tokens.len()))]
    pub fn build_from_tokens(&self, tokens: &[Token]) -> TreeResult<BinaryTree> {
        if tokens.len() > self.max_tokens {
            return Err(TreeError::TooManyTokens {
                count: tokens.len(),
                limit: self.max_tokens,
            });
        }

        let mut tree = BinaryTree::new();
        // open slots, the next one to fill on top
        let mut pending = vec![Slot::Root];
        let mut consumed = 0;

        while let Some(slot) = pending.pop() {
            let token = tokens
                .get(consumed)
                .ok_or(TreeError::Truncated { expected_at: consumed })?;
            consumed += 1;

            let Some(value) = *token else {
                continue;
            };
            let id = tree.add_node(value, None, None)?;
            match slot {
                Slot::Root => {
                    tree.set_root(Some(id))?;
                }
                Slot::Child(parent, side) => tree.link(parent, side, id),
            }
            pending.push(Slot::Child(id, Side::Right));
            pending.push(Slot::Child(id, Side::Left));
        }

        if consumed < tokens.len() {
            return Err(TreeError::TrailingTokens {
                consumed,
                total: tokens.len(),
            });
        }

        debug!(consumed, "tree rebuilt");
        Ok(tree)
    }
}
