use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Invalid serialized tree: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Serialized tree is truncated: expected a token at position {expected_at}")]
    Truncated { expected_at: usize },

    #[error("Serialized tree has trailing tokens: tree complete after {consumed} of {total} tokens")]
    TrailingTokens { consumed: usize, total: usize },

    #[error("Serialized tree has {count} tokens, limit is {limit}")]
    TooManyTokens { count: usize, limit: usize },

    #[error("Node does not belong to this tree: {0}")]
    UnknownNode(String),

    #[error("Node already has a parent or is the root: {0}")]
    AlreadyAttached(String),

    #[error("Attaching {child} below {parent} would create a cycle")]
    CycleDetected { parent: String, child: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
