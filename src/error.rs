use thiserror::Error;

/// Errors reported by [`RedBlackTree`](crate::RedBlackTree) operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("key not found: {key}")]
    KeyNotFound { key: i32 },
    #[error("tree is empty")]
    EmptyTree,
}

pub type Result<T> = std::result::Result<T, TreeError>;
