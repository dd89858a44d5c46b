//! An ordered container of integer keys implemented with a red-black tree.
//!
//! Nodes live in an index arena whose slot 0 is a shared black sentinel, so
//! rotations and splices never need a separate "no node" case.
//!
//! Enable the `consistency_check` feature to validate the whole tree after
//! every insert and delete.

mod error;
mod node;
mod tree;
mod validate;

pub use error::{Result, TreeError};
pub use node::NodeId;
pub use tree::RedBlackTree;
