//! Model representation: SoA regression trees and the bagged forest.

mod forest;
mod tree;

pub use forest::Forest;
pub use tree::{MutableTree, NodeId, Tree, TreeValidationError};
