pub mod node;
pub mod edge;
pub mod graph;

pub use node::Commit;
pub use edge::{Edge, EdgeKind};
pub use graph::{CommitGraph, GraphStats};
