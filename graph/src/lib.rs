pub mod core;
pub mod parse;
pub mod render;
pub mod seed;

pub use crate::core::{Commit, CommitGraph, Edge, EdgeKind, GraphStats};
pub use parse::{reconstruct, reconstruct_detailed, reconstruct_with, HistoryFormat, Reconstruction, UnknownFormat};
pub use render::{serialize, MermaidWriter};
pub use seed::{seed_edges, FallbackPolicy};
