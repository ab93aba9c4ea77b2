//! Opt-in edges for histories that produced no commits.
//!
//! Reconstruction never invents edges on its own; a caller that wants a
//! placeholder diagram for an empty history supplies the pairs here.

use crate::core::{CommitGraph, Edge, EdgeKind};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Empty input yields an empty graph
    #[default]
    None,
    /// Add these `(from, to)` edges when no commit was parsed
    SeedWhenEmpty(Vec<(String, String)>),
}

impl FallbackPolicy {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        if pairs.is_empty() {
            FallbackPolicy::None
        } else {
            FallbackPolicy::SeedWhenEmpty(pairs)
        }
    }
}

/// Apply `policy` to `graph`, returning the number of edges added
pub fn seed_edges(graph: &mut CommitGraph, policy: &FallbackPolicy) -> usize {
    let FallbackPolicy::SeedWhenEmpty(pairs) = policy else {
        return 0;
    };

    let mut added = 0;
    for (from, to) in pairs {
        if graph.add_edge(Edge::new(from.as_str(), to.as_str(), EdgeKind::Seeded)) {
            added += 1;
        }
    }
    if added > 0 {
        tracing::info!(added, "history was empty, seeded fallback edges");
    }
    added
}
