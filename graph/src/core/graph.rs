use super::{edge::Edge, node::Commit};
use indexmap::{IndexMap, IndexSet};

/// Canonical commit graph: deduplicated nodes and edges in discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitGraph {
    /// All commits indexed by ID, in first-seen order
    nodes: IndexMap<String, Commit>,
    /// All edges, in the order they were discovered
    edges: IndexSet<Edge>,
}

impl CommitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a commit, merging it into an existing node with the same ID
    pub fn add_commit(&mut self, commit: Commit) {
        match self.nodes.get_mut(&commit.id) {
            Some(existing) => existing.absorb(commit),
            None => {
                self.nodes.insert(commit.id.clone(), commit);
            }
        }
    }

    /// Add an edge unless the same ordered pair is already present.
    ///
    /// Returns `true` when the edge was new.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        self.edges.insert(edge)
    }

    pub fn get(&self, id: &str) -> Option<&Commit> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn commits(&self) -> impl Iterator<Item = &Commit> {
        self.nodes.values()
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Edge endpoints that were never registered as commits, first-seen order
    pub fn dangling_ids(&self) -> Vec<&str> {
        let mut seen = IndexSet::new();
        for edge in &self.edges {
            for id in [edge.from.as_str(), edge.to.as_str()] {
                if !self.nodes.contains_key(id) {
                    seen.insert(id);
                }
            }
        }
        seen.into_iter().collect()
    }

    /// Get statistics about the graph
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            total_commits: self.nodes.len(),
            total_edges: self.edges.len(),
            dangling_refs: self.dangling_ids().len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    pub total_commits: usize,
    pub total_edges: usize,
    pub dangling_refs: usize,
}
