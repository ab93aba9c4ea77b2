/// A directed edge between two commits, diagrammed `from --> to`
#[derive(Debug, Clone, Eq)]
pub struct Edge {
    /// Source commit ID
    pub from: String,
    /// Target commit ID
    pub to: String,
    /// Which reconstruction rule produced the edge
    pub kind: EdgeKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    /// Implied by list order (plain log) or by a lane's chain (graph log)
    Lineage,
    /// Explicit parent ID from a parent-annotated log
    Parent,
    /// Branch point recorded from a `|\` marker
    Fork,
    /// Added by the empty-history fallback policy
    Seeded,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: EdgeKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    pub fn lineage(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, EdgeKind::Lineage)
    }

    pub fn parent(parent: impl Into<String>, child: impl Into<String>) -> Self {
        Self::new(parent, child, EdgeKind::Parent)
    }

    pub fn fork(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, EdgeKind::Fork)
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

// Identity is the ordered endpoint pair; the kind is metadata.
impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}
