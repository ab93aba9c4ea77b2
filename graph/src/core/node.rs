/// A commit in the reconstructed history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit identifier (full or abbreviated SHA, treated as opaque)
    pub id: String,
    /// Subject line shown in the diagram
    pub label: String,
    /// Parent commit IDs, in the order they were first seen
    pub parents: Vec<String>,
}

impl Commit {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            parents: Vec::new(),
        }
    }

    pub fn with_parents(mut self, parents: Vec<String>) -> Self {
        for parent in parents {
            self.add_parent(parent);
        }
        self
    }

    /// Fold a second sighting of the same commit into this one.
    ///
    /// The first non-empty label wins; parents are unioned.
    pub(crate) fn absorb(&mut self, other: Commit) {
        if self.label.is_empty() && !other.label.is_empty() {
            self.label = other.label;
        }
        for parent in other.parents {
            self.add_parent(parent);
        }
    }

    fn add_parent(&mut self, parent: String) {
        if !self.parents.contains(&parent) {
            self.parents.push(parent);
        }
    }
}
