use super::text::{escape_label, truncate_to_width};
use crate::core::CommitGraph;
use std::fmt::Write;

pub const DEFAULT_HEADER: &str = "graph TD";

/// Serializes a [`CommitGraph`] as a Mermaid flowchart.
///
/// Nodes are declared in first-seen order, then edges in discovery order.
/// Edge endpoints with no commit behind them are not declared and render as
/// bare identifiers.
#[derive(Debug, Clone)]
pub struct MermaidWriter {
    header: String,
    max_label_width: Option<usize>,
}

impl Default for MermaidWriter {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            max_label_width: None,
        }
    }
}

impl MermaidWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    pub fn max_label_width(mut self, width: Option<usize>) -> Self {
        self.max_label_width = width;
        self
    }

    pub fn write(&self, graph: &CommitGraph) -> String {
        let mut out = String::new();
        out.push_str(&self.header);
        out.push('\n');

        for commit in graph.commits() {
            let label = match self.max_label_width {
                Some(width) => truncate_to_width(&commit.label, width),
                None => commit.label.clone(),
            };
            // Writing to a String cannot fail
            let _ = writeln!(out, "  {}[\"{}\"]", commit.id, escape_label(&label));
        }

        for edge in graph.edges() {
            let _ = writeln!(out, "  {} --> {}", edge.from, edge.to);
        }

        out
    }
}

/// Serialize with the default `graph TD` header and untruncated labels
pub fn serialize(graph: &CommitGraph) -> String {
    MermaidWriter::default().write(graph)
}
