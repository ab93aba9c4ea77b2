//! Reconstruction of a [`CommitGraph`] from textual `git log` output.
//!
//! Three input shapes are understood, see [`HistoryFormat`]. Parsing is
//! lenient: a line that matches none of the recognized shapes is skipped
//! and counted, never fatal.

pub mod plain;
pub mod parents;
pub mod lanes;

use crate::core::CommitGraph;
use crate::seed::{seed_edges, FallbackPolicy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Shape of the raw history lines handed to [`reconstruct`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HistoryFormat {
    /// `<id> <subject>`, newest first
    #[default]
    Plain,
    /// `<id> <subject words...> <40-hex parent>*`
    #[serde(alias = "parents")]
    ParentAnnotated,
    /// `git log --graph` output with `*`, `|`, `|\` and `|/` decorations
    #[serde(alias = "graph")]
    AsciiGraph,
}

impl HistoryFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryFormat::Plain => "plain",
            HistoryFormat::ParentAnnotated => "parent-annotated",
            HistoryFormat::AsciiGraph => "ascii-graph",
        }
    }
}

impl fmt::Display for HistoryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown history format `{0}` (expected plain, parents or graph)")]
pub struct UnknownFormat(pub String);

impl FromStr for HistoryFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(HistoryFormat::Plain),
            "parents" | "parent-annotated" => Ok(HistoryFormat::ParentAnnotated),
            "graph" | "ascii-graph" => Ok(HistoryFormat::AsciiGraph),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

/// Result of a reconstruction, including how many lines were skipped
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconstruction {
    pub graph: CommitGraph,
    /// Lines that matched no recognized shape
    pub skipped: usize,
}

/// Build the canonical graph for `lines` with no fallback seeding
pub fn reconstruct<S: AsRef<str>>(lines: &[S], format: HistoryFormat) -> CommitGraph {
    reconstruct_detailed(lines, format, &FallbackPolicy::None).graph
}

/// Build the canonical graph, applying `policy` when no commits were parsed
pub fn reconstruct_with<S: AsRef<str>>(
    lines: &[S],
    format: HistoryFormat,
    policy: &FallbackPolicy,
) -> CommitGraph {
    reconstruct_detailed(lines, format, policy).graph
}

pub fn reconstruct_detailed<S: AsRef<str>>(
    lines: &[S],
    format: HistoryFormat,
    policy: &FallbackPolicy,
) -> Reconstruction {
    let lines = lines.iter().map(<S as AsRef<str>>::as_ref);
    let mut result = match format {
        HistoryFormat::Plain => plain::parse(lines),
        HistoryFormat::ParentAnnotated => parents::parse(lines),
        HistoryFormat::AsciiGraph => lanes::parse(lines),
    };

    if result.graph.node_count() == 0 {
        seed_edges(&mut result.graph, policy);
    }

    tracing::debug!(
        format = %format,
        commits = result.graph.node_count(),
        edges = result.graph.edge_count(),
        skipped = result.skipped,
        "reconstructed commit graph"
    );
    result
}

/// Split `<id> <rest>` into the identifier and the trimmed remainder.
///
/// Returns `None` for blank lines.
pub(crate) fn split_record(line: &str) -> Option<(&str, &str)> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match line.split_once(char::is_whitespace) {
        Some((id, rest)) => Some((id, rest.trim())),
        None => Some((line, "")),
    }
}
