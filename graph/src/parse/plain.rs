//! `<id> <subject>` lines, newest first.
//!
//! With no parent data the list order is the lineage: each record gets an
//! edge from the record after it.

use super::{split_record, Reconstruction};
use crate::core::{Commit, CommitGraph, Edge};

pub fn parse<'a>(lines: impl Iterator<Item = &'a str>) -> Reconstruction {
    let mut graph = CommitGraph::new();
    let mut skipped = 0;
    let mut newer: Option<String> = None;

    for line in lines {
        let Some((id, subject)) = split_record(line) else {
            tracing::debug!(line, "skipping malformed plain record");
            skipped += 1;
            continue;
        };

        graph.add_commit(Commit::new(id, subject));

        if let Some(newer) = newer.as_deref() {
            let edge = Edge::lineage(id, newer);
            if !edge.is_self_loop() {
                graph.add_edge(edge);
            }
        }
        newer = Some(id.to_string());
    }

    Reconstruction { graph, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(lines: &[&str]) -> Reconstruction {
        parse(lines.iter().copied())
    }

    #[test]
    fn test_two_commits_form_one_edge() {
        let result = run(&["h1 Initial commit", "h2 Second commit"]);
        let graph = &result.graph;

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.get("h1").map(|c| c.label.as_str()), Some("Initial commit"));
        assert_eq!(graph.get("h2").map(|c| c.label.as_str()), Some("Second commit"));

        let edges: Vec<_> = graph.edges().map(|e| (e.from.as_str(), e.to.as_str())).collect();
        assert_eq!(edges, vec![("h2", "h1")]);
    }

    #[test]
    fn test_chain_has_n_minus_one_edges() {
        let result = run(&["d Four", "c Three", "b Two", "a One"]);
        assert_eq!(result.graph.node_count(), 4);
        assert_eq!(result.graph.edge_count(), 3);

        let edges: Vec<_> = result
            .graph
            .edges()
            .map(|e| format!("{}->{}", e.from, e.to))
            .collect();
        assert_eq!(edges, vec!["c->d", "b->c", "a->b"]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let result = run(&["b Two", "", "   ", "a One"]);
        assert_eq!(result.skipped, 2);
        assert_eq!(result.graph.node_count(), 2);
        assert_eq!(result.graph.edge_count(), 1);
    }

    #[test]
    fn test_subject_may_be_missing() {
        let result = run(&["lonely"]);
        assert_eq!(result.graph.get("lonely").map(|c| c.label.as_str()), Some(""));
        assert_eq!(result.graph.edge_count(), 0);
    }

    #[test]
    fn test_non_ascii_subject_preserved() {
        let result = run(&["abc 修复：支持中文提交信息"]);
        assert_eq!(
            result.graph.get("abc").map(|c| c.label.as_str()),
            Some("修复：支持中文提交信息")
        );
    }

    #[test]
    fn test_repeated_line_adds_no_self_loop() {
        let result = run(&["a One", "a One"]);
        assert_eq!(result.graph.node_count(), 1);
        assert_eq!(result.graph.edge_count(), 0);
    }
}
