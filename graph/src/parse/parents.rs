//! `<id> <subject words...> <parent>*` lines, as printed by
//! `--pretty=format:"%H %s %P"`.
//!
//! Any later token that is exactly 40 hex digits is taken as a parent ID.
//! A subject word that happens to look like a full SHA cannot be told apart
//! and is treated as a parent too.

use super::{split_record, Reconstruction};
use crate::core::{Commit, CommitGraph, Edge};

const FULL_SHA_LEN: usize = 40;

pub fn is_full_sha(token: &str) -> bool {
    token.len() == FULL_SHA_LEN && token.bytes().all(|b| b.is_ascii_hexdigit())
}

pub fn parse<'a>(lines: impl Iterator<Item = &'a str>) -> Reconstruction {
    let mut graph = CommitGraph::new();
    let mut skipped = 0;

    for line in lines {
        let Some((id, rest)) = split_record(line) else {
            tracing::debug!(line, "skipping malformed parent-annotated record");
            skipped += 1;
            continue;
        };

        let (parents, words): (Vec<&str>, Vec<&str>) =
            rest.split_whitespace().partition(|token| is_full_sha(token));
        let parents: Vec<String> = parents.into_iter().map(str::to_string).collect();

        for parent in &parents {
            graph.add_edge(Edge::parent(parent.as_str(), id));
        }
        graph.add_commit(Commit::new(id, words.join(" ")).with_parents(parents));
    }

    Reconstruction { graph, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "abc1230000000000000000000000000000000000";
    const B: &str = "def4560000000000000000000000000000000000";
    const C: &str = "0123456789abcdef0123456789abcdef01234567";

    fn run(lines: &[String]) -> Reconstruction {
        parse(lines.iter().map(String::as_str))
    }

    #[test]
    fn test_parent_becomes_edge_source() {
        let result = run(&[format!("{A} Fix bug {B}")]);
        let graph = &result.graph;

        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.get(A).map(|c| c.label.as_str()), Some("Fix bug"));

        let edges: Vec<_> = graph.edges().map(|e| (e.from.as_str(), e.to.as_str())).collect();
        assert_eq!(edges, vec![(B, A)]);
        assert_eq!(graph.dangling_ids(), vec![B]);
    }

    #[test]
    fn test_merge_commit_has_two_parent_edges() {
        let result = run(&[
            format!("{C} Merge branch 'topic' {A} {B}"),
            format!("{A} Main work"),
            format!("{B} Topic work"),
        ]);
        let graph = &result.graph;

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.get(C).map(|c| c.parents.len()), Some(2));
        assert!(graph.dangling_ids().is_empty());
    }

    #[test]
    fn test_no_implicit_chain_edges() {
        let result = run(&[format!("{A} Second"), format!("{B} First")]);
        assert_eq!(result.graph.node_count(), 2);
        assert_eq!(result.graph.edge_count(), 0);
    }

    #[test]
    fn test_subject_words_keep_order_around_shas() {
        let result = run(&[format!("{C} Revert {A} partially")]);
        let graph = &result.graph;

        assert_eq!(graph.get(C).map(|c| c.label.as_str()), Some("Revert partially"));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_duplicate_relations_collapse() {
        let line = format!("{A} Fix bug {B}");
        let result = run(&[line.clone(), line]);
        assert_eq!(result.graph.node_count(), 1);
        assert_eq!(result.graph.edge_count(), 1);
    }

    #[test]
    fn test_is_full_sha() {
        assert!(is_full_sha(A));
        assert!(is_full_sha(&A.to_uppercase()));
        assert!(!is_full_sha("abc123"));
        assert!(!is_full_sha("zzz4560000000000000000000000000000000000"));
    }
}
