//! `git log --graph` output, tracked as a two-lane state machine.
//!
//! Each line is classified into a [`LaneEvent`] and fed through
//! [`LaneState::transition`], which yields the next state and at most one
//! edge. Only two lanes are tracked: the primary lane (column 0) and the
//! most recently opened secondary lane (column 1). Deeper lanes are ignored.
//!
//! ```text
//! * c3 Merge branch 'topic'      PrimaryCommit
//! |\                             Fork
//! | * t1 Topic work              SecondaryCommit
//! * | c2 Main work               PrimaryCommit
//! |/                             Join
//! * c1 Initial commit            PrimaryCommit
//! ```

use super::{split_record, Reconstruction};
use crate::core::{Commit, CommitGraph, Edge};

/// Commit introduced by a graph line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommitRef<'a> {
    pub id: &'a str,
    pub label: &'a str,
}

/// Classified graph line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneEvent<'a> {
    /// `* <id> <subject>`, optionally `* | <id> <subject>`
    PrimaryCommit(CommitRef<'a>),
    /// `| * <id> <subject>`
    SecondaryCommit(CommitRef<'a>),
    /// `|\`
    Fork,
    /// `|/`
    Join,
    /// Decoration-only, blank, or unrecognized
    Ignored,
}

impl<'a> LaneEvent<'a> {
    pub fn classify(line: &'a str) -> Self {
        let line = line.trim_end();

        if let Some(rest) = line.strip_prefix('*') {
            return commit_ref(rest).map_or(LaneEvent::Ignored, LaneEvent::PrimaryCommit);
        }

        let Some(rest) = line.strip_prefix('|') else {
            return LaneEvent::Ignored;
        };
        if rest.starts_with('\\') {
            return LaneEvent::Fork;
        }
        if rest.starts_with('/') {
            return LaneEvent::Join;
        }
        match rest.trim_start().strip_prefix('*') {
            Some(rest) => commit_ref(rest).map_or(LaneEvent::Ignored, LaneEvent::SecondaryCommit),
            None => LaneEvent::Ignored,
        }
    }
}

/// Strip lane-continuation markers and split `<id> <subject>`
fn commit_ref(rest: &str) -> Option<CommitRef<'_>> {
    let rest = rest.trim_start_matches(['|', ' ', '\t']);
    split_record(rest).map(|(id, label)| CommitRef { id, label })
}

/// Cursor state while walking the graph top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LaneState {
    #[default]
    NoActiveCommit,
    PrimaryActive {
        primary: String,
    },
    SecondaryActive {
        primary: Option<String>,
        secondary: String,
    },
    /// A `|\` arrived before any commit on the new lane; the next secondary
    /// commit is linked to `fork_from`, the primary commit at the fork.
    ForkPending {
        primary: String,
        fork_from: String,
    },
}

impl LaneState {
    pub fn primary(&self) -> Option<&str> {
        match self {
            LaneState::NoActiveCommit => None,
            LaneState::PrimaryActive { primary } | LaneState::ForkPending { primary, .. } => {
                Some(primary)
            }
            LaneState::SecondaryActive { primary, .. } => primary.as_deref(),
        }
    }

    pub fn secondary(&self) -> Option<&str> {
        match self {
            LaneState::SecondaryActive { secondary, .. } => Some(secondary),
            _ => None,
        }
    }

    /// Transition table. Pure: the caller registers commits and edges.
    pub fn transition(self, event: LaneEvent<'_>) -> (LaneState, Option<Edge>) {
        use LaneEvent as E;
        use LaneState as S;

        match (self, event) {
            (state, E::Ignored) => (state, None),

            (S::NoActiveCommit, E::PrimaryCommit(c)) => {
                (S::PrimaryActive { primary: c.id.to_string() }, None)
            }
            (S::PrimaryActive { primary }, E::PrimaryCommit(c)) => (
                S::PrimaryActive { primary: c.id.to_string() },
                Some(Edge::lineage(c.id, primary)),
            ),
            (S::SecondaryActive { primary, secondary }, E::PrimaryCommit(c)) => (
                S::SecondaryActive {
                    primary: Some(c.id.to_string()),
                    secondary,
                },
                primary.map(|p| Edge::lineage(c.id, p)),
            ),
            (S::ForkPending { primary, fork_from }, E::PrimaryCommit(c)) => (
                S::ForkPending {
                    primary: c.id.to_string(),
                    fork_from,
                },
                Some(Edge::lineage(c.id, primary)),
            ),

            (S::NoActiveCommit, E::SecondaryCommit(c)) => (
                S::SecondaryActive {
                    primary: None,
                    secondary: c.id.to_string(),
                },
                None,
            ),
            (S::PrimaryActive { primary }, E::SecondaryCommit(c)) => (
                S::SecondaryActive {
                    primary: Some(primary),
                    secondary: c.id.to_string(),
                },
                None,
            ),
            (S::SecondaryActive { primary, secondary }, E::SecondaryCommit(c)) => (
                S::SecondaryActive {
                    primary,
                    secondary: c.id.to_string(),
                },
                Some(Edge::lineage(c.id, secondary)),
            ),
            (S::ForkPending { primary, fork_from }, E::SecondaryCommit(c)) => {
                let edge = Edge::fork(c.id, fork_from);
                (
                    S::SecondaryActive {
                        primary: Some(primary),
                        secondary: c.id.to_string(),
                    },
                    Some(edge),
                )
            }

            (
                S::SecondaryActive {
                    primary: Some(primary),
                    secondary,
                },
                E::Fork,
            ) => {
                let edge = Edge::fork(secondary.as_str(), primary.as_str());
                (
                    S::SecondaryActive {
                        primary: Some(primary),
                        secondary,
                    },
                    Some(edge),
                )
            }
            (S::PrimaryActive { primary }, E::Fork) => (
                S::ForkPending {
                    fork_from: primary.clone(),
                    primary,
                },
                None,
            ),
            (state, E::Fork) => (state, None),

            (S::SecondaryActive { primary: Some(primary), .. }, E::Join)
            | (S::ForkPending { primary, .. }, E::Join) => (S::PrimaryActive { primary }, None),
            (S::SecondaryActive { primary: None, .. }, E::Join) => (S::NoActiveCommit, None),
            (state, E::Join) => (state, None),
        }
    }
}

pub fn parse<'a>(lines: impl Iterator<Item = &'a str>) -> Reconstruction {
    let mut graph = CommitGraph::new();
    let mut skipped = 0;
    let mut state = LaneState::default();

    for line in lines {
        let event = LaneEvent::classify(line);
        match event {
            LaneEvent::PrimaryCommit(c) | LaneEvent::SecondaryCommit(c) => {
                graph.add_commit(Commit::new(c.id, c.label));
            }
            LaneEvent::Ignored if is_unrecognized(line) => {
                tracing::debug!(line, "skipping unrecognized graph line");
                skipped += 1;
            }
            _ => {}
        }

        let (next, edge) = state.transition(event);
        state = next;
        if let Some(edge) = edge.filter(|e| !e.is_self_loop()) {
            graph.add_edge(edge);
        }
    }

    Reconstruction { graph, skipped }
}

/// Pure lane decoration (`|`, `| |`, `|\|`, blank) is expected noise, not a
/// malformed record.
fn is_unrecognized(line: &str) -> bool {
    !line
        .chars()
        .all(|ch| matches!(ch, '|' | '\\' | '/' | '_' | ' ' | '\t'))
}
