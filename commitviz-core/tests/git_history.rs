use commitviz_core::history::{GitCli, HistorySource, DEFAULT_GIT_TIMEOUT};
use commitviz_core::locator::locate;
use git2::{Oid, Repository, Signature};
use graph::{reconstruct, serialize, HistoryFormat};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn create_test_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test User").unwrap();
    config.set_str("user.email", "test@example.com").unwrap();

    (dir, repo)
}

fn commit_file(repo: &Repository, file: &str, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap();
    fs::write(workdir.join(file), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(file)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<_> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

#[test]
fn extracts_plain_history_for_located_file() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let (dir, repo) = create_test_repo();
    let first = commit_file(&repo, "notes.txt", "one\n", "Initial commit");
    commit_file(&repo, "other.txt", "x\n", "Unrelated change");
    let second = commit_file(&repo, "notes.txt", "two\n", "Second commit");

    let digest = commitviz_core::locator::file_digest(&dir.path().join("notes.txt")).unwrap();
    let file = locate(dir.path(), &digest).unwrap().unwrap();

    let lines = GitCli::default()
        .extract(dir.path(), &file, HistoryFormat::Plain)
        .unwrap();
    assert_eq!(
        lines,
        vec![format!("{second} Second commit"), format!("{first} Initial commit")]
    );

    let text = serialize(&reconstruct(&lines, HistoryFormat::Plain));
    assert!(text.contains(&format!("  {first} --> {second}\n")));
}

#[test]
fn extracts_parent_annotated_history() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let (dir, repo) = create_test_repo();
    let first = commit_file(&repo, "notes.txt", "one\n", "Initial commit");
    let second = commit_file(&repo, "notes.txt", "two\n", "Second commit");

    let lines = GitCli::new("git", DEFAULT_GIT_TIMEOUT)
        .extract(dir.path(), &dir.path().join("notes.txt"), HistoryFormat::ParentAnnotated)
        .unwrap();
    let graph = reconstruct(&lines, HistoryFormat::ParentAnnotated);

    assert_eq!(graph.node_count(), 2);
    assert_eq!(
        graph.get(&second.to_string()).map(|c| c.label.as_str()),
        Some("Second commit")
    );
    let edges: Vec<_> = graph.edges().map(|e| (e.from.clone(), e.to.clone())).collect();
    assert_eq!(edges, vec![(first.to_string(), second.to_string())]);
}

#[test]
fn extracts_ascii_graph_history() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let (dir, repo) = create_test_repo();
    commit_file(&repo, "notes.txt", "one\n", "Initial commit");
    commit_file(&repo, "notes.txt", "two\n", "Second commit");
    commit_file(&repo, "notes.txt", "three\n", "Third commit");

    let lines = GitCli::default()
        .extract(dir.path(), &dir.path().join("notes.txt"), HistoryFormat::AsciiGraph)
        .unwrap();
    assert!(lines.iter().all(|l| l.starts_with('*')));

    let graph = reconstruct(&lines, HistoryFormat::AsciiGraph);
    assert_eq!(graph.node_count(), 3);
    assert_eq!(graph.edge_count(), 2);
}

#[test]
fn file_without_history_yields_no_lines() {
    if !git_available() {
        eprintln!("git not available, skipping");
        return;
    }
    let (dir, repo) = create_test_repo();
    commit_file(&repo, "notes.txt", "one\n", "Initial commit");
    fs::write(dir.path().join("untracked.txt"), "new\n").unwrap();

    let lines = GitCli::default()
        .extract(dir.path(), &dir.path().join("untracked.txt"), HistoryFormat::Plain)
        .unwrap();
    assert!(lines.is_empty());
}
