//! Find a file in a directory tree by its SHA-256 content digest.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const SHA256_HEX_LEN: usize = 64;
const READ_CHUNK: usize = 64 * 1024;

/// How a computed digest is compared with the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestMatch {
    #[default]
    CaseInsensitive,
    Exact,
}

impl DigestMatch {
    fn matches(&self, computed: &str, target: &str) -> bool {
        match self {
            DigestMatch::CaseInsensitive => computed.eq_ignore_ascii_case(target),
            DigestMatch::Exact => computed == target,
        }
    }
}

/// Counters from a completed walk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LocateStats {
    /// Files whose digest was computed
    pub visited: usize,
    /// Entries that could not be read and were skipped
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct HashLocator {
    digest_match: DigestMatch,
    skip_git_dir: bool,
}

impl Default for HashLocator {
    fn default() -> Self {
        Self {
            digest_match: DigestMatch::default(),
            skip_git_dir: true,
        }
    }
}

impl HashLocator {
    pub fn new(digest_match: DigestMatch, skip_git_dir: bool) -> Self {
        Self {
            digest_match,
            skip_git_dir,
        }
    }

    /// Return the first file under `root` whose SHA-256 equals `target`
    pub fn locate(&self, root: &Path, target: &str) -> Result<Option<PathBuf>> {
        self.locate_with_stats(root, target).map(|(found, _)| found)
    }

    pub fn locate_with_stats(
        &self,
        root: &Path,
        target: &str,
    ) -> Result<(Option<PathBuf>, LocateStats)> {
        let target = validate_digest(target)?;
        if !root.is_dir() {
            return Err(Error::RootMissing(root.to_path_buf()));
        }

        let mut stats = LocateStats::default();
        let skip_git_dir = self.skip_git_dir;
        let walker = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !(skip_git_dir && entry.depth() > 0 && entry.file_name() == ".git"));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable entry");
                    stats.skipped += 1;
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let digest = match file_digest(entry.path()) {
                Ok(digest) => digest,
                Err(err) => {
                    tracing::warn!(path = %entry.path().display(), error = %err, "skipping file");
                    stats.skipped += 1;
                    continue;
                }
            };
            stats.visited += 1;

            if self.digest_match.matches(&digest, target) {
                tracing::info!(path = %entry.path().display(), "found file by digest");
                return Ok((Some(entry.into_path()), stats));
            }
        }

        tracing::debug!(visited = stats.visited, skipped = stats.skipped, "no file matched digest");
        Ok((None, stats))
    }
}

/// Convenience wrapper with the default policy
pub fn locate(root: &Path, target: &str) -> Result<Option<PathBuf>> {
    HashLocator::default().locate(root, target)
}

/// Lowercase hex SHA-256 of a file's contents
pub fn file_digest(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buf = vec![0u8; READ_CHUNK];

    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

fn validate_digest(target: &str) -> Result<&str> {
    let target = target.trim();
    if target.len() == SHA256_HEX_LEN && target.bytes().all(|b| b.is_ascii_hexdigit()) {
        Ok(target)
    } else {
        Err(Error::InvalidDigest(target.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    // sha256("hello\n")
    const HELLO_DIGEST: &str = "5891b5b522d5df086d0ff0b110fbd9d21bb4fc7163af34d08286a2e846f6be03";

    fn create_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("nested/deeper")).unwrap();
        fs::write(dir.path().join("a.txt"), "unrelated\n").unwrap();
        fs::write(dir.path().join("nested/deeper/target.txt"), "hello\n").unwrap();
        dir
    }

    #[test]
    fn test_file_digest() {
        let dir = create_tree();
        let digest = file_digest(&dir.path().join("nested/deeper/target.txt")).unwrap();
        assert_eq!(digest, HELLO_DIGEST);
    }

    #[test]
    fn test_finds_matching_file() {
        let dir = create_tree();
        let (found, stats) = HashLocator::default()
            .locate_with_stats(dir.path(), HELLO_DIGEST)
            .unwrap();

        assert_eq!(found, Some(dir.path().join("nested/deeper/target.txt")));
        assert_eq!(stats.visited, 2);
    }

    #[test]
    fn test_case_policy() {
        let dir = create_tree();
        let upper = HELLO_DIGEST.to_uppercase();

        let found = locate(dir.path(), &upper).unwrap();
        assert!(found.is_some());

        let exact = HashLocator::new(DigestMatch::Exact, true);
        assert_eq!(exact.locate(dir.path(), &upper).unwrap(), None);
    }

    #[test]
    fn test_no_match_visits_every_file_once() {
        let dir = create_tree();
        let missing = "0".repeat(64);
        let (found, stats) = HashLocator::default()
            .locate_with_stats(dir.path(), &missing)
            .unwrap();

        assert_eq!(found, None);
        assert_eq!(stats.visited, 2);
        assert_eq!(stats.skipped, 0);
    }

    #[test]
    fn test_git_dir_skipped_by_default() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".git/objects")).unwrap();
        fs::write(dir.path().join(".git/objects/blob"), "hello\n").unwrap();

        assert_eq!(locate(dir.path(), HELLO_DIGEST).unwrap(), None);

        let including = HashLocator::new(DigestMatch::default(), false);
        assert!(including.locate(dir.path(), HELLO_DIGEST).unwrap().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_file_is_skipped() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let locked = dir.path().join("a_locked.txt");
        fs::write(&locked, "hello\n").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        fs::write(dir.path().join("b_target.txt"), "hello\n").unwrap();

        if File::open(&locked).is_ok() {
            // permission bits are not enforced (running as root)
            eprintln!("unreadable files cannot be created here, skipping");
            return;
        }

        let (found, stats) = HashLocator::default()
            .locate_with_stats(dir.path(), HELLO_DIGEST)
            .unwrap();
        assert_eq!(found, Some(dir.path().join("b_target.txt")));
        assert!(stats.skipped >= 1);

        let missing = "0".repeat(64);
        let (found, stats) = HashLocator::default()
            .locate_with_stats(dir.path(), &missing)
            .unwrap();
        assert_eq!(found, None);
        assert_eq!(stats.visited, 1);
        assert!(stats.skipped >= 1);
    }

    #[test]
    fn test_invalid_digest_rejected() {
        let dir = create_tree();
        assert!(matches!(
            locate(dir.path(), "not-a-digest"),
            Err(Error::InvalidDigest(_))
        ));
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            locate(&missing, HELLO_DIGEST),
            Err(Error::RootMissing(_))
        ));
    }
}
