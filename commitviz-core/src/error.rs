use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Failures of a single visualization run
#[derive(Debug, Error)]
pub enum Error {
    #[error("diagram render tool not found: {}", .0.display())]
    ToolMissing(PathBuf),

    #[error("directory not found: {}", .0.display())]
    RootMissing(PathBuf),

    #[error("invalid SHA-256 digest `{0}` (expected 64 hex characters)")]
    InvalidDigest(String),

    #[error("not a git repository: {}", .0.display())]
    NotARepository(PathBuf),

    #[error("no file under {} matches digest {digest}", .root.display())]
    LookupFailure { root: PathBuf, digest: String },

    #[error("history query failed: {0}")]
    Extraction(String),

    #[error("no commit history found for {}", .0.display())]
    EmptyHistory(PathBuf),

    #[error("{program} timed out after {}s", .after.as_secs())]
    Timeout { program: String, after: Duration },

    #[error("diagram renderer exited with {status}: {stderr}")]
    Render { status: String, stderr: String },

    #[error("invalid config: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
