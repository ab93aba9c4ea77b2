//! Commit history retrieval for a single file.

use crate::error::{Error, Result};
use crate::process;
use crate::repository::Repository;
use graph::HistoryFormat;
use std::path::Path;
use std::process::Command;
use std::time::Duration;

pub const DEFAULT_GIT_TIMEOUT: Duration = Duration::from_secs(60);

/// Source of raw history lines for a file
pub trait HistorySource {
    fn extract(&self, repository: &Path, file: &Path, format: HistoryFormat) -> Result<Vec<String>>;
}

/// Runs `git log` once per extraction
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    timeout: Duration,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            program: "git".to_string(),
            timeout: DEFAULT_GIT_TIMEOUT,
        }
    }
}

impl GitCli {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    /// `git log` arguments for `format`, excluding the pathspec
    pub fn log_args(format: HistoryFormat) -> Vec<&'static str> {
        let mut args = vec!["log", "--all", "--no-color"];
        match format {
            HistoryFormat::Plain => args.push("--pretty=format:%H %s"),
            HistoryFormat::ParentAnnotated => args.push("--pretty=format:%H %s %P"),
            HistoryFormat::AsciiGraph => args.extend(["--graph", "--pretty=format:%H %s"]),
        }
        args
    }
}

impl HistorySource for GitCli {
    fn extract(&self, repository: &Path, file: &Path, format: HistoryFormat) -> Result<Vec<String>> {
        let repo = Repository::open(repository)?;
        let pathspec = repo.relative_path(file);

        let mut cmd = Command::new(&self.program);
        cmd.arg("-C")
            .arg(repo.workdir())
            .args(Self::log_args(format))
            .arg("--")
            .arg(&pathspec);
        tracing::debug!(?cmd, "querying history");

        let output = process::run(cmd, self.timeout).map_err(|err| match err {
            Error::Io(err) => Error::Extraction(format!("failed to run {}: {err}", self.program)),
            Error::Timeout { after, .. } => Error::Extraction(format!(
                "{} timed out after {}s",
                self.program,
                after.as_secs()
            )),
            other => other,
        })?;

        if !output.status.success() {
            return Err(Error::Extraction(format!(
                "git log exited with {}: {}",
                output.describe_status(),
                output.stderr
            )));
        }

        let text = String::from_utf8(output.stdout)
            .map_err(|_| Error::Extraction("git log output is not valid UTF-8".to_string()))?;
        let lines = split_lines(&text);

        tracing::info!(
            file = %pathspec.display(),
            format = %format,
            lines = lines.len(),
            "extracted history"
        );
        Ok(lines)
    }
}

/// Split command output into lines, dropping trailing whitespace
pub fn split_lines(text: &str) -> Vec<String> {
    text.trim_end()
        .lines()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Extract with the default `git` program and timeout
pub fn extract(repository: &Path, file: &Path, format: HistoryFormat) -> Result<Vec<String>> {
    GitCli::default().extract(repository, file, format)
}
