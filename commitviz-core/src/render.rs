//! Diagram artifacts and the external Mermaid renderer.

use crate::error::{Error, Result};
use crate::process;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(120);
pub const DIAGRAM_EXTENSION: &str = "mmd";
pub const IMAGE_EXTENSION: &str = "png";

/// `<stem>.<extension>`, appending rather than replacing any dot in the stem
pub fn with_extension(stem: &Path, extension: &str) -> PathBuf {
    let mut path = stem.as_os_str().to_os_string();
    path.push(".");
    path.push(extension);
    PathBuf::from(path)
}

/// Write the diagram description next to the requested output stem
pub fn save_diagram(stem: &Path, text: &str) -> Result<PathBuf> {
    let path = with_extension(stem, DIAGRAM_EXTENSION);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, text)?;
    tracing::info!(path = %path.display(), "saved diagram description");
    Ok(path)
}

/// Mermaid CLI (`mmdc`) or any program taking `-i <input> -o <output>`
#[derive(Debug, Clone)]
pub struct MermaidCli {
    program: PathBuf,
    timeout: Duration,
}

impl MermaidCli {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Render `input` to `output`.
    ///
    /// On failure the input file is left in place so rendering can be
    /// retried by hand.
    pub fn render(&self, input: &Path, output: &Path) -> Result<()> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-i").arg(input).arg("-o").arg(output);
        tracing::debug!(?cmd, "rendering diagram");

        let result = process::run(cmd, self.timeout).map_err(|err| match err {
            Error::Io(err) => Error::Render {
                status: "spawn failure".to_string(),
                stderr: err.to_string(),
            },
            Error::Timeout { after, .. } => Error::Render {
                status: format!("timeout after {}s", after.as_secs()),
                stderr: String::new(),
            },
            other => other,
        })?;

        if !result.status.success() {
            return Err(Error::Render {
                status: result.describe_status(),
                stderr: result.stderr,
            });
        }

        tracing::info!(path = %output.display(), "rendered diagram");
        Ok(())
    }
}
