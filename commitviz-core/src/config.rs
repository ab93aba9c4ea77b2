use crate::error::{Error, Result};
use crate::locator::{DigestMatch, HashLocator};
use graph::{FallbackPolicy, HistoryFormat, MermaidWriter};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Run configuration, loadable from a TOML file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Shape of the `git log` output to request and parse
    pub format: HistoryFormat,
    /// First line of the diagram description
    pub header: String,
    pub digest_match: DigestMatch,
    /// Skip `.git` directories while searching for the target file
    pub skip_git_dir: bool,
    pub git_program: String,
    pub git_timeout_secs: u64,
    pub render_timeout_secs: u64,
    /// Truncate node labels to this many columns
    pub max_label_width: Option<usize>,
    /// `(from, to)` edges drawn when the history yields no commits
    pub fallback_edges: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: HistoryFormat::Plain,
            header: graph::render::DEFAULT_HEADER.to_string(),
            digest_match: DigestMatch::CaseInsensitive,
            skip_git_dir: true,
            git_program: "git".to_string(),
            git_timeout_secs: 60,
            render_timeout_secs: 120,
            max_label_width: None,
            fallback_edges: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::Config(err.to_string()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::Config(format!("{}: {err}", path.display())))?;
        Self::from_toml(&text)
    }

    pub fn git_timeout(&self) -> Duration {
        Duration::from_secs(self.git_timeout_secs)
    }

    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }

    pub fn locator(&self) -> HashLocator {
        HashLocator::new(self.digest_match, self.skip_git_dir)
    }

    pub fn writer(&self) -> MermaidWriter {
        MermaidWriter::new()
            .header(self.header.clone())
            .max_label_width(self.max_label_width)
    }

    pub fn fallback_policy(&self) -> FallbackPolicy {
        FallbackPolicy::from_pairs(self.fallback_edges.clone())
    }
}
