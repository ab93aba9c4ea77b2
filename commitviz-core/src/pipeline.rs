//! Locate → extract → reconstruct → serialize → render.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::history::HistorySource;
use crate::render::{save_diagram, with_extension, MermaidCli, IMAGE_EXTENSION};
use crate::repository::Repository;
use graph::{reconstruct_detailed, GraphStats};
use std::path::PathBuf;

/// Inputs of one run
#[derive(Debug, Clone)]
pub struct Request {
    pub repository: PathBuf,
    /// Output path without extension; `.mmd` and `.png` are appended
    pub output_stem: PathBuf,
    pub file_digest: String,
}

/// Diagram text built for the located file, before anything is written
#[derive(Debug, Clone)]
pub struct Diagram {
    pub file: PathBuf,
    pub text: String,
    pub stats: GraphStats,
    /// History lines that matched no recognized shape
    pub skipped_lines: usize,
}

#[derive(Debug, Clone)]
pub struct Outcome {
    pub diagram: Diagram,
    pub description_path: PathBuf,
    pub image_path: PathBuf,
}

pub struct Visualizer<S> {
    config: Config,
    source: S,
    renderer: MermaidCli,
}

impl<S: HistorySource> Visualizer<S> {
    pub fn new(config: Config, source: S, renderer: MermaidCli) -> Self {
        Self {
            config,
            source,
            renderer,
        }
    }

    /// Run every stage. Nothing is written unless a non-empty diagram exists.
    pub fn run(&self, request: &Request) -> Result<Outcome> {
        if !self.renderer.program().exists() {
            return Err(Error::ToolMissing(self.renderer.program().to_path_buf()));
        }

        let diagram = self.build(request)?;

        let description_path = save_diagram(&request.output_stem, &diagram.text)?;
        let image_path = with_extension(&request.output_stem, IMAGE_EXTENSION);
        self.renderer.render(&description_path, &image_path)?;

        Ok(Outcome {
            diagram,
            description_path,
            image_path,
        })
    }

    /// Locate the file and produce its diagram text without touching disk
    pub fn build(&self, request: &Request) -> Result<Diagram> {
        let repo = Repository::open(&request.repository)?;

        let file = self
            .config
            .locator()
            .locate(repo.workdir(), &request.file_digest)?
            .ok_or_else(|| Error::LookupFailure {
                root: repo.workdir().to_path_buf(),
                digest: request.file_digest.trim().to_string(),
            })?;

        let format = self.config.format;
        let lines = self.source.extract(&request.repository, &file, format)?;

        let reconstruction =
            reconstruct_detailed(&lines, format, &self.config.fallback_policy());
        if reconstruction.graph.is_empty() {
            return Err(Error::EmptyHistory(file));
        }
        if reconstruction.skipped > 0 {
            tracing::warn!(skipped = reconstruction.skipped, "ignored unrecognized history lines");
        }

        let text = self.config.writer().write(&reconstruction.graph);
        Ok(Diagram {
            file,
            text,
            stats: reconstruction.graph.stats(),
            skipped_lines: reconstruction.skipped,
        })
    }
}
