use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use commitviz_core::{Config, Error, GitCli, MermaidCli, Outcome, Request, Visualizer};
use graph::HistoryFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "commitviz")]
#[command(about = "Draw the commit history of a file found by its SHA-256 digest", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to the graph visualization program (Mermaid CLI)
    #[arg(long)]
    viz: PathBuf,
    /// Path to the git repository to analyze
    #[arg(long)]
    repo: PathBuf,
    /// Path to save the graph image (without extension)
    #[arg(long)]
    output: PathBuf,
    /// SHA-256 digest of the file to find in the repository
    #[arg(long, alias = "file_hash")]
    file_hash: String,
    /// History shape to request: plain, parents or graph
    #[arg(long)]
    format: Option<HistoryFormat>,
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Diagram header line (defaults to `graph TD`)
    #[arg(long)]
    header: Option<String>,
    /// Truncate commit subjects to this many columns
    #[arg(long)]
    max_label_width: Option<usize>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(outcome) => {
            let diagram = &outcome.diagram;
            let stats = diagram.stats;
            println!(
                "{} commits, {} edges ({} dangling refs) for {}",
                stats.total_commits,
                stats.total_edges,
                stats.dangling_refs,
                diagram.file.display()
            );
            if diagram.skipped_lines > 0 {
                println!("{} unrecognized history lines ignored", diagram.skipped_lines);
            }
            println!("Diagram saved to {}", outcome.image_path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err:#}");
            if let Some(Error::Render { .. }) = err.downcast_ref::<Error>() {
                eprintln!(
                    "diagram description kept at {}",
                    commitviz_core::with_extension(&cli.output, "mmd").display()
                );
            }
            ExitCode::from(exit_status(&err))
        }
    }
}

fn run(cli: &Cli) -> Result<Outcome> {
    let config = load_config(cli)?;
    tracing::info!(format = %config.format, repo = %cli.repo.display(), "starting");

    let source = GitCli::new(config.git_program.clone(), config.git_timeout());
    let renderer = MermaidCli::new(&cli.viz, config.render_timeout());
    let visualizer = Visualizer::new(config, source, renderer);

    let request = Request {
        repository: cli.repo.clone(),
        output_stem: cli.output.clone(),
        file_digest: cli.file_hash.clone(),
    };
    let outcome = visualizer.run(&request)?;
    Ok(outcome)
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(header) = &cli.header {
        config.header = header.clone();
    }
    if cli.max_label_width.is_some() {
        config.max_label_width = cli.max_label_width;
    }

    Ok(config)
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// One exit code per precondition so scripts can tell failures apart
fn exit_status(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<Error>() {
        Some(Error::ToolMissing(_)) => 2,
        Some(Error::RootMissing(_) | Error::NotARepository(_)) => 3,
        Some(Error::LookupFailure { .. }) => 4,
        Some(Error::Extraction(_) | Error::Timeout { .. }) => 5,
        Some(Error::EmptyHistory(_)) => 6,
        Some(Error::Render { .. }) => 7,
        Some(Error::InvalidDigest(_) | Error::Config(_) | Error::Io(_)) | None => 1,
    }
}
