pub mod config;
pub mod error;
pub mod history;
pub mod locator;
pub mod pipeline;
pub mod process;
pub mod render;
pub mod repository;

pub use config::Config;
pub use error::{Error, Result};
pub use history::{GitCli, HistorySource};
pub use locator::{DigestMatch, HashLocator, LocateStats};
pub use render::{save_diagram, with_extension, MermaidCli};
pub use repository::Repository;
pub use pipeline::{Diagram, Outcome, Request, Visualizer};
