pub mod mermaid;
pub mod text;

pub use mermaid::{serialize, MermaidWriter, DEFAULT_HEADER};
pub use text::{display_width, escape_label, truncate_to_width};
