//! Variable Export Library
//!
//! Turns a design tool's variables (typed, multi-mode, possibly aliasing each other
//! across collections) into a CSS custom-property stylesheet, a nested style-framework
//! configuration object and a reference graph for visualization.

pub mod config;
pub mod css;
pub mod error;
pub mod export;
pub mod graph;
pub mod resolve;
pub mod theme_config;
pub mod variables;
#[cfg(test)]
pub mod test_utils;

pub use config::ExportConfig;
pub use error::{ExportError, ExportResult};
pub use export::{export_css, export_graph, export_theme_config};
pub use variables::{ExportDocument, VariableStore};
