//! Export pipeline: value model in, artifacts out
//!
//! generate stylesheet -> repair scopes -> optionally format. The reference graph and
//! the theme config are built independently from the same store.

use log::{info, warn};
use malva::{Syntax, config::FormatOptions, format_text};
use serde_json::Value;

use crate::config::ExportConfig;
use crate::css::{generate_stylesheet, repair_scopes};
use crate::graph::{Graph, GraphLayout, LayoutDirection, build_graph};
use crate::resolve::resolve_all;
use crate::theme_config::build_theme_config;
use crate::variables::VariableStore;

/// Final custom-property stylesheet
pub fn export_css(store: &VariableStore, config: &ExportConfig) -> String {
    if store.is_empty() {
        warn!("No variables to export");
        return String::new();
    }

    let generated = generate_stylesheet(store, config).to_css();
    let repaired = repair_scopes(&generated, config);
    info!(
        "Generated {} bytes of CSS ({} after scope repair)",
        generated.len(),
        repaired.len()
    );

    if config.format_output {
        format_css(&repaired)
    } else {
        repaired
    }
}

/// Pretty-print with malva, keeping the input when formatting fails
pub fn format_css(css: &str) -> String {
    match format_text(css, Syntax::Css, &FormatOptions::default()) {
        Ok(formatted) => formatted,
        Err(e) => {
            warn!("Failed to format CSS: {}", e);
            css.to_string()
        }
    }
}

/// Reference graph of every variable, laid out by `layout`
pub fn export_graph(
    store: &VariableStore,
    layout: &dyn GraphLayout,
    direction: LayoutDirection,
) -> Graph {
    let mut graph = build_graph(&resolve_all(store));
    graph.apply_layout(layout, direction);
    let problematic = graph.nodes.iter().filter(|node| node.data.problematic).count();
    info!(
        "Graph: {} nodes, {} edges, {} problematic",
        graph.nodes.len(),
        graph.edges.len(),
        problematic
    );
    graph
}

pub fn export_theme_config(store: &VariableStore, config: &ExportConfig) -> Value {
    build_theme_config(store, config)
}
