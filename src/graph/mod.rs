//! Reference graph of variable aliases
//!
//! Built from [`ResolutionResult`]s for visualization only; it never feeds back into the
//! stylesheet. Nodes are variables (keyed by name with slashes turned into dashes, so
//! all modes of a variable share one node) and one-off literal terminals. Edges are one
//! per (referencing variable, referenced node, mode).
//!
//! A variable is *problematic* when one of its modes needs more than two hops to reach
//! a terminal, or depends on more than one variable at the same time. Edges touching a
//! problematic node are flagged too.

pub mod layout;

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::resolve::{ResolutionResult, ResolvedValue, VariableRef, css_var_name, node_key};
use crate::variables::{Literal, ResolvedType};

pub use layout::{GraphLayout, LayeredLayout, LayoutDirection, Position};

/// Longest alias chain that is still considered healthy
pub const MAX_HEALTHY_HOPS: usize = 2;

/// Label of literal nodes holding a color
pub const COLOR_LITERAL_LABEL: &str = "色值";

/// Characters of a literal kept in its node label
const LITERAL_LABEL_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Variable,
    Literal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeData {
    pub name: String,
    pub css_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolved_type: Option<ResolvedType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
    pub problematic: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub kind: NodeKind,
    pub data: NodeData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Mode name of the referencing variable
    pub mode: String,
    pub problematic: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Assign positions computed by `layout`
    pub fn apply_layout(&mut self, layout: &dyn GraphLayout, direction: LayoutDirection) {
        let positions = layout.layout(&self.nodes, &self.edges, direction);
        for node in &mut self.nodes {
            node.position = positions.get(&node.id).copied();
        }
    }
}

/// Shape of one mode's reference tree
#[derive(Debug, Default, Clone, Copy)]
struct ChainStats {
    /// Longest run of variable hops down to a terminal
    hops: usize,
    /// Most distinct variables referenced side by side at one level
    fan_out: usize,
}

impl ChainStats {
    fn is_problematic(&self) -> bool {
        self.hops > MAX_HEALTHY_HOPS || self.fan_out > 1
    }
}

fn chain_stats(value: &ResolvedValue) -> ChainStats {
    let ResolvedValue::Modes(tree) = value else {
        return ChainStats::default();
    };

    let mut stats = ChainStats::default();
    let mut referenced = HashSet::new();
    for entry in tree.values() {
        let nested = chain_stats(&entry.value);
        let hop = match &entry.variable {
            Some(variable) => {
                referenced.insert(variable.id.as_str());
                1
            }
            None => 0,
        };
        stats.hops = stats.hops.max(hop + nested.hops);
        stats.fan_out = stats.fan_out.max(nested.fan_out);
    }
    stats.fan_out = stats.fan_out.max(referenced.len());
    stats
}

#[derive(Default)]
struct GraphBuilder {
    nodes: IndexMap<String, GraphNode>,
    edges: IndexMap<String, GraphEdge>,
}

impl GraphBuilder {
    fn ensure_variable_node(&mut self, variable: &VariableRef, modes: Option<Vec<String>>) -> String {
        let id = node_key(&variable.name);
        let node = self.nodes.entry(id.clone()).or_insert_with(|| GraphNode {
            id: id.clone(),
            label: variable.name.clone(),
            kind: NodeKind::Variable,
            data: NodeData {
                name: variable.name.clone(),
                css_name: css_var_name(&variable.name),
                collection: variable.collection_name.clone(),
                resolved_type: Some(variable.resolved_type),
                modes: None,
                problematic: false,
            },
            position: None,
        });
        if node.data.modes.is_none() {
            node.data.modes = modes;
        }
        id
    }

    fn add_literal_node(&mut self, source: &str, mode_id: &str, literal: &Literal) -> String {
        let id = format!("literal:{}:{}", source, mode_id);
        let text = literal.display();
        let label = match literal {
            Literal::Color(_) => COLOR_LITERAL_LABEL.to_string(),
            _ => text.chars().take(LITERAL_LABEL_LEN).collect(),
        };
        self.nodes.entry(id.clone()).or_insert_with(|| GraphNode {
            id: id.clone(),
            label,
            kind: NodeKind::Literal,
            data: NodeData {
                name: text,
                css_name: String::new(),
                collection: None,
                resolved_type: None,
                modes: None,
                problematic: false,
            },
            position: None,
        });
        id
    }

    fn add_edge(&mut self, source: &str, target: &str, mode_id: &str, mode_name: &str) {
        let id = format!("{}->{}@{}", source, target, mode_id);
        self.edges.entry(id.clone()).or_insert_with(|| GraphEdge {
            id,
            source: source.to_string(),
            target: target.to_string(),
            mode: mode_name.to_string(),
            problematic: false,
        });
    }

    fn mark_problematic(&mut self, id: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.data.problematic = true;
        }
    }

    fn finish(self) -> Graph {
        let nodes = self.nodes;
        let is_problematic =
            |id: &str| nodes.get(id).map(|node| node.data.problematic).unwrap_or(false);
        let edges = self
            .edges
            .into_values()
            .map(|mut edge| {
                edge.problematic = is_problematic(&edge.source) || is_problematic(&edge.target);
                edge
            })
            .collect();
        Graph {
            nodes: nodes.into_values().collect(),
            edges,
        }
    }
}

/// Build the reference graph for a set of resolution results.
///
/// Running it twice over the same results yields the same graph. No cycle detection
/// happens here; cyclic chains already arrive cut as unresolved values.
pub fn build_graph(results: &[ResolutionResult]) -> Graph {
    let mut builder = GraphBuilder::default();

    for result in results {
        let mode_names = result.modes.values().map(|mode| mode.mode_name.clone()).collect();
        let source = builder.ensure_variable_node(&result.variable, Some(mode_names));

        for (mode_id, mode) in &result.modes {
            match &mode.value {
                ResolvedValue::Modes(tree) => {
                    for entry in tree.values() {
                        if let Some(variable) = &entry.variable {
                            let target = builder.ensure_variable_node(variable, None);
                            builder.add_edge(&source, &target, mode_id, &mode.mode_name);
                        }
                    }
                    if chain_stats(&mode.value).is_problematic() {
                        builder.mark_problematic(&source);
                    }
                }
                ResolvedValue::Literal(literal) => {
                    let target = builder.add_literal_node(&source, mode_id, literal);
                    builder.add_edge(&source, &target, mode_id, &mode.mode_name);
                }
                ResolvedValue::Unresolved(_) => {}
            }
        }
    }

    builder.finish()
}

#[cfg(test)]
mod graph_tests;
