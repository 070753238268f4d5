//! Node placement for the reference graph
//!
//! The graph builder does not care how nodes are placed, only that placement is a
//! deterministic function of the graph. [`LayeredLayout`] is the default: a plain
//! longest-path layering where each edge points one layer further.

use std::collections::HashMap;

use serde::Serialize;

use super::{GraphEdge, GraphNode};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutDirection {
    #[default]
    TopBottom,
    LeftRight,
}

/// Deterministic placement: the same nodes and edges always give the same positions
pub trait GraphLayout {
    fn layout(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        direction: LayoutDirection,
    ) -> HashMap<String, Position>;
}

#[derive(Debug, Clone, Copy)]
pub struct LayeredLayout {
    pub node_width: f64,
    pub node_height: f64,
    /// Gap between nodes of the same layer
    pub node_gap: f64,
    /// Gap between layers
    pub layer_gap: f64,
}

impl Default for LayeredLayout {
    fn default() -> Self {
        Self {
            node_width: 180.0,
            node_height: 40.0,
            node_gap: 20.0,
            layer_gap: 80.0,
        }
    }
}

impl LayeredLayout {
    /// Layer of every node: sources sit at 0, each edge pushes its target one further.
    /// Relaxation stops after `nodes.len()` rounds so a cyclic input still terminates.
    fn layers(&self, nodes: &[GraphNode], edges: &[GraphEdge]) -> HashMap<String, usize> {
        let mut layers: HashMap<String, usize> =
            nodes.iter().map(|node| (node.id.clone(), 0)).collect();

        for _ in 0..nodes.len() {
            let mut changed = false;
            for edge in edges {
                let Some(&source_layer) = layers.get(&edge.source) else {
                    continue;
                };
                if let Some(target_layer) = layers.get_mut(&edge.target) {
                    if *target_layer < source_layer + 1 {
                        *target_layer = source_layer + 1;
                        changed = true;
                    }
                }
            }
            if !changed {
                break;
            }
        }
        layers
    }
}

impl GraphLayout for LayeredLayout {
    fn layout(
        &self,
        nodes: &[GraphNode],
        edges: &[GraphEdge],
        direction: LayoutDirection,
    ) -> HashMap<String, Position> {
        let layers = self.layers(nodes, edges);
        let mut next_slot: HashMap<usize, usize> = HashMap::new();
        let mut positions = HashMap::new();

        // Within a layer nodes keep their order in `nodes`
        for node in nodes {
            let layer = layers.get(&node.id).copied().unwrap_or(0);
            let slot = next_slot.entry(layer).or_insert(0);
            let along = *slot as f64;
            *slot += 1;

            let position = match direction {
                LayoutDirection::TopBottom => Position {
                    x: along * (self.node_width + self.node_gap),
                    y: layer as f64 * (self.node_height + self.layer_gap),
                },
                LayoutDirection::LeftRight => Position {
                    x: layer as f64 * (self.node_width + self.layer_gap),
                    y: along * (self.node_height + self.node_gap),
                },
            };
            positions.insert(node.id.clone(), position);
        }
        positions
    }
}
