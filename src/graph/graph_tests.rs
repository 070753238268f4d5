//! Tests for the reference graph

use super::*;
use crate::resolve::{resolve_all, resolve_variable};
use crate::test_utils::{alias_variable, collection, color_variable, float_variable, store};
use crate::variables::{ResolvedType, Rgba, VariableStore};

fn chain_store() -> VariableStore {
    store(
        vec![collection("c", "Theme", &[("m", "Default")])],
        vec![
            alias_variable("a", "chain/a", ResolvedType::Float, "c", &[("m", "b")]),
            alias_variable("b", "chain/b", ResolvedType::Float, "c", &[("m", "c")]),
            alias_variable("c", "chain/c", ResolvedType::Float, "c", &[("m", "d")]),
            float_variable("d", "chain/d", "c", &[("m", 4.0)]),
            alias_variable("x", "short/x", ResolvedType::Float, "c", &[("m", "d")]),
        ],
    )
}

#[test]
fn test_modes_collapse_to_one_node_with_distinct_edges() {
    let store = store(
        vec![collection("theme", "Theme", &[("light", "Light"), ("dark", "Dark")])],
        vec![
            color_variable(
                "base",
                "colors/base",
                "theme",
                &[("light", Rgba::new_rgb(1.0, 1.0, 1.0)), ("dark", Rgba::new_rgb(0.0, 0.0, 0.0))],
            ),
            alias_variable(
                "surface",
                "colors/surface",
                ResolvedType::Color,
                "theme",
                &[("light", "base"), ("dark", "base")],
            ),
        ],
    );
    let graph = build_graph(&resolve_all(&store));

    let variable_nodes: Vec<&GraphNode> = graph
        .nodes
        .iter()
        .filter(|node| node.kind == NodeKind::Variable)
        .collect();
    assert_eq!(variable_nodes.len(), 2);

    let surface_edges: Vec<&GraphEdge> = graph
        .edges
        .iter()
        .filter(|edge| edge.source == "colors-surface" && edge.target == "colors-base")
        .collect();
    assert_eq!(surface_edges.len(), 2);
    let modes: Vec<&str> = surface_edges.iter().map(|edge| edge.mode.as_str()).collect();
    assert_eq!(modes, vec!["Light", "Dark"]);

    let surface = graph.node("colors-surface").unwrap();
    assert_eq!(surface.data.css_name, "--colors-surface");
    assert_eq!(surface.data.collection.as_deref(), Some("Theme"));
    assert_eq!(surface.data.modes, Some(vec!["Light".to_string(), "Dark".to_string()]));
}

#[test]
fn test_literal_nodes() {
    let store = store(
        vec![collection("c", "Theme", &[("m", "Default")])],
        vec![
            color_variable("red", "colors/red", "c", &[("m", Rgba::new_rgb(1.0, 0.0, 0.0))]),
            crate::test_utils::variable(
                "font",
                "font/family",
                ResolvedType::String,
                "c",
                vec![("m", crate::variables::VariableValue::Literal(
                    crate::variables::Literal::String("Helvetica Neue".to_string()),
                ))],
            ),
        ],
    );
    let graph = build_graph(&resolve_all(&store));

    let color = graph.node("literal:colors-red:m").unwrap();
    assert_eq!(color.kind, NodeKind::Literal);
    assert_eq!(color.label, COLOR_LITERAL_LABEL);
    assert_eq!(color.data.name, "#ff0000");

    let font = graph.node("literal:font-family:m").unwrap();
    assert_eq!(font.label, "Helvetica ");
    assert!(graph.edges.iter().any(|edge| edge.source == "font-family" && edge.target == font.id));
}

#[test]
fn test_three_hops_is_problematic() {
    let graph = build_graph(&resolve_all(&chain_store()));

    assert!(graph.node("chain-a").unwrap().data.problematic);
    assert!(!graph.node("chain-b").unwrap().data.problematic);
    assert!(!graph.node("short-x").unwrap().data.problematic);

    let a_to_b = graph.edges.iter().find(|edge| edge.source == "chain-a").unwrap();
    assert!(a_to_b.problematic);
    let x_to_d = graph.edges.iter().find(|edge| edge.source == "short-x").unwrap();
    assert!(!x_to_d.problematic);
}

#[test]
fn test_fan_out_is_problematic() {
    let store = store(
        vec![
            collection("brand", "Brand", &[("acme", "Acme"), ("globex", "Globex")]),
            collection("theme", "Theme", &[("light", "Light")]),
            collection("prim", "Primitives", &[("p", "Value")]),
        ],
        vec![
            color_variable("blue", "colors/blue", "prim", &[("p", Rgba::new_rgb(0.0, 0.0, 1.0))]),
            color_variable("green", "colors/green", "prim", &[("p", Rgba::new_rgb(0.0, 1.0, 0.0))]),
            alias_variable(
                "accent",
                "brand/accent",
                ResolvedType::Color,
                "brand",
                &[("acme", "blue"), ("globex", "green")],
            ),
            alias_variable("button", "button/bg", ResolvedType::Color, "theme", &[("light", "accent")]),
        ],
    );
    let graph = build_graph(&resolve_all(&store));

    assert!(graph.node("button-bg").unwrap().data.problematic);
    // One alias per mode on its own is fine
    assert!(!graph.node("brand-accent").unwrap().data.problematic);
}

#[test]
fn test_single_hop_is_not_problematic() {
    let store = store(
        vec![collection("c", "Theme", &[("m", "Default")])],
        vec![
            float_variable("b", "b", "c", &[("m", 1.0)]),
            alias_variable("a", "a", ResolvedType::Float, "c", &[("m", "b")]),
        ],
    );
    let graph = build_graph(&resolve_all(&store));
    assert!(graph.nodes.iter().all(|node| !node.data.problematic));
    assert!(graph.edges.iter().all(|edge| !edge.problematic));
}

#[test]
fn test_build_is_idempotent() {
    let store = chain_store();
    let results = resolve_all(&store);
    assert_eq!(build_graph(&results), build_graph(&results));

    // Feeding a result twice does not duplicate anything
    let mut doubled = results.clone();
    doubled.push(resolve_variable(store.variable("a").unwrap(), &store));
    let graph = build_graph(&doubled);
    assert_eq!(graph, build_graph(&results));
}

#[test]
fn test_layered_layout_is_deterministic() {
    let mut graph = build_graph(&resolve_all(&chain_store()));
    let layout = LayeredLayout::default();
    graph.apply_layout(&layout, LayoutDirection::TopBottom);

    let a = graph.node("chain-a").unwrap().position.unwrap();
    let b = graph.node("chain-b").unwrap().position.unwrap();
    let d = graph.node("chain-d").unwrap().position.unwrap();
    assert!(b.y > a.y);
    assert!(d.y > b.y);

    let mut again = build_graph(&resolve_all(&chain_store()));
    again.apply_layout(&layout, LayoutDirection::TopBottom);
    assert_eq!(graph, again);
}

#[test]
fn test_graph_serializes_camel_case() {
    let graph = build_graph(&resolve_all(&chain_store()));
    let json = serde_json::to_value(&graph).unwrap();
    let node = &json["nodes"][0];
    assert_eq!(node["kind"], "variable");
    assert!(node["data"]["cssName"].is_string());
    assert!(json["edges"][0]["problematic"].is_boolean());
}
