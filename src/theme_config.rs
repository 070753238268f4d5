//! Nested style-framework configuration object
//!
//! Mirrors the variable name hierarchy (`colors/brand/primary` ->
//! `{"colors": {"brand": {"primary": ...}}}`) and points every leaf at the custom
//! property emitted in the stylesheet. Turning the object into a config file is left
//! to the caller.

use log::debug;
use serde_json::{Map, Value};

use crate::config::ExportConfig;
use crate::resolve::{css_var_name, naming::DEFAULT_SEGMENT};
use crate::variables::{ResolvedType, Variable, VariableStore};

/// Placeholder the framework substitutes with its opacity modifier
pub const ALPHA_PLACEHOLDER: &str = "<alpha-value>";

fn leaf_value(variable: &Variable) -> Option<Value> {
    let reference = css_var_name(&variable.name);
    match variable.resolved_type {
        ResolvedType::Color => Some(Value::String(format!(
            "rgb(var({}) / {})",
            reference, ALPHA_PLACEHOLDER
        ))),
        ResolvedType::Float | ResolvedType::String => {
            Some(Value::String(format!("var({})", reference)))
        }
        ResolvedType::Boolean => None,
    }
}

/// Insert `value` at `path`. A path that is both a leaf and a group keeps the leaf
/// under `DEFAULT`.
fn insert_path(root: &mut Map<String, Value>, path: &[&str], value: Value) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };

    let mut node = root;
    for segment in parents {
        let entry = node
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            let leaf = entry.take();
            let mut group = Map::new();
            group.insert(DEFAULT_SEGMENT.to_string(), leaf);
            *entry = Value::Object(group);
        }
        let Value::Object(next) = entry else {
            return;
        };
        node = next;
    }

    match node.get_mut(*last) {
        Some(Value::Object(group)) => {
            group.insert(DEFAULT_SEGMENT.to_string(), value);
        }
        _ => {
            node.insert(last.to_string(), value);
        }
    }
}

/// Build the configuration object for every variable in the store
pub fn build_theme_config(store: &VariableStore, config: &ExportConfig) -> Value {
    let mut root = Map::new();
    for variable in store.variables() {
        if config.is_excluded_palette(variable.group_prefix()) {
            debug!("{} belongs to the excluded palette", variable.name);
            continue;
        }
        let Some(value) = leaf_value(variable) else {
            continue;
        };
        let path: Vec<&str> = variable
            .name
            .split('/')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();
        insert_path(&mut root, &path, value);
    }
    Value::Object(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{collection, color_variable, float_variable, store, variable};
    use crate::variables::{Literal, Rgba, VariableValue};
    use serde_json::json;

    #[test]
    fn test_nested_config() {
        let store = store(
            vec![collection("c", "Theme", &[("m", "Default")])],
            vec![
                color_variable("p", "colors/brand/primary", "c", &[("m", Rgba::new_rgb(1.0, 0.0, 0.0))]),
                float_variable("s", "spacing/card/DEFAULT", "c", &[("m", 16.0)]),
                variable(
                    "f",
                    "flags/dense",
                    ResolvedType::Boolean,
                    "c",
                    vec![("m", VariableValue::Literal(Literal::Boolean(true)))],
                ),
            ],
        );

        let config = build_theme_config(&store, &ExportConfig::default());
        assert_eq!(
            config,
            json!({
                "colors": { "brand": { "primary": "rgb(var(--colors-brand-primary) / <alpha-value>)" } },
                "spacing": { "card": { "DEFAULT": "var(--spacing-card)" } }
            })
        );
    }

    #[test]
    fn test_leaf_and_group_share_a_name() {
        let store = store(
            vec![collection("c", "Theme", &[("m", "Default")])],
            vec![
                float_variable("a", "radius", "c", &[("m", 4.0)]),
                float_variable("b", "radius/lg", "c", &[("m", 8.0)]),
            ],
        );
        let config = build_theme_config(&store, &ExportConfig::default());
        assert_eq!(
            config,
            json!({ "radius": { "DEFAULT": "var(--radius)", "lg": "var(--radius-lg)" } })
        );
    }

    #[test]
    fn test_excluded_palette_is_left_out() {
        let store = store(
            vec![collection("c", "Theme", &[("m", "Default")])],
            vec![
                color_variable("g", "colors/gray/500", "c", &[("m", Rgba::new_rgb(0.5, 0.5, 0.5))]),
                color_variable("b", "colors/brand", "c", &[("m", Rgba::new_rgb(0.0, 0.0, 1.0))]),
            ],
        );
        let mut config = ExportConfig {
            ignore_excluded_palette: true,
            ..ExportConfig::default()
        };
        config.excluded_palette_prefixes.insert("colors/gray".to_string());

        let theme = build_theme_config(&store, &config);
        assert!(theme["colors"].get("gray").is_none());
        assert_eq!(theme["colors"]["brand"], "rgb(var(--colors-brand) / <alpha-value>)");
    }
}
