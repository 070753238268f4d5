//! Stylesheet generation from the value model
//!
//! Every collection contributes one block per mode: the default mode goes to `:root`,
//! every other mode to a class named after it (`Dark` -> `.dark`). A mode whose name
//! gives no valid class, or the same class as an earlier mode of the collection, falls
//! back to a class built from its id (`.mode-1-0`).

use std::collections::HashSet;

use log::{debug, warn};

use crate::config::ExportConfig;
use crate::resolve::{
    CssValueContext, css_value, css_var_name, is_custom_property_name, mode_class, mode_id_class,
};
use crate::variables::{VariableCollection, VariableStore};

use super::constants::ROOT_SELECTOR;
use super::stylesheet::{Declaration, RuleSet, Stylesheet};

/// Selector of every mode of `collection`, in mode order
pub fn mode_selectors(collection: &VariableCollection) -> Vec<String> {
    let mut used = HashSet::new();
    collection
        .modes
        .iter()
        .map(|mode| {
            if mode.mode_id == collection.default_mode_id {
                return ROOT_SELECTOR.to_string();
            }
            let class = match mode_class(&mode.name) {
                Some(class) if !used.contains(&class) => class,
                _ => {
                    let fallback = mode_id_class(&mode.mode_id);
                    debug!("Mode '{}' uses class '{}'", mode.name, fallback);
                    fallback
                }
            };
            used.insert(class.clone());
            format!(".{}", class)
        })
        .collect()
}

/// Build the (unrepaired) custom-property stylesheet for every collection
pub fn generate_stylesheet(store: &VariableStore, config: &ExportConfig) -> Stylesheet {
    let ctx = CssValueContext::new(store, config);
    let mut rules = Vec::new();

    for collection in store.collections() {
        let variables = store.variables_in(collection);
        for (mode, selector) in collection.modes.iter().zip(mode_selectors(collection)) {
            let mut rule = RuleSet::new(selector);

            for variable in &variables {
                let Some(value) = variable.value_for_mode(&mode.mode_id) else {
                    continue;
                };
                let property = css_var_name(&variable.name);
                if !is_custom_property_name(&property) {
                    warn!("'{}' has no usable property name, skipping", variable.name);
                    continue;
                }
                let Some(css) = css_value(
                    value,
                    variable.resolved_type,
                    &variable.scopes,
                    &mode.mode_id,
                    Some(&property),
                    &ctx,
                ) else {
                    debug!("No value for {} in mode '{}'", property, mode.name);
                    continue;
                };

                match Declaration::build_or_parse(&property, &css, false) {
                    Ok(declaration) => rule.push(declaration),
                    Err(e) => warn!("Skipping {} in mode '{}': {}", property, mode.name, e),
                }
            }

            if !rule.is_empty() {
                rules.push(rule);
            }
        }
    }

    Stylesheet::from_rules(rules)
}
