//! Test utilities shared across the codebase
//!
//! Small builders for the value model so tests can describe variables and
//! collections in one line each.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::css::Stylesheet;
use crate::css::scope_repair::var_references;
use crate::variables::{
    Literal, ResolvedType, Rgba, Variable, VariableCollection, VariableMode, VariableScope,
    VariableStore, VariableValue,
};

/// Collection with the first mode as default
pub fn collection(id: &str, name: &str, modes: &[(&str, &str)]) -> VariableCollection {
    VariableCollection {
        id: id.to_string(),
        name: name.to_string(),
        modes: modes
            .iter()
            .map(|(mode_id, name)| VariableMode {
                mode_id: mode_id.to_string(),
                name: name.to_string(),
            })
            .collect(),
        default_mode_id: modes.first().map(|(id, _)| id.to_string()).unwrap_or_default(),
        variable_ids: Vec::new(),
    }
}

pub fn variable(
    id: &str,
    name: &str,
    resolved_type: ResolvedType,
    collection_id: &str,
    values: Vec<(&str, VariableValue)>,
) -> Variable {
    Variable {
        id: id.to_string(),
        name: name.to_string(),
        resolved_type,
        variable_collection_id: collection_id.to_string(),
        scopes: vec![VariableScope::AllScopes],
        values_by_mode: values
            .into_iter()
            .map(|(mode_id, value)| (mode_id.to_string(), value))
            .collect::<IndexMap<_, _>>(),
    }
}

pub fn float_variable(id: &str, name: &str, collection_id: &str, values: &[(&str, f64)]) -> Variable {
    variable(
        id,
        name,
        ResolvedType::Float,
        collection_id,
        values
            .iter()
            .map(|(mode_id, value)| (*mode_id, VariableValue::Literal(Literal::Number(*value))))
            .collect(),
    )
}

pub fn color_variable(id: &str, name: &str, collection_id: &str, values: &[(&str, Rgba)]) -> Variable {
    variable(
        id,
        name,
        ResolvedType::Color,
        collection_id,
        values
            .iter()
            .map(|(mode_id, value)| (*mode_id, VariableValue::Literal(Literal::Color(*value))))
            .collect(),
    )
}

/// Variable whose every listed mode aliases another variable id
pub fn alias_variable(
    id: &str,
    name: &str,
    resolved_type: ResolvedType,
    collection_id: &str,
    targets: &[(&str, &str)],
) -> Variable {
    variable(
        id,
        name,
        resolved_type,
        collection_id,
        targets
            .iter()
            .map(|(mode_id, target)| (*mode_id, VariableValue::alias(*target)))
            .collect(),
    )
}

pub fn store(collections: Vec<VariableCollection>, variables: Vec<Variable>) -> VariableStore {
    VariableStore::new(collections, variables)
}

/// Every `var(--x)` in the stylesheet has a declaration of `--x` somewhere
pub fn assert_every_reference_declared(stylesheet: &Stylesheet) {
    let declared: HashSet<&str> = stylesheet
        .rules
        .iter()
        .flat_map(|rule| rule.declarations())
        .map(|declaration| declaration.property.as_str())
        .collect();
    for declaration in stylesheet.rules.iter().flat_map(|rule| rule.declarations()) {
        for reference in var_references(&declaration.value) {
            assert!(
                declared.contains(reference.as_str()),
                "{} reads undeclared {}",
                declaration.property,
                reference
            );
        }
    }
}
