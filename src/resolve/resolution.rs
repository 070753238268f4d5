//! Full per-mode resolution of a variable, the input of the reference graph

use std::collections::HashSet;

use indexmap::IndexMap;
use log::warn;
use serde::Serialize;

use crate::error::ExportError;
use crate::variables::{ResolvedType, Variable, VariableStore, VariableValue};

use super::VariableRef;
use super::cross_collection::{
    ResolvedEntry, ResolvedTree, ResolvedValue, Unresolved, resolve_in_other_collection,
};

/// Outcome of one mode of a variable
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeResolution {
    pub mode_name: String,
    pub value: ResolvedValue,
}

/// A variable paired with the resolution of every mode of its collection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub variable: VariableRef,
    pub resolved_type: ResolvedType,
    /// Keyed by mode id
    pub modes: IndexMap<String, ModeResolution>,
}

/// Resolve every mode of `variable`.
///
/// An alias to a variable that has a value in the same mode is followed within that
/// mode. An alias to a variable of another collection is expanded into that
/// collection's full breakdown. Every hop is an entry whose `variable` names the
/// referenced variable.
pub fn resolve_variable(variable: &Variable, store: &VariableStore) -> ResolutionResult {
    let modes: Vec<(String, String)> = match store.collection_of(variable) {
        Ok(collection) => collection
            .modes
            .iter()
            .map(|mode| (mode.mode_id.clone(), mode.name.clone()))
            .collect(),
        Err(_) => variable
            .values_by_mode
            .keys()
            .map(|mode_id| (mode_id.clone(), mode_id.clone()))
            .collect(),
    };

    let mut resolved = IndexMap::new();
    for (mode_id, mode_name) in modes {
        let Some(value) = variable.value_for_mode(&mode_id) else {
            continue;
        };
        let mut visited = HashSet::from([variable.id.clone()]);
        let value = resolve_value(value, &mode_id, &mode_name, store, &mut visited);
        resolved.insert(mode_id, ModeResolution { mode_name, value });
    }

    ResolutionResult {
        variable: VariableRef::new(variable, store),
        resolved_type: variable.resolved_type,
        modes: resolved,
    }
}

/// Resolve every variable of the store, in store order
pub fn resolve_all(store: &VariableStore) -> Vec<ResolutionResult> {
    store
        .variables()
        .map(|variable| resolve_variable(variable, store))
        .collect()
}

fn resolve_value(
    value: &VariableValue,
    mode_id: &str,
    mode_name: &str,
    store: &VariableStore,
    visited: &mut HashSet<String>,
) -> ResolvedValue {
    let alias = match value {
        VariableValue::Literal(literal) => return ResolvedValue::Literal(literal.clone()),
        VariableValue::Alias(alias) => alias,
    };

    let Some(target) = store.variable(&alias.id) else {
        return ResolvedValue::Unresolved(Unresolved::VariableNotFound {
            id: alias.id.clone(),
        });
    };

    let target_value = match target.value_for_mode(mode_id) {
        Some(next) => {
            if !visited.insert(target.id.clone()) {
                warn!("Circular alias at '{}' in mode '{}'", target.name, mode_name);
                return ResolvedValue::Unresolved(Unresolved::Cycle {
                    id: target.id.clone(),
                });
            }
            let resolved = resolve_value(next, mode_id, mode_name, store, visited);
            visited.remove(&target.id);
            resolved
        }
        None => match resolve_in_other_collection(target, store, visited) {
            Ok(tree) => ResolvedValue::Modes(tree),
            Err(ExportError::CycleDetected { id }) => {
                warn!("Circular alias at '{}' while expanding '{}'", id, target.name);
                ResolvedValue::Unresolved(Unresolved::Cycle { id })
            }
            Err(ExportError::CollectionNotFound { id }) => {
                ResolvedValue::Unresolved(Unresolved::CollectionNotFound { id })
            }
            Err(e) => {
                warn!("Failed to expand '{}': {}", target.name, e);
                ResolvedValue::Unresolved(Unresolved::VariableNotFound {
                    id: target.id.clone(),
                })
            }
        },
    };

    let mut tree = ResolvedTree::new();
    tree.insert(
        mode_id.to_string(),
        ResolvedEntry {
            name: mode_name.to_string(),
            variable: Some(VariableRef::new(target, store)),
            value: target_value,
        },
    );
    ResolvedValue::Modes(tree)
}
