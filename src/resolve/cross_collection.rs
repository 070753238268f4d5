//! Per-mode expansion of variables that live in another collection
//!
//! When a variable aliases a target that has no value for the current mode, the
//! target belongs to a collection with its own set of modes. The expander produces the
//! target's full breakdown: one entry per mode of the target's collection, recursing
//! through every alias it meets.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

use crate::error::{ExportError, ExportResult};
use crate::variables::{Literal, Variable, VariableStore, VariableValue};

use super::VariableRef;

/// Per-mode breakdown keyed by mode id, in the owning collection's mode order.
/// Modes without a stored value are absent.
pub type ResolvedTree = IndexMap<String, ResolvedEntry>;

/// Why a reference could not be followed
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "camelCase")]
pub enum Unresolved {
    VariableNotFound { id: String },
    CollectionNotFound { id: String },
    Cycle { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ResolvedValue {
    Literal(Literal),
    Modes(ResolvedTree),
    Unresolved(Unresolved),
}

/// One mode of a breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedEntry {
    /// Mode name
    pub name: String,
    /// Variable this mode refers to, `None` for literals and dangling aliases
    pub variable: Option<VariableRef>,
    pub value: ResolvedValue,
}

/// Expand `variable` across every mode of its own collection.
///
/// `visited` is threaded through the whole descent: an id is held while its subtree is
/// being expanded, so meeting it again means a cycle and the expansion fails with
/// [`ExportError::CycleDetected`]. Missing targets and collections do not fail; they
/// become [`ResolvedValue::Unresolved`] entries.
pub fn resolve_in_other_collection(
    variable: &Variable,
    store: &VariableStore,
    visited: &mut HashSet<String>,
) -> ExportResult<ResolvedTree> {
    if !visited.insert(variable.id.clone()) {
        return Err(ExportError::CycleDetected {
            id: variable.id.clone(),
        });
    }

    let collection = store.collection_of(variable)?;
    let mut tree = ResolvedTree::new();

    for mode in &collection.modes {
        let Some(value) = variable.value_for_mode(&mode.mode_id) else {
            continue;
        };

        let entry = match value {
            VariableValue::Literal(literal) => ResolvedEntry {
                name: mode.name.clone(),
                variable: None,
                value: ResolvedValue::Literal(literal.clone()),
            },
            VariableValue::Alias(alias) => match store.variable(&alias.id) {
                None => {
                    debug!("Alias target '{}' of '{}' not found", alias.id, variable.name);
                    ResolvedEntry {
                        name: mode.name.clone(),
                        variable: None,
                        value: ResolvedValue::Unresolved(Unresolved::VariableNotFound {
                            id: alias.id.clone(),
                        }),
                    }
                }
                Some(target) if store.collection(&target.variable_collection_id).is_none() => {
                    debug!(
                        "Collection '{}' of '{}' not found",
                        target.variable_collection_id, target.name
                    );
                    ResolvedEntry {
                        name: mode.name.clone(),
                        variable: Some(VariableRef::new(target, store)),
                        value: ResolvedValue::Unresolved(Unresolved::CollectionNotFound {
                            id: target.variable_collection_id.clone(),
                        }),
                    }
                }
                Some(target) => ResolvedEntry {
                    name: mode.name.clone(),
                    variable: Some(VariableRef::new(target, store)),
                    value: ResolvedValue::Modes(resolve_in_other_collection(
                        target, store, visited,
                    )?),
                },
            },
        };
        tree.insert(mode.mode_id.clone(), entry);
    }

    visited.remove(&variable.id);
    Ok(tree)
}
