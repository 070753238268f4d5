//! Decides what goes after `--name:` for one variable in one mode

use std::collections::HashSet;

use log::{debug, warn};

use crate::config::ExportConfig;
use crate::error::{ExportError, ExportResult};
use crate::variables::{
    Literal, ResolvedType, Variable, VariableScope, VariableStore, VariableValue,
};

use super::constant::resolve_constant;
use super::cross_collection::resolve_in_other_collection;
use super::naming::{css_var_name, is_custom_property_name};

/// Everything the projector needs besides the value itself
#[derive(Debug, Clone, Copy)]
pub struct CssValueContext<'a> {
    pub store: &'a VariableStore,
    pub config: &'a ExportConfig,
}

impl<'a> CssValueContext<'a> {
    pub fn new(store: &'a VariableStore, config: &'a ExportConfig) -> Self {
        Self { store, config }
    }
}

/// CSS value for `value` stored in `mode_id` of a variable of type `resolved_type`.
///
/// Literals are projected with [`resolve_constant`]. Aliases become `var(--target)`
/// unless the target belongs to an excluded palette group (or would reference the
/// variable itself), in which case the chain is followed to its literal.
///
/// Returns `None` when nothing sensible can be written: the alias target does not
/// exist or the chain is circular. Callers skip the property.
pub fn css_value(
    value: &VariableValue,
    resolved_type: ResolvedType,
    scopes: &[VariableScope],
    mode_id: &str,
    own_css_name: Option<&str>,
    ctx: &CssValueContext<'_>,
) -> Option<String> {
    let alias = match value {
        VariableValue::Literal(literal) => {
            return Some(resolve_constant(literal, resolved_type, scopes, ctx.config));
        }
        VariableValue::Alias(alias) => alias,
    };

    let Some(target) = ctx.store.variable(&alias.id) else {
        debug!("Alias target '{}' not found, skipping", alias.id);
        return None;
    };

    if ctx.config.is_excluded_palette(target.group_prefix()) {
        return inline_literal(target, resolved_type, scopes, mode_id, ctx);
    }

    // The reference is only valid if the chain behind it ends somewhere
    if let Err(ExportError::CycleDetected { id }) =
        dereference(target, mode_id, ctx.store, &mut HashSet::new())
    {
        warn!("Circular alias through '{}' while resolving '{}'", id, target.name);
        return None;
    }

    if target.value_for_mode(mode_id).is_none() {
        // Cross-collection target. The reference itself stays valid because the
        // target's own collection declares it per mode.
        match resolve_in_other_collection(target, ctx.store, &mut HashSet::new()) {
            Ok(tree) => debug!(
                "'{}' resolves across collections: {} mode(s) {:?}",
                target.name,
                tree.len(),
                tree.keys().collect::<Vec<_>>()
            ),
            Err(e) => warn!("Failed to expand '{}' across collections: {}", target.name, e),
        }
    }

    let reference = css_var_name(&target.name);
    if !is_custom_property_name(&reference) {
        // The generator never declares such a name, so a reference would dangle
        warn!("'{}' has no usable property name, inlining", target.name);
        return inline_literal(target, resolved_type, scopes, mode_id, ctx);
    }
    if own_css_name == Some(reference.as_str()) {
        debug!("'{}' would reference itself, inlining", reference);
        return inline_literal(target, resolved_type, scopes, mode_id, ctx);
    }

    Some(format!("var({})", reference))
}

fn inline_literal(
    target: &Variable,
    resolved_type: ResolvedType,
    scopes: &[VariableScope],
    mode_id: &str,
    ctx: &CssValueContext<'_>,
) -> Option<String> {
    match dereference(target, mode_id, ctx.store, &mut HashSet::new()) {
        Ok(literal) => Some(resolve_constant(literal, resolved_type, scopes, ctx.config)),
        Err(ExportError::CycleDetected { id }) => {
            warn!("Circular alias through '{}' while inlining '{}'", id, target.name);
            None
        }
        Err(e) => {
            debug!("Cannot inline '{}': {}", target.name, e);
            None
        }
    }
}

/// Follow aliases from `variable` to a literal.
///
/// The value for `mode_id` is used when the variable has one, otherwise the default
/// mode of its own collection.
pub fn dereference<'a>(
    variable: &'a Variable,
    mode_id: &str,
    store: &'a VariableStore,
    visited: &mut HashSet<String>,
) -> ExportResult<&'a Literal> {
    if !visited.insert(variable.id.clone()) {
        return Err(ExportError::CycleDetected {
            id: variable.id.clone(),
        });
    }

    let value = match variable.value_for_mode(mode_id) {
        Some(value) => value,
        None => {
            let collection = store.collection_of(variable)?;
            variable
                .value_for_mode(&collection.default_mode_id)
                .ok_or_else(|| ExportError::VariableNotFound {
                    id: format!("{}@{}", variable.id, collection.default_mode_id),
                })?
        }
    };

    match value {
        VariableValue::Literal(literal) => Ok(literal),
        VariableValue::Alias(alias) => {
            let target = store
                .variable(&alias.id)
                .ok_or_else(|| ExportError::VariableNotFound {
                    id: alias.id.clone(),
                })?;
            dereference(target, mode_id, store, visited)
        }
    }
}
