//! Alias resolution
//!
//! Turns stored variable values into what the stylesheet needs:
//! - `constant`: literal projection (`"R G B"`, `px`/`rem`, plain text)
//! - `css_value`: reference-or-inline decision for one value
//! - `cross_collection`: per-mode breakdown of variables owned by another collection
//! - `resolution`: full per-mode resolution of a variable, fed to the reference graph
//!
//! Every walk carries an explicit `visited` set, so circular aliases end in an
//! unresolved result instead of unbounded recursion.

pub mod constant;
pub mod cross_collection;
pub mod css_value;
pub mod naming;
pub mod resolution;

use serde::Serialize;

use crate::variables::{ResolvedType, Variable, VariableStore};

pub use constant::resolve_constant;
pub use cross_collection::{
    ResolvedEntry, ResolvedTree, ResolvedValue, Unresolved, resolve_in_other_collection,
};
pub use css_value::{CssValueContext, css_value, dereference};
pub use naming::{
    css_var_name, is_custom_property_name, kebab, mode_class, mode_id_class, node_key,
};
pub use resolution::{ModeResolution, ResolutionResult, resolve_all, resolve_variable};

/// Identity of a variable as seen from a resolution result
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableRef {
    pub id: String,
    pub name: String,
    pub collection_id: String,
    /// `None` when the owning collection is unknown
    pub collection_name: Option<String>,
    pub resolved_type: ResolvedType,
}

impl VariableRef {
    pub fn new(variable: &Variable, store: &VariableStore) -> Self {
        Self {
            id: variable.id.clone(),
            name: variable.name.clone(),
            collection_id: variable.variable_collection_id.clone(),
            collection_name: store
                .collection(&variable.variable_collection_id)
                .map(|collection| collection.name.clone()),
            resolved_type: variable.resolved_type,
        }
    }
}
