//! Id-indexed view over the variables and collections handed over by the host

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult, IoContext, JsonContext};
use crate::variables::{Variable, VariableCollection};

/// The JSON document the host exports: every known variable and collection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    #[serde(default)]
    pub collections: Vec<VariableCollection>,
    #[serde(default)]
    pub variables: Vec<Variable>,
}

impl ExportDocument {
    pub fn load(path: &Path) -> ExportResult<Self> {
        let content =
            std::fs::read_to_string(path).with_path(path, "Failed to read export document")?;
        serde_json::from_str(&content).with_json_context("Failed to parse export document")
    }
}

/// Lookup tables for variables and collections. Insertion order is kept so every
/// export over the same input produces the same output.
#[derive(Debug, Clone, Default)]
pub struct VariableStore {
    variables: IndexMap<String, Variable>,
    collections: IndexMap<String, VariableCollection>,
}

impl VariableStore {
    pub fn new(collections: Vec<VariableCollection>, variables: Vec<Variable>) -> Self {
        Self {
            collections: collections
                .into_iter()
                .map(|collection| (collection.id.clone(), collection))
                .collect(),
            variables: variables
                .into_iter()
                .map(|variable| (variable.id.clone(), variable))
                .collect(),
        }
    }

    pub fn from_document(document: ExportDocument) -> Self {
        Self::new(document.collections, document.variables)
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variables.get(id)
    }

    pub fn collection(&self, id: &str) -> Option<&VariableCollection> {
        self.collections.get(id)
    }

    /// Owning collection of `variable`
    pub fn collection_of(&self, variable: &Variable) -> ExportResult<&VariableCollection> {
        self.collection(&variable.variable_collection_id)
            .ok_or_else(|| ExportError::CollectionNotFound {
                id: variable.variable_collection_id.clone(),
            })
    }

    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }

    pub fn collections(&self) -> impl Iterator<Item = &VariableCollection> {
        self.collections.values()
    }

    /// Variables of one collection, in the collection's own order when it lists its
    /// ids, otherwise in store order
    pub fn variables_in<'a>(
        &'a self,
        collection: &'a VariableCollection,
    ) -> Vec<&'a Variable> {
        if collection.variable_ids.is_empty() {
            return self
                .variables()
                .filter(|variable| variable.variable_collection_id == collection.id)
                .collect();
        }
        collection
            .variable_ids
            .iter()
            .filter_map(|id| self.variable(id))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
