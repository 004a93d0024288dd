//! Node catalog: the read-only schema lookup the validator consumes.
//!
//! The validator never owns the catalog. Callers inject any [`NodeCatalog`]
//! implementation; within one validation call each node type is resolved once
//! into a [`CatalogSnapshot`] so every rule sees the same definitions.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{CatalogError, ValidatorError};

// =============================================================================
// DEFINITIONS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    /// Control flow.
    Trigger,
    Data,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandleSpec {
    pub id: String,
    pub kind: HandleKind,
}

impl HandleSpec {
    pub fn trigger(id: impl Into<String>) -> Self {
        HandleSpec {
            id: id.into(),
            kind: HandleKind::Trigger,
        }
    }

    pub fn data(id: impl Into<String>) -> Self {
        HandleSpec {
            id: id.into(),
            kind: HandleKind::Data,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    Number,
    String,
    Boolean,
    /// Selects, JSON blobs, lists and the like. Never type- or bounds-checked.
    #[serde(other)]
    Composite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterSpec {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub param_type: ParameterType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ParameterSpec {
    pub fn new(id: impl Into<String>, label: impl Into<String>, param_type: ParameterType) -> Self {
        ParameterSpec {
            id: id.into(),
            label: label.into(),
            param_type,
            required: false,
            min: None,
            max: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn bounds(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        self.min = min;
        self.max = max;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDefinition {
    #[serde(rename = "type")]
    pub node_type: String,
    pub category: String,
    #[serde(default)]
    pub inputs: Vec<HandleSpec>,
    #[serde(default)]
    pub outputs: Vec<HandleSpec>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
    #[serde(default)]
    pub advanced: Vec<ParameterSpec>,
}

impl NodeDefinition {
    pub fn new(node_type: impl Into<String>, category: impl Into<String>) -> Self {
        NodeDefinition {
            node_type: node_type.into(),
            category: category.into(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            parameters: Vec::new(),
            advanced: Vec::new(),
        }
    }

    pub fn is_trigger(&self, trigger_category: &str) -> bool {
        self.category == trigger_category
    }

    pub fn input(&self, handle_id: &str) -> Option<&HandleSpec> {
        self.inputs.iter().find(|h| h.id == handle_id)
    }

    pub fn output(&self, handle_id: &str) -> Option<&HandleSpec> {
        self.outputs.iter().find(|h| h.id == handle_id)
    }

    /// `parameters` followed by `advanced`, de-duplicated by id (first wins).
    pub fn parameter_specs(&self) -> Vec<&ParameterSpec> {
        let mut specs: Vec<&ParameterSpec> = Vec::new();
        for spec in self.parameters.iter().chain(&self.advanced) {
            if !specs.iter().any(|s| s.id == spec.id) {
                specs.push(spec);
            }
        }
        specs
    }
}

// =============================================================================
// CATALOG TRAIT
// =============================================================================

pub trait NodeCatalog {
    fn resolve(&self, node_type: &str) -> Option<NodeDefinition>;

    /// Fallible lookup. Catalogs backed by something that can fail override
    /// this; the error aborts validation instead of becoming a finding.
    fn try_resolve(&self, node_type: &str) -> Result<Option<NodeDefinition>, CatalogError> {
        Ok(self.resolve(node_type))
    }
}

impl<C: NodeCatalog + ?Sized> NodeCatalog for &C {
    fn resolve(&self, node_type: &str) -> Option<NodeDefinition> {
        (**self).resolve(node_type)
    }

    fn try_resolve(&self, node_type: &str) -> Result<Option<NodeDefinition>, CatalogError> {
        (**self).try_resolve(node_type)
    }
}

/// Map-backed catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    definitions: HashMap<String, NodeDefinition>,
}

impl StaticCatalog {
    pub fn new(definitions: impl IntoIterator<Item = NodeDefinition>) -> Self {
        StaticCatalog {
            definitions: definitions
                .into_iter()
                .map(|d| (d.node_type.clone(), d))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl NodeCatalog for StaticCatalog {
    fn resolve(&self, node_type: &str) -> Option<NodeDefinition> {
        self.definitions.get(node_type).cloned()
    }
}

/// Parse a JSON array of node definitions into a [`StaticCatalog`].
pub fn parse_catalog(json: &str) -> Result<StaticCatalog, ValidatorError> {
    let definitions: Vec<NodeDefinition> =
        serde_json::from_str(json).map_err(|e| ValidatorError::parse("catalog", e))?;
    Ok(StaticCatalog::new(definitions))
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Definitions resolved for one validation call.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    resolved: HashMap<String, Option<NodeDefinition>>,
}

impl CatalogSnapshot {
    /// Resolve every distinct type once, in the order given.
    pub fn resolve_all<'a, C>(
        catalog: &C,
        node_types: impl IntoIterator<Item = &'a str>,
    ) -> Result<Self, ValidatorError>
    where
        C: NodeCatalog + ?Sized,
    {
        let mut resolved = HashMap::new();
        for node_type in node_types {
            if resolved.contains_key(node_type) {
                continue;
            }
            let definition = catalog.try_resolve(node_type).map_err(|source| {
                warn!(node_type, error = %source, "catalog lookup failed");
                ValidatorError::Catalog {
                    node_type: node_type.to_string(),
                    source,
                }
            })?;
            resolved.insert(node_type.to_string(), definition);
        }
        Ok(CatalogSnapshot { resolved })
    }

    pub fn get(&self, node_type: &str) -> Option<&NodeDefinition> {
        self.resolved.get(node_type).and_then(Option::as_ref)
    }

    pub fn unresolved_count(&self) -> usize {
        self.resolved.values().filter(|d| d.is_none()).count()
    }
}
