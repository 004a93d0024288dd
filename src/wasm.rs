//! WASM entry points for the browser editor.

use wasm_bindgen::prelude::*;

use crate::catalog::{NodeCatalog, NodeDefinition, parse_catalog};
use crate::error::ValidatorError;
use crate::parse::GraphModel;
use crate::report::{Finding, ValidationReport};
use crate::validate::{self, Endpoint};

/// Validate a workflow JSON against a catalog JSON (array of definitions).
/// Returns a `ValidationReport` object, or `{ error }` when input is unusable.
#[wasm_bindgen]
pub fn validate_workflow(graph_json: &str, catalog_json: &str) -> JsValue {
    to_js(&validate_workflow_inner(graph_json, catalog_json))
}

fn validate_workflow_inner(graph_json: &str, catalog_json: &str) -> Outcome<ValidationReport> {
    let run = || -> Result<ValidationReport, ValidatorError> {
        let workflow = crate::parse::parse(graph_json)?;
        let catalog = parse_catalog(catalog_json)?;
        validate::validate_workflow(&workflow, &catalog)
    };
    run().into()
}

/// Validate a single node JSON against its definition JSON (`null` when the
/// type is unknown). Returns an array of findings.
#[wasm_bindgen]
pub fn validate_node(node_json: &str, definition_json: &str) -> JsValue {
    to_js(&validate_node_inner(node_json, definition_json))
}

fn validate_node_inner(node_json: &str, definition_json: &str) -> Outcome<Vec<Finding>> {
    let run = || -> Result<Vec<Finding>, ValidatorError> {
        let node = crate::parse::parse_node(node_json)?;
        let definition: Option<NodeDefinition> = serde_json::from_str(definition_json)
            .map_err(|e| ValidatorError::parse("node definition", e))?;
        Ok(validate::validate_node(&node, definition.as_ref()))
    };
    run().into()
}

/// Validate a single edge JSON in the context of a workflow and catalog.
/// Returns an array of findings.
#[wasm_bindgen]
pub fn validate_edge(edge_json: &str, graph_json: &str, catalog_json: &str) -> JsValue {
    to_js(&validate_edge_inner(edge_json, graph_json, catalog_json))
}

fn validate_edge_inner(
    edge_json: &str,
    graph_json: &str,
    catalog_json: &str,
) -> Outcome<Vec<Finding>> {
    let run = || -> Result<Vec<Finding>, ValidatorError> {
        let edge = crate::parse::parse_edge(edge_json)?;
        let workflow = crate::parse::parse(graph_json)?;
        let catalog = parse_catalog(catalog_json)?;
        let model = GraphModel::build(&workflow);

        let resolve = |node_id: &str| -> Result<Option<Option<NodeDefinition>>, ValidatorError> {
            let Some(node) = model.node(node_id) else {
                return Ok(None);
            };
            let definition = catalog.try_resolve(&node.node_type).map_err(|source| {
                ValidatorError::Catalog {
                    node_type: node.node_type.clone(),
                    source,
                }
            })?;
            Ok(Some(definition))
        };
        let source = resolve(&edge.source.node_id)?;
        let target = resolve(&edge.target.node_id)?;

        Ok(validate::validate_edge(
            &edge,
            as_endpoint(&source),
            as_endpoint(&target),
        ))
    };
    run().into()
}

fn as_endpoint(resolved: &Option<Option<NodeDefinition>>) -> Endpoint<'_> {
    match resolved {
        None => Endpoint::Missing,
        Some(None) => Endpoint::Unresolved,
        Some(Some(definition)) => Endpoint::Resolved(definition),
    }
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    serde::Serialize::serialize(value, &serializer).unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize)]
#[serde(untagged)]
enum Outcome<T> {
    Ok(T),
    Failed { error: String },
}

impl<T> From<Result<T, ValidatorError>> for Outcome<T> {
    fn from(result: Result<T, ValidatorError>) -> Self {
        match result {
            Ok(value) => Outcome::Ok(value),
            Err(e) => Outcome::Failed {
                error: e.to_string(),
            },
        }
    }
}
