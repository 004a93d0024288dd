//! Parse phase: JSON → input types, plus the graph model built from them.

pub mod graph;
pub mod types;

pub use graph::GraphModel;
pub use types::*;

use crate::error::ValidatorError;

/// Deserialize a workflow JSON string into a `WorkflowGraph`.
pub fn parse(json: &str) -> Result<WorkflowGraph, ValidatorError> {
    serde_json::from_str::<WorkflowGraph>(json).map_err(|e| ValidatorError::parse("workflow", e))
}

pub fn parse_node(json: &str) -> Result<Node, ValidatorError> {
    serde_json::from_str::<Node>(json).map_err(|e| ValidatorError::parse("node", e))
}

pub fn parse_edge(json: &str) -> Result<Edge, ValidatorError> {
    serde_json::from_str::<Edge>(json).map_err(|e| ValidatorError::parse("edge", e))
}
