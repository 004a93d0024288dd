//! Per-edge validation: endpoints, handles, and handle-kind compatibility.

use crate::catalog::{HandleKind, NodeDefinition};
use crate::parse::types::{Edge, EdgeEndpoint};
use crate::report::Finding;

/// What an edge endpoint resolved to.
#[derive(Debug, Clone, Copy)]
pub enum Endpoint<'a> {
    /// No node with that id exists in the graph.
    Missing,
    /// The node exists but its type is not in the catalog.
    Unresolved,
    Resolved(&'a NodeDefinition),
}

/// Validate one edge given its resolved endpoints. Returns all errors found.
pub fn validate_edge(edge: &Edge, source: Endpoint<'_>, target: Endpoint<'_>) -> Vec<Finding> {
    let mut errors = Vec::new();

    if matches!(source, Endpoint::Missing) {
        errors.push(Finding::edge(
            "E001",
            format!("Edge source node not found: '{}'", edge.source.node_id),
            &edge.id,
        ));
    }
    if matches!(target, Endpoint::Missing) {
        errors.push(Finding::edge(
            "E002",
            format!("Edge target node not found: '{}'", edge.target.node_id),
            &edge.id,
        ));
    }

    // Unknown types were already reported per node.
    let (Endpoint::Resolved(source_def), Endpoint::Resolved(target_def)) = (source, target) else {
        return errors;
    };

    let source_handle = source_def.output(&edge.source.handle_id);
    if source_handle.is_none() {
        errors.push(Finding::edge(
            "E003",
            handle_message("Source", &edge.source),
            &edge.id,
        ));
    }
    let target_handle = target_def.input(&edge.target.handle_id);
    if target_handle.is_none() {
        errors.push(Finding::edge(
            "E004",
            handle_message("Target", &edge.target),
            &edge.id,
        ));
    }

    if let (Some(out), Some(input)) = (source_handle, target_handle) {
        // data -> trigger is allowed at this layer.
        if out.kind == HandleKind::Trigger && input.kind != HandleKind::Trigger {
            errors.push(Finding::edge(
                "E005",
                format!(
                    "Cannot connect trigger output to data input ('{}' -> '{}')",
                    out.id, input.id
                ),
                &edge.id,
            ));
        }
    }

    errors
}

fn handle_message(side: &str, endpoint: &EdgeEndpoint) -> String {
    if endpoint.handle_id.is_empty() {
        format!("{} handle is missing on node '{}'", side, endpoint.node_id)
    } else {
        format!(
            "{} handle '{}' not found on node '{}'",
            side, endpoint.handle_id, endpoint.node_id
        )
    }
}
