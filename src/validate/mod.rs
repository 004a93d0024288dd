//! Workflow validation.
//!
//! Builds the graph model once, then runs the structural, node and edge rules
//! independently over it and aggregates their findings into one report.

pub mod edge_rules;
pub mod node_rules;
pub mod structural;

pub use edge_rules::{Endpoint, validate_edge};
pub use node_rules::validate_node;

use tracing::{debug, instrument};

use crate::catalog::{CatalogSnapshot, NodeCatalog};
use crate::config::ValidatorConfig;
use crate::error::ValidatorError;
use crate::parse::graph::GraphModel;
use crate::parse::types::WorkflowGraph;
use crate::report::{Findings, ValidationReport};

/// Validate a workflow against a catalog using the default configuration.
pub fn validate_workflow<C>(
    workflow: &WorkflowGraph,
    catalog: &C,
) -> Result<ValidationReport, ValidatorError>
where
    C: NodeCatalog + ?Sized,
{
    Validator::new(catalog).validate(workflow)
}

pub struct Validator<C> {
    catalog: C,
    config: ValidatorConfig,
}

impl<C: NodeCatalog> Validator<C> {
    pub fn new(catalog: C) -> Self {
        Validator {
            catalog,
            config: ValidatorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the whole graph. Only a failing catalog lookup returns `Err`.
    #[instrument(skip_all, fields(nodes = workflow.nodes.len(), edges = workflow.edges.len()))]
    pub fn validate(&self, workflow: &WorkflowGraph) -> Result<ValidationReport, ValidatorError> {
        let snapshot = CatalogSnapshot::resolve_all(
            &self.catalog,
            workflow.nodes.iter().map(|n| n.node_type.as_str()),
        )?;
        let model = GraphModel::build(workflow);

        let mut parts = Vec::with_capacity(1 + workflow.nodes.len() + workflow.edges.len());
        parts.push(structural::validate_structural(&model, &snapshot, &self.config));

        for node in &workflow.nodes {
            let definition = snapshot.get(&node.node_type);
            parts.push(Findings::from_errors(validate_node(node, definition)));
        }

        for edge in &workflow.edges {
            let source = endpoint(&model, &snapshot, &edge.source.node_id);
            let target = endpoint(&model, &snapshot, &edge.target.node_id);
            parts.push(Findings::from_errors(validate_edge(edge, source, target)));
        }

        let report = ValidationReport::aggregate(parts);
        debug!(
            errors = report.error_count(),
            warnings = report.warning_count(),
            unresolved_types = snapshot.unresolved_count(),
            "workflow validated"
        );
        Ok(report)
    }
}

fn endpoint<'s>(model: &GraphModel<'_>, snapshot: &'s CatalogSnapshot, node_id: &str) -> Endpoint<'s> {
    match model.node(node_id) {
        None => Endpoint::Missing,
        Some(node) => match snapshot.get(&node.node_type) {
            Some(definition) => Endpoint::Resolved(definition),
            None => Endpoint::Unresolved,
        },
    }
}
