//! Static validation for node-based automation workflows.
//!
//! [`validate_workflow`] takes a [`WorkflowGraph`] snapshot and a
//! [`NodeCatalog`] and returns a [`ValidationReport`] of errors and warnings
//! without executing anything.

pub mod catalog;
pub mod config;
pub mod error;
pub mod parse;
pub mod report;
pub mod validate;
pub mod wasm;

pub use catalog::{NodeCatalog, NodeDefinition, StaticCatalog};
pub use config::ValidatorConfig;
pub use error::{CatalogError, ValidatorError};
pub use parse::{Edge, EdgeEndpoint, Node, Value, WorkflowGraph};
pub use report::{Finding, FindingKind, ValidationReport};
pub use validate::{Endpoint, Validator, validate_edge, validate_node, validate_workflow};
