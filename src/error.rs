//! Fatal error types.
//!
//! Validation findings are ordinary data (see `report`). The types here cover
//! the few conditions where the validator itself cannot produce a report.

use thiserror::Error;

/// Raised by a [`NodeCatalog`](crate::catalog::NodeCatalog) whose backing
/// store failed while resolving a node type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CatalogError {
    pub message: String,
}

impl CatalogError {
    pub fn new(message: impl Into<String>) -> Self {
        CatalogError {
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ValidatorError {
    #[error("Failed to parse {what} JSON: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Catalog lookup for node type '{node_type}' failed: {source}")]
    Catalog {
        node_type: String,
        #[source]
        source: CatalogError,
    },
}

impl ValidatorError {
    pub fn parse(what: &'static str, source: serde_json::Error) -> Self {
        ValidatorError::Parse { what, source }
    }
}
