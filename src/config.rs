//! Validator configuration.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_NODES: usize = 10_000;
pub const DEFAULT_MAX_EDGES: usize = 50_000;
pub const DEFAULT_TRIGGER_CATEGORY: &str = "triggers";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidatorConfig {
    /// Graphs with more nodes than this skip cycle detection and fail with S007.
    pub max_nodes: usize,
    pub max_edges: usize,
    /// Catalog category marking entry-point node types.
    pub trigger_category: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        ValidatorConfig {
            max_nodes: DEFAULT_MAX_NODES,
            max_edges: DEFAULT_MAX_EDGES,
            trigger_category: DEFAULT_TRIGGER_CATEGORY.to_string(),
        }
    }
}

impl ValidatorConfig {
    pub fn exceeds_limits(&self, node_count: usize, edge_count: usize) -> bool {
        node_count > self.max_nodes || edge_count > self.max_edges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: ValidatorConfig = serde_json::from_str(r#"{"maxNodes": 5}"#).unwrap();
        assert_eq!(config.max_nodes, 5);
        assert_eq!(config.max_edges, DEFAULT_MAX_EDGES);
        assert_eq!(config.trigger_category, "triggers");
    }

    #[test]
    fn limits_are_inclusive() {
        let config = ValidatorConfig {
            max_nodes: 2,
            max_edges: 1,
            ..Default::default()
        };
        assert!(!config.exceeds_limits(2, 1));
        assert!(config.exceeds_limits(3, 1));
        assert!(config.exceeds_limits(2, 2));
    }
}
