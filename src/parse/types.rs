//! Input types: the editor's workflow snapshot.
//!
//! These are the serde target for the workflow JSON the editor sends. Keys are
//! camelCase; edges use the editor's flat `source`/`sourceHandle` shape on the
//! wire and are exposed as [`EdgeEndpoint`] pairs in memory.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// =============================================================================
// TOP-LEVEL GRAPH
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowGraph {
    /// Insertion order is preserved and drives report ordering.
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
}

impl WorkflowGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }
}

// =============================================================================
// NODES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
}

impl Node {
    pub fn new(id: impl Into<String>, node_type: impl Into<String>) -> Self {
        Node {
            id: id.into(),
            node_type: node_type.into(),
            label: None,
            parameters: BTreeMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_param(mut self, id: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(id.into(), value.into());
        self
    }

    /// Returns the parameter value, treating explicit nulls as absent.
    pub fn parameter(&self, id: &str) -> Option<&Value> {
        self.parameters.get(id).filter(|v| !v.is_null())
    }
}

// =============================================================================
// PARAMETER VALUES
// =============================================================================

/// Dynamically typed parameter value as stored by the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit `null`; treated the same as an absent parameter.
    Null,
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Null and the empty string both count as "no value".
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Decimal coercion used for `number` parameters. Text is trimmed and
    /// parsed; non-finite results are rejected.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        n.is_finite().then_some(n)
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Value::Flag(b) => Some(*b),
            Value::Text(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Flag(_) => "boolean",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::List(_) => "list",
            Value::Object(_) => "object",
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Flag(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

// =============================================================================
// EDGES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeEndpoint {
    pub node_id: String,
    pub handle_id: String,
}

impl EdgeEndpoint {
    pub fn new(node_id: impl Into<String>, handle_id: impl Into<String>) -> Self {
        EdgeEndpoint {
            node_id: node_id.into(),
            handle_id: handle_id.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "EdgeJson", into = "EdgeJson")]
pub struct Edge {
    pub id: String,
    pub source: EdgeEndpoint,
    pub target: EdgeEndpoint,
}

impl Edge {
    pub fn new(id: impl Into<String>, source: EdgeEndpoint, target: EdgeEndpoint) -> Self {
        Edge {
            id: id.into(),
            source,
            target,
        }
    }
}

/// Wire shape of an edge as the editor emits it. Handles may be absent or
/// null; they come through as empty ids, which never match a catalog handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EdgeJson {
    id: String,
    source: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_handle: Option<String>,
    target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_handle: Option<String>,
}

impl From<EdgeJson> for Edge {
    fn from(e: EdgeJson) -> Self {
        Edge {
            id: e.id,
            source: EdgeEndpoint::new(e.source, e.source_handle.unwrap_or_default()),
            target: EdgeEndpoint::new(e.target, e.target_handle.unwrap_or_default()),
        }
    }
}

impl From<Edge> for EdgeJson {
    fn from(e: Edge) -> Self {
        let handle = |id: String| (!id.is_empty()).then_some(id);
        EdgeJson {
            id: e.id,
            source: e.source.node_id,
            source_handle: handle(e.source.handle_id),
            target: e.target.node_id,
            target_handle: handle(e.target.handle_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_coercion_follows_decimal_parsing() {
        assert_eq!(Value::from(3).as_number(), Some(3.0));
        assert_eq!(Value::from(" 2.5 ").as_number(), Some(2.5));
        assert_eq!(Value::from("1e3").as_number(), Some(1000.0));
        assert_eq!(Value::from("abc").as_number(), None);
        assert_eq!(Value::from("NaN").as_number(), None);
        assert_eq!(Value::from("inf").as_number(), None);
        assert_eq!(Value::from(true).as_number(), None);
    }

    #[test]
    fn untagged_values_pick_the_matching_variant() {
        let v: Value = serde_json::from_str(r#"[1, "a", true, null, {"k": 2}]"#).unwrap();
        let Value::List(items) = v else {
            panic!("expected list, got {:?}", v);
        };
        assert_eq!(items[0], Value::Number(1.0));
        assert_eq!(items[1], Value::Text("a".into()));
        assert_eq!(items[2], Value::Flag(true));
        assert_eq!(items[3], Value::Null);
        assert!(matches!(items[4], Value::Object(_)));
    }

    #[test]
    fn explicit_null_parameter_reads_as_absent() {
        let node = Node::new("n1", "http").with_param("url", Value::Null);
        assert!(node.parameter("url").is_none());
    }

    #[test]
    fn edge_uses_flat_wire_shape() {
        let json = r#"{"id":"e1","source":"a","sourceHandle":"out","target":"b","targetHandle":"in"}"#;
        let edge: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.source, EdgeEndpoint::new("a", "out"));
        assert_eq!(edge.target, EdgeEndpoint::new("b", "in"));
        let back = serde_json::to_string(&edge).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn missing_or_null_handles_read_as_empty() {
        let json = r#"{"id":"e1","source":"a","sourceHandle":null,"target":"b"}"#;
        let edge: Edge = serde_json::from_str(json).unwrap();
        assert_eq!(edge.source, EdgeEndpoint::new("a", ""));
        assert_eq!(edge.target, EdgeEndpoint::new("b", ""));
        let back = serde_json::to_string(&edge).unwrap();
        assert_eq!(back, r#"{"id":"e1","source":"a","target":"b"}"#);
    }
}
