use flowcheck::catalog::{HandleSpec, NodeDefinition, ParameterSpec, ParameterType, StaticCatalog};
use flowcheck::parse::{Edge, EdgeEndpoint, Node, WorkflowGraph};
use flowcheck::report::{Finding, ValidationReport};

// =============================================================================
// Catalog
// =============================================================================

pub fn manual_trigger_def() -> NodeDefinition {
    let mut def = NodeDefinition::new("manualTrigger", "triggers");
    def.outputs = vec![HandleSpec::trigger("next")];
    def
}

pub fn webhook_trigger_def() -> NodeDefinition {
    let mut def = NodeDefinition::new("webhookTrigger", "triggers");
    def.outputs = vec![HandleSpec::trigger("next"), HandleSpec::data("payload")];
    def.parameters = vec![ParameterSpec::new("path", "Path", ParameterType::String).required()];
    def
}

/// Action with a required URL, a required retry count in [1, 5], and
/// optional advanced timeout/redirect settings.
pub fn http_request_def() -> NodeDefinition {
    let mut def = NodeDefinition::new("httpRequest", "actions");
    def.inputs = vec![HandleSpec::trigger("run"), HandleSpec::data("body")];
    def.outputs = vec![HandleSpec::trigger("next"), HandleSpec::data("response")];
    def.parameters = vec![
        ParameterSpec::new("url", "URL", ParameterType::String).required(),
        ParameterSpec::new("retries", "Retries", ParameterType::Number)
            .required()
            .bounds(Some(1.0), Some(5.0)),
    ];
    def.advanced = vec![
        ParameterSpec::new("timeout", "Timeout", ParameterType::Number)
            .bounds(Some(0.0), Some(300.0)),
        ParameterSpec::new("followRedirects", "Follow redirects", ParameterType::Boolean),
        ParameterSpec::new("headers", "Headers", ParameterType::Composite),
    ];
    def
}

pub fn set_field_def() -> NodeDefinition {
    let mut def = NodeDefinition::new("setField", "transforms");
    def.inputs = vec![HandleSpec::trigger("run"), HandleSpec::data("value")];
    def.outputs = vec![HandleSpec::trigger("next"), HandleSpec::data("result")];
    def.parameters = vec![ParameterSpec::new("field", "Field", ParameterType::String).required()];
    def
}

pub fn test_catalog() -> StaticCatalog {
    StaticCatalog::new([
        manual_trigger_def(),
        webhook_trigger_def(),
        http_request_def(),
        set_field_def(),
    ])
}

// =============================================================================
// Graph builders
// =============================================================================

pub fn manual(id: &str) -> Node {
    Node::new(id, "manualTrigger")
}

pub fn webhook(id: &str) -> Node {
    Node::new(id, "webhookTrigger").with_param("path", "/hooks/in")
}

/// An HTTP node with every required parameter valid.
pub fn http(id: &str) -> Node {
    Node::new(id, "httpRequest")
        .with_param("url", "https://example.com")
        .with_param("retries", 3)
}

pub fn set_field(id: &str) -> Node {
    Node::new(id, "setField").with_param("field", "status")
}

pub fn edge(id: &str, source: (&str, &str), target: (&str, &str)) -> Edge {
    Edge::new(
        id,
        EdgeEndpoint::new(source.0, source.1),
        EdgeEndpoint::new(target.0, target.1),
    )
}

/// Control-flow edge `next -> run`.
pub fn flow(id: &str, source: &str, target: &str) -> Edge {
    edge(id, (source, "next"), (target, "run"))
}

pub fn graph(nodes: Vec<Node>, edges: Vec<Edge>) -> WorkflowGraph {
    WorkflowGraph { nodes, edges }
}

/// manual -> http -> setField, all valid.
pub fn linear_workflow() -> WorkflowGraph {
    graph(
        vec![manual("trigger"), http("fetch"), set_field("mark")],
        vec![flow("e1", "trigger", "fetch"), flow("e2", "fetch", "mark")],
    )
}

// =============================================================================
// Assertions
// =============================================================================

pub fn codes(findings: &[Finding]) -> Vec<&str> {
    findings.iter().map(|f| f.code.as_str()).collect()
}

pub fn assert_has_error(report: &ValidationReport, code: &str) {
    assert!(
        report.errors.iter().any(|e| e.code == code),
        "Expected error {}, got: {:?}",
        code,
        report.errors
    );
}

pub fn assert_no_error(report: &ValidationReport, code: &str) {
    assert!(
        !report.errors.iter().any(|e| e.code == code),
        "Did not expect error {}, but got: {:?}",
        code,
        report.errors
    );
}
