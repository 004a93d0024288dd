//! Findings, the validation report, and its human-readable summary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::parse::types::WorkflowGraph;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FindingKind {
    /// Missing/duplicate trigger, cycle, disconnected node.
    Structural,
    /// Missing, mistyped or out-of-bounds parameter value.
    Parameter,
    /// Dangling reference, missing handle, incompatible handle kinds.
    Edge,
    /// Unknown node type.
    Node,
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingKind::Structural => write!(f, "structural"),
            FindingKind::Parameter => write!(f, "parameter"),
            FindingKind::Edge => write!(f, "edge"),
            FindingKind::Node => write!(f, "node"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    pub kind: FindingKind,
    pub code: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Nodes involved: the cycle path for S004, the affected ids for S003.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<String>,
}

impl Finding {
    pub fn new(kind: FindingKind, code: &str, message: impl Into<String>) -> Self {
        Finding {
            kind,
            code: code.into(),
            message: message.into(),
            node_id: None,
            edge_id: None,
            field: None,
            nodes: Vec::new(),
        }
    }

    pub fn structural(code: &str, message: impl Into<String>) -> Self {
        Finding::new(FindingKind::Structural, code, message)
    }

    pub fn node(code: &str, message: impl Into<String>, node_id: &str) -> Self {
        Finding::new(FindingKind::Node, code, message).at_node(node_id)
    }

    pub fn parameter(code: &str, message: impl Into<String>, node_id: &str, field: &str) -> Self {
        let mut finding = Finding::new(FindingKind::Parameter, code, message).at_node(node_id);
        finding.field = Some(field.to_string());
        finding
    }

    pub fn edge(code: &str, message: impl Into<String>, edge_id: &str) -> Self {
        Finding::new(FindingKind::Edge, code, message).at_edge(edge_id)
    }

    pub fn at_node(mut self, node_id: &str) -> Self {
        self.node_id = Some(node_id.to_string());
        self
    }

    pub fn at_edge(mut self, edge_id: &str) -> Self {
        self.edge_id = Some(edge_id.to_string());
        self
    }

    pub fn with_nodes<S: AsRef<str>>(mut self, nodes: impl IntoIterator<Item = S>) -> Self {
        self.nodes = nodes.into_iter().map(|n| n.as_ref().to_string()).collect();
        self
    }

    /// Resolved location: node label, node id, edge id, else "Workflow".
    pub fn location(&self, graph: &WorkflowGraph) -> String {
        if let Some(node_id) = &self.node_id {
            return graph
                .node(node_id)
                .and_then(|n| n.label.clone())
                .unwrap_or_else(|| node_id.clone());
        }
        if let Some(edge_id) = &self.edge_id {
            return edge_id.clone();
        }
        "Workflow".to_string()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}] {}", self.kind, self.code, self.message)?;
        match (&self.node_id, &self.edge_id) {
            (Some(id), _) => write!(f, " (node '{}')", id),
            (None, Some(id)) => write!(f, " (edge '{}')", id),
            (None, None) => Ok(()),
        }
    }
}

/// Findings from one validation component, errors and warnings kept apart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Findings {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl Findings {
    pub fn from_errors(errors: Vec<Finding>) -> Self {
        Findings {
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn error(&mut self, finding: Finding) {
        self.errors.push(finding);
    }

    pub fn warning(&mut self, finding: Finding) {
        self.warnings.push(finding);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ValidationReport {
    /// Concatenate component findings in the order given. Callers pass
    /// structural first, then nodes in graph order, then edges in graph order.
    pub fn aggregate(parts: impl IntoIterator<Item = Findings>) -> Self {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();
        for part in parts {
            errors.extend(part.errors);
            warnings.extend(part.warnings);
        }
        ValidationReport {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn summary(&self, graph: &WorkflowGraph) -> ReportSummary {
        let entry = |severity: Severity, f: &Finding| SummaryEntry {
            severity,
            code: f.code.clone(),
            location: f.location(graph),
            message: f.message.clone(),
        };
        let entries = self
            .errors
            .iter()
            .map(|f| entry(Severity::Error, f))
            .chain(self.warnings.iter().map(|f| entry(Severity::Warning, f)))
            .collect();

        ReportSummary {
            error_count: self.error_count(),
            warning_count: self.warning_count(),
            entries,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntry {
    pub severity: Severity,
    pub code: String,
    pub location: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub entries: Vec<SummaryEntry>,
}

impl fmt::Display for ReportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} error(s), {} warning(s)",
            self.error_count, self.warning_count
        )?;
        for entry in &self.entries {
            let tag = match entry.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };
            writeln!(
                f,
                "{} [{}] {}: {}",
                tag, entry.code, entry.location, entry.message
            )?;
        }
        Ok(())
    }
}
