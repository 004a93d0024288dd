//! Per-node parameter validation against the catalog's parameter specs.

use crate::catalog::{NodeDefinition, ParameterSpec, ParameterType};
use crate::parse::types::{Node, Value};
use crate::report::Finding;

/// Validate one node. `definition` is the node type's resolved catalog entry,
/// or `None` when the type is unknown. Returns all errors found.
pub fn validate_node(node: &Node, definition: Option<&NodeDefinition>) -> Vec<Finding> {
    let Some(definition) = definition else {
        return vec![Finding::node(
            "N001",
            format!("Unknown node type: {}", node.node_type),
            &node.id,
        )];
    };

    let mut errors = Vec::new();
    for spec in definition.parameter_specs() {
        check_parameter(node, spec, &mut errors);
    }
    errors
}

fn check_parameter(node: &Node, spec: &ParameterSpec, errors: &mut Vec<Finding>) {
    let value = match node.parameter(&spec.id) {
        Some(v) if !v.is_empty() => v,
        _ => {
            if spec.required {
                errors.push(Finding::parameter(
                    "P001",
                    format!("{} is required", spec.label),
                    &node.id,
                    &spec.id,
                ));
            }
            return;
        }
    };

    match spec.param_type {
        ParameterType::Number => check_number(node, spec, value, errors),
        ParameterType::Boolean => {
            if value.as_flag().is_none() {
                errors.push(type_mismatch(node, spec, "a boolean", value));
            }
        }
        ParameterType::String => {
            if !matches!(value, Value::Text(_) | Value::Number(_)) {
                errors.push(type_mismatch(node, spec, "text", value));
            }
        }
        ParameterType::Composite => {}
    }
}

fn check_number(node: &Node, spec: &ParameterSpec, value: &Value, errors: &mut Vec<Finding>) {
    let Some(n) = value.as_number() else {
        errors.push(type_mismatch(node, spec, "a number", value));
        return;
    };

    if let Some(min) = spec.min {
        if n < min {
            errors.push(Finding::parameter(
                "P003",
                format!("{} must be at least {}", spec.label, min),
                &node.id,
                &spec.id,
            ));
        }
    }
    if let Some(max) = spec.max {
        if n > max {
            errors.push(Finding::parameter(
                "P004",
                format!("{} must be at most {}", spec.label, max),
                &node.id,
                &spec.id,
            ));
        }
    }
}

fn type_mismatch(node: &Node, spec: &ParameterSpec, expected: &str, value: &Value) -> Finding {
    Finding::parameter(
        "P002",
        format!(
            "{} must be {} (got {})",
            spec.label,
            expected,
            value.type_name()
        ),
        &node.id,
        &spec.id,
    )
}
