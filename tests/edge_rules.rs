//! Integration tests for edge validation (E001–E005).

#[allow(dead_code)]
mod helpers;

use flowcheck::parse::Node;
use flowcheck::report::FindingKind;
use flowcheck::validate::{Endpoint, validate_edge};
use flowcheck::validate_workflow;
use helpers::*;

#[test]
fn control_flow_edge_is_valid() {
    let http = http_request_def();
    let set = set_field_def();
    let e = flow("e1", "fetch", "mark");
    assert!(validate_edge(&e, Endpoint::Resolved(&http), Endpoint::Resolved(&set)).is_empty());
}

#[test]
fn e002_missing_target_skips_handle_checks() {
    let workflow = graph(
        vec![manual("trigger"), http("fetch")],
        vec![
            flow("e1", "trigger", "fetch"),
            edge("e2", ("fetch", "nope"), ("ghost", "nope")),
        ],
    );
    let report = validate_workflow(&workflow, &test_catalog()).unwrap();
    let from_e2: Vec<_> = report
        .errors
        .iter()
        .chain(&report.warnings)
        .filter(|f| f.edge_id.as_deref() == Some("e2"))
        .collect();
    assert_eq!(from_e2.len(), 1, "{:?}", from_e2);
    assert_eq!(from_e2[0].code, "E002");
    assert_eq!(from_e2[0].kind, FindingKind::Edge);
    assert!(from_e2[0].message.contains("target node not found"));
}

#[test]
fn e001_and_e002_both_reported_when_both_endpoints_missing() {
    let e = flow("e1", "a", "b");
    let findings = validate_edge(&e, Endpoint::Missing, Endpoint::Missing);
    assert_eq!(codes(&findings), vec!["E001", "E002"]);
}

#[test]
fn unresolved_endpoint_is_skipped_silently() {
    let http = http_request_def();
    let e = flow("e1", "fetch", "x");
    assert!(validate_edge(&e, Endpoint::Resolved(&http), Endpoint::Unresolved).is_empty());

    let workflow = graph(
        vec![manual("trigger"), Node::new("x", "mystery")],
        vec![flow("e1", "trigger", "x")],
    );
    let report = validate_workflow(&workflow, &test_catalog()).unwrap();
    assert_eq!(codes(&report.errors), vec!["N001"]);
}

#[test]
fn e003_e004_missing_handles_name_the_handle() {
    let http = http_request_def();
    let set = set_field_def();
    let e = edge("e1", ("fetch", "bogusOut"), ("mark", "bogusIn"));
    let findings = validate_edge(&e, Endpoint::Resolved(&http), Endpoint::Resolved(&set));
    assert_eq!(codes(&findings), vec!["E003", "E004"]);
    assert!(findings[0].message.contains("'bogusOut'"));
    assert!(findings[1].message.contains("'bogusIn'"));
}

#[test]
fn e003_handle_ids_resolve_against_the_right_side() {
    // "run" is an input on httpRequest, not an output.
    let http = http_request_def();
    let set = set_field_def();
    let e = edge("e1", ("fetch", "run"), ("mark", "run"));
    let findings = validate_edge(&e, Endpoint::Resolved(&http), Endpoint::Resolved(&set));
    assert_eq!(codes(&findings), vec!["E003"]);
}

#[test]
fn e005_trigger_output_into_data_input() {
    let trigger = manual_trigger_def();
    let set = set_field_def();
    let e = edge("e1", ("trigger", "next"), ("mark", "value"));
    let findings = validate_edge(&e, Endpoint::Resolved(&trigger), Endpoint::Resolved(&set));
    assert_eq!(codes(&findings), vec!["E005"]);
    assert_eq!(findings[0].edge_id.as_deref(), Some("e1"));
}

#[test]
fn data_output_into_trigger_input_is_allowed() {
    let http = http_request_def();
    let set = set_field_def();
    let e = edge("e1", ("fetch", "response"), ("mark", "run"));
    assert!(validate_edge(&e, Endpoint::Resolved(&http), Endpoint::Resolved(&set)).is_empty());
}

#[test]
fn data_to_data_is_allowed() {
    let http = http_request_def();
    let set = set_field_def();
    let e = edge("e1", ("fetch", "response"), ("mark", "value"));
    assert!(validate_edge(&e, Endpoint::Resolved(&http), Endpoint::Resolved(&set)).is_empty());
}

#[test]
fn e005_reported_through_validate_workflow() {
    let workflow = graph(
        vec![manual("trigger"), http("fetch"), set_field("mark")],
        vec![
            flow("e1", "trigger", "fetch"),
            edge("e2", ("fetch", "next"), ("mark", "value")),
        ],
    );
    let report = validate_workflow(&workflow, &test_catalog()).unwrap();
    assert_eq!(codes(&report.errors), vec!["E005"]);
    let e005 = &report.errors[0];
    assert_eq!(e005.edge_id.as_deref(), Some("e2"));
    assert!(
        e005.message.contains("trigger output to data input"),
        "{}",
        e005.message
    );
    assert!(e005.message.contains("('next' -> 'value')"));
}
