//! Graph-level structural rules (S001–S007).

use std::collections::HashSet;

use tracing::debug;

use crate::catalog::CatalogSnapshot;
use crate::config::ValidatorConfig;
use crate::parse::graph::GraphModel;
use crate::report::{Finding, Findings};

/// Run all structural rules over the model. Returns all findings.
pub fn validate_structural(
    model: &GraphModel<'_>,
    catalog: &CatalogSnapshot,
    config: &ValidatorConfig,
) -> Findings {
    let mut findings = Findings::default();

    let too_large = s007_graph_within_limits(model, config, &mut findings);
    s005_unique_node_ids(model, &mut findings);
    s001_trigger_present(model, catalog, config, &mut findings);
    s003_nodes_connected(model, catalog, config, &mut findings);
    if !too_large {
        s004_no_cycles(model, &mut findings);
    }
    s006_no_duplicate_edges(model, &mut findings);

    findings
}

fn is_trigger(
    model: &GraphModel<'_>,
    catalog: &CatalogSnapshot,
    config: &ValidatorConfig,
    node_id: &str,
) -> bool {
    model
        .node(node_id)
        .and_then(|n| catalog.get(&n.node_type))
        .is_some_and(|d| d.is_trigger(&config.trigger_category))
}

fn s007_graph_within_limits(
    model: &GraphModel<'_>,
    config: &ValidatorConfig,
    findings: &mut Findings,
) -> bool {
    // Raw totals, duplicate ids and dangling edges included.
    let nodes = model.node_count();
    let edges = model.edge_count();
    if !config.exceeds_limits(nodes, edges) {
        return false;
    }
    findings.error(Finding::structural(
        "S007",
        format!(
            "Workflow has {} nodes and {} edges, above the limit of {} nodes and {} edges; \
             cycle detection was skipped",
            nodes, edges, config.max_nodes, config.max_edges
        ),
    ));
    true
}

fn s005_unique_node_ids(model: &GraphModel<'_>, findings: &mut Findings) {
    for id in &model.duplicate_node_ids {
        findings.error(
            Finding::structural("S005", format!("Duplicate node id '{}'", id)).at_node(id),
        );
    }
}

fn s001_trigger_present(
    model: &GraphModel<'_>,
    catalog: &CatalogSnapshot,
    config: &ValidatorConfig,
    findings: &mut Findings,
) {
    let triggers: Vec<&str> = model
        .node_order
        .iter()
        .copied()
        .filter(|id| is_trigger(model, catalog, config, id))
        .collect();

    match triggers.len() {
        0 => findings.error(Finding::structural(
            "S001",
            "Workflow must have at least one trigger node",
        )),
        1 => {}
        n => findings.warning(
            Finding::structural(
                "S002",
                format!(
                    "Workflow has {} trigger nodes; only one entry point is honored at run time",
                    n
                ),
            )
            .with_nodes(&triggers),
        ),
    }
}

fn s003_nodes_connected(
    model: &GraphModel<'_>,
    catalog: &CatalogSnapshot,
    config: &ValidatorConfig,
    findings: &mut Findings,
) {
    let disconnected: Vec<&str> = model
        .node_order
        .iter()
        .copied()
        .filter(|id| {
            if is_trigger(model, catalog, config, id) {
                model.outgoing_count(id) == 0
            } else {
                model.incoming_count(id) == 0
            }
        })
        .collect();

    if disconnected.is_empty() {
        return;
    }
    findings.warning(
        Finding::structural(
            "S003",
            format!(
                "{} node(s) are not connected to the workflow: {}",
                disconnected.len(),
                disconnected.join(", ")
            ),
        )
        .with_nodes(&disconnected),
    );
}

fn s004_no_cycles(model: &GraphModel<'_>, findings: &mut Findings) {
    for cycle in find_cycles(model) {
        let mut walk = cycle.join(" -> ");
        walk.push_str(" -> ");
        walk.push_str(cycle[0]);
        findings.error(
            Finding::structural("S004", format!("Cycle detected: {}", walk))
                .at_node(cycle[0])
                .with_nodes(&cycle),
        );
    }
}

fn s006_no_duplicate_edges(model: &GraphModel<'_>, findings: &mut Findings) {
    let mut seen = HashSet::new();
    for edge in model.edges {
        if !seen.insert((&edge.source, &edge.target)) {
            findings.warning(
                Finding::structural(
                    "S006",
                    format!(
                        "Duplicate edge from '{}' to '{}'",
                        edge.source.node_id, edge.target.node_id
                    ),
                )
                .at_edge(&edge.id),
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Cycle search
// ---------------------------------------------------------------------------

struct Frame<'a> {
    node: &'a str,
    /// Index of the next successor to explore.
    cursor: usize,
}

/// Depth-first search with an explicit frame stack. Roots are taken in node
/// insertion order and successors in edge insertion order. The first cycle
/// found from a root ends that root's search. Each returned path is open: the
/// closing edge runs from its last node back to its first.
pub fn find_cycles<'a>(model: &GraphModel<'a>) -> Vec<Vec<&'a str>> {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut cycles = Vec::new();

    for &root in &model.node_order {
        if !visited.insert(root) {
            continue;
        }
        let mut on_path: HashSet<&str> = HashSet::from([root]);
        let mut stack = vec![Frame {
            node: root,
            cursor: 0,
        }];

        while let Some(frame) = stack.last_mut() {
            let successors = model.successors(frame.node);
            let Some(&next) = successors.get(frame.cursor) else {
                on_path.remove(frame.node);
                stack.pop();
                continue;
            };
            frame.cursor += 1;

            if on_path.contains(next) {
                if let Some(start) = stack.iter().position(|f| f.node == next) {
                    let cycle: Vec<&str> = stack[start..].iter().map(|f| f.node).collect();
                    debug!(root, len = cycle.len(), "cycle found");
                    cycles.push(cycle);
                }
                break;
            }
            if visited.insert(next) {
                on_path.insert(next);
                stack.push(Frame {
                    node: next,
                    cursor: 0,
                });
            }
        }
    }

    cycles
}
