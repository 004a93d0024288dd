//! Read-only graph model over a [`WorkflowGraph`] snapshot.
//!
//! Edges with a dangling endpoint are kept out of the adjacency structure; the
//! edge rules report them separately.

use std::collections::HashMap;

use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};

use super::types::{Edge, Node, WorkflowGraph};

pub struct GraphModel<'a> {
    /// The petgraph view, one vertex per unique node id, weighted by edge id.
    pub graph: DiGraph<&'a str, &'a str>,
    pub node_indices: HashMap<&'a str, NodeIndex>,
    /// Unique node ids in insertion order.
    pub node_order: Vec<&'a str>,
    pub nodes_by_id: HashMap<&'a str, &'a Node>,
    pub edges_by_source_node: HashMap<&'a str, Vec<&'a Edge>>,
    /// Successors per node, in edge insertion order.
    pub adjacency: HashMap<&'a str, Vec<&'a str>>,
    /// Ids that appeared more than once, once per extra occurrence.
    pub duplicate_node_ids: Vec<&'a str>,
    /// All edges, dangling ones included, in insertion order.
    pub edges: &'a [Edge],
}

impl<'a> GraphModel<'a> {
    pub fn build(workflow: &'a WorkflowGraph) -> Self {
        let mut graph = DiGraph::new();
        let mut node_indices = HashMap::new();
        let mut node_order = Vec::with_capacity(workflow.nodes.len());
        let mut nodes_by_id = HashMap::new();
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut duplicate_node_ids = Vec::new();

        for node in &workflow.nodes {
            let id = node.id.as_str();
            if nodes_by_id.contains_key(id) {
                duplicate_node_ids.push(id);
                continue;
            }
            let idx = graph.add_node(id);
            node_indices.insert(id, idx);
            node_order.push(id);
            nodes_by_id.insert(id, node);
            adjacency.insert(id, Vec::new());
        }

        let mut edges_by_source_node: HashMap<&str, Vec<&Edge>> = HashMap::new();
        for edge in &workflow.edges {
            let source = edge.source.node_id.as_str();
            let target = edge.target.node_id.as_str();
            edges_by_source_node.entry(source).or_default().push(edge);

            if let (Some(&s), Some(&t)) = (node_indices.get(source), node_indices.get(target)) {
                graph.add_edge(s, t, edge.id.as_str());
                adjacency.entry(source).or_default().push(target);
            }
        }

        GraphModel {
            graph,
            node_indices,
            node_order,
            nodes_by_id,
            edges_by_source_node,
            adjacency,
            duplicate_node_ids,
            edges: &workflow.edges,
        }
    }

    pub fn node(&self, node_id: &str) -> Option<&'a Node> {
        self.nodes_by_id.get(node_id).copied()
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes_by_id.contains_key(node_id)
    }

    pub fn successors(&self, node_id: &str) -> &[&'a str] {
        self.adjacency.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn outgoing_edges(&self, node_id: &str) -> &[&'a Edge] {
        self.edges_by_source_node
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn incoming_count(&self, node_id: &str) -> usize {
        self.degree(node_id, Direction::Incoming)
    }

    pub fn outgoing_count(&self, node_id: &str) -> usize {
        self.degree(node_id, Direction::Outgoing)
    }

    fn degree(&self, node_id: &str, direction: Direction) -> usize {
        let Some(&idx) = self.node_indices.get(node_id) else {
            return 0;
        };
        self.graph.edges_directed(idx, direction).count()
    }

    /// Every listed node, duplicate ids included.
    pub fn node_count(&self) -> usize {
        self.node_order.len() + self.duplicate_node_ids.len()
    }

    /// Every listed edge, dangling ones included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
