pub mod forces;

use std::ops::Index;

use crate::graph::Graph;
use forces::{angle_between, attractive_force, components, repulsive_force};

/// Pending position change for one node.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NodeChange {
    pub dx: f64,
    pub dy: f64,
}

/// Per-node displacement accumulator, index aligned with `Graph::nodes`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeChanges {
    changes: Vec<NodeChange>,
}

impl NodeChanges {
    pub fn zeroed(node_count: usize) -> Self {
        Self {
            changes: vec![NodeChange::default(); node_count],
        }
    }

    pub fn for_graph(graph: &Graph) -> Self {
        Self::zeroed(graph.node_count())
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NodeChange> {
        self.changes.iter()
    }

    pub fn reset(&mut self) {
        self.changes.fill(NodeChange::default());
    }

    /// Zeroes the accumulator and sizes it for `node_count` nodes.
    pub fn reset_for(&mut self, node_count: usize) {
        self.changes.clear();
        self.changes.resize(node_count, NodeChange::default());
    }

    fn push_apart(&mut self, first: usize, second: usize, dx: f64, dy: f64) {
        self.changes[first].dx -= dx;
        self.changes[first].dy -= dy;
        self.changes[second].dx += dx;
        self.changes[second].dy += dy;
    }
}

impl Index<usize> for NodeChanges {
    type Output = NodeChange;

    fn index(&self, index: usize) -> &Self::Output {
        &self.changes[index]
    }
}

/// Repulsion over every unordered pair of distinct nodes, edges or not.
pub fn accumulate_repulsive_forces(graph: &Graph, changes: &mut NodeChanges) {
    debug_assert_eq!(graph.node_count(), changes.len());

    let nodes = &graph.nodes;
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let force = repulsive_force(nodes[i], nodes[j]);
            let (dx, dy) = components(force, angle_between(nodes[i], nodes[j]));
            changes.push_apart(i, j, dx, dy);
        }
    }
}

/// Attraction once per edge; parallel edges pull once each.
pub fn accumulate_attractive_forces(graph: &Graph, changes: &mut NodeChanges) {
    debug_assert_eq!(graph.node_count(), changes.len());

    for edge in &graph.edges {
        let start = graph.nodes[edge.start];
        let end = graph.nodes[edge.end];
        let force = attractive_force(start, end);
        let (dx, dy) = components(force, angle_between(start, end));
        changes.push_apart(edge.end, edge.start, dx, dy);
    }
}

/// Moves every node by its pending change and zeroes the accumulator.
pub fn apply_node_changes(graph: &mut Graph, changes: &mut NodeChanges) {
    debug_assert_eq!(graph.node_count(), changes.len());

    for (node, change) in graph.nodes.iter_mut().zip(changes.iter()) {
        node.x += change.dx;
        node.y += change.dy;
    }
    changes.reset();
}

/// One layout iteration with a freshly allocated accumulator.
pub fn transform_graph(graph: &mut Graph) {
    LayoutStepper::default().step(graph);
}

/// Runs layout iterations, reusing one accumulator between steps.
#[derive(Debug, Default)]
pub struct LayoutStepper {
    changes: NodeChanges,
}

impl LayoutStepper {
    pub fn step(&mut self, graph: &mut Graph) {
        self.changes.reset_for(graph.node_count());
        accumulate_repulsive_forces(graph, &mut self.changes);
        accumulate_attractive_forces(graph, &mut self.changes);
        apply_node_changes(graph, &mut self.changes);
    }

    pub fn changes(&self) -> &NodeChanges {
        &self.changes
    }
}
