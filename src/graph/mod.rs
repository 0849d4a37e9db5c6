mod load;

use std::collections::TryReserveError;
use std::f64::consts::TAU;

pub use load::{LoadError, load_graph, parse_graph};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
}

impl Node {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Evenly spaced seed position: node `index` of `total` sits at angle `2π·index/total`.
    pub fn on_unit_circle(index: usize, total: usize) -> Self {
        let angle = TAU * index as f64 / total as f64;
        Self::new(angle.cos(), angle.sin())
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Unordered pair of node indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub start: usize,
    pub end: usize,
}

impl Edge {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Nodes are addressed by their position in `nodes`; edges refer to them by index,
/// so the node list is never reordered once loaded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn with_circle_layout(node_count: usize) -> Self {
        let nodes = (0..node_count)
            .map(|index| Node::on_unit_circle(index, node_count))
            .collect();

        Self {
            nodes,
            edges: Vec::new(),
        }
    }

    /// Like [`Graph::with_circle_layout`], but reports a node count that cannot be
    /// allocated instead of aborting.
    pub fn try_with_circle_layout(node_count: usize) -> Result<Self, TryReserveError> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(node_count)?;
        nodes.extend((0..node_count).map(|index| Node::on_unit_circle(index, node_count)));

        Ok(Self {
            nodes,
            edges: Vec::new(),
        })
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn has_non_finite_positions(&self) -> bool {
        self.nodes.iter().any(|node| !node.is_finite())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    fn assert_close(actual: Node, x: f64, y: f64) {
        assert!(
            (actual.x - x).abs() < EPSILON && (actual.y - y).abs() < EPSILON,
            "expected ({x}, {y}), got ({}, {})",
            actual.x,
            actual.y
        );
    }

    #[test]
    fn four_nodes_sit_on_the_axes() {
        let graph = Graph::with_circle_layout(4);

        assert_eq!(graph.node_count(), 4);
        assert_close(graph.nodes[0], 1.0, 0.0);
        assert_close(graph.nodes[1], 0.0, 1.0);
        assert_close(graph.nodes[2], -1.0, 0.0);
        assert_close(graph.nodes[3], 0.0, -1.0);
    }

    #[test]
    fn circle_layout_matches_angle_formula() {
        for total in 1..=17 {
            let graph = Graph::with_circle_layout(total);
            for (index, node) in graph.nodes.iter().enumerate() {
                let angle = TAU * index as f64 / total as f64;
                assert_close(*node, angle.cos(), angle.sin());
                assert!((node.x.hypot(node.y) - 1.0).abs() < EPSILON);
            }
        }
    }

    #[test]
    fn empty_graph_has_nothing() {
        let graph = Graph::with_circle_layout(0);
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
        assert!(!graph.has_non_finite_positions());
    }

    #[test]
    fn fallible_layout_matches_infallible_one() {
        assert_eq!(
            Graph::try_with_circle_layout(5).unwrap(),
            Graph::with_circle_layout(5)
        );
        assert!(Graph::try_with_circle_layout(usize::MAX).is_err());
    }

    #[test]
    fn detects_non_finite_positions() {
        let mut graph = Graph::with_circle_layout(3);
        graph.nodes[1].y = f64::NAN;
        assert!(graph.has_non_finite_positions());
    }
}
