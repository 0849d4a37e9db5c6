use eframe::egui::{Color32, Painter, Rect, Stroke};

use crate::graph::Graph;

use super::viewport::Viewport;

const BACKGROUND: Color32 = Color32::WHITE;
const EDGE_COLOR: Color32 = Color32::BLACK;
const NODE_COLOR: Color32 = Color32::BLUE;

/// Node disks take this share of the shorter surface side as radius.
const NODE_RADIUS_FRACTION: f32 = 1.0 / 64.0;

pub(super) fn node_radius(rect: Rect) -> f32 {
    (rect.width().min(rect.height()) * NODE_RADIUS_FRACTION).max(2.0)
}

/// Clears `rect` and draws the graph scaled to fit: edges first, nodes on top.
pub(super) fn paint_graph(painter: &Painter, rect: Rect, graph: &Graph) {
    painter.rect_filled(rect, 0.0, BACKGROUND);

    let Some(viewport) = Viewport::from_nodes(&graph.nodes) else {
        return;
    };

    let stroke = Stroke::new(1.0, EDGE_COLOR);
    for edge in &graph.edges {
        let (Some(start), Some(end)) = (graph.nodes.get(edge.start), graph.nodes.get(edge.end))
        else {
            continue;
        };
        if !start.is_finite() || !end.is_finite() {
            continue;
        }

        painter.line_segment(
            [viewport.to_screen(rect, *start), viewport.to_screen(rect, *end)],
            stroke,
        );
    }

    let radius = node_radius(rect);
    for node in graph.nodes.iter().filter(|node| node.is_finite()) {
        painter.circle_filled(viewport.to_screen(rect, *node), radius, NODE_COLOR);
    }
}
