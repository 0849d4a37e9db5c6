use eframe::egui::{Pos2, Rect, pos2};

use crate::graph::Node;

/// Fraction of each surface dimension left blank on every side.
pub const MARGIN_FRACTION: f64 = 0.025;

/// World-space bounding box of a graph's nodes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Viewport {
    /// Bounds over every finite node; `None` when there is nothing to frame.
    pub fn from_nodes(nodes: &[Node]) -> Option<Self> {
        nodes
            .iter()
            .filter(|node| node.is_finite())
            .fold(None, |bounds: Option<Self>, node| {
                Some(match bounds {
                    None => Self {
                        min_x: node.x,
                        min_y: node.y,
                        max_x: node.x,
                        max_y: node.y,
                    },
                    Some(bounds) => Self {
                        min_x: bounds.min_x.min(node.x),
                        min_y: bounds.min_y.min(node.y),
                        max_x: bounds.max_x.max(node.x),
                        max_y: bounds.max_y.max(node.y),
                    },
                })
            })
    }

    /// Screen position of `node` inside `rect`. World +y points up on screen.
    pub fn to_screen(&self, rect: Rect, node: Node) -> Pos2 {
        let x = transform(node.x, self.min_x, self.max_x, f64::from(rect.width()));
        let y = transform(node.y, self.min_y, self.max_y, f64::from(rect.height()));
        pos2(rect.left() + x as f32, rect.bottom() - y as f32)
    }
}

/// Maps `value` from `[min, max]` onto `[0, extent]` with [`MARGIN_FRACTION`] padding.
/// A zero-width range maps to the middle of the extent.
pub fn transform(value: f64, min: f64, max: f64, extent: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 || !span.is_finite() {
        return extent / 2.0;
    }
    (1.0 - 2.0 * MARGIN_FRACTION) * (value - min) * extent / span + MARGIN_FRACTION * extent
}
