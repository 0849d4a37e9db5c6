use crate::graph::Node;

pub const K_REPEL: f64 = 0.01;
pub const K_ATTRACT: f64 = 0.01;

/// Floor applied to the separation before dividing in [`repulsive_force`]. Two nodes
/// on the same spot would otherwise produce an infinite push.
pub const MIN_DISTANCE: f64 = 1e-3;

pub fn distance(from: Node, to: Node) -> f64 {
    (to.x - from.x).hypot(to.y - from.y)
}

pub fn repulsive_force(from: Node, to: Node) -> f64 {
    K_REPEL / distance(from, to).max(MIN_DISTANCE)
}

pub fn attractive_force(from: Node, to: Node) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    K_ATTRACT * (dx * dx + dy * dy)
}

/// Direction from `from` towards `to`, in radians. Coincident nodes give `0`.
pub fn angle_between(from: Node, to: Node) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

pub fn x_component(force: f64, angle: f64) -> f64 {
    force * angle.cos()
}

pub fn y_component(force: f64, angle: f64) -> f64 {
    force * angle.sin()
}

/// Force vector of magnitude `force` pointing along `angle`.
pub(super) fn components(force: f64, angle: f64) -> (f64, f64) {
    (x_component(force, angle), y_component(force, angle))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-12;

    #[test]
    fn repulsion_falls_off_with_distance() {
        let origin = Node::new(0.0, 0.0);
        assert!((repulsive_force(origin, Node::new(2.0, 0.0)) - 0.005).abs() < EPSILON);
        assert!((repulsive_force(origin, Node::new(0.0, 0.5)) - 0.02).abs() < EPSILON);
        assert!((repulsive_force(origin, Node::new(3.0, 4.0)) - 0.002).abs() < EPSILON);
    }

    #[test]
    fn attraction_grows_with_squared_distance() {
        let origin = Node::new(0.0, 0.0);
        assert!((attractive_force(origin, Node::new(2.0, 0.0)) - 0.04).abs() < EPSILON);
        assert!((attractive_force(origin, Node::new(3.0, 4.0)) - 0.25).abs() < EPSILON);
        assert_eq!(attractive_force(origin, origin), 0.0);
    }

    #[test]
    fn forces_are_symmetric_in_their_endpoints() {
        let a = Node::new(-0.3, 1.7);
        let b = Node::new(2.2, -0.4);
        assert_eq!(repulsive_force(a, b), repulsive_force(b, a));
        assert!((attractive_force(a, b) - attractive_force(b, a)).abs() < EPSILON);
    }

    #[test]
    fn coincident_nodes_get_a_finite_push_along_x() {
        let node = Node::new(0.25, -0.75);
        let force = repulsive_force(node, node);
        assert!(force.is_finite());
        assert!((force - K_REPEL / MIN_DISTANCE).abs() < EPSILON);

        let angle = angle_between(node, node);
        assert_eq!(angle, 0.0);
        assert_eq!(components(force, angle), (force, 0.0));
    }

    #[test]
    fn angle_points_from_first_to_second_node() {
        let origin = Node::new(0.0, 0.0);
        let quarter = std::f64::consts::FRAC_PI_2;
        assert!((angle_between(origin, Node::new(0.0, 3.0)) - quarter).abs() < EPSILON);
        assert!((angle_between(Node::new(0.0, 3.0), origin) + quarter).abs() < EPSILON);
        assert!(
            (angle_between(origin, Node::new(-1.0, 0.0)) - std::f64::consts::PI).abs() < EPSILON
        );
    }

    #[test]
    fn components_split_force_by_angle() {
        let angle = angle_between(Node::new(0.0, 0.0), Node::new(3.0, 4.0));
        assert!((x_component(5.0, angle) - 3.0).abs() < EPSILON);
        assert!((y_component(5.0, angle) - 4.0).abs() < EPSILON);
    }
}
