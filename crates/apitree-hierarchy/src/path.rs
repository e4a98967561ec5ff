use crate::geometry::{Lerp, Point, Position};
use serde::Serialize;

/// Curved connector between a parent and a child.
///
/// The curve is a cubic Bézier whose control points sit halfway along the
/// depth axis, level with each endpoint, giving a horizontal S shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinkPath {
    pub source: Position,
    pub target: Position,
}

impl LinkPath {
    pub fn new(source: Position, target: Position) -> Self {
        Self { source, target }
    }

    /// Zero-length connector at `at`, used as the start and end of
    /// enter/exit transitions.
    pub fn degenerate(at: Position) -> Self {
        Self::new(at, at)
    }

    /// Start, two control points and end, in drawing space.
    pub fn control_points(&self) -> [Point; 4] {
        let (s, d) = (self.source, self.target);
        let mid = (s.y + d.y) / 2.0;
        [
            Point::new(s.y, s.x),
            Point::new(mid, s.x),
            Point::new(mid, d.x),
            Point::new(d.y, d.x),
        ]
    }

    /// SVG path data for the connector.
    pub fn to_svg(&self) -> String {
        let [p0, p1, p2, p3] = self.control_points();
        format!(
            "M {} {} C {} {}, {} {}, {} {}",
            p0.x, p0.y, p1.x, p1.y, p2.x, p2.y, p3.x, p3.y
        )
    }

    /// Point on the curve at parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let [p0, p1, p2, p3] = self.control_points();
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * p0.x + b * p1.x + c * p2.x + d * p3.x,
            a * p0.y + b * p1.y + c * p2.y + d * p3.y,
        )
    }

    /// `segments + 1` points along the curve, for backends that only draw lines.
    pub fn flatten(&self, segments: usize) -> Vec<Point> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.point_at(i as f64 / segments as f64))
            .collect()
    }
}

impl Lerp for LinkPath {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        let lerp_position = |a: &Position, b: &Position| {
            Position::new(a.x.lerp(&b.x, t), a.y.lerp(&b.y, t))
        };
        Self {
            source: lerp_position(&self.source, &to.source),
            target: lerp_position(&self.target, &to.target),
        }
    }
}
