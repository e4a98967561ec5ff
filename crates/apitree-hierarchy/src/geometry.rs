use serde::{Deserialize, Serialize};

/// Linear interpolation between two values, `t` in `[0, 1]`.
pub trait Lerp {
    fn lerp(&self, to: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

/// Position of a node in layout space.
///
/// `x` runs across siblings (the breadth axis) and `y` grows with depth.
/// The diagram is drawn with depth running left to right, so the screen
/// point swaps the two axes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn screen(&self) -> Point {
        Point::new(self.y, self.x)
    }
}

/// Point in drawing space (before the pan/zoom transform).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

impl Lerp for Point {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Point::new(self.x.lerp(&to.x, t), self.y.lerp(&to.y, t))
    }
}

/// Pan/zoom transform: `screen = point * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale: 1.0,
    };

    pub fn translate(x: f64, y: f64) -> Self {
        Self {
            translate_x: x,
            translate_y: y,
            scale: 1.0,
        }
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(
            point.x * self.scale + self.translate_x,
            point.y * self.scale + self.translate_y,
        )
    }

    pub fn invert(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.translate_x) / self.scale,
            (point.y - self.translate_y) / self.scale,
        )
    }

    pub fn panned(&self, dx: f64, dy: f64) -> Self {
        Self {
            translate_x: self.translate_x + dx,
            translate_y: self.translate_y + dy,
            ..*self
        }
    }

    /// Scale by `factor` keeping `anchor` (a screen point) fixed.
    pub fn zoomed(&self, factor: f64, anchor: Point) -> Self {
        let scale = (self.scale * factor).clamp(0.1, 10.0);
        let world = self.invert(anchor);
        Self {
            translate_x: anchor.x - world.x * scale,
            translate_y: anchor.y - world.y * scale,
            scale,
        }
    }
}

impl Lerp for Transform {
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            translate_x: self.translate_x.lerp(&to.translate_x, t),
            translate_y: self.translate_y.lerp(&to.translate_y, t),
            scale: self.scale.lerp(&to.scale, t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_swaps_axes() {
        assert_eq!(Position::new(30.0, 180.0).screen(), Point::new(180.0, 30.0));
    }

    #[test]
    fn test_transform_round_trip() {
        let transform = Transform {
            translate_x: 120.0,
            translate_y: 20.0,
            scale: 2.0,
        };
        let point = Point::new(5.0, -3.0);

        assert_eq!(transform.apply(point), Point::new(130.0, 14.0));
        assert_eq!(transform.invert(transform.apply(point)), point);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let transform = Transform::translate(120.0, 20.0);
        let anchor = Point::new(300.0, 200.0);
        let zoomed = transform.zoomed(2.0, anchor);

        let before = transform.invert(anchor);
        let after = zoomed.invert(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert_eq!(zoomed.scale, 2.0);
    }

    #[test]
    fn test_transform_lerp() {
        let from = Transform::IDENTITY;
        let to = Transform {
            translate_x: 100.0,
            translate_y: 50.0,
            scale: 3.0,
        };

        assert_eq!(
            from.lerp(&to, 0.5),
            Transform {
                translate_x: 50.0,
                translate_y: 25.0,
                scale: 2.0,
            }
        );
    }
}
