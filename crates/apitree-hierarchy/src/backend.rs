//! Capabilities the view needs from whatever draws the diagram.

use crate::geometry::{Lerp, Point, Transform};
use crate::path::LinkPath;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Radius and label opacity of a shape that is not (yet) visible.
/// Kept above zero so renderers never divide by it.
pub const HIDDEN: f64 = 1e-6;

/// Stable identity of a node shape across renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ShapeId(pub u64);

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identity of a connector: the ids of its two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct LinkKey {
    pub parent: ShapeId,
    pub child: ShapeId,
}

impl LinkKey {
    pub fn new(parent: ShapeId, child: ShapeId) -> Self {
        Self { parent, child }
    }
}

/// Circle fill. `Collapsed` marks nodes that have hidden children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    Collapsed,
    Plain,
}

impl Fill {
    pub fn css(&self) -> &'static str {
        match self {
            Fill::Collapsed => "lightsteelblue",
            Fill::Plain => "#fff",
        }
    }
}

/// Which side of the circle the label sits on. Nodes with children put it
/// before the circle so it does not overlap their connectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelSide {
    Before,
    After,
}

/// Animatable attributes of a node shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NodeStyle {
    pub position: Point,
    pub radius: f64,
    pub label_opacity: f64,
    pub fill: Fill,
}

impl NodeStyle {
    pub fn hidden_at(position: Point, fill: Fill) -> Self {
        Self {
            position,
            radius: HIDDEN,
            label_opacity: HIDDEN,
            fill,
        }
    }
}

impl Lerp for NodeStyle {
    /// Geometry and opacity interpolate; the fill switches immediately.
    fn lerp(&self, to: &Self, t: f64) -> Self {
        Self {
            position: self.position.lerp(&to.position, t),
            radius: self.radius.lerp(&to.radius, t),
            label_opacity: self.label_opacity.lerp(&to.label_opacity, t),
            fill: to.fill,
        }
    }
}

/// A labeled circle as created by the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeShape {
    pub id: ShapeId,
    pub label: String,
    pub label_side: LabelSide,
    pub style: NodeStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub duration: Duration,
    /// Remove the shape once the transition completes.
    pub remove_on_end: bool,
}

impl Transition {
    pub fn to(duration: Duration) -> Self {
        Self {
            duration,
            remove_on_end: false,
        }
    }

    pub fn removing(duration: Duration) -> Self {
        Self {
            duration,
            remove_on_end: true,
        }
    }
}

/// Drawing host for a [`crate::HierarchyView`].
///
/// Animations are owned by the backend and keyed by shape identity. A new
/// transition for a shape replaces any in-flight one and starts from the
/// shape's current state. Creating a shape whose id is still present (for
/// example one that is mid-exit) replaces it.
pub trait DrawingBackend {
    fn create_node(&mut self, shape: NodeShape);
    fn remove_node(&mut self, id: ShapeId);
    fn animate_node(&mut self, id: ShapeId, to: NodeStyle, transition: Transition);

    fn create_link(&mut self, key: LinkKey, path: LinkPath);
    fn remove_link(&mut self, key: LinkKey);
    fn animate_link(&mut self, key: LinkKey, to: LinkPath, transition: Transition);

    /// Animate the pan/zoom transform to `to`.
    fn reset_transform(&mut self, to: Transform, duration: Duration);
}

impl<B: DrawingBackend + ?Sized> DrawingBackend for &mut B {
    fn create_node(&mut self, shape: NodeShape) {
        (**self).create_node(shape)
    }

    fn remove_node(&mut self, id: ShapeId) {
        (**self).remove_node(id)
    }

    fn animate_node(&mut self, id: ShapeId, to: NodeStyle, transition: Transition) {
        (**self).animate_node(id, to, transition)
    }

    fn create_link(&mut self, key: LinkKey, path: LinkPath) {
        (**self).create_link(key, path)
    }

    fn remove_link(&mut self, key: LinkKey) {
        (**self).remove_link(key)
    }

    fn animate_link(&mut self, key: LinkKey, to: LinkPath, transition: Transition) {
        (**self).animate_link(key, to, transition)
    }

    fn reset_transform(&mut self, to: Transform, duration: Duration) {
        (**self).reset_transform(to, duration)
    }
}
