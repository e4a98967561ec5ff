use crate::geometry::Transform;
use crate::layout::TreeLayout;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 120.0,
            bottom: 20.0,
            left: 120.0,
        }
    }
}

/// Diagram geometry and animation settings (`[view]` in the config file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Distance between consecutive depth levels.
    pub depth_step: f64,
    pub duration_ms: u64,
    pub radius: f64,
    /// Gap between a circle and its label.
    pub label_offset: f64,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 960.0,
            height: 600.0,
            margin: Margin::default(),
            depth_step: 180.0,
            duration_ms: 750,
            radius: 10.0,
            label_offset: 13.0,
        }
    }
}

impl ViewConfig {
    pub fn inner_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    pub fn inner_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Siblings spread over the inner height; depth runs along the width.
    pub fn layout(&self) -> TreeLayout {
        TreeLayout::new(self.inner_height(), self.depth_step)
    }

    /// Transform the view starts at and returns to on reset.
    pub fn home_transform(&self) -> Transform {
        Transform::translate(self.margin.left, self.margin.top)
    }
}
