//! Pivot anchor for nodes with a bounding size.
//!
//! Rendering collaborators turn a node's [`Size`] into a pivot offset through
//! [`Anchor::origin`]. Collision math never reads the anchor.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned extent of a shape's model-space vertices.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Extent of a point set (min/max per axis). Empty input yields zero size.
    pub fn from_points(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Self::default();
        };
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Self::new(max.x - min.x, max.y - min.y)
    }
}

#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Anchor {
    #[default]
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    Center,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// Pivot offset inside a box of the given size.
    pub fn origin(&self, size: Size) -> Vec2 {
        let (w, h) = (size.width, size.height);
        match self {
            Anchor::TopLeft => Vec2::new(0.0, 0.0),
            Anchor::TopCenter => Vec2::new(w / 2.0, 0.0),
            Anchor::TopRight => Vec2::new(w, 0.0),
            Anchor::MiddleLeft => Vec2::new(0.0, h / 2.0),
            Anchor::Center => Vec2::new(w / 2.0, h / 2.0),
            Anchor::MiddleRight => Vec2::new(w, h / 2.0),
            Anchor::BottomLeft => Vec2::new(0.0, h),
            Anchor::BottomCenter => Vec2::new(w / 2.0, h),
            Anchor::BottomRight => Vec2::new(w, h),
        }
    }
}
