//! Narrow-phase geometry.
//!
//! Pure functions over world-space point sets. The ECS-facing dispatch lives in
//! [`crate::systems::narrowphase`]; everything here is independent of the
//! world so it can be tested and reused directly.
//!
//! Submodules overview:
//! - [`circle`] – exact circle vs circle
//! - [`diags`] – diagonal-intersection alternative to SAT
//! - [`projection`] – interval projection on an axis
//! - [`response`] – velocity responses (reflection, sliding, clamps)
//! - [`sat`] – Separating Axis Theorem for polygon/polygon and circle/polygon
//! - [`segment`] – parametric segment intersection

pub mod circle;
pub mod diags;
pub mod projection;
pub mod response;
pub mod sat;
pub mod segment;

use glam::Vec2;

/// Minimum translation separating two overlapping shapes.
///
/// `axis` is a unit vector pointing from shape A toward shape B; `depth` is the
/// positive overlap along it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Penetration {
    pub axis: Vec2,
    pub depth: f32,
}

impl Penetration {
    /// Push vector from A toward B.
    pub fn push(&self) -> Vec2 {
        self.axis * self.depth
    }

    /// Flip the axis if needed so it points along `a_to_b`.
    pub fn oriented(self, a_to_b: Vec2) -> Self {
        if a_to_b.dot(self.axis) < 0.0 {
            Self {
                axis: -self.axis,
                depth: self.depth,
            }
        } else {
            self
        }
    }

    pub fn reversed(self) -> Self {
        Self {
            axis: -self.axis,
            depth: self.depth,
        }
    }
}
