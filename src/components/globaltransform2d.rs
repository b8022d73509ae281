//! Computed world-space transform for nodes in a hierarchy.
//!
//! When an entity has a [`ChildOf`](bevy_ecs::hierarchy::ChildOf) parent, its
//! [`MapPosition`](super::mapposition::MapPosition), [`Rotation`](super::rotation::Rotation),
//! and [`Scale`](super::scale::Scale) are interpreted as local to the parent.
//! [`global_transform`](crate::systems::hierarchy::global_transform) composes
//! them with the parent's global transform on demand and memoizes the result in
//! [`CachedGlobalTransform`] until the next invalidation.

use bevy_ecs::prelude::*;
use glam::Vec2;

/// Rotate a 2D vector by `angle` radians.
pub fn rotate(v: Vec2, angle: f32) -> Vec2 {
    Vec2::from_angle(angle).rotate(v)
}

/// World-space position, rotation (radians) and scale of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobalTransform2D {
    pub position: Vec2,
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for GlobalTransform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl GlobalTransform2D {
    pub const IDENTITY: Self = Self {
        position: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2::ONE,
    };

    pub fn new(position: Vec2, rotation: f32, scale: Vec2) -> Self {
        Self {
            position,
            rotation,
            scale,
        }
    }

    /// Compose this (local) transform with its parent's global transform.
    ///
    /// The local offset is scaled by the parent's scale, then rotated by the
    /// parent's rotation, then translated by the parent's position. Rotations
    /// add and scales multiply.
    pub fn combine(&self, parent: &GlobalTransform2D) -> GlobalTransform2D {
        let scaled = self.position * parent.scale;
        let rotated = rotate(scaled, parent.rotation);
        GlobalTransform2D {
            position: parent.position + rotated,
            rotation: parent.rotation + self.rotation,
            scale: parent.scale * self.scale,
        }
    }

    /// Map a world-space point into this transform's local frame.
    ///
    /// Inverse of the position part of [`combine`](Self::combine). A zero scale
    /// component collapses that axis to 0.
    pub fn to_local(&self, world_point: Vec2) -> Vec2 {
        let unrotated = rotate(world_point - self.position, -self.rotation);
        Vec2::new(
            safe_div(unrotated.x, self.scale.x),
            safe_div(unrotated.y, self.scale.y),
        )
    }
}

fn safe_div(value: f32, divisor: f32) -> f32 {
    if divisor.abs() <= f32::EPSILON {
        0.0
    } else {
        value / divisor
    }
}

/// Memoized global transform plus its dirty flag.
///
/// Setting any local component through the hierarchy helpers marks the node and
/// every descendant dirty; the next read recomputes and clears the flag.
#[derive(Component, Clone, Copy, Debug)]
pub struct CachedGlobalTransform {
    pub transform: GlobalTransform2D,
    pub dirty: bool,
}

impl Default for CachedGlobalTransform {
    fn default() -> Self {
        Self {
            transform: GlobalTransform2D::IDENTITY,
            dirty: true,
        }
    }
}
