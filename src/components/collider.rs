//! Collision shapes attached to nodes.
//!
//! A [`Collider`] turns a node into a shape taking part in the narrow phase.
//! The geometry is a closed variant, [`ColliderShape`], so every pairing in the
//! resolver table is matched exhaustively.
//!
//! Boundary points are always produced in world space from the node's current
//! [`GlobalTransform2D`] and are recomputed on every call.

use bevy_ecs::prelude::*;
use glam::Vec2;

use super::anchor::Size;
use super::globaltransform2d::{GlobalTransform2D, rotate};

/// Number of samples used to approximate a circle's outline.
pub const CIRCLE_SEGMENTS: usize = 20;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CircleShape {
    /// Radius in world units. The node's scale does not affect it.
    pub radius: f32,
}

impl CircleShape {
    pub fn new(radius: f32) -> Self {
        Self {
            radius: radius.max(0.0),
        }
    }

    /// 20 evenly spaced outline samples, offset by the global rotation.
    pub fn boundary_points(&self, global: &GlobalTransform2D) -> Vec<Vec2> {
        let step = std::f32::consts::TAU / CIRCLE_SEGMENTS as f32;
        (0..CIRCLE_SEGMENTS)
            .map(|i| {
                let angle = i as f32 * step + global.rotation;
                global.position + self.radius * Vec2::new(angle.cos(), angle.sin())
            })
            .collect()
    }
}

/// Polygon given by model-space vertices. Edge `i` joins vertex `i` to
/// vertex `(i + 1) % n`.
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonShape {
    model_points: Vec<Vec2>,
}

impl PolygonShape {
    /// Callers are expected to supply at least three vertices; see
    /// [`crate::factory`] for validated constructors.
    pub fn new(model_points: impl Into<Vec<Vec2>>) -> Self {
        Self {
            model_points: model_points.into(),
        }
    }

    pub fn model_points(&self) -> &[Vec2] {
        &self.model_points
    }

    /// World-space vertices: rotate, then scale, then translate.
    ///
    /// The rotate-before-scale order matters for non-uniform scale.
    pub fn boundary_points(&self, global: &GlobalTransform2D) -> Vec<Vec2> {
        self.model_points
            .iter()
            .map(|p| rotate(*p, global.rotation) * global.scale + global.position)
            .collect()
    }

    pub fn size(&self) -> Size {
        Size::from_points(&self.model_points)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Polygon,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColliderShape {
    Circle(CircleShape),
    Polygon(PolygonShape),
}

impl ColliderShape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            ColliderShape::Circle(_) => ShapeKind::Circle,
            ColliderShape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn boundary_points(&self, global: &GlobalTransform2D) -> Vec<Vec2> {
        match self {
            ColliderShape::Circle(circle) => circle.boundary_points(global),
            ColliderShape::Polygon(polygon) => polygon.boundary_points(global),
        }
    }

    /// Model-space bounding extent. Circles report their diameter box.
    pub fn size(&self) -> Size {
        match self {
            ColliderShape::Circle(circle) => Size::new(circle.radius * 2.0, circle.radius * 2.0),
            ColliderShape::Polygon(polygon) => polygon.size(),
        }
    }
}

/// Shape taking part in collision detection.
///
/// - `is_static`: resolution never pushes static shapes.
/// - `is_colliding`: transient, cleared and recomputed every tick.
/// - `owner`: optional body this shape belongs to, compared by identity only.
#[derive(Component, Clone, Debug)]
pub struct Collider {
    pub shape: ColliderShape,
    pub is_static: bool,
    pub is_colliding: bool,
    pub owner: Option<Entity>,
}

impl Collider {
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            shape,
            is_static: false,
            is_colliding: false,
            owner: None,
        }
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_owner(mut self, owner: Entity) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    pub fn is_owned_by(&self, body: Entity) -> bool {
        self.owner == Some(body)
    }
}
