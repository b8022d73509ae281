//! Shape constructors and spawn helpers.
//!
//! Polygon layouts are given in model space around the node origin. Spawned
//! shapes carry the full set of local transform components and a dirty
//! transform cache.

use bevy_ecs::prelude::*;
use glam::Vec2;

use crate::components::collider::{CircleShape, Collider, ColliderShape, PolygonShape};
use crate::error::CollisionError;
use crate::systems::hierarchy::spawn_node;

/// Default edge scale of the triangle, square and pentagon helpers.
pub const DEFAULT_SHAPE_SIZE: f32 = 40.0;

/// Axis-aligned `width × height` box centred on the origin.
pub fn create_box(width: f32, height: f32) -> ColliderShape {
    let (hw, hh) = (width / 2.0, height / 2.0);
    ColliderShape::Polygon(PolygonShape::new(vec![
        Vec2::new(-hw, -hh),
        Vec2::new(hw, -hh),
        Vec2::new(hw, hh),
        Vec2::new(-hw, hh),
    ]))
}

/// Upward-pointing triangle with its apex `size` above the origin.
pub fn create_triangle(size: f32) -> ColliderShape {
    ColliderShape::Polygon(PolygonShape::new(vec![
        Vec2::new(0.0, -size),
        Vec2::new(size * 0.87, size * 0.5),
        Vec2::new(-size * 0.87, size * 0.5),
    ]))
}

/// Vertex `i` at angle `i * 2π / sides`, at distance `radius` from the origin.
pub fn create_regular_polygon(sides: usize, radius: f32) -> Result<ColliderShape, CollisionError> {
    if sides < 3 {
        return Err(CollisionError::invalid(format!(
            "a regular polygon needs at least 3 sides, got {sides}"
        )));
    }
    Ok(regular(sides, radius))
}

/// Regular 4-gon: a diamond with vertices on the axes.
pub fn create_square(size: f32) -> ColliderShape {
    regular(4, size)
}

pub fn create_pentagon(size: f32) -> ColliderShape {
    regular(5, size)
}

fn regular(sides: usize, radius: f32) -> ColliderShape {
    let step = std::f32::consts::TAU / sides as f32;
    ColliderShape::Polygon(PolygonShape::new(
        (0..sides)
            .map(|i| Vec2::from_angle(i as f32 * step) * radius)
            .collect::<Vec<_>>(),
    ))
}

pub fn create_circle(radius: f32) -> ColliderShape {
    ColliderShape::Circle(CircleShape::new(radius))
}

/// Spawn a shape node at `position` (local, so world space for roots).
pub fn spawn_shape(world: &mut World, shape: ColliderShape, position: Vec2, is_static: bool) -> Entity {
    let entity = spawn_node(world, position, 0.0, Vec2::ONE);
    world
        .entity_mut(entity)
        .insert(Collider::new(shape).with_static(is_static));
    entity
}
