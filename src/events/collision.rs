//! Collision event type.
//!
//! The frame step triggers [`CollisionEvent`] for every narrow-phase hit, after
//! the push has been resolved. Observers can subscribe to react in a decoupled
//! manner (sounds, damage, debug overlays). The core never depends on an
//! observer being present.
use bevy_ecs::prelude::*;
use glam::Vec2;

/// Event fired when two shapes overlap.
///
/// `push` is the minimum translation oriented from `a` toward `b`. It is zero
/// for hits found in [`CollisionMode::Diags`](crate::resources::collisionmode::CollisionMode::Diags),
/// which moves each shape along its own diagonals instead.
#[derive(Event, Debug, Clone, Copy)]
pub struct CollisionEvent {
    pub a: Entity,
    pub b: Entity,
    pub push: Vec2,
}
