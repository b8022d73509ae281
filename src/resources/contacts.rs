//! Contact normals gathered for ground-sensitive bodies.
//!
//! During the narrow-phase pass, every hit involving a shape owned by a
//! [`GroundSensor`](crate::components::groundsensor::GroundSensor) body records
//! the contact normal here. Normals point from the obstacle toward the body, so
//! with the y-down screen convention a floor contributes roughly `(0, -1)`.
//!
//! Footing decisions (jumping, coyote time) belong to game code; the helpers
//! below only apply an angle threshold.

use bevy_ecs::prelude::*;
use glam::Vec2;
use rustc_hash::FxHashMap;

#[derive(Resource, Debug, Clone, Default)]
pub struct ContactNormals {
    normals: FxHashMap<Entity, Vec<Vec2>>,
}

impl ContactNormals {
    pub fn clear(&mut self) {
        self.normals.clear();
    }

    pub fn push(&mut self, body: Entity, normal: Vec2) {
        self.normals.entry(body).or_default().push(normal);
    }

    /// Normals recorded for `body` this tick.
    pub fn normals_for(&self, body: Entity) -> &[Vec2] {
        self.normals.get(&body).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when some normal points up more steeply than `threshold`.
    pub fn is_touching_ground(&self, body: Entity, threshold: f32) -> bool {
        self.normals_for(body).iter().any(|n| n.y < -threshold)
    }

    /// True when some normal points down more steeply than `threshold`.
    pub fn is_touching_ceiling(&self, body: Entity, threshold: f32) -> bool {
        self.normals_for(body).iter().any(|n| n.y > threshold)
    }

    pub fn is_empty(&self) -> bool {
        self.normals.values().all(Vec::is_empty)
    }
}
