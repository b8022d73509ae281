//! Continuous sweep solver.
//!
//! Moves a body along a desired displacement as a point sweep. The path is
//! tested against every polygon obstacle's edges, the earliest crossing stops
//! the body, its velocity gets a response, and the leftover (shortened) time is
//! re-swept. A fixed collision cap bounds the work per call.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::{debug, warn};

use crate::collision::response::{ReflectParams, reflect, slide};
use crate::collision::segment::{edges, segment_intersection};
use crate::components::collider::{Collider, ColliderShape};
use crate::components::rigidbody::RigidBody;
use crate::components::sweepmover::{SweepMover, SweepResponse};
use crate::resources::collisionconfig::CollisionConfig;
use crate::systems::hierarchy::{global_position, global_transform, is_ancestor, set_global_position};

/// Earliest crossing of a sweep path with an obstacle edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    /// Path parameter in `[0, 1)`.
    pub t: f32,
    pub point: Vec2,
    /// Unit edge normal pointing out of the obstacle, away from its origin.
    pub normal: Vec2,
    pub obstacle: Entity,
}

/// Find the earliest crossing of `from → to` with any polygon in `obstacles`.
///
/// Only crossings entering an obstacle count, so a path starting inside a
/// polygon can leave it freely. Circles are not sweep targets.
pub fn sweep_segment(
    world: &mut World,
    from: Vec2,
    to: Vec2,
    obstacles: &[Entity],
) -> Option<SweepHit> {
    let travel = to - from;
    let mut best: Option<SweepHit> = None;

    for &obstacle in obstacles {
        let Some(ColliderShape::Polygon(polygon)) =
            world.get::<Collider>(obstacle).map(|c| c.shape.clone())
        else {
            continue;
        };
        let Some(global) = global_transform(world, obstacle) else {
            continue;
        };
        let points = polygon.boundary_points(&global);

        for (p1, p2) in edges(&points) {
            let Some(hit) = segment_intersection(from, to, p1, p2) else {
                continue;
            };
            if best.is_some_and(|b| b.t <= hit.t) {
                continue;
            }
            let point = from.lerp(to, hit.t);
            let mut normal = (p2 - p1).perp().normalize_or_zero();
            if normal.dot(point - global.position) < 0.0 {
                normal = -normal;
            }
            // Leaving the obstacle is not a hit.
            if normal.dot(travel) >= 0.0 {
                continue;
            }
            best = Some(SweepHit {
                t: hit.t,
                point,
                normal,
                obstacle,
            });
        }
    }
    best
}

/// Obstacles a mover may hit: not itself, not its own attached shapes.
fn sweep_targets(world: &World, mover: Entity, colliders: &[Entity]) -> Vec<Entity> {
    colliders
        .iter()
        .copied()
        .filter(|&e| e != mover && !is_ancestor(world, mover, e))
        .filter(|&e| {
            world
                .get::<Collider>(e)
                .is_some_and(|c| !c.is_owned_by(mover))
        })
        .collect()
}

fn respond(world: &mut World, mover: Entity, normal: Vec2, params: &ReflectParams) -> Vec2 {
    let response = world
        .get::<SweepMover>(mover)
        .map(|m| m.response)
        .unwrap_or_default();
    let Some(mut body) = world.get_mut::<RigidBody>(mover) else {
        return Vec2::ZERO;
    };
    body.velocity = match response {
        SweepResponse::Reflective => reflect(body.velocity, normal, params),
        SweepResponse::Sliding => slide(body.velocity, normal),
    };
    body.velocity
}

/// Sweep `mover` by `desired` against `colliders` over a tick of `dt` seconds.
///
/// Returns whether any collision occurred. After each hit the mover rests
/// `contact_skin` in front of the impact point, its velocity is reflected or
/// slid according to its [`SweepResponse`], and the remaining path becomes
/// `velocity * dt * (1 - hits * time_decay)`. When the collision cap is reached
/// the mover stays at its last impact point and the residual motion is
/// dropped. A cap of zero disables sweeping: the mover moves straight to its
/// target.
pub fn try_sweep_move(
    world: &mut World,
    mover: Entity,
    desired: Vec2,
    colliders: &[Entity],
    dt: f32,
) -> bool {
    let config = world
        .get_resource::<CollisionConfig>()
        .cloned()
        .unwrap_or_default();
    let params = ReflectParams::from_config(&config);
    let targets = sweep_targets(world, mover, colliders);

    let Some(mut from) = global_position(world, mover) else {
        return false;
    };
    let mut to = from + desired;
    if config.max_sweep_collisions == 0 {
        set_global_position(world, mover, to);
        return false;
    }
    let mut collisions = 0u32;

    while collisions < config.max_sweep_collisions {
        let Some(hit) = sweep_segment(world, from, to, &targets) else {
            set_global_position(world, mover, to);
            return collisions > 0;
        };
        collisions += 1;

        let resting = hit.point + hit.normal * config.contact_skin;
        set_global_position(world, mover, resting);
        let velocity = respond(world, mover, hit.normal, &params);
        debug!(
            "sweep hit: {mover} against {} at {} (normal {}, velocity {velocity})",
            hit.obstacle, hit.point, hit.normal
        );

        from = global_position(world, mover).unwrap_or(resting);
        let remaining = (dt * (1.0 - collisions as f32 * config.sweep_time_decay)).max(0.0);
        to = from + velocity * remaining;
    }

    warn!(
        "{mover} hit the sweep cap of {} collisions; residual motion dropped",
        config.max_sweep_collisions
    );
    true
}
