//! Per-tick entry point.
//!
//! [`step`] advances the simulation by one tick on a world prepared with
//! [`setup_world`]:
//!
//! 1. advance [`WorldTime`];
//! 2. sweep every unfrozen [`SweepMover`] body (forces integrated first,
//!    pending intent consumed);
//! 3. run the pairwise narrow phase over every collider.
//!
//! Entities are processed in `Entity` order so runs are reproducible.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::collider::Collider;
use crate::components::rigidbody::RigidBody;
use crate::components::sweepmover::SweepMover;
use crate::resources::collisionconfig::CollisionConfig;
use crate::resources::collisionmode::CollisionMode;
use crate::resources::contacts::ContactNormals;
use crate::resources::worldtime::WorldTime;
use crate::systems::hierarchy::rotate_by;
use crate::systems::narrowphase::detect_collisions;
use crate::systems::sweep::try_sweep_move;
use crate::systems::time::update_world_time;

/// Summary of one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Movers whose sweep hit at least one obstacle.
    pub swept_hits: usize,
    /// Narrow-phase pair hits.
    pub pair_hits: usize,
}

/// Create a world holding every resource the step reads.
pub fn setup_world(config: CollisionConfig) -> World {
    let mut world = World::new();
    world.insert_resource(config.mode);
    world.insert_resource(config);
    world.insert_resource(WorldTime::default());
    world.insert_resource(ContactNormals::default());
    world
}

/// Switch the polygon–polygon resolver.
pub fn set_collision_mode(world: &mut World, mode: CollisionMode) {
    let previous = world.get_resource::<CollisionMode>().copied();
    if previous != Some(mode) {
        debug!("collision mode: {mode}");
    }
    world.insert_resource(mode);
}

fn sorted<F: bevy_ecs::query::QueryFilter>(world: &mut World) -> Vec<Entity> {
    let mut entities: Vec<Entity> = world
        .query_filtered::<Entity, F>()
        .iter(world)
        .collect();
    entities.sort();
    entities
}

fn advance_mover(world: &mut World, mover: Entity, colliders: &[Entity], dt: f32) -> bool {
    let intent = world
        .get_mut::<SweepMover>(mover)
        .map(|mut m| m.take_intent())
        .unwrap_or_default();

    let velocity = {
        let Some(mut body) = world.get_mut::<RigidBody>(mover) else {
            return false;
        };
        if body.frozen {
            return false;
        }
        body.integrate_forces(dt);
        body.velocity
    };

    if intent.rotation != 0.0 {
        rotate_by(world, mover, intent.rotation);
    }
    let desired: Vec2 = intent.translation + velocity * dt;
    try_sweep_move(world, mover, desired, colliders, dt)
}

/// Advance the world by `dt` seconds (scaled by `WorldTime::time_scale`).
pub fn step(world: &mut World, dt: f32) -> StepReport {
    let dt = update_world_time(world, dt);

    let colliders = sorted::<With<Collider>>(world);
    let movers = sorted::<(With<SweepMover>, With<RigidBody>)>(world);

    let swept_hits = movers
        .iter()
        .filter(|&&mover| advance_mover(world, mover, &colliders, dt))
        .count();
    let pair_hits = detect_collisions(world, &colliders);

    StepReport {
        swept_hits,
        pair_hits,
    }
}
