//! Pairwise narrow phase.
//!
//! Every unordered pair of collider entities is dispatched on its
//! `(ShapeKind, ShapeKind)` pair to the matching resolver in
//! [`crate::collision`]. Hits are resolved immediately, so later pairs in the
//! same pass see the corrected positions.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::collision::circle::circle_circle;
use crate::collision::diags::{DiagonalPushes, diagonal_pushes};
use crate::collision::response::{ReflectParams, reflect};
use crate::collision::sat::{circle_polygon, polygon_polygon};
use crate::components::collider::{Collider, ColliderShape};
use crate::components::globaltransform2d::GlobalTransform2D;
use crate::components::groundsensor::GroundSensor;
use crate::components::rigidbody::RigidBody;
use crate::components::sweepmover::{SweepMover, SweepResponse};
use crate::events::collision::CollisionEvent;
use crate::resources::collisionconfig::CollisionConfig;
use crate::resources::collisionmode::CollisionMode;
use crate::resources::contacts::ContactNormals;
use crate::systems::hierarchy::{global_transform, set_global_position};
use crate::systems::resolution::apply_push;

/// Which shape of a pair a body owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PairSide {
    A,
    B,
}

/// Result of a narrow-phase hit, after it has been resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PairOutcome {
    /// Minimum translation from A toward B, distributed by [`apply_push`].
    Push(Vec2),
    /// Diagonal displacements, applied to each shape's own node.
    Diagonal(DiagonalPushes),
}

impl PairOutcome {
    /// Push reported in [`CollisionEvent`]. Zero for diagonal hits.
    pub fn push(&self) -> Vec2 {
        match self {
            PairOutcome::Push(push) => *push,
            PairOutcome::Diagonal(_) => Vec2::ZERO,
        }
    }

    /// Unit contact normal pointing from the other shape toward `side`.
    pub fn normal_for(&self, side: PairSide) -> Option<Vec2> {
        let direction = match (self, side) {
            (PairOutcome::Push(push), PairSide::A) => -*push,
            (PairOutcome::Push(push), PairSide::B) => *push,
            (PairOutcome::Diagonal(d), PairSide::A) => d.a,
            (PairOutcome::Diagonal(d), PairSide::B) => d.b,
        };
        direction.try_normalize()
    }
}

fn snapshot(world: &mut World, shape: Entity) -> Option<(ColliderShape, GlobalTransform2D)> {
    let collider = world.get::<Collider>(shape)?.shape.clone();
    let global = global_transform(world, shape)?;
    Some((collider, global))
}

/// Test one pair and compute its separation, without moving anything.
pub fn test_pair(
    world: &mut World,
    a: Entity,
    b: Entity,
    mode: CollisionMode,
) -> Option<PairOutcome> {
    let (shape_a, ga) = snapshot(world, a)?;
    let (shape_b, gb) = snapshot(world, b)?;

    match (&shape_a, &shape_b) {
        (ColliderShape::Circle(ca), ColliderShape::Circle(cb)) => {
            circle_circle(ga.position, ca.radius, gb.position, cb.radius)
                .map(|p| PairOutcome::Push(p.push()))
        }
        (ColliderShape::Circle(circle), ColliderShape::Polygon(polygon)) => circle_polygon(
            ga.position,
            circle.radius,
            &polygon.boundary_points(&gb),
            gb.position,
        )
        .map(|p| PairOutcome::Push(p.push())),
        (ColliderShape::Polygon(polygon), ColliderShape::Circle(circle)) => circle_polygon(
            gb.position,
            circle.radius,
            &polygon.boundary_points(&ga),
            ga.position,
        )
        .map(|p| PairOutcome::Push(p.reversed().push())),
        (ColliderShape::Polygon(pa), ColliderShape::Polygon(pb)) => {
            let points_a = pa.boundary_points(&ga);
            let points_b = pb.boundary_points(&gb);
            match mode {
                CollisionMode::Sat => {
                    polygon_polygon(&points_a, ga.position, &points_b, gb.position)
                        .map(|p| PairOutcome::Push(p.push()))
                }
                CollisionMode::Diags => {
                    diagonal_pushes(ga.position, &points_a, gb.position, &points_b)
                        .map(PairOutcome::Diagonal)
                }
            }
        }
    }
}

fn displace_unless_static(world: &mut World, shape: Entity, delta: Vec2) {
    if delta == Vec2::ZERO || world.get::<Collider>(shape).is_none_or(|c| c.is_static) {
        return;
    }
    if let Some(global) = global_transform(world, shape) {
        set_global_position(world, shape, global.position + delta);
    }
}

/// Test one pair and, on a hit, separate the shapes.
pub fn resolve_pair(
    world: &mut World,
    a: Entity,
    b: Entity,
    mode: CollisionMode,
) -> Option<PairOutcome> {
    let outcome = test_pair(world, a, b, mode)?;
    match outcome {
        PairOutcome::Push(push) => apply_push(world, a, b, push),
        PairOutcome::Diagonal(pushes) => {
            displace_unless_static(world, a, pushes.a);
            displace_unless_static(world, b, pushes.b);
        }
    }
    Some(outcome)
}

fn set_colliding(world: &mut World, shape: Entity, value: bool) {
    if let Some(mut collider) = world.get_mut::<Collider>(shape) {
        collider.is_colliding = value;
    }
}

fn owner_of(world: &World, shape: Entity) -> Option<Entity> {
    world.get::<Collider>(shape).and_then(|c| c.owner)
}

/// Record ground-sensor contacts and bounce reflective bodies for one hit.
fn notify_owners(
    world: &mut World,
    a: Entity,
    b: Entity,
    outcome: &PairOutcome,
    params: &ReflectParams,
) {
    let owner_a = owner_of(world, a);
    let owner_b = owner_of(world, b);
    let mut bodies = Vec::with_capacity(2);
    if let Some(body) = owner_a {
        bodies.push((body, PairSide::A));
    }
    if let Some(body) = owner_b.filter(|body| Some(*body) != owner_a) {
        bodies.push((body, PairSide::B));
    }

    for (body, side) in bodies {
        let Some(normal) = outcome.normal_for(side) else {
            continue;
        };

        if world.get::<GroundSensor>(body).is_some() {
            world
                .get_resource_or_insert_with(ContactNormals::default)
                .push(body, normal);
        }

        let reflective = world
            .get::<SweepMover>(body)
            .is_some_and(|m| m.response == SweepResponse::Reflective);
        if reflective {
            if let Some(mut rb) = world.get_mut::<RigidBody>(body) {
                if rb.velocity.dot(normal) < 0.0 {
                    rb.velocity = reflect(rb.velocity, normal, params);
                }
            }
        }
    }
}

/// Run the narrow phase over `shapes` (in the given order).
///
/// Clears every `is_colliding` flag and the gathered [`ContactNormals`], then
/// tests every pair `i < j`. Returns the number of hits.
pub fn detect_collisions(world: &mut World, shapes: &[Entity]) -> usize {
    let mode = world
        .get_resource::<CollisionMode>()
        .copied()
        .unwrap_or_default();
    let params = world
        .get_resource::<CollisionConfig>()
        .map(ReflectParams::from_config)
        .unwrap_or_default();

    for &shape in shapes {
        set_colliding(world, shape, false);
    }
    world
        .get_resource_or_insert_with(ContactNormals::default)
        .clear();

    let mut hits = 0;
    for (i, &a) in shapes.iter().enumerate() {
        for &b in &shapes[i + 1..] {
            let Some(outcome) = resolve_pair(world, a, b, mode) else {
                continue;
            };
            hits += 1;
            trace!("{mode} hit between {a} and {b}: {outcome:?}");

            set_colliding(world, a, true);
            set_colliding(world, b, true);
            notify_owners(world, a, b, &outcome, &params);
            world.trigger(CollisionEvent {
                a,
                b,
                push: outcome.push(),
            });
        }
    }
    hits
}
