//! Push distribution between two colliding shapes.
//!
//! Pushes move the *root* of each shape's attachment chain so compound bodies
//! (a character and its attached hitbox) move as one unit.

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::trace;

use crate::components::collider::Collider;
use crate::systems::hierarchy::{root_of, translate};

fn is_static(world: &World, shape: Entity) -> bool {
    world.get::<Collider>(shape).is_some_and(|c| c.is_static)
}

/// Separate `a` and `b` by `push`, which points from A toward B.
///
/// | A       | B       | effect                                   |
/// |---------|---------|------------------------------------------|
/// | dynamic | dynamic | A's root `-= push / 2`, B's root `+= push / 2` |
/// | static  | dynamic | B's root `+= push`                       |
/// | dynamic | static  | A's root `-= push`                       |
/// | static  | static  | nothing                                  |
pub fn apply_push(world: &mut World, a: Entity, b: Entity, push: Vec2) {
    let root_a = root_of(world, a);
    let root_b = root_of(world, b);

    match (is_static(world, a), is_static(world, b)) {
        (false, false) => {
            translate(world, root_a, -push * 0.5);
            translate(world, root_b, push * 0.5);
        }
        (true, false) => translate(world, root_b, push),
        (false, true) => translate(world, root_a, -push),
        (true, true) => {}
    }
    trace!("push {push} applied between {root_a} and {root_b}");
}
