//! Transform graph operations on the `World` arena.
//!
//! Every node is an [`Entity`]. The parent link is [`ChildOf`] and the ordered
//! child list is [`Children`], both maintained by bevy's relationship hooks.
//! Local transforms live in [`MapPosition`], [`Rotation`] and [`Scale`]; the
//! world-space result is memoized in [`CachedGlobalTransform`].
//!
//! # Invalidation
//!
//! All local writes must go through the setters in this module
//! ([`set_position`], [`set_rotation`], [`set_scale`], [`translate`],
//! [`rotate_by`]). They mark the node and its whole subtree dirty, so the next
//! [`global_transform`] read recomputes from the root down to the node.
//! Mutating the components directly leaves stale caches behind.

use bevy_ecs::hierarchy::{ChildOf, Children};
use bevy_ecs::prelude::*;
use glam::Vec2;
use log::debug;

use crate::components::collider::Collider;
use crate::components::globaltransform2d::{CachedGlobalTransform, GlobalTransform2D};
use crate::components::mapposition::MapPosition;
use crate::components::movementdelta::MovementDelta;
use crate::components::rotation::Rotation;
use crate::components::scale::Scale;
use crate::error::CollisionError;

/// Spawn a bare node with the given local transform and a dirty cache.
pub fn spawn_node(world: &mut World, position: Vec2, rotation: f32, scale: Vec2) -> Entity {
    world
        .spawn((
            MapPosition::from(position),
            Rotation::new(rotation),
            Scale { scale },
            CachedGlobalTransform::default(),
        ))
        .id()
}

fn exists(world: &World, entity: Entity) -> bool {
    world.get_entity(entity).is_ok()
}

/// Local transform of a node. Missing components read as identity.
pub fn local_transform(world: &World, entity: Entity) -> Option<GlobalTransform2D> {
    if !exists(world, entity) {
        return None;
    }
    Some(GlobalTransform2D {
        position: world
            .get::<MapPosition>(entity)
            .map(|p| p.pos)
            .unwrap_or(Vec2::ZERO),
        rotation: world
            .get::<Rotation>(entity)
            .map(|r| r.radians)
            .unwrap_or(0.0),
        scale: world
            .get::<Scale>(entity)
            .map(|s| s.scale)
            .unwrap_or(Vec2::ONE),
    })
}

/// World-space transform of a node, recomputed only when dirty.
pub fn global_transform(world: &mut World, entity: Entity) -> Option<GlobalTransform2D> {
    if let Some(cache) = world.get::<CachedGlobalTransform>(entity) {
        if !cache.dirty {
            return Some(cache.transform);
        }
    }

    let local = local_transform(world, entity)?;
    let global = match parent_of(world, entity) {
        Some(parent) => {
            let parent_global = global_transform(world, parent).unwrap_or_default();
            local.combine(&parent_global)
        }
        None => local,
    };

    let cache = CachedGlobalTransform {
        transform: global,
        dirty: false,
    };
    if let Ok(mut node) = world.get_entity_mut(entity) {
        node.insert(cache);
    }
    Some(global)
}

pub fn global_position(world: &mut World, entity: Entity) -> Option<Vec2> {
    global_transform(world, entity).map(|t| t.position)
}

/// Move a node so its world-space position becomes `target`.
///
/// The parent's full inverse (rotation and scale) is applied, so this holds
/// for rotated or scaled parents too.
pub fn set_global_position(world: &mut World, entity: Entity, target: Vec2) {
    let local = match parent_of(world, entity).and_then(|p| global_transform(world, p)) {
        Some(parent_global) => parent_global.to_local(target),
        None => target,
    };
    set_position(world, entity, local);
}

/// Mark a node and every descendant dirty.
pub fn invalidate(world: &mut World, entity: Entity) {
    let mut stack = vec![entity];
    while let Some(node) = stack.pop() {
        match world.get_mut::<CachedGlobalTransform>(node) {
            Some(mut cache) => cache.dirty = true,
            None => {
                if let Ok(mut node_mut) = world.get_entity_mut(node) {
                    node_mut.insert(CachedGlobalTransform::default());
                }
            }
        }
        stack.extend(children_of(world, node));
    }
}

/// A node without a cache has never been resolved and counts as dirty.
pub fn is_dirty(world: &World, entity: Entity) -> bool {
    world
        .get::<CachedGlobalTransform>(entity)
        .map(|c| c.dirty)
        .unwrap_or(true)
}

fn write_local<T: Component>(world: &mut World, entity: Entity, value: T) {
    let Ok(mut node) = world.get_entity_mut(entity) else {
        return;
    };
    node.insert(value);
    invalidate(world, entity);
}

pub fn set_position(world: &mut World, entity: Entity, position: Vec2) {
    write_local(world, entity, MapPosition::from(position));
}

pub fn set_rotation(world: &mut World, entity: Entity, radians: f32) {
    write_local(world, entity, Rotation::new(radians));
}

pub fn set_scale(world: &mut World, entity: Entity, scale: Vec2) {
    write_local(world, entity, Scale { scale });
}

pub fn translate(world: &mut World, entity: Entity, delta: Vec2) {
    let Some(local) = local_transform(world, entity) else {
        return;
    };
    set_position(world, entity, local.position + delta);
}

pub fn rotate_by(world: &mut World, entity: Entity, radians: f32) {
    let Some(local) = local_transform(world, entity) else {
        return;
    };
    set_rotation(world, entity, local.rotation + radians);
}

/// Translate and rotate a node by `delta`. Static colliders never move.
pub fn apply_movement(world: &mut World, entity: Entity, delta: MovementDelta) {
    if world
        .get::<Collider>(entity)
        .is_some_and(|collider| collider.is_static)
    {
        return;
    }
    if delta.translation != Vec2::ZERO {
        translate(world, entity, delta.translation);
    }
    if delta.rotation != 0.0 {
        rotate_by(world, entity, delta.rotation);
    }
}

pub fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<ChildOf>(entity).map(|c| c.parent())
}

pub fn children_of(world: &World, entity: Entity) -> Vec<Entity> {
    world
        .get::<Children>(entity)
        .map(|children| children.to_vec())
        .unwrap_or_default()
}

/// Top-most ancestor of `entity` (itself when unattached).
pub fn root_of(world: &World, entity: Entity) -> Entity {
    let mut node = entity;
    while let Some(parent) = parent_of(world, node) {
        node = parent;
    }
    node
}

/// Whether `ancestor` appears on the parent chain of `node`.
pub fn is_ancestor(world: &World, ancestor: Entity, node: Entity) -> bool {
    let mut current = parent_of(world, node);
    while let Some(parent) = current {
        if parent == ancestor {
            return true;
        }
        current = parent_of(world, parent);
    }
    false
}

/// Attach `child` under `parent`, keeping the child's world position.
///
/// Attaching to the current parent is a no-op. A child with another parent is
/// moved. Missing entities, self-parenting and cycles are rejected.
pub fn attach_child(world: &mut World, parent: Entity, child: Entity) -> Result<(), CollisionError> {
    if !exists(world, parent) {
        return Err(CollisionError::invalid(format!("parent {parent} does not exist")));
    }
    if !exists(world, child) {
        return Err(CollisionError::invalid(format!("child {child} does not exist")));
    }
    if parent == child {
        return Err(CollisionError::invalid(format!(
            "entity {child} cannot be its own parent"
        )));
    }
    if is_ancestor(world, child, parent) {
        return Err(CollisionError::invalid(format!(
            "attaching {child} under {parent} would create a cycle"
        )));
    }
    if parent_of(world, child) == Some(parent) {
        return Ok(());
    }

    let saved = global_position(world, child).unwrap_or(Vec2::ZERO);
    world.entity_mut(child).insert(ChildOf(parent));
    world.flush();
    invalidate(world, child);
    set_global_position(world, child, saved);
    debug!("attached {child} to {parent}");
    Ok(())
}

/// Detach `child` from `parent`, keeping its world position.
///
/// Returns `false` (and does nothing) when `child` is not a child of `parent`.
pub fn detach_child(world: &mut World, parent: Entity, child: Entity) -> bool {
    if parent_of(world, child) != Some(parent) {
        return false;
    }

    let saved = global_position(world, child).unwrap_or(Vec2::ZERO);
    world.entity_mut(child).remove::<ChildOf>();
    world.flush();
    invalidate(world, child);
    set_position(world, child, saved);
    debug!("detached {child} from {parent}");
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < EPSILON
    }

    #[test]
    fn root_global_equals_local() {
        let mut world = World::new();
        let node = spawn_node(&mut world, Vec2::new(3.0, 4.0), 0.5, Vec2::new(2.0, 2.0));
        let global = global_transform(&mut world, node).unwrap();
        assert!(vec_approx_eq(global.position, Vec2::new(3.0, 4.0)));
        assert!((global.rotation - 0.5).abs() < EPSILON);
        assert!(!is_dirty(&world, node));
    }

    #[test]
    fn setters_dirty_the_subtree() {
        let mut world = World::new();
        let root = spawn_node(&mut world, Vec2::ZERO, 0.0, Vec2::ONE);
        let child = spawn_node(&mut world, Vec2::new(10.0, 0.0), 0.0, Vec2::ONE);
        attach_child(&mut world, root, child).unwrap();
        global_transform(&mut world, child);
        assert!(!is_dirty(&world, child));

        set_position(&mut world, root, Vec2::new(5.0, 0.0));
        assert!(is_dirty(&world, root));
        assert!(is_dirty(&world, child));
        assert!(vec_approx_eq(
            global_position(&mut world, child).unwrap(),
            Vec2::new(15.0, 0.0)
        ));
    }

    #[test]
    fn missing_entity_has_no_transform() {
        let mut world = World::new();
        let node = world.spawn_empty().id();
        world.despawn(node);
        assert!(global_transform(&mut world, node).is_none());
    }

    #[test]
    fn apply_movement_skips_static_colliders() {
        use crate::components::collider::{CircleShape, ColliderShape};

        let mut world = World::new();
        let node = spawn_node(&mut world, Vec2::ZERO, 0.0, Vec2::ONE);
        world
            .entity_mut(node)
            .insert(Collider::new(ColliderShape::Circle(CircleShape::new(1.0))).with_static(true));
        apply_movement(&mut world, node, MovementDelta::new(Vec2::new(5.0, 5.0), 1.0));
        assert!(vec_approx_eq(global_position(&mut world, node).unwrap(), Vec2::ZERO));

        world.get_mut::<Collider>(node).unwrap().is_static = false;
        apply_movement(&mut world, node, MovementDelta::new(Vec2::new(5.0, 5.0), 1.0));
        let global = global_transform(&mut world, node).unwrap();
        assert!(vec_approx_eq(global.position, Vec2::new(5.0, 5.0)));
        assert!((global.rotation - 1.0).abs() < EPSILON);
    }

    #[test]
    fn root_and_ancestry() {
        let mut world = World::new();
        let a = spawn_node(&mut world, Vec2::ZERO, 0.0, Vec2::ONE);
        let b = spawn_node(&mut world, Vec2::ZERO, 0.0, Vec2::ONE);
        let c = spawn_node(&mut world, Vec2::ZERO, 0.0, Vec2::ONE);
        attach_child(&mut world, a, b).unwrap();
        attach_child(&mut world, b, c).unwrap();
        assert_eq!(root_of(&world, c), a);
        assert!(is_ancestor(&world, a, c));
        assert!(!is_ancestor(&world, c, a));
        assert!(attach_child(&mut world, c, a).is_err());
    }
}
