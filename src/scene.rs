//! JSON scene descriptions.
//!
//! A scene is a flat list of named nodes. Positions are world-space placements:
//! nodes with a `parent` are attached afterwards with
//! [`attach_child`], which keeps their world position. Shape owners are
//! resolved by name once every node exists.
//!
//! ```json
//! {
//!   "mode": "sat",
//!   "nodes": [
//!     { "name": "player", "position": [400, 300], "ground_sensor": true,
//!       "body": { "forces": { "gravity": [0, 500] }, "sweep": "sliding" } },
//!     { "name": "player_box", "position": [400, 300], "parent": "player",
//!       "collider": { "kind": "box", "width": 40, "height": 40, "owner": "player" } }
//!   ]
//! }
//! ```

use std::path::Path;

use bevy_ecs::prelude::*;
use glam::Vec2;
use log::info;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::components::anchor::Anchor;
use crate::components::collider::{Collider, ColliderShape, PolygonShape};
use crate::components::groundsensor::GroundSensor;
use crate::components::rigidbody::RigidBody;
use crate::components::sweepmover::{SweepMover, SweepResponse};
use crate::error::CollisionError;
use crate::factory;
use crate::resources::collisionmode::CollisionMode;
use crate::systems::hierarchy::{attach_child, spawn_node};
use crate::systems::step::set_collision_mode;

fn default_scale() -> Vec2 {
    Vec2::ONE
}

fn default_size() -> f32 {
    factory::DEFAULT_SHAPE_SIZE
}

/// Geometry of a collider, tagged by `kind`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeDescription {
    Circle {
        radius: f32,
    },
    Box {
        width: f32,
        height: f32,
    },
    Triangle {
        #[serde(default = "default_size")]
        size: f32,
    },
    Square {
        #[serde(default = "default_size")]
        size: f32,
    },
    Pentagon {
        #[serde(default = "default_size")]
        size: f32,
    },
    RegularPolygon {
        sides: usize,
        radius: f32,
    },
    Polygon {
        points: Vec<Vec2>,
    },
}

impl ShapeDescription {
    pub fn build(&self) -> Result<ColliderShape, CollisionError> {
        Ok(match self {
            ShapeDescription::Circle { radius } => factory::create_circle(*radius),
            ShapeDescription::Box { width, height } => factory::create_box(*width, *height),
            ShapeDescription::Triangle { size } => factory::create_triangle(*size),
            ShapeDescription::Square { size } => factory::create_square(*size),
            ShapeDescription::Pentagon { size } => factory::create_pentagon(*size),
            ShapeDescription::RegularPolygon { sides, radius } => {
                factory::create_regular_polygon(*sides, *radius)?
            }
            ShapeDescription::Polygon { points } => {
                if points.len() < 3 {
                    return Err(CollisionError::invalid(format!(
                        "a polygon needs at least 3 points, got {}",
                        points.len()
                    )));
                }
                ColliderShape::Polygon(PolygonShape::new(points.clone()))
            }
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ColliderDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,
    #[serde(default)]
    pub is_static: bool,
    /// Name of the body node this shape belongs to.
    #[serde(default)]
    pub owner: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BodyDescription {
    #[serde(default)]
    pub velocity: Vec2,
    /// Named acceleration forces, all enabled.
    #[serde(default)]
    pub forces: FxHashMap<String, Vec2>,
    /// Continuous sweep response; `None` leaves the body unswept.
    #[serde(default)]
    pub sweep: Option<SweepResponse>,
    #[serde(default)]
    pub frozen: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NodeDescription {
    pub name: String,
    #[serde(default)]
    pub position: Vec2,
    /// Radians.
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "default_scale")]
    pub scale: Vec2,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub anchor: Option<Anchor>,
    #[serde(default)]
    pub collider: Option<ColliderDescription>,
    #[serde(default)]
    pub body: Option<BodyDescription>,
    #[serde(default)]
    pub ground_sensor: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    /// Overrides the configured collision mode when present.
    #[serde(default)]
    pub mode: Option<CollisionMode>,
    pub nodes: Vec<NodeDescription>,
}

/// Entities spawned for a scene, by node name.
pub type SceneHandles = FxHashMap<String, Entity>;

/// Read and parse a scene file.
pub fn load_scene(path: impl AsRef<Path>) -> Result<SceneDescription, CollisionError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;
    let scene: SceneDescription = serde_json::from_str(&contents)?;
    info!("Loaded scene {:?} with {} nodes", path, scene.nodes.len());
    Ok(scene)
}

fn lookup(handles: &SceneHandles, name: &str, role: &str, node: &str) -> Result<Entity, CollisionError> {
    handles.get(name).copied().ok_or_else(|| {
        CollisionError::invalid(format!("node '{node}' names unknown {role} '{name}'"))
    })
}

fn spawn_description(world: &mut World, node: &NodeDescription) -> Result<Entity, CollisionError> {
    let entity = spawn_node(world, node.position, node.rotation, node.scale);
    let mut entity_mut = world.entity_mut(entity);

    if let Some(anchor) = node.anchor {
        entity_mut.insert(anchor);
    }
    if let Some(desc) = &node.collider {
        entity_mut.insert(Collider::new(desc.shape.build()?).with_static(desc.is_static));
    }
    if let Some(body) = &node.body {
        let mut rb = RigidBody::with_velocity(body.velocity);
        for (name, value) in &body.forces {
            rb.add_force(name, *value);
        }
        rb.frozen = body.frozen;
        entity_mut.insert(rb);
        if let Some(response) = body.sweep {
            entity_mut.insert(SweepMover::new(response));
        }
    }
    if node.ground_sensor {
        entity_mut.insert(GroundSensor);
    }
    Ok(entity)
}

/// Spawn every node of `scene` into `world`.
///
/// Fails on duplicate names, unknown parent or owner names, invalid shapes, or
/// parent links forming a cycle. Nodes spawned before a failure are left in
/// the world.
pub fn spawn_scene(world: &mut World, scene: &SceneDescription) -> Result<SceneHandles, CollisionError> {
    let mut handles = SceneHandles::default();
    for node in &scene.nodes {
        if handles.contains_key(&node.name) {
            return Err(CollisionError::invalid(format!(
                "duplicate node name '{}'",
                node.name
            )));
        }
        let entity = spawn_description(world, node)?;
        handles.insert(node.name.clone(), entity);
    }

    for node in &scene.nodes {
        let Some(parent_name) = &node.parent else {
            continue;
        };
        let parent = lookup(&handles, parent_name, "parent", &node.name)?;
        attach_child(world, parent, handles[&node.name])?;
    }

    for node in &scene.nodes {
        let Some(owner_name) = node.collider.as_ref().and_then(|c| c.owner.as_ref()) else {
            continue;
        };
        let owner = lookup(&handles, owner_name, "owner", &node.name)?;
        if let Some(mut collider) = world.get_mut::<Collider>(handles[&node.name]) {
            collider.owner = Some(owner);
        }
    }

    if let Some(mode) = scene.mode {
        set_collision_mode(world, mode);
    }
    info!("Spawned {} scene nodes", handles.len());
    Ok(handles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::hierarchy::{global_position, parent_of};

    const SCENE: &str = r#"{
        "mode": "diags",
        "nodes": [
            { "name": "player", "position": [400, 300], "ground_sensor": true,
              "body": { "forces": { "gravity": [0, 500] }, "sweep": "sliding" } },
            { "name": "player_box", "position": [400, 300], "parent": "player",
              "collider": { "kind": "box", "width": 40, "height": 40, "owner": "player" } },
            { "name": "ground", "position": [400, 580],
              "collider": { "kind": "box", "width": 800, "height": 20, "is_static": true } },
            { "name": "pentagon", "position": [500, 332],
              "collider": { "kind": "pentagon", "size": 50, "is_static": true } }
        ]
    }"#;

    #[test]
    fn spawns_and_links_nodes() {
        let scene: SceneDescription = serde_json::from_str(SCENE).unwrap();
        let mut world = World::new();
        let handles = spawn_scene(&mut world, &scene).unwrap();

        let player = handles["player"];
        let player_box = handles["player_box"];
        assert_eq!(parent_of(&world, player_box), Some(player));
        assert_eq!(
            global_position(&mut world, player_box).unwrap(),
            Vec2::new(400.0, 300.0)
        );
        assert!(world.get::<Collider>(player_box).unwrap().is_owned_by(player));
        assert!(world.get::<GroundSensor>(player).is_some());
        assert_eq!(
            world.get::<SweepMover>(player).unwrap().response,
            SweepResponse::Sliding
        );
        assert!(world.get::<RigidBody>(player).unwrap().is_force_enabled("gravity"));
        assert!(world.get::<Collider>(handles["ground"]).unwrap().is_static);
        assert_eq!(*world.resource::<CollisionMode>(), CollisionMode::Diags);
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let scene: SceneDescription = serde_json::from_str(
            r#"{ "nodes": [ { "name": "a", "parent": "ghost" } ] }"#,
        )
        .unwrap();
        let mut world = World::new();
        assert!(matches!(
            spawn_scene(&mut world, &scene),
            Err(CollisionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn degenerate_polygon_is_rejected() {
        let scene: SceneDescription = serde_json::from_str(
            r#"{ "nodes": [ { "name": "a",
                "collider": { "kind": "polygon", "points": [[0, 0], [1, 0]] } } ] }"#,
        )
        .unwrap();
        let mut world = World::new();
        assert!(spawn_scene(&mut world, &scene).is_err());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let scene: SceneDescription = serde_json::from_str(
            r#"{ "nodes": [ { "name": "a" }, { "name": "a" } ] }"#,
        )
        .unwrap();
        let mut world = World::new();
        assert!(spawn_scene(&mut world, &scene).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_scene("./no/such/scene.json"),
            Err(CollisionError::Io(_))
        ));
    }
}
