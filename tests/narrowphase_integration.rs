//! Narrow-phase integration tests: resolver table, push distribution, contact
//! normals and collision events.

use std::sync::{Arc, Mutex};

use bevy_ecs::prelude::*;
use glam::Vec2;

use collision_sat::components::collider::Collider;
use collision_sat::components::groundsensor::GroundSensor;
use collision_sat::components::rigidbody::RigidBody;
use collision_sat::components::sweepmover::SweepMover;
use collision_sat::events::collision::CollisionEvent;
use collision_sat::factory::{create_box, create_circle, spawn_shape};
use collision_sat::resources::collisionconfig::CollisionConfig;
use collision_sat::resources::collisionmode::CollisionMode;
use collision_sat::resources::contacts::ContactNormals;
use collision_sat::systems::hierarchy::{attach_child, global_position, spawn_node};
use collision_sat::systems::narrowphase::{PairOutcome, detect_collisions, test_pair};
use collision_sat::systems::step::setup_world;

const EPSILON: f32 = 1e-3;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec_approx_eq(a: Vec2, b: Vec2) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn make_world() -> World {
    setup_world(CollisionConfig::default())
}

#[test]
fn overlapping_boxes_split_push_evenly() {
    let mut world = make_world();
    let a = spawn_shape(&mut world, create_box(40.0, 40.0), Vec2::new(0.0, 0.0), false);
    let b = spawn_shape(&mut world, create_box(40.0, 40.0), Vec2::new(30.0, 0.0), false);

    let outcome = test_pair(&mut world, a, b, CollisionMode::Sat).unwrap();
    let PairOutcome::Push(push) = outcome else {
        panic!("SAT must report a push");
    };
    assert!(approx_eq(push.length(), 10.0));
    assert!(approx_eq(push.y, 0.0));

    assert_eq!(detect_collisions(&mut world, &[a, b]), 1);
    assert!(vec_approx_eq(global_position(&mut world, a).unwrap(), Vec2::new(-5.0, 0.0)));
    assert!(vec_approx_eq(global_position(&mut world, b).unwrap(), Vec2::new(35.0, 0.0)));
}

#[test]
fn circles_collide_only_when_closer_than_radius_sum() {
    let mut world = make_world();
    let a = spawn_shape(&mut world, create_circle(10.0), Vec2::ZERO, false);
    let b = spawn_shape(&mut world, create_circle(10.0), Vec2::new(20.0, 0.0), false);
    let c = spawn_shape(&mut world, create_circle(10.0), Vec2::new(0.0, 19.0), true);

    assert!(test_pair(&mut world, a, b, CollisionMode::Sat).is_none());
    let push = test_pair(&mut world, a, c, CollisionMode::Sat).unwrap().push();
    assert!(vec_approx_eq(push, Vec2::new(0.0, 1.0)));

    // Static `c` keeps its place, `a` takes the whole push.
    detect_collisions(&mut world, &[a, c]);
    assert!(vec_approx_eq(global_position(&mut world, a).unwrap(), Vec2::new(0.0, -1.0)));
    assert!(vec_approx_eq(global_position(&mut world, c).unwrap(), Vec2::new(0.0, 19.0)));
}

#[test]
fn polygon_circle_pairing_in_either_order() {
    let mut world = make_world();
    let wall = spawn_shape(&mut world, create_box(20.0, 200.0), Vec2::new(50.0, 0.0), true);
    let ball = spawn_shape(&mut world, create_circle(10.0), Vec2::new(35.0, 0.0), false);

    let from_wall = test_pair(&mut world, wall, ball, CollisionMode::Sat).unwrap().push();
    let from_ball = test_pair(&mut world, ball, wall, CollisionMode::Sat).unwrap().push();
    assert!(vec_approx_eq(from_wall, -from_ball));
    assert!(vec_approx_eq(from_ball, Vec2::new(5.0, 0.0)));

    detect_collisions(&mut world, &[wall, ball]);
    assert!(vec_approx_eq(global_position(&mut world, ball).unwrap(), Vec2::new(30.0, 0.0)));
}

#[test]
fn ground_sensor_collects_upward_normal() {
    let mut world = make_world();
    let player = spawn_node(&mut world, Vec2::new(100.0, 85.0), 0.0, Vec2::ONE);
    world.entity_mut(player).insert(GroundSensor);
    let hitbox = spawn_shape(&mut world, create_box(40.0, 40.0), Vec2::new(100.0, 85.0), false);
    world.get_mut::<Collider>(hitbox).unwrap().owner = Some(player);
    attach_child(&mut world, player, hitbox).unwrap();
    let ground = spawn_shape(&mut world, create_box(400.0, 20.0), Vec2::new(100.0, 110.0), true);

    assert_eq!(detect_collisions(&mut world, &[hitbox, ground]), 1);

    let contacts = world.resource::<ContactNormals>();
    assert_eq!(contacts.normals_for(player).len(), 1);
    assert!(vec_approx_eq(contacts.normals_for(player)[0], Vec2::new(0.0, -1.0)));
    assert!(contacts.is_touching_ground(player, 0.7));
    assert!(!contacts.is_touching_ceiling(player, 0.7));

    // The push moved the body root, not just the hitbox.
    assert!(vec_approx_eq(
        global_position(&mut world, player).unwrap(),
        Vec2::new(100.0, 80.0)
    ));

    // Resting exactly on the ground: no contact next pass, normals cleared.
    detect_collisions(&mut world, &[hitbox, ground]);
    assert!(world.resource::<ContactNormals>().is_empty());
}

#[test]
fn reflective_owner_bounces_on_overlap() {
    let mut world = make_world();
    let ball = spawn_shape(&mut world, create_circle(10.0), Vec2::new(35.0, 0.0), false);
    world.get_mut::<Collider>(ball).unwrap().owner = Some(ball);
    world.entity_mut(ball).insert((
        RigidBody::with_velocity(Vec2::new(200.0, 0.0)),
        SweepMover::reflective(),
    ));
    let wall = spawn_shape(&mut world, create_box(20.0, 200.0), Vec2::new(50.0, 0.0), true);

    detect_collisions(&mut world, &[ball, wall]);
    let v = world.get::<RigidBody>(ball).unwrap().velocity;
    assert!(v.x < 0.0);
    assert!(approx_eq(v.length(), 210.0));
}

#[test]
fn collision_event_reaches_observer() {
    let mut world = make_world();
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = received.clone();
    world.add_observer(move |trigger: On<CollisionEvent>| {
        received_clone.lock().unwrap().push(*trigger.event());
    });
    world.flush();

    let a = spawn_shape(&mut world, create_box(40.0, 40.0), Vec2::ZERO, false);
    let b = spawn_shape(&mut world, create_box(40.0, 40.0), Vec2::new(30.0, 0.0), false);
    detect_collisions(&mut world, &[a, b]);

    let events = received.lock().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].a, a);
    assert_eq!(events[0].b, b);
    assert!(approx_eq(events[0].push.length(), 10.0));
}

#[test]
fn diags_mode_separates_shallow_overlap_and_reports_zero_push() {
    let mut world = make_world();
    world.insert_resource(CollisionMode::Diags);
    let received = Arc::new(Mutex::new(Vec::new()));
    let received_clone = received.clone();
    world.add_observer(move |trigger: On<CollisionEvent>| {
        received_clone.lock().unwrap().push(trigger.event().push);
    });
    world.flush();

    let a = spawn_shape(&mut world, create_box(20.0, 20.0), Vec2::ZERO, false);
    let b = spawn_shape(&mut world, create_box(20.0, 20.0), Vec2::new(15.0, 0.0), false);

    assert_eq!(detect_collisions(&mut world, &[a, b]), 1);
    assert!(global_position(&mut world, a).unwrap().x < 0.0);
    assert!(global_position(&mut world, b).unwrap().x > 15.0);
    assert_eq!(received.lock().unwrap()[0], Vec2::ZERO);
}

#[test]
fn colliding_flags_track_current_pass() {
    let mut world = make_world();
    let a = spawn_shape(&mut world, create_circle(10.0), Vec2::ZERO, true);
    let b = spawn_shape(&mut world, create_circle(10.0), Vec2::new(15.0, 0.0), true);

    detect_collisions(&mut world, &[a, b]);
    assert!(world.get::<Collider>(a).unwrap().is_colliding);
    assert!(world.get::<Collider>(b).unwrap().is_colliding);

    // Both static: still overlapping, still flagged, never moved.
    detect_collisions(&mut world, &[a, b]);
    assert!(world.get::<Collider>(a).unwrap().is_colliding);
    assert!(vec_approx_eq(global_position(&mut world, b).unwrap(), Vec2::new(15.0, 0.0)));
}
