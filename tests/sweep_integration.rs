//! Continuous sweep solver integration tests.

use bevy_ecs::prelude::*;
use glam::Vec2;

use collision_sat::components::rigidbody::RigidBody;
use collision_sat::components::sweepmover::SweepMover;
use collision_sat::factory::{create_box, create_circle, spawn_shape};
use collision_sat::resources::collisionconfig::CollisionConfig;
use collision_sat::systems::hierarchy::{attach_child, global_position, spawn_node};
use collision_sat::systems::step::setup_world;
use collision_sat::systems::sweep::try_sweep_move;

const EPSILON: f32 = 1e-2;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn mover(world: &mut World, pos: Vec2, velocity: Vec2, sweep: SweepMover) -> Entity {
    let e = spawn_node(world, pos, 0.0, Vec2::ONE);
    world
        .entity_mut(e)
        .insert((RigidBody::with_velocity(velocity), sweep));
    e
}

fn wall(world: &mut World, center: Vec2, width: f32, height: f32) -> Entity {
    spawn_shape(world, create_box(width, height), center, true)
}

#[test]
fn ball_reflects_off_vertical_wall() {
    let mut world = setup_world(CollisionConfig::default());
    let ball = mover(&mut world, Vec2::ZERO, Vec2::new(200.0, 0.0), SweepMover::reflective());
    let w = wall(&mut world, Vec2::new(60.0, 0.0), 20.0, 200.0);

    assert!(try_sweep_move(&mut world, ball, Vec2::new(100.0, 0.0), &[w], 0.5));

    let v = world.get::<RigidBody>(ball).unwrap().velocity;
    assert!(v.x < 0.0, "expected negative x velocity, got {v}");
    assert!(approx_eq(v.length(), 200.0 * 1.05));
    assert!(global_position(&mut world, ball).unwrap().x < 50.0);
}

#[test]
fn reflected_speed_is_capped() {
    let mut config = CollisionConfig::default();
    config.max_speed = 150.0;
    let mut world = setup_world(config);
    let ball = mover(&mut world, Vec2::ZERO, Vec2::new(200.0, 0.0), SweepMover::reflective());
    let w = wall(&mut world, Vec2::new(60.0, 0.0), 20.0, 200.0);

    try_sweep_move(&mut world, ball, Vec2::new(100.0, 0.0), &[w], 0.5);
    let v = world.get::<RigidBody>(ball).unwrap().velocity;
    assert!(approx_eq(v.length(), 150.0));
}

#[test]
fn sliding_mover_keeps_tangential_motion_along_floor() {
    let mut world = setup_world(CollisionConfig::default());
    let player = mover(&mut world, Vec2::ZERO, Vec2::new(100.0, 100.0), SweepMover::sliding());
    let floor = wall(&mut world, Vec2::new(0.0, 20.0), 1000.0, 20.0);

    assert!(try_sweep_move(&mut world, player, Vec2::new(100.0, 100.0), &[floor], 1.0));

    let pos = global_position(&mut world, player).unwrap();
    assert!(pos.y < 10.0);
    assert!(approx_eq(pos.x, 90.0));
    let v = world.get::<RigidBody>(player).unwrap().velocity;
    assert!(approx_eq(v.x, 100.0));
    assert!(approx_eq(v.y, 0.0));
}

#[test]
fn fast_mover_does_not_tunnel_through_thin_wall() {
    let mut world = setup_world(CollisionConfig::default());
    let bullet = mover(&mut world, Vec2::ZERO, Vec2::new(100_000.0, 0.0), SweepMover::sliding());
    let thin = wall(&mut world, Vec2::new(50.0, 0.0), 2.0, 100.0);

    assert!(try_sweep_move(&mut world, bullet, Vec2::new(10_000.0, 0.0), &[thin], 0.1));
    assert!(global_position(&mut world, bullet).unwrap().x < 49.0);
}

#[test]
fn wedged_mover_stops_at_collision_cap() {
    let mut world = setup_world(CollisionConfig::default());
    let ball = mover(&mut world, Vec2::ZERO, Vec2::new(10_000.0, 0.0), SweepMover::reflective());
    let left = wall(&mut world, Vec2::new(-15.0, 0.0), 10.0, 10_000.0);
    let right = wall(&mut world, Vec2::new(15.0, 0.0), 10.0, 10_000.0);

    assert!(try_sweep_move(&mut world, ball, Vec2::new(10_000.0, 0.0), &[left, right], 1.0));

    let pos = global_position(&mut world, ball).unwrap();
    assert!(pos.x > -10.0 && pos.x < 10.0, "escaped the wedge: {pos}");
    let v = world.get::<RigidBody>(ball).unwrap().velocity;
    assert!(v.length() <= 2000.0 + EPSILON);
}

#[test]
fn circles_are_not_sweep_targets() {
    let mut world = setup_world(CollisionConfig::default());
    let player = mover(&mut world, Vec2::ZERO, Vec2::ZERO, SweepMover::sliding());
    let obstacle = spawn_shape(&mut world, create_circle(30.0), Vec2::new(50.0, 0.0), true);

    assert!(!try_sweep_move(&mut world, player, Vec2::new(100.0, 0.0), &[obstacle], 0.1));
    assert!(approx_eq(global_position(&mut world, player).unwrap().x, 100.0));
}

#[test]
fn attached_hitbox_is_not_an_obstacle_for_its_body() {
    let mut world = setup_world(CollisionConfig::default());
    let player = mover(&mut world, Vec2::ZERO, Vec2::ZERO, SweepMover::sliding());
    let hitbox = spawn_shape(&mut world, create_box(40.0, 40.0), Vec2::ZERO, false);
    attach_child(&mut world, player, hitbox).unwrap();

    assert!(!try_sweep_move(&mut world, player, Vec2::new(100.0, 0.0), &[hitbox], 0.1));
    assert!(approx_eq(global_position(&mut world, player).unwrap().x, 100.0));
    assert!(approx_eq(global_position(&mut world, hitbox).unwrap().x, 100.0));
}

#[test]
fn sweep_moves_child_mover_in_world_space() {
    let mut world = setup_world(CollisionConfig::default());
    let parent = spawn_node(&mut world, Vec2::new(10.0, 10.0), std::f32::consts::FRAC_PI_2, Vec2::new(2.0, 2.0));
    let child = mover(&mut world, Vec2::new(10.0, 10.0), Vec2::ZERO, SweepMover::sliding());
    attach_child(&mut world, parent, child).unwrap();

    try_sweep_move(&mut world, child, Vec2::new(5.0, 0.0), &[], 0.1);
    let pos = global_position(&mut world, child).unwrap();
    assert!(approx_eq(pos.x, 15.0) && approx_eq(pos.y, 10.0), "got {pos}");
}

#[test]
fn mover_starting_inside_a_box_slides_out() {
    let mut world = setup_world(CollisionConfig::default());
    let velocity = Vec2::new(600.0, 0.0);
    let body = mover(&mut world, Vec2::new(10.0, 0.0), velocity, SweepMover::sliding());
    let block = wall(&mut world, Vec2::ZERO, 100.0, 100.0);

    let dt = 1.0 / 60.0;
    for _ in 0..10 {
        try_sweep_move(&mut world, body, velocity * dt, &[block], dt);
    }

    let pos = global_position(&mut world, body).unwrap();
    assert!(approx_eq(pos.x, 110.0), "mover ended at {pos}");
    assert_eq!(world.get::<RigidBody>(body).unwrap().velocity, velocity);
}
