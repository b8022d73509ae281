use bevy_ecs::prelude::Component;

/// Marker for a body whose contact normals are collected each tick into
/// [`ContactNormals`](crate::resources::contacts::ContactNormals).
///
/// Shapes belong to the body through [`Collider::owner`](super::collider::Collider::owner).
#[derive(Component, Clone, Copy, Debug, Default)]
pub struct GroundSensor;
