//! ECS components for scene nodes and shapes.
//!
//! Submodules overview:
//! - [`anchor`] – pivot anchor and bounding size
//! - [`collider`] – circle/polygon shapes taking part in collision
//! - [`globaltransform2d`] – composed world transform and its lazy cache
//! - [`groundsensor`] – marker for bodies whose contact normals are collected
//! - [`mapposition`] – local position of a node
//! - [`movementdelta`] – deferred translation/rotation instruction
//! - [`rigidbody`] – velocity plus named acceleration forces
//! - [`rotation`] – local rotation in radians
//! - [`scale`] – local 2D scale
//! - [`sweepmover`] – marker selecting continuous movement and its response

pub mod anchor;
pub mod collider;
pub mod globaltransform2d;
pub mod groundsensor;
pub mod mapposition;
pub mod movementdelta;
pub mod rigidbody;
pub mod rotation;
pub mod scale;
pub mod sweepmover;
