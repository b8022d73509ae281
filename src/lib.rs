//! 2D collision engine on a bevy_ecs `World`.
//!
//! This module exposes the transform hierarchy, collision shapes, narrow-phase
//! resolvers and the continuous sweep solver for use in integration tests and
//! as a reusable library.

pub mod collision;
pub mod components;
pub mod error;
pub mod events;
pub mod factory;
pub mod resources;
pub mod scene;
pub mod systems;
