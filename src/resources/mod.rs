//! ECS resources made available to the collision step.
//!
//! Overview
//! - `collisionconfig` – tunables for the narrow phase and the sweep solver
//! - `collisionmode` – active polygon–polygon resolver
//! - `contacts` – contact normals gathered for ground-sensitive bodies
//! - `worldtime` – simulation time and delta
pub mod collisionconfig;
pub mod collisionmode;
pub mod contacts;
pub mod worldtime;
