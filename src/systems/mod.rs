//! Simulation systems.
//!
//! Free functions over `&mut World`, run in order by [`step::step`].
//!
//! Submodules overview
//! - [`hierarchy`] – transform graph: attach/detach, lazy global transforms
//! - [`narrowphase`] – pairwise resolver table, flags, contacts and events
//! - [`resolution`] – push distribution between colliding roots
//! - [`step`] – per-tick entry point and world setup
//! - [`sweep`] – continuous sweep solver for fast movers
//! - [`time`] – update simulation time and delta

pub mod hierarchy;
pub mod narrowphase;
pub mod resolution;
pub mod step;
pub mod sweep;
pub mod time;
