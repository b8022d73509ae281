//! Event types emitted by the collision step.
//!
//! - [`collision`] – narrow-phase hit notification
pub mod collision;
