//! Continuous movement marker.
//!
//! Entities with a [`SweepMover`] and a
//! [`RigidBody`](super::rigidbody::RigidBody) are advanced by
//! [`try_sweep_move`](crate::systems::sweep::try_sweep_move) every tick instead
//! of being teleported, so fast bodies cannot tunnel through thin polygons.

use bevy_ecs::prelude::Component;
use serde::{Deserialize, Serialize};

use super::movementdelta::MovementDelta;

/// How a swept body's velocity reacts when its path hits a polygon edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepResponse {
    /// Bounce: reflect about the contact normal with a speed boost, then keep
    /// the direction out of the near-axis bands and cap the speed.
    Reflective,
    /// Slide: drop the velocity component pushing into the surface.
    #[default]
    Sliding,
}

#[derive(Component, Clone, Copy, Debug, Default)]
pub struct SweepMover {
    pub response: SweepResponse,
    /// One-shot movement requested by an input collaborator. The translation
    /// is added to this tick's sweep displacement and the rotation applied
    /// directly; the step resets it afterwards.
    pub intent: MovementDelta,
}

impl SweepMover {
    pub fn new(response: SweepResponse) -> Self {
        Self {
            response,
            intent: MovementDelta::NONE,
        }
    }

    pub fn reflective() -> Self {
        Self::new(SweepResponse::Reflective)
    }

    pub fn sliding() -> Self {
        Self::new(SweepResponse::Sliding)
    }

    /// Take the pending intent, leaving [`MovementDelta::NONE`] behind.
    pub fn take_intent(&mut self) -> MovementDelta {
        std::mem::take(&mut self.intent)
    }
}
