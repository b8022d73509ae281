use glam::Vec2;

/// A deferred movement instruction: translate by `translation`, rotate by
/// `rotation` radians.
///
/// Built and consumed within a single operation, see
/// [`apply_movement`](crate::systems::hierarchy::apply_movement) and
/// [`SweepMover::intent`](super::sweepmover::SweepMover::intent).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MovementDelta {
    pub translation: Vec2,
    pub rotation: f32,
}

impl MovementDelta {
    pub const NONE: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
    };

    pub fn new(translation: Vec2, rotation: f32) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    pub fn is_none(&self) -> bool {
        self.translation == Vec2::ZERO && self.rotation == 0.0
    }
}
