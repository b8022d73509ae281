use bevy_ecs::prelude::Component;
use glam::Vec2;

/// Local position of a node, relative to its parent (or to the world when the
/// node has no parent).
///
/// Write through [`crate::systems::hierarchy::set_position`] so the cached
/// global transforms of the node and its descendants are invalidated.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct MapPosition {
    pub pos: Vec2,
}

impl MapPosition {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
        }
    }
}

impl From<Vec2> for MapPosition {
    fn from(pos: Vec2) -> Self {
        Self { pos }
    }
}
