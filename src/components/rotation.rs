use bevy_ecs::prelude::Component;

/// Local rotation in radians.
#[derive(Component, Clone, Debug, Copy, Default, PartialEq)]
pub struct Rotation {
    pub radians: f32,
}

impl Rotation {
    pub fn new(radians: f32) -> Self {
        Self { radians }
    }

    pub fn from_degrees(degrees: f32) -> Self {
        Self {
            radians: degrees.to_radians(),
        }
    }
}
