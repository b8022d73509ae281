//! Kinematic body component with multiple named acceleration forces.
//!
//! The [`RigidBody`] component stores the velocity consumed by the sweep solver
//! and a set of named acceleration forces (gravity, wind, thrust) that are
//! integrated into the velocity before each sweep. Each force can be toggled
//! independently.
//!
//! The `frozen` flag skips the body during integration and sweeping, useful
//! while its position is driven externally.

use bevy_ecs::prelude::Component;
use glam::Vec2;
use rustc_hash::FxHashMap;

/// A named acceleration force that can be toggled on/off.
#[derive(Clone, Copy, Debug)]
pub struct AccelerationForce {
    /// The acceleration vector in world units per second squared.
    pub value: Vec2,
    /// Whether this force is currently active.
    pub enabled: bool,
}

impl AccelerationForce {
    /// Create a new enabled acceleration force.
    pub fn new(value: Vec2) -> Self {
        Self {
            value,
            enabled: true,
        }
    }
}

/// Kinematic body storing velocity and named acceleration forces.
///
/// # Example
/// ```ignore
/// let mut rb = RigidBody::with_velocity(Vec2::new(200.0, 200.0));
/// rb.add_force("gravity", Vec2::new(0.0, 500.0));
///
/// // Disable gravity while carried
/// rb.forces.get_mut("gravity").unwrap().enabled = false;
/// ```
#[derive(Component, Clone, Debug, Default)]
pub struct RigidBody {
    /// Current velocity in world units per second.
    pub velocity: Vec2,
    /// Named acceleration forces. The total acceleration is the sum of all enabled forces.
    pub forces: FxHashMap<String, AccelerationForce>,
    /// When true, the step skips integration and sweeping for this body.
    pub frozen: bool,
}

impl RigidBody {
    /// Create a RigidBody with zero velocity and no forces.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_velocity(velocity: Vec2) -> Self {
        Self {
            velocity,
            ..Self::default()
        }
    }

    /// Add or update a named acceleration force (enabled by default).
    pub fn add_force(&mut self, name: &str, value: Vec2) {
        self.forces
            .insert(name.to_string(), AccelerationForce::new(value));
    }

    /// Check if a force exists and is enabled.
    pub fn is_force_enabled(&self, name: &str) -> bool {
        self.forces.get(name).map(|f| f.enabled).unwrap_or(false)
    }

    /// Calculate the total acceleration from all enabled forces.
    pub fn total_acceleration(&self) -> Vec2 {
        self.forces
            .values()
            .filter(|force| force.enabled)
            .fold(Vec2::ZERO, |total, force| total + force.value)
    }

    /// Apply the enabled forces over `delta` seconds.
    pub fn integrate_forces(&mut self, delta: f32) {
        self.velocity += self.total_acceleration() * delta;
    }
}
