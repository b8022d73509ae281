//! Velocity responses applied on contact.
//!
//! Reflective movers bounce with a small energy gain and are kept out of
//! near-horizontal and near-vertical directions. Sliding movers lose only the
//! velocity component driving them into the surface.

use glam::Vec2;

use crate::resources::collisionconfig::CollisionConfig;

/// Tuning for [`reflect`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReflectParams {
    pub boost: f32,
    pub max_speed: f32,
    /// Minimum angle (radians) kept from each axis.
    pub min_angle: f32,
}

impl ReflectParams {
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self {
            boost: config.reflect_boost,
            max_speed: config.max_speed,
            min_angle: config.min_angle_degrees.to_radians(),
        }
    }
}

impl Default for ReflectParams {
    fn default() -> Self {
        Self::from_config(&CollisionConfig::default())
    }
}

/// Mirror `velocity` about `normal` and scale it by `boost`.
pub fn reflect_with_boost(velocity: Vec2, normal: Vec2, boost: f32) -> Vec2 {
    (velocity - 2.0 * velocity.dot(normal) * normal) * boost
}

/// Keep the direction of `velocity` at least `min_angle` away from both axes,
/// preserving speed and the quadrant.
///
/// `min_angle` is limited to `[0, π/4]`. Zero velocity is returned unchanged.
pub fn clamp_axis_angle(velocity: Vec2, min_angle: f32) -> Vec2 {
    let speed = velocity.length();
    if speed <= f32::EPSILON {
        return velocity;
    }

    let min_angle = min_angle.clamp(0.0, std::f32::consts::FRAC_PI_4);
    let angle = velocity
        .y
        .abs()
        .atan2(velocity.x.abs())
        .clamp(min_angle, std::f32::consts::FRAC_PI_2 - min_angle);

    let sign_x = if velocity.x < 0.0 { -1.0 } else { 1.0 };
    let sign_y = if velocity.y < 0.0 { -1.0 } else { 1.0 };
    Vec2::new(sign_x * angle.cos(), sign_y * angle.sin()) * speed
}

pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    velocity.clamp_length_max(max_speed.max(0.0))
}

/// Full reflective response: bounce, angle clamp, speed clamp.
pub fn reflect(velocity: Vec2, normal: Vec2, params: &ReflectParams) -> Vec2 {
    let bounced = reflect_with_boost(velocity, normal, params.boost);
    clamp_speed(clamp_axis_angle(bounced, params.min_angle), params.max_speed)
}

/// Remove the component of `velocity` pushing into the surface.
///
/// Velocity moving away from (or along) the surface is untouched.
pub fn slide(velocity: Vec2, normal: Vec2) -> Vec2 {
    let into = velocity.dot(normal);
    if into < 0.0 {
        velocity - normal * into
    } else {
        velocity
    }
}
