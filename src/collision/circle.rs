use glam::Vec2;

use super::Penetration;

/// Exact circle vs circle test.
///
/// Hit iff the centre distance is strictly below the radius sum. Coincident
/// centres push along `(1, 0)`.
pub fn circle_circle(
    center_a: Vec2,
    radius_a: f32,
    center_b: Vec2,
    radius_b: f32,
) -> Option<Penetration> {
    let delta = center_b - center_a;
    let distance = delta.length();
    let sum = radius_a + radius_b;
    if distance >= sum {
        return None;
    }

    let axis = if distance > 0.0 {
        delta / distance
    } else {
        Vec2::X
    };
    Some(Penetration {
        axis,
        depth: sum - distance,
    })
}
