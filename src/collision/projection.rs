use glam::Vec2;

/// Interval covered by a shape projected on an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    pub min: f32,
    pub max: f32,
}

impl Projection {
    /// Project a point set on `axis`. Callers pass at least one point.
    pub fn of_points(points: &[Vec2], axis: Vec2) -> Self {
        let first = axis.dot(points[0]);
        points
            .iter()
            .skip(1)
            .map(|p| axis.dot(*p))
            .fold(Self { min: first, max: first }, |acc, proj| Self {
                min: acc.min.min(proj),
                max: acc.max.max(proj),
            })
    }

    /// Interval `[c - r, c + r]` of a circle with centre projection `c`.
    pub fn of_circle(center: Vec2, radius: f32, axis: Vec2) -> Self {
        let c = axis.dot(center);
        Self {
            min: c - radius,
            max: c + radius,
        }
    }

    /// Signed overlap length; zero or negative means the intervals are separated.
    pub fn overlap(&self, other: &Self) -> f32 {
        self.max.min(other.max) - self.min.max(other.min)
    }
}
