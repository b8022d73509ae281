use glam::Vec2;

/// Determinant magnitude below which two segments are treated as parallel.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Parametric crossing of two segments.
///
/// The crossing point is `a1 + t * (a2 - a1)` and equally `b1 + u * (b2 - b1)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentHit {
    pub t: f32,
    pub u: f32,
}

/// Intersect segment `a1 → a2` with segment `b1 → b2`.
///
/// Both parameters are tested half-open, `[0, 1)`. Near-parallel or coincident
/// segments never intersect.
pub fn segment_intersection(a1: Vec2, a2: Vec2, b1: Vec2, b2: Vec2) -> Option<SegmentHit> {
    let r = a2 - a1;
    let s = b2 - b1;
    let denom = r.perp_dot(s);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let qp = b1 - a1;
    let t = qp.perp_dot(s) / denom;
    let u = qp.perp_dot(r) / denom;

    let unit = 0.0..1.0;
    (unit.contains(&t) && unit.contains(&u)).then_some(SegmentHit { t, u })
}

/// Iterate the closed loop of edges `(p[i], p[(i + 1) % n])`.
pub fn edges(points: &[Vec2]) -> impl Iterator<Item = (Vec2, Vec2)> + '_ {
    let n = points.len();
    (0..n).map(move |i| (points[i], points[(i + 1) % n]))
}
