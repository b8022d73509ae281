//! Separating Axis Theorem.
//!
//! Every candidate axis is a unit vector. Projections that overlap by zero or
//! less on any axis mean the shapes are separated. Otherwise the axis with the
//! smallest positive overlap wins, oriented from A's centre toward B's centre.

use glam::Vec2;

use super::Penetration;
use super::projection::Projection;
use super::segment::edges;

/// Unit edge normals `perp(p[i+1] - p[i])` of a closed point loop.
///
/// Degenerate (zero-length) edges yield no axis.
pub fn edge_axes(points: &[Vec2]) -> impl Iterator<Item = Vec2> + '_ {
    edges(points).filter_map(|(a, b)| {
        let axis = (b - a).perp().normalize_or_zero();
        (axis != Vec2::ZERO).then_some(axis)
    })
}

/// Running minimum-overlap search shared by both SAT tests.
#[derive(Default)]
struct MinimumAxis {
    best: Option<Penetration>,
}

impl MinimumAxis {
    /// Returns `false` when the axis separates the shapes.
    fn consider(&mut self, axis: Vec2, a: Projection, b: Projection) -> bool {
        let overlap = a.overlap(&b);
        if overlap <= 0.0 {
            return false;
        }
        match self.best {
            Some(best) if best.depth <= overlap => {}
            _ => {
                self.best = Some(Penetration {
                    axis,
                    depth: overlap,
                })
            }
        }
        true
    }

    fn finish(self, a_to_b: Vec2) -> Option<Penetration> {
        self.best.map(|p| p.oriented(a_to_b))
    }
}

/// Polygon vs polygon on the edge normals of both polygons.
///
/// `center_a` and `center_b` are the shapes' global positions and only orient
/// the resulting push.
pub fn polygon_polygon(
    points_a: &[Vec2],
    center_a: Vec2,
    points_b: &[Vec2],
    center_b: Vec2,
) -> Option<Penetration> {
    if points_a.is_empty() || points_b.is_empty() {
        return None;
    }

    let mut search = MinimumAxis::default();
    for axis in edge_axes(points_a).chain(edge_axes(points_b)) {
        let proj_a = Projection::of_points(points_a, axis);
        let proj_b = Projection::of_points(points_b, axis);
        if !search.consider(axis, proj_a, proj_b) {
            return None;
        }
    }
    search.finish(center_b - center_a)
}

/// Circle (A) vs polygon (B).
///
/// Tests the polygon's edge normals plus the axis from the circle centre to
/// the polygon's nearest vertex.
pub fn circle_polygon(
    center: Vec2,
    radius: f32,
    points: &[Vec2],
    polygon_center: Vec2,
) -> Option<Penetration> {
    if points.is_empty() {
        return None;
    }

    let mut search = MinimumAxis::default();
    for axis in edge_axes(points) {
        let proj_poly = Projection::of_points(points, axis);
        let proj_circle = Projection::of_circle(center, radius, axis);
        if !search.consider(axis, proj_circle, proj_poly) {
            return None;
        }
    }

    let nearest = points
        .iter()
        .copied()
        .min_by(|a, b| {
            center
                .distance_squared(*a)
                .total_cmp(&center.distance_squared(*b))
        })
        .unwrap_or(polygon_center);
    let vertex_axis = (nearest - center).normalize_or_zero();
    if vertex_axis != Vec2::ZERO {
        let proj_poly = Projection::of_points(points, vertex_axis);
        let proj_circle = Projection::of_circle(center, radius, vertex_axis);
        if !search.consider(vertex_axis, proj_circle, proj_poly) {
            return None;
        }
    }

    search.finish(polygon_center - center)
}
