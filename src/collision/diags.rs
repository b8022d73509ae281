//! Diagonal-intersection overlap test.
//!
//! An alternative to SAT for polygon pairs. Each "diagonal" runs from a
//! polygon's origin to one of its own vertices; wherever it crosses an edge of
//! the other polygon the polygon is pushed back along that diagonal by the
//! part that sticks out, `(1 - t) * diagonal`. Pushes accumulate per crossing
//! instead of selecting a single minimal axis, so the result is asymmetric and
//! may not settle on concave or deep overlaps.

use glam::Vec2;

use super::segment::{edges, segment_intersection};

/// Accumulated displacements for both polygons of a DIAGS test.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiagonalPushes {
    /// Displacement to add to A's position.
    pub a: Vec2,
    /// Displacement to add to B's position.
    pub b: Vec2,
    /// Number of diagonal/edge crossings found.
    pub crossings: usize,
}

impl DiagonalPushes {
    pub fn is_hit(&self) -> bool {
        self.crossings > 0
    }
}

/// Sum of `(1 - t) * diagonal` over every crossing of `origin → vertex`
/// diagonals with `other`'s edges, and the number of crossings.
fn backoff(origin: Vec2, points: &[Vec2], other: &[Vec2]) -> (Vec2, usize) {
    let mut total = Vec2::ZERO;
    let mut crossings = 0;
    for vertex in points {
        let diagonal = *vertex - origin;
        for (e1, e2) in edges(other) {
            if let Some(hit) = segment_intersection(origin, *vertex, e1, e2) {
                total += (1.0 - hit.t) * diagonal;
                crossings += 1;
            }
        }
    }
    (total, crossings)
}

/// Run the diagonal test for A's diagonals against B's edges and the reverse.
///
/// Both point sets are read once up front, so the displacements do not feed
/// back into the crossings of the same test. Returns `None` when nothing
/// crosses.
pub fn diagonal_pushes(
    origin_a: Vec2,
    points_a: &[Vec2],
    origin_b: Vec2,
    points_b: &[Vec2],
) -> Option<DiagonalPushes> {
    let (back_a, hits_a) = backoff(origin_a, points_a, points_b);
    let (back_b, hits_b) = backoff(origin_b, points_b, points_a);
    let pushes = DiagonalPushes {
        a: -back_a,
        b: -back_b,
        crossings: hits_a + hits_b,
    };
    pushes.is_hit().then_some(pushes)
}
