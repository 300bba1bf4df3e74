use crate::geometry::ShrinkPoint;
use crate::math::intersect_2d::segment_segment_intersect_2d;
use crate::math::Point2;

/// Crossings this close to a segment end are vertex touches, not crossings.
const ENDPOINT_EPS: f64 = 1e-9;

/// Edges spanned by one reflex fix-up cluster, less one.
const CLUSTER_SPAN: usize = 3;

/// A crossing between edges `edge_i -> edge_i + 1` and `edge_j -> edge_j + 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crossing {
    pub edge_i: usize,
    /// Always greater than `edge_i + 1`.
    pub edge_j: usize,
    pub point: Point2,
}

/// Finds the first crossing between two non-adjacent edges, in index order.
///
/// Crossings between two edges of the same reflex fix-up cluster are ignored,
/// as are touches at a segment endpoint. A cluster is a run of consecutive
/// edges that all touch a `cant_intersect` point.
#[must_use]
pub fn find_first_intersection(points: &[ShrinkPoint]) -> Option<Crossing> {
    let n = points.len();
    if n < 4 {
        return None;
    }
    let touches_fixup = |k: usize| points[k % n].cant_intersect || points[(k + 1) % n].cant_intersect;
    let run = |from: usize, len: usize| (from..=from + len).all(touches_fixup);
    let same_cluster = |i: usize, j: usize| {
        (j - i <= CLUSTER_SPAN && run(i, j - i)) || (n + i - j <= CLUSTER_SPAN && run(j, n + i - j))
    };

    for i in 0..n {
        let a0 = &points[i].position;
        let a1 = &points[(i + 1) % n].position;
        for j in (i + 2)..n {
            // Edge n-1 closes the loop back onto edge 0.
            if (i == 0 && j == n - 1) || same_cluster(i, j) {
                continue;
            }
            let b0 = &points[j].position;
            let b1 = &points[(j + 1) % n].position;
            let Some((point, t, u)) = segment_segment_intersect_2d(a0, a1, b0, b1) else {
                continue;
            };
            let at_end = |s: f64| !(ENDPOINT_EPS..=1.0 - ENDPOINT_EPS).contains(&s);
            if at_end(t) || at_end(u) {
                continue;
            }
            return Some(Crossing {
                edge_i: i,
                edge_j: j,
                point,
            });
        }
    }
    None
}

/// Whether any two non-adjacent edges cross.
#[must_use]
pub fn has_self_intersection(points: &[ShrinkPoint]) -> bool {
    find_first_intersection(points).is_some()
}
