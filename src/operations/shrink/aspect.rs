//! Maps circular corner normals onto the rectangle of the camera window.
//!
//! The window is the rectangle `[-aspect, aspect] x [-1, 1]`. Eroding a
//! polygon by that rectangle moves every edge inward by the rectangle's
//! support distance along the edge normal, `s(n) = aspect * |n.x| + |n.y|`.
//! A vertex must therefore travel along a vector `v` satisfying
//! `v . n = s(n)` for both edges meeting at it.

use crate::geometry::ShrinkCase;
use crate::math::{Vector2, TOLERANCE};

/// Below this the two neighbor normals are treated as parallel (straight
/// continuation or hairpin) and the bracketed solve is skipped.
const MIN_BRACKET_SINE: f64 = 1e-3;

/// Maximum bracketed offset as a multiple of the window half-diagonal.
const MITER_LIMIT: f64 = 4.0;

/// A normal component below this is considered axis-aligned.
const AXIS_EPS: f64 = 1e-9;

/// The 8 canonical rectangle directions, clockwise from "up": side midpoints
/// at even indices, corners at odd indices.
#[must_use]
pub fn canonical_directions(aspect: f64) -> [Vector2; 8] {
    [
        Vector2::new(0.0, 1.0),
        Vector2::new(aspect, 1.0),
        Vector2::new(aspect, 0.0),
        Vector2::new(aspect, -1.0),
        Vector2::new(0.0, -1.0),
        Vector2::new(-aspect, -1.0),
        Vector2::new(-aspect, 0.0),
        Vector2::new(-aspect, 1.0),
    ]
}

/// Distance an edge with unit inward normal `n` moves when eroded by the
/// unit window.
#[must_use]
pub fn support_distance(n: &Vector2, aspect: f64) -> f64 {
    aspect * n.x.abs() + n.y.abs()
}

/// Index into [`canonical_directions`] of the rectangle feature that
/// supports an edge with normal `n`: a corner for oblique normals, a side
/// for axis-aligned ones.
fn support_index(n: &Vector2) -> Option<usize> {
    let sign = |c: f64| {
        if c.abs() < AXIS_EPS {
            0
        } else if c > 0.0 {
            1
        } else {
            -1
        }
    };
    match (sign(n.x), sign(n.y)) {
        (0, 1) => Some(0),
        (1, 1) => Some(1),
        (1, 0) => Some(2),
        (1, -1) => Some(3),
        (0, -1) => Some(4),
        (-1, -1) => Some(5),
        (-1, 0) => Some(6),
        (-1, 1) => Some(7),
        _ => None,
    }
}

/// Canonical direction lying on both supporting features, if any.
fn shared_support(a: usize, b: usize) -> Option<usize> {
    if a == b {
        return Some(a);
    }
    let (side, other) = match (a % 2, b % 2) {
        (0, _) => (a, b),
        (_, 0) => (b, a),
        // Two different corners never touch.
        _ => return None,
    };
    if other % 2 == 1 {
        // A corner lies on the side it is adjacent to.
        return (other == (side + 1) % 8 || other == (side + 7) % 8).then_some(other);
    }
    // Two perpendicular sides meet at the corner between them.
    if other == (side + 2) % 8 {
        Some((side + 1) % 8)
    } else if other == (side + 6) % 8 {
        Some((side + 7) % 8)
    } else {
        None
    }
}

/// Solves for `v` with `v . n1 = s(n1)` and `v . n2 = s(n2)`.
///
/// This is the law-of-sines solve of the triangle spanned by the two edge
/// normals, written as a 2x2 system.
fn bracketed(n1: &Vector2, n2: &Vector2, aspect: f64) -> Option<Vector2> {
    let det = n1.x * n2.y - n1.y * n2.x;
    if det.abs() < MIN_BRACKET_SINE {
        return None;
    }
    let s1 = support_distance(n1, aspect);
    let s2 = support_distance(n2, aspect);
    let v = Vector2::new((s1 * n2.y - s2 * n1.y) / det, (n1.x * s2 - n2.x * s1) / det);
    let limit = MITER_LIMIT * (aspect * aspect + 1.0).sqrt();
    (v.norm() <= limit).then_some(v)
}

/// Projects `raw` onto the rectangle boundary and clamps it into
/// `[-aspect, aspect] x [-1, 1]`.
#[must_use]
pub fn clamped(raw: &Vector2, aspect: f64) -> Vector2 {
    let scale = (raw.x.abs() / aspect).max(raw.y.abs());
    if scale < TOLERANCE {
        return Vector2::zeros();
    }
    let v = raw / scale;
    Vector2::new(v.x.clamp(-aspect, aspect), v.y.clamp(-1.0, 1.0))
}

/// Anisotropic shrink direction for a vertex whose incoming and outgoing
/// edges have unit inward normals `n_prev` and `n_next`, and whose circular
/// normal is `raw`.
#[must_use]
pub fn remap(n_prev: &Vector2, n_next: &Vector2, raw: &Vector2, aspect: f64) -> (Vector2, ShrinkCase) {
    if let (Some(a), Some(b)) = (support_index(n_prev), support_index(n_next)) {
        if let Some(shared) = shared_support(a, b) {
            return (canonical_directions(aspect)[shared], ShrinkCase::Canonical);
        }
        if let Some(v) = bracketed(n_prev, n_next, aspect) {
            return (v, ShrinkCase::Bracketed);
        }
    }
    (clamped(raw, aspect), ShrinkCase::Clamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit(x: f64, y: f64) -> Vector2 {
        Vector2::new(x, y).normalize()
    }

    #[test]
    fn axis_corner_maps_to_scaled_diagonal() {
        // Bottom-left corner of a counter-clockwise box.
        let (v, case) = remap(&unit(1.0, 0.0), &unit(0.0, 1.0), &unit(1.0, 1.0), 2.0);
        assert_eq!(case, ShrinkCase::Canonical);
        assert_abs_diff_eq!(v.x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn straight_edge_uses_side_direction() {
        let n = unit(0.0, -1.0);
        let (v, case) = remap(&n, &n, &n, 3.0);
        assert_eq!(case, ShrinkCase::Canonical);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn oblique_edges_in_one_quadrant_share_corner() {
        let (v, case) = remap(&unit(1.0, 2.0), &unit(2.0, 1.0), &unit(1.0, 1.0), 1.5);
        assert_eq!(case, ShrinkCase::Canonical);
        assert_abs_diff_eq!(v.x, 1.5, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn bracketed_moves_both_edges_by_support() {
        let n1 = unit(3.0, 4.0);
        let n2 = unit(-3.0, 4.0);
        let (v, case) = remap(&n1, &n2, &unit(0.0, 1.0), 1.0);
        assert_eq!(case, ShrinkCase::Bracketed);
        assert_abs_diff_eq!(v.dot(&n1), support_distance(&n1, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(v.dot(&n2), support_distance(&n2, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.75, epsilon = 1e-12);
    }

    #[test]
    fn hairpin_falls_back_to_clamp() {
        let n1 = unit(0.6, 0.8);
        let n2 = -n1;
        let raw = unit(-0.8, 0.6);
        let (v, case) = remap(&n1, &n2, &raw, 2.0);
        assert_eq!(case, ShrinkCase::Clamped);
        assert!(v.x.abs() <= 2.0 + 1e-12 && v.y.abs() <= 1.0 + 1e-12);
        // Same direction as the raw normal.
        assert_abs_diff_eq!(v.normalize().dot(&raw), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn clamped_lands_on_rectangle() {
        let v = clamped(&unit(1.0, 1.0), 2.0);
        assert_abs_diff_eq!(v.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = 1e-12);
        assert_eq!(clamped(&Vector2::zeros(), 2.0), Vector2::zeros());
    }

    #[test]
    fn shared_support_table() {
        assert_eq!(shared_support(0, 2), Some(1));
        assert_eq!(shared_support(6, 0), Some(7));
        assert_eq!(shared_support(0, 7), Some(7));
        assert_eq!(shared_support(0, 3), None);
        assert_eq!(shared_support(1, 3), None);
        assert_eq!(shared_support(0, 4), None);
    }
}
