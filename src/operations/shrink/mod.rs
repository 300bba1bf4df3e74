pub mod aspect;

use crate::geometry::{ErodiblePolygon, ShrinkPoint};
use crate::math::polygon_2d::cross_2d;
use crate::math::{normalize_or_zero, Vector2};

pub use crate::geometry::ShrinkCase;

/// Canonical directions that moved less than this are considered unchanged.
const DIRECTION_EPS: f64 = 1e-6;

/// Keeps corners turning by exactly the reflex threshold out of the fix-up.
const REFLEX_COS_EPS: f64 = 1e-9;

/// Computes the per-point shrink directions of a polygon.
///
/// # Algorithm
///
/// 1. Inward normal of every edge, averaged into a circular normal per point
/// 2. Sharp reflex corners get two `cant_intersect` fix-up points inserted
///    just before and after them, carrying the corner's normal
/// 3. Every normal is remapped onto the camera-window rectangle
///    (see [`aspect::remap`])
///
/// Bumps the polygon's state when the point count changed, when any point
/// switched [`ShrinkCase`], or when a canonical point switched rectangle
/// feature. Bracketed and clamped directions drift as neighboring edges
/// rotate; that drift alone keeps the state.
///
/// Holes are handled through [`ErodiblePolygon::interior_sign`], so their
/// directions point out of the hole.
#[derive(Debug, Clone, Copy)]
pub struct ShrinkDirections {
    reflex_angle_cos: f64,
    fixup_ratio: f64,
}

/// Working record for one output point.
struct Corner {
    point: ShrinkPoint,
    raw: Vector2,
    n_prev: Vector2,
    n_next: Vector2,
    /// Part of a reflex fix-up cluster: moves along the corner's raw normal.
    pinned: bool,
}

impl ShrinkDirections {
    /// Creates the calculator.
    ///
    /// `reflex_angle_degrees` is the turn between the two edge normals above
    /// which a reflex corner is fixed up; `fixup_ratio` is how far toward each
    /// neighbor the auxiliary points are placed.
    #[must_use]
    pub fn new(reflex_angle_degrees: f64, fixup_ratio: f64) -> Self {
        Self {
            reflex_angle_cos: reflex_angle_degrees.to_radians().cos(),
            fixup_ratio,
        }
    }

    /// Recomputes `polygon`'s shrink directions, inserting fix-up points where
    /// needed. Returns `true` when the state was bumped.
    pub fn apply(&self, polygon: &mut ErodiblePolygon) -> bool {
        let n = polygon.points.len();
        if n < 3 {
            return false;
        }
        let orientation = polygon.interior_sign();
        let points = &polygon.points;
        let edge_normals = inward_edge_normals(points, orientation);

        let mut corners: Vec<Corner> = Vec::with_capacity(n + 4);
        for i in 0..n {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            let point = points[i];
            let n_prev = edge_normals[prev];
            let n_next = edge_normals[i];
            let e_prev = point.position - points[prev].position;
            let e_next = points[next].position - point.position;
            let raw = raw_normal(&n_prev, &n_next, &e_prev);

            let touches_fixup = point.cant_intersect
                || points[prev].cant_intersect
                || points[next].cant_intersect;
            let sharp_reflex = cross_2d(e_prev.x, e_prev.y, e_next.x, e_next.y) * orientation < 0.0
                && n_prev.dot(&n_next) < self.reflex_angle_cos - REFLEX_COS_EPS;

            if sharp_reflex && !touches_fixup {
                let before = point.position + (points[prev].position - point.position) * self.fixup_ratio;
                let after = point.position + (points[next].position - point.position) * self.fixup_ratio;
                let corner = ShrinkPoint {
                    shrink_direction: raw,
                    ..point
                };
                for point in [ShrinkPoint::fixup(before, raw), corner, ShrinkPoint::fixup(after, raw)] {
                    corners.push(Corner {
                        point,
                        raw,
                        n_prev,
                        n_next,
                        pinned: true,
                    });
                }
            } else {
                corners.push(Corner {
                    point,
                    raw,
                    n_prev,
                    n_next,
                    pinned: point.cant_intersect
                        || (points[prev].cant_intersect && points[next].cant_intersect),
                });
            }
        }

        inherit_corner_normals(&mut corners);

        let aspect = polygon.aspect_ratio;
        let new_points: Vec<ShrinkPoint> = corners
            .into_iter()
            .map(|c| {
                let (shrink_direction, case) = if c.pinned {
                    (aspect::clamped(&c.raw, aspect), ShrinkCase::Clamped)
                } else {
                    aspect::remap(&c.n_prev, &c.n_next, &c.raw, aspect)
                };
                ShrinkPoint {
                    shrink_direction,
                    case: Some(case),
                    ..c.point
                }
            })
            .collect();

        let changed = new_points.len() != n
            || new_points.iter().zip(&polygon.points).any(|(a, b)| {
                a.case != b.case
                    || (a.case == Some(ShrinkCase::Canonical)
                        && (a.shrink_direction - b.shrink_direction).norm() > DIRECTION_EPS)
            });
        polygon.points = new_points;
        if changed {
            polygon.state += 1;
        }
        changed
    }
}

/// Unit inward normal of every edge `i -> i + 1`; zero for zero-length edges.
fn inward_edge_normals(points: &[ShrinkPoint], orientation: f64) -> Vec<Vector2> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let e = points[(i + 1) % n].position - points[i].position;
            normalize_or_zero(Vector2::new(-e.y, e.x) * orientation)
        })
        .collect()
}

/// Average of the two edge normals. For a hairpin the normals cancel out and
/// the point is pulled back along its incoming edge.
fn raw_normal(n_prev: &Vector2, n_next: &Vector2, e_prev: &Vector2) -> Vector2 {
    let sum = n_prev + n_next;
    if sum.norm() < 1e-9 {
        -normalize_or_zero(*e_prev)
    } else {
        normalize_or_zero(sum)
    }
}

/// Fix-up points from earlier generations follow the corner they flank.
fn inherit_corner_normals(corners: &mut [Corner]) {
    let n = corners.len();
    for i in 0..n {
        if !corners[i].point.cant_intersect {
            continue;
        }
        let next = (i + 1) % n;
        let prev = (i + n - 1) % n;
        if !corners[next].point.cant_intersect {
            corners[i].raw = corners[next].raw;
        } else if !corners[prev].point.cant_intersect {
            corners[i].raw = corners[prev].raw;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use approx::assert_abs_diff_eq;

    fn polygon(coords: &[(f64, f64)], aspect: f64) -> ErodiblePolygon {
        let pts: Vec<Point2> = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        ErodiblePolygon::new(&pts, aspect)
    }

    fn directions() -> ShrinkDirections {
        ShrinkDirections::new(90.0, 0.01)
    }

    #[test]
    fn wide_rectangle_corners_use_aspect_diagonals() {
        let mut rect = polygon(&[(0.0, 0.0), (20.0, 0.0), (20.0, 10.0), (0.0, 10.0)], 2.0);
        assert!(directions().apply(&mut rect));
        let expected = [(2.0, 1.0), (-2.0, 1.0), (-2.0, -1.0), (2.0, -1.0)];
        for (p, (ex, ey)) in rect.points.iter().zip(expected) {
            assert_abs_diff_eq!(p.shrink_direction.x, ex, epsilon = 1e-12);
            assert_abs_diff_eq!(p.shrink_direction.y, ey, epsilon = 1e-12);
        }
    }

    #[test]
    fn clockwise_input_still_points_inward() {
        let mut rect = polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)], 1.0);
        directions().apply(&mut rect);
        assert_abs_diff_eq!(rect.points[0].shrink_direction.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.points[0].shrink_direction.y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.points[2].shrink_direction.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.points[2].shrink_direction.y, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn state_bumps_only_on_change() {
        let mut rect = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], 1.0);
        assert!(directions().apply(&mut rect));
        assert_eq!(rect.state, 1);
        assert!(!directions().apply(&mut rect));
        assert_eq!(rect.state, 1);
    }

    #[test]
    fn bracketed_drift_keeps_the_state() {
        let mut triangle = polygon(&[(0.0, 0.0), (10.0, 0.0), (5.0, 8.0)], 1.0);
        assert!(directions().apply(&mut triangle));
        let before = triangle.points[2].shrink_direction;
        assert_eq!(triangle.points[2].case, Some(ShrinkCase::Bracketed));

        triangle.points[2].position = Point2::new(5.1, 8.0);
        assert!(!directions().apply(&mut triangle));
        assert_eq!(triangle.state, 1);
        assert!((triangle.points[2].shrink_direction - before).norm() > DIRECTION_EPS);
    }

    #[test]
    fn changing_case_bumps_the_state() {
        let mut rect = polygon(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)], 1.0);
        directions().apply(&mut rect);
        assert!(rect.points.iter().all(|p| p.case == Some(ShrinkCase::Canonical)));

        // The right edge leans over, so its top corner no longer sits on one
        // rectangle feature.
        rect.points[2].position = Point2::new(4.5, 4.0);
        assert!(directions().apply(&mut rect));
        assert_eq!(rect.state, 2);
        assert_eq!(rect.points[2].case, Some(ShrinkCase::Bracketed));
    }

    #[test]
    fn hole_directions_point_out_of_the_hole() {
        let mut hole = polygon(&[(8.0, 8.0), (12.0, 8.0), (12.0, 12.0), (8.0, 12.0)], 1.0);
        hole.hole = true;
        directions().apply(&mut hole);
        let expected = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
        for (p, (ex, ey)) in hole.points.iter().zip(expected) {
            assert_abs_diff_eq!(p.shrink_direction.x, ex, epsilon = 1e-12);
            assert_abs_diff_eq!(p.shrink_direction.y, ey, epsilon = 1e-12);
        }
    }

    #[test]
    fn sharp_reflex_corner_gets_fixups() {
        // A notch whose apex (index 2) turns by well over 90 degrees.
        let mut notch = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (5.0, 9.0), (10.0, 10.0), (0.0, 10.0)],
            1.0,
        );
        assert!(directions().apply(&mut notch));
        assert_eq!(notch.points.len(), 7);
        assert!(notch.points[2].cant_intersect);
        assert!(!notch.points[3].cant_intersect);
        assert!(notch.points[4].cant_intersect);
        assert_eq!(notch.points[3].position, Point2::new(5.0, 9.0));
        // The cluster moves as one.
        let dir = notch.points[3].shrink_direction;
        assert_eq!(notch.points[2].shrink_direction, dir);
        assert_eq!(notch.points[4].shrink_direction, dir);
        // Fix-ups sit 1% of the way toward the neighbors.
        assert_abs_diff_eq!(notch.points[2].position.x, 5.05, epsilon = 1e-12);
        assert_abs_diff_eq!(notch.points[2].position.y, 8.91, epsilon = 1e-12);

        // Running again does not insert a second pair.
        directions().apply(&mut notch);
        assert_eq!(notch.points.len(), 7);
    }

    #[test]
    fn mild_reflex_corner_is_left_alone() {
        let mut l_shape = polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (5.0, 5.0), (5.0, 10.0), (0.0, 10.0)],
            1.0,
        );
        directions().apply(&mut l_shape);
        assert_eq!(l_shape.points.len(), 6);
        // Inner corner of the L moves diagonally away from the notch.
        assert_abs_diff_eq!(l_shape.points[3].shrink_direction.x, -1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(l_shape.points[3].shrink_direction.y, -1.0, epsilon = 1e-12);
    }
}
