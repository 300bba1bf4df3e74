use crate::geometry::{BakedPolygon, Generation};
use crate::math::distance_2d::{closest_point_index, closest_point_on_segment};
use crate::math::polygon_2d::winding_number_2d;
use crate::math::{normalize_or_zero, Point2, Vector2};

/// Intersection points closer than this are the same cut.
const SHARED_POINT_EPS: f64 = 1e-9;

/// Region a camera center may occupy at one window size.
///
/// Built from a queried [`Generation`]. Pieces split apart during erosion are
/// reconnected by thin bridges so the camera can travel between them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfinementRegion {
    pieces: Vec<Piece>,
    bridges: Vec<[Point2; 4]>,
}

#[derive(Debug, Clone, PartialEq)]
struct Piece {
    points: Vec<Point2>,
    hole: bool,
}

impl ConfinementRegion {
    /// Builds the region of `generation`, with bridges `2 * bridge_epsilon` wide.
    #[must_use]
    pub fn from_generation(generation: &Generation, bridge_epsilon: f64) -> Self {
        Self {
            pieces: generation
                .polygons
                .iter()
                .map(|p| Piece {
                    points: p.points.clone(),
                    hole: p.hole,
                })
                .collect(),
            bridges: build_bridges(&generation.polygons, bridge_epsilon),
        }
    }

    /// Bridge quads between pieces that were split from one another.
    #[must_use]
    pub fn bridges(&self) -> &[[Point2; 4]] {
        &self.bridges
    }

    /// Whether `point` lies inside the region.
    ///
    /// A point is inside when more outer pieces cover it than hole pieces.
    /// A grown hole therefore also cuts away any outer piece it overlaps, and
    /// an island inside a hole counts again.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        let (mut outer, mut holes) = (0usize, 0usize);
        for piece in &self.pieces {
            if winding_number_2d(point, &piece.points) != 0 {
                if piece.hole {
                    holes += 1;
                } else {
                    outer += 1;
                }
            }
        }
        outer > holes || self.bridges.iter().any(|quad| winding_number_2d(point, quad) != 0)
    }

    /// `point` itself if it lies inside the region, else the nearest point on
    /// a piece boundary. `None` for an empty region.
    #[must_use]
    pub fn closest_point(&self, point: &Point2) -> Option<Point2> {
        if self.contains(point) {
            return Some(*point);
        }
        self.pieces
            .iter()
            .flat_map(|piece| {
                let pts = &piece.points;
                let n = pts.len();
                (0..n).map(move |i| closest_point_on_segment(point, &pts[i], &pts[(i + 1) % n]))
            })
            .min_by(|a, b| {
                nalgebra::distance_squared(a, point).total_cmp(&nalgebra::distance_squared(b, point))
            })
    }
}

/// Connects every pair of outer polygons sharing an intersection point.
///
/// The bridge runs from the vertex of one polygon closest to the shared point
/// to the closest vertex of the other, widened by `epsilon` on each side.
#[must_use]
pub fn build_bridges(polygons: &[BakedPolygon], epsilon: f64) -> Vec<[Point2; 4]> {
    let mut bridges = Vec::new();
    let outer: Vec<&BakedPolygon> = polygons.iter().filter(|p| !p.hole).collect();
    for (a, first) in outer.iter().enumerate() {
        for second in &outer[a + 1..] {
            for shared in &first.intersection_points {
                let in_second = second
                    .intersection_points
                    .iter()
                    .any(|p| nalgebra::distance(p, shared) < SHARED_POINT_EPS);
                if !in_second {
                    continue;
                }
                let (Some((i, _)), Some((j, _))) = (
                    closest_point_index(&first.points, shared),
                    closest_point_index(&second.points, shared),
                ) else {
                    continue;
                };
                let from = first.points[i];
                let to = second.points[j];
                let along = normalize_or_zero(to - from);
                let offset = Vector2::new(-along.y, along.x) * epsilon;
                bridges.push([from + offset, to + offset, to - offset, from - offset]);
            }
        }
    }
    bridges
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn piece(coords: &[(f64, f64)], shared: &[(f64, f64)]) -> BakedPolygon {
        BakedPolygon {
            points: coords.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            intersection_points: shared.iter().map(|&(x, y)| Point2::new(x, y)).collect(),
            state: 1,
            hole: false,
        }
    }

    fn hole(coords: &[(f64, f64)]) -> BakedPolygon {
        BakedPolygon {
            hole: true,
            ..piece(coords, &[])
        }
    }

    fn split_pair() -> Generation {
        Generation {
            window_diagonal: 1.0,
            polygons: vec![
                piece(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)], &[(3.0, 0.0)]),
                piece(&[(4.0, 0.0), (6.0, 0.0), (6.0, 2.0), (4.0, 2.0)], &[(3.0, 0.0)]),
            ],
        }
    }

    #[test]
    fn shared_cut_builds_one_bridge() {
        let region = ConfinementRegion::from_generation(&split_pair(), 0.5);
        assert_eq!(region.bridges().len(), 1);
        let quad = region.bridges()[0];
        assert_abs_diff_eq!(quad[0].x, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(quad[0].y, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(quad[2].x, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(quad[2].y, -0.5, epsilon = 1e-12);
    }

    #[test]
    fn unrelated_pieces_are_not_bridged() {
        let mut generation = split_pair();
        generation.polygons[1].intersection_points.clear();
        assert!(build_bridges(&generation.polygons, 0.5).is_empty());
    }

    #[test]
    fn containment_covers_pieces_and_bridges() {
        let region = ConfinementRegion::from_generation(&split_pair(), 0.5);
        assert!(region.contains(&Point2::new(1.0, 1.0)));
        assert!(region.contains(&Point2::new(5.0, 1.0)));
        assert!(region.contains(&Point2::new(3.0, 0.0)));
        assert!(!region.contains(&Point2::new(3.0, 1.5)));
    }

    #[test]
    fn hole_piece_is_excluded() {
        let generation = Generation {
            window_diagonal: 0.0,
            polygons: vec![
                piece(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], &[]),
                hole(&[(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0)]),
            ],
        };
        let region = ConfinementRegion::from_generation(&generation, 0.1);
        assert!(region.contains(&Point2::new(1.0, 1.0)));
        assert!(!region.contains(&Point2::new(5.0, 5.0)));
        let pushed = region.closest_point(&Point2::new(5.0, 4.5)).unwrap();
        assert_abs_diff_eq!(pushed.x, 5.0, epsilon = 1e-12);
        assert_abs_diff_eq!(pushed.y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn hole_grown_past_the_outline_excludes_everything_it_covers() {
        let generation = Generation {
            window_diagonal: 0.0,
            polygons: vec![
                piece(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)], &[]),
                hole(&[(6.0, 2.0), (14.0, 2.0), (14.0, 8.0), (6.0, 8.0)]),
                piece(&[(7.0, 4.0), (8.0, 4.0), (8.0, 6.0), (7.0, 6.0)], &[]),
            ],
        };
        let region = ConfinementRegion::from_generation(&generation, 0.1);
        assert!(region.contains(&Point2::new(5.0, 5.0)));
        assert!(!region.contains(&Point2::new(9.0, 5.0)));
        assert!(!region.contains(&Point2::new(10.5, 5.0)));
        // An island inside the hole.
        assert!(region.contains(&Point2::new(7.5, 5.0)));
    }

    #[test]
    fn holes_are_never_bridged() {
        let mut generation = split_pair();
        generation.polygons.push(BakedPolygon {
            hole: true,
            ..piece(&[(1.0, 1.0), (1.5, 1.0), (1.5, 1.5)], &[(3.0, 0.0)])
        });
        assert_eq!(build_bridges(&generation.polygons, 0.5).len(), 1);
    }

    #[test]
    fn closest_point_snaps_outside_points_to_boundary() {
        let region = ConfinementRegion::from_generation(&split_pair(), 0.5);
        let inside = Point2::new(1.5, 1.5);
        assert_eq!(region.closest_point(&inside), Some(inside));
        let snapped = region.closest_point(&Point2::new(-1.0, 1.0)).unwrap();
        assert_abs_diff_eq!(snapped.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(snapped.y, 1.0, epsilon = 1e-12);

        let empty = ConfinementRegion::from_generation(&Generation::default(), 0.5);
        assert_eq!(empty.closest_point(&inside), None);
    }
}
