use super::Point2;

/// Returns the point of segment `a → b` closest to `p`.
#[must_use]
pub fn closest_point_on_segment(p: &Point2, a: &Point2, b: &Point2) -> Point2 {
    let d = b - a;
    let len_sq = d.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return *a;
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = ((p - a).dot(&d) / len_sq).clamp(0.0, 1.0);
    a + d * t
}

/// Index and squared distance of the point in `points` nearest to `target`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn closest_point_index(points: &[Point2], target: &Point2) -> Option<(usize, f64)> {
    closest_index_by(points, target, |p| *p)
}

/// Like [`closest_point_index`] over any sequence of items that carry a position.
#[must_use]
pub fn closest_index_by<T>(
    items: &[T],
    target: &Point2,
    position: impl Fn(&T) -> Point2,
) -> Option<(usize, f64)> {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| (i, nalgebra::distance_squared(&position(item), target)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    #[test]
    fn closest_on_segment_projects_perpendicular() {
        let c = closest_point_on_segment(
            &Point2::new(1.0, 1.0),
            &Point2::new(0.0, 0.0),
            &Point2::new(2.0, 0.0),
        );
        assert!((c - Point2::new(1.0, 0.0)).norm() < TOL, "c={c}");
    }

    #[test]
    fn closest_on_segment_clamps_to_endpoint() {
        let a = Point2::new(0.0, 0.0);
        let c = closest_point_on_segment(&Point2::new(-1.0, 3.0), &a, &Point2::new(2.0, 0.0));
        assert_eq!(c, a);
        // Zero-length segments collapse to their start.
        assert_eq!(closest_point_on_segment(&Point2::new(3.0, 4.0), &a, &a), a);
    }

    #[test]
    fn closest_index_picks_nearest() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 5.0),
            Point2::new(2.0, 1.0),
        ];
        let (idx, d2) = closest_point_index(&pts, &Point2::new(2.0, 2.0)).unwrap_or((9, 0.0));
        assert_eq!(idx, 2);
        assert!((d2 - 1.0).abs() < TOL);
        assert!(closest_point_index(&[], &Point2::origin()).is_none());
    }
}
