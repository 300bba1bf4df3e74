pub mod distance_2d;
pub mod intersect_2d;
pub mod polygon_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Returns `v` scaled to unit length, or the zero vector when `v` is too short
/// to have a meaningful direction.
#[must_use]
pub fn normalize_or_zero(v: Vector2) -> Vector2 {
    let len = v.norm();
    if len < TOLERANCE {
        Vector2::zeros()
    } else {
        v / len
    }
}

/// Inverse of linear interpolation: where `value` lies between `a` and `b`,
/// clamped to `[0, 1]`. Returns `0` for an empty interval.
#[must_use]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    let span = b - a;
    if span.abs() < TOLERANCE {
        return 0.0;
    }
    ((value - a) / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_short_vector_is_zero() {
        assert_eq!(normalize_or_zero(Vector2::new(1e-12, 0.0)), Vector2::zeros());
        let n = normalize_or_zero(Vector2::new(3.0, 4.0));
        assert!((n.x - 0.6).abs() < TOLERANCE);
        assert!((n.y - 0.8).abs() < TOLERANCE);
    }

    #[test]
    fn inverse_lerp_clamps() {
        assert!((inverse_lerp(2.0, 4.0, 3.0) - 0.5).abs() < TOLERANCE);
        assert!(inverse_lerp(2.0, 4.0, 1.0).abs() < TOLERANCE);
        assert!((inverse_lerp(2.0, 4.0, 9.0) - 1.0).abs() < TOLERANCE);
        assert!(inverse_lerp(2.0, 2.0, 2.0).abs() < TOLERANCE);
    }
}
