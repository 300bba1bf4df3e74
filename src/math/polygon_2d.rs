use super::{Point2, TOLERANCE};

/// Computes the signed area of a polygon (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area_2d(points: &[Point2]) -> f64 {
    signed_area_by(points, |p| *p)
}

/// Shoelace formula over any sequence of items that carry a position.
#[must_use]
pub fn signed_area_by<T>(items: &[T], position: impl Fn(&T) -> Point2) -> f64 {
    let n = items.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let a = position(&items[i]);
        let b = position(&items[(i + 1) % n]);
        sum += a.x * b.y - b.x * a.y;
    }
    sum * 0.5
}

/// Index of the leftmost vertex (smallest x), breaking ties by smallest y.
///
/// Returns `0` for an empty slice.
#[must_use]
pub fn leftmost_index_by<T>(items: &[T], position: impl Fn(&T) -> Point2) -> usize {
    let mut best = 0;
    for i in 1..items.len() {
        let p = position(&items[i]);
        let b = position(&items[best]);
        if p.x < b.x - TOLERANCE || ((p.x - b.x).abs() < TOLERANCE && p.y < b.y) {
            best = i;
        }
    }
    best
}

/// Winding number of `point` with respect to the closed polygon `verts`.
///
/// Non-zero => inside, zero => outside.
#[must_use]
pub fn winding_number_2d(point: &Point2, verts: &[Point2]) -> i32 {
    let n = verts.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = verts[i];
        let b = verts[(i + 1) % n];
        let side = cross_2d(b.x - a.x, b.y - a.y, point.x - a.x, point.y - a.y);
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
#[must_use]
pub fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}

/// An axis-aligned bounding rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Bounds2 {
    /// Bounds enclosing every point of every contour, or `None` when there are
    /// no points at all.
    #[must_use]
    pub fn of_contours(contours: &[Vec<Point2>]) -> Option<Self> {
        let mut points = contours.iter().flatten();
        let first = *points.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in points {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Extent along x.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Extent along y.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Point2> {
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ]
    }

    #[test]
    fn signed_area_ccw_square() {
        assert!((signed_area_2d(&square()) - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_cw_square() {
        let mut pts = square();
        pts.reverse();
        assert!((signed_area_2d(&pts) + 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn signed_area_degenerate() {
        assert!(signed_area_2d(&[Point2::new(0.0, 0.0)]).abs() < TOLERANCE);
        assert!(signed_area_2d(&[]).abs() < TOLERANCE);
    }

    #[test]
    fn winding_inside_and_outside() {
        let pts = square();
        assert_eq!(winding_number_2d(&Point2::new(0.5, 0.5), &pts), 1);
        assert_eq!(winding_number_2d(&Point2::new(1.5, 0.5), &pts), 0);
        let mut cw = pts;
        cw.reverse();
        assert_eq!(winding_number_2d(&Point2::new(0.5, 0.5), &cw), -1);
    }

    #[test]
    fn bounds_of_contours() {
        let contours = vec![square(), vec![Point2::new(-2.0, 3.0)]];
        let b = Bounds2::of_contours(&contours).unwrap_or(Bounds2 {
            min: Point2::origin(),
            max: Point2::origin(),
        });
        assert!((b.width() - 3.0).abs() < TOLERANCE);
        assert!((b.height() - 3.0).abs() < TOLERANCE);
        assert!(Bounds2::of_contours(&[]).is_none());
    }
}
