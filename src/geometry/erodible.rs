use super::shrink_point::ShrinkPoint;
use crate::math::polygon_2d::signed_area_by;
use crate::math::Point2;

/// Polygon being eroded by the bake.
///
/// Orientation is not stored: it is recovered from the sign of the shoelace
/// area (positive means counter-clockwise, interior on the left of each edge).
#[derive(Debug, Clone, PartialEq)]
pub struct ErodiblePolygon {
    pub points: Vec<ShrinkPoint>,
    /// Width / height of the confined camera window.
    pub aspect_ratio: f64,
    /// Total erosion applied so far; the key of the generation this polygon
    /// belongs to.
    pub window_diagonal: f64,
    /// Bumped whenever the point count or the way shrink directions are
    /// derived changes. Two generations with equal states can be interpolated.
    pub state: u32,
    /// Locations where this polygon was cut off from its parent.
    pub intersection_points: Vec<Point2>,
    /// Set on contours nested inside an odd number of other contours. A hole
    /// erodes outward, into the region around it, and grows.
    pub hole: bool,
    frozen: bool,
}

impl ErodiblePolygon {
    /// Creates a polygon from a raw contour.
    #[must_use]
    pub fn new(contour: &[Point2], aspect_ratio: f64) -> Self {
        Self::from_points(contour.iter().copied().map(ShrinkPoint::new).collect(), aspect_ratio)
    }

    /// Creates a polygon from already prepared points.
    #[must_use]
    pub fn from_points(points: Vec<ShrinkPoint>, aspect_ratio: f64) -> Self {
        Self {
            points,
            aspect_ratio,
            window_diagonal: 0.0,
            state: 0,
            intersection_points: Vec::new(),
            hole: false,
            frozen: false,
        }
    }

    /// Signed shoelace area; positive for counter-clockwise polygons.
    #[must_use]
    pub fn signed_area(&self) -> f64 {
        signed_area_by(&self.points, |p| p.position)
    }

    /// Absolute area.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Whether the points wind clockwise.
    #[must_use]
    pub fn is_clockwise(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// `1.0` when the region being eroded lies to the left of each edge,
    /// `-1.0` when it lies to the right.
    ///
    /// For an outer contour that region is the polygon's own interior; for a
    /// hole it is the outside.
    #[must_use]
    pub fn interior_sign(&self) -> f64 {
        let own = if self.is_clockwise() { -1.0 } else { 1.0 };
        if self.hole {
            -own
        } else {
            own
        }
    }

    /// Point positions in order.
    #[must_use]
    pub fn positions(&self) -> Vec<Point2> {
        self.points.iter().map(|p| p.position).collect()
    }

    /// Whether another erosion step can move this polygon.
    ///
    /// A frozen polygon has all shrink directions zeroed.
    #[must_use]
    pub fn is_shrinkable(&self) -> bool {
        !self.frozen
    }

    /// Zeroes every shrink direction and marks the polygon as no longer
    /// shrinkable.
    pub fn freeze(&mut self) {
        for p in &mut self.points {
            p.shrink_direction.fill(0.0);
        }
        if !self.frozen {
            self.frozen = true;
            self.state += 1;
        }
    }

    /// Moves every point along its shrink direction.
    pub fn advance(&mut self, amount: f64) {
        for p in &mut self.points {
            p.advance(amount);
        }
    }

    /// Reverses every shrink direction.
    pub fn flip_directions(&mut self) {
        for p in &mut self.points {
            p.shrink_direction = -p.shrink_direction;
        }
    }
}
