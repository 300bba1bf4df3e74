use tracing::trace;

use crate::geometry::{ErodiblePolygon, ShrinkPoint};

/// Results smaller than this fraction of the area before the step count as a
/// collapse to a point rather than an inversion.
const COLLAPSE_RATIO: f64 = 1e-9;

/// Advances every point of a polygon along its shrink direction by one
/// erosion increment.
///
/// Eroding an outer contour must reduce its area; eroding a hole must grow
/// it. Any other result is a failed step.
///
/// # Degenerate cases
///
/// - The area moved the wrong way by more than `area_tolerance`: the
///   inward/outward assumption was wrong, so the directions are flipped and
///   the offset re-applied twice.
/// - The area still did not move the right way, the polygon turned inside
///   out, or it was already smaller than `min_area`: the polygon is restored
///   to its pre-erosion shape and frozen. `min_area` does not apply to holes.
#[derive(Debug, Clone, Copy)]
pub struct ErosionStep {
    amount: f64,
    min_area: f64,
    area_tolerance: f64,
}

impl ErosionStep {
    /// Creates an erosion step of `amount`.
    #[must_use]
    pub fn new(amount: f64, min_area: f64, area_tolerance: f64) -> Self {
        Self {
            amount,
            min_area,
            area_tolerance,
        }
    }

    /// Erodes `polygon` in place.
    ///
    /// Returns `false` when the polygon is not shrinkable; it is then left at
    /// its pre-erosion shape with every shrink direction zeroed.
    pub fn apply(&self, polygon: &mut ErodiblePolygon) -> bool {
        if !polygon.is_shrinkable() {
            return false;
        }

        let hole = polygon.hole;
        let signed_before = polygon.signed_area();
        let area_before = signed_before.abs();
        if !hole && area_before < self.min_area {
            trace!(area_before, min_area = self.min_area, "polygon below minimal area");
            polygon.freeze();
            return false;
        }
        // Positive when the area moved against the erosion.
        let regress = |area_after: f64| {
            if hole {
                area_before - area_after
            } else {
                area_after - area_before
            }
        };

        let original = polygon.points.clone();
        polygon.advance(self.amount);
        let mut signed_after = polygon.signed_area();
        if regress(signed_after.abs()) > self.area_tolerance {
            polygon.flip_directions();
            polygon.advance(self.amount * 2.0);
            signed_after = polygon.signed_area();
        }

        if regress(signed_after.abs()) >= 0.0 {
            trace!(hole, area_before, area_after = signed_after.abs(), "erosion did not progress");
            Self::restore_and_freeze(polygon, original);
            return false;
        }

        if signed_after * signed_before < 0.0 && signed_after.abs() > area_before * COLLAPSE_RATIO {
            trace!(signed_before, signed_after, "erosion turned the polygon inside out");
            Self::restore_and_freeze(polygon, original);
            return false;
        }

        polygon.window_diagonal += self.amount;
        true
    }

    fn restore_and_freeze(polygon: &mut ErodiblePolygon, original: Vec<ShrinkPoint>) {
        polygon.points = original;
        polygon.freeze();
    }
}
