use super::polygon_2d::cross_2d;
use super::{Point2, TOLERANCE};

/// Intersection of segments `a0 → a1` and `b0 → b1`.
///
/// Returns the crossing point with its parameters `t` along `a` and `u` along
/// `b`, both clamped to `[0, 1]`. Segments whose directions differ by a sine
/// below [`TOLERANCE`] count as parallel and never intersect; endpoint
/// contacts within [`TOLERANCE`] do.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;
    let denom = cross_2d(da.x, da.y, db.x, db.y);
    if denom.abs() <= TOLERANCE * da.norm() * db.norm() {
        return None;
    }
    let offset = b0 - a0;
    let t = cross_2d(offset.x, offset.y, db.x, db.y) / denom;
    let u = cross_2d(offset.x, offset.y, da.x, da.y) / denom;

    let within = |s: f64| (-TOLERANCE..=1.0 + TOLERANCE).contains(&s);
    if !within(t) || !within(u) {
        return None;
    }
    let t = t.clamp(0.0, 1.0);
    Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
}
