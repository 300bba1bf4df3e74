use crate::geometry::ShrinkPoint;

/// Merges adjacent points closer than `sqrt(threshold_squared)`.
///
/// Two fix-up points are never merged with each other. When only one of a
/// close pair is a fix-up point, the fix-up point is the one removed;
/// otherwise the second point of the pair goes. The polygon is never reduced
/// below 3 points. Returns `true` if any point was removed.
pub fn merge_close_points(points: &mut Vec<ShrinkPoint>, threshold_squared: f64) -> bool {
    let mut changed = false;
    let mut i = 0;
    while points.len() > 3 && i < points.len() {
        let j = (i + 1) % points.len();
        let a = points[i];
        let b = points[j];
        let close = nalgebra::distance_squared(&a.position, &b.position) < threshold_squared;
        if !close || (a.cant_intersect && b.cant_intersect) {
            i += 1;
            continue;
        }
        let remove = if a.cant_intersect && !b.cant_intersect { i } else { j };
        points.remove(remove);
        changed = true;
        if remove < i {
            i -= 1;
        }
    }
    changed
}
