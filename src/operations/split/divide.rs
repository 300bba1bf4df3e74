use super::find::Crossing;
use crate::geometry::{ErodiblePolygon, ShrinkPoint};
use crate::math::distance_2d::closest_index_by;
use crate::math::polygon_2d::leftmost_index_by;
use crate::math::Point2;

/// Cuts `parent` at `crossing` into two polygons.
///
/// The first child holds the run `edge_j + 1 ..= edge_i` (wrapping) and starts
/// at its leftmost point; the second holds `edge_i + 1 ..= edge_j` and starts
/// at the point closest to the crossing. Both end with the crossing point, so
/// together they carry the parent's points plus two copies of it.
#[must_use]
pub fn split_at(parent: &ErodiblePolygon, crossing: &Crossing) -> (ErodiblePolygon, ErodiblePolygon) {
    let (i, j) = (crossing.edge_i, crossing.edge_j);
    let cut = ShrinkPoint::new(crossing.point);

    let mut first: Vec<ShrinkPoint> = parent.points[j + 1..]
        .iter()
        .chain(&parent.points[..=i])
        .copied()
        .collect();
    first.push(cut);
    let start = leftmost_index_by(&first, |p| p.position);
    first.rotate_left(start);

    let mut second: Vec<ShrinkPoint> = parent.points[i + 1..=j].to_vec();
    second.push(cut);
    let anchor = closest_index_by(&second, &crossing.point, |p| p.position).map_or(0, |(k, _)| k);
    second.rotate_left(anchor);

    let mut first = child(parent, first);
    let mut second = child(parent, second);

    for ip in &parent.intersection_points {
        if nearest_squared(&first, ip) <= nearest_squared(&second, ip) {
            first.intersection_points.push(*ip);
        } else {
            second.intersection_points.push(*ip);
        }
    }
    first.intersection_points.push(crossing.point);
    second.intersection_points.push(crossing.point);

    (first, second)
}

fn child(parent: &ErodiblePolygon, points: Vec<ShrinkPoint>) -> ErodiblePolygon {
    let mut child = ErodiblePolygon::from_points(points, parent.aspect_ratio);
    child.window_diagonal = parent.window_diagonal;
    child.state = parent.state + 1;
    child.hole = parent.hole;
    child
}

fn nearest_squared(polygon: &ErodiblePolygon, target: &Point2) -> f64 {
    closest_index_by(&polygon.points, target, |p| p.position).map_or(f64::INFINITY, |(_, d)| d)
}
