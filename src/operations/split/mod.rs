mod divide;
mod find;

pub use divide::split_at;
pub use find::{find_first_intersection, has_self_intersection, Crossing};

use tracing::{debug, warn};

use crate::geometry::ErodiblePolygon;
use crate::math::TOLERANCE;

/// Pieces smaller than this fraction of the parent's area count as empty.
const MIN_PIECE_RATIO: f64 = 1e-9;

/// Untangles a polygon that became self-intersecting during erosion.
///
/// The polygon is cut at its first crossing; the second piece is processed
/// next, then the first, until no piece crosses itself. Pieces cut off with
/// the opposite winding of the parent are the inverted loops erosion leaves
/// behind where the boundary narrows; they are dropped.
///
/// The number of cuts is capped. When the cap is hit the remaining pieces are
/// emitted as they are, with a warning.
#[derive(Debug, Clone, Copy)]
pub struct SelfIntersectionSplitter {
    max_iterations: usize,
}

impl SelfIntersectionSplitter {
    /// Creates a splitter allowing at most `max_iterations` cuts per polygon.
    #[must_use]
    pub fn new(max_iterations: usize) -> Self {
        Self { max_iterations }
    }

    /// Splits `polygon` until no piece intersects itself.
    ///
    /// `orientation` is the sign of the polygon's area before erosion.
    #[must_use]
    pub fn execute(&self, polygon: ErodiblePolygon, orientation: f64) -> Vec<ErodiblePolygon> {
        let min_piece_area = (polygon.area() * MIN_PIECE_RATIO).max(TOLERANCE * TOLERANCE);
        let mut pending = vec![polygon];
        let mut finished = Vec::new();
        let mut cuts = 0;

        while let Some(current) = pending.pop() {
            let Some(crossing) = find_first_intersection(&current.points) else {
                if cuts == 0 || keeps_orientation(&current, orientation, min_piece_area) {
                    finished.push(current);
                } else {
                    debug!(points = current.points.len(), "dropping inverted loop");
                }
                continue;
            };
            if cuts >= self.max_iterations {
                warn!(
                    max_iterations = self.max_iterations,
                    remaining = pending.len() + 1,
                    "self-intersection split limit reached, emitting pieces unresolved"
                );
                finished.push(current);
                finished.append(&mut pending);
                break;
            }
            cuts += 1;
            let (first, second) = split_at(&current, &crossing);
            pending.push(first);
            pending.push(second);
        }

        finished
    }
}

fn keeps_orientation(polygon: &ErodiblePolygon, orientation: f64, min_area: f64) -> bool {
    polygon.points.len() >= 3 && polygon.signed_area() * orientation > min_area
}
