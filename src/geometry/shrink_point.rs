use crate::math::{Point2, Vector2};

/// How a point's shrink direction was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShrinkCase {
    /// Both neighbor edges are supported by the same canonical direction.
    Canonical,
    /// The neighbor edges are supported by different canonical directions;
    /// the offset was solved from the triangle they form.
    Bracketed,
    /// Fallback: the raw normal projected onto the rectangle.
    Clamped,
}

/// A polygon vertex together with the offset it follows while the polygon erodes.
///
/// `shrink_direction` is not unit length: its magnitude scales how far the
/// point travels per unit of erosion, so that the polygon shrinks by a
/// rectangle of the camera's aspect ratio instead of by a disc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShrinkPoint {
    pub position: Point2,
    pub shrink_direction: Vector2,
    /// Set on the auxiliary points inserted around sharp reflex corners.
    /// Crossings confined to one such cluster are ignored by the
    /// self-intersection test.
    pub cant_intersect: bool,
    /// `None` until directions are first computed.
    pub case: Option<ShrinkCase>,
}

impl ShrinkPoint {
    /// Creates a regular point with no shrink direction yet.
    #[must_use]
    pub fn new(position: Point2) -> Self {
        Self {
            position,
            shrink_direction: Vector2::zeros(),
            cant_intersect: false,
            case: None,
        }
    }

    /// Creates a reflex fix-up point.
    #[must_use]
    pub fn fixup(position: Point2, shrink_direction: Vector2) -> Self {
        Self {
            position,
            shrink_direction,
            cant_intersect: true,
            case: None,
        }
    }

    /// Moves the point along its shrink direction by `amount`.
    pub fn advance(&mut self, amount: f64) {
        self.position += self.shrink_direction * amount;
    }
}
