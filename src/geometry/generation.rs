use super::erodible::ErodiblePolygon;
use crate::math::Point2;

/// Query-side snapshot of an eroded polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct BakedPolygon {
    pub points: Vec<Point2>,
    /// Cut locations inherited from splitting; used to bridge disjoint pieces.
    pub intersection_points: Vec<Point2>,
    pub state: u32,
    /// Whether this polygon bounds a hole in the region.
    pub hole: bool,
}

impl From<&ErodiblePolygon> for BakedPolygon {
    fn from(polygon: &ErodiblePolygon) -> Self {
        Self {
            points: polygon.positions(),
            intersection_points: polygon.intersection_points.clone(),
            state: polygon.state,
            hole: polygon.hole,
        }
    }
}

/// Topology fingerprint of a generation: the state of each polygon, in order.
///
/// Generations with equal fingerprints have index-aligned polygons whose
/// points moved linearly between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenerationState(Vec<u32>);

impl GenerationState {
    /// Number of polygons in the generation.
    #[must_use]
    pub fn polygon_count(&self) -> usize {
        self.0.len()
    }

    /// Per-polygon states.
    #[must_use]
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// All polygons existing after a given amount of erosion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Generation {
    pub window_diagonal: f64,
    pub polygons: Vec<BakedPolygon>,
}

impl Generation {
    /// Snapshots a set of erodible polygons.
    #[must_use]
    pub fn capture(window_diagonal: f64, polygons: &[ErodiblePolygon]) -> Self {
        Self {
            window_diagonal,
            polygons: polygons.iter().map(BakedPolygon::from).collect(),
        }
    }

    /// Derived topology fingerprint.
    #[must_use]
    pub fn state(&self) -> GenerationState {
        GenerationState(self.polygons.iter().map(|p| p.state).collect())
    }
}
