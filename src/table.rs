use tracing::error;

use crate::error::{OperationError, QueryError, Result};
use crate::geometry::{BakedPolygon, Generation};
use crate::math::distance_2d::closest_point_index;
use crate::math::inverse_lerp;
use crate::operations::bake::trim::trim_generations;

/// Eroded boundaries keyed by window size, ready for runtime lookup.
///
/// Immutable once built; share it between cameras behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BakedTable {
    generations: Vec<Generation>,
}

impl BakedTable {
    /// Builds a table from generations ordered by window size, dropping the
    /// ones that interpolation can reproduce.
    #[must_use]
    pub fn from_generations(generations: Vec<Generation>) -> Self {
        Self {
            generations: trim_generations(generations),
        }
    }

    /// The retained generations, ordered by window size.
    #[must_use]
    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// Number of retained generations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether the table holds no generation at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Largest window size the table distinguishes; larger queries return the
    /// last generation.
    #[must_use]
    pub fn max_window_diagonal(&self) -> f64 {
        self.generations.last().map_or(0.0, |g| g.window_diagonal)
    }

    /// Polygons confining a window of size `window_size`.
    ///
    /// Between two retained generations of equal state the polygons are
    /// interpolated; across a topology change the nearer generation is
    /// returned unchanged, which shows up as a pop at that zoom level.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` if `window_size` is NaN
    /// - `QueryError::TopologyMismatch` if two generations of equal state hold
    ///   different polygon counts
    pub fn query(&self, window_size: f64) -> Result<Generation> {
        if window_size.is_nan() {
            return Err(OperationError::InvalidInput("window size is NaN".to_owned()).into());
        }
        let (Some(first), Some(last)) = (self.generations.first(), self.generations.last()) else {
            return Ok(Generation::default());
        };
        if window_size >= last.window_diagonal {
            return Ok(last.clone());
        }
        if window_size <= first.window_diagonal {
            return Ok(first.clone());
        }

        let upper = self
            .generations
            .partition_point(|g| g.window_diagonal <= window_size);
        let lower = &self.generations[upper - 1];
        let upper = &self.generations[upper];

        if lower.state() == upper.state() {
            interpolate(lower, upper, window_size)
        } else if window_size - lower.window_diagonal <= upper.window_diagonal - window_size {
            Ok(lower.clone())
        } else {
            Ok(upper.clone())
        }
    }
}

/// Moves every point of `lower` toward its closest point in the same polygon
/// of `upper`, by the fraction `window_size` lies between the two.
///
/// Intersection points and states are taken from `lower`.
///
/// # Errors
///
/// Returns `QueryError::TopologyMismatch` if the polygon counts differ.
pub fn interpolate(lower: &Generation, upper: &Generation, window_size: f64) -> Result<Generation> {
    if lower.polygons.len() != upper.polygons.len() {
        error!(
            lower = lower.window_diagonal,
            upper = upper.window_diagonal,
            lower_count = lower.polygons.len(),
            upper_count = upper.polygons.len(),
            "interpolating between generations of different topology"
        );
        return Err(QueryError::TopologyMismatch {
            lower: lower.window_diagonal,
            upper: upper.window_diagonal,
            lower_count: lower.polygons.len(),
            upper_count: upper.polygons.len(),
            window_size,
        }
        .into());
    }

    let t = inverse_lerp(lower.window_diagonal, upper.window_diagonal, window_size);
    let polygons = lower
        .polygons
        .iter()
        .zip(&upper.polygons)
        .map(|(lo, hi)| BakedPolygon {
            points: lo
                .points
                .iter()
                .map(|p| {
                    let target = closest_point_index(&hi.points, p).map_or(*p, |(k, _)| hi.points[k]);
                    p + (target - p) * t
                })
                .collect(),
            intersection_points: lo.intersection_points.clone(),
            state: lo.state,
            hole: lo.hole,
        })
        .collect();

    Ok(Generation {
        window_diagonal: window_size,
        polygons,
    })
}
