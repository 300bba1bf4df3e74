use crate::error::{OperationError, Result};

/// Parameters controlling a bake.
///
/// Lengths are in polygon units, areas in squared polygon units. The
/// heuristic thresholds have no derived justification; the defaults are tuned
/// for boundaries a few tens to a few thousands of units across.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BakeSettings {
    /// Width / height of the confined camera window.
    pub aspect_ratio: f64,
    /// Erosion applied per generation.
    pub shrink_step: f64,
    /// Stop once the cumulative erosion reaches this. `None` or `0` erodes
    /// until the boundary is exhausted.
    pub max_window_size: Option<f64>,
    /// Area below which a polygon is frozen. `None` derives
    /// `min(width, height) / 100` from the bounds of the input.
    pub min_area: Option<f64>,
    /// An erosion step whose area moves the wrong way by more than this is
    /// retried with flipped directions. Any step that fails to make progress
    /// freezes the polygon, whatever this is set to.
    pub area_tolerance: f64,
    /// Adjacent points closer than the square root of this are merged.
    pub merge_distance_squared: f64,
    /// Reflex corners whose edge normals turn by more than this get fix-up points.
    pub reflex_angle_degrees: f64,
    /// Fix-up point placement, as a fraction of the way toward each neighbor.
    pub fixup_ratio: f64,
    /// Splits allowed while untangling one eroded polygon.
    pub max_split_iterations: usize,
    /// Hard cap on the number of generations.
    pub max_generations: usize,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            shrink_step: 1.0,
            max_window_size: None,
            min_area: None,
            area_tolerance: 1.3,
            merge_distance_squared: 1e-4,
            reflex_angle_degrees: 90.0,
            fixup_ratio: 0.01,
            max_split_iterations: 500,
            max_generations: 10_000,
        }
    }
}

impl BakeSettings {
    /// Default settings for a window aspect ratio and erosion step.
    #[must_use]
    pub fn new(aspect_ratio: f64, shrink_step: f64) -> Self {
        Self {
            aspect_ratio,
            shrink_step,
            ..Self::default()
        }
    }

    /// Sets the window size at which baking stops.
    #[must_use]
    pub fn with_max_window_size(mut self, max_window_size: f64) -> Self {
        self.max_window_size = Some(max_window_size);
        self
    }

    /// Overrides the derived minimum area.
    #[must_use]
    pub fn with_min_area(mut self, min_area: f64) -> Self {
        self.min_area = Some(min_area);
        self
    }

    /// Sets the wrong-way area tolerance.
    #[must_use]
    pub fn with_area_tolerance(mut self, area_tolerance: f64) -> Self {
        self.area_tolerance = area_tolerance;
        self
    }

    /// Sets the squared merge distance.
    #[must_use]
    pub fn with_merge_distance_squared(mut self, merge_distance_squared: f64) -> Self {
        self.merge_distance_squared = merge_distance_squared;
        self
    }

    /// Sets the splitter's iteration cap.
    #[must_use]
    pub fn with_max_split_iterations(mut self, max_split_iterations: usize) -> Self {
        self.max_split_iterations = max_split_iterations;
        self
    }

    /// Sets the generation cap.
    #[must_use]
    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    /// The maximum window size, with `0` meaning "unbounded".
    #[must_use]
    pub fn effective_max_window_size(&self) -> Option<f64> {
        self.max_window_size.filter(|&m| m > 0.0)
    }

    /// Checks every parameter.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(OperationError::InvalidInput(format!(
                    "{name} must be positive and finite, got {value}"
                )))
            }
        };
        let non_negative = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(OperationError::InvalidInput(format!(
                    "{name} must be non-negative and finite, got {value}"
                )))
            }
        };

        positive("aspect_ratio", self.aspect_ratio)?;
        positive("shrink_step", self.shrink_step)?;
        if let Some(max) = self.max_window_size {
            non_negative("max_window_size", max)?;
        }
        if let Some(min_area) = self.min_area {
            non_negative("min_area", min_area)?;
        }
        non_negative("area_tolerance", self.area_tolerance)?;
        non_negative("merge_distance_squared", self.merge_distance_squared)?;
        if !(self.reflex_angle_degrees > 0.0 && self.reflex_angle_degrees <= 180.0) {
            return Err(OperationError::InvalidInput(format!(
                "reflex_angle_degrees must be in (0, 180], got {}",
                self.reflex_angle_degrees
            ))
            .into());
        }
        if !(self.fixup_ratio > 0.0 && self.fixup_ratio < 0.5) {
            return Err(OperationError::InvalidInput(format!(
                "fixup_ratio must be in (0, 0.5), got {}",
                self.fixup_ratio
            ))
            .into());
        }
        if self.max_split_iterations == 0 || self.max_generations == 0 {
            return Err(OperationError::InvalidInput(
                "iteration caps must be at least 1".to_owned(),
            )
            .into());
        }
        Ok(())
    }
}
