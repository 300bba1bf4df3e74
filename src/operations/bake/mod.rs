mod settings;
pub mod trim;

pub use settings::BakeSettings;

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, trace, warn};

use super::erode::ErosionStep;
use super::shrink::ShrinkDirections;
use super::simplify::merge_close_points;
use super::split::SelfIntersectionSplitter;
use crate::error::{GeometryError, OperationError, Result};
use crate::geometry::{ErodiblePolygon, Generation};
use crate::math::polygon_2d::{signed_area_2d, winding_number_2d, Bounds2};
use crate::math::{Point2, TOLERANCE};
use crate::table::BakedTable;

/// Phases of a bake, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BakePhase {
    Initializing,
    Eroding,
    Terminal,
}

/// Precomputes the eroded boundaries of a set of contours for every window
/// size, from zero up to the size at which nothing is left to erode.
///
/// # Algorithm
///
/// 1. Every contour becomes an erodible polygon with its shrink directions
///    computed; this is generation 0
/// 2. Each following generation erodes every shrinkable polygon by
///    `shrink_step`, merges points that came too close and splits pieces that
///    started crossing themselves
/// 3. Baking stops at `max_window_size`, once no outer polygon is
///    shrinkable, or when a generation erodes no outer polygon (that
///    generation is not emitted)
/// 4. Generations reproducible by interpolation are trimmed
///
/// A contour nested inside an odd number of other contours is a hole. Holes
/// erode outward and grow alongside the outer contours, but they never keep
/// a bake going on their own.
#[derive(Debug, Clone)]
pub struct Oven {
    contours: Vec<Vec<Point2>>,
    settings: BakeSettings,
}

/// Per-bake constants derived from the settings and the input bounds.
struct Stepper {
    shrink: ShrinkDirections,
    erosion: ErosionStep,
    splitter: SelfIntersectionSplitter,
    merge_distance_squared: f64,
}

impl Oven {
    /// Creates an oven for `contours`. Orientation of each contour is free;
    /// holes are given as additional contours.
    #[must_use]
    pub fn new(contours: Vec<Vec<Point2>>, settings: BakeSettings) -> Self {
        Self { contours, settings }
    }

    /// Bakes the full table.
    ///
    /// # Errors
    ///
    /// - `OperationError::InvalidInput` for invalid settings, no contours, a
    ///   contour of fewer than 3 points, or non-finite coordinates
    /// - `GeometryError::Degenerate` for a contour enclosing no area
    pub fn bake(&self) -> Result<BakedTable> {
        self.bake_cancellable(&AtomicBool::new(false))
    }

    /// Bakes the full table, checking `cancel` between generations.
    ///
    /// # Errors
    ///
    /// Same as [`Oven::bake`], plus `OperationError::Cancelled` once `cancel`
    /// is set.
    pub fn bake_cancellable(&self, cancel: &AtomicBool) -> Result<BakedTable> {
        let generations = self.bake_generations(cancel)?;
        let baked = generations.len();
        let table = BakedTable::from_generations(generations);
        info!(
            generations = baked,
            retained = table.len(),
            max_window_diagonal = table.max_window_diagonal(),
            phase = ?BakePhase::Terminal,
            "bake complete"
        );
        Ok(table)
    }

    /// Every generation of the bake, untrimmed.
    ///
    /// # Errors
    ///
    /// Same as [`Oven::bake_cancellable`].
    pub fn bake_generations(&self, cancel: &AtomicBool) -> Result<Vec<Generation>> {
        debug!(contours = self.contours.len(), phase = ?BakePhase::Initializing, "starting bake");
        let (mut polygons, stepper) = self.initialize()?;
        let mut generations = vec![Generation::capture(0.0, &polygons)];
        let max_window_size = self.settings.effective_max_window_size();
        let mut window_diagonal = 0.0;

        loop {
            if cancel.load(Ordering::Relaxed) {
                return Err(OperationError::Cancelled {
                    generations: generations.len(),
                }
                .into());
            }
            if generations.len() >= self.settings.max_generations {
                warn!(
                    max_generations = self.settings.max_generations,
                    window_diagonal, "generation limit reached, stopping bake"
                );
                break;
            }

            let (next, eroded) = stepper.erode_generation(&polygons);
            if !eroded {
                debug!(window_diagonal, "nothing left to erode");
                break;
            }
            window_diagonal += self.settings.shrink_step;
            polygons = next;
            generations.push(Generation::capture(window_diagonal, &polygons));
            debug!(
                generation = generations.len() - 1,
                window_diagonal,
                polygons = polygons.len(),
                phase = ?BakePhase::Eroding,
                "generation baked"
            );

            if max_window_size.is_some_and(|max| window_diagonal >= max) {
                debug!(window_diagonal, "maximum window size reached");
                break;
            }
            if !polygons.iter().any(|p| !p.hole && p.is_shrinkable()) {
                debug!(window_diagonal, "no shrinkable polygon left");
                break;
            }
        }

        Ok(generations)
    }

    fn initialize(&self) -> Result<(Vec<ErodiblePolygon>, Stepper)> {
        self.settings.validate()?;
        if self.contours.is_empty() {
            return Err(OperationError::InvalidInput("no contours to bake".to_owned()).into());
        }
        for (index, contour) in self.contours.iter().enumerate() {
            if contour.len() < 3 {
                return Err(OperationError::InvalidInput(format!(
                    "contour {index} has {} points, at least 3 are required",
                    contour.len()
                ))
                .into());
            }
            if contour.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
                return Err(OperationError::InvalidInput(format!(
                    "contour {index} has non-finite coordinates"
                ))
                .into());
            }
            if signed_area_2d(contour).abs() <= TOLERANCE {
                return Err(GeometryError::Degenerate(format!("contour {index} encloses no area")).into());
            }
        }

        let min_area = match self.settings.min_area {
            Some(min_area) => min_area,
            None => Bounds2::of_contours(&self.contours).map_or(0.0, |b| b.width().min(b.height()) / 100.0),
        };
        let stepper = Stepper {
            shrink: ShrinkDirections::new(self.settings.reflex_angle_degrees, self.settings.fixup_ratio),
            erosion: ErosionStep::new(self.settings.shrink_step, min_area, self.settings.area_tolerance),
            splitter: SelfIntersectionSplitter::new(self.settings.max_split_iterations),
            merge_distance_squared: self.settings.merge_distance_squared,
        };

        let polygons: Vec<ErodiblePolygon> = self
            .contours
            .iter()
            .zip(hole_flags(&self.contours))
            .map(|(contour, hole)| {
                let mut polygon = ErodiblePolygon::new(contour, self.settings.aspect_ratio);
                polygon.hole = hole;
                stepper.shrink.apply(&mut polygon);
                polygon
            })
            .collect();
        debug!(
            min_area,
            holes = polygons.iter().filter(|p| p.hole).count(),
            "bake initialized"
        );
        Ok((polygons, stepper))
    }
}

/// Whether each contour lies inside an odd number of the others.
fn hole_flags(contours: &[Vec<Point2>]) -> Vec<bool> {
    contours
        .iter()
        .enumerate()
        .map(|(i, contour)| {
            let depth = contours
                .iter()
                .enumerate()
                .filter(|&(j, other)| {
                    j != i && contour.first().is_some_and(|p| winding_number_2d(p, other) != 0)
                })
                .count();
            depth % 2 == 1
        })
        .collect()
}

impl Stepper {
    /// Erodes every polygon of a generation once. Returns the next generation
    /// and whether any outer polygon actually moved.
    ///
    /// An outer polygon whose pieces would not end up smaller than it was is
    /// carried over frozen instead.
    fn erode_generation(&self, polygons: &[ErodiblePolygon]) -> (Vec<ErodiblePolygon>, bool) {
        let mut next = Vec::with_capacity(polygons.len());
        let mut eroded = false;

        for polygon in polygons {
            if !polygon.is_shrinkable() {
                next.push(polygon.clone());
                continue;
            }
            let mut working = polygon.clone();
            self.shrink.apply(&mut working);
            let signed_area = working.signed_area();
            if signed_area.abs() <= TOLERANCE {
                working.freeze();
                next.push(working);
                continue;
            }
            let before = working.clone();

            if !self.erosion.apply(&mut working) {
                next.push(working);
                continue;
            }

            if merge_close_points(&mut working.points, self.merge_distance_squared) {
                working.state += 1;
            }
            let pieces = self.splitter.execute(working, signed_area.signum());
            let remaining: f64 = pieces.iter().map(ErodiblePolygon::area).sum();
            if pieces.is_empty() || (!before.hole && remaining >= signed_area.abs()) {
                trace!(pieces = pieces.len(), remaining, area = signed_area.abs(), "erosion rejected after split");
                let mut frozen = before;
                frozen.freeze();
                next.push(frozen);
            } else {
                eroded |= !before.hole;
                next.extend(pieces);
            }
        }

        (next, eroded)
    }
}
