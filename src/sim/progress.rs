//! Progress estimator - periodic coverage resampling
//!
//! Scanning a quarter-million texels every frame is off the table. Every
//! 30th frame the estimator samples the surface at a fixed stride, rounds
//! to an integer percentage, and publishes to the store only when the value
//! actually changed.

use crate::consts::{PROGRESS_INTERVAL, SAMPLE_STRIDE};
use crate::sim::state::GameStore;
use crate::sim::surface::CoverageSurface;

/// Schedules and publishes the cleaned percentage.
#[derive(Debug, Default)]
pub struct ProgressEstimator;

impl ProgressEstimator {
    pub fn new() -> Self {
        Self
    }

    /// Resample on schedule. Returns the newly published percentage, or
    /// `None` when off-schedule or unchanged.
    pub fn tick(
        &self,
        frame: u64,
        surface: &CoverageSurface,
        store: &mut GameStore,
    ) -> Option<u8> {
        if frame == 0 || !frame.is_multiple_of(PROGRESS_INTERVAL) {
            return None;
        }
        let percent = Self::sample(surface);
        if percent == store.cleaned_percentage() {
            return None;
        }
        store.set_cleaned_percentage(percent);
        Some(percent)
    }

    /// One strided estimate converted to a clamped integer percentage.
    ///
    /// The estimate samples, so the displayed value can drift a point from
    /// the true area; it is not guaranteed strictly monotonic across ticks.
    pub fn sample(surface: &CoverageSurface) -> u8 {
        let fraction = surface.estimate_cleaned_fraction(SAMPLE_STRIDE);
        (fraction * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::surface::Texel;

    #[test]
    fn only_runs_on_schedule() {
        let estimator = ProgressEstimator::new();
        let mut surface = CoverageSurface::new(21);
        let mut store = GameStore::new();
        surface.erase(Texel { x: 256, y: 256 }, 800.0);

        for frame in [0, 1, 29, 31, 59] {
            assert_eq!(estimator.tick(frame, &surface, &mut store), None);
        }
        assert_eq!(estimator.tick(30, &surface, &mut store), Some(100));
        assert_eq!(store.cleaned_percentage(), 100);
    }

    #[test]
    fn publishes_only_on_change() {
        let estimator = ProgressEstimator::new();
        let surface = CoverageSurface::new(22);
        let mut store = GameStore::new();

        // Untouched surface reads 0, which the store already holds
        assert_eq!(estimator.tick(30, &surface, &mut store), None);
        assert_eq!(estimator.tick(60, &surface, &mut store), None);
    }

    #[test]
    fn sample_stays_within_bounds() {
        let mut surface = CoverageSurface::new(23);
        assert_eq!(ProgressEstimator::sample(&surface), 0);

        surface.erase(Texel { x: 128, y: 128 }, 60.0);
        let partial = ProgressEstimator::sample(&surface);
        assert!(partial <= 100);

        surface.erase(Texel { x: 256, y: 256 }, 800.0);
        assert_eq!(ProgressEstimator::sample(&surface), 100);
    }
}
