//! Evenly spaced temperature grids.

use std::fmt;

use pd_core::{Real, ensure_finite};

use crate::error::{CurveError, CurveResult};

/// Samples per curve unless overridden.
pub const DEFAULT_SAMPLES: usize = 100;

/// A closed, evenly spaced grid from `start` to `end` (both included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleGrid {
    pub start: Real,
    pub end: Real,
    pub num_points: usize,
}

impl SampleGrid {
    pub fn new(start: Real, end: Real, num_points: usize) -> CurveResult<Self> {
        ensure_finite(start, "grid start")?;
        ensure_finite(end, "grid end")?;

        if num_points < 2 {
            return Err(CurveError::InvalidRange {
                what: "a curve needs at least 2 samples",
            });
        }

        if (start - end).abs() < 1e-12 {
            return Err(CurveError::InvalidRange {
                what: "start and end must differ",
            });
        }

        Ok(Self {
            start,
            end,
            num_points,
        })
    }

    /// Generate all points; the last one is exactly `end`.
    pub fn points(&self) -> Vec<Real> {
        let delta = (self.end - self.start) / (self.num_points - 1) as Real;

        let mut points: Vec<Real> = (0..self.num_points)
            .map(|i| self.start + i as Real * delta)
            .collect();

        // Ensure exact endpoint
        points[self.num_points - 1] = self.end;
        points
    }
}

impl fmt::Display for SampleGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} .. {} ({} points)",
            self.start, self.end, self.num_points
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_grid_generation() {
        let grid = SampleGrid::new(300.0, 400.0, 5).unwrap();
        let points = grid.points();
        assert_eq!(points.len(), 5);
        assert!((points[0] - 300.0).abs() < 1e-9);
        assert!((points[2] - 350.0).abs() < 1e-9);
        assert_eq!(points[4], 400.0);
    }

    #[test]
    fn descending_grid() {
        let points = SampleGrid::new(10.0, 0.0, 3).unwrap().points();
        assert_eq!(points, vec![10.0, 5.0, 0.0]);
    }

    #[test]
    fn endpoints_are_exact() {
        let points = SampleGrid::new(273.16, 647.096, 100).unwrap().points();
        assert_eq!(points[0], 273.16);
        assert_eq!(points[99], 647.096);
    }

    #[test]
    fn reject_invalid_point_count() {
        assert!(matches!(
            SampleGrid::new(300.0, 400.0, 1),
            Err(CurveError::InvalidRange { .. })
        ));
    }

    #[test]
    fn reject_identical_bounds() {
        assert!(SampleGrid::new(300.0, 300.0, 5).is_err());
    }

    #[test]
    fn reject_non_finite_bounds() {
        assert!(matches!(
            SampleGrid::new(f64::NAN, 300.0, 5),
            Err(CurveError::Numeric(_))
        ));
    }
}
