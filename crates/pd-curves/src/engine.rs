//! Phase-boundary evaluators.
//!
//! All four curves are anchored at the triple point and sampled on an evenly
//! spaced temperature grid:
//!
//! | curve | model | grid |
//! |-------|-------|------|
//! | solid-liquid | `P = Pt + (ΔH_fus/ΔV_fus)·ln(T/Tt)` | `[Tt - r, Tt]` (ΔV > 0) or `[Tt, Tt + r]` (ΔV < 0) |
//! | solid-vapor | `P = Pt·exp[(ΔH_sub/R)(1/Tt - 1/T)]` | `[Tt - r, Tt]` |
//! | liquid-vapor | `P = Pt·exp[(ΔH_vap/R)(1/Tt - 1/T)]` | `[Tt, Tc]` |
//! | liquid-vapor | `log10 P = A' - B'/(C' + T)` | `[Tt, Tc]` |
//!
//! Inputs are the normalized [`Compound`] (K, Pa, J/mol, cm³/mol).

use pd_compounds::Compound;
use pd_core::units::constants::{GAS_CONSTANT, PA_PER_J_PER_CM3};
use pd_core::{Real, ensure_finite, ensure_positive};
use rayon::prelude::*;
use tracing::debug;

use crate::curve::{Curve, CurveKind};
use crate::error::{CurveError, CurveResult};
use crate::sampling::{DEFAULT_SAMPLES, SampleGrid};

/// Default span of the melting curve away from the triple point [K].
pub const DEFAULT_MELTING_RANGE_K: Real = 5.0;

/// Default span of the sublimation curve below the triple point [K].
pub const DEFAULT_SUBLIMATION_RANGE_K: Real = 60.0;

/// One curve to evaluate, with an optional temperature span.
///
/// The span only applies to the solid-liquid and solid-vapor curves; the
/// liquid-vapor curves always run from the triple to the critical point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveRequest {
    pub kind: CurveKind,
    pub temp_range: Option<Real>,
}

impl From<CurveKind> for CurveRequest {
    fn from(kind: CurveKind) -> Self {
        Self {
            kind,
            temp_range: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurveEngine {
    samples: usize,
}

impl Default for CurveEngine {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
        }
    }
}

fn missing(compound: &Compound, what: &'static str) -> CurveError {
    CurveError::MissingData {
        compound: compound.name.clone(),
        what,
    }
}

fn resolve_range(range: Option<Real>, default: Real) -> CurveResult<Real> {
    ensure_positive(range.unwrap_or(default), "temperature range").map_err(|_| {
        CurveError::InvalidRange {
            what: "temperature range must be positive and finite",
        }
    })
}

/// Lower end of a grid that extends below the triple point.
fn below_triple(compound: &Compound, range: Real) -> CurveResult<Real> {
    let start = compound.triple.temperature_k - range;
    if start <= 0.0 {
        return Err(CurveError::InvalidRange {
            what: "temperature range reaches absolute zero",
        });
    }
    Ok(start)
}

/// `Pt·exp[(ΔH/R)(1/Tt - 1/T)]` over the grid.
fn clapeyron_exponential(
    compound: &Compound,
    enthalpy_j_per_mol: Real,
    grid: &SampleGrid,
) -> CurveResult<Vec<(Real, Real)>> {
    let tt = compound.triple.temperature_k;
    let pt = compound.triple.pressure_pa;
    let coeff = enthalpy_j_per_mol / GAS_CONSTANT;

    grid.points()
        .into_iter()
        .map(|t| -> CurveResult<(Real, Real)> {
            let p = pt * (coeff * (1.0 / tt - 1.0 / t)).exp();
            Ok((t, ensure_finite(p, "pressure")?))
        })
        .collect()
}

impl CurveEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine producing `samples` points per curve (at least 2).
    pub fn with_samples(samples: usize) -> CurveResult<Self> {
        if samples < 2 {
            return Err(CurveError::InvalidRange {
                what: "a curve needs at least 2 samples",
            });
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Melting curve.
    ///
    /// Runs from `Tt - temp_range` up to `Tt` when the melting volume is
    /// positive, and from `Tt` up to `Tt + temp_range` when it is negative
    /// (substances that expand on freezing, e.g. water).
    pub fn solid_liquid(&self, compound: &Compound, temp_range: Option<Real>) -> CurveResult<Curve> {
        let volume = compound
            .melting_volume
            .ok_or_else(|| missing(compound, "melting volume"))?;
        let enthalpy = compound
            .enthalpy_fusion_j_per_mol
            .ok_or_else(|| missing(compound, "melting enthalpy"))?;
        let range = resolve_range(temp_range, DEFAULT_MELTING_RANGE_K)?;

        let tt = compound.triple.temperature_k;
        let pt = compound.triple.pressure_pa;
        let grid = if volume.cm3_per_mol < 0.0 {
            SampleGrid::new(tt, tt + range, self.samples)?
        } else {
            SampleGrid::new(below_triple(compound, range)?, tt, self.samples)?
        };

        // J/cm^3 -> Pa
        let slope = ensure_finite(
            enthalpy / volume.cm3_per_mol * PA_PER_J_PER_CM3,
            "melting slope",
        )?;

        debug!(compound = %compound.name, %grid, source = ?volume.source, "solid-liquid curve");
        let points = grid
            .points()
            .into_iter()
            .map(|t| -> CurveResult<(Real, Real)> {
                let p = pt + slope * (t / tt).ln();
                Ok((t, ensure_finite(p, "pressure")?))
            })
            .collect::<CurveResult<Vec<_>>>()?;

        Ok(Curve::new(CurveKind::SolidLiquid, points))
    }

    /// Sublimation curve over `[Tt - temp_range, Tt]`.
    pub fn solid_vapor(&self, compound: &Compound, temp_range: Option<Real>) -> CurveResult<Curve> {
        let enthalpy = compound
            .enthalpy_sublimation_j_per_mol
            .ok_or_else(|| missing(compound, "sublimation enthalpy"))?;
        let range = resolve_range(temp_range, DEFAULT_SUBLIMATION_RANGE_K)?;

        let tt = compound.triple.temperature_k;
        let grid = SampleGrid::new(below_triple(compound, range)?, tt, self.samples)?;

        debug!(compound = %compound.name, %grid, "solid-vapor curve");
        let points = clapeyron_exponential(compound, enthalpy, &grid)?;
        Ok(Curve::new(CurveKind::SolidVapor, points))
    }

    /// Vaporization curve (Clausius-Clapeyron) over `[Tt, Tc]`.
    ///
    /// Uses the boiling-point vaporization enthalpy when tabulated, the
    /// standard one otherwise.
    pub fn liquid_vapor_clapeyron(&self, compound: &Compound) -> CurveResult<Curve> {
        let enthalpy = compound
            .enthalpy_vaporization
            .ok_or_else(|| missing(compound, "vaporization enthalpy"))?;

        let grid = SampleGrid::new(
            compound.triple.temperature_k,
            compound.critical_temperature_k,
            self.samples,
        )?;

        debug!(compound = %compound.name, %grid, source = ?enthalpy.source, "liquid-vapor curve (Clausius-Clapeyron)");
        let points = clapeyron_exponential(compound, enthalpy.j_per_mol, &grid)?;
        Ok(Curve::new(CurveKind::LiquidVaporClapeyron, points))
    }

    /// Vaporization curve (Antoine) over `[Tt, Tc]`.
    ///
    /// Samples outside the correlation's fitted range are kept; the returned
    /// curve carries the fit so the caller can flag them.
    pub fn liquid_vapor_antoine(&self, compound: &Compound) -> CurveResult<Curve> {
        let fit = compound
            .antoine
            .ok_or_else(|| missing(compound, "Antoine coefficients"))?;

        let grid = SampleGrid::new(
            compound.triple.temperature_k,
            compound.critical_temperature_k,
            self.samples,
        )?;

        debug!(compound = %compound.name, %grid, "liquid-vapor curve (Antoine)");
        let points = grid
            .points()
            .into_iter()
            .map(|t| -> CurveResult<(Real, Real)> {
                Ok((t, ensure_finite(fit.pressure_pa(t), "pressure")?))
            })
            .collect::<CurveResult<Vec<_>>>()?;

        Ok(Curve::new(CurveKind::LiquidVaporAntoine, points).with_antoine(fit))
    }

    /// Evaluate one request.
    pub fn evaluate_one(&self, compound: &Compound, request: CurveRequest) -> CurveResult<Curve> {
        match request.kind {
            CurveKind::SolidLiquid => self.solid_liquid(compound, request.temp_range),
            CurveKind::SolidVapor => self.solid_vapor(compound, request.temp_range),
            CurveKind::LiquidVaporClapeyron => self.liquid_vapor_clapeyron(compound),
            CurveKind::LiquidVaporAntoine => self.liquid_vapor_antoine(compound),
        }
    }

    /// Evaluate several independent curves in parallel.
    ///
    /// Results come back in request order; one failing curve does not affect
    /// the others.
    pub fn evaluate(
        &self,
        compound: &Compound,
        requests: &[CurveRequest],
    ) -> Vec<CurveResult<Curve>> {
        requests
            .par_iter()
            .map(|request| self.evaluate_one(compound, *request))
            .collect()
    }
}
