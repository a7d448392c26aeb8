//! Conversion of tabulated records into the internal unit system.
//!
//! Internal units: temperature K, pressure Pa, molar enthalpy J/mol, molar
//! volume cm³/mol. Every conversion happens here; the curve formulas never
//! convert units themselves.

use pd_core::units::{constants, kj_per_mol_to_j_per_mol, kpa_to_pa, mpa_to_pa};
use pd_core::Real;
use tracing::debug;

use crate::error::{CompoundError, CompoundResult};
use crate::record::{AntoineBasis, CompoundRecord};

/// A (temperature, pressure) state in K and Pa.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhasePoint {
    pub temperature_k: Real,
    pub pressure_pa: Real,
}

/// Which melting-volume column was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeSource {
    Tabulated,
    Calculated,
}

/// Which vaporization-enthalpy column was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnthalpySource {
    Boiling,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeltingVolume {
    pub cm3_per_mol: Real,
    pub source: VolumeSource,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaporizationEnthalpy {
    pub j_per_mol: Real,
    pub source: EnthalpySource,
}

/// Antoine coefficients for `log10(P/Pa) = a - b / (c + T/K)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AntoineFit {
    pub a: Real,
    pub b: Real,
    pub c: Real,
    /// Lower end of the fitted range [K]; `-inf` when not tabulated
    pub t_min_k: Real,
    /// Upper end of the fitted range [K]; `+inf` when not tabulated
    pub t_max_k: Real,
}

impl AntoineFit {
    /// Convert coefficients fitted for mmHg and °C.
    pub fn from_mmhg_celsius(a: Real, b: Real, c: Real, t_min_c: Real, t_max_c: Real) -> Self {
        Self {
            a: a + constants::PA_PER_MMHG.log10(),
            b,
            c: c - constants::ZERO_CELSIUS_K,
            t_min_k: t_min_c + constants::ZERO_CELSIUS_K,
            t_max_k: t_max_c + constants::ZERO_CELSIUS_K,
        }
    }

    /// Convert coefficients fitted for bar and K.
    pub fn from_bar_kelvin(a: Real, b: Real, c: Real, t_min_k: Real, t_max_k: Real) -> Self {
        Self {
            a: a + constants::PA_PER_BAR.log10(),
            b,
            c,
            t_min_k,
            t_max_k,
        }
    }

    /// Vapor pressure [Pa] at `temperature_k`.
    pub fn pressure_pa(&self, temperature_k: Real) -> Real {
        10f64.powf(self.a - self.b / (self.c + temperature_k))
    }

    /// Whether `temperature_k` lies inside the fitted range.
    pub fn contains(&self, temperature_k: Real) -> bool {
        (self.t_min_k..=self.t_max_k).contains(&temperature_k)
    }

    pub fn valid_range(&self) -> (Real, Real) {
        (self.t_min_k, self.t_max_k)
    }
}

/// A compound in internal units with fallback columns already resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub name: String,
    pub formula: String,
    pub cas: String,
    pub triple: PhasePoint,
    pub critical_temperature_k: Real,
    /// Only used to mark the critical point on a diagram.
    pub critical_pressure_pa: Option<Real>,
    pub enthalpy_fusion_j_per_mol: Option<Real>,
    pub melting_volume: Option<MeltingVolume>,
    pub enthalpy_sublimation_j_per_mol: Option<Real>,
    pub enthalpy_vaporization: Option<VaporizationEnthalpy>,
    pub antoine: Option<AntoineFit>,
}

impl Compound {
    /// The critical point, when its pressure is tabulated.
    pub fn critical(&self) -> Option<PhasePoint> {
        self.critical_pressure_pa.map(|pressure_pa| PhasePoint {
            temperature_k: self.critical_temperature_k,
            pressure_pa,
        })
    }
}

/// Missing and NaN cells are both "undefined".
fn defined(v: Option<Real>) -> Option<Real> {
    v.filter(|x| x.is_finite())
}

/// Normalize a tabulated record.
///
/// Fails with [`CompoundError::InvalidRecord`] when the triple point is
/// missing or non-positive, or the critical temperature does not exceed the
/// triple temperature.
pub fn normalize(record: &CompoundRecord) -> CompoundResult<Compound> {
    let invalid = |what: &'static str| CompoundError::InvalidRecord {
        compound: record.name.clone(),
        what,
    };

    let triple_temperature_k = defined(record.triple_temperature_k)
        .filter(|t| *t > 0.0)
        .ok_or_else(|| invalid("triple temperature must be a positive number"))?;
    let triple_pressure_pa = defined(record.triple_pressure_kpa)
        .filter(|p| *p > 0.0)
        .map(kpa_to_pa)
        .ok_or_else(|| invalid("triple pressure must be a positive number"))?;
    let critical_temperature_k = defined(record.critical_temperature_k)
        .ok_or_else(|| invalid("critical temperature is missing"))?;
    if critical_temperature_k <= triple_temperature_k {
        return Err(invalid(
            "critical temperature must exceed triple temperature",
        ));
    }

    Ok(Compound {
        name: record.name.clone(),
        formula: record.formula.clone(),
        cas: record.cas.clone(),
        triple: PhasePoint {
            temperature_k: triple_temperature_k,
            pressure_pa: triple_pressure_pa,
        },
        critical_temperature_k,
        critical_pressure_pa: defined(record.critical_pressure_mpa).map(mpa_to_pa),
        enthalpy_fusion_j_per_mol: defined(record.enthalpy_fusion_kj_mol)
            .map(kj_per_mol_to_j_per_mol),
        melting_volume: melting_volume(record),
        enthalpy_sublimation_j_per_mol: defined(record.enthalpy_sublimation_kj_mol)
            .map(kj_per_mol_to_j_per_mol),
        enthalpy_vaporization: vaporization_enthalpy(record),
        antoine: antoine_fit(record),
    })
}

fn melting_volume(record: &CompoundRecord) -> Option<MeltingVolume> {
    if let Some(cm3_per_mol) = defined(record.volume_fusion_cm3_mol) {
        return Some(MeltingVolume {
            cm3_per_mol,
            source: VolumeSource::Tabulated,
        });
    }
    let cm3_per_mol = defined(record.volume_fusion_calc_cm3_mol)?;
    debug!(compound = %record.name, "using derived melting volume");
    Some(MeltingVolume {
        cm3_per_mol,
        source: VolumeSource::Calculated,
    })
}

fn vaporization_enthalpy(record: &CompoundRecord) -> Option<VaporizationEnthalpy> {
    if let Some(kj) = defined(record.enthalpy_vaporization_boil_kj_mol) {
        return Some(VaporizationEnthalpy {
            j_per_mol: kj_per_mol_to_j_per_mol(kj),
            source: EnthalpySource::Boiling,
        });
    }
    let kj = defined(record.enthalpy_vaporization_kj_mol)?;
    debug!(compound = %record.name, "using standard vaporization enthalpy");
    Some(VaporizationEnthalpy {
        j_per_mol: kj_per_mol_to_j_per_mol(kj),
        source: EnthalpySource::Standard,
    })
}

fn antoine_fit(record: &CompoundRecord) -> Option<AntoineFit> {
    let a = defined(record.antoine_a)?;
    let b = defined(record.antoine_b)?;
    let c = defined(record.antoine_c)?;
    let t_min = defined(record.antoine_tmin).unwrap_or(Real::NEG_INFINITY);
    let t_max = defined(record.antoine_tmax).unwrap_or(Real::INFINITY);

    Some(match record.antoine_basis.unwrap_or_default() {
        AntoineBasis::MmHgCelsius => AntoineFit::from_mmhg_celsius(a, b, c, t_min, t_max),
        AntoineBasis::BarKelvin => AntoineFit::from_bar_kelvin(a, b, c, t_min, t_max),
    })
}
