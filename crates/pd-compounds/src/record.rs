//! Dataset rows in their tabulated units.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CompoundError, CompoundResult};

/// Units the Antoine coefficients of a record were fitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AntoineBasis {
    /// `log10(P/mmHg) = A - B / (C + T/°C)`
    #[default]
    #[serde(rename = "mmHg-C")]
    MmHgCelsius,
    /// `log10(P/bar) = A - B / (C + T/K)` (NIST WebBook form)
    #[serde(rename = "bar-K")]
    BarKelvin,
}

impl fmt::Display for AntoineBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MmHgCelsius => write!(f, "mmHg-C"),
            Self::BarKelvin => write!(f, "bar-K"),
        }
    }
}

/// One compound as tabulated.
///
/// Column units are fixed by the field names. Empty cells are `None`.
/// The melting volume and the vaporization enthalpy each come as a pair of
/// alternative columns; [`crate::normalize`] picks one of each.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompoundRecord {
    pub name: String,
    pub formula: String,
    /// CAS registry number
    pub cas: String,

    pub triple_temperature_k: Option<f64>,
    pub triple_pressure_kpa: Option<f64>,
    pub critical_temperature_k: Option<f64>,
    pub critical_pressure_mpa: Option<f64>,

    pub enthalpy_fusion_kj_mol: Option<f64>,
    /// Tabulated melting volume (V_liquid - V_solid)
    pub volume_fusion_cm3_mol: Option<f64>,
    /// Melting volume derived from phase densities
    pub volume_fusion_calc_cm3_mol: Option<f64>,
    pub enthalpy_sublimation_kj_mol: Option<f64>,
    /// Standard (298 K) vaporization enthalpy
    pub enthalpy_vaporization_kj_mol: Option<f64>,
    /// Vaporization enthalpy at the normal boiling point
    pub enthalpy_vaporization_boil_kj_mol: Option<f64>,

    pub antoine_a: Option<f64>,
    pub antoine_b: Option<f64>,
    pub antoine_c: Option<f64>,
    pub antoine_tmin: Option<f64>,
    pub antoine_tmax: Option<f64>,
    pub antoine_basis: Option<AntoineBasis>,
}

impl CompoundRecord {
    /// True when `identifier` equals the name, formula, or CAS number exactly.
    pub fn matches_identifier(&self, identifier: &str) -> bool {
        self.name == identifier || self.formula == identifier || self.cas == identifier
    }

    /// Case-insensitive substring match over the identification fields.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        [&self.name, &self.formula, &self.cas]
            .iter()
            .any(|field| field.to_ascii_lowercase().contains(&query))
    }

    /// Load a single compound from a YAML file with the same fields as a CSV row.
    pub fn from_yaml_path(path: &Path) -> CompoundResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CompoundError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        serde_yaml::from_str(&content).map_err(|e| CompoundError::Yaml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn water() -> CompoundRecord {
        CompoundRecord {
            name: "water".into(),
            formula: "H2O".into(),
            cas: "7732-18-5".into(),
            ..Default::default()
        }
    }

    #[test]
    fn identifier_match_is_exact() {
        let rec = water();
        assert!(rec.matches_identifier("water"));
        assert!(rec.matches_identifier("H2O"));
        assert!(rec.matches_identifier("7732-18-5"));
        assert!(!rec.matches_identifier("Water"));
        assert!(!rec.matches_identifier("h2o"));
        assert!(!rec.matches_identifier("wat"));
        assert!(!rec.matches_identifier(" water"));
    }

    #[test]
    fn query_match_is_loose() {
        let rec = water();
        assert!(rec.matches_query("WAT"));
        assert!(rec.matches_query("h2o"));
        assert!(rec.matches_query("7732"));
        assert!(rec.matches_query(""));
        assert!(!rec.matches_query("benzene"));
    }

    #[test]
    fn yaml_compound_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        let mut file = File::create(&path).unwrap();
        writeln!(
            file,
            r#"
name: custom
formula: X2
cas: "0-00-0"
triple_temperature_k: 100.0
triple_pressure_kpa: 1.0
critical_temperature_k: 200.0
antoine_basis: bar-K
"#
        )
        .unwrap();

        let rec = CompoundRecord::from_yaml_path(&path).unwrap();
        assert_eq!(rec.name, "custom");
        assert_eq!(rec.triple_temperature_k, Some(100.0));
        assert_eq!(rec.enthalpy_fusion_kj_mol, None);
        assert_eq!(rec.antoine_basis, Some(AntoineBasis::BarKelvin));
    }

    #[test]
    fn yaml_compound_file_missing() {
        let dir = tempdir().unwrap();
        let result = CompoundRecord::from_yaml_path(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(CompoundError::Io { .. })));
    }
}
