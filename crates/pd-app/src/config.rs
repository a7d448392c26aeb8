//! Diagram configuration (YAML).
//!
//! Every field is optional:
//!
//! ```yaml
//! dataset: data/my_compounds.csv
//! curves: [solid_vapor, liquid_vapor_antoine]
//! samples: 200
//! solid_liquid_range: 5.0
//! solid_vapor_range: 40.0
//! display:
//!   temperature_unit: C
//!   pressure_unit: kPa
//!   scale: log
//!   legend: true
//!   title: Water
//! output: water.svg
//! ```

use std::path::{Path, PathBuf};

use pd_core::{PressureUnit, TemperatureUnit};
use pd_curves::{
    CurveKind, CurveRequest, DEFAULT_MELTING_RANGE_K, DEFAULT_SAMPLES,
    DEFAULT_SUBLIMATION_RANGE_K,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Pressure axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scale {
    #[default]
    Log,
    Linear,
}

/// How a diagram is presented: units, axis scale, legend, title, size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayOptions {
    pub temperature_unit: TemperatureUnit,
    pub pressure_unit: PressureUnit,
    pub scale: Scale,
    pub legend: bool,
    /// Defaults to "Phase diagram of <name>"
    pub title: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Kelvin,
            pressure_unit: PressureUnit::Pascal,
            scale: Scale::Log,
            legend: true,
            title: None,
            width: 1200,
            height: 1000,
        }
    }
}

/// Everything a diagram request can configure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiagramConfig {
    /// CSV dataset; the built-in dataset when absent
    pub dataset: Option<PathBuf>,
    pub curves: Vec<CurveKind>,
    pub samples: usize,
    /// Melting curve span [K]
    pub solid_liquid_range: f64,
    /// Sublimation curve span [K]
    pub solid_vapor_range: f64,
    pub display: DisplayOptions,
    pub output: Option<PathBuf>,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            dataset: None,
            curves: CurveKind::ALL.to_vec(),
            samples: DEFAULT_SAMPLES,
            solid_liquid_range: DEFAULT_MELTING_RANGE_K,
            solid_vapor_range: DEFAULT_SUBLIMATION_RANGE_K,
            display: DisplayOptions::default(),
            output: None,
        }
    }
}

impl DiagramConfig {
    pub fn validate(&self) -> AppResult<()> {
        if self.curves.is_empty() {
            return Err(AppError::InvalidInput(
                "at least one curve must be requested".to_string(),
            ));
        }
        if self.samples < 2 {
            return Err(AppError::InvalidInput(format!(
                "samples must be at least 2 (got {})",
                self.samples
            )));
        }
        for (name, range) in [
            ("solid_liquid_range", self.solid_liquid_range),
            ("solid_vapor_range", self.solid_vapor_range),
        ] {
            if !(range.is_finite() && range > 0.0) {
                return Err(AppError::InvalidInput(format!(
                    "{name} must be a positive number of kelvin (got {range})"
                )));
            }
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(AppError::InvalidInput(
                "image width and height must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// One request per configured curve, duplicates removed, order kept.
    pub fn curve_requests(&self) -> Vec<CurveRequest> {
        let mut kinds: Vec<CurveKind> = Vec::with_capacity(self.curves.len());
        for kind in &self.curves {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }

        kinds
            .into_iter()
            .map(|kind| CurveRequest {
                kind,
                temp_range: match kind {
                    CurveKind::SolidLiquid => Some(self.solid_liquid_range),
                    CurveKind::SolidVapor => Some(self.solid_vapor_range),
                    CurveKind::LiquidVaporClapeyron | CurveKind::LiquidVaporAntoine => None,
                },
            })
            .collect()
    }
}

/// Load and validate a configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<DiagramConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| AppError::ConfigFileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let config: DiagramConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults_request_all_four_curves() {
        let config = DiagramConfig::default();
        config.validate().unwrap();
        let requests = config.curve_requests();
        assert_eq!(requests.len(), 4);
        assert_eq!(requests[0].temp_range, Some(5.0));
        assert_eq!(requests[1].temp_range, Some(60.0));
        assert_eq!(requests[2].temp_range, None);
    }

    #[test]
    fn partial_yaml_uses_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("diagram.yaml");
        fs::write(
            &path,
            r#"
curves: [solid_vapor, liquid_vapor_antoine, solid_vapor]
solid_vapor_range: 40
display:
  temperature_unit: C
  pressure_unit: kPa
  scale: linear
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.samples, 100);
        assert_eq!(config.display.temperature_unit, TemperatureUnit::Celsius);
        assert_eq!(config.display.pressure_unit, PressureUnit::Kilopascal);
        assert_eq!(config.display.scale, Scale::Linear);
        assert!(config.display.legend);

        let requests = config.curve_requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].kind, CurveKind::SolidVapor);
        assert_eq!(requests[0].temp_range, Some(40.0));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let config = DiagramConfig {
            samples: 1,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::InvalidInput(_))));

        let config = DiagramConfig {
            solid_liquid_range: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = DiagramConfig {
            curves: Vec::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("typo.yaml");
        fs::write(&path, "sampels: 10\n").unwrap();
        assert!(matches!(load_config(&path), Err(AppError::Config(_))));
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempdir().unwrap();
        let result = load_config(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(AppError::ConfigFileRead { .. })));
    }
}
