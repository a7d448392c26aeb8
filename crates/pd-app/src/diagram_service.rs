//! Diagram assembly: resolve, normalize and evaluate the requested curves.

use pd_compounds::{Compound, Dataset, PhasePoint, normalize};
use pd_curves::{Curve, CurveEngine, CurveKind};
use tracing::{info, warn};

use crate::config::DiagramConfig;
use crate::error::AppResult;

/// Everything needed to draw or export one compound's phase diagram.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub name: String,
    pub formula: String,
    pub cas: String,
    pub triple: PhasePoint,
    /// Absent when the critical pressure is not tabulated
    pub critical: Option<PhasePoint>,
    /// In request order
    pub curves: Vec<Curve>,
    /// Requested curves skipped for lack of data
    pub omitted: Vec<CurveKind>,
}

impl Diagram {
    pub fn curve(&self, kind: CurveKind) -> Option<&Curve> {
        self.curves.iter().find(|c| c.kind() == kind)
    }

    /// Title used when none is configured.
    pub fn default_title(&self) -> String {
        format!("Phase diagram of {}", self.name)
    }
}

/// Build the diagram for `identifier` (name, formula or CAS number).
pub fn build_diagram(
    dataset: &Dataset,
    identifier: &str,
    config: &DiagramConfig,
) -> AppResult<Diagram> {
    let record = dataset.resolve(identifier)?;
    let compound = normalize(record)?;
    build_diagram_for(&compound, config)
}

/// Build the diagram for an already normalized compound.
///
/// Curves that fail only because the compound lacks the data for them are
/// left out and listed in [`Diagram::omitted`]; any other failure aborts.
pub fn build_diagram_for(compound: &Compound, config: &DiagramConfig) -> AppResult<Diagram> {
    config.validate()?;

    let engine = CurveEngine::with_samples(config.samples)?;
    let requests = config.curve_requests();
    let results = engine.evaluate(compound, &requests);

    let mut curves = Vec::with_capacity(requests.len());
    let mut omitted = Vec::new();

    for (request, result) in requests.iter().zip(results) {
        match result {
            Ok(curve) => {
                report_extrapolation(compound, &curve);
                curves.push(curve);
            }
            Err(e) if e.is_missing_data() => {
                warn!(compound = %compound.name, curve = %request.kind, "omitting curve: {}", e);
                omitted.push(request.kind);
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!(
        compound = %compound.name,
        curves = curves.len(),
        omitted = omitted.len(),
        "diagram built"
    );

    Ok(Diagram {
        name: compound.name.clone(),
        formula: compound.formula.clone(),
        cas: compound.cas.clone(),
        triple: compound.triple,
        critical: compound.critical(),
        curves,
        omitted,
    })
}

fn report_extrapolation(compound: &Compound, curve: &Curve) {
    let Some(fit) = curve.antoine_fit() else {
        return;
    };
    let outside = curve.extrapolated_points().len();
    if outside > 0 {
        let (t_min, t_max) = fit.valid_range();
        warn!(
            compound = %compound.name,
            samples = outside,
            "Antoine correlation extrapolated outside its fitted range {:.2} K .. {:.2} K",
            t_min,
            t_max
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use pd_compounds::{CompoundError, CompoundRecord};
    use pd_curves::CurveError;

    fn record() -> CompoundRecord {
        CompoundRecord {
            name: "testium".into(),
            formula: "Ts".into(),
            cas: "0-00-0".into(),
            triple_temperature_k: Some(200.0),
            triple_pressure_kpa: Some(10.0),
            critical_temperature_k: Some(400.0),
            critical_pressure_mpa: Some(5.0),
            enthalpy_fusion_kj_mol: Some(5.0),
            volume_fusion_cm3_mol: Some(2.0),
            enthalpy_sublimation_kj_mol: Some(30.0),
            enthalpy_vaporization_kj_mol: Some(25.0),
            ..Default::default()
        }
    }

    #[test]
    fn missing_antoine_curve_is_omitted() {
        let dataset = Dataset::from_records(vec![record()]);
        let diagram = build_diagram(&dataset, "Ts", &DiagramConfig::default()).unwrap();

        assert_eq!(diagram.curves.len(), 3);
        assert_eq!(diagram.omitted, vec![CurveKind::LiquidVaporAntoine]);
        assert_eq!(diagram.curves[0].kind(), CurveKind::SolidLiquid);
        assert_eq!(diagram.critical.unwrap().pressure_pa, 5.0e6);
        assert_eq!(diagram.default_title(), "Phase diagram of testium");
    }

    #[test]
    fn unknown_compound_surfaces_not_found() {
        let dataset = Dataset::from_records(vec![record()]);
        let err = build_diagram(&dataset, "ts", &DiagramConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            AppError::Compound(CompoundError::NotFound { .. })
        ));
    }

    #[test]
    fn invalid_range_is_not_omitted() {
        let dataset = Dataset::from_records(vec![record()]);
        let config = DiagramConfig {
            solid_vapor_range: 250.0,
            ..Default::default()
        };
        let err = build_diagram(&dataset, "testium", &config).unwrap_err();
        assert!(matches!(
            err,
            AppError::Curve(CurveError::InvalidRange { .. })
        ));
    }

    #[test]
    fn sample_count_is_honoured() {
        let dataset = Dataset::from_records(vec![record()]);
        let config = DiagramConfig {
            samples: 7,
            curves: vec![CurveKind::SolidVapor],
            ..Default::default()
        };
        let diagram = build_diagram(&dataset, "0-00-0", &config).unwrap();
        assert_eq!(diagram.curves.len(), 1);
        assert_eq!(diagram.curve(CurveKind::SolidVapor).unwrap().len(), 7);
        assert!(diagram.curve(CurveKind::SolidLiquid).is_none());
    }
}
