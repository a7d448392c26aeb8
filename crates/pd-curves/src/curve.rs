//! Curve kinds and sampled curves.

use std::fmt;
use std::str::FromStr;

use pd_compounds::AntoineFit;
use pd_core::Real;

/// The four phase-boundary evaluators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CurveKind {
    /// Melting curve (Clausius-Clapeyron, logarithmic form)
    SolidLiquid,
    /// Sublimation curve (Clausius-Clapeyron)
    SolidVapor,
    /// Vaporization curve (Clausius-Clapeyron)
    LiquidVaporClapeyron,
    /// Vaporization curve (Antoine correlation)
    LiquidVaporAntoine,
}

impl CurveKind {
    pub const ALL: [CurveKind; 4] = [
        CurveKind::SolidLiquid,
        CurveKind::SolidVapor,
        CurveKind::LiquidVaporClapeyron,
        CurveKind::LiquidVaporAntoine,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CurveKind::SolidLiquid => "solid_liquid",
            CurveKind::SolidVapor => "solid_vapor",
            CurveKind::LiquidVaporClapeyron => "liquid_vapor_clapeyron",
            CurveKind::LiquidVaporAntoine => "liquid_vapor_antoine",
        }
    }

    /// Get human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            CurveKind::SolidLiquid => "Solid-liquid",
            CurveKind::SolidVapor => "Solid-vapor",
            CurveKind::LiquidVaporClapeyron => "Liquid-vapor (Clausius-Clapeyron)",
            CurveKind::LiquidVaporAntoine => "Liquid-vapor (Antoine)",
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CurveKind {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "solid_liquid" | "melting" | "fusion" => Ok(CurveKind::SolidLiquid),
            "solid_vapor" | "sublimation" => Ok(CurveKind::SolidVapor),
            "liquid_vapor_clapeyron" | "clapeyron" | "vaporization" => {
                Ok(CurveKind::LiquidVaporClapeyron)
            }
            "liquid_vapor_antoine" | "antoine" => Ok(CurveKind::LiquidVaporAntoine),
            _ => Err("unknown curve kind"),
        }
    }
}

/// An ordered sequence of (temperature [K], pressure [Pa]) samples.
///
/// Antoine curves also carry the normalized coefficients and their fitted
/// range so callers can flag extrapolated samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    kind: CurveKind,
    points: Vec<(Real, Real)>,
    antoine: Option<AntoineFit>,
}

impl Curve {
    pub(crate) fn new(kind: CurveKind, points: Vec<(Real, Real)>) -> Self {
        Self {
            kind,
            points,
            antoine: None,
        }
    }

    pub(crate) fn with_antoine(mut self, fit: AntoineFit) -> Self {
        self.antoine = Some(fit);
        self
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn points(&self) -> &[(Real, Real)] {
        &self.points
    }

    pub fn temperatures(&self) -> Vec<Real> {
        self.points.iter().map(|(t, _)| *t).collect()
    }

    pub fn pressures(&self) -> Vec<Real> {
        self.points.iter().map(|(_, p)| *p).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<(Real, Real)> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<(Real, Real)> {
        self.points.last().copied()
    }

    /// Normalized Antoine coefficients (Antoine curves only).
    pub fn antoine_fit(&self) -> Option<&AntoineFit> {
        self.antoine.as_ref()
    }

    /// Samples outside the Antoine fitted range. Empty for other curves.
    pub fn extrapolated_points(&self) -> Vec<(Real, Real)> {
        match &self.antoine {
            Some(fit) => self
                .points
                .iter()
                .copied()
                .filter(|(t, _)| !fit.contains(*t))
                .collect(),
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_keys_roundtrip() {
        for kind in CurveKind::ALL {
            assert_eq!(kind.key().parse::<CurveKind>().unwrap(), kind);
        }
        assert_eq!("antoine".parse::<CurveKind>().unwrap(), CurveKind::LiquidVaporAntoine);
        assert_eq!("Solid-Vapor".parse::<CurveKind>().unwrap(), CurveKind::SolidVapor);
        assert!("triple".parse::<CurveKind>().is_err());
    }

    #[test]
    fn extrapolated_points_use_fitted_range() {
        let fit = AntoineFit {
            a: 10.0,
            b: 1700.0,
            c: -40.0,
            t_min_k: 280.0,
            t_max_k: 370.0,
        };
        let curve = Curve::new(
            CurveKind::LiquidVaporAntoine,
            vec![(270.0, 1.0), (300.0, 2.0), (380.0, 3.0)],
        )
        .with_antoine(fit);
        assert_eq!(curve.extrapolated_points(), vec![(270.0, 1.0), (380.0, 3.0)]);
        assert_eq!(curve.antoine_fit(), Some(&fit));

        let plain = Curve::new(CurveKind::SolidVapor, vec![(270.0, 1.0)]);
        assert!(plain.extrapolated_points().is_empty());
        assert!(plain.antoine_fit().is_none());
    }

    #[test]
    fn accessors() {
        let curve = Curve::new(CurveKind::SolidLiquid, vec![(1.0, 10.0), (2.0, 20.0)]);
        assert_eq!(curve.temperatures(), vec![1.0, 2.0]);
        assert_eq!(curve.pressures(), vec![10.0, 20.0]);
        assert_eq!(curve.first(), Some((1.0, 10.0)));
        assert_eq!(curve.last(), Some((2.0, 20.0)));
        assert_eq!(curve.len(), 2);
        assert!(!curve.is_empty());
    }
}
