// pd-core/src/units.rs
//
// Internal unit convention: K, Pa, J/mol, cm^3/mol. Values cross crate
// boundaries as plain `Real`; uom is used only at conversion points.

use std::fmt;
use std::str::FromStr;

use uom::si::f64::{
    MolarEnergy as UomMolarEnergy, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

use crate::{PdError, Real};

// Public canonical unit types (SI, f64)
pub type MolarEnergy = UomMolarEnergy;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

/// kPa -> Pa
#[inline]
pub fn kpa_to_pa(v: Real) -> Real {
    use uom::si::pressure::{kilopascal, pascal};
    Pressure::new::<kilopascal>(v).get::<pascal>()
}

/// MPa -> Pa
#[inline]
pub fn mpa_to_pa(v: Real) -> Real {
    use uom::si::pressure::{megapascal, pascal};
    Pressure::new::<megapascal>(v).get::<pascal>()
}

/// kJ/mol -> J/mol
#[inline]
pub fn kj_per_mol_to_j_per_mol(v: Real) -> Real {
    use uom::si::molar_energy::{joule_per_mole, kilojoule_per_mole};
    MolarEnergy::new::<kilojoule_per_mole>(v).get::<joule_per_mole>()
}

pub mod constants {
    use crate::Real;

    /// Molar gas constant [J/(mol·K)] (CODATA 2018, exact).
    pub const GAS_CONSTANT: Real = 8.314_462_618;

    /// 0 °C in kelvin.
    pub const ZERO_CELSIUS_K: Real = 273.15;

    pub const STANDARD_ATMOSPHERE_PA: Real = 101_325.0;

    pub const MMHG_PER_ATMOSPHERE: Real = 760.0;

    /// Pascal per millimetre of mercury, defined through the standard atmosphere.
    pub const PA_PER_MMHG: Real = STANDARD_ATMOSPHERE_PA / MMHG_PER_ATMOSPHERE;

    pub const PA_PER_BAR: Real = 1.0e5;

    /// J/cm^3 -> Pa (1 cm^3 = 1e-6 m^3).
    pub const PA_PER_J_PER_CM3: Real = 1.0e6;
}

/// Temperature unit used for display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "K", alias = "kelvin"))]
    Kelvin,
    #[cfg_attr(feature = "serde", serde(rename = "C", alias = "celsius"))]
    Celsius,
    #[cfg_attr(feature = "serde", serde(rename = "F", alias = "fahrenheit"))]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn from_kelvin(&self, v: Real) -> Real {
        use uom::si::thermodynamic_temperature::{degree_celsius, degree_fahrenheit, kelvin};
        let t = Temperature::new::<kelvin>(v);
        match self {
            Self::Kelvin => v,
            Self::Celsius => t.get::<degree_celsius>(),
            Self::Fahrenheit => t.get::<degree_fahrenheit>(),
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Kelvin => "K",
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for TemperatureUnit {
    type Err = PdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "k" | "kelvin" => Ok(Self::Kelvin),
            "c" | "°c" | "celsius" => Ok(Self::Celsius),
            "f" | "°f" | "fahrenheit" => Ok(Self::Fahrenheit),
            _ => Err(PdError::UnknownUnit {
                unit: s.to_string(),
                quantity: "temperature",
            }),
        }
    }
}

/// Pressure unit used for display and export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PressureUnit {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "Pa"))]
    Pascal,
    #[cfg_attr(feature = "serde", serde(rename = "kPa"))]
    Kilopascal,
    #[cfg_attr(feature = "serde", serde(rename = "MPa"))]
    Megapascal,
    #[cfg_attr(feature = "serde", serde(rename = "bar"))]
    Bar,
    #[cfg_attr(feature = "serde", serde(rename = "atm"))]
    Atmosphere,
    #[cfg_attr(feature = "serde", serde(rename = "mmHg", alias = "torr"))]
    MillimeterOfMercury,
}

impl PressureUnit {
    pub fn from_pascal(&self, v: Real) -> Real {
        use uom::si::pressure::{atmosphere, bar, kilopascal, megapascal, pascal};
        let p = Pressure::new::<pascal>(v);
        match self {
            Self::Pascal => v,
            Self::Kilopascal => p.get::<kilopascal>(),
            Self::Megapascal => p.get::<megapascal>(),
            Self::Bar => p.get::<bar>(),
            Self::Atmosphere => p.get::<atmosphere>(),
            // Same definition the Antoine conversion uses (101325/760).
            Self::MillimeterOfMercury => v / constants::PA_PER_MMHG,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Pascal => "Pa",
            Self::Kilopascal => "kPa",
            Self::Megapascal => "MPa",
            Self::Bar => "bar",
            Self::Atmosphere => "atm",
            Self::MillimeterOfMercury => "mmHg",
        }
    }
}

impl fmt::Display for PressureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for PressureUnit {
    type Err = PdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pa" | "pascal" => Ok(Self::Pascal),
            "kpa" => Ok(Self::Kilopascal),
            "mpa" => Ok(Self::Megapascal),
            "bar" => Ok(Self::Bar),
            "atm" => Ok(Self::Atmosphere),
            "mmhg" | "torr" => Ok(Self::MillimeterOfMercury),
            _ => Err(PdError::UnknownUnit {
                unit: s.to_string(),
                quantity: "pressure",
            }),
        }
    }
}
