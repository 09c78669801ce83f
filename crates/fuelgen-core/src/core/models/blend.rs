use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The two fuel categories the mixer can produce blends for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuelType {
    Gasoline,
    Diesel,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FuelType::Gasoline => "gasoline",
            FuelType::Diesel => "diesel",
        }
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown fuel type: '{0}'")]
pub struct ParseFuelTypeError(pub String);

impl FromStr for FuelType {
    type Err = ParseFuelTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gasoline" => Ok(FuelType::Gasoline),
            "diesel" => Ok(FuelType::Diesel),
            other => Err(ParseFuelTypeError(other.to_string())),
        }
    }
}

/// The fuel-type-specific ignition rating of a blend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BlendRating {
    Gasoline { ron: f64, mon: f64, aki: f64 },
    Diesel { cn: f64 },
}

/// Bulk properties shared by both fuel types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BulkProperties {
    pub lhv: f64,
    pub density: f64,
    pub o2_wt_percent: f64,
    pub oxidative_stability: f64,
    pub gum_content: f64,
    pub acidity: f64,
}

/// One row of the blend table: two components, a volume split, and the
/// derived property vector.
///
/// Every derived property is a deterministic function of the two referenced
/// compounds and the volume split; no randomness survives past the draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Blend {
    pub fuel_type: FuelType,
    pub component_1: String,
    pub component_1_vol_pct: f64,
    pub component_2: String,
    pub component_2_vol_pct: f64,
    pub rating: BlendRating,
    pub bulk: BulkProperties,
}
