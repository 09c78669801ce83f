use crate::core::models::compound::{Family, Property};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// The compiled-in default reference document, mirroring the published
/// seed/bounds/trend constants.
const DEFAULT_REFERENCE_TOML: &str = include_str!("default_reference.toml");

/// Inclusive physical range for one property.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct PropertyRange {
    pub min: f64,
    pub max: f64,
}

impl PropertyRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Inclusive valid carbon-count range for one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CarbonRange {
    pub min: u32,
    pub max: u32,
}

/// A known reference compound the generator interpolates from.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SeedCompound {
    pub name: String,
    pub family: Family,
    pub carbons: u32,
    pub properties: BTreeMap<Property, f64>,
}

#[derive(Debug, Error)]
pub enum TableError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Bounds for {property} are inverted (min > max)")]
    InvertedBounds { property: Property },
    #[error("Carbon range for {family} is empty or inverted")]
    InvalidCarbonRange { family: Family },
    #[error("Carbon range for {family} starts below its structural minimum of {minimum}")]
    CarbonRangeBelowStructuralMinimum { family: Family, minimum: u32 },
    #[error("No carbon ranges declared; at least one family is required")]
    NoFamilies,
    #[error("{family} has a trend for {property} but no bounds are declared for it")]
    TrendWithoutBounds { family: Family, property: Property },
    #[error("Seed '{name}' value for {property} lies outside the declared bounds")]
    SeedOutOfBounds { name: String, property: Property },
    #[error("Seed '{name}' carbon count lies outside the {family} carbon range")]
    SeedCarbonsOutOfRange { name: String, family: Family },
}

#[derive(Debug, Deserialize)]
struct RawTables {
    bounds: BTreeMap<Property, PropertyRange>,
    carbon_ranges: BTreeMap<Family, CarbonRange>,
    trends: BTreeMap<Family, BTreeMap<Property, f64>>,
    seeds: Vec<SeedCompound>,
}

/// The validated, read-only parameter set consumed by the generator.
///
/// Built from a TOML document; [`ReferenceTables::builtin`] yields the
/// compiled-in defaults. Map lookups are `BTreeMap`-backed so iteration order
/// is stable, which keeps seeded generation runs reproducible.
#[derive(Debug, Clone)]
pub struct ReferenceTables {
    bounds: BTreeMap<Property, PropertyRange>,
    carbon_ranges: BTreeMap<Family, CarbonRange>,
    trends: BTreeMap<Family, BTreeMap<Property, f64>>,
    seeds: BTreeMap<Family, Vec<SeedCompound>>,
    families: Vec<Family>,
}

impl ReferenceTables {
    /// Loads and validates the compiled-in default tables.
    pub fn builtin() -> Result<Self, TableError> {
        Self::from_toml_str(DEFAULT_REFERENCE_TOML)
    }

    /// Loads and validates reference tables from a TOML file.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content = std::fs::read_to_string(path).map_err(|e| TableError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, TableError> {
        let raw: RawTables = toml::from_str(content)?;

        let mut seeds: BTreeMap<Family, Vec<SeedCompound>> = BTreeMap::new();
        for seed in raw.seeds {
            seeds.entry(seed.family).or_default().push(seed);
        }

        let families: Vec<Family> = raw.carbon_ranges.keys().copied().collect();

        let tables = Self {
            bounds: raw.bounds,
            carbon_ranges: raw.carbon_ranges,
            trends: raw.trends,
            seeds,
            families,
        };
        tables.validate()?;
        Ok(tables)
    }

    fn validate(&self) -> Result<(), TableError> {
        if self.families.is_empty() {
            return Err(TableError::NoFamilies);
        }
        for (&property, range) in &self.bounds {
            if range.min > range.max {
                return Err(TableError::InvertedBounds { property });
            }
        }
        for (&family, range) in &self.carbon_ranges {
            if range.min == 0 || range.min > range.max {
                return Err(TableError::InvalidCarbonRange { family });
            }
            let minimum = family.min_carbons();
            if range.min < minimum {
                return Err(TableError::CarbonRangeBelowStructuralMinimum { family, minimum });
            }
        }
        for (&family, trends) in &self.trends {
            for &property in trends.keys() {
                if !self.bounds.contains_key(&property) {
                    return Err(TableError::TrendWithoutBounds { family, property });
                }
            }
        }
        for (&family, seeds) in &self.seeds {
            for seed in seeds {
                if let Some(range) = self.carbon_ranges.get(&family) {
                    if seed.carbons < range.min || seed.carbons > range.max {
                        return Err(TableError::SeedCarbonsOutOfRange {
                            name: seed.name.clone(),
                            family,
                        });
                    }
                }
                for (&property, &value) in &seed.properties {
                    if let Some(bounds) = self.bounds.get(&property) {
                        if !bounds.contains(value) {
                            return Err(TableError::SeedOutOfBounds {
                                name: seed.name.clone(),
                                property,
                            });
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Families the generator may draw, in a stable order.
    pub fn families(&self) -> &[Family] {
        &self.families
    }

    pub fn bounds(&self, property: Property) -> Option<PropertyRange> {
        self.bounds.get(&property).copied()
    }

    pub fn carbon_range(&self, family: Family) -> Option<CarbonRange> {
        self.carbon_ranges.get(&family).copied()
    }

    /// Trend coefficients for a family; a property absent from the map has
    /// no trend and stays not-applicable for that family.
    pub fn trends(&self, family: Family) -> Option<&BTreeMap<Property, f64>> {
        self.trends.get(&family)
    }

    pub fn seeds(&self, family: Family) -> &[SeedCompound] {
        self.seeds.get(&family).map(Vec::as_slice).unwrap_or(&[])
    }
}
