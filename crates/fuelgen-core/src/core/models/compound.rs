use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Atomic weights used for molecular-weight derivation (g/mol).
pub const ATOMIC_WEIGHT_C: f64 = 12.01;
pub const ATOMIC_WEIGHT_H: f64 = 1.008;
pub const ATOMIC_WEIGHT_O: f64 = 16.00;

/// Structural class of a hydrocarbon/oxygenate compound.
///
/// The family determines the compound's empirical formula rule, its systematic
/// naming convention, and which per-carbon property trends apply to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Family {
    #[serde(rename = "n-Alkanes")]
    NAlkanes,
    #[serde(rename = "iso-Alkanes")]
    IsoAlkanes,
    #[serde(rename = "Alkenes")]
    Alkenes,
    #[serde(rename = "Aromatics")]
    Aromatics,
    #[serde(rename = "Alcohols")]
    Alcohols,
    #[serde(rename = "Esters")]
    Esters,
}

impl Family {
    pub const ALL: [Family; 6] = [
        Family::NAlkanes,
        Family::IsoAlkanes,
        Family::Alkenes,
        Family::Aromatics,
        Family::Alcohols,
        Family::Esters,
    ];

    /// Returns the elemental composition `(C, H, O)` for a member of this
    /// family with the given carbon count.
    pub fn composition(&self, carbons: u32) -> (u32, u32, u32) {
        match self {
            Family::NAlkanes | Family::IsoAlkanes => (carbons, 2 * carbons + 2, 0),
            Family::Alkenes => (carbons, 2 * carbons, 0),
            Family::Aromatics => (carbons, 2 * carbons - 6, 0),
            Family::Alcohols => (carbons, 2 * carbons + 2, 1),
            Family::Esters => (carbons, 2 * carbons, 2),
        }
    }

    /// Renders the empirical formula string, e.g. `C2H6O` for ethanol.
    pub fn formula(&self, carbons: u32) -> String {
        let (c, h, o) = self.composition(carbons);
        match o {
            0 => format!("C{}H{}", c, h),
            1 => format!("C{}H{}O", c, h),
            _ => format!("C{}H{}O{}", c, h, o),
        }
    }

    pub fn is_alkane(&self) -> bool {
        matches!(self, Family::NAlkanes | Family::IsoAlkanes)
    }

    /// Smallest carbon count for which the family's formula and naming rules
    /// are defined: the aromatic ring needs six carbons, an ester needs a
    /// carbon beyond its methyl group.
    pub fn min_carbons(&self) -> u32 {
        match self {
            Family::Aromatics => 6,
            Family::Esters => 2,
            _ => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Family::NAlkanes => "n-Alkanes",
            Family::IsoAlkanes => "iso-Alkanes",
            Family::Alkenes => "Alkenes",
            Family::Aromatics => "Aromatics",
            Family::Alcohols => "Alcohols",
            Family::Esters => "Esters",
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown compound family: '{0}'")]
pub struct ParseFamilyError(pub String);

impl FromStr for Family {
    type Err = ParseFamilyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Family::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ParseFamilyError(s.to_string()))
    }
}

/// A measured physical property of a pure component.
///
/// `AKI` is intentionally not part of this enum: it is always derived from RON
/// and MON and never appears in the bounds or trend tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
    #[serde(rename = "RON")]
    Ron,
    #[serde(rename = "MON")]
    Mon,
    #[serde(rename = "CN")]
    Cn,
    #[serde(rename = "LHV")]
    Lhv,
    #[serde(rename = "Density")]
    Density,
    #[serde(rename = "BP")]
    BoilingPoint,
    #[serde(rename = "FP")]
    FlashPoint,
    #[serde(rename = "Oxidative_Stability")]
    OxidativeStability,
    #[serde(rename = "Gum_Content")]
    GumContent,
    #[serde(rename = "Acidity")]
    Acidity,
}

impl Property {
    pub const ALL: [Property; 10] = [
        Property::Ron,
        Property::Mon,
        Property::Cn,
        Property::Lhv,
        Property::Density,
        Property::BoilingPoint,
        Property::FlashPoint,
        Property::OxidativeStability,
        Property::GumContent,
        Property::Acidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Property::Ron => "RON",
            Property::Mon => "MON",
            Property::Cn => "CN",
            Property::Lhv => "LHV",
            Property::Density => "Density",
            Property::BoilingPoint => "BP",
            Property::FlashPoint => "FP",
            Property::OxidativeStability => "Oxidative_Stability",
            Property::GumContent => "Gum_Content",
            Property::Acidity => "Acidity",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown property name: '{0}'")]
pub struct ParsePropertyError(pub String);

impl FromStr for Property {
    type Err = ParsePropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePropertyError(s.to_string()))
    }
}

/// A pure chemical component: one row of the component table.
///
/// The measured property set is an explicit partial map; an absent key means
/// the property is not applicable to this compound (e.g. octane numbers for
/// esters) and is propagated as-is by every downstream consumer. All derived
/// fields (`formula`, `molecular_weight`, `o2_wt_percent`, `hc_ratio`, `aki`)
/// are computed once at construction and the record is immutable thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct Compound {
    pub name: String,
    pub family: Family,
    pub carbons: u32,
    pub formula: String,
    pub molecular_weight: f64,
    pub o2_wt_percent: f64,
    pub hc_ratio: f64,
    /// Anti-knock index, present iff both RON and MON are present.
    pub aki: Option<f64>,
    properties: BTreeMap<Property, f64>,
}

impl Compound {
    /// Assembles a compound from its identity and measured properties,
    /// computing every derived field.
    pub fn assemble(
        name: String,
        family: Family,
        carbons: u32,
        properties: BTreeMap<Property, f64>,
    ) -> Self {
        let formula = family.formula(carbons);
        let (c, h, o) = family.composition(carbons);
        let molecular_weight = round2(
            f64::from(c) * ATOMIC_WEIGHT_C
                + f64::from(h) * ATOMIC_WEIGHT_H
                + f64::from(o) * ATOMIC_WEIGHT_O,
        );
        let o2_wt_percent = if molecular_weight > 0.0 {
            round2(f64::from(o) * ATOMIC_WEIGHT_O / molecular_weight * 100.0)
        } else {
            0.0
        };
        let hc_ratio = if c > 0 {
            round2(f64::from(h) / f64::from(c))
        } else {
            0.0
        };
        let aki = match (
            properties.get(&Property::Ron),
            properties.get(&Property::Mon),
        ) {
            (Some(ron), Some(mon)) => Some(round1((ron + mon) / 2.0)),
            _ => None,
        };

        Self {
            name,
            family,
            carbons,
            formula,
            molecular_weight,
            o2_wt_percent,
            hc_ratio,
            aki,
            properties,
        }
    }

    /// Returns the measured value, or `None` if the property is not
    /// applicable to this compound.
    pub fn property(&self, property: Property) -> Option<f64> {
        self.properties.get(&property).copied()
    }

    pub fn properties(&self) -> &BTreeMap<Property, f64> {
        &self.properties
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
