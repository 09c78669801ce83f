use crate::core::models::blend::{Blend, BlendRating, BulkProperties, FuelType};
use crate::core::models::compound::{Compound, Property};
use crate::core::models::table::ComponentTable;
use crate::engine::error::EngineError;
use crate::engine::mixing;
use crate::engine::progress::{Progress, ProgressReporter};
use rand::Rng;
use std::fmt;
use tracing::{debug, instrument};

/// Additive volume-percentage range per fuel type, drawn uniformly.
pub const GASOLINE_ADDITIVE_PCT: (f64, f64) = (0.5, 40.0);
pub const DIESEL_ADDITIVE_PCT: (f64, f64) = (0.5, 25.0);

/// The four standard candidate categories a component table is filtered into
/// before mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolRole {
    /// Low-oxygen, high-octane gasoline-range compounds.
    GasolineBase,
    /// High-oxygen octane boosters.
    GasolineOxygenate,
    /// Long-chain, high-cetane, low-oxygen alkanes.
    DieselBase,
    /// High-oxygen, low-cetane diesel additives.
    DieselAdditive,
}

impl PoolRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            PoolRole::GasolineBase => "gasoline bases",
            PoolRole::GasolineOxygenate => "gasoline oxygenates",
            PoolRole::DieselBase => "diesel bases",
            PoolRole::DieselAdditive => "diesel additives",
        }
    }

    fn admits(&self, compound: &Compound, entry: &PoolEntry) -> bool {
        match self {
            PoolRole::GasolineBase => {
                compound.o2_wt_percent < 1.5
                    && entry.ron > 60.0
                    && (5..=12).contains(&compound.carbons)
            }
            PoolRole::GasolineOxygenate => compound.o2_wt_percent > 10.0,
            PoolRole::DieselBase => {
                entry.cn > 45.0
                    && (10..=22).contains(&compound.carbons)
                    && compound.family.is_alkane()
                    && compound.o2_wt_percent < 1.5
            }
            PoolRole::DieselAdditive => compound.o2_wt_percent > 5.0 && entry.cn < 40.0,
        }
    }
}

impl fmt::Display for PoolRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pool member with every blendable property resolved to a concrete value.
#[derive(Debug, Clone)]
struct PoolEntry {
    name: String,
    ron: f64,
    mon: f64,
    cn: f64,
    lhv: f64,
    density: f64,
    o2_wt_percent: f64,
    oxidative_stability: f64,
    gum_content: f64,
    acidity: f64,
}

impl PoolEntry {
    /// Builds an entry iff the compound carries every blendable property;
    /// anything with a missing value is excluded here so the mixing formulas
    /// never see an absent input.
    fn resolve(compound: &Compound) -> Option<Self> {
        Some(Self {
            name: compound.name.clone(),
            ron: compound.property(Property::Ron)?,
            mon: compound.property(Property::Mon)?,
            cn: compound.property(Property::Cn)?,
            lhv: compound.property(Property::Lhv)?,
            density: compound.property(Property::Density)?,
            o2_wt_percent: compound.o2_wt_percent,
            oxidative_stability: compound.property(Property::OxidativeStability)?,
            gum_content: compound.property(Property::GumContent)?,
            acidity: compound.property(Property::Acidity)?,
        })
    }
}

/// A pre-filtered, non-empty candidate pool for one side of a blend.
#[derive(Debug, Clone)]
pub struct BlendPool {
    role: PoolRole,
    entries: Vec<PoolEntry>,
}

impl BlendPool {
    /// Filters the component table into the given category. Returns
    /// `EngineError::EmptyPool` when nothing qualifies: mixing against an
    /// empty pool is a hard precondition failure, reported, never retried.
    pub fn from_table(table: &ComponentTable, role: PoolRole) -> Result<Self, EngineError> {
        let entries: Vec<PoolEntry> = table
            .iter()
            .filter_map(|compound| {
                let entry = PoolEntry::resolve(compound)?;
                role.admits(compound, &entry).then_some(entry)
            })
            .collect();

        if entries.is_empty() {
            return Err(EngineError::EmptyPool { role });
        }
        debug!(role = %role, size = entries.len(), "Blend pool built");
        Ok(Self { role, entries })
    }

    pub fn role(&self) -> PoolRole {
        self.role
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Produces `count` blends of one fuel type by bulk random pairing.
///
/// Array-oriented: all base indices, additive indices, and additive
/// percentages are drawn up front, then each property column is computed
/// across the whole batch. Every draw is independent, so the batch could be
/// evaluated in any order. One item-advance event is reported per finished
/// blend; the caller owns the surrounding `ItemsStart`/`ItemsFinish` pair.
#[instrument(level = "debug", skip_all, fields(count, fuel = %fuel_type))]
pub fn mix(
    base_pool: &BlendPool,
    additive_pool: &BlendPool,
    count: usize,
    fuel_type: FuelType,
    rng: &mut impl Rng,
    reporter: &ProgressReporter,
) -> Result<Vec<Blend>, EngineError> {
    if base_pool.is_empty() {
        return Err(EngineError::EmptyPool {
            role: base_pool.role,
        });
    }
    if additive_pool.is_empty() {
        return Err(EngineError::EmptyPool {
            role: additive_pool.role,
        });
    }

    let (pct_lo, pct_hi) = match fuel_type {
        FuelType::Gasoline => GASOLINE_ADDITIVE_PCT,
        FuelType::Diesel => DIESEL_ADDITIVE_PCT,
    };

    // Draw every random input for the batch first.
    let base_idx: Vec<usize> = (0..count)
        .map(|_| rng.gen_range(0..base_pool.entries.len()))
        .collect();
    let additive_idx: Vec<usize> = (0..count)
        .map(|_| rng.gen_range(0..additive_pool.entries.len()))
        .collect();
    let additive_pct: Vec<f64> = (0..count).map(|_| rng.gen_range(pct_lo..pct_hi)).collect();

    let mut blends = Vec::with_capacity(count);
    for i in 0..count {
        let base = &base_pool.entries[base_idx[i]];
        let additive = &additive_pool.entries[additive_idx[i]];
        let vf = additive_pct[i] / 100.0;

        let rating = match fuel_type {
            FuelType::Gasoline => {
                let ron = mixing::octane_response(base.ron, additive.ron, vf, mixing::RON_EXPONENT);
                let mon = mixing::octane_response(base.mon, additive.mon, vf, mixing::MON_EXPONENT);
                BlendRating::Gasoline {
                    ron,
                    mon,
                    aki: (ron + mon) / 2.0,
                }
            }
            FuelType::Diesel => BlendRating::Diesel {
                cn: mixing::cetane_response(base.cn, additive.cn, vf),
            },
        };

        let bulk = BulkProperties {
            lhv: mixing::mass_weighted(base.lhv, additive.lhv, vf, base.density, additive.density),
            density: mixing::volume_weighted(base.density, additive.density, vf),
            o2_wt_percent: mixing::mass_weighted(
                base.o2_wt_percent,
                additive.o2_wt_percent,
                vf,
                base.density,
                additive.density,
            ),
            oxidative_stability: mixing::volume_weighted(
                base.oxidative_stability,
                additive.oxidative_stability,
                vf,
            ),
            gum_content: mixing::volume_weighted(base.gum_content, additive.gum_content, vf),
            acidity: mixing::volume_weighted(base.acidity, additive.acidity, vf),
        };

        blends.push(Blend {
            fuel_type,
            component_1: base.name.clone(),
            component_1_vol_pct: 100.0 - additive_pct[i],
            component_2: additive.name.clone(),
            component_2_vol_pct: additive_pct[i],
            rating,
            bulk,
        });
        reporter.report(Progress::ItemsAdvance { count: 1 });
    }

    Ok(blends)
}
