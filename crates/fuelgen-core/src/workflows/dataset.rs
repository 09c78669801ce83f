use crate::core::models::blend::{Blend, FuelType};
use crate::core::models::table::ComponentTable;
use crate::core::params::tables::ReferenceTables;
use crate::engine::error::EngineError;
use crate::engine::generator::{self, GeneratorConfig};
use crate::engine::mixer::{self, BlendPool, PoolRole};
use crate::engine::progress::{Progress, ProgressReporter};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Number of pure-component rows to synthesize.
    pub components: usize,
    pub gasoline_blends: usize,
    pub diesel_blends: usize,
    /// Fixed RNG seed for reproducible datasets; entropy-seeded when absent.
    pub rng_seed: Option<u64>,
}

/// A finished synthetic dataset: the component table and the shuffled blend
/// table derived from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub components: ComponentTable,
    pub blends: Vec<Blend>,
}

/// Runs the full synthesis pipeline: generate components, filter the four
/// candidate pools, mix gasoline and diesel blends, and shuffle the combined
/// blend table.
#[instrument(skip_all, name = "dataset_workflow")]
pub fn run(
    tables: &ReferenceTables,
    config: &DatasetConfig,
    reporter: &ProgressReporter,
) -> Result<Dataset, EngineError> {
    let mut rng = match config.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    reporter.report(Progress::StageStart {
        name: "Generating components",
    });
    info!(count = config.components, "Generating pure component records");
    let components = generator::generate(
        tables,
        &GeneratorConfig::new(config.components),
        &mut rng,
        reporter,
    )?;
    reporter.report(Progress::StageFinish);

    reporter.report(Progress::StageStart {
        name: "Mixing blends",
    });
    let blends = mix_blend_table(
        &components,
        config.gasoline_blends,
        config.diesel_blends,
        &mut rng,
        reporter,
    )?;
    reporter.report(Progress::StageFinish);

    info!(
        components = components.len(),
        blends = blends.len(),
        "Dataset synthesis complete"
    );
    Ok(Dataset { components, blends })
}

/// Filters the standard candidate pools out of a finished component table and
/// produces the combined, shuffled blend table.
///
/// Exposed separately so a previously persisted component table can be
/// re-blended without regenerating it.
pub fn mix_blend_table(
    components: &ComponentTable,
    gasoline_blends: usize,
    diesel_blends: usize,
    rng: &mut impl rand::Rng,
    reporter: &ProgressReporter,
) -> Result<Vec<Blend>, EngineError> {
    let gasoline_bases = BlendPool::from_table(components, PoolRole::GasolineBase)?;
    let oxygenates = BlendPool::from_table(components, PoolRole::GasolineOxygenate)?;
    let diesel_bases = BlendPool::from_table(components, PoolRole::DieselBase)?;
    let diesel_additives = BlendPool::from_table(components, PoolRole::DieselAdditive)?;
    info!(
        gasoline_bases = gasoline_bases.len(),
        oxygenates = oxygenates.len(),
        diesel_bases = diesel_bases.len(),
        diesel_additives = diesel_additives.len(),
        "Candidate pools filtered"
    );
    reporter.report(Progress::Note(format!(
        "Pools: {} gasoline bases, {} oxygenates, {} diesel bases, {} diesel additives",
        gasoline_bases.len(),
        oxygenates.len(),
        diesel_bases.len(),
        diesel_additives.len()
    )));

    reporter.report(Progress::ItemsStart {
        total: (gasoline_blends + diesel_blends) as u64,
    });
    let mut blends = mixer::mix(
        &gasoline_bases,
        &oxygenates,
        gasoline_blends,
        FuelType::Gasoline,
        rng,
        reporter,
    )?;
    blends.extend(mixer::mix(
        &diesel_bases,
        &diesel_additives,
        diesel_blends,
        FuelType::Diesel,
        rng,
        reporter,
    )?);
    reporter.report(Progress::ItemsFinish);

    // The trainer must not see the fuel types in generation order.
    blends.shuffle(rng);
    Ok(blends)
}
