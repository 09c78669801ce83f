pub mod blends;
pub mod components;
pub mod dataset;
pub mod score;

use crate::error::Result;
use fuelgen::core::params::tables::ReferenceTables;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use tracing::info;

/// Loads the reference tables, preferring a user-supplied TOML file over the
/// compiled-in defaults.
pub(crate) fn load_tables(params: Option<&Path>) -> Result<ReferenceTables> {
    let tables = match params {
        Some(path) => {
            info!("Loading reference tables from {:?}", path);
            ReferenceTables::load(path)?
        }
        None => ReferenceTables::builtin()?,
    };
    Ok(tables)
}

pub(crate) fn seeded_rng(rng_seed: Option<u64>) -> StdRng {
    match rng_seed {
        Some(seed) => {
            info!(seed, "Using fixed RNG seed");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    }
}
