use crate::cli::DatasetArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use fuelgen::core::io::csv;
use fuelgen::engine::progress::ProgressReporter;
use fuelgen::workflows::dataset::{self, DatasetConfig};
use tracing::info;

pub fn run(args: DatasetArgs) -> Result<()> {
    let tables = super::load_tables(args.params.as_deref())?;
    let config = DatasetConfig {
        components: args.count,
        gasoline_blends: args.gasoline,
        diesel_blends: args.diesel,
        rng_seed: args.rng_seed,
    };

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());

    info!("Invoking the dataset synthesis workflow");
    let dataset = dataset::run(&tables, &config, &reporter)?;
    handler.clear();

    csv::write_components(&args.components_out, &dataset.components)?;
    csv::write_blends(&args.blends_out, &dataset.blends)?;
    println!(
        "Wrote {} components to '{}' and {} blends to '{}'.",
        dataset.components.len(),
        args.components_out.display(),
        dataset.blends.len(),
        args.blends_out.display()
    );
    Ok(())
}
