use crate::cli::ComponentsArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use fuelgen::core::io::csv;
use fuelgen::engine::generator::{self, GeneratorConfig};
use fuelgen::engine::progress::{Progress, ProgressReporter};
use tracing::info;

pub fn run(args: ComponentsArgs) -> Result<()> {
    let tables = super::load_tables(args.params.as_deref())?;
    let mut rng = super::seeded_rng(args.rng_seed);

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    reporter.report(Progress::StageStart {
        name: "Generating components",
    });

    info!(count = args.count, "Generating synthetic pure component entries");
    let table = generator::generate(&tables, &GeneratorConfig::new(args.count), &mut rng, &reporter)?;
    reporter.report(Progress::StageFinish);
    handler.clear();

    csv::write_components(&args.output, &table)?;
    println!(
        "Wrote {} component records to '{}'.",
        table.len(),
        args.output.display()
    );
    Ok(())
}
