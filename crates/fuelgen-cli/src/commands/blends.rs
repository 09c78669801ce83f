use crate::cli::BlendsArgs;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use fuelgen::core::io::csv;
use fuelgen::engine::progress::{Progress, ProgressReporter};
use fuelgen::workflows::dataset;
use tracing::info;

pub fn run(args: BlendsArgs) -> Result<()> {
    info!("Loading component database from {:?}", args.components);
    let components = csv::read_components(&args.components)?;
    let mut rng = super::seeded_rng(args.rng_seed);

    let handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(handler.get_callback());
    reporter.report(Progress::StageStart {
        name: "Mixing blends",
    });

    let blends =
        dataset::mix_blend_table(&components, args.gasoline, args.diesel, &mut rng, &reporter)?;
    reporter.report(Progress::StageFinish);
    handler.clear();

    csv::write_blends(&args.output, &blends)?;
    println!(
        "Wrote {} blends ({} gasoline, {} diesel) to '{}'.",
        blends.len(),
        args.gasoline,
        args.diesel,
        args.output.display()
    );
    Ok(())
}
