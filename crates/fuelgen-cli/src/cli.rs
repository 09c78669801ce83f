use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Fuelgen CLI - Synthesizes physically-plausible fuel component databases and blend property tables for downstream predictor training.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a synthetic pure-component database via rejection sampling.
    Components(ComponentsArgs),
    /// Mix random fuel blends from a previously generated component table.
    Blends(BlendsArgs),
    /// Run the full pipeline: components plus blends in one pass.
    Dataset(DatasetArgs),
    /// Score the miscibility/stability of a candidate blend recipe.
    Score(ScoreArgs),
}

/// Arguments for the `components` subcommand.
#[derive(Args, Debug)]
pub struct ComponentsArgs {
    /// Number of component records to generate (seeds included).
    #[arg(short = 'n', long, default_value_t = 50_000)]
    pub count: usize,

    /// Path for the output component CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Override the built-in reference tables (bounds/trends/seeds) with a TOML file.
    #[arg(long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Fix the RNG seed for a reproducible database.
    #[arg(long, value_name = "SEED")]
    pub rng_seed: Option<u64>,
}

/// Arguments for the `blends` subcommand.
#[derive(Args, Debug)]
pub struct BlendsArgs {
    /// Path to the component CSV produced by `components`.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub components: PathBuf,

    /// Path for the output blend CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,

    /// Number of gasoline blends to generate.
    #[arg(long, default_value_t = 50_000)]
    pub gasoline: usize,

    /// Number of diesel blends to generate.
    #[arg(long, default_value_t = 50_000)]
    pub diesel: usize,

    /// Fix the RNG seed for a reproducible blend table.
    #[arg(long, value_name = "SEED")]
    pub rng_seed: Option<u64>,
}

/// Arguments for the `dataset` subcommand.
#[derive(Args, Debug)]
pub struct DatasetArgs {
    /// Number of component records to generate.
    #[arg(short = 'n', long, default_value_t = 50_000)]
    pub count: usize,

    /// Number of gasoline blends to generate.
    #[arg(long, default_value_t = 50_000)]
    pub gasoline: usize,

    /// Number of diesel blends to generate.
    #[arg(long, default_value_t = 50_000)]
    pub diesel: usize,

    /// Path for the output component CSV.
    #[arg(long, required = true, value_name = "PATH")]
    pub components_out: PathBuf,

    /// Path for the output blend CSV.
    #[arg(long, required = true, value_name = "PATH")]
    pub blends_out: PathBuf,

    /// Override the built-in reference tables with a TOML file.
    #[arg(long, value_name = "PATH")]
    pub params: Option<PathBuf>,

    /// Fix the RNG seed for a reproducible dataset.
    #[arg(long, value_name = "SEED")]
    pub rng_seed: Option<u64>,
}

/// Arguments for the `score` subcommand.
#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Path to the component CSV used to resolve recipe names.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub components: PathBuf,

    /// A recipe entry as NAME=PCT (repeat for each component),
    /// e.g. --component "Isooctane=80" --component "Ethanol=20".
    #[arg(
        long = "component",
        required = true,
        value_name = "NAME=PCT",
        value_parser = parse_recipe_spec
    )]
    pub components_spec: Vec<RecipeSpec>,
}

/// A parsed NAME=PCT recipe entry.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeSpec {
    pub name: String,
    pub percentage: f64,
}

fn parse_recipe_spec(raw: &str) -> Result<RecipeSpec, String> {
    let (name, pct) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PCT, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("component name is empty in '{}'", raw));
    }
    let percentage: f64 = pct
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a valid percentage", pct.trim()))?;
    if !(0.0..=100.0).contains(&percentage) {
        return Err(format!("percentage {} is outside 0-100", percentage));
    }
    Ok(RecipeSpec {
        name: name.to_string(),
        percentage,
    })
}
