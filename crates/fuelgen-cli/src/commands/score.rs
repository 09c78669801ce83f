use crate::cli::ScoreArgs;
use crate::error::Result;
use fuelgen::core::io::csv;
use fuelgen::core::models::recipe::{Recipe, RecipeEntry};
use fuelgen::engine::scorer::ViabilityScorer;
use tracing::info;

pub fn run(args: ScoreArgs) -> Result<()> {
    info!("Loading component database from {:?}", args.components);
    let table = csv::read_components(&args.components)?;

    let recipe = Recipe::new(
        args.components_spec
            .iter()
            .map(|spec| RecipeEntry {
                name: spec.name.clone(),
                percentage: spec.percentage,
            })
            .collect(),
    );

    let scorer = ViabilityScorer::new(&table);
    let viability = scorer.score(&recipe)?;

    println!("Viability score: {:.1} / 100", viability.score);
    println!("{}", viability.insight);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::RecipeSpec;
    use crate::error::CliError;
    use fuelgen::core::models::compound::{Compound, Family, Property};
    use fuelgen::core::models::table::ComponentTable;
    use std::collections::BTreeMap;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_component_csv(path: &Path) {
        let mut iso = BTreeMap::new();
        iso.insert(Property::Density, 0.692);
        iso.insert(Property::BoilingPoint, 99.0);
        let mut heptane = BTreeMap::new();
        heptane.insert(Property::Density, 0.684);
        heptane.insert(Property::BoilingPoint, 98.0);

        let table = ComponentTable::new(vec![
            Compound::assemble("Isooctane".to_string(), Family::IsoAlkanes, 8, iso),
            Compound::assemble("n-Heptane".to_string(), Family::NAlkanes, 7, heptane),
        ]);
        csv::write_components(path, &table).unwrap();
    }

    fn spec(name: &str, percentage: f64) -> RecipeSpec {
        RecipeSpec {
            name: name.to_string(),
            percentage,
        }
    }

    #[test]
    fn scores_a_recipe_against_a_component_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("components.csv");
        write_component_csv(&path);

        let args = ScoreArgs {
            components: path,
            components_spec: vec![spec("Isooctane", 60.0), spec("n-Heptane", 40.0)],
        };
        assert!(run(args).is_ok());
    }

    #[test]
    fn unknown_recipe_component_fails_the_command() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("components.csv");
        write_component_csv(&path);

        let args = ScoreArgs {
            components: path,
            components_spec: vec![spec("Isooctane", 50.0), spec("Unobtainium", 50.0)],
        };
        let err = run(args).unwrap_err();
        assert!(matches!(err, CliError::Engine(_)));
    }
}
