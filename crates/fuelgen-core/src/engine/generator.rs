use crate::core::models::compound::{Compound, round2};
use crate::core::models::table::ComponentTable;
use crate::core::params::tables::ReferenceTables;
use crate::engine::error::EngineError;
use crate::engine::naming;
use crate::engine::progress::{Progress, ProgressReporter};
use rand::Rng;
use rand::seq::SliceRandom;
use rand_distr::StandardNormal;
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, instrument};

/// Attempt cap for the inner rejection-sampling loop; once exhausted the
/// whole (family, carbon count) draw is abandoned and redrawn.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Gaussian noise std-dev as a fraction of the estimated value.
pub const RELATIVE_NOISE: f64 = 0.05;
/// Noise floor so near-zero estimates still get perturbed.
pub const NOISE_FLOOR: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Exact number of records to return, seeds included.
    pub target_count: usize,
    pub max_attempts: usize,
}

impl GeneratorConfig {
    pub fn new(target_count: usize) -> Self {
        Self {
            target_count,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// Generates exactly `target_count` unique synthetic compounds by rejection
/// sampling around the seed compounds.
///
/// Seeds are copied in verbatim first (with derived fields computed); the
/// outer loop then draws a (family, carbon count) pair, anchors on the
/// nearest-carbon seed of that family, and the inner loop perturbs each
/// trended property with Gaussian noise until every property lands inside
/// its physical bounds. An out-of-bounds estimate discards the whole
/// candidate rather than clipping it, so the realized distributions keep
/// their shape near the boundaries. Exhausting the attempt cap abandons the
/// draw; it is never an error. The finished table is shuffled and truncated
/// to exactly `target_count` rows.
///
/// Requires at least one seed per drawable family, which guarantees
/// termination. Row production is reported through `reporter` as one
/// `ItemsStart`/`ItemsAdvance`*/`ItemsFinish` sequence.
#[instrument(level = "debug", skip_all, fields(target = config.target_count))]
pub fn generate(
    tables: &ReferenceTables,
    config: &GeneratorConfig,
    rng: &mut impl Rng,
    reporter: &ProgressReporter,
) -> Result<ComponentTable, EngineError> {
    let families = tables.families();
    for &family in families {
        if tables.seeds(family).is_empty() {
            return Err(EngineError::MissingSeeds { family });
        }
    }

    reporter.report(Progress::ItemsStart {
        total: config.target_count as u64,
    });

    let mut compounds: Vec<Compound> = Vec::with_capacity(config.target_count);
    let mut used_names: HashSet<String> = HashSet::new();

    for &family in families {
        for seed in tables.seeds(family) {
            if used_names.insert(seed.name.clone()) {
                compounds.push(Compound::assemble(
                    seed.name.clone(),
                    family,
                    seed.carbons,
                    seed.properties.clone(),
                ));
            }
        }
    }
    debug!(seeded = compounds.len(), "Seed compounds registered");
    reporter.report(Progress::ItemsAdvance {
        count: compounds.len().min(config.target_count) as u64,
    });

    let mut abandoned_draws: u64 = 0;
    while compounds.len() < config.target_count {
        let family = families[rng.gen_range(0..families.len())];
        let Some(carbon_range) = tables.carbon_range(family) else {
            continue;
        };
        let carbons = rng.gen_range(carbon_range.min..=carbon_range.max);

        // Nearest-carbon seed anchors the interpolation; ties keep the first.
        let seeds = tables.seeds(family);
        let anchor = match seeds.iter().min_by_key(|s| s.carbons.abs_diff(carbons)) {
            Some(anchor) => anchor,
            None => continue,
        };
        let carbon_shift = f64::from(carbons) - f64::from(anchor.carbons);

        let trends = tables.trends(family);
        let mut accepted = false;
        for _ in 0..config.max_attempts {
            let mut properties: BTreeMap<_, f64> = BTreeMap::new();
            let mut valid = true;

            if let Some(trends) = trends {
                for (&property, &slope) in trends {
                    let Some(&anchor_value) = anchor.properties.get(&property) else {
                        continue;
                    };
                    let estimate = anchor_value + carbon_shift * slope;
                    let sigma = estimate.abs() * RELATIVE_NOISE + NOISE_FLOOR;
                    let z: f64 = rng.sample(StandardNormal);
                    // Bounds are checked on the rounded value, since that is
                    // what the record will carry.
                    let value = round2(estimate + z * sigma);

                    let in_bounds = tables
                        .bounds(property)
                        .is_some_and(|bounds| bounds.contains(value));
                    if !in_bounds {
                        valid = false;
                        break;
                    }
                    properties.insert(property, value);
                }
            }

            if valid {
                let base_name = naming::systematic_name(family, carbons);
                let name = naming::disambiguate(base_name, &used_names);
                used_names.insert(name.clone());
                compounds.push(Compound::assemble(name, family, carbons, properties));
                reporter.report(Progress::ItemsAdvance { count: 1 });
                accepted = true;
                break;
            }
        }
        if !accepted {
            abandoned_draws += 1;
        }
    }

    if abandoned_draws > 0 {
        debug!(abandoned_draws, "Some draws exhausted their attempt cap");
    }

    compounds.shuffle(rng);
    compounds.truncate(config.target_count);
    reporter.report(Progress::ItemsFinish);
    Ok(ComponentTable::new(compounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::compound::{Family, Property};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn builtin() -> ReferenceTables {
        ReferenceTables::builtin().unwrap()
    }

    #[test]
    fn returns_exactly_the_requested_count() {
        let tables = builtin();
        let mut rng = StdRng::seed_from_u64(7);
        for target in [0usize, 1, 50, 500] {
            let table =
                generate(&tables, &GeneratorConfig::new(target), &mut rng, &ProgressReporter::new())
                    .unwrap();
            assert_eq!(table.len(), target);
        }
    }

    #[test]
    fn every_present_property_lies_within_bounds() {
        let tables = builtin();
        for seed in [1u64, 2, 3, 4, 5] {
            let mut rng = StdRng::seed_from_u64(seed);
            let table =
                generate(&tables, &GeneratorConfig::new(300), &mut rng, &ProgressReporter::new())
                    .unwrap();
            for compound in table.iter() {
                for (&property, &value) in compound.properties() {
                    let bounds = tables.bounds(property).unwrap();
                    assert!(
                        bounds.contains(value),
                        "{}: {} = {} outside [{}, {}]",
                        compound.name,
                        property,
                        value,
                        bounds.min,
                        bounds.max
                    );
                }
            }
        }
    }

    #[test]
    fn aki_tracks_ron_and_mon_presence() {
        let tables = builtin();
        let mut rng = StdRng::seed_from_u64(11);
        let table =
            generate(&tables, &GeneratorConfig::new(400), &mut rng, &ProgressReporter::new())
                .unwrap();
        for compound in table.iter() {
            let ron = compound.property(Property::Ron);
            let mon = compound.property(Property::Mon);
            match (ron, mon) {
                (Some(r), Some(m)) => {
                    let expected = ((r + m) / 2.0 * 10.0).round() / 10.0;
                    assert_eq!(compound.aki, Some(expected), "{}", compound.name);
                }
                _ => assert_eq!(compound.aki, None, "{}", compound.name),
            }
        }
    }

    #[test]
    fn esters_never_carry_octane_numbers() {
        let tables = builtin();
        let mut rng = StdRng::seed_from_u64(13);
        let table =
            generate(&tables, &GeneratorConfig::new(400), &mut rng, &ProgressReporter::new())
                .unwrap();
        for compound in table.iter().filter(|c| c.family == Family::Esters) {
            assert_eq!(compound.property(Property::Ron), None);
            assert_eq!(compound.property(Property::Mon), None);
            assert_eq!(compound.aki, None);
        }
    }

    #[test]
    fn generated_names_are_pairwise_unique() {
        let tables = builtin();
        let mut rng = StdRng::seed_from_u64(17);
        let table =
            generate(&tables, &GeneratorConfig::new(1500), &mut rng, &ProgressReporter::new())
                .unwrap();
        let mut names = HashSet::new();
        for compound in table.iter() {
            assert!(names.insert(compound.name.clone()), "duplicate: {}", compound.name);
        }
    }

    #[test]
    fn carbon_counts_respect_family_ranges() {
        let tables = builtin();
        let mut rng = StdRng::seed_from_u64(19);
        let table =
            generate(&tables, &GeneratorConfig::new(300), &mut rng, &ProgressReporter::new())
                .unwrap();
        for compound in table.iter() {
            let range = tables.carbon_range(compound.family).unwrap();
            assert!(compound.carbons >= range.min && compound.carbons <= range.max);
        }
    }

    #[test]
    fn missing_seed_family_is_a_hard_precondition() {
        let doc = r#"
            seeds = []
            [bounds]
            RON = { min = -40.0, max = 130.0 }
            [carbon_ranges]
            "n-Alkanes" = { min = 2, max = 25 }
            [trends."n-Alkanes"]
            RON = -15.0
        "#;
        let tables = ReferenceTables::from_toml_str(doc).unwrap();
        let mut rng = StdRng::seed_from_u64(23);
        let err =
            generate(&tables, &GeneratorConfig::new(10), &mut rng, &ProgressReporter::new())
                .unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingSeeds {
                family: Family::NAlkanes
            }
        ));
    }

    #[test]
    fn same_seed_reproduces_the_same_table() {
        let tables = builtin();
        let a = generate(
            &tables,
            &GeneratorConfig::new(120),
            &mut StdRng::seed_from_u64(29),
            &ProgressReporter::new(),
        )
        .unwrap();
        let b = generate(
            &tables,
            &GeneratorConfig::new(120),
            &mut StdRng::seed_from_u64(29),
            &ProgressReporter::new(),
        )
        .unwrap();
        let names_a: Vec<_> = a.iter().map(|c| c.name.clone()).collect();
        let names_b: Vec<_> = b.iter().map(|c| c.name.clone()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn item_progress_tracks_every_produced_row() {
        use std::sync::Mutex;

        let tables = builtin();
        let events = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            events.lock().unwrap().push(event);
        }));

        let mut rng = StdRng::seed_from_u64(31);
        generate(&tables, &GeneratorConfig::new(50), &mut rng, &reporter).unwrap();

        let events = events.lock().unwrap();
        assert!(matches!(events.first(), Some(Progress::ItemsStart { total: 50 })));
        assert!(matches!(events.last(), Some(Progress::ItemsFinish)));
        let advanced: u64 = events
            .iter()
            .filter_map(|e| match e {
                Progress::ItemsAdvance { count } => Some(*count),
                _ => None,
            })
            .sum();
        assert_eq!(advanced, 50);
    }
}
