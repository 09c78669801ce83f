use crate::core::models::compound::{Property, round1};
use crate::core::models::recipe::Recipe;
use crate::core::models::table::ComponentTable;
use crate::engine::error::EngineError;
use tracing::instrument;

/// Empirical tuning constants for the dispersion heuristic. The reference
/// spans normalize each weighted standard deviation into [0, 1]; the weights
/// combine them into a single penalty. Oxygen mismatch dominates: it is the
/// strongest predictor of phase separation.
pub const DENSITY_REFERENCE_SPAN: f64 = 0.15; // g/mL
pub const BP_REFERENCE_SPAN: f64 = 100.0; // degC
pub const O2_REFERENCE_SPAN: f64 = 20.0; // percentage points

pub const DENSITY_WEIGHT: f64 = 0.2;
pub const BP_WEIGHT: f64 = 0.2;
pub const O2_WEIGHT: f64 = 0.6;

pub const SINGLE_COMPONENT_INSIGHT: &str = "Single component is always stable.";

const EXCELLENT_INSIGHT: &str = "Excellent. Components are highly similar, suggesting the blend will be very stable and miscible.";
const GOOD_INSIGHT: &str = "Good. Components have moderate differences but are likely to form a stable blend under normal conditions.";
const FAIR_INSIGHT: &str = "Fair. Significant property differences exist. The blend may be prone to phase separation, especially at low temperatures or with water contamination.";
const POOR_INSIGHT: &str = "Poor. Components are highly dissimilar. This blend is very likely to be unstable and separate into layers. Not recommended.";

/// A miscibility/stability estimate for a candidate recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viability {
    /// 0-100 with one decimal; higher is more stable.
    pub score: f64,
    pub insight: &'static str,
}

/// Scores blend recipes against a read-only component table.
pub struct ViabilityScorer<'a> {
    table: &'a ComponentTable,
}

impl<'a> ViabilityScorer<'a> {
    pub fn new(table: &'a ComponentTable) -> Self {
        Self { table }
    }

    /// Computes the 0-100 viability score and its qualitative explanation.
    ///
    /// Single-component recipes are always fully stable. For two or more
    /// components the score penalizes the percentage-weighted dispersion of
    /// density, boiling point, and oxygen content across the recipe.
    #[instrument(level = "trace", skip_all, fields(components = recipe.entries.len()))]
    pub fn score(&self, recipe: &Recipe) -> Result<Viability, EngineError> {
        if recipe.entries.is_empty() {
            return Err(EngineError::EmptyRecipe);
        }
        if recipe.entries.len() < 2 {
            return Ok(Viability {
                score: 100.0,
                insight: SINGLE_COMPONENT_INSIGHT,
            });
        }

        let mut rows = Vec::with_capacity(recipe.entries.len());
        for entry in &recipe.entries {
            let compound =
                self.table
                    .get(&entry.name)
                    .ok_or_else(|| EngineError::UnknownComponent {
                        name: entry.name.clone(),
                    })?;
            let lookup = |property: Property| {
                compound
                    .property(property)
                    .ok_or_else(|| EngineError::PropertyUnavailable {
                        name: entry.name.clone(),
                        property,
                    })
            };
            rows.push((
                entry.percentage,
                lookup(Property::Density)?,
                lookup(Property::BoilingPoint)?,
                compound.o2_wt_percent,
            ));
        }

        let mut total_pct: f64 = rows.iter().map(|r| r.0).sum();
        if total_pct == 0.0 {
            total_pct = 1.0;
        }

        let density_dev = weighted_std_dev(&rows, total_pct, |r| r.1);
        let bp_dev = weighted_std_dev(&rows, total_pct, |r| r.2);
        let o2_dev = weighted_std_dev(&rows, total_pct, |r| r.3);

        let penalty = DENSITY_WEIGHT * normalize(density_dev, DENSITY_REFERENCE_SPAN)
            + BP_WEIGHT * normalize(bp_dev, BP_REFERENCE_SPAN)
            + O2_WEIGHT * normalize(o2_dev, O2_REFERENCE_SPAN);

        // The band is chosen before rounding; the reported score carries one
        // decimal.
        let score = (1.0 - penalty.min(1.0)) * 100.0;
        Ok(Viability {
            score: round1(score),
            insight: insight_for(score),
        })
    }
}

/// Percentage-weighted standard deviation of one property column.
fn weighted_std_dev<F>(rows: &[(f64, f64, f64, f64)], total_pct: f64, value: F) -> f64
where
    F: Fn(&(f64, f64, f64, f64)) -> f64,
{
    let mean: f64 = rows.iter().map(|r| value(r) * (r.0 / total_pct)).sum();
    let variance: f64 = rows
        .iter()
        .map(|r| (value(r) - mean).powi(2) * (r.0 / total_pct))
        .sum();
    variance.sqrt()
}

/// Deviation normalized against its reference span, clamped to [0, 1].
fn normalize(deviation: f64, span: f64) -> f64 {
    (deviation / span).clamp(0.0, 1.0)
}

/// Band edges follow successive greater-than comparisons, so each lower
/// bound is inclusive in the tier below it.
fn insight_for(score: f64) -> &'static str {
    if score > 90.0 {
        EXCELLENT_INSIGHT
    } else if score > 70.0 {
        GOOD_INSIGHT
    } else if score > 40.0 {
        FAIR_INSIGHT
    } else {
        POOR_INSIGHT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::compound::{Compound, Family};
    use crate::core::models::recipe::Recipe;
    use std::collections::BTreeMap;

    fn compound(name: &str, family: Family, carbons: u32, density: f64, bp: f64) -> Compound {
        let mut props = BTreeMap::new();
        props.insert(Property::Density, density);
        props.insert(Property::BoilingPoint, bp);
        Compound::assemble(name.to_string(), family, carbons, props)
    }

    fn table() -> ComponentTable {
        ComponentTable::new(vec![
            compound("Isooctane", Family::IsoAlkanes, 8, 0.692, 99.0),
            compound("n-Heptane", Family::NAlkanes, 7, 0.684, 98.0),
            compound("Ethanol", Family::Alcohols, 2, 0.790, 78.0),
        ])
    }

    #[test]
    fn single_component_recipe_is_always_stable() {
        let table = table();
        let scorer = ViabilityScorer::new(&table);
        let recipe = Recipe::default().entry("Isooctane", 100.0);
        let v = scorer.score(&recipe).unwrap();
        assert_eq!(v.score, 100.0);
        assert_eq!(v.insight, SINGLE_COMPONENT_INSIGHT);
    }

    #[test]
    fn identical_components_have_zero_dispersion() {
        let source = ComponentTable::new(vec![
            compound("A", Family::NAlkanes, 7, 0.684, 98.0),
            compound("B", Family::NAlkanes, 7, 0.684, 98.0),
        ]);
        let scorer = ViabilityScorer::new(&source);
        let recipe = Recipe::default().entry("A", 50.0).entry("B", 50.0);
        let v = scorer.score(&recipe).unwrap();
        assert_eq!(v.score, 100.0);
        assert_eq!(v.insight, EXCELLENT_INSIGHT);
    }

    #[test]
    fn similar_alkanes_score_near_the_top() {
        let table = table();
        let scorer = ViabilityScorer::new(&table);
        let recipe = Recipe::default()
            .entry("Isooctane", 60.0)
            .entry("n-Heptane", 40.0);
        let v = scorer.score(&recipe).unwrap();
        assert!(v.score > 90.0, "score was {}", v.score);
    }

    #[test]
    fn oxygen_mismatch_saturates_at_its_weight_cap() {
        // O2 spread far beyond the 20-point reference span: the oxygen term
        // contributes its full 0.6, no more.
        let source = ComponentTable::new(vec![
            compound("Hydrocarbon", Family::NAlkanes, 7, 0.684, 98.0),
            // C1 alcohol: derives to ~50 wt% oxygen.
            compound("Methanol-like", Family::Alcohols, 1, 0.684, 98.0),
        ]);
        let scorer = ViabilityScorer::new(&source);
        let recipe = Recipe::default()
            .entry("Hydrocarbon", 50.0)
            .entry("Methanol-like", 50.0);
        let v = scorer.score(&recipe).unwrap();
        // Density and BP are identical, so the penalty is exactly the O2 cap
        // and the score sits on the Fair/Poor edge, which belongs to Poor.
        assert!((v.score - (1.0 - O2_WEIGHT) * 100.0).abs() < 1e-9);
        assert_eq!(v.insight, POOR_INSIGHT);
        assert!(v.insight.contains("separate into layers"));
    }

    #[test]
    fn score_is_reported_to_one_decimal() {
        let table = table();
        let scorer = ViabilityScorer::new(&table);
        let recipe = Recipe::default()
            .entry("Isooctane", 60.0)
            .entry("Ethanol", 40.0);
        let v = scorer.score(&recipe).unwrap();
        assert!((v.score * 10.0 - (v.score * 10.0).round()).abs() < 1e-9);
    }

    #[test]
    fn percentages_are_normalized_by_their_sum() {
        let table = table();
        let scorer = ViabilityScorer::new(&table);
        let half_scale = Recipe::default()
            .entry("Isooctane", 30.0)
            .entry("Ethanol", 20.0);
        let full_scale = Recipe::default()
            .entry("Isooctane", 60.0)
            .entry("Ethanol", 40.0);
        let a = scorer.score(&half_scale).unwrap();
        let b = scorer.score(&full_scale).unwrap();
        assert!((a.score - b.score).abs() < 1e-9);
    }

    #[test]
    fn unknown_component_surfaces_a_lookup_failure() {
        let table = table();
        let scorer = ViabilityScorer::new(&table);
        let recipe = Recipe::default()
            .entry("Isooctane", 50.0)
            .entry("Unobtainium", 50.0);
        let err = scorer.score(&recipe).unwrap_err();
        assert!(matches!(err, EngineError::UnknownComponent { name } if name == "Unobtainium"));
    }

    #[test]
    fn missing_property_surfaces_which_value_is_absent() {
        let source = ComponentTable::new(vec![
            compound("Isooctane", Family::IsoAlkanes, 8, 0.692, 99.0),
            {
                let mut props = BTreeMap::new();
                props.insert(Property::Density, 0.626);
                Compound::assemble("No-BP".to_string(), Family::NAlkanes, 5, props)
            },
        ]);
        let scorer = ViabilityScorer::new(&source);
        let recipe = Recipe::default()
            .entry("Isooctane", 50.0)
            .entry("No-BP", 50.0);
        let err = scorer.score(&recipe).unwrap_err();
        assert!(matches!(
            err,
            EngineError::PropertyUnavailable {
                property: Property::BoilingPoint,
                ..
            }
        ));
    }

    #[test]
    fn empty_recipe_is_rejected() {
        let table = table();
        let scorer = ViabilityScorer::new(&table);
        assert!(matches!(
            scorer.score(&Recipe::default()),
            Err(EngineError::EmptyRecipe)
        ));
    }
}
