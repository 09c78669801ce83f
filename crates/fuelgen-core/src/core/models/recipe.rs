/// One entry of a candidate blend recipe: a component referenced by name and
/// its share of the blend in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeEntry {
    pub name: String,
    pub percentage: f64,
}

/// A transient, caller-supplied blend recipe for viability scoring.
///
/// A recipe may hold any number of entries (not only two), and the
/// percentages need not sum to exactly 100; the scorer normalizes by their
/// sum. Recipes are never persisted and are not validated against the
/// mixer's formulas.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Recipe {
    pub entries: Vec<RecipeEntry>,
}

impl Recipe {
    pub fn new(entries: Vec<RecipeEntry>) -> Self {
        Self { entries }
    }

    pub fn entry(mut self, name: impl Into<String>, percentage: f64) -> Self {
        self.entries.push(RecipeEntry {
            name: name.into(),
            percentage,
        });
        self
    }

    pub fn total_percentage(&self) -> f64 {
        self.entries.iter().map(|e| e.percentage).sum()
    }
}
