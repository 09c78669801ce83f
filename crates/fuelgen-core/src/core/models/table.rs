use super::compound::Compound;
use std::collections::HashMap;

/// The immutable, name-indexed component table produced by the generator.
///
/// Names are unique by construction (the generator disambiguates collisions
/// before insertion); the table is read-only once built and may be shared
/// freely by concurrent mixer and scorer calls.
#[derive(Debug, Clone, Default)]
pub struct ComponentTable {
    compounds: Vec<Compound>,
    by_name: HashMap<String, usize>,
}

impl ComponentTable {
    pub fn new(compounds: Vec<Compound>) -> Self {
        let by_name = compounds
            .iter()
            .enumerate()
            .map(|(i, c)| (c.name.clone(), i))
            .collect();
        Self { compounds, by_name }
    }

    pub fn get(&self, name: &str) -> Option<&Compound> {
        self.by_name.get(name).map(|&i| &self.compounds[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Compound> {
        self.compounds.iter()
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }
}

impl From<Vec<Compound>> for ComponentTable {
    fn from(compounds: Vec<Compound>) -> Self {
        Self::new(compounds)
    }
}
