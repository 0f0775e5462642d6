use std::collections::HashMap;
use std::hash::Hash;

/// State value estimates. States never written read as 0.
#[derive(Debug, Clone)]
pub struct ValueTable<S> {
    values: HashMap<S, f64>,
}

impl<S> Default for ValueTable<S> {
    fn default() -> Self {
        ValueTable {
            values: HashMap::new(),
        }
    }
}

impl<S: Eq + Hash> ValueTable<S> {
    pub const DEFAULT_VALUE: f64 = 0.0;

    pub fn get(&self, state: &S) -> f64 {
        self.values
            .get(state)
            .copied()
            .unwrap_or(Self::DEFAULT_VALUE)
    }

    pub fn set(&mut self, state: S, value: f64) {
        self.values.insert(state, value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &f64)> {
        self.values.iter()
    }
}

impl<S: Eq + Hash> FromIterator<(S, f64)> for ValueTable<S> {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        ValueTable {
            values: iter.into_iter().collect(),
        }
    }
}
