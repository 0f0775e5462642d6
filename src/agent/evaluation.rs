use crate::common::GameState;

use anyhow::anyhow;
use std::collections::HashMap;

pub type EvaluationFn<S> = fn(&S) -> f64;

/// The score of the state, as displayed by the game.
pub fn score_evaluation_function<S: GameState>(state: &S) -> f64 {
    state.score()
}

/// Evaluation functions addressable by name from configuration.
pub struct EvaluationRegistry<S> {
    functions: HashMap<String, EvaluationFn<S>>,
}

impl<S: GameState> Default for EvaluationRegistry<S> {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry
            .register("scoreEvaluationFunction", score_evaluation_function::<S>)
            .register("score", score_evaluation_function::<S>);
        registry
    }
}

impl<S> EvaluationRegistry<S> {
    pub fn empty() -> Self {
        EvaluationRegistry {
            functions: HashMap::new(),
        }
    }

    /// Add or replace `name`.
    pub fn register(&mut self, name: impl Into<String>, function: EvaluationFn<S>) -> &mut Self {
        self.functions.insert(name.into(), function);
        self
    }

    pub fn lookup(&self, name: &str) -> anyhow::Result<EvaluationFn<S>> {
        self.functions.get(name).copied().ok_or_else(|| {
            anyhow!(
                "Unknown evaluation function {name:?}, expected one of {:?}",
                self.names()
            )
        })
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
