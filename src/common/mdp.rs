use std::fmt::Debug;
use std::hash::Hash;

/// Finite Markov decision process.
///
/// Transition probabilities for one (state, action) pair sum to 1. Terminal
/// states have no possible actions.
pub trait MarkovDecisionProcess {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + Debug;

    fn states(&self) -> Vec<Self::State>;

    fn possible_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    fn transition_states_and_probs(
        &self,
        state: &Self::State,
        action: &Self::Action,
    ) -> Vec<(Self::State, f64)>;

    fn reward(&self, state: &Self::State, action: &Self::Action, next_state: &Self::State) -> f64;

    fn is_terminal(&self, state: &Self::State) -> bool;
}
