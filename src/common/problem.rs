use std::fmt::Debug;
use std::hash::Hash;

/// One edge out of a search state.
#[derive(Debug, Clone, PartialEq)]
pub struct Successor<S, A> {
    pub state: S,
    pub action: A,
    pub step_cost: f64,
}

impl<S, A> Successor<S, A> {
    pub fn new(state: S, action: A, step_cost: f64) -> Self {
        Successor {
            state,
            action,
            step_cost,
        }
    }
}

/// A search problem as seen by the graph search engine.
///
/// States are opaque: the engine only hashes and compares them. Step costs
/// must be nonnegative.
pub trait SearchProblem {
    type State: Clone + Eq + Hash + Debug;
    type Action: Clone + Debug;

    fn start_state(&self) -> Self::State;

    fn is_goal_state(&self, state: &Self::State) -> bool;

    fn successors(&self, state: &Self::State) -> Vec<Successor<Self::State, Self::Action>>;

    /// Total cost of a sequence of legal actions taken from the start state.
    fn cost_of_actions(&self, actions: &[Self::Action]) -> f64;
}

/// Trivial heuristic, reduces A* to uniform cost search.
pub fn null_heuristic<P: SearchProblem>(_state: &P::State, _problem: &P) -> f64 {
    0.0
}
