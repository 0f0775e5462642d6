mod prioritized;
mod value_iteration;

pub use prioritized::PrioritizedSweepingAgent;
pub use value_iteration::ValueIterationAgent;

use crate::common::MarkovDecisionProcess;

/// Read access to a solved value function.
pub trait ValueEstimationAgent<M: MarkovDecisionProcess> {
    /// Estimated value of `state`, 0 for a state never updated.
    fn get_value(&self, state: &M::State) -> f64;

    fn get_q_value(&self, state: &M::State, action: &M::Action) -> f64;

    /// Greedy action under the current values, `None` when `state` has no
    /// possible action.
    fn get_policy(&self, state: &M::State) -> Option<M::Action>;

    /// Same as the policy, there is no exploration.
    fn get_action(&self, state: &M::State) -> Option<M::Action> {
        self.get_policy(state)
    }
}
