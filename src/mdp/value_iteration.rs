use super::ValueEstimationAgent;
use crate::common::{MarkovDecisionProcess, ValueTable};
use crate::config::MdpConfig;
use crate::stat::Stats;

use tracing::{debug, instrument, trace};

/// Batch value iteration: every sweep computes all new values from the
/// previous sweep's table, then swaps the table in.
pub struct ValueIterationAgent<'a, M: MarkovDecisionProcess> {
    pub(super) mdp: &'a M,
    pub(super) discount: f64,
    pub(super) iterations: usize,
    pub(super) values: ValueTable<M::State>,
    pub(super) stats: Stats,
}

impl<'a, M: MarkovDecisionProcess> ValueIterationAgent<'a, M> {
    /// Validate `config` and run `config.iterations` sweeps.
    pub fn new(mdp: &'a M, config: &MdpConfig) -> anyhow::Result<Self> {
        let mut agent = Self::unsolved(mdp, config)?;
        agent.run_value_iteration();
        Ok(agent)
    }

    pub(super) fn unsolved(mdp: &'a M, config: &MdpConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(ValueIterationAgent {
            mdp,
            discount: config.discount,
            iterations: config.iterations,
            values: ValueTable::default(),
            stats: Stats::default(),
        })
    }

    pub fn values(&self) -> &ValueTable<M::State> {
        &self.values
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    #[instrument(skip_all, name = "value_iteration", fields(iterations = self.iterations), level = "debug")]
    fn run_value_iteration(&mut self) {
        let states = self.mdp.states();
        for iteration in 0..self.iterations {
            let new_values: ValueTable<M::State> = states
                .iter()
                .map(|state| {
                    let action = self.compute_action_from_values(state);
                    let value = self.compute_q_value_from_values(state, action.as_ref());
                    (state.clone(), value)
                })
                .collect();
            self.values = new_values;
            self.stats.value_updates += states.len();
            trace!("sweep {iteration} done");
        }
        debug!(
            "{} sweeps over {} states",
            self.iterations,
            states.len()
        );
    }

    /// Expected return of `action` in `state` under the current values.
    ///
    /// Without an action (no possible action in `state`) this is the stored
    /// value of `state` itself, so a sweep leaves terminal values unchanged.
    pub(super) fn compute_q_value_from_values(
        &self,
        state: &M::State,
        action: Option<&M::Action>,
    ) -> f64 {
        let Some(action) = action else {
            return self.values.get(state);
        };
        self.mdp
            .transition_states_and_probs(state, action)
            .iter()
            .map(|(next_state, probability)| {
                probability
                    * (self.mdp.reward(state, action, next_state)
                        + self.discount * self.values.get(next_state))
            })
            .sum()
    }

    /// First action with the strictly greatest Q-value.
    pub(super) fn compute_action_from_values(&self, state: &M::State) -> Option<M::Action> {
        let mut best_action = None;
        let mut max_q_value = f64::NEG_INFINITY;
        for action in self.mdp.possible_actions(state) {
            let q_value = self.compute_q_value_from_values(state, Some(&action));
            if best_action.is_none() || q_value > max_q_value {
                max_q_value = q_value;
                best_action = Some(action);
            }
        }
        best_action
    }

    /// Greatest Q-value over the possible actions of `state`.
    pub(super) fn max_q_value(&self, state: &M::State) -> Option<f64> {
        self.mdp
            .possible_actions(state)
            .iter()
            .map(|action| self.compute_q_value_from_values(state, Some(action)))
            .reduce(f64::max)
    }
}

impl<M: MarkovDecisionProcess> ValueEstimationAgent<M> for ValueIterationAgent<'_, M> {
    fn get_value(&self, state: &M::State) -> f64 {
        self.values.get(state)
    }

    fn get_q_value(&self, state: &M::State, action: &M::Action) -> f64 {
        self.compute_q_value_from_values(state, Some(action))
    }

    fn get_policy(&self, state: &M::State) -> Option<M::Action> {
        self.compute_action_from_values(state)
    }
}
