use super::{ValueEstimationAgent, ValueIterationAgent};
use crate::common::{MarkovDecisionProcess, PriorityQueue, ValueTable};
use crate::config::MdpConfig;
use crate::stat::Stats;

use std::collections::{HashMap, HashSet};
use tracing::{debug, instrument, trace};

/// Asynchronous value iteration that updates the state with the largest
/// Bellman error first and only revisits predecessors of changed states.
pub struct PrioritizedSweepingAgent<'a, M: MarkovDecisionProcess> {
    inner: ValueIterationAgent<'a, M>,
    theta: f64,
}

impl<'a, M: MarkovDecisionProcess> PrioritizedSweepingAgent<'a, M> {
    /// Validate `config` and run up to `config.iterations` single-state
    /// updates.
    pub fn new(mdp: &'a M, config: &MdpConfig) -> anyhow::Result<Self> {
        let mut agent = PrioritizedSweepingAgent {
            inner: ValueIterationAgent::unsolved(mdp, config)?,
            theta: config.theta,
        };
        agent.run_prioritized_sweeping();
        Ok(agent)
    }

    pub fn values(&self) -> &ValueTable<M::State> {
        self.inner.values()
    }

    pub fn stats(&self) -> &Stats {
        self.inner.stats()
    }

    /// Every state that can reach `state` with nonzero probability in one step.
    fn compute_predecessors(&self) -> HashMap<M::State, Vec<M::State>> {
        let mdp = self.inner.mdp;
        let mut predecessors: HashMap<M::State, Vec<M::State>> = HashMap::new();
        let mut seen = HashSet::new();
        for state in mdp.states() {
            for action in mdp.possible_actions(&state) {
                for (next_state, probability) in mdp.transition_states_and_probs(&state, &action) {
                    if probability > 0.0 && seen.insert((state.clone(), next_state.clone())) {
                        predecessors
                            .entry(next_state)
                            .or_default()
                            .push(state.clone());
                    }
                }
            }
        }
        predecessors
    }

    /// Absolute Bellman error of `state`, `None` when it has no action.
    fn bellman_error(&self, state: &M::State) -> Option<f64> {
        self.inner
            .max_q_value(state)
            .map(|max_q_value| (self.inner.values.get(state) - max_q_value).abs())
    }

    #[instrument(skip_all, name = "prioritized_sweeping", fields(iterations = self.inner.iterations), level = "debug")]
    fn run_prioritized_sweeping(&mut self) {
        let mdp = self.inner.mdp;
        let predecessors = self.compute_predecessors();

        // Larger error means higher priority, so priorities are negated.
        let mut queue = PriorityQueue::new();
        for state in mdp.states() {
            if mdp.is_terminal(&state) {
                continue;
            }
            if let Some(error) = self.bellman_error(&state) {
                queue.push(state, -error);
            }
        }

        for iteration in 0..self.inner.iterations {
            let Some(state) = queue.pop() else {
                debug!("queue empty after {iteration} updates");
                break;
            };

            if !mdp.is_terminal(&state) {
                if let Some(max_q_value) = self.inner.max_q_value(&state) {
                    self.inner.values.set(state.clone(), max_q_value);
                    self.inner.stats.value_updates += 1;
                    trace!("update {state:?} to {max_q_value}");
                }
            }

            for predecessor in predecessors.get(&state).into_iter().flatten() {
                match self.bellman_error(predecessor) {
                    Some(error) if error > self.theta => {
                        queue.update(predecessor.clone(), -error);
                    }
                    _ => {}
                }
            }
        }
        debug!(
            "{} updates, {} states still queued",
            self.inner.stats.value_updates,
            queue.len()
        );
    }
}

impl<M: MarkovDecisionProcess> ValueEstimationAgent<M> for PrioritizedSweepingAgent<'_, M> {
    fn get_value(&self, state: &M::State) -> f64 {
        self.inner.get_value(state)
    }

    fn get_q_value(&self, state: &M::State, action: &M::Action) -> f64 {
        self.inner.get_q_value(state, action)
    }

    fn get_policy(&self, state: &M::State) -> Option<M::Action> {
        self.inner.get_policy(state)
    }
}
