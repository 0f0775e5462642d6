use super::{
    select_max_action, Decision, EvaluationFn, EvaluationRegistry, MultiAgentSearchAgent, Ply,
};
use crate::common::GameState;
use crate::config::AdversarialConfig;
use crate::stat::Stats;

use tracing::{debug, instrument};

/// Every adversary plays optimally against agent 0.
pub struct MinimaxAgent<S: GameState> {
    depth: usize,
    evaluation_fn: EvaluationFn<S>,
    stats: Stats,
}

impl<S: GameState> MinimaxAgent<S> {
    pub fn new(depth: usize, evaluation_fn: EvaluationFn<S>) -> Self {
        MinimaxAgent {
            depth,
            evaluation_fn,
            stats: Stats::default(),
        }
    }

    pub fn from_config(
        config: &AdversarialConfig,
        registry: &EvaluationRegistry<S>,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(config.depth, registry.lookup(&config.evaluation_fn)?))
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    fn value(&mut self, state: &S, ply: Ply) -> f64 {
        self.stats.game_nodes += 1;
        let Some(actions) = ply.expand(state, self.depth) else {
            return (self.evaluation_fn)(state);
        };

        let next = ply.next(state.num_agents());
        let values = actions.iter().map(|action| {
            let successor = state.generate_successor(ply.agent_index, action);
            self.value(&successor, next)
        });
        if ply.agent_index == 0 {
            values.fold(f64::NEG_INFINITY, f64::max)
        } else {
            values.fold(f64::INFINITY, f64::min)
        }
    }
}

impl<S: GameState> MultiAgentSearchAgent<S> for MinimaxAgent<S> {
    #[instrument(skip_all, name = "minimax", fields(depth = self.depth), level = "debug")]
    fn decide(&mut self, state: &S) -> Option<Decision<S::Action>> {
        let first = Ply::root().next(state.num_agents());
        let decision = select_max_action(state, |successor| self.value(successor, first));
        debug!(
            "decision {decision:?}, game nodes {:?}",
            self.stats.game_nodes
        );
        decision
    }
}
