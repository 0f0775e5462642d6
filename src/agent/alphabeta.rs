use super::{Decision, EvaluationFn, EvaluationRegistry, MultiAgentSearchAgent, Ply};
use crate::common::GameState;
use crate::config::AdversarialConfig;
use crate::stat::Stats;

use tracing::{debug, instrument, trace};

/// Minimax with alpha-beta pruning. Returns the same action and value as
/// [`super::MinimaxAgent`] while skipping subtrees that cannot change them.
pub struct AlphaBetaAgent<S: GameState> {
    depth: usize,
    evaluation_fn: EvaluationFn<S>,
    stats: Stats,
}

impl<S: GameState> AlphaBetaAgent<S> {
    pub fn new(depth: usize, evaluation_fn: EvaluationFn<S>) -> Self {
        AlphaBetaAgent {
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

    // alpha: best value agent 0 can already force on this path.
    // beta: best value the adversaries can already force on this path.
    fn value(&mut self, state: &S, ply: Ply, mut alpha: f64, mut beta: f64) -> f64 {
        self.stats.game_nodes += 1;
        let Some(actions) = ply.expand(state, self.depth) else {
            return (self.evaluation_fn)(state);
        };

        let next = ply.next(state.num_agents());
        if ply.agent_index == 0 {
            let mut value = f64::NEG_INFINITY;
            for action in &actions {
                let successor = state.generate_successor(ply.agent_index, action);
                value = value.max(self.value(&successor, next, alpha, beta));
                if value > beta {
                    trace!("prune max node at {ply:?}: {value} > {beta}");
                    return value;
                }
                alpha = alpha.max(value);
            }
            value
        } else {
            let mut value = f64::INFINITY;
            for action in &actions {
                let successor = state.generate_successor(ply.agent_index, action);
                value = value.min(self.value(&successor, next, alpha, beta));
                if value < alpha {
                    trace!("prune min node at {ply:?}: {value} < {alpha}");
                    return value;
                }
                beta = beta.min(value);
            }
            value
        }
    }
}

impl<S: GameState> MultiAgentSearchAgent<S> for AlphaBetaAgent<S> {
    #[instrument(skip_all, name = "alpha_beta", fields(depth = self.depth), level = "debug")]
    fn decide(&mut self, state: &S) -> Option<Decision<S::Action>> {
        let first = Ply::root().next(state.num_agents());
        let mut alpha = f64::NEG_INFINITY;
        let beta = f64::INFINITY;
        let mut decision: Option<Decision<S::Action>> = None;

        for action in state.legal_actions(0) {
            let successor = state.generate_successor(0, &action);
            let value = self.value(&successor, first, alpha, beta);
            if value > beta {
                break;
            }
            if decision.is_none() || value > alpha {
                alpha = value;
                decision = Some(Decision { action, value });
            }
        }

        debug!(
            "decision {decision:?}, game nodes {:?}",
            self.stats.game_nodes
        );
        decision
    }
}
