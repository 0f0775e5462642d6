use super::{Decision, MultiAgentSearchAgent};
use crate::common::GameState;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

pub type ActionEvaluationFn<S> = fn(&S, &<S as GameState>::Action) -> f64;

/// One-step lookahead: scores each legal action of agent 0 and picks
/// uniformly at random among the best scored.
pub struct ReflexAgent<S: GameState, R: Rng> {
    evaluation_fn: ActionEvaluationFn<S>,
    rng: R,
}

impl<S: GameState, R: Rng> ReflexAgent<S, R> {
    pub fn new(evaluation_fn: ActionEvaluationFn<S>, rng: R) -> Self {
        ReflexAgent { evaluation_fn, rng }
    }
}

impl<S: GameState, R: Rng> MultiAgentSearchAgent<S> for ReflexAgent<S, R> {
    fn decide(&mut self, state: &S) -> Option<Decision<S::Action>> {
        let legal_moves = state.legal_actions(0);
        let scores: Vec<f64> = legal_moves
            .iter()
            .map(|action| (self.evaluation_fn)(state, action))
            .collect();
        let best_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let best_indices: Vec<usize> = (0..scores.len())
            .filter(|&index| scores[index] == best_score)
            .collect();

        let chosen_index = *best_indices.choose(&mut self.rng)?;
        debug!(
            "choose {:?} among {} best moves",
            legal_moves[chosen_index],
            best_indices.len()
        );
        Some(Decision {
            action: legal_moves[chosen_index].clone(),
            value: best_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::fixtures::{leaf, leaves, node, TreeGame};

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn successor_score(state: &TreeGame, action: &usize) -> f64 {
        state.generate_successor(0, action).score()
    }

    #[test]
    fn test_reflex_picks_only_among_best() {
        let game = TreeGame::new(node(leaves(&[3.0, 7.0, 1.0, 7.0, 7.0])), 2);
        let mut agent: ReflexAgent<TreeGame, StdRng> =
            ReflexAgent::new(successor_score, StdRng::seed_from_u64(0));

        let mut chosen = HashSet::new();
        for _ in 0..200 {
            let decision = agent.decide(&game).unwrap();
            assert_eq!(decision.value, 7.0);
            chosen.insert(decision.action);
        }
        assert_eq!(chosen, HashSet::from([1, 3, 4]));
    }

    #[test]
    fn test_reflex_without_moves() {
        let mut agent: ReflexAgent<TreeGame, StdRng> =
            ReflexAgent::new(successor_score, StdRng::seed_from_u64(0));
        assert_eq!(agent.get_action(&TreeGame::new(leaf(1.0), 2)), None);
    }
}
