mod alphabeta;
mod evaluation;
mod expectimax;
mod minimax;
mod reflex;

pub use alphabeta::AlphaBetaAgent;
pub use evaluation::{score_evaluation_function, EvaluationFn, EvaluationRegistry};
pub use expectimax::ExpectimaxAgent;
pub use minimax::MinimaxAgent;
pub use reflex::{ActionEvaluationFn, ReflexAgent};

use crate::common::GameState;

/// Chosen root action and its backed-up value.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision<A> {
    pub action: A,
    pub value: f64,
}

pub trait MultiAgentSearchAgent<S: GameState> {
    /// Best action for agent 0 in `state`, `None` when it has no legal action.
    fn decide(&mut self, state: &S) -> Option<Decision<S::Action>>;

    fn get_action(&mut self, state: &S) -> Option<S::Action> {
        self.decide(state).map(|decision| decision.action)
    }
}

/// Position in the implicit game tree. Depth counts full rounds, one move
/// per agent, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Ply {
    pub(crate) depth: usize,
    pub(crate) agent_index: usize,
}

impl Ply {
    pub(crate) fn root() -> Self {
        Ply {
            depth: 1,
            agent_index: 0,
        }
    }

    /// Ply after the current agent has moved. Wraps back to agent 0 one
    /// round deeper once every agent has moved.
    pub(crate) fn next(self, num_agents: usize) -> Self {
        if self.agent_index + 1 >= num_agents {
            Ply {
                depth: self.depth + 1,
                agent_index: 0,
            }
        } else {
            Ply {
                depth: self.depth,
                agent_index: self.agent_index + 1,
            }
        }
    }

    /// Legal actions to search from `state`, or `None` at a leaf: a won or
    /// lost game, a ply past `max_depth`, or an agent with no move.
    pub(crate) fn expand<S: GameState>(
        &self,
        state: &S,
        max_depth: usize,
    ) -> Option<Vec<S::Action>> {
        if state.is_terminal() || self.depth > max_depth {
            return None;
        }
        let actions = state.legal_actions(self.agent_index);
        (!actions.is_empty()).then_some(actions)
    }
}

/// First action of agent 0 with the strictly greatest value.
fn select_max_action<S, F>(state: &S, mut value_of: F) -> Option<Decision<S::Action>>
where
    S: GameState,
    F: FnMut(&S) -> f64,
{
    let mut best: Option<Decision<S::Action>> = None;
    for action in state.legal_actions(0) {
        let successor = state.generate_successor(0, &action);
        let value = value_of(&successor);
        if best.as_ref().map_or(true, |best| value > best.value) {
            best = Some(Decision { action, value });
        }
    }
    best
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::common::GameState;

    use rand::rngs::StdRng;
    use rand::Rng;
    use std::rc::Rc;

    #[derive(Debug)]
    pub(crate) struct Tree {
        pub(crate) score: f64,
        pub(crate) win: bool,
        pub(crate) children: Vec<Rc<Tree>>,
    }

    pub(crate) fn leaf(score: f64) -> Rc<Tree> {
        Rc::new(Tree {
            score,
            win: false,
            children: Vec::new(),
        })
    }

    pub(crate) fn node(children: Vec<Rc<Tree>>) -> Rc<Tree> {
        Rc::new(Tree {
            score: 0.0,
            win: false,
            children,
        })
    }

    pub(crate) fn scored_node(score: f64, children: Vec<Rc<Tree>>) -> Rc<Tree> {
        Rc::new(Tree {
            score,
            win: false,
            children,
        })
    }

    pub(crate) fn won(score: f64, children: Vec<Rc<Tree>>) -> Rc<Tree> {
        Rc::new(Tree {
            score,
            win: true,
            children,
        })
    }

    pub(crate) fn leaves(scores: &[f64]) -> Vec<Rc<Tree>> {
        scores.iter().map(|&score| leaf(score)).collect()
    }

    /// Explicit game tree; every agent picks a child index.
    #[derive(Debug, Clone)]
    pub(crate) struct TreeGame {
        pub(crate) tree: Rc<Tree>,
        pub(crate) num_agents: usize,
    }

    impl TreeGame {
        pub(crate) fn new(tree: Rc<Tree>, num_agents: usize) -> Self {
            TreeGame { tree, num_agents }
        }
    }

    impl GameState for TreeGame {
        type Action = usize;

        fn legal_actions(&self, _agent_index: usize) -> Vec<usize> {
            (0..self.tree.children.len()).collect()
        }

        fn generate_successor(&self, _agent_index: usize, action: &usize) -> Self {
            TreeGame {
                tree: Rc::clone(&self.tree.children[*action]),
                num_agents: self.num_agents,
            }
        }

        fn num_agents(&self) -> usize {
            self.num_agents
        }

        fn is_win(&self) -> bool {
            self.tree.win
        }

        fn is_lose(&self) -> bool {
            false
        }

        fn score(&self) -> f64 {
            self.tree.score
        }
    }

    /// Random tree with integer scores, so ties are common.
    pub(crate) fn random_tree(rng: &mut StdRng, levels: usize) -> Rc<Tree> {
        let children = (0..rng.gen_range(1..=4))
            .map(|_| {
                if levels <= 1 || rng.gen_bool(0.15) {
                    leaf(rng.gen_range(0..20) as f64)
                } else {
                    random_tree(rng, levels - 1)
                }
            })
            .collect();
        node(children)
    }
}
