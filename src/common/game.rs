use std::fmt::Debug;

/// Turn-based multi-agent game state. Agent 0 maximizes, every other agent
/// is an adversary (minimizing or chance). Successor generation never
/// mutates `self`.
pub trait GameState: Sized {
    type Action: Clone + Debug;

    fn legal_actions(&self, agent_index: usize) -> Vec<Self::Action>;

    fn generate_successor(&self, agent_index: usize, action: &Self::Action) -> Self;

    fn num_agents(&self) -> usize;

    fn is_win(&self) -> bool;

    fn is_lose(&self) -> bool;

    /// Current game score, what the default evaluation function reports.
    fn score(&self) -> f64;

    fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}
