mod fringe;
mod game;
mod mdp;
mod priority_queue;
mod problem;
mod values;

pub(crate) use fringe::PriorityOrderWrapper;
pub use fringe::{FringeEntry, SearchNode};
pub use game::GameState;
pub use mdp::MarkovDecisionProcess;
pub use priority_queue::PriorityQueue;
pub use problem::{null_heuristic, SearchProblem, Successor};
pub use values::ValueTable;
