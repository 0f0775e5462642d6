mod astar;
mod uninformed;

pub use astar::{a_star_search, uniform_cost_search};
pub use uninformed::{breadth_first_search, depth_first_search};

use crate::common::FringeEntry;
use crate::stat::Stats;

use std::fmt::Debug;
use tracing::debug;

fn construct_actions<S: Debug, A: Clone + Debug>(
    goal: &FringeEntry<S, A>,
    stats: &mut Stats,
) -> Vec<A> {
    let actions = goal.actions();
    stats.cost = goal.node.backward_cost;
    stats.path_length = actions.len();
    debug!("reach goal {:?} with {} actions", goal.state(), actions.len());
    actions
}
