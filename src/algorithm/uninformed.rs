use super::construct_actions;
use crate::common::{FringeEntry, SearchNode, SearchProblem};
use crate::stat::Stats;

use std::collections::{HashSet, VecDeque};
use tracing::{debug, instrument, trace};

/// Deepest nodes first.
///
/// A state is marked visited when popped, so the same state can sit on the
/// stack several times. The first copy popped is expanded, later copies are
/// dropped.
#[instrument(skip_all, name = "dfs", level = "debug")]
pub fn depth_first_search<P: SearchProblem>(problem: &P, stats: &mut Stats) -> Vec<P::Action> {
    let mut fringe = vec![FringeEntry::root(SearchNode::new(
        problem.start_state(),
        0.0,
        0.0,
    ))];
    let mut visited = HashSet::new();

    while let Some(current) = fringe.pop() {
        if !visited.insert(current.state().clone()) {
            continue;
        }
        trace!("expand node: {:?}", current.node);
        stats.expanded_nodes += 1;

        if problem.is_goal_state(current.state()) {
            return construct_actions(&current, stats);
        }

        for successor in problem.successors(current.state()) {
            if visited.contains(&successor.state) {
                continue;
            }
            let node = SearchNode::new(
                successor.state,
                current.node.backward_cost + successor.step_cost,
                0.0,
            );
            fringe.push(FringeEntry::child(&current, node, successor.action));
            stats.fringe_pushes += 1;
        }
    }

    debug!("cannot find solution");
    Vec::new()
}

/// Shallowest nodes first; the returned path has the fewest actions.
///
/// A state is marked visited when pushed, the start state before the loop.
#[instrument(skip_all, name = "bfs", level = "debug")]
pub fn breadth_first_search<P: SearchProblem>(problem: &P, stats: &mut Stats) -> Vec<P::Action> {
    let start = problem.start_state();
    let mut visited = HashSet::from([start.clone()]);
    let mut fringe = VecDeque::from([FringeEntry::root(SearchNode::new(start, 0.0, 0.0))]);

    while let Some(current) = fringe.pop_front() {
        trace!("expand node: {:?}", current.node);
        stats.expanded_nodes += 1;

        if problem.is_goal_state(current.state()) {
            return construct_actions(&current, stats);
        }

        for successor in problem.successors(current.state()) {
            if !visited.insert(successor.state.clone()) {
                continue;
            }
            let node = SearchNode::new(
                successor.state,
                current.node.backward_cost + successor.step_cost,
                0.0,
            );
            fringe.push_back(FringeEntry::child(&current, node, successor.action));
            stats.fringe_pushes += 1;
        }
    }

    debug!("cannot find solution");
    Vec::new()
}
