use super::construct_actions;
use crate::common::{
    null_heuristic, FringeEntry, PriorityOrderWrapper, SearchNode, SearchProblem,
};
use crate::stat::Stats;

use std::collections::{BinaryHeap, HashSet};
use tracing::{debug, instrument, trace};

/// Least backward cost first. Optimal for nonnegative step costs.
#[instrument(skip_all, name = "ucs", level = "debug")]
pub fn uniform_cost_search<P: SearchProblem>(problem: &P, stats: &mut Stats) -> Vec<P::Action> {
    best_first_search(problem, null_heuristic::<P>, stats)
}

/// Least `backward cost + heuristic` first.
///
/// Optimal when `heuristic` is consistent, which the closed set assumes:
/// an expanded state is never reopened.
#[instrument(skip_all, name = "a_star", level = "debug")]
pub fn a_star_search<P, H>(problem: &P, heuristic: H, stats: &mut Stats) -> Vec<P::Action>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    best_first_search(problem, heuristic, stats)
}

fn best_first_search<P, H>(problem: &P, heuristic: H, stats: &mut Stats) -> Vec<P::Action>
where
    P: SearchProblem,
    H: Fn(&P::State, &P) -> f64,
{
    let mut open_list = BinaryHeap::new();
    let mut closed_list = HashSet::new();
    let mut sequence = 0;

    let start = problem.start_state();
    let start_h_cost = heuristic(&start, problem);
    open_list.push(PriorityOrderWrapper::new(
        FringeEntry::root(SearchNode::new(start, 0.0, start_h_cost)),
        sequence,
    ));

    while let Some(PriorityOrderWrapper { entry: current, .. }) = open_list.pop() {
        if problem.is_goal_state(current.state()) {
            return construct_actions(&current, stats);
        }

        // Stale duplicate of an already expanded state.
        if !closed_list.insert(current.state().clone()) {
            continue;
        }
        trace!("expand node: {:?}", current.node);
        stats.expanded_nodes += 1;

        for successor in problem.successors(current.state()) {
            if closed_list.contains(&successor.state) {
                continue;
            }
            let h_cost = heuristic(&successor.state, problem);
            let node = SearchNode::new(
                successor.state,
                current.node.backward_cost + successor.step_cost,
                h_cost,
            );
            sequence += 1;
            open_list.push(PriorityOrderWrapper::new(
                FringeEntry::child(&current, node, successor.action),
                sequence,
            ));
            stats.fringe_pushes += 1;
        }
    }

    debug!("cannot find solution");
    Vec::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::fixtures::GraphProblem;
    use crate::algorithm::{breadth_first_search, depth_first_search};
    use crate::maze::{
        euclidean_heuristic, exact_heuristic, manhattan_heuristic, Maze, MazeProblem,
    };

    // Helper function to setup tracing
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("trace")
            .try_init();
    }

    fn tiny_maze() -> Maze {
        Maze::from_file("map_file/tiny/tinyMaze.map").unwrap()
    }

    #[test]
    fn test_ucs_prefers_cheap_path() {
        init_tracing();
        let problem = GraphProblem::weighted();
        let stats = &mut Stats::default();
        let actions = uniform_cost_search(&problem, stats);

        assert_eq!(actions, vec!["S->B", "B->C", "C->D", "D->G"]);
        assert_eq!(problem.cost_of_actions(&actions), 4.0);
        assert_eq!(stats.cost, 4.0);
        assert_eq!(problem.replay(&actions), Some("G"));
    }

    #[test]
    fn test_a_star_null_heuristic_matches_ucs() {
        init_tracing();
        let problem = GraphProblem::weighted();
        let ucs = uniform_cost_search(&problem, &mut Stats::default());
        let astar = a_star_search(
            &problem,
            null_heuristic::<GraphProblem>,
            &mut Stats::default(),
        );

        assert_eq!(
            problem.cost_of_actions(&ucs),
            problem.cost_of_actions(&astar)
        );
    }

    #[test]
    fn test_start_is_goal() {
        init_tracing();
        let problem = GraphProblem::new("G", &["G"], &[("G", "A", 1.0)]);

        assert!(uniform_cost_search(&problem, &mut Stats::default()).is_empty());
        let astar = a_star_search(
            &problem,
            null_heuristic::<GraphProblem>,
            &mut Stats::default(),
        );
        assert!(astar.is_empty());
    }

    #[test]
    fn test_unreachable_goal() {
        init_tracing();
        let problem = GraphProblem::new("S", &["G"], &[("S", "A", 1.0), ("A", "S", 2.0)]);
        let stats = &mut Stats::default();

        assert!(uniform_cost_search(&problem, stats).is_empty());
        assert_eq!(stats.expanded_nodes, 2);
    }

    #[test]
    fn test_ucs_skips_stale_entries() {
        init_tracing();
        // B is first pushed with cost 5, later reached for 2. The stale copy
        // surfaces before G and is dropped.
        let problem = GraphProblem::new(
            "S",
            &["G"],
            &[
                ("S", "B", 5.0),
                ("S", "A", 1.0),
                ("A", "B", 1.0),
                ("B", "G", 10.0),
            ],
        );
        let stats = &mut Stats::default();
        let actions = uniform_cost_search(&problem, stats);

        assert_eq!(actions, vec!["S->A", "A->B", "B->G"]);
        assert_eq!(stats.cost, 12.0);
        assert_eq!(stats.expanded_nodes, 3);
    }

    #[test]
    fn test_a_star_maze_heuristics() {
        init_tracing();
        let maze = tiny_maze();
        let problem = MazeProblem::new(&maze, (1, 5), (5, 1)).unwrap();

        let ucs_stats = &mut Stats::default();
        let ucs = uniform_cost_search(&problem, ucs_stats);
        assert_eq!(problem.cost_of_actions(&ucs), 8.0);

        let manhattan_stats = &mut Stats::default();
        let manhattan = a_star_search(&problem, manhattan_heuristic, manhattan_stats);
        assert_eq!(problem.cost_of_actions(&manhattan), 8.0);

        let euclidean = a_star_search(&problem, euclidean_heuristic, &mut Stats::default());
        assert_eq!(problem.cost_of_actions(&euclidean), 8.0);

        let exact_stats = &mut Stats::default();
        let exact = a_star_search(&problem, exact_heuristic(&maze, (5, 1)), exact_stats);
        assert_eq!(problem.cost_of_actions(&exact), 8.0);

        // Better informed, fewer expansions.
        assert!(manhattan_stats.expanded_nodes <= ucs_stats.expanded_nodes);
        assert_eq!(exact_stats.expanded_nodes, 8);
    }

    #[test]
    fn test_weighted_maze_ucs_beats_bfs() {
        init_tracing();
        let maze = "type octile
height 3
width 3
map
...
.@.
...
"
        .parse::<Maze>()
        .unwrap();
        // Entering the right column is expensive.
        let problem = MazeProblem::new(&maze, (0, 1), (2, 1))
            .unwrap()
            .with_cost_fn(|(_, column)| if column == 2 { 10.0 } else { 1.0 });

        let bfs = breadth_first_search(&problem, &mut Stats::default());
        let ucs = uniform_cost_search(&problem, &mut Stats::default());
        let astar = a_star_search(&problem, manhattan_heuristic, &mut Stats::default());

        assert_eq!(bfs.len(), 4);
        assert_eq!(problem.cost_of_actions(&ucs), 4.0);
        assert_eq!(problem.cost_of_actions(&astar), 4.0);
        assert!(problem.cost_of_actions(&bfs) >= problem.cost_of_actions(&ucs));
    }

    #[test]
    fn test_repeated_search_is_stable() {
        init_tracing();
        let maze = tiny_maze();
        let problem = MazeProblem::new(&maze, (1, 1), (4, 4)).unwrap();

        let first = a_star_search(&problem, manhattan_heuristic, &mut Stats::default());
        let second = a_star_search(&problem, manhattan_heuristic, &mut Stats::default());
        assert_eq!(
            problem.cost_of_actions(&first),
            problem.cost_of_actions(&second)
        );

        let dfs = depth_first_search(&problem, &mut Stats::default());
        assert!(problem.cost_of_actions(&dfs) >= problem.cost_of_actions(&first));
    }
}
