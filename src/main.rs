use pacman_search::algorithm::{
    a_star_search, breadth_first_search, depth_first_search, uniform_cost_search,
};
use pacman_search::common::null_heuristic;
use pacman_search::config::{Algorithm, Cli, Config, HeuristicKind};
use pacman_search::maze::{
    euclidean_heuristic, exact_heuristic, manhattan_heuristic, Direction, Maze, MazeProblem,
};
use pacman_search::stat::Stats;

use anyhow::Context;
use clap::Parser;
use serde::Serialize;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct Report<'a> {
    algorithm: Algorithm,
    heuristic: Option<HeuristicKind>,
    start: (usize, usize),
    goal: (usize, usize),
    actions: &'a [Direction],
    stats: &'a Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config = if let Some(config_file) = cli.config.as_ref() {
        let config_str = std::fs::read_to_string(config_file)
            .with_context(|| format!("failed to read config file {config_file}"))?;
        Config::from_yaml_str(&config_str)
            .with_context(|| format!("error with config file: {config_file}"))?
    } else {
        info!("No config file specified, using default config");
        Config::default()
    }
    .override_from_command_line(&cli)?;

    let maze = Maze::from_file(&config.map_path)?;
    let problem = MazeProblem::new(&maze, config.start, config.goal)?;

    let mut stats = Stats::default();
    let start_time = Instant::now();
    let actions = match config.algorithm {
        Algorithm::Dfs => depth_first_search(&problem, &mut stats),
        Algorithm::Bfs => breadth_first_search(&problem, &mut stats),
        Algorithm::Ucs => uniform_cost_search(&problem, &mut stats),
        Algorithm::Astar => match config.heuristic {
            HeuristicKind::Null => a_star_search(&problem, null_heuristic::<MazeProblem>, &mut stats),
            HeuristicKind::Manhattan => a_star_search(&problem, manhattan_heuristic, &mut stats),
            HeuristicKind::Euclidean => a_star_search(&problem, euclidean_heuristic, &mut stats),
            HeuristicKind::Exact => {
                a_star_search(&problem, exact_heuristic(&maze, config.goal), &mut stats)
            }
        },
    };
    stats.time_us = start_time.elapsed().as_micros() as usize;

    if actions.is_empty() && config.start != config.goal {
        warn!("no path from {:?} to {:?}", config.start, config.goal);
    } else {
        info!("actions: {actions:?}");
    }
    stats.print();

    if let Some(output_path) = &config.output_path {
        let report = Report {
            algorithm: config.algorithm,
            heuristic: (config.algorithm == Algorithm::Astar).then_some(config.heuristic),
            start: config.start,
            goal: config.goal,
            actions: &actions,
            stats: &stats,
        };
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(output_path, json)
            .with_context(|| format!("failed to write report to {output_path}"))?;
        info!("report written to {output_path}");
    }

    Ok(())
}
