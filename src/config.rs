use anyhow::{anyhow, Context};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

#[derive(Parser, Debug)]
#[command(
    name = "Pacman Search",
    about = "Graph search, adversarial search and MDP solvers for grid worlds.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(long, help = "Path to the YAML config file")]
    pub config: Option<String>,

    #[arg(long, help = "Path to the map file")]
    pub map_path: Option<String>,

    #[arg(long, help = "Start position as row,column", value_delimiter = ',')]
    pub start: Vec<usize>,

    #[arg(long, help = "Goal position as row,column", value_delimiter = ',')]
    pub goal: Vec<usize>,

    #[arg(long, value_enum, help = "Search algorithm to use")]
    pub algorithm: Option<Algorithm>,

    #[arg(long, value_enum, help = "Heuristic used by A*")]
    pub heuristic: Option<HeuristicKind>,

    #[arg(long, help = "Path to the JSON report")]
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    Dfs,
    Bfs,
    Ucs,
    Astar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum HeuristicKind {
    Null,
    Manhattan,
    Euclidean,
    Exact,
}

/// Settings for the minimax family of agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdversarialConfig {
    /// Search depth in full rounds, one move per agent.
    pub depth: usize,
    /// Name looked up in an `EvaluationRegistry`.
    pub evaluation_fn: String,
}

impl Default for AdversarialConfig {
    fn default() -> Self {
        AdversarialConfig {
            depth: 2,
            evaluation_fn: "scoreEvaluationFunction".to_string(),
        }
    }
}

/// Settings for the value iteration agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdpConfig {
    pub discount: f64,
    pub iterations: usize,
    /// Minimum Bellman error for a predecessor to be queued, prioritized
    /// sweeping only.
    pub theta: f64,
}

impl Default for MdpConfig {
    fn default() -> Self {
        MdpConfig {
            discount: 0.9,
            iterations: 100,
            theta: 1e-5,
        }
    }
}

impl MdpConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.discount) {
            return Err(anyhow!(
                "Discount must be within [0, 1], got {}",
                self.discount
            ));
        }
        if self.theta.is_nan() || self.theta < 0.0 {
            return Err(anyhow!(
                "Theta must be a nonnegative number, got {}",
                self.theta
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub map_path: String,
    pub start: (usize, usize),
    pub goal: (usize, usize),
    pub algorithm: Algorithm,
    pub heuristic: HeuristicKind,
    pub output_path: Option<String>,
    pub adversarial: AdversarialConfig,
    pub mdp: MdpConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            map_path: "map_file/tiny/tinyMaze.map".to_string(),
            start: (1, 5),
            goal: (5, 1),
            algorithm: Algorithm::Astar,
            heuristic: HeuristicKind::Manhattan,
            output_path: None,
            adversarial: AdversarialConfig::default(),
            mdp: MdpConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid YAML config")
    }

    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(map_path) = &cli.map_path {
            self.map_path = map_path.clone();
        }
        if !cli.start.is_empty() {
            self.start = parse_position(&cli.start).context("invalid --start")?;
        }
        if !cli.goal.is_empty() {
            self.goal = parse_position(&cli.goal).context("invalid --goal")?;
        }
        if let Some(algorithm) = cli.algorithm {
            self.algorithm = algorithm;
        }
        if let Some(heuristic) = cli.heuristic {
            self.heuristic = heuristic;
        }
        if let Some(output_path) = &cli.output_path {
            self.output_path = Some(output_path.clone());
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.map_path.is_empty() {
            return Err(anyhow!("Map path must not be empty"));
        }
        self.mdp.validate()
    }
}

fn parse_position(values: &[usize]) -> anyhow::Result<(usize, usize)> {
    match values {
        [row, column] => Ok((*row, *column)),
        _ => Err(anyhow!(
            "Expected a position as row,column, got {} values",
            values.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaml_fills_defaults() {
        let config = Config::from_yaml_str(
            "map_path: map_file/test/test.map
algorithm: bfs
start: [0, 0]
mdp:
  discount: 0.5
",
        )
        .unwrap();

        assert_eq!(config.map_path, "map_file/test/test.map");
        assert_eq!(config.algorithm, Algorithm::Bfs);
        assert_eq!(config.start, (0, 0));
        assert_eq!(config.goal, (5, 1));
        assert_eq!(config.heuristic, HeuristicKind::Manhattan);
        assert_eq!(config.mdp.discount, 0.5);
        assert_eq!(config.mdp.iterations, 100);
        assert_eq!(config.mdp.theta, 1e-5);
        assert_eq!(config.adversarial, AdversarialConfig::default());
    }

    #[test]
    fn test_command_line_overrides_file() {
        let cli = Cli::parse_from([
            "pacman_search",
            "--goal",
            "2,2",
            "--algorithm",
            "ucs",
            "--heuristic",
            "exact",
        ]);
        let config = Config::default().override_from_command_line(&cli).unwrap();

        assert_eq!(config.goal, (2, 2));
        assert_eq!(config.start, (1, 5));
        assert_eq!(config.algorithm, Algorithm::Ucs);
        assert_eq!(config.heuristic, HeuristicKind::Exact);
    }

    #[test]
    fn test_bad_position_rejected() {
        let cli = Cli::parse_from(["pacman_search", "--start", "1,2,3"]);
        assert!(Config::default().override_from_command_line(&cli).is_err());
    }

    #[test]
    fn test_mdp_validation() {
        assert!(MdpConfig::default().validate().is_ok());
        let bad_discount = MdpConfig {
            discount: 1.5,
            ..MdpConfig::default()
        };
        assert!(bad_discount.validate().is_err());
        let bad_theta = MdpConfig {
            theta: f64::NAN,
            ..MdpConfig::default()
        };
        assert!(bad_theta.validate().is_err());
        let edge = MdpConfig {
            discount: 1.0,
            theta: 0.0,
            ..MdpConfig::default()
        };
        assert!(edge.validate().is_ok());
    }
}
