use crate::common::{SearchProblem, Successor};

use anyhow::{anyhow, bail, Context};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs;
use std::str::FromStr;

pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::East => (0, 1),
            Direction::West => (0, -1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Tile {
    passable: bool,
    pub neighbors: Vec<(Direction, Position)>, // Accessible neighbors and the move reaching them
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        self.passable
    }
}

/// Grid maze in the octile `.map` format:
///
/// ```text
/// type octile
/// height 3
/// width 3
/// map
/// ...
/// .@.
/// ...
/// ```
///
/// Positions are `(row, column)`.
#[derive(Debug, Clone)]
pub struct Maze {
    pub height: usize,
    pub width: usize,
    pub grid: Vec<Vec<Tile>>,
}

impl Maze {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read map file {path}"))?;
        content
            .parse()
            .with_context(|| format!("failed to parse map file {path}"))
    }

    fn initialize_neighbors(&mut self) {
        for x in 0..self.height {
            for y in 0..self.width {
                if self.grid[x][y].passable {
                    self.grid[x][y].neighbors = self.get_neighbors(x, y);
                }
            }
        }
    }

    pub fn get_neighbors(&self, x: usize, y: usize) -> Vec<(Direction, Position)> {
        Direction::ALL
            .iter()
            .filter_map(|&direction| {
                self.step((x, y), direction)
                    .map(|position| (direction, position))
            })
            .collect()
    }

    /// Position reached by moving once in `direction`, if it is passable.
    pub fn step(&self, (x, y): Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.offset();
        let new_x = x.checked_add_signed(dx)?;
        let new_y = y.checked_add_signed(dy)?;
        if self.in_bounds((new_x, new_y)) && self.grid[new_x][new_y].passable {
            Some((new_x, new_y))
        } else {
            None
        }
    }

    pub fn in_bounds(&self, (x, y): Position) -> bool {
        x < self.height && y < self.width
    }

    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.grid[x][y].is_passable()
    }

    /// True maze distance from every cell to `goal`, `usize::MAX` when
    /// unreachable.
    pub fn distances_to(&self, goal: Position) -> Vec<Vec<usize>> {
        let mut distances = vec![vec![usize::MAX; self.width]; self.height];
        let mut heap = BinaryHeap::new();

        distances[goal.0][goal.1] = 0;
        heap.push((Reverse(0), goal));

        while let Some((Reverse(cost), (x, y))) = heap.pop() {
            if cost > distances[x][y] {
                continue;
            }

            for &(_, (new_x, new_y)) in &self.grid[x][y].neighbors {
                let next_cost = cost + 1;
                if next_cost < distances[new_x][new_y] {
                    heap.push((Reverse(next_cost), (new_x, new_y)));
                    distances[new_x][new_y] = next_cost;
                }
            }
        }

        distances
    }
}

impl FromStr for Maze {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut lines = s.lines();

        let _type = lines.next().ok_or_else(|| anyhow!("missing type line"))?;
        let height = parse_header(lines.next(), "height")?;
        let width = parse_header(lines.next(), "width")?;
        match lines.next() {
            Some(line) if line.trim() == "map" => {}
            other => bail!("expected `map` line, got {other:?}"),
        }

        let mut grid = Vec::with_capacity(height);
        for (row, line) in lines.take(height).enumerate() {
            let tiles_row: Vec<Tile> = line
                .trim_end()
                .chars()
                .map(|ch| Tile {
                    passable: matches!(ch, '.' | 'G' | 'S'),
                    neighbors: Vec::new(),
                })
                .collect();
            if tiles_row.len() != width {
                bail!(
                    "row {row} has width {}, expected {width}",
                    tiles_row.len()
                );
            }
            grid.push(tiles_row);
        }
        if grid.len() != height {
            bail!("map has {} rows, expected {height}", grid.len());
        }

        let mut maze = Maze {
            height,
            width,
            grid,
        };
        maze.initialize_neighbors();
        Ok(maze)
    }
}

fn parse_header(line: Option<&str>, key: &str) -> anyhow::Result<usize> {
    let line = line.ok_or_else(|| anyhow!("missing {key} line"))?;
    let mut parts = line.split_whitespace();
    if parts.next() != Some(key) {
        bail!("expected `{key}` line, got {line:?}");
    }
    parts
        .next()
        .ok_or_else(|| anyhow!("missing {key} value"))?
        .parse::<usize>()
        .with_context(|| format!("invalid {key} value in {line:?}"))
}

/// Path from `start` to `goal` through a maze. Entering a cell costs
/// `cost_fn(cell)`, 1 by default.
#[derive(Debug, Clone)]
pub struct MazeProblem<'a> {
    maze: &'a Maze,
    start: Position,
    goal: Position,
    cost_fn: fn(Position) -> f64,
}

impl<'a> MazeProblem<'a> {
    pub fn new(maze: &'a Maze, start: Position, goal: Position) -> anyhow::Result<Self> {
        for (name, position) in [("start", start), ("goal", goal)] {
            if !maze.in_bounds(position) {
                bail!("{name} {position:?} is outside the {}x{} maze", maze.height, maze.width);
            }
            if !maze.is_passable(position.0, position.1) {
                bail!("{name} {position:?} is a wall");
            }
        }
        Ok(MazeProblem {
            maze,
            start,
            goal,
            cost_fn: |_| 1.0,
        })
    }

    pub fn with_cost_fn(mut self, cost_fn: fn(Position) -> f64) -> Self {
        self.cost_fn = cost_fn;
        self
    }

    pub fn maze(&self) -> &Maze {
        self.maze
    }

    pub fn goal(&self) -> Position {
        self.goal
    }
}

impl SearchProblem for MazeProblem<'_> {
    type State = Position;
    type Action = Direction;

    fn start_state(&self) -> Position {
        self.start
    }

    fn is_goal_state(&self, state: &Position) -> bool {
        *state == self.goal
    }

    fn successors(&self, state: &Position) -> Vec<Successor<Position, Direction>> {
        self.maze.grid[state.0][state.1]
            .neighbors
            .iter()
            .map(|&(direction, next)| Successor::new(next, direction, (self.cost_fn)(next)))
            .collect()
    }

    /// Infinite when the sequence walks into a wall.
    fn cost_of_actions(&self, actions: &[Direction]) -> f64 {
        let mut position = self.start;
        let mut cost = 0.0;
        for &action in actions {
            match self.maze.step(position, action) {
                Some(next) => {
                    position = next;
                    cost += (self.cost_fn)(next);
                }
                None => return f64::INFINITY,
            }
        }
        cost
    }
}

pub fn manhattan_heuristic(state: &Position, problem: &MazeProblem) -> f64 {
    let goal = problem.goal();
    (state.0.abs_diff(goal.0) + state.1.abs_diff(goal.1)) as f64
}

pub fn euclidean_heuristic(state: &Position, problem: &MazeProblem) -> f64 {
    let goal = problem.goal();
    let dx = state.0.abs_diff(goal.0) as f64;
    let dy = state.1.abs_diff(goal.1) as f64;
    (dx * dx + dy * dy).sqrt()
}

/// Perfect heuristic for unit step costs, from a precomputed distance table.
pub fn exact_heuristic(maze: &Maze, goal: Position) -> impl Fn(&Position, &MazeProblem) -> f64 {
    let distances = maze.distances_to(goal);
    move |state: &Position, _: &MazeProblem| match distances[state.0][state.1] {
        usize::MAX => f64::INFINITY,
        distance => distance as f64,
    }
}
