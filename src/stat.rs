use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub cost: f64,
    pub path_length: usize,
    pub time_us: usize,
    pub expanded_nodes: usize,
    pub fringe_pushes: usize,
    pub game_nodes: usize,
    pub value_updates: usize,
}

impl Stats {
    pub fn print(&self) {
        info!(
            "Cost {:?} Path length {:?} Time(microseconds) {:?} Expanded nodes {:?} Fringe pushes {:?}",
            self.cost, self.path_length, self.time_us, self.expanded_nodes, self.fringe_pushes
        );
    }
}
