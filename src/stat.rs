use serde::Serialize;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub searches: usize,
    pub expanded_nodes: usize,
    pub relaxations: usize,
    pub tie_updates: usize,
    pub time_us: usize,
}

impl Stats {
    pub fn merge(&mut self, other: &Stats) {
        self.searches += other.searches;
        self.expanded_nodes += other.expanded_nodes;
        self.relaxations += other.relaxations;
        self.tie_updates += other.tie_updates;
    }

    pub fn print(&self) {
        info!(
            "Searches {:?} Time(microseconds) {:?} Expanded nodes {:?} Relaxations {:?} Tie updates {:?}",
            self.searches, self.time_us, self.expanded_nodes, self.relaxations, self.tie_updates
        );
    }
}
