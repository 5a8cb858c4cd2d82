mod dijkstra;
mod reconstruct;

pub use dijkstra::search;
pub use reconstruct::{reconstruct_optimal_cells, reconstruct_optimal_cells_from};

use std::collections::{HashMap, HashSet};

use crate::common::{Cell, CostMap, CostModel, Node, PredecessorMap};

/// A grid the search can walk.
pub trait Pather {
    /// Whether a search may start on `cell`.
    fn is_open(&self, cell: Cell) -> bool;

    /// Moves out of `node` and what each one costs. Blocked and out-of-bounds
    /// cells never show up here.
    fn transitions(&self, node: Node, cost_model: &CostModel) -> Vec<(Node, usize)>;
}

/// Everything one search learned about the grid, starting from `start`.
#[derive(Debug, Clone)]
pub struct ShortestPaths {
    pub start: Node,
    pub costs: CostMap,
    pub predecessors: PredecessorMap,
}

impl ShortestPaths {
    pub fn cost(&self, node: Node) -> Option<usize> {
        self.costs.get(&node).copied()
    }

    /// Cheapest arrival at `cell` over every facing it was reached with.
    pub fn min_cost_to(&self, cell: Cell) -> Option<usize> {
        self.costs
            .iter()
            .filter(|(node, _)| node.cell == cell)
            .map(|(_, &cost)| cost)
            .min()
    }

    /// The nodes at `cell` that achieve `min_cost_to(cell)`.
    pub fn goal_nodes(&self, cell: Cell) -> Vec<Node> {
        let Some(best) = self.min_cost_to(cell) else {
            return Vec::new();
        };
        let mut nodes: Vec<Node> = self
            .costs
            .iter()
            .filter(|&(node, &cost)| node.cell == cell && cost == best)
            .map(|(&node, _)| node)
            .collect();
        nodes.sort();
        nodes
    }

    /// Every cell on at least one cheapest path to `cell`, or `None` when
    /// `cell` was never reached.
    pub fn optimal_cells(&self, cell: Cell) -> Option<HashSet<Cell>> {
        let goals = self.goal_nodes(cell);
        if goals.is_empty() {
            return None;
        }
        Some(reconstruct_optimal_cells_from(
            &self.predecessors,
            self.start,
            goals,
        ))
    }

    /// Number of distinct cheapest paths from the start into every reached
    /// node. Exact when every edge costs more than zero; saturates instead of
    /// overflowing on open grids.
    pub fn path_counts(&self) -> HashMap<Node, usize> {
        let mut order: Vec<(usize, Node)> = self
            .costs
            .iter()
            .map(|(&node, &cost)| (cost, node))
            .collect();
        order.sort();

        let mut counts: HashMap<Node, usize> = HashMap::with_capacity(order.len());
        for (_, node) in order {
            let count = if node == self.start {
                1
            } else {
                self.predecessors.get(&node).map_or(0, |preds| {
                    preds
                        .iter()
                        .filter_map(|prev| counts.get(prev))
                        .fold(0usize, |total, &count| total.saturating_add(count))
                })
            };
            counts.insert(node, count);
        }
        counts
    }

    /// Number of distinct cheapest paths ending at `cell`, over every facing
    /// that ties for its minimum. Zero when `cell` was never reached.
    pub fn count_paths_to(&self, cell: Cell) -> usize {
        let counts = self.path_counts();
        self.goal_nodes(cell)
            .iter()
            .filter_map(|node| counts.get(node))
            .fold(0, |total, &count| total.saturating_add(count))
    }
}
