use std::collections::{HashSet, VecDeque};

use crate::common::{Cell, Node, PredecessorMap};

/// Union of the cells on every cheapest path from `start` to `goal`.
///
/// `goal` must have been reached by the search that built `predecessors`;
/// the result always holds the start and goal cells.
pub fn reconstruct_optimal_cells(
    predecessors: &PredecessorMap,
    start: Node,
    goal: Node,
) -> HashSet<Cell> {
    reconstruct_optimal_cells_from(predecessors, start, [goal])
}

/// Same as [`reconstruct_optimal_cells`], walking back from several goal
/// nodes at once (e.g. every facing that ties for the cheapest arrival).
pub fn reconstruct_optimal_cells_from(
    predecessors: &PredecessorMap,
    start: Node,
    goals: impl IntoIterator<Item = Node>,
) -> HashSet<Cell> {
    let mut cells = HashSet::from([start.cell]);
    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();

    for goal in goals {
        if visited.insert(goal) {
            queue.push_back(goal);
        }
    }

    // Each node is queued once, so branching ties stay linear.
    while let Some(node) = queue.pop_front() {
        cells.insert(node.cell);
        if node == start {
            continue;
        }
        let Some(previous) = predecessors.get(&node) else {
            continue;
        };
        for &prev in previous {
            if visited.insert(prev) {
                queue.push_back(prev);
            }
        }
    }

    cells
}
