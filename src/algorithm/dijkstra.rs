use super::{Pather, ShortestPaths};
use crate::common::{CostMap, CostModel, Node, PredecessorMap};
use crate::stat::Stats;

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};
use tracing::{debug, instrument, trace};

/// Dijkstra from `start`, keeping every predecessor that ties for a node's
/// cheapest cost.
///
/// `start` must be an open cell and must carry a facing exactly when the
/// cost model charges for turning. Nodes that cannot be reached are simply
/// missing from the returned cost map.
#[instrument(skip_all, name = "dijkstra", fields(start = format!("{}", start.cell), oriented = cost_model.is_oriented()), level = "debug")]
pub fn search<P>(grid: &P, start: Node, cost_model: &CostModel, stats: &mut Stats) -> ShortestPaths
where
    P: Pather + ?Sized,
{
    debug_assert!(grid.is_open(start.cell), "start {} is blocked", start.cell);
    debug_assert_eq!(cost_model.is_oriented(), start.facing.is_some());

    let mut costs = CostMap::new();
    let mut predecessors = PredecessorMap::new();
    let mut open = BinaryHeap::new();

    costs.insert(start, 0);
    open.push((Reverse(0), start));
    stats.searches += 1;

    while let Some((Reverse(cost), current)) = open.pop() {
        // A cheaper entry for this node was already expanded.
        if cost > costs[&current] {
            continue;
        }
        trace!("expand node: {current:?} cost {cost}");
        stats.expanded_nodes += 1;

        for (neighbor, edge_cost) in grid.transitions(current, cost_model) {
            let tentative_cost = cost + edge_cost;
            match costs.get(&neighbor) {
                Some(&best) if tentative_cost > best => {}
                Some(&best) if tentative_cost == best => {
                    if predecessors.entry(neighbor).or_default().insert(current) {
                        stats.tie_updates += 1;
                    }
                }
                _ => {
                    costs.insert(neighbor, tentative_cost);
                    predecessors.insert(neighbor, HashSet::from([current]));
                    open.push((Reverse(tentative_cost), neighbor));
                    stats.relaxations += 1;
                }
            }
        }
    }

    debug!("reached {} nodes", costs.len());
    ShortestPaths {
        start,
        costs,
        predecessors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::reconstruct_optimal_cells;
    use crate::common::{Cell, Direction};
    use crate::map::{Map, Maze};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // Helper function to setup tracing
    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    }

    const CORRIDOR: &str = "\
#######
#S..#.#
###.#.#
###...#
#####E#
#######";

    fn random_map(rng: &mut StdRng, width: usize, height: usize) -> Map {
        let mut map = Map::open(width, height);
        for y in 0..height {
            for x in 0..width {
                if (x, y) != (0, 0) && rng.gen_bool(0.3) {
                    map.set_wall(Cell::new(x, y));
                }
            }
        }
        map
    }

    fn all_nodes(map: &Map, oriented: bool) -> Vec<Node> {
        map.open_cells()
            .flat_map(|cell| {
                if oriented {
                    Direction::ALL
                        .iter()
                        .map(|&direction| Node::facing(cell, direction))
                        .collect::<Vec<_>>()
                } else {
                    vec![Node::at(cell)]
                }
            })
            .collect()
    }

    // Label-correcting relaxation until nothing changes, independent of the heap.
    fn brute_force_costs(map: &Map, start: Node, cost_model: &CostModel) -> CostMap {
        let nodes = all_nodes(map, cost_model.is_oriented());
        let mut costs = CostMap::from([(start, 0)]);
        loop {
            let mut changed = false;
            for &node in &nodes {
                let Some(&cost) = costs.get(&node) else {
                    continue;
                };
                for (next, edge_cost) in map.transitions(node, cost_model) {
                    let candidate = cost + edge_cost;
                    if costs.get(&next).map_or(true, |&best| candidate < best) {
                        costs.insert(next, candidate);
                        changed = true;
                    }
                }
            }
            if !changed {
                return costs;
            }
        }
    }

    #[test]
    fn test_open_square_unit_cost() {
        init_tracing();
        let map = Map::open(4, 4);
        let start = Node::at(Cell::new(0, 0));
        let goal = Node::at(Cell::new(3, 3));
        let stats = &mut Stats::default();

        let result = search(&map, start, &CostModel::uniform(), stats);
        assert_eq!(result.cost(goal), Some(6));
        assert_eq!(result.path_counts()[&goal], 20);

        // Every cell of the rectangle lies on some monotone staircase.
        let cells = reconstruct_optimal_cells(&result.predecessors, start, goal);
        assert_eq!(cells.len(), 16);
        assert!(cells.contains(&Cell::new(3, 0)));
        assert!(cells.contains(&Cell::new(0, 3)));

        assert_eq!(stats.searches, 1);
        assert_eq!(stats.expanded_nodes, 16);
        assert!(stats.tie_updates > 0);
    }

    #[test]
    fn test_costs_are_zero_at_start_and_positive_elsewhere() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let map = random_map(&mut rng, 6, 5);
            let start = Node::at(Cell::new(0, 0));
            let result = search(&map, start, &CostModel::uniform(), &mut Stats::default());
            for (node, &cost) in &result.costs {
                if *node == start {
                    assert_eq!(cost, 0);
                } else {
                    assert!(cost > 0, "{node:?} has cost {cost}");
                }
            }
        }
    }

    #[test]
    fn test_matches_brute_force_and_keeps_every_tied_predecessor() {
        init_tracing();
        let mut rng = StdRng::seed_from_u64(2024);
        let models = [CostModel::uniform(), CostModel::turn_penalty(1, 1000), CostModel::turn_penalty(3, 2)];

        for _ in 0..30 {
            let map = random_map(&mut rng, 5, 4);
            for cost_model in &models {
                let start = if cost_model.is_oriented() {
                    Node::facing(Cell::new(0, 0), Direction::East)
                } else {
                    Node::at(Cell::new(0, 0))
                };
                let result = search(&map, start, cost_model, &mut Stats::default());
                assert_eq!(result.costs, brute_force_costs(&map, start, cost_model));

                // A node's predecessor set is exactly the nodes with a tight edge into it.
                let mut expected = PredecessorMap::new();
                for (&node, &cost) in &result.costs {
                    for (next, edge_cost) in map.transitions(node, cost_model) {
                        if result.costs[&next] == cost + edge_cost {
                            expected.entry(next).or_default().insert(node);
                        }
                    }
                }
                assert_eq!(result.predecessors, expected);
            }
        }
    }

    #[test]
    fn test_search_is_repeatable() {
        let mut rng = StdRng::seed_from_u64(99);
        let map = random_map(&mut rng, 8, 8);
        let start = Node::facing(Cell::new(0, 0), Direction::South);
        let cost_model = CostModel::turn_penalty(1, 1000);

        let first = search(&map, start, &cost_model, &mut Stats::default());
        let second = search(&map, start, &cost_model, &mut Stats::default());
        assert_eq!(first.costs, second.costs);
        assert_eq!(first.predecessors, second.predecessors);
    }

    #[test]
    fn test_pillar_has_two_optimal_paths() {
        let map = Map::open(3, 3).with_wall(Cell::new(1, 1));
        let start = Node::at(Cell::new(0, 0));
        let goal = Node::at(Cell::new(2, 2));

        let result = search(&map, start, &CostModel::uniform(), &mut Stats::default());
        assert_eq!(result.cost(goal), Some(4));
        assert_eq!(result.path_counts()[&goal], 2);
        assert_eq!(result.count_paths_to(goal.cell), 2);
        assert_eq!(result.count_paths_to(Cell::new(1, 1)), 0);

        let cells = reconstruct_optimal_cells(&result.predecessors, start, goal);
        assert_eq!(cells.len(), 8);
        assert!(!cells.contains(&Cell::new(1, 1)));
    }

    #[test]
    fn test_corridor_has_single_path() {
        let maze: Maze = CORRIDOR.parse().unwrap();
        let start = Node::at(maze.start);
        let goal = Node::at(maze.end);

        let result = search(&maze.map, start, &CostModel::uniform(), &mut Stats::default());
        assert_eq!(result.cost(goal), Some(7));
        assert_eq!(result.path_counts()[&goal], 1);

        let cells = reconstruct_optimal_cells(&result.predecessors, start, goal);
        let corridor = HashSet::from([
            Cell::new(1, 1),
            Cell::new(2, 1),
            Cell::new(3, 1),
            Cell::new(3, 2),
            Cell::new(3, 3),
            Cell::new(4, 3),
            Cell::new(5, 3),
            Cell::new(5, 4),
        ]);
        // The dead end at (5,1)-(5,2) is reachable but never optimal.
        assert!(result.cost(Node::at(Cell::new(5, 1))).is_some());
        assert_eq!(cells, corridor);
    }

    #[test]
    fn test_corridor_with_turn_penalty() {
        let maze: Maze = CORRIDOR.parse().unwrap();
        let start = Node::facing(maze.start, Direction::East);

        let result = search(
            &maze.map,
            start,
            &CostModel::turn_penalty(1, 1000),
            &mut Stats::default(),
        );
        // Seven steps and three quarter turns.
        assert_eq!(result.min_cost_to(maze.end), Some(3007));
        assert_eq!(
            result.goal_nodes(maze.end),
            vec![Node::facing(maze.end, Direction::South)]
        );
        assert_eq!(result.optimal_cells(maze.end).unwrap().len(), 8);
    }

    #[test]
    fn test_turn_in_place_edges() {
        let map = Map::open(2, 2);
        let start = Node::facing(Cell::new(0, 0), Direction::East);
        let result = search(&map, start, &CostModel::turn_penalty(1, 1000), &mut Stats::default());

        assert_eq!(result.cost(Node::facing(Cell::new(0, 0), Direction::South)), Some(1000));
        assert_eq!(result.cost(Node::facing(Cell::new(0, 0), Direction::West)), Some(2000));
        assert_eq!(result.min_cost_to(Cell::new(1, 1)), Some(1002));

        let cells = result.optimal_cells(Cell::new(1, 1)).unwrap();
        assert_eq!(
            cells,
            HashSet::from([Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)])
        );
    }

    #[test]
    fn test_unreachable_goal_is_absent() {
        let mut map = Map::open(5, 3);
        for y in 0..3 {
            map.set_wall(Cell::new(2, y));
        }
        let start = Node::at(Cell::new(0, 1));
        let goal = Cell::new(4, 1);

        let result = search(&map, start, &CostModel::uniform(), &mut Stats::default());
        assert_eq!(result.cost(Node::at(goal)), None);
        assert_eq!(result.min_cost_to(goal), None);
        assert!(result.goal_nodes(goal).is_empty());
        assert!(result.optimal_cells(goal).is_none());
        assert_eq!(result.costs.len(), 6);
    }
}
