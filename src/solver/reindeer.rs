use super::{Answer, Solver};
use crate::algorithm::search;
use crate::common::{CostModel, Direction, Node};
use crate::config::Config;
use crate::map::Maze;
use crate::stat::Stats;

use anyhow::anyhow;
use tracing::{info, instrument};

/// Maze walked by a reindeer that starts facing east and pays extra for
/// every quarter turn.
pub struct ReindeerMaze {
    maze: Maze,
}

impl ReindeerMaze {
    pub fn new(maze: Maze) -> Self {
        ReindeerMaze { maze }
    }
}

impl Solver for ReindeerMaze {
    #[instrument(skip_all, name = "reindeer", fields(start = format!("{}", self.maze.start), end = format!("{}", self.maze.end)), level = "debug")]
    fn solve(&self, config: &Config, stats: &mut Stats) -> anyhow::Result<Answer> {
        let cost_model = CostModel::turn_penalty(config.step_cost, config.turn_cost);
        let start = Node::facing(self.maze.start, Direction::East);
        let paths = search(&self.maze.map, start, &cost_model, stats);

        let best_score = paths
            .min_cost_to(self.maze.end)
            .ok_or_else(|| anyhow!("end {} is unreachable", self.maze.end))?;
        let best_tiles = paths
            .optimal_cells(self.maze.end)
            .ok_or_else(|| anyhow!("end {} is unreachable", self.maze.end))?;

        info!(
            "best score {best_score} reached facing {:?}, {} tiles on best paths",
            paths.goal_nodes(self.maze.end),
            best_tiles.len()
        );
        Ok(Answer::new(best_score, best_tiles.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            input_path: "unused".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_first_sample() {
        let solver = ReindeerMaze::new(Maze::from_file("map_file/test/reindeer-1.txt").unwrap());
        let answer = solver.solve(&config(), &mut Stats::default()).unwrap();
        assert_eq!(answer, Answer::new(7036, 45));
    }

    #[test]
    fn test_second_sample() {
        let solver = ReindeerMaze::new(Maze::from_file("map_file/test/reindeer-2.txt").unwrap());
        let stats = &mut Stats::default();
        let answer = solver.solve(&config(), stats).unwrap();
        assert_eq!(answer, Answer::new(11048, 64));
        assert_eq!(stats.searches, 1);
    }

    #[test]
    fn test_cheap_turns_change_the_route() {
        // Heading east first needs one turn, heading north first needs two.
        let maze: Maze = "\
#######
#....E#
#.###.#
#S....#
#######"
            .parse()
            .unwrap();
        let solver = ReindeerMaze::new(maze);

        let answer = solver.solve(&config(), &mut Stats::default()).unwrap();
        assert_eq!(answer, Answer::new(1006, 7));

        let cheap_turns = Config {
            turn_cost: 0,
            ..config()
        };
        let answer = solver.solve(&cheap_turns, &mut Stats::default()).unwrap();
        // Both six-step routes tie once turning is free.
        assert_eq!(answer, Answer::new(6, 12));
    }

    #[test]
    fn test_unreachable_end() {
        let solver = ReindeerMaze::new("#S#E#".parse().unwrap());
        assert!(solver.solve(&config(), &mut Stats::default()).is_err());
    }
}
