use super::{Answer, Solver};
use crate::algorithm::{search, ShortestPaths};
use crate::common::{CostModel, Node};
use crate::config::Config;
use crate::map::Maze;
use crate::stat::Stats;

use anyhow::anyhow;
use tracing::{debug, info, instrument};

const SHORT_CHEAT: usize = 2;
const LONG_CHEAT: usize = 20;

/// Single-track race where a program may pass through walls once, for a
/// bounded number of steps.
pub struct RaceTrack {
    maze: Maze,
}

impl RaceTrack {
    pub fn new(maze: Maze) -> Self {
        RaceTrack { maze }
    }
}

/// Counts cheats lasting at most `cheat_time` steps that save at least
/// `threshold` steps. A cheat jumps between two track cells, so its length
/// is their Manhattan distance.
pub fn count_cheats(paths: &ShortestPaths, cheat_time: usize, threshold: usize) -> usize {
    let reach = cheat_time as isize;
    let mut count = 0;

    for (node, &from_cost) in &paths.costs {
        for dy in -reach..=reach {
            let span = reach - dy.abs();
            for dx in -span..=span {
                let Some(to) = node.cell.offset(dx, dy) else {
                    continue;
                };
                let Some(to_cost) = paths.cost(Node::at(to)) else {
                    continue;
                };
                let distance = node.cell.manhattan(to);
                if to_cost >= from_cost + distance + threshold {
                    count += 1;
                }
            }
        }
    }

    debug!("{count} cheats of up to {cheat_time} steps save at least {threshold}");
    count
}

impl Solver for RaceTrack {
    #[instrument(skip_all, name = "race", fields(threshold = config.threshold, long_threshold = config.long_threshold), level = "debug")]
    fn solve(&self, config: &Config, stats: &mut Stats) -> anyhow::Result<Answer> {
        let paths = search(
            &self.maze.map,
            Node::at(self.maze.start),
            &CostModel::uniform(),
            stats,
        );
        let track_length = paths
            .cost(Node::at(self.maze.end))
            .ok_or_else(|| anyhow!("end {} is unreachable", self.maze.end))?;
        info!("track is {track_length} steps long");

        Ok(Answer::new(
            count_cheats(&paths, SHORT_CHEAT, config.threshold),
            count_cheats(&paths, LONG_CHEAT, config.long_threshold),
        ))
    }
}
