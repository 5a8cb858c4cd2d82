mod ram_run;
mod race;
mod reindeer;
mod trailhead;

pub use ram_run::RamRun;
pub use race::RaceTrack;
pub use reindeer::ReindeerMaze;
pub use trailhead::TrailMap;

use serde::Serialize;

use crate::config::{Config, Puzzle};
use crate::height_map::HeightMap;
use crate::map::Maze;
use crate::scenario::Scenario;
use crate::stat::Stats;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub part1: String,
    pub part2: String,
}

impl Answer {
    pub fn new(part1: impl ToString, part2: impl ToString) -> Self {
        Answer {
            part1: part1.to_string(),
            part2: part2.to_string(),
        }
    }
}

pub trait Solver {
    fn solve(&self, config: &Config, stats: &mut Stats) -> anyhow::Result<Answer>;
}

/// Loads the configured input and wraps it in the matching solver.
pub fn load_solver(config: &Config) -> anyhow::Result<Box<dyn Solver>> {
    let solver: Box<dyn Solver> = match config.puzzle {
        Puzzle::Reindeer => Box::new(ReindeerMaze::new(Maze::from_file(&config.input_path)?)),
        Puzzle::RamRun => Box::new(RamRun::new(Scenario::load_from_file(
            &config.input_path,
            config.grid_width,
            config.grid_height,
        )?)),
        Puzzle::Race => Box::new(RaceTrack::new(Maze::from_file(&config.input_path)?)),
        Puzzle::Trailhead => Box::new(TrailMap::new(HeightMap::from_file(&config.input_path)?)),
    };
    Ok(solver)
}
