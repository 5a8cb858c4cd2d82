use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Puzzle {
    /// Maze where turning costs more than moving.
    Reindeer,
    /// Grid filling up with falling coordinates.
    RamRun,
    /// Single race track with wall-skipping cheats.
    Race,
    /// Height map with hiking trails climbing from 0 to 9.
    Trailhead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Binary search on the number of fallen coordinates.
    Bisect,
    /// Probe every candidate on the worker pool.
    Exhaustive,
}

#[derive(Parser, Debug)]
#[command(
    name = "grid-search",
    about = "Shortest-path puzzles on grids, keeping every tied optimal path.",
    version = "0.1"
)]
pub struct Cli {
    #[arg(long, help = "Path to a YAML config file")]
    pub config: Option<String>,

    #[arg(long, value_enum, help = "Puzzle to solve")]
    pub puzzle: Option<Puzzle>,

    #[arg(long, help = "Path to the puzzle input")]
    pub input: Option<String>,

    #[arg(long, help = "Number of worker threads")]
    pub workers: Option<usize>,

    #[arg(long, help = "Cost of one step forward (reindeer)")]
    pub step_cost: Option<usize>,

    #[arg(long, help = "Cost of a quarter turn in place (reindeer)")]
    pub turn_cost: Option<usize>,

    #[arg(long, help = "Grid width (ram-run)")]
    pub width: Option<usize>,

    #[arg(long, help = "Grid height (ram-run)")]
    pub height: Option<usize>,

    #[arg(long, help = "Coordinates fallen before part 1 (ram-run)")]
    pub fallen: Option<usize>,

    #[arg(long, value_enum, help = "How to find the blocking coordinate (ram-run)")]
    pub strategy: Option<Strategy>,

    #[arg(long, help = "Minimum steps a two-step cheat must save (race)")]
    pub threshold: Option<usize>,

    #[arg(long, help = "Minimum steps a long cheat must save (race)")]
    pub long_threshold: Option<usize>,

    #[arg(long, help = "Print answers as JSON", default_value_t = false)]
    pub json: bool,

    #[arg(long, help = "Log filter, e.g. info or grid_search=debug")]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub puzzle: Puzzle,
    pub input_path: String,
    pub workers: usize,
    pub step_cost: usize,
    pub turn_cost: usize,
    pub grid_width: usize,
    pub grid_height: usize,
    pub fallen: usize,
    pub strategy: Strategy,
    pub threshold: usize,
    pub long_threshold: usize,
    pub json: bool,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            puzzle: Puzzle::Reindeer,
            input_path: String::new(),
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            step_cost: 1,
            turn_cost: 1000,
            grid_width: 71,
            grid_height: 71,
            fallen: 1024,
            strategy: Strategy::Bisect,
            threshold: 100,
            long_threshold: 50,
            json: false,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid config")
    }

    /// Every flag given on the command line wins over the config file.
    pub fn override_from_command_line(mut self, cli: &Cli) -> anyhow::Result<Self> {
        if let Some(puzzle) = cli.puzzle {
            self.puzzle = puzzle;
        }
        if let Some(input) = &cli.input {
            self.input_path = input.clone();
        }
        if let Some(workers) = cli.workers {
            self.workers = workers;
        }
        if let Some(step_cost) = cli.step_cost {
            self.step_cost = step_cost;
        }
        if let Some(turn_cost) = cli.turn_cost {
            self.turn_cost = turn_cost;
        }
        if let Some(width) = cli.width {
            self.grid_width = width;
        }
        if let Some(height) = cli.height {
            self.grid_height = height;
        }
        if let Some(fallen) = cli.fallen {
            self.fallen = fallen;
        }
        if let Some(strategy) = cli.strategy {
            self.strategy = strategy;
        }
        if let Some(threshold) = cli.threshold {
            self.threshold = threshold;
        }
        if let Some(long_threshold) = cli.long_threshold {
            self.long_threshold = long_threshold;
        }
        if let Some(log_level) = &cli.log_level {
            self.log_level = log_level.clone();
        }
        self.json |= cli.json;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.input_path.is_empty() {
            bail!("no puzzle input given");
        }
        if self.workers == 0 {
            bail!("workers must be at least 1");
        }
        if self.step_cost == 0 {
            bail!("step cost must be positive");
        }
        if self.puzzle == Puzzle::RamRun && (self.grid_width == 0 || self.grid_height == 0) {
            bail!(
                "grid must not be empty, got {}x{}",
                self.grid_width,
                self.grid_height
            );
        }
        if self.puzzle == Puzzle::Race && (self.threshold == 0 || self.long_threshold == 0) {
            bail!("cheat thresholds must be positive");
        }
        Ok(())
    }
}

/// Log filter for a run: `--log-level` first, then `RUST_LOG`, then the
/// config file.
pub fn log_filter(cli: &Cli, config: &Config) -> anyhow::Result<EnvFilter> {
    let filter = match &cli.log_level {
        Some(level) => EnvFilter::try_new(level)?,
        None => EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))?,
    };
    Ok(filter)
}
