use super::{Answer, Solver};
use crate::algorithm::search;
use crate::common::{Cell, CostModel, Node};
use crate::config::{Config, Strategy};
use crate::map::Map;
use crate::pool::WorkerPool;
use crate::scenario::Scenario;
use crate::stat::Stats;

use anyhow::{anyhow, bail};
use tracing::{debug, info, instrument};

/// Walk from the top left to the bottom right corner while coordinates keep
/// falling onto the grid.
pub struct RamRun {
    scenario: Scenario,
}

impl RamRun {
    pub fn new(scenario: Scenario) -> Self {
        RamRun { scenario }
    }

    fn exit_distance(&self, map: &Map, stats: &mut Stats) -> Option<usize> {
        let start = self.scenario.start();
        if !map.is_passable(start) {
            return None;
        }
        search(map, Node::at(start), &CostModel::uniform(), stats)
            .cost(Node::at(self.scenario.exit()))
    }

    fn is_blocked(&self, fallen: usize, stats: &mut Stats) -> bool {
        self.exit_distance(&self.scenario.map_after(fallen), stats)
            .is_none()
    }

    /// Smallest number of fallen coordinates that cuts the exit off.
    fn first_blocking_by_bisection(&self, stats: &mut Stats) -> Option<usize> {
        let total = self.scenario.falling.len();
        if !self.is_blocked(total, stats) {
            return None;
        }
        // Invariant: `reachable` fallen leaves a way out, `blocked` does not.
        let (mut reachable, mut blocked) = (0, total);
        if self.is_blocked(reachable, stats) {
            return Some(0);
        }
        while reachable + 1 < blocked {
            let mid = reachable + (blocked - reachable) / 2;
            if self.is_blocked(mid, stats) {
                blocked = mid;
            } else {
                reachable = mid;
            }
            debug!("bisect: reachable {reachable} blocked {blocked}");
        }
        Some(blocked)
    }

    /// Probes every prefix as its own candidate on the worker pool.
    fn first_blocking_exhaustive(
        &self,
        workers: usize,
        stats: &mut Stats,
    ) -> anyhow::Result<Option<usize>> {
        let pool = WorkerPool::new(workers)?;
        let base = Map::open(self.scenario.width, self.scenario.height);
        let candidates: Vec<usize> = (0..=self.scenario.falling.len()).collect();

        let (blocked, pool_stats) =
            pool.evaluate(&base, &candidates, |base: &Map, &fallen, stats| {
                let mut map = base.clone();
                for &cell in &self.scenario.falling[..fallen] {
                    map.set_wall(cell);
                }
                self.exit_distance(&map, stats).is_none()
            });
        stats.merge(&pool_stats);

        Ok(blocked.iter().position(|&blocked| blocked))
    }
}

impl Solver for RamRun {
    #[instrument(skip_all, name = "ram_run", fields(width = self.scenario.width, height = self.scenario.height), level = "debug")]
    fn solve(&self, config: &Config, stats: &mut Stats) -> anyhow::Result<Answer> {
        let steps = self
            .exit_distance(&self.scenario.map_after(config.fallen), stats)
            .ok_or_else(|| {
                anyhow!(
                    "exit {} is unreachable after {} coordinates fell",
                    self.scenario.exit(),
                    config.fallen
                )
            })?;

        let first_blocking = match config.strategy {
            Strategy::Bisect => self.first_blocking_by_bisection(stats),
            Strategy::Exhaustive => self.first_blocking_exhaustive(config.workers, stats)?,
        };
        let cell: Cell = match first_blocking {
            Some(0) => bail!("exit {} is unreachable on the empty grid", self.scenario.exit()),
            Some(fallen) => self.scenario.falling[fallen - 1],
            None => bail!("no falling coordinate ever cuts off the exit"),
        };

        info!("{steps} steps after {} coordinates, cut off by {cell}", config.fallen);
        Ok(Answer::new(steps, cell))
    }
}
