use super::{Answer, Solver};
use crate::algorithm::search;
use crate::common::{Cell, CostModel, Node};
use crate::config::Config;
use crate::height_map::{HeightMap, SUMMIT, TRAILHEAD};
use crate::pool::WorkerPool;
use crate::stat::Stats;

use tracing::{debug, info, instrument};

/// Hiking trails that climb one level per step from a 0 to a 9.
pub struct TrailMap {
    heights: HeightMap,
}

/// Summits one trailhead reaches and the number of distinct trails to them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Trails {
    pub score: usize,
    pub rating: usize,
}

impl TrailMap {
    pub fn new(heights: HeightMap) -> Self {
        TrailMap { heights }
    }

    /// Every trail from `head` has exactly nine steps, so every trail is a
    /// cheapest path and the tied predecessor sets count all of them.
    pub fn trails_from(heights: &HeightMap, head: Cell, stats: &mut Stats) -> Trails {
        let paths = search(heights, Node::at(head), &CostModel::uniform(), stats);
        let counts = paths.path_counts();

        let mut trails = Trails::default();
        for (node, &count) in &counts {
            if heights.height_at(node.cell) == Some(SUMMIT) {
                trails.score += 1;
                trails.rating = trails.rating.saturating_add(count);
            }
        }
        debug!("trailhead {head}: score {} rating {}", trails.score, trails.rating);
        trails
    }
}

impl Solver for TrailMap {
    #[instrument(skip_all, name = "trailhead", fields(width = self.heights.width, height = self.heights.height), level = "debug")]
    fn solve(&self, config: &Config, stats: &mut Stats) -> anyhow::Result<Answer> {
        let heads = self.heights.cells_at(TRAILHEAD);
        let pool = WorkerPool::new(config.workers)?;
        let (trails, pool_stats) =
            pool.evaluate(&self.heights, &heads, |heights: &HeightMap, &head, stats| {
                Self::trails_from(heights, head, stats)
            });
        stats.merge(&pool_stats);

        let score: usize = trails.iter().map(|trails| trails.score).sum();
        let rating: usize = trails.iter().map(|trails| trails.rating).sum();
        info!("{} trailheads, total score {score}, total rating {rating}", heads.len());
        Ok(Answer::new(score, rating))
    }
}
