use anyhow::{bail, Context, Result};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info};

use crate::stat::Stats;

/// Fixed-size pool running one independent job per candidate.
///
/// Jobs only ever see the shared grid by reference; anything they change
/// (an extra wall, a cost map) lives in the job itself.
pub struct WorkerPool {
    pool: ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            bail!("worker pool needs at least one worker");
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("search-worker-{index}"))
            .build()
            .context("failed to start worker pool")?;
        info!("Started worker pool with {workers} workers");
        Ok(WorkerPool { pool, workers })
    }

    /// Runs `job` once per candidate and returns the results in candidate
    /// order, together with the merged statistics of every job.
    pub fn evaluate<G, C, R, F>(&self, grid: &G, candidates: &[C], job: F) -> (Vec<R>, Stats)
    where
        G: Sync + ?Sized,
        C: Sync,
        R: Send,
        F: Fn(&G, &C, &mut Stats) -> R + Sync,
    {
        debug!(
            "evaluate {} candidates on {} workers",
            candidates.len(),
            self.workers
        );
        let outcomes: Vec<(R, Stats)> = self.pool.install(|| {
            candidates
                .par_iter()
                .map(|candidate| {
                    let mut stats = Stats::default();
                    let result = job(grid, candidate, &mut stats);
                    (result, stats)
                })
                .collect()
        });

        let mut total = Stats::default();
        let results = outcomes
            .into_iter()
            .map(|(result, stats)| {
                total.merge(&stats);
                result
            })
            .collect();
        (results, total)
    }
}
