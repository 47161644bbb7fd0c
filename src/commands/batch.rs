use anyhow::{bail, Result};
use log::info;
use rayon::prelude::*;
use std::path::PathBuf;

use super::config::Config;
use crate::engine::{Coord, Planner};
use crate::scenario::load_scenario;

#[derive(Clone, Debug, Default)]
pub struct BatchStats {
    pub jobs: usize,
    pub planned: usize,
    pub infeasible: usize,
    pub failed: usize,
}

impl BatchStats {
    /// Infeasible routes are a valid answer; jobs that errored are not.
    pub fn ensure_no_failures(&self) -> Result<()> {
        if self.failed > 0 {
            bail!("batch: {} of {} jobs failed", self.failed, self.jobs);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum JobOutcome {
    Planned { cost: u32, steps: usize },
    NoPath,
    Failed(String),
}

struct Job<'a> {
    label: String,
    planner: &'a Planner,
    start: Coord,
}

pub fn cmd_batch(cfg: &Config, grids: &[PathBuf], starts: &[Coord]) -> Result<BatchStats> {
    let mut grids = grids.to_vec();
    if grids.is_empty() {
        grids.extend(cfg.grid.clone());
    }
    if grids.is_empty() {
        bail!("batch: no scenarios given (use --grid, positional paths or RESCUE_GRID)");
    }

    let mut loaded: Vec<(String, Planner, Coord)> = Vec::with_capacity(grids.len());
    for path in grids.iter() {
        let sc = load_scenario(path)?;
        loaded.push((path.display().to_string(), sc.planner()?, sc.start));
    }

    let results = run_batch(&loaded, starts, cfg);
    let mut stats = BatchStats::default();
    for (label, outcome) in results.iter() {
        stats.jobs += 1;
        match outcome {
            JobOutcome::Planned { cost, steps } => {
                stats.planned += 1;
                println!("{}: cost={} steps={}", label, cost, steps);
            }
            JobOutcome::NoPath => {
                stats.infeasible += 1;
                println!("{}: No path found.", label);
            }
            JobOutcome::Failed(msg) => {
                stats.failed += 1;
                println!("{}: error: {}", label, msg);
            }
        }
    }
    info!(
        "batch: jobs={} planned={} infeasible={} failed={}",
        stats.jobs, stats.planned, stats.infeasible, stats.failed
    );
    Ok(stats)
}

/// Runs every (scenario, start) pair in parallel. With no explicit starts,
/// each scenario's own start is used. Output order matches input order.
pub fn run_batch(
    scenarios: &[(String, Planner, Coord)],
    starts: &[Coord],
    cfg: &Config,
) -> Vec<(String, JobOutcome)> {
    let mut jobs: Vec<Job<'_>> = Vec::new();
    for (label, planner, own_start) in scenarios.iter() {
        if starts.is_empty() {
            jobs.push(Job { label: label.clone(), planner, start: *own_start });
        } else {
            for &s in starts {
                jobs.push(Job { label: format!("{} from {}", label, s), planner, start: s });
            }
        }
    }

    jobs.par_iter()
        .map(|job| {
            let outcome = match job.planner.find_path_with(job.start, &cfg.limits()) {
                Ok(Some(plan)) => JobOutcome::Planned { cost: plan.total_cost, steps: plan.path.len() },
                Ok(None) => JobOutcome::NoPath,
                Err(e) => JobOutcome::Failed(e.to_string()),
            };
            (job.label.clone(), outcome)
        })
        .collect()
}
