use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::Serialize;

use super::config::Config;
use super::render;
use crate::engine::{Coord, Plan};
use crate::scenario::{load_scenario, Scenario};

#[derive(Serialize, Debug)]
struct PlanOutput<'a> {
    start: Coord,
    base: Coord,
    goals: &'a [Coord],
    /// `null` when no feasible plan exists.
    plan: Option<&'a Plan>,
}

pub fn cmd_plan(cfg: &Config, start: Option<Coord>) -> Result<()> {
    let grid = cfg.grid.as_deref().context("no scenario given (use --grid or RESCUE_GRID)")?;
    info!("plan: loading scenario {}", grid.display());
    let scenario = load_scenario(grid)?;
    let start = start.unwrap_or(scenario.start);
    let outcome = run_plan(&scenario, start, cfg)?;

    if cfg.json {
        let out = PlanOutput { start, base: scenario.base, goals: &scenario.goals, plan: outcome.as_ref() };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    match outcome {
        Some(plan) => println!("{}", render::plan_report(&scenario.terrain, &plan, scenario.base)),
        None => println!("No path found."),
    }
    Ok(())
}

/// Plans one route; `Ok(None)` is the infeasible outcome.
pub fn run_plan(scenario: &Scenario, start: Coord, cfg: &Config) -> Result<Option<Plan>> {
    let planner = scenario.planner()?;
    let dims = planner.terrain().dims();
    info!(
        "plan: grid {}x{}x{}, {} goals, start {} base {}",
        dims.nx,
        dims.ny,
        dims.nz,
        planner.goals().len(),
        start,
        planner.base()
    );
    if let Some(role) = planner.blocked_target() {
        warn!("plan: {} is on a blocked cell; no plan can exist", role);
    }

    let outcome = planner
        .find_path_with(start, &cfg.limits())
        .with_context(|| format!("planning from {}", start))?;
    match &outcome {
        Some(plan) => {
            info!("plan: found route of {} steps, cost {}", plan.path.len(), plan.total_cost);
            debug!(
                "plan: expanded={} pushed={} stale={} peak_frontier={}",
                plan.stats.nodes_expanded,
                plan.stats.nodes_pushed,
                plan.stats.stale_skipped,
                plan.stats.peak_frontier
            );
        }
        None => info!("plan: no feasible route from {}", start),
    }
    Ok(outcome)
}
