use anyhow::{Context, Result};

use super::config::Config;
use super::render;
use crate::scenario::{load_scenario, Scenario};

pub fn cmd_show(cfg: &Config) -> Result<()> {
    let grid = cfg.grid.as_deref().context("no scenario given (use --grid or RESCUE_GRID)")?;
    let scenario = load_scenario(grid)?;
    println!("{}", summary(&scenario)?);
    Ok(())
}

pub fn summary(scenario: &Scenario) -> Result<String> {
    let planner = scenario.planner()?;
    let dims = planner.terrain().dims();
    let mut out = render::grid_dump(planner.terrain());
    out.push_str(&format!("Dimensions: {} x {} x {} (x, y, layers)\n", dims.nx, dims.ny, dims.nz));
    out.push_str(&format!("Start: {}\n", scenario.start));
    out.push_str(&format!("Base: {}\n", planner.base()));
    for (i, g) in planner.goals().iter().enumerate() {
        out.push_str(&format!("G{}: {}\n", i + 1, g));
    }
    if let Some(role) = planner.blocked_target() {
        out.push_str(&format!("Warning: {} is on a blocked cell\n", role));
    }
    Ok(out)
}
