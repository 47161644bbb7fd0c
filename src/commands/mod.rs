use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::engine::Coord;

pub mod batch;
pub mod config;
pub mod logging;
pub mod plan;
pub mod render;
pub mod show;

#[derive(Args, Debug, Clone, Default)]
pub struct CommonOpts {
    /// Scenario JSON file (or RESCUE_GRID)
    #[arg(long = "grid", global = true)]
    pub grid: Option<PathBuf>,
    /// Stop the search after this many node expansions
    #[arg(long = "max-expansions", global = true)]
    pub max_expansions: Option<usize>,
    /// Stop the search after this many milliseconds
    #[arg(long = "deadline-ms", global = true)]
    pub deadline_ms: Option<u64>,
    /// Number of worker threads (rayon)
    #[arg(long = "threads", global = true)]
    pub threads: Option<usize>,
    /// Print results as JSON
    #[arg(long = "json", global = true)]
    pub json: bool,
    /// Log level (trace|debug|info|warn|error)
    #[arg(long = "log-level", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum PlannerCommand {
    /// Plan a rescue route for one scenario
    #[command(name = "plan")]
    Plan {
        /// Override the scenario start: x,y,z
        #[arg(long)]
        start: Option<Coord>,
    },
    /// Plan several scenarios and/or starts in parallel
    #[command(name = "batch")]
    Batch {
        /// Extra scenario files
        grids: Vec<PathBuf>,
        /// Start coordinates (x,y,z), repeated; each runs against every scenario
        #[arg(long = "start")]
        starts: Vec<Coord>,
    },
    /// Print the grid and its start, base and goals
    #[command(name = "show")]
    Show,
}

impl From<CommonOpts> for config::Config {
    fn from(common: CommonOpts) -> Self {
        Self {
            grid: common.grid,
            max_expansions: common.max_expansions,
            deadline_ms: common.deadline_ms,
            threads: common.threads,
            json: common.json,
            log_level: common.log_level,
        }
    }
}

pub fn cmd_run(common: CommonOpts, sub: PlannerCommand) -> Result<()> {
    // CLI first, environment on top
    let mut cfg = config::Config::from(common);
    cfg.overlay(config::Config::from_env_defaults());

    logging::init(cfg.log_level.as_deref());
    if let Some(n) = cfg.threads {
        let _ = rayon::ThreadPoolBuilder::new().num_threads(n).build_global();
    }

    match sub {
        PlannerCommand::Plan { start } => plan::cmd_plan(&cfg, start),
        PlannerCommand::Batch { grids, starts } => batch::cmd_batch(&cfg, &grids, &starts)?.ensure_no_failures(),
        PlannerCommand::Show => show::cmd_show(&cfg),
    }
}
