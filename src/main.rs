use anyhow::Result;
use clap::Parser;

use rescue_planner::commands::{self, CommonOpts, PlannerCommand};

#[derive(Parser, Debug)]
#[command(name = "rescue_planner", version, about = "Plan drone rescue routes through a 3D city grid")]
struct Cli {
    #[command(flatten)]
    common: CommonOpts,
    #[command(subcommand)]
    command: PlannerCommand,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    commands::cmd_run(cli.common, cli.command)
}
