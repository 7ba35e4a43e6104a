//! lockstep — route every unit of a tile map in synchronized rounds.
//!
//! Run from the workspace root: `cargo run --bin lockstep -- lockstep/data/config.json`.
//! The default config path is relative, so a bare `cargo run` works from `lockstep/`.

use std::path::PathBuf;

use clap::Parser;
use lockstep_core::Path;
use lockstep_map::DEFAULT_CONFIG_PATH;
use lockstep_paths::GridModel;
use lockstep_render::{RenderStyle, render_map, render_report};

#[derive(Parser)]
#[command(name = "lockstep", version, about)]
struct Args {
    /// Scenario config naming the map file and terrain legend.
    #[arg(default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Disable colored path overlay.
    #[arg(long)]
    plain: bool,
    /// Print only the per-unit report.
    #[arg(long)]
    no_map: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let style = if args.plain {
        RenderStyle::Plain
    } else {
        RenderStyle::Ansi
    };

    let scenario = lockstep_map::load(&args.config)?;
    let (grid, legend, roster) = (&scenario.grid, &scenario.legend, &scenario.roster);
    if !args.no_map {
        print!("{}", render_map(grid, legend, roster, Vec::<&Path>::new(), style));
        println!();
    }

    let model = GridModel::new(grid, legend);
    let plan = lockstep_paths::plan(&model, roster);
    log::info!(
        "{} of {} units routed in {} rounds",
        plan.outcomes().iter().filter(|o| !o.path.is_empty()).count(),
        plan.len(),
        plan.rounds()
    );

    print!("{}", render_report(&plan));
    if !args.no_map {
        println!();
        print!("{}", render_map(grid, legend, roster, plan.paths(), style));
    }
    Ok(())
}
