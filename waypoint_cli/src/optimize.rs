use std::time::Duration;

use anyhow::bail;
use clap::Args;
use indicatif::ProgressBar;
use tracing::info;
use waypoint_planner::{location::PlaceSelection, planner::Planner};
use waypoint_providers::optimization_client::RouteOptimizer;

use crate::{
    Providers,
    console_map::ConsoleMap,
    display::{print_notices, print_routes},
    parsers,
};

#[derive(Args)]
pub struct OptimizeArgs {
    /// A stop as "<lat>,<lng> <address>", repeated in visiting order
    #[arg(short, long = "stop", value_parser = parsers::parse_stop, required = true)]
    stops: Vec<PlaceSelection>,
}

/// Sends the current stops to the backend with a spinner showing while the
/// request is in flight. Returns whether routes were rendered.
pub async fn optimize_with_spinner<O: RouteOptimizer>(
    planner: &mut Planner<ConsoleMap>,
    optimizer: &O,
) -> bool {
    let Some(request) = planner.begin_optimization() else {
        return false;
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_message(planner.optimize_control().label());
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = optimizer.optimize(&request).await;

    spinner.finish_and_clear();
    planner.finish_optimization(result)
}

pub async fn run(
    args: OptimizeArgs,
    mut planner: Planner<ConsoleMap>,
    providers: &Providers,
) -> anyhow::Result<()> {
    planner.seed_current_location(&providers.resolver).await;

    for stop in args.stops {
        planner.add_place(stop);
    }
    print_notices(planner.take_notices());

    let rendered = optimize_with_spinner(&mut planner, &providers.optimizer).await;
    print_notices(planner.take_notices());

    if !rendered {
        bail!("No route could be optimized");
    }

    print_routes(planner.results().blocks());
    info!("Visiting order: {}", planner.store().names().join(" -> "));

    Ok(())
}
