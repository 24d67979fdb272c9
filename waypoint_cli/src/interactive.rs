use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;
use waypoint_planner::planner::Planner;

use crate::{
    Providers,
    console_map::ConsoleMap,
    display::{describe_viewport, map_table, print_notices, print_routes},
    optimize::optimize_with_spinner,
    parsers::{HELP, ReplCommand, parse_command},
};

pub async fn run(mut planner: Planner<ConsoleMap>, providers: &Providers) -> anyhow::Result<()> {
    planner.seed_current_location(&providers.resolver).await;
    print_notices(planner.take_notices());
    print_rows(&planner);
    println!("{}", HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                println!("{}", err);
                continue;
            }
        };
        debug!("Interactive: {:?}", command);

        match command {
            ReplCommand::Add(selection) => {
                if planner.add_place(selection) {
                    print_rows(&planner);
                }
            }
            ReplCommand::Remove(index) => {
                if index < planner.store().len() {
                    let removed = planner.remove_location(index);
                    println!("Removed {}", removed.name());
                    print_rows(&planner);
                } else {
                    println!("There is no stop number {}", index + 1);
                }
            }
            ReplCommand::List => print_rows(&planner),
            ReplCommand::Map => {
                let map = planner.markers().map();
                println!("{}", map_table(map));
                println!("{}", describe_viewport(map.viewport()));
                if map.hides_poi_labels() {
                    println!("Points of interest hidden");
                }
            }
            ReplCommand::Optimize => {
                if optimize_with_spinner(&mut planner, &providers.optimizer).await {
                    print_routes(planner.results().blocks());
                    print_rows(&planner);
                }
            }
            ReplCommand::Help => println!("{}", HELP),
            ReplCommand::Quit => break,
        }

        print_notices(planner.take_notices());
    }

    Ok(())
}

fn print_rows(planner: &Planner<ConsoleMap>) {
    let rows = planner.location_rows();
    if rows.is_empty() {
        println!("No stops yet");
    }
    for row in rows {
        println!("{}", row);
    }
}
