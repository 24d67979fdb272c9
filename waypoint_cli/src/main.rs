use clap::{Parser, Subcommand};
use tracing::info;
use waypoint_planner::{
    current_location::CurrentLocationResolver, planner::Planner, planner_config::PlannerConfig,
};
use waypoint_providers::{
    optimization_client::{OptimizationClient, OptimizationClientParams},
    reverse_geocoder::{NominatimGeocoder, NominatimGeocoderParams},
};

use crate::{console_map::ConsoleMap, fixed_locator::FixedLocator, optimize::OptimizeArgs};

mod console_map;
mod display;
mod fixed_locator;
mod interactive;
mod optimize;
mod parsers;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(short, long, global = true)]
    debug: bool,

    /// Optimization backend base URL (default: $WAYPOINT_BACKEND_URL)
    #[arg(long, global = true)]
    backend_url: Option<String>,

    /// Nominatim compatible reverse geocoder (default: $WAYPOINT_GEOCODER_URL)
    #[arg(long, global = true)]
    geocoder_url: Option<String>,

    /// Device position used to seed the first stop, as "<lat>,<lng>"
    #[arg(long, global = true, value_parser = parsers::parse_position)]
    position: Option<geo::Point>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the list of stops interactively (default)
    #[command(visible_alias = "i")]
    Interactive,
    /// Optimize a fixed list of stops and print the route options
    #[command(visible_alias = "o")]
    Optimize {
        #[command(flatten)]
        args: OptimizeArgs,
    },
}

pub struct Providers {
    pub optimizer: OptimizationClient,
    pub resolver: CurrentLocationResolver<FixedLocator, NominatimGeocoder>,
}

impl Providers {
    fn from_cli(cli: &Cli) -> Self {
        let mut optimizer_params = OptimizationClientParams::from_env();
        if let Some(backend_url) = &cli.backend_url {
            optimizer_params.backend_url = backend_url.clone();
        }

        let mut geocoder_params = NominatimGeocoderParams::from_env();
        if let Some(geocoder_url) = &cli.geocoder_url {
            geocoder_params.base_url = geocoder_url.clone();
        }

        info!("Using optimization backend {}", optimizer_params.backend_url);

        Self {
            optimizer: OptimizationClient::new(optimizer_params),
            resolver: CurrentLocationResolver::new(
                FixedLocator(cli.position),
                NominatimGeocoder::new(geocoder_params),
            ),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::from_filename("./.env.local").ok();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    let providers = Providers::from_cli(&cli);
    let planner = Planner::new(ConsoleMap::default(), PlannerConfig::default());

    match cli.command {
        Some(Commands::Optimize { args }) => optimize::run(args, planner, &providers).await?,
        Some(Commands::Interactive) | None => interactive::run(planner, &providers).await?,
    }

    Ok(())
}
