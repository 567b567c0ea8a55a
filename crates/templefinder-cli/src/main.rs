mod api_client;
mod controller;
mod geolocation;
mod map_session;
mod render;

use clap::{Parser, Subcommand};
use templefinder_core::Coordinate;

use crate::api_client::HttpTempleApi;
use crate::controller::{Phase, ViewController};
use crate::geolocation::FixedLocation;
use crate::map_session::TerminalMap;

#[derive(Debug, Parser)]
#[command(name = "templefinder")]
#[command(about = "Find temples and other places of worship near a place")]
struct Cli {
    /// Base URL of the Temple Finder server.
    #[arg(
        long,
        global = true,
        env = "TEMPLEFINDER_SERVER_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    server: String,

    /// Search radius in kilometres (clamped to 0.5..=50).
    #[arg(long, global = true, default_value_t = 5.0)]
    radius_km: f64,

    /// Recenter the map on the Nth result (1-based) after searching.
    #[arg(long, global = true)]
    select: Option<usize>,

    /// Overall request timeout in seconds.
    #[arg(long, global = true, env = "TEMPLEFINDER_CLIENT_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Geocode a place name and search around it
    Search {
        query: Vec<String>,
    },
    /// Search around the given position ("use my location")
    Near {
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,
    },
}

fn location_from(lat: Option<f64>, lon: Option<f64>) -> anyhow::Result<FixedLocation> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Coordinate::new(lat, lon)
            .map(FixedLocation::at)
            .ok_or_else(|| anyhow::anyhow!("invalid coordinate {lat}, {lon}")),
        _ => Ok(FixedLocation::unsupported()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = HttpTempleApi::new(&cli.server, cli.timeout_secs)?;

    let geolocator = match &cli.command {
        Some(Commands::Near { lat, lon }) => location_from(*lat, *lon)?,
        _ => FixedLocation::unsupported(),
    };

    let mut controller = ViewController::new(api, geolocator, TerminalMap::default());
    controller.set_radius_km(cli.radius_km);

    match cli.command {
        Some(Commands::Search { query }) => {
            controller.set_query(query.join(" "));
            controller.submit_search().await;
        }
        Some(Commands::Near { .. }) => controller.use_my_location().await,
        None => controller.mount().await,
    }

    if let Some(n) = cli.select {
        if controller.select_result(n.saturating_sub(1)).is_none() {
            tracing::warn!(select = n, "no result at that position");
        }
    }

    print!("{}", render::render_results(controller.state()));
    println!();
    print!("{}", controller.map().render());

    if controller.phase() == Phase::Error {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(test)]
mod tests;
