#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line entry point for the `SignalScope` toolchain.
//!
//! Runs carrier comparisons, location lookups and tower queries against the
//! bundled sample data, and starts the API server. Without a subcommand it
//! opens an interactive menu.

mod commands;
mod interactive;
mod report;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use signal_scope_coverage::DEFAULT_RADIUS_KM;
use signal_scope_server::ServerConfig;

use crate::commands::{Location, parse_carrier, parse_carrier_list};

#[derive(Parser)]
#[command(name = "signal_scope", about = "Cellular coverage comparison toolchain")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// A location given as free text or as explicit coordinates.
#[derive(Args)]
struct LocationArgs {
    /// Place name, alias or "lat, lng" pair (e.g., "nyc", "Seattle")
    #[arg(allow_hyphen_values = true)]
    query: Option<String>,
    /// Latitude in decimal degrees (overrides the query)
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    /// Longitude in decimal degrees (overrides the query)
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,
}

impl LocationArgs {
    fn into_location(self) -> Result<Location, String> {
        Location::from_parts(self.lat, self.lng, self.query)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank carriers by coverage score at a location
    Compare {
        #[command(flatten)]
        location: LocationArgs,
        /// Search radius in kilometers
        #[arg(long, default_value_t = DEFAULT_RADIUS_KM)]
        radius: f64,
        /// Comma-separated carriers to compare (default: all)
        #[arg(long)]
        carriers: Option<String>,
        /// Compare at a saved favorite (id or name) instead of a location
        #[arg(long, conflicts_with_all = ["query", "lat", "lng"])]
        favorite: Option<String>,
        /// Favorites file (overrides `FAVORITES_PATH`)
        #[arg(long)]
        favorites_path: Option<PathBuf>,
    },
    /// Resolve free text to coordinates
    Resolve {
        /// Place name, alias or "lat, lng" pair
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
    /// Great-circle distance between two locations
    Distance {
        /// Starting place name or "lat, lng" pair
        #[arg(allow_hyphen_values = true)]
        from: String,
        /// Destination place name or "lat, lng" pair
        #[arg(allow_hyphen_values = true)]
        to: String,
    },
    /// List the towers closest to a location
    Nearest {
        #[command(flatten)]
        location: LocationArgs,
        /// Maximum number of towers
        #[arg(long, default_value_t = 5)]
        limit: usize,
        /// Only towers of this carrier
        #[arg(long)]
        carrier: Option<String>,
    },
    /// Summarize the sample towers and reports
    Analytics,
    /// Start the API server
    Serve {
        /// Bind address (overrides `BIND_ADDR`)
        #[arg(long)]
        bind: Option<String>,
        /// Port (overrides `PORT`)
        #[arg(long)]
        port: Option<u16>,
    },
}

/// Runs an actix-web future on its own `System` inside a blocking task,
/// off the tokio worker threads.
async fn run_on_actix<F, Fut>(make: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = std::io::Result<()>>,
{
    tokio::task::spawn_blocking(move || actix_web::rt::System::new().block_on(make())).await??;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run().await;
    };

    match command {
        Commands::Compare {
            location,
            radius,
            carriers,
            favorite,
            favorites_path,
        } => {
            let output = if let Some(favorite) = favorite {
                let path = favorites_path.unwrap_or_else(|| ServerConfig::from_env().favorites_path);
                commands::compare_favorite(&path, &favorite, radius)?
            } else {
                let carriers = parse_carrier_list(carriers.as_deref())?;
                commands::compare(&location.into_location()?, radius, &carriers)?
            };
            print!("{output}");
        }
        Commands::Resolve { query } => {
            println!("{}", commands::resolve(&query)?);
        }
        Commands::Distance { from, to } => {
            println!(
                "{}",
                commands::distance(&Location::Query(from), &Location::Query(to))?
            );
        }
        Commands::Nearest {
            location,
            limit,
            carrier,
        } => {
            let carrier = carrier.as_deref().map(parse_carrier).transpose()?;
            print!(
                "{}",
                commands::nearest(&location.into_location()?, limit, carrier)?
            );
        }
        Commands::Analytics => {
            print!("{}", commands::analytics());
        }
        Commands::Serve { bind, port } => {
            let mut config = ServerConfig::from_env();
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(port) = port {
                config.port = port;
            }
            run_on_actix(move || signal_scope_server::run_server(config)).await?;
        }
    }

    Ok(())
}
