//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions. The binary is
//! the host application: it loads configuration, builds the one shared
//! `SessionManager`, and wires the adapters around it.

pub mod config;
pub mod details;
pub mod locate;
pub mod nearby;
pub mod reverse;
pub mod search;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::format::{get_formatter, OutputFormatter};
use crate::geo::Geocoder;
use crate::provider::{PlaceSearch, SessionManager};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Restaurant discovery on top of a places provider
#[derive(Parser)]
#[command(name = "dine-scout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find places around a point, then backfill missing photos
    Nearby(nearby::NearbyArgs),

    /// Free-text place search
    Search(search::SearchArgs),

    /// Show details for one place
    Details(details::DetailsArgs),

    /// Search for locations by name
    Locate(locate::LocateArgs),

    /// Turn coordinates into an address
    Reverse(reverse::ReverseArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Nearby(args) => nearby::run(args).await,
        Commands::Search(args) => search::run(args).await,
        Commands::Details(args) => details::run(args).await,
        Commands::Locate(args) => locate::run(args).await,
        Commands::Reverse(args) => reverse::run(args).await,
        Commands::Config(args) => config::run(args),
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default: warn)
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Loaded configuration plus the process-wide provider session
pub(crate) struct Context {
    pub config: Config,
    pub session: Arc<SessionManager>,
}

impl Context {
    pub fn load() -> Result<Self> {
        let config = Config::load()?;
        let session = Arc::new(SessionManager::from_config(&config));
        Ok(Self { config, session })
    }

    pub fn places(&self) -> PlaceSearch {
        PlaceSearch::from_config(&self.config, Arc::clone(&self.session))
    }

    pub fn geocoder(&self) -> Geocoder {
        Geocoder::from_config(&self.config, Arc::clone(&self.session))
    }

    /// Formatter named on the command line, else the configured default
    pub fn formatter(&self, format: Option<&str>) -> Result<Box<dyn OutputFormatter>> {
        let name = format.unwrap_or(self.config.defaults.format.as_str());
        get_formatter(name).ok_or_else(|| Error::Config(format!("Unknown format: {}", name)))
    }

    /// Resolve `--lat/--lng` or `--location` into a coordinate
    ///
    /// A named location uses the first geocoding match.
    pub async fn resolve_center(
        &self,
        lat: Option<f64>,
        lng: Option<f64>,
        location: Option<&str>,
    ) -> Result<Option<Coordinates>> {
        if let Some(query) = location {
            let geocoder = self.geocoder();
            let Some(first) = geocoder.search_locations(query).await?.into_iter().next() else {
                return Err(Error::query_failed(format!("Could not geocode '{}'", query)));
            };
            eprintln!("Geocoded to: {}", first.formatted_address);
            return Ok(Some(first.location));
        }

        match (lat, lng) {
            (Some(lat), Some(lng)) => Coordinates::checked(lat, lng).map(Some),
            (None, None) => Ok(None),
            _ => Err(Error::InvalidCoordinates(
                "--lat and --lng must be given together".to_string(),
            )),
        }
    }
}
