//! Search command handler
//!
//! Free-text place search, optionally biased toward a point.

use crate::cli::Context;
use crate::error::Result;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// What to look for (e.g. "ramen near union station")
    pub query: String,

    /// Latitude of the bias point
    #[arg(long, allow_hyphen_values = true, requires = "lng")]
    pub lat: Option<f64>,

    /// Longitude of the bias point
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    pub lng: Option<f64>,

    /// Bias radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let ctx = Context::load()?;
    let formatter = ctx.formatter(args.format.as_deref())?;
    let center = ctx.resolve_center(args.lat, args.lng, None).await?;

    let places = ctx
        .places()
        .search_by_text(&args.query, center, args.radius)
        .await?;

    println!("{}", formatter.format_places(&places)?);
    Ok(())
}
