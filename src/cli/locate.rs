//! Locate command handler
//!
//! Geocoding search: location name to candidate coordinates.

use crate::cli::Context;
use crate::error::Result;
use clap::Args;

/// Locate command arguments
#[derive(Args)]
pub struct LocateArgs {
    /// Location name or address
    pub query: String,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,
}

/// Run the locate command
pub async fn run(args: LocateArgs) -> Result<()> {
    let ctx = Context::load()?;
    let formatter = ctx.formatter(args.format.as_deref())?;

    let locations = ctx.geocoder().search_locations(&args.query).await?;

    println!("{}", formatter.format_locations(&locations)?);
    Ok(())
}
