//! Reverse command handler
//!
//! Always prints something: the address when the provider knows one, the
//! coordinates otherwise.

use crate::cli::Context;
use crate::coord::Coordinates;
use crate::error::Result;
use clap::Args;

/// Reverse command arguments
#[derive(Args)]
pub struct ReverseArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: f64,
}

/// Run the reverse command
pub async fn run(args: ReverseArgs) -> Result<()> {
    let coords = Coordinates::checked(args.lat, args.lng)?;
    let ctx = Context::load()?;

    println!("{}", ctx.geocoder().reverse_geocode(coords).await);
    Ok(())
}
