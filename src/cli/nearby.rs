//! Nearby command handler
//!
//! Runs the two-phase discovery: prints the search results as soon as they
//! arrive, then prints the batch again once missing photos are filled in.

use crate::cli::Context;
use crate::enrich::EnrichmentPipeline;
use crate::error::{Error, Result};
use clap::Args;

/// Nearby command arguments
#[derive(Args)]
pub struct NearbyArgs {
    /// Latitude
    #[arg(long, allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude
    #[arg(long, allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Named location (geocoded)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub location: Option<String>,

    /// Search radius in meters
    #[arg(long, short = 'r')]
    pub radius: Option<u32>,

    /// Category token (e.g. "restaurant", "thai_restaurant")
    #[arg(long, short = 'c')]
    pub category: Option<String>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Skip the photo backfill phase
    #[arg(long)]
    pub no_enrich: bool,
}

/// Run the nearby command
pub async fn run(args: NearbyArgs) -> Result<()> {
    let ctx = Context::load()?;
    let formatter = ctx.formatter(args.format.as_deref())?;

    let Some(center) = ctx
        .resolve_center(args.lat, args.lng, args.location.as_deref())
        .await?
    else {
        return Err(Error::InvalidCoordinates(
            "No location specified. Use --lat/--lng or --location".to_string(),
        ));
    };

    let radius = args.radius.unwrap_or(ctx.config.defaults.radius);
    let category = args
        .category
        .unwrap_or_else(|| ctx.config.defaults.category.clone());

    let pipeline = EnrichmentPipeline::new(ctx.places());
    let discovery = pipeline
        .discover_and_enrich(center, radius, &category)
        .await?;

    println!("{}", formatter.format_places(&discovery.initial)?);

    let needs_photos = discovery.initial.iter().any(|place| place.needs_photo());
    if args.no_enrich || !needs_photos {
        return Ok(());
    }

    let generation = discovery.generation;
    let enriched = discovery.enriched.await;
    if pipeline.is_current(generation) {
        eprintln!("Photos updated:");
        println!("{}", formatter.format_places(&enriched)?);
    }

    Ok(())
}
