//! dine-scout: restaurant discovery on top of a maps/places provider
//!
//! A library and CLI tool that finds restaurants around a point, normalizes
//! the provider's two response shapes into one place model, and backfills
//! missing photos in a second phase.
//!
//! ## Features
//!
//! - Nearby, free-text and detail queries with new-then-legacy fallback
//! - Cuisine classification from provider category tags
//! - Landscape-first photo selection and media URL building
//! - Two-phase discovery (results first, photos after)
//! - Location search and reverse geocoding with a numeric fallback
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use dine_scout::{Config, Coordinates, EnrichmentPipeline, PlaceSearch, SessionManager};
//! use std::sync::Arc;
//!
//! # async fn demo() -> dine_scout::Result<()> {
//! let config = Config::load()?;
//! let session = Arc::new(SessionManager::from_config(&config));
//! let pipeline = EnrichmentPipeline::new(PlaceSearch::from_config(&config, session));
//!
//! let center = Coordinates::new(43.6532, -79.3832); // Toronto
//! let discovery = pipeline.discover_and_enrich(center, 1500, "restaurant").await?;
//! println!("{} places", discovery.initial.len());
//!
//! let enriched = discovery.enriched.await;
//! println!("{} with photos", enriched.iter().filter(|p| !p.needs_photo()).count());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod enrich;
pub mod error;
pub mod format;
pub mod geo;
pub mod photo;
pub mod place;
pub mod provider;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use enrich::{Discovery, EnrichmentPipeline, PlaceSource};
pub use error::{Error, Result};
pub use geo::{Geocoder, LocationSearchResult};
pub use place::{Attribution, Cuisine, PhotoDescriptor, PlaceDetails, PlaceEntity};
pub use provider::{PlaceSearch, SessionManager};
