//! Geocoding module
//!
//! Free-text location search (name to coordinates) and reverse geocoding
//! (coordinates to a display string) against the provider's geocoding
//! service, sharing the places session.

pub mod google;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;
use crate::provider::{Session, SessionManager};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

pub use google::GoogleGeocoder;

/// One candidate from a location search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSearchResult {
    /// Provider identifier
    pub id: String,
    /// Short display name (e.g. "Toronto")
    pub name: String,
    /// Full formatted address
    pub formatted_address: String,
    pub location: Coordinates,
    /// Provider category tags
    pub types: Vec<String>,
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// All candidates for a query; empty when nothing matched
    fn search(
        &self,
        session: &Session,
        query: &str,
    ) -> impl Future<Output = Result<Vec<LocationSearchResult>>> + Send;

    /// Best address for a coordinate, or None when nothing matched
    fn reverse(
        &self,
        session: &Session,
        coords: Coordinates,
    ) -> impl Future<Output = Result<Option<String>>> + Send;
}

/// Geocoding adapter
#[derive(Debug, Clone)]
pub struct Geocoder<B = GoogleGeocoder> {
    session: Arc<SessionManager>,
    backend: B,
}

impl Geocoder {
    /// Build the adapter from configuration, sharing the host's session
    pub fn from_config(config: &Config, session: Arc<SessionManager>) -> Self {
        Self::new(session, GoogleGeocoder::new(&config.provider.geocode_url))
    }
}

impl<B: GeoBackend> Geocoder<B> {
    pub fn new(session: Arc<SessionManager>, backend: B) -> Self {
        Self { session, backend }
    }

    /// Search for locations matching free text
    ///
    /// A blank query returns nothing without touching the provider.
    pub async fn search_locations(&self, query: &str) -> Result<Vec<LocationSearchResult>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let session = self.session.ensure_ready().await?;
        let results = self.backend.search(session, query).await?;
        debug!(query, count = results.len(), "location search");
        Ok(results)
    }

    /// Display string for a coordinate
    ///
    /// Never fails: any miss or error yields `"{lat:.4}, {lng:.4}"`.
    pub async fn reverse_geocode(&self, coords: Coordinates) -> String {
        let fallback = || coords.to_string();

        let session = match self.session.ensure_ready().await {
            Ok(session) => session,
            Err(e) => {
                warn!(error = %e, "reverse geocoding unavailable");
                return fallback();
            }
        };

        match self.backend.reverse(session, coords).await {
            Ok(Some(address)) => address,
            Ok(None) => {
                debug!(%coords, "no reverse geocoding match");
                fallback()
            }
            Err(e) => {
                warn!(%coords, error = %e, "reverse geocoding failed");
                fallback()
            }
        }
    }
}
