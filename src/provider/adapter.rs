//! Dual-shape query adapter
//!
//! Every query runs the same strategy: make sure the session exists, try the
//! new-shape entry point, and on any failure retry the identical request on
//! the legacy entry point. Only when both fail does the caller see an error.

use crate::config::defaults::{
    DEFAULT_CARD_HEIGHT, DEFAULT_CARD_WIDTH, DEFAULT_CATEGORY, DEFAULT_MAX_RESULTS,
};
use crate::config::Config;
use crate::coord::Coordinates;
use crate::enrich::PlaceSource;
use crate::error::{Error, Result};
use crate::photo::{build_photo_url, MediaEndpoints};
use crate::place::{PhotoDescriptor, PlaceDetails, PlaceEntity};
use crate::provider::{
    ImageSpec, LegacyBackend, ModernBackend, NearbyRequest, PlaceQuery, PlacesBackend,
    ProviderPlace, Session, SessionManager, TextRequest,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// Places queries with new-then-legacy fallback
#[derive(Debug, Clone)]
pub struct PlaceSearch<M = ModernBackend, L = LegacyBackend> {
    session: Arc<SessionManager>,
    /// None when the new-shape entry point is disabled
    modern: Option<M>,
    legacy: L,
    media: MediaEndpoints,
    card_width: u32,
    card_height: u32,
    max_results: u32,
}

impl PlaceSearch {
    /// Build the adapter from configuration, sharing the host's session
    pub fn from_config(config: &Config, session: Arc<SessionManager>) -> Self {
        let modern = config
            .provider
            .use_modern_api
            .then(|| ModernBackend::new(&config.provider.places_url));

        Self::new(session, modern, LegacyBackend::new(&config.provider.legacy_url))
            .with_media_endpoints(MediaEndpoints::new(
                config.provider.places_url.as_str(),
                config.provider.legacy_url.as_str(),
            ))
            .with_card_size(config.defaults.card_width, config.defaults.card_height)
            .with_max_results(config.defaults.max_results)
    }
}

impl<M: PlacesBackend, L: PlacesBackend> PlaceSearch<M, L> {
    /// Create an adapter over explicit backends
    pub fn new(session: Arc<SessionManager>, modern: Option<M>, legacy: L) -> Self {
        Self {
            session,
            modern,
            legacy,
            media: MediaEndpoints::default(),
            card_width: DEFAULT_CARD_WIDTH,
            card_height: DEFAULT_CARD_HEIGHT,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Base URLs photo media URLs are built on
    pub fn with_media_endpoints(mut self, media: MediaEndpoints) -> Self {
        self.media = media;
        self
    }

    /// Photo size requested for card images
    pub fn with_card_size(mut self, width: u32, height: u32) -> Self {
        self.card_width = width;
        self.card_height = height;
        self
    }

    /// Result count requested per search
    pub fn with_max_results(mut self, max_results: u32) -> Self {
        self.max_results = max_results;
        self
    }

    /// The shared session manager
    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    /// Places of a category around a point
    ///
    /// An empty category means "restaurant". Distances are measured from
    /// `center`.
    pub async fn search_nearby(
        &self,
        center: Coordinates,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<PlaceEntity>> {
        center.validate()?;
        check_radius(radius_meters)?;

        let category = match category.trim() {
            "" => DEFAULT_CATEGORY,
            other => other,
        };

        let query = PlaceQuery::Nearby(NearbyRequest {
            center,
            radius_meters,
            category: category.to_string(),
            max_results: self.max_results,
        });

        let places = self.query_with_fallback(&query).await?;
        Ok(self.to_entities(places, Some(center)))
    }

    /// Places matching a free-text query, optionally biased toward a point
    ///
    /// A blank query returns nothing without touching the provider.
    pub async fn search_by_text(
        &self,
        query: &str,
        center: Option<Coordinates>,
        radius_meters: Option<u32>,
    ) -> Result<Vec<PlaceEntity>> {
        let text = query.trim();
        if text.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(center) = center {
            center.validate()?;
        }
        if let Some(radius) = radius_meters {
            check_radius(radius)?;
        }

        let query = PlaceQuery::Text(TextRequest {
            query: text.to_string(),
            center,
            radius_meters,
            max_results: self.max_results,
        });

        let places = self.query_with_fallback(&query).await?;
        Ok(self.to_entities(places, center))
    }

    /// Full record for one place
    pub async fn get_details(&self, place_id: &str) -> Result<PlaceDetails> {
        let place_id = place_id.trim();
        if place_id.is_empty() {
            return Err(Error::query_failed("place id must not be empty"));
        }

        let query = PlaceQuery::Details {
            place_id: place_id.to_string(),
        };

        self.query_with_fallback(&query)
            .await?
            .into_iter()
            .next()
            .and_then(|place| place.normalize().into_details())
            .ok_or_else(|| {
                Error::query_failed(format!("no usable record returned for place {}", place_id))
            })
    }

    /// Signed media URL for a photo, or the placeholder without a session
    pub fn photo_url(&self, photo: &PhotoDescriptor, max_width: u32, max_height: u32) -> String {
        let api_key = self.session.get().map(Session::api_key);
        build_photo_url(&self.media, &photo.reference, max_width, max_height, api_key)
    }

    async fn query_with_fallback(&self, query: &PlaceQuery) -> Result<Vec<ProviderPlace>> {
        let session = self.session.ensure_ready().await?;

        let modern_failure = match &self.modern {
            Some(modern) => match dispatch(modern, session, query).await {
                Ok(places) => return Ok(places),
                Err(e) => {
                    warn!(
                        backend = modern.name(),
                        query = query.kind(),
                        error = %e,
                        "new-shape query failed, falling back to legacy"
                    );
                    Some(reason_of(&e))
                }
            },
            None => {
                debug!(query = query.kind(), "new-shape entry point disabled");
                None
            }
        };

        dispatch(&self.legacy, session, query).await.map_err(|e| {
            let legacy_reason = reason_of(&e);
            let reason = match modern_failure {
                Some(modern_reason) => format!(
                    "{} failed on both entry points ({}; {})",
                    query.kind(),
                    modern_reason,
                    legacy_reason
                ),
                None => format!("{} failed: {}", query.kind(), legacy_reason),
            };
            Error::QueryFailed { reason }
        })
    }

    fn to_entities(&self, places: Vec<ProviderPlace>, reference: Option<Coordinates>) -> Vec<PlaceEntity> {
        let image = ImageSpec {
            max_width: self.card_width,
            max_height: self.card_height,
            api_key: self.session.get().map(Session::api_key),
            media: &self.media,
        };

        places
            .into_iter()
            .filter_map(|place| place.normalize().into_entity(reference, image))
            .collect()
    }
}

impl<M: PlacesBackend, L: PlacesBackend> PlaceSource for PlaceSearch<M, L> {
    async fn search_nearby(
        &self,
        center: Coordinates,
        radius_meters: u32,
        category: &str,
    ) -> Result<Vec<PlaceEntity>> {
        Self::search_nearby(self, center, radius_meters, category).await
    }

    async fn get_details(&self, place_id: &str) -> Result<PlaceDetails> {
        Self::get_details(self, place_id).await
    }

    fn photo_url(&self, photo: &PhotoDescriptor, max_width: u32, max_height: u32) -> String {
        Self::photo_url(self, photo, max_width, max_height)
    }
}

async fn dispatch<B: PlacesBackend>(
    backend: &B,
    session: &Session,
    query: &PlaceQuery,
) -> Result<Vec<ProviderPlace>> {
    match query {
        PlaceQuery::Nearby(request) => backend.search_nearby(session, request).await,
        PlaceQuery::Text(request) => backend.search_text(session, request).await,
        PlaceQuery::Details { place_id } => {
            backend.place_details(session, place_id).await.map(|place| vec![place])
        }
    }
}

fn check_radius(radius_meters: u32) -> Result<()> {
    if radius_meters == 0 {
        return Err(Error::InvalidRadius("radius must be positive".to_string()));
    }
    Ok(())
}

fn reason_of(error: &Error) -> String {
    match error {
        Error::QueryFailed { reason } => reason.clone(),
        other => other.to_string(),
    }
}
