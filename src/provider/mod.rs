//! Places provider access
//!
//! The provider serves the same data through two incompatible shapes: the
//! newer object-shaped Places API and the older status-enveloped web service.
//! Each entry point is a `PlacesBackend`; raw records are classified into a
//! `ProviderPlace` and normalized by one function per shape into a
//! `PlaceRecord`, from which the public model types are built.
//!
//! ## Layout
//! - `session`: write-once provider handle
//! - `modern`: new-shape backend and record type
//! - `legacy`: legacy-shape backend and record type
//! - `adapter`: `PlaceSearch`, the new-then-legacy fallback strategy

pub mod adapter;
pub mod legacy;
pub mod modern;
pub mod session;

use crate::constants::photo::PLACEHOLDER_IMAGE_URL;
use crate::constants::place::{DEFAULT_PRICE_LEVEL, UNKNOWN_NAME};
use crate::coord::distance::distance_from;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::photo::{build_photo_url, select_best_photo, MediaEndpoints};
use crate::place::{Cuisine, OpeningHours, PhotoDescriptor, PlaceDetails, PlaceEntity};
use serde::Deserialize;
use serde_json::Value;
use std::future::Future;
use tracing::warn;

pub use adapter::PlaceSearch;
pub use legacy::{LegacyBackend, LegacyPlace};
pub use modern::{ModernBackend, ModernPlace};
pub use session::{Session, SessionManager};

/// Nearby search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyRequest {
    pub center: Coordinates,
    pub radius_meters: u32,
    pub category: String,
    pub max_results: u32,
}

/// Free-text search parameters
#[derive(Debug, Clone, PartialEq)]
pub struct TextRequest {
    pub query: String,
    pub center: Option<Coordinates>,
    pub radius_meters: Option<u32>,
    pub max_results: u32,
}

/// One semantic request, issued against either entry point
#[derive(Debug, Clone, PartialEq)]
pub enum PlaceQuery {
    Nearby(NearbyRequest),
    Text(TextRequest),
    Details { place_id: String },
}

impl PlaceQuery {
    /// Short name for logs and error reasons
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nearby(_) => "nearby search",
            Self::Text(_) => "text search",
            Self::Details { .. } => "place details",
        }
    }
}

/// Trait for places entry points
///
/// Implementations only speak HTTP and decode their own shape; fallback
/// and normalization happen in `PlaceSearch`.
pub trait PlacesBackend: Send + Sync {
    /// Backend name for logs (e.g. "places-v1", "legacy")
    fn name(&self) -> &'static str;

    /// Places around a point; an empty vector for zero results
    fn search_nearby(
        &self,
        session: &Session,
        request: &NearbyRequest,
    ) -> impl Future<Output = Result<Vec<ProviderPlace>>> + Send;

    /// Places matching a free-text query; an empty vector for zero results
    fn search_text(
        &self,
        session: &Session,
        request: &TextRequest,
    ) -> impl Future<Output = Result<Vec<ProviderPlace>>> + Send;

    /// Full record for one place
    fn place_details(
        &self,
        session: &Session,
        place_id: &str,
    ) -> impl Future<Output = Result<ProviderPlace>> + Send;
}

/// A raw provider record, tagged by response shape
#[derive(Debug, Clone)]
pub enum ProviderPlace {
    Modern(ModernPlace),
    Legacy(LegacyPlace),
}

impl ProviderPlace {
    /// Decide which shape a raw JSON record has and decode it
    ///
    /// Legacy records carry `place_id`/`geometry`; new-shape records carry
    /// `id`/`displayName`/`location` or a `places/...` resource name.
    pub fn classify(value: Value) -> Result<Self> {
        let Some(object) = value.as_object() else {
            return Err(Error::query_failed("place record is not a JSON object"));
        };

        let is_legacy = object.contains_key("place_id") || object.contains_key("geometry");
        let is_modern = object.contains_key("id")
            || object.contains_key("displayName")
            || object.contains_key("location")
            || object
                .get("name")
                .and_then(Value::as_str)
                .is_some_and(|name| name.starts_with("places/"));

        if is_legacy {
            Ok(Self::Legacy(serde_json::from_value(value)?))
        } else if is_modern {
            Ok(Self::Modern(serde_json::from_value(value)?))
        } else {
            Err(Error::query_failed("unrecognized place record shape"))
        }
    }

    /// Classify every record of a result list, dropping undecodable ones
    pub fn classify_all(values: Vec<Value>) -> Vec<Self> {
        values
            .into_iter()
            .filter_map(|value| {
                Self::classify(value)
                    .map_err(|e| warn!(error = %e, "skipping malformed place record"))
                    .ok()
            })
            .collect()
    }

    /// Normalize into the shape-independent record
    pub fn normalize(self) -> PlaceRecord {
        match self {
            Self::Modern(place) => place.normalize(),
            Self::Legacy(place) => place.normalize(),
        }
    }
}

/// Shape-independent view of a provider record
///
/// Every field is optional here; the entity invariants (non-empty id,
/// valid location, sentinel name) are enforced when converting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub location: Option<Coordinates>,
    pub types: Vec<String>,
    pub price_level: Option<u8>,
    pub rating: Option<f64>,
    pub rating_count: Option<u32>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub photos: Vec<PhotoDescriptor>,
}

/// Requested card image size plus the credential and endpoints used to sign photo URLs
#[derive(Debug, Clone, Copy)]
pub struct ImageSpec<'a> {
    pub max_width: u32,
    pub max_height: u32,
    pub api_key: Option<&'a str>,
    pub media: &'a MediaEndpoints,
}

impl PlaceRecord {
    fn checked_identity(&self) -> Option<(String, Coordinates)> {
        let Some(id) = self.id.clone().filter(|id| !id.is_empty()) else {
            warn!(name = ?self.name, "dropping place without an id");
            return None;
        };
        let Some(location) = self.location else {
            warn!(place_id = %id, "dropping place without a usable location");
            return None;
        };
        Some((id, location))
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }

    /// Build the card entity
    ///
    /// Returns None when the record has no id or no valid location.
    pub fn into_entity(self, reference: Option<Coordinates>, image: ImageSpec<'_>) -> Option<PlaceEntity> {
        let (id, location) = self.checked_identity()?;
        let name = self.display_name();

        let (image_url, photo_attributions) = select_best_photo(&self.photos)
            .map(|best| {
                let url = build_photo_url(
                    image.media,
                    &best.reference,
                    image.max_width,
                    image.max_height,
                    image.api_key,
                );
                (url, best.attributions.clone())
            })
            .filter(|(url, _)| url != PLACEHOLDER_IMAGE_URL)
            .unwrap_or_else(|| (PLACEHOLDER_IMAGE_URL.to_string(), Vec::new()));

        Some(PlaceEntity {
            id,
            name,
            address: self.address.unwrap_or_default(),
            location,
            cuisine: Cuisine::from_tags(&self.types),
            price_level: self.price_level.unwrap_or(DEFAULT_PRICE_LEVEL),
            distance_km: distance_from(reference, location),
            image_url,
            photo_attributions,
            rating: self.rating,
        })
    }

    /// Build the detail record
    ///
    /// Returns None when the record has no id or no valid location.
    pub fn into_details(self) -> Option<PlaceDetails> {
        let (id, location) = self.checked_identity()?;
        let name = self.display_name();

        Some(PlaceDetails {
            id,
            name,
            address: self.address.unwrap_or_default(),
            phone: self.phone,
            website: self.website,
            rating: self.rating.unwrap_or(0.0),
            rating_count: self.rating_count,
            cuisine: Cuisine::from_tags(&self.types),
            price_level: self.price_level.unwrap_or(DEFAULT_PRICE_LEVEL),
            photos: self.photos,
            opening_hours: self.opening_hours,
            location,
        })
    }
}

/// First non-blank string among the candidates
pub(crate) fn first_text<'a>(candidates: impl IntoIterator<Item = Option<&'a str>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// A coordinate component that may arrive as a number or a numeric string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// Latitude/longitude pair under either naming convention
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub(crate) struct LatLng {
    #[serde(default, alias = "lat")]
    latitude: Option<Degrees>,
    #[serde(default, alias = "lng", alias = "lon")]
    longitude: Option<Degrees>,
}

impl LatLng {
    /// The coordinate, if both components parse and are in range
    pub(crate) fn coordinates(&self) -> Option<Coordinates> {
        let lat = self.latitude.as_ref()?.value()?;
        let lng = self.longitude.as_ref()?.value()?;
        let coords = Coordinates::new(lat, lng);
        coords.is_valid().then_some(coords)
    }
}

/// Price level as either a 0-4 integer or a `PRICE_LEVEL_*` name
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum PriceValue {
    Level(i64),
    Named(String),
}

impl PriceValue {
    /// Map onto 1-4; "free"/0 counts as the cheapest level
    pub(crate) fn level(&self) -> Option<u8> {
        match self {
            Self::Level(n) => u8::try_from((*n).clamp(1, 4)).ok(),
            Self::Named(name) => match name.trim_start_matches("PRICE_LEVEL_") {
                "FREE" | "INEXPENSIVE" => Some(1),
                "MODERATE" => Some(2),
                "EXPENSIVE" => Some(3),
                "VERY_EXPENSIVE" => Some(4),
                other => other.parse::<i64>().ok().and_then(|n| Self::Level(n).level()),
            },
        }
    }
}

/// Send a request and decode the JSON body
///
/// Transport errors, non-2xx statuses and undecodable bodies all become
/// `Error::QueryFailed` with the backend name in the reason.
pub(crate) async fn send_json(request: reqwest::RequestBuilder, context: &str) -> Result<Value> {
    let response = request
        .send()
        .await
        .map_err(|e| Error::query_failed(format!("{} request failed: {}", context, e)))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let snippet: String = body.chars().take(200).collect();
        return Err(Error::query_failed(format!(
            "{} returned status {}: {}",
            context, status, snippet
        )));
    }

    response
        .json()
        .await
        .map_err(|e| Error::query_failed(format!("Failed to parse {} response: {}", context, e)))
}
