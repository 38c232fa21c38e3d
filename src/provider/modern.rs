//! New-shape places backend (Places API v1)
//!
//! Searches are `POST` requests with a JSON body; details are `GET
//! places/{id}`. The credential and the field mask travel as headers.
//! Responses are plain objects: `{"places": [...]}` for searches (an empty
//! object when nothing matched) and a bare place object for details.

use crate::error::Result;
use crate::place::{Attribution, OpeningHours, PhotoDescriptor};
use crate::provider::{
    first_text, send_json, LatLng, NearbyRequest, PlaceRecord, PlacesBackend, PriceValue,
    ProviderPlace, Session, TextRequest,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

/// Largest page the search endpoints accept
const MAX_PAGE_SIZE: u32 = 20;

/// Bias radius for text searches given a center but no radius
const DEFAULT_TEXT_BIAS_RADIUS: u32 = 5000;

const SEARCH_FIELD_MASK: &str = "places.id,places.name,places.displayName,\
places.shortFormattedAddress,places.formattedAddress,places.location,places.types,\
places.primaryType,places.priceLevel,places.rating,places.userRatingCount,places.photos";

const DETAILS_FIELD_MASK: &str = "id,name,displayName,shortFormattedAddress,formattedAddress,\
location,types,primaryType,priceLevel,rating,userRatingCount,nationalPhoneNumber,internationalPhoneNumber,\
websiteUri,currentOpeningHours,regularOpeningHours,photos";

/// Places API v1 backend
#[derive(Debug, Clone)]
pub struct ModernBackend {
    base_url: String,
}

/// Localized text: `{"text": ..., "languageCode": ...}` or a bare string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
enum LocalizedText {
    Localized { text: String },
    Plain(String),
}

impl LocalizedText {
    fn as_str(&self) -> &str {
        match self {
            Self::Localized { text } => text,
            Self::Plain(text) => text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthorAttribution {
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModernPhoto {
    /// `places/{place_id}/photos/{photo_id}`
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    width_px: u32,
    #[serde(default)]
    height_px: u32,
    #[serde(default)]
    author_attributions: Vec<AuthorAttribution>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModernHours {
    #[serde(default)]
    open_now: Option<bool>,
    #[serde(default)]
    weekday_descriptions: Option<Vec<String>>,
}

/// A place as returned by the new API
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModernPlace {
    #[serde(default)]
    id: Option<String>,
    /// Resource name, `places/{id}`
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<LocalizedText>,
    #[serde(default)]
    short_formatted_address: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    location: Option<LatLng>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    primary_type: Option<String>,
    #[serde(default)]
    price_level: Option<PriceValue>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_rating_count: Option<u32>,
    #[serde(default)]
    national_phone_number: Option<String>,
    #[serde(default)]
    international_phone_number: Option<String>,
    #[serde(default)]
    website_uri: Option<String>,
    #[serde(default)]
    current_opening_hours: Option<ModernHours>,
    #[serde(default)]
    regular_opening_hours: Option<ModernHours>,
    #[serde(default)]
    photos: Vec<ModernPhoto>,
}

impl ModernPlace {
    /// Normalize into the shape-independent record
    pub fn normalize(self) -> PlaceRecord {
        let resource_id = self
            .name
            .as_deref()
            .and_then(|name| name.strip_prefix("places/"));
        let id = first_text([self.id.as_deref(), resource_id]);

        let name = first_text([self.display_name.as_ref().map(LocalizedText::as_str)]);
        let address = first_text([
            self.short_formatted_address.as_deref(),
            self.formatted_address.as_deref(),
        ]);
        let phone = first_text([
            self.national_phone_number.as_deref(),
            self.international_phone_number.as_deref(),
        ]);

        // primary type first so it wins cuisine classification
        let mut types: Vec<String> = self.primary_type.into_iter().collect();
        for tag in self.types {
            if !types.contains(&tag) {
                types.push(tag);
            }
        }

        let opening_hours = self
            .current_opening_hours
            .or(self.regular_opening_hours)
            .map(|hours| OpeningHours {
                is_open_now: hours.open_now.unwrap_or(false),
                weekday_text: hours.weekday_descriptions,
            });

        let photos = self
            .photos
            .into_iter()
            .filter_map(|photo| {
                // a photo without a resource name cannot be fetched
                let reference = first_text([photo.name.as_deref()])?;
                let attributions = photo
                    .author_attributions
                    .into_iter()
                    .map(|a| Attribution::new(a.display_name, a.uri))
                    .filter(|a| !a.is_empty())
                    .collect();
                Some(
                    PhotoDescriptor::new(reference, photo.width_px, photo.height_px)
                        .with_attributions(attributions),
                )
            })
            .collect();

        PlaceRecord {
            id,
            name,
            address,
            location: self.location.as_ref().and_then(LatLng::coordinates),
            types,
            price_level: self.price_level.as_ref().and_then(PriceValue::level),
            rating: self.rating,
            rating_count: self.user_rating_count,
            phone,
            website: first_text([self.website_uri.as_deref()]),
            opening_hours,
            photos,
        }
    }
}

/// Search response envelope; `places` is absent when nothing matched
#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    places: Vec<Value>,
}

impl ModernBackend {
    /// Create a backend against the given base URL (e.g. `.../v1`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn post_search(&self, session: &Session, endpoint: &str, body: Value) -> Result<Vec<ProviderPlace>> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "places-v1 search");

        let request = session
            .client()
            .post(&url)
            .header("X-Goog-Api-Key", session.api_key())
            .header("X-Goog-FieldMask", SEARCH_FIELD_MASK)
            .json(&body);

        let value = send_json(request, "places-v1").await?;
        let response: SearchResponse = serde_json::from_value(value)?;
        Ok(ProviderPlace::classify_all(response.places))
    }
}

impl PlacesBackend for ModernBackend {
    fn name(&self) -> &'static str {
        "places-v1"
    }

    async fn search_nearby(&self, session: &Session, request: &NearbyRequest) -> Result<Vec<ProviderPlace>> {
        let body = json!({
            "includedTypes": [request.category],
            "maxResultCount": request.max_results.clamp(1, MAX_PAGE_SIZE),
            "locationRestriction": {
                "circle": {
                    "center": {
                        "latitude": request.center.lat,
                        "longitude": request.center.lng,
                    },
                    "radius": f64::from(request.radius_meters),
                }
            }
        });

        self.post_search(session, "places:searchNearby", body).await
    }

    async fn search_text(&self, session: &Session, request: &TextRequest) -> Result<Vec<ProviderPlace>> {
        let mut body = json!({
            "textQuery": request.query,
            "pageSize": request.max_results.clamp(1, MAX_PAGE_SIZE),
        });

        if let Some(center) = request.center {
            let radius = request.radius_meters.unwrap_or(DEFAULT_TEXT_BIAS_RADIUS);
            body["locationBias"] = json!({
                "circle": {
                    "center": { "latitude": center.lat, "longitude": center.lng },
                    "radius": f64::from(radius),
                }
            });
        }

        self.post_search(session, "places:searchText", body).await
    }

    async fn place_details(&self, session: &Session, place_id: &str) -> Result<ProviderPlace> {
        let url = format!("{}/places/{}", self.base_url, urlencoding::encode(place_id));
        debug!(%url, "places-v1 details");

        let request = session
            .client()
            .get(&url)
            .header("X-Goog-Api-Key", session.api_key())
            .header("X-Goog-FieldMask", DETAILS_FIELD_MASK);

        let value = send_json(request, "places-v1").await?;
        ProviderPlace::classify(value)
    }
}
