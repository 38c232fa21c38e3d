//! Legacy-shape places backend (Places web service)
//!
//! Every endpoint is a `GET .../{endpoint}/json` with the credential in the
//! query string. Responses are wrapped in a status envelope:
//! `{"status": "OK", "results": [...]}` for searches and
//! `{"status": "OK", "result": {...}}` for details. `ZERO_RESULTS` is a
//! normal empty answer; any other non-OK status is a failure.

use crate::error::{Error, Result};
use crate::place::{Attribution, OpeningHours, PhotoDescriptor};
use crate::provider::{
    first_text, send_json, LatLng, NearbyRequest, PlaceRecord, PlacesBackend, PriceValue,
    ProviderPlace, Session, TextRequest,
};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::debug;

const DETAILS_FIELDS: &str = "place_id,name,vicinity,formatted_address,geometry,types,\
price_level,rating,user_ratings_total,formatted_phone_number,international_phone_number,\
website,opening_hours,photos";

// Patterns are literals; `None` only means attribution HTML is kept verbatim.
static ANCHOR_RE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"<a\s[^>]*href\s*=\s*"([^"]*)"[^>]*>(.*?)</a>"#).ok());

static TAG_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

/// Legacy places web service backend
#[derive(Debug, Clone)]
pub struct LegacyBackend {
    base_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct Geometry {
    #[serde(default)]
    location: Option<LatLng>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct LegacyPhoto {
    #[serde(default)]
    photo_reference: Option<String>,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    html_attributions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct LegacyHours {
    #[serde(default)]
    open_now: Option<bool>,
    #[serde(default)]
    weekday_text: Option<Vec<String>>,
}

/// A place as returned by the legacy web service
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LegacyPlace {
    #[serde(default)]
    place_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    price_level: Option<PriceValue>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_ratings_total: Option<u32>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    international_phone_number: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    opening_hours: Option<LegacyHours>,
    #[serde(default)]
    photos: Vec<LegacyPhoto>,
}

impl LegacyPlace {
    /// Normalize into the shape-independent record
    pub fn normalize(self) -> PlaceRecord {
        let location = self
            .geometry
            .as_ref()
            .and_then(|g| g.location.as_ref())
            .and_then(LatLng::coordinates);

        let photos = self
            .photos
            .into_iter()
            .filter_map(|photo| {
                let reference = first_text([photo.photo_reference.as_deref()])?;
                let attributions = photo
                    .html_attributions
                    .iter()
                    .filter_map(|html| parse_html_attribution(html))
                    .collect();
                Some(
                    PhotoDescriptor::new(reference, photo.width, photo.height)
                        .with_attributions(attributions),
                )
            })
            .collect();

        PlaceRecord {
            id: first_text([self.place_id.as_deref()]),
            name: first_text([self.name.as_deref()]),
            address: first_text([self.vicinity.as_deref(), self.formatted_address.as_deref()]),
            location,
            types: self.types,
            price_level: self.price_level.as_ref().and_then(PriceValue::level),
            rating: self.rating,
            rating_count: self.user_ratings_total,
            phone: first_text([
                self.formatted_phone_number.as_deref(),
                self.international_phone_number.as_deref(),
            ]),
            website: first_text([self.website.as_deref()]),
            opening_hours: self.opening_hours.map(|hours| OpeningHours {
                is_open_now: hours.open_now.unwrap_or(false),
                weekday_text: hours.weekday_text,
            }),
            photos,
        }
    }
}

/// Parse one `html_attributions` entry
///
/// `<a href="https://maps.google.com/maps/contrib/1">Ana</a>` becomes
/// `{display_name: "Ana", uri: "https://..."}`; anything else becomes a
/// name-only attribution with markup stripped.
pub fn parse_html_attribution(html: &str) -> Option<Attribution> {
    if let Some(caps) = ANCHOR_RE.as_ref().and_then(|re| re.captures(html)) {
        let uri = caps.get(1).map(|m| m.as_str().trim().to_string());
        let name = caps.get(2).map(|m| strip_tags(m.as_str()));
        let attribution = Attribution::new(
            name.filter(|n| !n.is_empty()),
            uri.filter(|u| !u.is_empty()),
        );
        return (!attribution.is_empty()).then_some(attribution);
    }

    let text = strip_tags(html);
    (!text.is_empty()).then(|| Attribution::new(Some(text), None))
}

fn strip_tags(html: &str) -> String {
    match TAG_RE.as_ref() {
        Some(re) => re.replace_all(html, "").trim().to_string(),
        None => html.trim().to_string(),
    }
}

/// Status envelope shared by every legacy endpoint
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    results: Vec<Value>,
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error_message: Option<String>,
}

impl Envelope {
    fn is_zero_results(&self) -> bool {
        self.status == "ZERO_RESULTS"
    }

    fn check(&self) -> Result<()> {
        if self.status == "OK" || self.is_zero_results() {
            return Ok(());
        }
        Err(Error::query_failed(format!(
            "legacy places returned status {}{}",
            self.status,
            self.error_message
                .as_deref()
                .map(|m| format!(": {}", m))
                .unwrap_or_default()
        )))
    }
}

/// Split a category token into the legacy `type` and optional `keyword`
///
/// The legacy service only knows the generic "restaurant" type, so a
/// cuisine token such as "thai_restaurant" becomes type "restaurant" with
/// keyword "thai".
pub fn legacy_type_and_keyword(category: &str) -> (String, Option<String>) {
    match category.strip_suffix("_restaurant") {
        Some(cuisine) if !cuisine.is_empty() => {
            ("restaurant".to_string(), Some(cuisine.replace('_', " ")))
        }
        _ => (category.to_string(), None),
    }
}

impl LegacyBackend {
    /// Create a backend against the given base URL (e.g. `.../maps/api/place`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn get(&self, session: &Session, endpoint: &str, params: &[(&str, String)]) -> Result<Envelope> {
        let url = format!("{}/{}/json", self.base_url, endpoint);
        debug!(%url, "legacy places request");

        let request = session
            .client()
            .get(&url)
            .query(params)
            .query(&[("key", session.api_key())]);

        let value = send_json(request, "legacy places").await?;
        let envelope: Envelope = serde_json::from_value(value)?;
        envelope.check()?;
        Ok(envelope)
    }
}

impl PlacesBackend for LegacyBackend {
    fn name(&self) -> &'static str {
        "legacy"
    }

    async fn search_nearby(&self, session: &Session, request: &NearbyRequest) -> Result<Vec<ProviderPlace>> {
        let (place_type, keyword) = legacy_type_and_keyword(&request.category);
        let mut params = vec![
            ("location", request.center.to_query_value()),
            ("radius", request.radius_meters.to_string()),
            ("type", place_type),
        ];
        if let Some(keyword) = keyword {
            params.push(("keyword", keyword));
        }

        let envelope = self.get(session, "nearbysearch", &params).await?;
        Ok(ProviderPlace::classify_all(envelope.results))
    }

    async fn search_text(&self, session: &Session, request: &TextRequest) -> Result<Vec<ProviderPlace>> {
        let mut params = vec![("query", request.query.clone())];
        if let Some(center) = request.center {
            params.push(("location", center.to_query_value()));
        }
        if let Some(radius) = request.radius_meters {
            params.push(("radius", radius.to_string()));
        }

        let envelope = self.get(session, "textsearch", &params).await?;
        Ok(ProviderPlace::classify_all(envelope.results))
    }

    async fn place_details(&self, session: &Session, place_id: &str) -> Result<ProviderPlace> {
        let params = [
            ("place_id", place_id.to_string()),
            ("fields", DETAILS_FIELDS.to_string()),
        ];

        let envelope = self.get(session, "details", &params).await?;
        match envelope.result {
            Some(result) if !envelope.is_zero_results() => ProviderPlace::classify(result),
            _ => Err(Error::query_failed(format!("no place found for id {}", place_id))),
        }
    }
}
