//! Google geocoding backend
//!
//! `GET {base}/json?address=...` for search and `?latlng=lat,lng` for
//! reverse lookups. Responses use the same status envelope as the legacy
//! places service: `ZERO_RESULTS` is an empty answer, any other non-OK
//! status is an error.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, LocationSearchResult};
use crate::provider::{send_json, LatLng, Session};
use serde::Deserialize;
use tracing::{debug, warn};

/// Geocoding web service backend
#[derive(Debug, Clone)]
pub struct GoogleGeocoder {
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    #[serde(default)]
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    #[serde(default)]
    place_id: String,
    #[serde(default)]
    formatted_address: String,
    #[serde(default)]
    geometry: Option<GeocodeGeometry>,
    #[serde(default)]
    types: Vec<String>,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    #[serde(default)]
    location: Option<LatLng>,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    #[serde(default)]
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}

/// Component types that never name a place on their own
const UNNAMED_COMPONENT_TYPES: &[&str] = &["street_number", "subpremise", "postal_code"];

impl AddressComponent {
    fn is_name(&self) -> bool {
        !self
            .types
            .iter()
            .any(|t| UNNAMED_COMPONENT_TYPES.contains(&t.as_str()))
    }
}

impl GeocodeResult {
    /// Short name: first naming address component, else the first address segment
    fn display_name(&self) -> String {
        self.address_components
            .iter()
            .filter(|c| c.is_name())
            .map(|c| c.long_name.trim())
            .find(|name| !name.is_empty())
            .or_else(|| self.formatted_address.split(',').next().map(str::trim))
            .unwrap_or_default()
            .to_string()
    }

    fn into_search_result(self) -> Option<LocationSearchResult> {
        let location = self
            .geometry
            .as_ref()
            .and_then(|g| g.location.as_ref())
            .and_then(LatLng::coordinates);

        let Some(location) = location else {
            warn!(place_id = %self.place_id, "dropping geocode result without a location");
            return None;
        };

        Some(LocationSearchResult {
            name: self.display_name(),
            id: self.place_id,
            formatted_address: self.formatted_address,
            location,
            types: self.types,
        })
    }
}

impl GeocodeResponse {
    /// Results for OK, nothing for ZERO_RESULTS, an error otherwise
    fn into_results(self) -> Result<Vec<GeocodeResult>> {
        match self.status.as_str() {
            "OK" => Ok(self.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            other => Err(Error::query_failed(format!(
                "geocoding returned status {}{}",
                other,
                self.error_message
                    .as_deref()
                    .map(|m| format!(": {}", m))
                    .unwrap_or_default()
            ))),
        }
    }
}

impl GoogleGeocoder {
    /// Create a backend against the given base URL (e.g. `.../maps/api/geocode`)
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    async fn request(&self, session: &Session, params: &[(&str, String)]) -> Result<Vec<GeocodeResult>> {
        let url = format!("{}/json", self.base_url);
        debug!(%url, "geocoding request");

        let request = session
            .client()
            .get(&url)
            .query(params)
            .query(&[("key", session.api_key())]);

        let value = send_json(request, "geocoding").await?;
        let response: GeocodeResponse = serde_json::from_value(value)?;
        response.into_results()
    }
}

impl GeoBackend for GoogleGeocoder {
    async fn search(&self, session: &Session, query: &str) -> Result<Vec<LocationSearchResult>> {
        let results = self
            .request(session, &[("address", query.to_string())])
            .await?;

        Ok(results
            .into_iter()
            .filter_map(GeocodeResult::into_search_result)
            .collect())
    }

    async fn reverse(&self, session: &Session, coords: Coordinates) -> Result<Option<String>> {
        let results = self
            .request(session, &[("latlng", coords.to_query_value())])
            .await?;

        Ok(results
            .into_iter()
            .map(|r| r.formatted_address)
            .find(|address| !address.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> GeocodeResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ok_response() {
        let results = response(json!({
            "status": "OK",
            "results": [{
                "place_id": "ChIJpTvG15DL1IkRd8S0KlBVNTI",
                "formatted_address": "Toronto, ON, Canada",
                "geometry": { "location": { "lat": 43.653226, "lng": -79.3831843 } },
                "types": ["locality", "political"],
                "address_components": [{ "long_name": "Toronto", "short_name": "Toronto" }]
            }]
        }))
        .into_results()
        .unwrap();

        let result = results.into_iter().next().unwrap().into_search_result().unwrap();
        assert_eq!(result.id, "ChIJpTvG15DL1IkRd8S0KlBVNTI");
        assert_eq!(result.name, "Toronto");
        assert_eq!(result.formatted_address, "Toronto, ON, Canada");
        assert_eq!(result.types, vec!["locality", "political"]);
    }

    #[test]
    fn test_zero_results_is_empty() {
        let results = response(json!({ "status": "ZERO_RESULTS", "results": [] }))
            .into_results()
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_other_status_is_query_failed() {
        let err = response(json!({
            "status": "OVER_QUERY_LIMIT",
            "error_message": "quota exceeded"
        }))
        .into_results()
        .unwrap_err();

        match err {
            Error::QueryFailed { reason } => {
                assert!(reason.contains("OVER_QUERY_LIMIT"));
                assert!(reason.contains("quota exceeded"));
            }
            other => panic!("expected QueryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_display_name_falls_back_to_address() {
        let result = response(json!({
            "status": "OK",
            "results": [{
                "place_id": "x",
                "formatted_address": "1 Main St, Springfield, USA",
                "geometry": { "location": { "lat": 1.0, "lng": 2.0 } }
            }]
        }))
        .into_results()
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
        assert_eq!(result.display_name(), "1 Main St");
    }

    #[test]
    fn test_display_name_skips_street_number() {
        let result = response(json!({
            "status": "OK",
            "results": [{
                "place_id": "x",
                "formatted_address": "100 Queen St W, Toronto, ON M5H 2N1, Canada",
                "geometry": { "location": { "lat": 43.6532, "lng": -79.3832 } },
                "types": ["street_address"],
                "address_components": [
                    { "long_name": "100", "short_name": "100", "types": ["street_number"] },
                    { "long_name": "Queen Street West", "short_name": "Queen St W", "types": ["route"] },
                    { "long_name": "Toronto", "short_name": "Toronto", "types": ["locality", "political"] }
                ]
            }]
        }))
        .into_results()
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
        assert_eq!(result.display_name(), "Queen Street West");
    }

    #[test]
    fn test_result_without_location_is_dropped() {
        let result = response(json!({
            "status": "OK",
            "results": [{ "place_id": "x", "formatted_address": "Nowhere" }]
        }))
        .into_results()
        .unwrap()
        .into_iter()
        .next()
        .unwrap();
        assert!(result.into_search_result().is_none());
    }
}
