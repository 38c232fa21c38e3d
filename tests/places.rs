//! Integration tests for `PlaceSearch` and the enrichment pipeline using
//! wiremock HTTP mocks for both places entry points.

use dine_scout::{
    Config, Coordinates, Cuisine, EnrichmentPipeline, Error, PlaceSearch, SessionManager,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{any, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODERN_NEARBY: &str = "/v1/places:searchNearby";
const LEGACY_NEARBY: &str = "/maps/api/place/nearbysearch/json";
const LEGACY_DETAILS: &str = "/maps/api/place/details/json";

fn session(key: Option<&str>) -> Arc<SessionManager> {
    Arc::new(SessionManager::new(
        key.map(str::to_string),
        Duration::from_secs(5),
    ))
}

fn test_search(server: &MockServer, key: Option<&str>, use_modern_api: bool) -> PlaceSearch {
    let mut config = Config::default();
    config.provider.places_url = format!("{}/v1", server.uri());
    config.provider.legacy_url = format!("{}/maps/api/place", server.uri());
    config.provider.use_modern_api = use_modern_api;
    PlaceSearch::from_config(&config, session(key))
}

fn toronto() -> Coordinates {
    Coordinates::new(43.6532, -79.3832)
}

fn legacy_nearby_body() -> serde_json::Value {
    json!({
        "status": "OK",
        "results": [
            {
                "place_id": "ChIJ-pai",
                "name": "Pai Northern Thai Kitchen",
                "vicinity": "18 Duncan St, Toronto",
                "geometry": { "location": { "lat": 43.6479, "lng": -79.3887 } },
                "types": ["thai_restaurant", "restaurant", "food", "point_of_interest"],
                "price_level": 2,
                "rating": 4.6,
                "photos": [{
                    "photo_reference": "AapPai",
                    "width": 1600,
                    "height": 1067,
                    "html_attributions": ["<a href=\"https://maps.google.com/maps/contrib/1\">Dee</a>"]
                }]
            },
            {
                "place_id": "ChIJ-nophoto",
                "geometry": { "location": { "lat": "43.6500", "lng": "-79.3800" } },
                "types": ["restaurant", "food"]
            }
        ]
    })
}

#[tokio::test]
async fn modern_nearby_returns_normalized_places() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODERN_NEARBY))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(body_partial_json(json!({ "includedTypes": ["restaurant"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "places": [{
                "id": "ChIJ-kinka",
                "displayName": { "text": "Kinka Izakaya", "languageCode": "en" },
                "shortFormattedAddress": "398 Church St, Toronto",
                "location": { "latitude": 43.6607, "longitude": -79.3792 },
                "types": ["japanese_restaurant", "restaurant"],
                "priceLevel": "PRICE_LEVEL_EXPENSIVE",
                "photos": [
                    { "name": "places/ChIJ-kinka/photos/tall", "widthPx": 800, "heightPx": 1200 },
                    { "widthPx": 4000, "heightPx": 2500 },
                    { "name": "places/ChIJ-kinka/photos/wide", "widthPx": 1600, "heightPx": 1000 }
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LEGACY_NEARBY))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let search = test_search(&server, Some("test-key"), true);
    let places = search
        .search_nearby(toronto(), 1500, "restaurant")
        .await
        .expect("nearby search should succeed");

    assert_eq!(places.len(), 1);
    let kinka = &places[0];
    assert_eq!(kinka.id, "ChIJ-kinka");
    assert_eq!(kinka.name, "Kinka Izakaya");
    assert_eq!(kinka.cuisine, Cuisine::Japanese);
    assert_eq!(kinka.price_level, 3);
    assert!(kinka.distance_km > 0.5 && kinka.distance_km < 1.5);
    assert!(kinka.image_url.starts_with(&format!(
        "{}/v1/places/ChIJ-kinka/photos/wide/media",
        server.uri()
    )));
    assert!(kinka.image_url.contains("maxWidthPx=400"));
}

#[tokio::test]
async fn modern_empty_response_is_zero_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODERN_NEARBY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let search = test_search(&server, Some("test-key"), true);
    let places = search.search_nearby(toronto(), 800, "cafe").await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn legacy_zero_results_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LEGACY_NEARBY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "ZERO_RESULTS",
            "results": []
        })))
        .mount(&server)
        .await;

    let search = test_search(&server, Some("test-key"), false);
    let places = search.search_nearby(toronto(), 800, "restaurant").await.unwrap();
    assert!(places.is_empty());
}

#[tokio::test]
async fn modern_failure_falls_back_to_legacy() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODERN_NEARBY))
        .respond_with(ResponseTemplate::new(403).set_body_string("API not enabled"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LEGACY_NEARBY))
        .and(query_param("key", "test-key"))
        .and(query_param("type", "restaurant"))
        .and(query_param("keyword", "thai"))
        .and(query_param("radius", "1500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(legacy_nearby_body()))
        .expect(1)
        .mount(&server)
        .await;

    let search = test_search(&server, Some("test-key"), true);
    let places = search
        .search_nearby(toronto(), 1500, "thai_restaurant")
        .await
        .expect("legacy fallback should succeed");

    assert_eq!(places.len(), 2);

    let pai = &places[0];
    assert_eq!(pai.id, "ChIJ-pai");
    assert_eq!(pai.name, "Pai Northern Thai Kitchen");
    assert_eq!(pai.address, "18 Duncan St, Toronto");
    assert_eq!(pai.cuisine, Cuisine::Thai);
    assert_eq!(pai.price_level, 2);
    assert_eq!(pai.rating, Some(4.6));
    assert!(pai.image_url.contains("photo_reference=AapPai"));
    assert_eq!(pai.photo_attributions[0].display_name.as_deref(), Some("Dee"));

    let bare = &places[1];
    assert_eq!(bare.name, "Unknown");
    assert_eq!(bare.cuisine, Cuisine::Restaurant);
    assert_eq!(bare.price_level, 2);
    assert!(bare.needs_photo());
    assert!(bare.photo_attributions.is_empty());
}

#[tokio::test]
async fn both_entry_points_failing_is_query_failed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MODERN_NEARBY))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LEGACY_NEARBY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "REQUEST_DENIED",
            "error_message": "This API project is not authorized to use this API."
        })))
        .mount(&server)
        .await;

    let search = test_search(&server, Some("test-key"), true);
    let err = search
        .search_nearby(toronto(), 1500, "restaurant")
        .await
        .expect_err("both entry points failed");

    match err {
        Error::QueryFailed { reason } => {
            assert!(reason.contains("500"));
            assert!(reason.contains("REQUEST_DENIED"));
        }
        other => panic!("expected QueryFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn missing_credential_never_reaches_the_provider() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let search = test_search(&server, None, true);
    let result = search.search_by_text("ramen", Some(toronto()), None).await;
    assert!(matches!(result, Err(Error::ProviderUnavailable(_))));
}

#[tokio::test]
async fn details_fall_back_to_legacy() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/places/ChIJ-pai"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LEGACY_DETAILS))
        .and(query_param("place_id", "ChIJ-pai"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "place_id": "ChIJ-pai",
                "name": "Pai Northern Thai Kitchen",
                "formatted_address": "18 Duncan St, Toronto, ON M5H 3G8, Canada",
                "geometry": { "location": { "lat": 43.6479, "lng": -79.3887 } },
                "types": ["thai_restaurant", "restaurant"],
                "formatted_phone_number": "(416) 901-4724",
                "website": "https://www.paitoronto.com/",
                "rating": 4.6,
                "user_ratings_total": 12000,
                "opening_hours": {
                    "open_now": true,
                    "weekday_text": ["Monday: 11:30 AM - 10:00 PM"]
                },
                "photos": [{ "photo_reference": "AapPai", "width": 1600, "height": 1067 }]
            }
        })))
        .mount(&server)
        .await;

    let search = test_search(&server, Some("test-key"), true);
    let details = search.get_details("ChIJ-pai").await.unwrap();

    assert_eq!(details.name, "Pai Northern Thai Kitchen");
    assert_eq!(details.phone.as_deref(), Some("(416) 901-4724"));
    assert_eq!(details.website.as_deref(), Some("https://www.paitoronto.com/"));
    assert_eq!(details.rating, 4.6);
    assert_eq!(details.rating_count, Some(12000));
    assert_eq!(details.cuisine, Cuisine::Thai);
    assert!(details.opening_hours.as_ref().unwrap().is_open_now);
    assert_eq!(details.photos.len(), 1);
}

#[tokio::test]
async fn discovery_backfills_missing_photos() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(LEGACY_NEARBY))
        .respond_with(ResponseTemplate::new(200).set_body_json(legacy_nearby_body()))
        .mount(&server)
        .await;

    // Only the photo-less place may be looked up.
    Mock::given(method("GET"))
        .and(path(LEGACY_DETAILS))
        .and(query_param("place_id", "ChIJ-nophoto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "OK",
            "result": {
                "place_id": "ChIJ-nophoto",
                "geometry": { "location": { "lat": 43.65, "lng": -79.38 } },
                "photos": [
                    { "photo_reference": "AapPortrait", "width": 900, "height": 1600 },
                    { "photo_reference": "AapLandscape", "width": 1600, "height": 1000,
                      "html_attributions": ["Eli"] }
                ]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let search = test_search(&server, Some("test-key"), false);
    let pipeline = EnrichmentPipeline::new(search);

    let discovery = pipeline
        .discover_and_enrich(toronto(), 1500, "restaurant")
        .await
        .unwrap();
    assert_eq!(discovery.initial.len(), 2);
    assert!(discovery.initial[1].needs_photo());

    let generation = discovery.generation;
    let initial = discovery.initial.clone();
    let enriched = discovery.enriched.await;

    assert!(pipeline.is_current(generation));
    assert_eq!(enriched.len(), 2);
    assert_eq!(enriched[0], initial[0]);
    assert!(enriched[1]
        .image_url
        .starts_with(&format!("{}/maps/api/place/photo?", server.uri())));
    assert!(enriched[1].image_url.contains("photo_reference=AapLandscape"));
    assert!(enriched[1].image_url.contains("maxwidth=800"));
    assert_eq!(enriched[1].photo_attributions[0].display_name.as_deref(), Some("Eli"));
    assert_eq!(enriched[1].id, initial[1].id);
}
