//! Centralized constants for the dine-scout crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers
    pub const EARTH_RADIUS_KM: f64 = 6371.0;
}

/// External API endpoints
pub mod api {
    /// Places API (new), object-shaped responses
    pub const PLACES_URL: &str = "https://places.googleapis.com/v1";

    /// Places web service (legacy), status-enveloped responses
    pub const LEGACY_PLACES_URL: &str = "https://maps.googleapis.com/maps/api/place";

    /// Geocoding web service
    pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

    /// Environment variable holding the provider credential
    pub const API_KEY_ENV: &str = "GOOGLE_MAPS_API_KEY";

    /// HTTP user agent for all provider calls
    pub const USER_AGENT: &str = concat!("dine-scout/", env!("CARGO_PKG_VERSION"));
}

/// Photo and image settings
pub mod photo {
    /// Shown when a place has no usable photo or no credential is configured
    pub const PLACEHOLDER_IMAGE_URL: &str = "https://placehold.co/400x300?text=No+Image";

    /// Accepted landscape aspect ratio range (width / height), inclusive
    pub const MIN_ASPECT_RATIO: f64 = 1.2;
    pub const MAX_ASPECT_RATIO: f64 = 2.0;

    /// Hero image size used when backfilling photos from place details
    pub const HERO_WIDTH: u32 = 800;
    pub const HERO_HEIGHT: u32 = 600;
}

/// Normalization fallbacks
pub mod place {
    /// Name assigned when the provider returns no usable name
    pub const UNKNOWN_NAME: &str = "Unknown";

    /// Price level assumed when the provider omits one
    pub const DEFAULT_PRICE_LEVEL: u8 = 2;
}
