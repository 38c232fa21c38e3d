//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::api;

/// Default search radius in meters
pub const DEFAULT_RADIUS: u32 = 1500;

/// Default place category token
pub const DEFAULT_CATEGORY: &str = "restaurant";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default card photo width in pixels
pub const DEFAULT_CARD_WIDTH: u32 = 400;

/// Default card photo height in pixels
pub const DEFAULT_CARD_HEIGHT: u32 = 300;

/// Default maximum number of results requested per search
pub const DEFAULT_MAX_RESULTS: u32 = 20;

/// Default places (new) endpoint
pub const DEFAULT_PLACES_URL: &str = api::PLACES_URL;

/// Default legacy places endpoint
pub const DEFAULT_LEGACY_URL: &str = api::LEGACY_PLACES_URL;

/// Default geocoding endpoint
pub const DEFAULT_GEOCODE_URL: &str = api::GEOCODE_URL;

/// Default provider request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "dine-scout";
