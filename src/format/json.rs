//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::LocationSearchResult;
use crate::place::{PlaceDetails, PlaceEntity};

/// JSON formatter - outputs results as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON"
    }

    fn format_places(&self, places: &[PlaceEntity]) -> Result<String> {
        Ok(serde_json::to_string_pretty(places)?)
    }

    fn format_details(&self, details: &PlaceDetails) -> Result<String> {
        Ok(serde_json::to_string_pretty(details)?)
    }

    fn format_locations(&self, locations: &[LocationSearchResult]) -> Result<String> {
        Ok(serde_json::to_string_pretty(locations)?)
    }
}
