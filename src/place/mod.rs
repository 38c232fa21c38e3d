//! Normalized place model
//!
//! Every provider response, whichever shape it arrived in, ends up as one of
//! these value types. They are created fresh per query and owned by the
//! caller; nothing here is shared or cached.

pub mod cuisine;

use crate::constants::photo::PLACEHOLDER_IMAGE_URL;
use crate::coord::{format_distance_km, Coordinates};
use serde::{Deserialize, Serialize};

pub use cuisine::Cuisine;

/// Credit line attached to a provider photo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribution {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Attribution {
    pub fn new(display_name: Option<String>, uri: Option<String>) -> Self {
        Self { display_name, uri }
    }

    /// True when neither field carries anything
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.uri.is_none()
    }
}

/// A candidate photo as described by the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoDescriptor {
    /// Provider photo reference: a `places/{id}/photos/{ref}` resource path
    /// or a bare opaque token, depending on the response shape
    pub reference: String,
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub attributions: Vec<Attribution>,
}

impl PhotoDescriptor {
    pub fn new(reference: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            reference: reference.into(),
            width,
            height,
            attributions: Vec::new(),
        }
    }

    pub fn with_attributions(mut self, attributions: Vec<Attribution>) -> Self {
        self.attributions = attributions;
        self
    }

    /// Pixel area
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Width over height, or None when either dimension is zero
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(f64::from(self.width) / f64::from(self.height))
        }
    }
}

/// The normalized restaurant record shown on cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntity {
    pub id: String,
    pub name: String,
    pub address: String,
    pub location: Coordinates,
    pub cuisine: Cuisine,
    /// 1 (cheap) to 4 (very expensive)
    pub price_level: u8,
    /// Kilometers from the query reference point, 0 without one
    pub distance_km: f64,
    /// Photo URL or `PLACEHOLDER_IMAGE_URL`
    pub image_url: String,
    #[serde(default)]
    pub photo_attributions: Vec<Attribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

impl PlaceEntity {
    /// Does this entity still show the placeholder image?
    pub fn needs_photo(&self) -> bool {
        self.image_url == PLACEHOLDER_IMAGE_URL
    }

    /// A new record with the image replaced
    ///
    /// Enrichment never patches a record in place; it builds a replacement
    /// with the same id so readers never observe a half-updated entity.
    pub fn with_photo(&self, image_url: String, photo_attributions: Vec<Attribution>) -> Self {
        Self {
            image_url,
            photo_attributions,
            ..self.clone()
        }
    }

    /// Distance for display ("1.3 km")
    pub fn distance_label(&self) -> String {
        format_distance_km(self.distance_km)
    }

    /// Price for display ("$$")
    pub fn price_label(&self) -> String {
        "$".repeat(usize::from(self.price_level))
    }
}

/// Opening hours block from place details
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub is_open_now: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday_text: Option<Vec<String>>,
}

/// Richer single-place record for the detail view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Average rating, 0 when the place has none
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    pub cuisine: Cuisine,
    pub price_level: u8,
    pub photos: Vec<PhotoDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opening_hours: Option<OpeningHours>,
    pub location: Coordinates,
}
