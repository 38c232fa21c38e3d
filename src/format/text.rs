//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::geo::LocationSearchResult;
use crate::place::{PlaceDetails, PlaceEntity};

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format_places(&self, places: &[PlaceEntity]) -> Result<String> {
        if places.is_empty() {
            return Ok("No places found.\n".to_string());
        }

        let mut output = format!("{} place(s)\n\n", places.len());
        for (i, place) in places.iter().enumerate() {
            output.push_str(&format!(
                "{:>2}. {} [{}] {}\n",
                i + 1,
                place.name,
                place.cuisine,
                place.price_label()
            ));
            if !place.address.is_empty() {
                output.push_str(&format!("    {}\n", place.address));
            }

            let mut line = format!("    {}", place.distance_label());
            if let Some(rating) = place.rating {
                line.push_str(&format!(" | {:.1}*", rating));
            }
            line.push_str(&format!(" | id: {}\n", place.id));
            output.push_str(&line);

            if !place.needs_photo() {
                output.push_str(&format!("    photo: {}\n", place.image_url));
                if let Some(credit) = place
                    .photo_attributions
                    .iter()
                    .find_map(|a| a.display_name.as_deref())
                {
                    output.push_str(&format!("    photo by {}\n", credit));
                }
            }
        }

        Ok(output)
    }

    fn format_details(&self, details: &PlaceDetails) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("{} ({})\n", details.name, details.cuisine));
        output.push_str(&format!("Address: {}\n", details.address));
        output.push_str(&format!("Location: ({:.6}, {:.6})\n", details.location.lat, details.location.lng));
        output.push_str(&format!("Price: {}\n", "$".repeat(usize::from(details.price_level))));

        match details.rating_count {
            Some(count) => output.push_str(&format!("Rating: {:.1} ({} reviews)\n", details.rating, count)),
            None => output.push_str(&format!("Rating: {:.1}\n", details.rating)),
        }

        if let Some(phone) = &details.phone {
            output.push_str(&format!("Phone: {}\n", phone));
        }
        if let Some(website) = &details.website {
            output.push_str(&format!("Website: {}\n", website));
        }

        if let Some(hours) = &details.opening_hours {
            let state = if hours.is_open_now { "open now" } else { "closed now" };
            output.push_str(&format!("Hours: {}\n", state));
            for line in hours.weekday_text.iter().flatten() {
                output.push_str(&format!("  {}\n", line));
            }
        }

        output.push_str(&format!("Photos: {}\n", details.photos.len()));
        output.push_str(&format!("ID: {}\n", details.id));

        Ok(output)
    }

    fn format_locations(&self, locations: &[LocationSearchResult]) -> Result<String> {
        if locations.is_empty() {
            return Ok("No locations found.\n".to_string());
        }

        let mut output = String::new();
        for location in locations {
            output.push_str(&format!(
                "{}: {} ({:.6}, {:.6})\n",
                location.name, location.formatted_address, location.location.lat, location.location.lng
            ));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::photo::PLACEHOLDER_IMAGE_URL;
    use crate::coord::Coordinates;
    use crate::place::{Attribution, Cuisine, OpeningHours};

    fn create_test_place(image_url: &str) -> PlaceEntity {
        PlaceEntity {
            id: "ChIJ1".to_string(),
            name: "Kinka Izakaya".to_string(),
            address: "398 Church St".to_string(),
            location: Coordinates::new(43.6607, -79.3792),
            cuisine: Cuisine::Japanese,
            price_level: 3,
            distance_km: 1.26,
            image_url: image_url.to_string(),
            photo_attributions: vec![Attribution::new(Some("Ana".into()), None)],
            rating: Some(4.5),
        }
    }

    #[test]
    fn test_text_places() {
        let output = TextFormatter
            .format_places(&[create_test_place("https://img.test/p.jpg")])
            .unwrap();

        assert!(output.contains("1 place(s)"));
        assert!(output.contains("Kinka Izakaya [Japanese] $$$"));
        assert!(output.contains("1.3 km"));
        assert!(output.contains("4.5*"));
        assert!(output.contains("photo by Ana"));
    }

    #[test]
    fn test_text_places_placeholder_hides_photo() {
        let output = TextFormatter
            .format_places(&[create_test_place(PLACEHOLDER_IMAGE_URL)])
            .unwrap();
        assert!(!output.contains("photo:"));
    }

    #[test]
    fn test_text_empty() {
        assert_eq!(TextFormatter.format_places(&[]).unwrap(), "No places found.\n");
        assert_eq!(TextFormatter.format_locations(&[]).unwrap(), "No locations found.\n");
    }

    #[test]
    fn test_text_details() {
        let details = PlaceDetails {
            id: "ChIJ1".to_string(),
            name: "Kinka Izakaya".to_string(),
            address: "398 Church St".to_string(),
            phone: Some("(416) 977-0999".to_string()),
            website: None,
            rating: 4.5,
            rating_count: Some(3021),
            cuisine: Cuisine::Japanese,
            price_level: 2,
            photos: Vec::new(),
            opening_hours: Some(OpeningHours {
                is_open_now: true,
                weekday_text: Some(vec!["Monday: 11:30 AM - 11:00 PM".to_string()]),
            }),
            location: Coordinates::new(43.6607, -79.3792),
        };

        let output = TextFormatter.format_details(&details).unwrap();
        assert!(output.contains("Kinka Izakaya (Japanese)"));
        assert!(output.contains("Price: $$"));
        assert!(output.contains("Rating: 4.5 (3021 reviews)"));
        assert!(output.contains("Phone: (416) 977-0999"));
        assert!(!output.contains("Website:"));
        assert!(output.contains("Hours: open now"));
        assert!(output.contains("  Monday: 11:30 AM - 11:00 PM"));
    }

    #[test]
    fn test_text_formatter_info() {
        let formatter = TextFormatter;
        assert_eq!(formatter.name(), "text");
        assert!(!formatter.description().is_empty());
    }
}
