//! Photo selection and photo URL construction
//!
//! Picks the candidate best suited for a landscape card or hero slot, and
//! turns a provider photo reference into a sized image URL.

use crate::constants::api::{LEGACY_PLACES_URL, PLACES_URL};
use crate::constants::photo::{MAX_ASPECT_RATIO, MIN_ASPECT_RATIO, PLACEHOLDER_IMAGE_URL};
use crate::place::PhotoDescriptor;

/// Largest edge the media endpoints accept
const MAX_EDGE_PX: u32 = 4800;

/// Base URLs of the two media endpoints
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEndpoints {
    /// New-API base, photo resources are served under `{places_url}/{name}/media`
    pub places_url: String,
    /// Legacy base, tokens are served under `{legacy_url}/photo`
    pub legacy_url: String,
}

impl MediaEndpoints {
    pub fn new(places_url: impl Into<String>, legacy_url: impl Into<String>) -> Self {
        Self {
            places_url: places_url.into().trim_end_matches('/').to_string(),
            legacy_url: legacy_url.into().trim_end_matches('/').to_string(),
        }
    }
}

impl Default for MediaEndpoints {
    fn default() -> Self {
        Self::new(PLACES_URL, LEGACY_PLACES_URL)
    }
}

/// Is this photo landscape-oriented within the accepted ratio range?
fn is_landscape(photo: &PhotoDescriptor) -> bool {
    photo
        .aspect_ratio()
        .is_some_and(|ratio| (MIN_ASPECT_RATIO..=MAX_ASPECT_RATIO).contains(&ratio))
}

/// Pick the best photo for card/hero display
///
/// The first candidate is the starting best. Each later candidate replaces
/// it when it is landscape (ratio in [1.2, 2.0]) and strictly larger. A
/// landscape candidate also wins an area tie against a best that is not
/// landscape itself, so a portrait first photo never beats an equally large
/// landscape one. Later candidates with a zero dimension are skipped.
///
/// When nothing qualifies the first candidate is returned unchanged.
pub fn select_best_photo(candidates: &[PhotoDescriptor]) -> Option<&PhotoDescriptor> {
    let (first, rest) = candidates.split_first()?;
    let mut best = first;

    for candidate in rest {
        // zero-dimension photos have no ratio and fail here too
        if !is_landscape(candidate) {
            continue;
        }

        let larger = candidate.area() > best.area();
        let ties_non_landscape = candidate.area() == best.area() && !is_landscape(best);
        if larger || ties_non_landscape {
            best = candidate;
        }
    }

    Some(best)
}

/// The two photo reference formats the provider hands out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoRef<'a> {
    /// `places/{place_id}/photos/{photo_id}` from the new API
    Resource(&'a str),
    /// Opaque `photo_reference` token from the legacy API
    Token(&'a str),
}

impl<'a> PhotoRef<'a> {
    /// Detect the reference format, None for an empty reference
    pub fn parse(reference: &'a str) -> Option<Self> {
        let reference = reference.trim().trim_start_matches('/');
        if reference.is_empty() {
            return None;
        }

        if reference.starts_with("places/") && reference.contains("/photos/") {
            Some(Self::Resource(reference))
        } else {
            Some(Self::Token(reference))
        }
    }
}

/// Build a sized image URL for a provider photo reference
///
/// # Arguments
/// * `media` - Media endpoint base URLs
/// * `reference` - Resource path or opaque token
/// * `max_width` - Requested maximum width in pixels
/// * `max_height` - Requested maximum height in pixels
/// * `api_key` - Provider credential
///
/// # Returns
/// The media endpoint URL, or `PLACEHOLDER_IMAGE_URL` when there is no
/// credential or no usable reference.
pub fn build_photo_url(
    media: &MediaEndpoints,
    reference: &str,
    max_width: u32,
    max_height: u32,
    api_key: Option<&str>,
) -> String {
    let Some(key) = api_key.filter(|k| !k.is_empty()) else {
        return PLACEHOLDER_IMAGE_URL.to_string();
    };
    let Some(photo_ref) = PhotoRef::parse(reference) else {
        return PLACEHOLDER_IMAGE_URL.to_string();
    };

    let width = max_width.clamp(1, MAX_EDGE_PX);
    let height = max_height.clamp(1, MAX_EDGE_PX);

    match photo_ref {
        PhotoRef::Resource(path) => format!(
            "{}/{}/media?maxWidthPx={}&maxHeightPx={}&key={}",
            media.places_url,
            path,
            width,
            height,
            urlencoding::encode(key)
        ),
        PhotoRef::Token(token) => format!(
            "{}/photo?maxwidth={}&maxheight={}&photo_reference={}&key={}",
            media.legacy_url,
            width,
            height,
            urlencoding::encode(token),
            urlencoding::encode(key)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(reference: &str, width: u32, height: u32) -> PhotoDescriptor {
        PhotoDescriptor::new(reference, width, height)
    }

    fn google_url(reference: &str, max_width: u32, max_height: u32, api_key: Option<&str>) -> String {
        build_photo_url(&MediaEndpoints::default(), reference, max_width, max_height, api_key)
    }

    #[test]
    fn test_empty_candidates() {
        assert!(select_best_photo(&[]).is_none());
    }

    #[test]
    fn test_single_candidate_is_returned() {
        let candidates = vec![photo("a", 300, 900)];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "a");
    }

    #[test]
    fn test_larger_landscape_wins() {
        let candidates = vec![
            photo("small", 400, 300),
            photo("big", 1600, 1000),
            photo("medium", 800, 600),
        ];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "big");
    }

    #[test]
    fn test_portrait_never_replaces() {
        let candidates = vec![
            photo("landscape", 800, 500),
            photo("huge_portrait", 3000, 4000),
        ];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "landscape");
    }

    #[test]
    fn test_too_wide_never_replaces() {
        let candidates = vec![photo("ok", 800, 500), photo("panorama", 5000, 1000)];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "ok");
    }

    #[test]
    fn test_ratio_bounds_inclusive() {
        let candidates = vec![photo("first", 10, 10), photo("exact_min", 1200, 1000)];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "exact_min");

        let candidates = vec![photo("first", 10, 10), photo("exact_max", 2000, 1000)];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "exact_max");
    }

    #[test]
    fn test_zero_dimension_skipped() {
        let candidates = vec![photo("first", 400, 300), photo("broken", 0, 1000)];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "first");
    }

    #[test]
    fn test_first_kept_when_nothing_qualifies() {
        let candidates = vec![
            photo("tiny_portrait", 100, 200),
            photo("square", 2000, 2000),
            photo("portrait", 1000, 3000),
        ];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "tiny_portrait");
    }

    #[test]
    fn test_landscape_ties_keep_earlier() {
        let candidates = vec![
            photo("first", 800, 600),
            photo("second", 800, 600),
            photo("third", 600, 450),
        ];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "first");
    }

    #[test]
    fn test_equal_area_landscape_beats_portrait_first() {
        // 600x1000 portrait and 1000x600 landscape have the same area
        let candidates = vec![photo("portrait", 600, 1000), photo("landscape", 1000, 600)];
        assert_eq!(select_best_photo(&candidates).unwrap().reference, "landscape");
    }

    #[test]
    fn test_never_portrait_when_larger_landscape_exists() {
        let sets = vec![
            vec![photo("p", 500, 1000), photo("l", 1000, 600)],
            vec![photo("p", 300, 400), photo("x", 0, 0), photo("l", 1200, 800)],
            vec![photo("p", 1000, 1500), photo("l1", 900, 600), photo("l2", 1800, 1000)],
        ];

        for candidates in &sets {
            let best = select_best_photo(candidates).unwrap();
            let ratio = best.aspect_ratio().unwrap();
            assert!(ratio >= 1.2, "picked portrait {} from {:?}", best.reference, candidates);
        }
    }

    #[test]
    fn test_photo_ref_detection() {
        assert_eq!(
            PhotoRef::parse("places/ChIJ123/photos/AbC"),
            Some(PhotoRef::Resource("places/ChIJ123/photos/AbC"))
        );
        assert_eq!(PhotoRef::parse("AbCdEf123"), Some(PhotoRef::Token("AbCdEf123")));
        assert_eq!(PhotoRef::parse("places/ChIJ123"), Some(PhotoRef::Token("places/ChIJ123")));
        assert_eq!(PhotoRef::parse("   "), None);
    }

    #[test]
    fn test_build_resource_url() {
        let url = google_url("places/ChIJ123/photos/AbC", 400, 300, Some("key123"));
        assert_eq!(
            url,
            "https://places.googleapis.com/v1/places/ChIJ123/photos/AbC/media?maxWidthPx=400&maxHeightPx=300&key=key123"
        );
    }

    #[test]
    fn test_build_token_url() {
        let url = google_url("Aap_uEA7", 800, 600, Some("key123"));
        assert_eq!(
            url,
            "https://maps.googleapis.com/maps/api/place/photo?maxwidth=800&maxheight=600&photo_reference=Aap_uEA7&key=key123"
        );
    }

    #[test]
    fn test_missing_key_yields_placeholder() {
        assert_eq!(google_url("Aap_uEA7", 800, 600, None), PLACEHOLDER_IMAGE_URL);
        assert_eq!(google_url("Aap_uEA7", 800, 600, Some("")), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_empty_reference_yields_placeholder() {
        assert_eq!(google_url("", 800, 600, Some("k")), PLACEHOLDER_IMAGE_URL);
    }

    #[test]
    fn test_sizes_are_clamped() {
        let url = google_url("tok", 0, 10_000, Some("k"));
        assert!(url.contains("maxwidth=1&maxheight=4800"));
    }

    #[test]
    fn test_configured_endpoints_are_used() {
        let media = MediaEndpoints::new("http://127.0.0.1:9000/v1/", "http://127.0.0.1:9000/maps/api/place");

        let url = build_photo_url(&media, "places/ChIJ1/photos/P1", 400, 300, Some("k"));
        assert!(url.starts_with("http://127.0.0.1:9000/v1/places/ChIJ1/photos/P1/media?"));

        let url = build_photo_url(&media, "Aap_1", 400, 300, Some("k"));
        assert!(url.starts_with("http://127.0.0.1:9000/maps/api/place/photo?"));
    }
}
