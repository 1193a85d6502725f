/// USGS earthquake feed client.
///
/// Handles URL selection and GeoJSON parsing for the USGS real-time
/// earthquake summary feeds:
///   https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/
///
/// Unlike the GDACS event list, this feed has one fixed shape: a GeoJSON
/// FeatureCollection whose features carry `[lon, lat, depth_km]` coordinate
/// triples and epoch-millisecond event times. See `fixtures.rs` for
/// annotated examples.

use crate::model::{FeedError, HazardKind, HazardPoint, SOURCE_USGS};
use crate::sources::USGS_SUMMARY_BASE_URL;
use chrono::{DateTime, SecondsFormat};
use serde::Deserialize;

/// Default feed: magnitude 4.5+ over the trailing 30 days.
pub const FEED_M45_MONTH: &str = "4.5_month";

// ---------------------------------------------------------------------------
// Serde structures for GeoJSON deserialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Deserialize)]
struct Feature {
    id: String,
    properties: FeatureProperties,
    geometry: Geometry,
}

#[derive(Deserialize)]
struct FeatureProperties {
    /// Nullable in the feed for some preliminary solutions.
    mag: Option<f64>,
    place: Option<String>,
    /// Epoch milliseconds, UTC.
    time: i64,
}

#[derive(Deserialize)]
struct Geometry {
    /// `[lon, lat, depth_km]` per the GeoJSON feed documentation.
    coordinates: Vec<f64>,
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a summary feed URL for the given feed name, e.g. `"4.5_month"`
/// or `"significant_week"`.
pub fn build_feed_url(feed: &str) -> String {
    format!("{}/{}.geojson", USGS_SUMMARY_BASE_URL, feed)
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a USGS GeoJSON summary response into earthquake `HazardPoint`s.
///
/// Feature ids are carried over verbatim. Event times arrive as epoch
/// milliseconds and are converted to ISO 8601 UTC. A null magnitude is
/// preserved as `None` rather than defaulted; downstream risk derivation
/// ignores such points.
///
/// # Errors
/// - `FeedError::Parse` — malformed JSON, a coordinate triple with fewer
///   than three components, or an out-of-range timestamp.
/// - `FeedError::NoData` — a valid FeatureCollection with zero features.
pub fn parse_feed(json: &str) -> Result<Vec<HazardPoint>, FeedError> {
    let collection: FeatureCollection = serde_json::from_str(json)
        .map_err(|e| FeedError::Parse(format!("GeoJSON deserialization failed: {}", e)))?;

    if collection.features.is_empty() {
        return Err(FeedError::NoData("no features in earthquake feed".to_string()));
    }

    let mut points = Vec::with_capacity(collection.features.len());

    for feature in collection.features {
        let coords = &feature.geometry.coordinates;
        if coords.len() < 3 {
            return Err(FeedError::Parse(format!(
                "feature {} has {} coordinate components, expected [lon, lat, depth]",
                feature.id,
                coords.len()
            )));
        }

        let date = DateTime::from_timestamp_millis(feature.properties.time)
            .ok_or_else(|| {
                FeedError::Parse(format!(
                    "feature {} has out-of-range time {}",
                    feature.id, feature.properties.time
                ))
            })?
            .to_rfc3339_opts(SecondsFormat::Millis, true);

        points.push(HazardPoint {
            id: feature.id,
            kind: HazardKind::Earthquake,
            lat: coords[1],
            lon: coords[0],
            title: feature
                .properties
                .place
                .unwrap_or_else(|| "Earthquake".to_string()),
            date,
            magnitude: feature.properties.mag,
            depth_km: Some(coords[2]),
            source: SOURCE_USGS.to_string(),
        });
    }

    Ok(points)
}

/// Fetches an earthquake summary feed and parses it into hazard points.
pub fn fetch_earthquakes(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<HazardPoint>, FeedError> {
    let body = super::fetch_text(client, url)?;
    parse_feed(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::fixtures::*;

    // --- URL construction ---------------------------------------------------

    #[test]
    fn test_build_feed_url_targets_summary_endpoint() {
        let url = build_feed_url(FEED_M45_MONTH);
        assert_eq!(
            url,
            "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/4.5_month.geojson"
        );
    }

    // --- Parsing: happy path ------------------------------------------------

    #[test]
    fn test_parse_feature_fields_map_onto_hazard_point() {
        let points = parse_feed(fixture_usgs_two_quakes_json())
            .expect("valid fixture should parse without error");

        let sumatra = points
            .iter()
            .find(|p| p.id == "us7000abcd")
            .expect("should find the Sumatra event");

        assert_eq!(sumatra.kind, HazardKind::Earthquake);
        assert_eq!(sumatra.title, "120 km W of Sumatra, Indonesia");
        assert!((sumatra.lat - 2.4).abs() < 1e-9, "lat is the second coordinate component");
        assert!((sumatra.lon - 94.1).abs() < 1e-9, "lon is the first coordinate component");
        assert_eq!(sumatra.depth_km, Some(26.3));
        assert_eq!(sumatra.magnitude, Some(7.2));
        assert_eq!(sumatra.source, "USGS");
    }

    #[test]
    fn test_parse_epoch_millis_become_iso_8601_utc() {
        let points = parse_feed(fixture_usgs_two_quakes_json()).expect("should parse");
        let sumatra = points.iter().find(|p| p.id == "us7000abcd").unwrap();
        // 1714561200000 ms = 2024-05-01T11:00:00Z
        assert_eq!(sumatra.date, "2024-05-01T11:00:00.000Z");
    }

    #[test]
    fn test_parse_null_magnitude_survives_as_none() {
        let points = parse_feed(fixture_usgs_null_magnitude_json())
            .expect("null magnitude should not break parsing");
        assert_eq!(points.len(), 1);
        assert!(points[0].magnitude.is_none());
    }

    #[test]
    fn test_parse_missing_place_defaults_title() {
        let points = parse_feed(fixture_usgs_null_magnitude_json()).expect("should parse");
        assert_eq!(points[0].title, "Earthquake");
    }

    // --- Parsing: error and edge cases --------------------------------------

    #[test]
    fn test_parse_malformed_json_returns_parse_error() {
        let result = parse_feed("{ not geojson ]");
        assert!(matches!(result, Err(FeedError::Parse(_))));
    }

    #[test]
    fn test_parse_empty_feature_collection_returns_no_data() {
        let result = parse_feed(r#"{ "type": "FeatureCollection", "features": [] }"#);
        assert!(
            matches!(result, Err(FeedError::NoData(_))),
            "zero features should yield NoData, got {:?}",
            result
        );
    }

    #[test]
    fn test_parse_short_coordinate_triple_returns_parse_error() {
        let json = r#"{
          "features": [{
            "id": "us9999",
            "properties": { "mag": 5.0, "place": "somewhere", "time": 1714561200000 },
            "geometry": { "type": "Point", "coordinates": [94.1, 2.4] }
          }]
        }"#;
        let result = parse_feed(json);
        match result {
            Err(FeedError::Parse(msg)) => {
                assert!(msg.contains("us9999"), "error should identify the feature: {}", msg)
            }
            other => panic!("expected Parse error for short coordinates, got {:?}", other),
        }
    }
}
