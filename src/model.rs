/// Shared data types for the hazard aggregation service.
///
/// `HazardPoint` is the single domain entity: one geolocated event as shown
/// to consumers of the snapshot. Points are created fresh on every refresh
/// and never persisted.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Hazard classification
// ---------------------------------------------------------------------------

/// Hazard classification. Tsunami points are never ingested directly; they
/// are derived from strong earthquakes (see `risk`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardKind {
    Cyclone,
    Earthquake,
    Tsunami,
}

impl HazardKind {
    /// Lowercase form used in JSON output and endpoint paths.
    pub fn as_str(&self) -> &'static str {
        match self {
            HazardKind::Cyclone => "cyclone",
            HazardKind::Earthquake => "earthquake",
            HazardKind::Tsunami => "tsunami",
        }
    }

    /// Parses the lowercase form. Returns `None` for anything else.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cyclone" => Some(HazardKind::Cyclone),
            "earthquake" => Some(HazardKind::Earthquake),
            "tsunami" => Some(HazardKind::Tsunami),
            _ => None,
        }
    }
}

impl fmt::Display for HazardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Provenance tags
// ---------------------------------------------------------------------------

pub const SOURCE_GDACS: &str = "GDACS";
pub const SOURCE_USGS: &str = "USGS";
pub const SOURCE_DEMO: &str = "Demo";

// ---------------------------------------------------------------------------
// Hazard point
// ---------------------------------------------------------------------------

/// A single geolocated hazard event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HazardPoint {
    /// Unique per point. Cyclone ids are derived from source index and
    /// coordinates, earthquake ids are taken verbatim from the feed, and
    /// derived tsunami ids carry a `tsu-` prefix.
    pub id: String,
    pub kind: HazardKind,
    /// WGS84 latitude, degrees.
    pub lat: f64,
    /// WGS84 longitude, degrees.
    pub lon: f64,
    /// Human label.
    pub title: String,
    /// Event time, ISO 8601.
    pub date: String,
    /// Present only for earthquake and tsunami points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub magnitude: Option<f64>,
    /// Present only for earthquake and tsunami points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_km: Option<f64>,
    /// Provenance tag: "GDACS", "USGS", or "Demo".
    pub source: String,
}

// ---------------------------------------------------------------------------
// Feed errors
// ---------------------------------------------------------------------------

/// Failure of a single upstream feed. Per-source failures are recovered
/// locally by the aggregator (empty contribution); only a failure of the
/// whole refresh flow is surfaced to the caller.
#[derive(Debug)]
pub enum FeedError {
    /// Transport-level failure or non-success HTTP status.
    Http(String),
    /// Malformed or unexpected response structure.
    Parse(String),
    /// Structurally valid response that carried no usable records.
    NoData(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Http(msg) => write!(f, "feed HTTP error: {}", msg),
            FeedError::Parse(msg) => write!(f, "feed parse error: {}", msg),
            FeedError::NoData(msg) => write!(f, "feed returned no data: {}", msg),
        }
    }
}

impl std::error::Error for FeedError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_lowercase_form() {
        for kind in [HazardKind::Cyclone, HazardKind::Earthquake, HazardKind::Tsunami] {
            assert_eq!(HazardKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn test_kind_rejects_unknown_and_mixed_case() {
        assert_eq!(HazardKind::from_str("Cyclone"), None);
        assert_eq!(HazardKind::from_str("volcano"), None);
        assert_eq!(HazardKind::from_str(""), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&HazardKind::Earthquake).unwrap();
        assert_eq!(json, "\"earthquake\"");
    }

    #[test]
    fn test_optional_fields_omitted_from_json_when_absent() {
        let point = HazardPoint {
            id: "cyc-0-10-80".to_string(),
            kind: HazardKind::Cyclone,
            lat: 10.0,
            lon: 80.0,
            title: "Tropical Cyclone".to_string(),
            date: "2024-05-01T12:00:00Z".to_string(),
            magnitude: None,
            depth_km: None,
            source: SOURCE_GDACS.to_string(),
        };
        let json = serde_json::to_string(&point).unwrap();
        assert!(!json.contains("magnitude"), "absent magnitude should be omitted");
        assert!(!json.contains("depth_km"), "absent depth should be omitted");
    }

    #[test]
    fn test_feed_error_messages_identify_the_failure_class() {
        let http = FeedError::Http("status 503".to_string());
        let parse = FeedError::Parse("bad envelope".to_string());
        assert!(http.to_string().contains("HTTP"));
        assert!(parse.to_string().contains("parse"));
    }
}
