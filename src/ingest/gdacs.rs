/// GDACS tropical cyclone event list client.
///
/// Handles URL construction and JSON parsing for the GDACS event list API:
///   https://www.gdacs.org/gdacsapi/api/events/geteventlist/JSON
///
/// The feed's envelope has appeared in three forms over time: an object
/// with a `features` array, an object with an `events` array, or a bare
/// array of records. Within a record, coordinates and the event name may
/// sit under `data.*`, under `properties.*`, or at the top level, in that
/// precedence. All known forms are modeled explicitly below; anything else
/// is a parse failure for the whole source rather than a silently-defaulted
/// point. See `fixtures.rs` for representative payloads.

use crate::model::{FeedError, HazardKind, HazardPoint, SOURCE_GDACS};
use crate::sources::GDACS_EVENT_LIST_URL;
use chrono::Utc;
use serde::Deserialize;

/// Fallback title when a record carries no event name anywhere.
const DEFAULT_TITLE: &str = "Tropical Cyclone";

// ---------------------------------------------------------------------------
// Serde structures for the event list envelope
// ---------------------------------------------------------------------------

/// The three envelope shapes the feed is known to return. `untagged` makes
/// serde try each in order; an envelope matching none of them fails the
/// whole parse, which the aggregator surfaces as a per-source failure.
#[derive(Deserialize)]
#[serde(untagged)]
enum EventList {
    Features { features: Vec<CycloneRecord> },
    Events { events: Vec<CycloneRecord> },
    Bare(Vec<CycloneRecord>),
}

impl EventList {
    fn into_records(self) -> Vec<CycloneRecord> {
        match self {
            EventList::Features { features } => features,
            EventList::Events { events } => events,
            EventList::Bare(records) => records,
        }
    }
}

#[derive(Deserialize)]
struct CycloneRecord {
    data: Option<RecordGroup>,
    properties: Option<RecordGroup>,
    lat: Option<f64>,
    lon: Option<f64>,
    title: Option<String>,
    fromdate: Option<String>,
}

/// Nested field group as it appears under `data` or `properties`.
#[derive(Deserialize)]
struct RecordGroup {
    lat: Option<f64>,
    lon: Option<f64>,
    eventname: Option<String>,
    fromdate: Option<String>,
}

impl CycloneRecord {
    /// Resolves a coordinate with the documented precedence:
    /// `data.*`, then `properties.*`, then top level.
    fn resolve_lat(&self) -> Option<f64> {
        self.data
            .as_ref()
            .and_then(|g| g.lat)
            .or_else(|| self.properties.as_ref().and_then(|g| g.lat))
            .or(self.lat)
    }

    fn resolve_lon(&self) -> Option<f64> {
        self.data
            .as_ref()
            .and_then(|g| g.lon)
            .or_else(|| self.properties.as_ref().and_then(|g| g.lon))
            .or(self.lon)
    }

    fn resolve_title(&self) -> String {
        self.data
            .as_ref()
            .and_then(|g| g.eventname.clone())
            .or_else(|| self.properties.as_ref().and_then(|g| g.eventname.clone()))
            .or_else(|| self.title.clone())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string())
    }

    fn resolve_date(&self) -> String {
        self.data
            .as_ref()
            .and_then(|g| g.fromdate.clone())
            .or_else(|| self.fromdate.clone())
            .unwrap_or_else(|| Utc::now().to_rfc3339())
    }
}

// ---------------------------------------------------------------------------
// URL construction
// ---------------------------------------------------------------------------

/// Builds a GDACS event list URL for tropical cyclones at the given alert
/// levels from a starting year onward. Alert levels are joined and
/// URL-encoded as a single comma-separated parameter.
pub fn build_event_list_url(alert_levels: &[&str], from_year: i32) -> String {
    let levels = alert_levels.join(",");
    format!(
        "{}?eventtype=TC&alertlevel={}&fromyear={}",
        GDACS_EVENT_LIST_URL,
        urlencoding::encode(&levels),
        from_year
    )
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Parses a GDACS event list response into cyclone `HazardPoint`s.
///
/// Ids are derived deterministically from the record's index and resolved
/// coordinates (`cyc-{index}-{lat}-{lon}`), so a re-fetch of the same feed
/// yields the same ids.
///
/// # Errors
/// - `FeedError::Parse` — unrecognized envelope, or a record that carries
///   no coordinate group anywhere. A record without coordinates cannot be
///   placed on the map and is treated as a malformed feed, not as a point
///   at (0,0).
/// - `FeedError::NoData` — recognized envelope with zero records.
pub fn parse_event_list(json: &str) -> Result<Vec<HazardPoint>, FeedError> {
    let envelope: EventList = serde_json::from_str(json)
        .map_err(|e| FeedError::Parse(format!("unrecognized GDACS envelope: {}", e)))?;

    let records = envelope.into_records();
    if records.is_empty() {
        return Err(FeedError::NoData("GDACS event list is empty".to_string()));
    }

    let mut points = Vec::with_capacity(records.len());

    for (i, record) in records.iter().enumerate() {
        let lat = record.resolve_lat().ok_or_else(|| {
            FeedError::Parse(format!("GDACS record {} has no latitude in any known position", i))
        })?;
        let lon = record.resolve_lon().ok_or_else(|| {
            FeedError::Parse(format!("GDACS record {} has no longitude in any known position", i))
        })?;

        points.push(HazardPoint {
            id: format!("cyc-{}-{}-{}", i, lat, lon),
            kind: HazardKind::Cyclone,
            lat,
            lon,
            title: record.resolve_title(),
            date: record.resolve_date(),
            magnitude: None,
            depth_km: None,
            source: SOURCE_GDACS.to_string(),
        });
    }

    Ok(points)
}

/// Fetches the cyclone event list and parses it into hazard points.
pub fn fetch_cyclones(
    client: &reqwest::blocking::Client,
    url: &str,
) -> Result<Vec<HazardPoint>, FeedError> {
    let body = super::fetch_text(client, url)?;
    parse_event_list(&body)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
