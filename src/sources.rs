/// Upstream feed registry for the hazard aggregation service.
///
/// Defines the canonical list of feeds this service ingests, along with
/// their provenance tags and endpoint URLs. This is the single source of
/// truth for upstream endpoints — the ingest clients build their request
/// URLs from here rather than hardcoding hosts.

use crate::model::{HazardKind, SOURCE_GDACS, SOURCE_USGS};

// ---------------------------------------------------------------------------
// Feed endpoints (referenced by the ingest URL builders)
// ---------------------------------------------------------------------------

/// GDACS event list API. Query parameters select event type, alert levels,
/// and starting year; see `ingest::gdacs::build_event_list_url`.
pub const GDACS_EVENT_LIST_URL: &str =
    "https://www.gdacs.org/gdacsapi/api/events/geteventlist/JSON";

/// USGS real-time earthquake summary feeds. A feed name plus `.geojson`
/// selects the magnitude/window combination; see
/// `ingest::usgs::build_feed_url`.
pub const USGS_SUMMARY_BASE_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary";

// ---------------------------------------------------------------------------
// Feed metadata
// ---------------------------------------------------------------------------

/// Metadata for a single upstream hazard feed.
pub struct FeedSource {
    /// Short identifier used in logs and the health endpoint.
    pub id: &'static str,
    /// Human-readable feed name.
    pub name: &'static str,
    /// Hazard kind this feed contributes to the snapshot.
    pub kind: HazardKind,
    /// Provenance tag stamped on every point normalized from this feed.
    pub source_tag: &'static str,
    /// Endpoint the ingest client builds its request URLs from.
    pub base_url: &'static str,
}

/// All feeds the aggregator ingests. Tsunami points have no feed of their
/// own; they are derived from strong earthquakes (see `risk`).
pub static FEED_REGISTRY: &[FeedSource] = &[
    FeedSource {
        id: "gdacs-tc",
        name: "GDACS tropical cyclone event list",
        kind: HazardKind::Cyclone,
        source_tag: SOURCE_GDACS,
        base_url: GDACS_EVENT_LIST_URL,
    },
    FeedSource {
        id: "usgs-m45-month",
        name: "USGS M4.5+ earthquakes, past 30 days",
        kind: HazardKind::Earthquake,
        source_tag: SOURCE_USGS,
        base_url: USGS_SUMMARY_BASE_URL,
    },
];

/// Looks up a feed by id. Returns `None` if not found.
pub fn find_feed(id: &str) -> Option<&'static FeedSource> {
    FEED_REGISTRY.iter().find(|f| f.id == id)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_duplicate_feed_ids() {
        let mut seen = std::collections::HashSet::new();
        for feed in FEED_REGISTRY {
            assert!(
                seen.insert(feed.id),
                "duplicate feed id '{}' found in FEED_REGISTRY",
                feed.id
            );
        }
    }

    #[test]
    fn test_all_feed_urls_are_https() {
        // Both upstreams redirect plain HTTP; fetching over https directly
        // avoids a round trip and keeps the rustls-only client happy.
        for feed in FEED_REGISTRY {
            assert!(
                feed.base_url.starts_with("https://"),
                "feed '{}' should use https, got '{}'",
                feed.id,
                feed.base_url
            );
        }
    }

    #[test]
    fn test_registry_covers_both_ingested_kinds() {
        let kinds: Vec<_> = FEED_REGISTRY.iter().map(|f| f.kind).collect();
        assert!(kinds.contains(&HazardKind::Cyclone));
        assert!(kinds.contains(&HazardKind::Earthquake));
        assert!(
            !kinds.contains(&HazardKind::Tsunami),
            "tsunami points are derived, never ingested from a feed"
        );
    }

    #[test]
    fn test_provenance_tags_match_feed_hosts() {
        let gdacs = find_feed("gdacs-tc").expect("GDACS feed should be registered");
        assert_eq!(gdacs.source_tag, SOURCE_GDACS);
        assert!(gdacs.base_url.contains("gdacs.org"));

        let usgs = find_feed("usgs-m45-month").expect("USGS feed should be registered");
        assert_eq!(usgs.source_tag, SOURCE_USGS);
        assert!(usgs.base_url.contains("earthquake.usgs.gov"));
    }

    #[test]
    fn test_find_feed_returns_none_for_unknown_id() {
        assert!(find_feed("noaa-volcano").is_none());
    }
}
