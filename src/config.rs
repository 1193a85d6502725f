/// Service configuration loader - parses feeds.toml
///
/// Separates runtime tunables from code, making it easy to adjust the
/// poll interval, point the service at a mirror of either feed, or change
/// the region of interest without recompiling.

use serde::Deserialize;
use std::fs;

use crate::ingest::{gdacs, usgs};
use crate::region::{Region, INDIAN_OCEAN};
use crate::risk::TSUNAMI_MAGNITUDE_THRESHOLD;

const CONFIG_PATH: &str = "feeds.toml";

/// Runtime configuration loaded from feeds.toml. Every field has a
/// default, so an absent file yields a fully usable configuration and
/// library consumers never need one.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// How often the poll loop refreshes the snapshot.
    pub poll_interval_minutes: u64,

    /// Region of interest applied to every ingested feed.
    pub region: Region,

    /// Earthquakes at or above this magnitude derive a tsunami-risk point.
    pub tsunami_magnitude_threshold: f64,

    /// Cyclone feed URL (GDACS event list).
    pub gdacs_url: String,

    /// Earthquake feed URL (USGS GeoJSON summary).
    pub usgs_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            poll_interval_minutes: 15,
            region: INDIAN_OCEAN,
            tsunami_magnitude_threshold: TSUNAMI_MAGNITUDE_THRESHOLD,
            gdacs_url: gdacs::build_event_list_url(&["Green", "Orange", "Red"], 2024),
            usgs_url: usgs::build_feed_url(usgs::FEED_M45_MONTH),
        }
    }
}

/// Parses configuration from TOML text.
///
/// # Panics
/// Panics on malformed TOML or invalid values. This is intentional — a
/// present-but-broken configuration file means the operator's overrides
/// would be silently ignored, which is worse than refusing to start.
pub fn parse_config(contents: &str) -> ServiceConfig {
    toml::from_str(contents)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {}", CONFIG_PATH, e))
}

/// Loads configuration from feeds.toml in the current working directory,
/// falling back to built-in defaults when the file does not exist.
pub fn load_config() -> ServiceConfig {
    match fs::read_to_string(CONFIG_PATH) {
        Ok(contents) => parse_config(&contents),
        Err(_) => ServiceConfig::default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
