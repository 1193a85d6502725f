/// hazmon_service: Indian Ocean hazard aggregation service.
///
/// # Module structure
///
/// ```text
/// hazmon_service
/// ├── model       — shared data types (HazardPoint, HazardKind, FeedError)
/// ├── region      — region-of-interest bounding box and viewport helpers
/// ├── sources     — upstream feed registry (endpoints, provenance tags)
/// ├── config      — runtime tunables loader (feeds.toml)
/// ├── ingest
/// │   ├── gdacs   — GDACS cyclone event list: URL construction + JSON parsing
/// │   ├── usgs    — USGS earthquake GeoJSON feed client
/// │   └── fixtures (test only) — representative feed response payloads
/// ├── risk        — tsunami-risk derivation from strong earthquakes
/// ├── aggregator  — fetch → normalize → filter → derive → fallback pipeline,
/// │                 snapshot publication, poll loop
/// └── endpoint    — HTTP API serving the current snapshot
/// ```

/// Public modules
pub mod aggregator;
pub mod config;
pub mod endpoint;
pub mod ingest;
pub mod model;
pub mod region;
pub mod risk;
pub mod sources;
