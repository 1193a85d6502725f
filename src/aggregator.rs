/// Core aggregation flow for the hazard service.
///
/// One `refresh()` runs the whole pipeline:
/// 1. Fetch both upstream feeds concurrently on a thread pool
/// 2. Normalize each source's records into `HazardPoint`s
/// 3. Subset each list to the region of interest
/// 4. Derive tsunami-risk points from the filtered earthquakes
/// 5. Concatenate cyclone + earthquake + tsunami lists
/// 6. Substitute the fixed fallback point if nothing survived
///
/// A failed feed contributes an empty list rather than aborting the
/// refresh; partial data is preferred over no data. Only losing both
/// worker results entirely surfaces an error to the caller.

use crate::config::ServiceConfig;
use crate::ingest::{gdacs, usgs};
use crate::model::{FeedError, HazardKind, HazardPoint, SOURCE_DEMO};
use crate::region::{bounds_of, Region};
use crate::risk;
use chrono::Utc;
use serde::Serialize;
use std::error::Error;
use std::sync::mpsc;
use std::sync::{Arc, RwLock};
use threadpool::ThreadPool;

/// Viewport padding applied to snapshot bounds, as a fraction of the span
/// per side.
const BOUNDS_PAD: f64 = 0.2;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One refresh result as published to consumers. Each refresh overwrites
/// the previous snapshot wholesale; there is no merging and no history.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// When this snapshot was produced, ISO 8601 UTC.
    pub generated_at: String,
    pub count: usize,
    /// Padded bounding box of the points, as a viewport hint for callers.
    /// Absent only if the point list is empty (which the fallback prevents
    /// in practice).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Region>,
    pub hazards: Vec<HazardPoint>,
}

impl Snapshot {
    pub fn from_points(hazards: Vec<HazardPoint>) -> Self {
        Snapshot {
            generated_at: Utc::now().to_rfc3339(),
            count: hazards.len(),
            bounds: bounds_of(&hazards).map(|b| b.padded(BOUNDS_PAD)),
            hazards,
        }
    }

    /// A view of this snapshot restricted to one hazard kind, with count
    /// and viewport bounds recomputed for the subset. The generation
    /// timestamp is kept: filtering does not re-fetch anything.
    pub fn filter_kind(&self, kind: HazardKind) -> Snapshot {
        let hazards = filter_by_kind(&self.hazards, &[kind]);
        Snapshot {
            generated_at: self.generated_at.clone(),
            count: hazards.len(),
            bounds: bounds_of(&hazards).map(|b| b.padded(BOUNDS_PAD)),
            hazards,
        }
    }
}

/// Latest snapshot shared between the poll loop and the HTTP endpoint.
/// `None` until the first refresh completes.
pub type SharedSnapshot = Arc<RwLock<Option<Snapshot>>>;

/// Selects the points whose kind is in `enabled`. Order is preserved.
pub fn filter_by_kind(points: &[HazardPoint], enabled: &[HazardKind]) -> Vec<HazardPoint> {
    points
        .iter()
        .filter(|p| enabled.contains(&p.kind))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

pub struct Aggregator {
    config: ServiceConfig,
    client: reqwest::blocking::Client,
    /// Sized to the number of upstream feeds; both fetches run in parallel
    /// and neither cancels the other.
    pool: ThreadPool,
}

impl Aggregator {
    /// Create an aggregator with default configuration.
    pub fn new() -> Self {
        Self::with_config(ServiceConfig::default())
    }

    /// Create an aggregator with custom configuration.
    pub fn with_config(config: ServiceConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
            pool: ThreadPool::new(2),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Runs one full aggregation pass and returns the final point list.
    ///
    /// Blocks until both feed fetches settle. Per-source failures are
    /// logged and contribute an empty list; the fallback point guarantees
    /// a non-empty result. The only error case is losing both worker
    /// results (a panic in the fetch workers), reported as a single
    /// generic failure.
    pub fn refresh(&self) -> Result<Vec<HazardPoint>, Box<dyn Error>> {
        let (tx, rx) = mpsc::channel();

        let cyclone_tx = tx.clone();
        let cyclone_client = self.client.clone();
        let cyclone_url = self.config.gdacs_url.clone();
        self.pool.execute(move || {
            let result = gdacs::fetch_cyclones(&cyclone_client, &cyclone_url);
            let _ = cyclone_tx.send((HazardKind::Cyclone, result));
        });

        let quake_tx = tx.clone();
        let quake_client = self.client.clone();
        let quake_url = self.config.usgs_url.clone();
        self.pool.execute(move || {
            let result = usgs::fetch_earthquakes(&quake_client, &quake_url);
            let _ = quake_tx.send((HazardKind::Earthquake, result));
        });

        // Drop the original sender so the receiver ends once both workers
        // have reported (or died).
        drop(tx);

        let mut cyclones = Vec::new();
        let mut quakes = Vec::new();
        let mut settled = 0;

        for (kind, result) in rx {
            settled += 1;
            match result {
                Ok(points) => match kind {
                    HazardKind::Cyclone => cyclones = points,
                    HazardKind::Earthquake => quakes = points,
                    HazardKind::Tsunami => unreachable!("no tsunami feed worker"),
                },
                Err(e) => report_feed_failure(kind, &e),
            }
        }

        if settled < 2 {
            // A worker died without reporting; treat the refresh as a whole
            // as unavailable rather than publishing a half-fetched list.
            return Err("hazard feeds unavailable".into());
        }

        Ok(self.combine(cyclones, quakes))
    }

    /// The pure tail of the pipeline: region filter, tsunami derivation,
    /// concatenation, fallback substitution. Separated from the fetch stage
    /// so it can be exercised directly against fixture data.
    pub fn combine(
        &self,
        cyclones: Vec<HazardPoint>,
        quakes: Vec<HazardPoint>,
    ) -> Vec<HazardPoint> {
        let region = self.config.region;

        let mut combined: Vec<HazardPoint> = cyclones
            .into_iter()
            .filter(|p| region.contains(p.lat, p.lon))
            .collect();

        let quakes: Vec<HazardPoint> = quakes
            .into_iter()
            .filter(|p| region.contains(p.lat, p.lon))
            .collect();

        let tsunamis =
            risk::derive_tsunami_points(&quakes, self.config.tsunami_magnitude_threshold);

        combined.extend(quakes);
        combined.extend(tsunamis);

        if combined.is_empty() {
            combined.push(fallback_point());
        }

        combined
    }

    /// Main poll loop: refresh on a fixed interval and publish each result
    /// into the shared snapshot. Refresh failures are logged and the loop
    /// continues; the previous snapshot stays visible until a refresh
    /// succeeds.
    pub fn run(&self, shared: SharedSnapshot) -> Result<(), Box<dyn Error>> {
        println!("🔄 Starting aggregation loop...");
        println!("   Poll interval: {} minutes", self.config.poll_interval_minutes);

        loop {
            let start = Utc::now();

            match self.refresh() {
                Ok(points) => {
                    println!("✓ Refresh complete: {} hazard points", points.len());
                    publish(&shared, Snapshot::from_points(points));
                }
                Err(e) => {
                    eprintln!("✗ Refresh error: {}", e);
                }
            }

            let elapsed = (Utc::now() - start).num_seconds();
            let sleep_seconds = (self.config.poll_interval_minutes * 60) as i64 - elapsed;

            if sleep_seconds > 0 {
                std::thread::sleep(std::time::Duration::from_secs(sleep_seconds as u64));
            }
        }
    }
}

/// Overwrites the shared snapshot. A poisoned lock is reported rather than
/// propagated; the loop keeps running on the previous snapshot.
fn publish(shared: &SharedSnapshot, snapshot: Snapshot) {
    match shared.write() {
        Ok(mut guard) => *guard = Some(snapshot),
        Err(e) => eprintln!("✗ Failed to publish snapshot: {}", e),
    }
}

fn report_feed_failure(kind: HazardKind, error: &FeedError) {
    match error {
        FeedError::NoData(msg) => println!("   {} feed: no records ({})", kind, msg),
        other => eprintln!("   ✗ {} feed failed: {}", kind, other),
    }
}

/// The fixed fallback point substituted when all live sources yield
/// nothing, so consumers never see an empty snapshot on total feed failure.
fn fallback_point() -> HazardPoint {
    HazardPoint {
        id: "demo-1".to_string(),
        kind: HazardKind::Earthquake,
        lat: 10.5,
        lon: 75.0,
        title: "Demo Event (no live alerts)".to_string(),
        date: Utc::now().to_rfc3339(),
        magnitude: Some(5.2),
        depth_km: Some(10.0),
        source: SOURCE_DEMO.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
