//! Hazard Aggregation Service - Main Loop
//!
//! A small service that continuously:
//! 1. Fetches tropical cyclone and earthquake data from GDACS and USGS
//! 2. Normalizes both feeds into a single hazard point shape
//! 3. Subsets the points to the Indian Ocean region of interest
//! 4. Derives tsunami-risk points from strong earthquakes
//! 5. Publishes the combined snapshot over an HTTP endpoint
//!
//! Rendering (map markers, alert lists) is handled by whatever view layer
//! consumes the endpoint; this process only aggregates.
//!
//! Usage:
//!   cargo run --release                    # Poll loop without HTTP endpoint
//!   cargo run --release -- --endpoint 8080 # Poll loop + endpoint on port 8080
//!   cargo run --release -- --once          # One refresh, JSON to stdout, exit
//!
//! Configuration is read from feeds.toml in the working directory when
//! present; built-in defaults are used otherwise.

use hazmon_service::aggregator::{Aggregator, Snapshot};
use hazmon_service::config;
use hazmon_service::endpoint;
use std::env;
use std::sync::{Arc, RwLock};

fn main() {
    println!("🌊 Hazard Aggregation Service");
    println!("=============================\n");

    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();
    let mut endpoint_port: Option<u16> = None;
    let mut run_once = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--endpoint" => {
                if i + 1 < args.len() {
                    endpoint_port = args[i + 1].parse().ok();
                    i += 2;
                } else {
                    eprintln!("Error: --endpoint requires a port number");
                    std::process::exit(1);
                }
            }
            "--once" => {
                run_once = true;
                i += 1;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                eprintln!("Usage: {} [--endpoint PORT] [--once]", args[0]);
                std::process::exit(1);
            }
        }
    }

    // Load configuration (feeds.toml or defaults)
    println!("📊 Loading configuration...");
    let service_config = config::load_config();
    println!("   Cyclone feed: {}", service_config.gdacs_url);
    println!("   Earthquake feed: {}", service_config.usgs_url);
    println!(
        "   Region: lat [{}, {}], lon [{}, {}]\n",
        service_config.region.min_lat,
        service_config.region.max_lat,
        service_config.region.min_lon,
        service_config.region.max_lon
    );

    let aggregator = Aggregator::with_config(service_config);

    // Single-shot mode: refresh once, print the snapshot, exit
    if run_once {
        match aggregator.refresh() {
            Ok(points) => {
                let snapshot = Snapshot::from_points(points);
                match serde_json::to_string_pretty(&snapshot) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        eprintln!("❌ Failed to serialize snapshot: {}", e);
                        std::process::exit(1);
                    }
                }
            }
            Err(e) => {
                eprintln!("❌ Refresh failed: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    // Shared snapshot between the poll loop and the endpoint
    let shared = Arc::new(RwLock::new(None));

    // Start HTTP endpoint if requested (in background thread)
    if let Some(port) = endpoint_port {
        println!("🚀 Starting HTTP endpoint server...");
        let endpoint_shared = Arc::clone(&shared);
        std::thread::spawn(move || {
            if let Err(e) = endpoint::start_endpoint_server(port, endpoint_shared) {
                eprintln!("❌ Endpoint server error: {}", e);
            }
        });
        println!("   Endpoint running on http://0.0.0.0:{}\n", port);
    }

    // Run the main aggregation loop
    println!("   Press Ctrl+C to stop\n");
    if let Err(e) = aggregator.run(shared) {
        eprintln!("\n❌ Aggregation loop error: {}", e);
        std::process::exit(1);
    }
}
