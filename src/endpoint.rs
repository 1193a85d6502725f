/// HTTP endpoint serving the current hazard snapshot
///
/// Provides a simple read-only API for view layers (map dashboards,
/// monitoring scripts) to consume the aggregated hazard list.
///
/// Endpoints:
/// - GET /hazards - Returns the full current snapshot
/// - GET /hazards/{kind} - Returns the snapshot subset for one hazard kind
/// - GET /health - Service health check
///
/// The endpoint never triggers a refresh itself; it serves whatever the
/// aggregation loop last published.

use crate::aggregator::{SharedSnapshot, Snapshot};
use crate::model::HazardKind;
use crate::sources::FEED_REGISTRY;

// ---------------------------------------------------------------------------
// Request Handling
// ---------------------------------------------------------------------------

/// Routes a request path to a response. Split from the server loop so the
/// routing logic is testable without sockets.
pub fn route(shared: &SharedSnapshot, url: &str) -> (u16, serde_json::Value) {
    if url == "/health" {
        return handle_health();
    }
    if url == "/hazards" {
        return handle_hazards(shared, None);
    }
    if let Some(kind_str) = url.strip_prefix("/hazards/") {
        return match HazardKind::from_str(kind_str) {
            Some(kind) => handle_hazards(shared, Some(kind)),
            None => (
                404,
                serde_json::json!({
                    "error": format!("unknown hazard kind '{}'", kind_str),
                    "known_kinds": ["cyclone", "earthquake", "tsunami"]
                }),
            ),
        };
    }

    (
        404,
        serde_json::json!({
            "error": "Not found",
            "available_endpoints": ["/health", "/hazards", "/hazards/{kind}"]
        }),
    )
}

/// Handle /health endpoint
fn handle_health() -> (u16, serde_json::Value) {
    let feeds: Vec<serde_json::Value> = FEED_REGISTRY
        .iter()
        .map(|f| {
            serde_json::json!({
                "id": f.id,
                "name": f.name,
                "kind": f.kind,
                "source": f.source_tag
            })
        })
        .collect();

    (
        200,
        serde_json::json!({
            "status": "ok",
            "service": "hazmon_service",
            "version": "0.1.0",
            "feeds": feeds
        }),
    )
}

/// Handle /hazards and /hazards/{kind}
fn handle_hazards(shared: &SharedSnapshot, kind: Option<HazardKind>) -> (u16, serde_json::Value) {
    let guard = match shared.read() {
        Ok(guard) => guard,
        Err(e) => {
            return (
                500,
                serde_json::json!({ "error": format!("snapshot unavailable: {}", e) }),
            )
        }
    };

    let snapshot: &Snapshot = match guard.as_ref() {
        Some(snapshot) => snapshot,
        None => {
            // First refresh has not completed yet.
            return (
                503,
                serde_json::json!({ "error": "no snapshot yet, try again shortly" }),
            );
        }
    };

    let body = match kind {
        Some(kind) => serde_json::to_value(snapshot.filter_kind(kind)),
        None => serde_json::to_value(snapshot),
    };

    match body {
        Ok(json) => (200, json),
        Err(e) => (
            500,
            serde_json::json!({ "error": format!("serialization failed: {}", e) }),
        ),
    }
}

// ---------------------------------------------------------------------------
// HTTP Server
// ---------------------------------------------------------------------------

/// Start the HTTP endpoint server on the specified port. Blocks serving
/// requests; run it on its own thread.
pub fn start_endpoint_server(port: u16, shared: SharedSnapshot) -> Result<(), String> {
    let server = tiny_http::Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| format!("Failed to start HTTP server: {}", e))?;

    println!("📡 HTTP endpoint listening on http://0.0.0.0:{}", port);
    println!("   GET /hazards - Current hazard snapshot");
    println!("   GET /hazards/{{kind}} - Subset by hazard kind");
    println!("   GET /health - Service health check\n");

    for request in server.incoming_requests() {
        let (status, json) = route(&shared, request.url());

        if let Err(e) = request.respond(create_response(status, json)) {
            eprintln!("Failed to send response: {}", e);
        }
    }

    Ok(())
}

/// Create HTTP response with JSON body
fn create_response(status_code: u16, json: serde_json::Value) -> tiny_http::Response<std::io::Cursor<Vec<u8>>> {
    let body = serde_json::to_string_pretty(&json).unwrap_or_else(|_| "{}".to_string());
    let bytes = body.into_bytes();

    tiny_http::Response::from_data(bytes)
        .with_status_code(tiny_http::StatusCode::from(status_code))
        .with_header(
            tiny_http::Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("static header is valid"),
        )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HazardPoint, SOURCE_USGS};
    use std::sync::{Arc, RwLock};

    fn shared_with_points(points: Vec<HazardPoint>) -> SharedSnapshot {
        Arc::new(RwLock::new(Some(Snapshot::from_points(points))))
    }

    fn quake(id: &str, magnitude: f64) -> HazardPoint {
        HazardPoint {
            id: id.to_string(),
            kind: HazardKind::Earthquake,
            lat: 2.4,
            lon: 94.1,
            title: "quake".to_string(),
            date: "2024-05-01T11:00:00Z".to_string(),
            magnitude: Some(magnitude),
            depth_km: Some(20.0),
            source: SOURCE_USGS.to_string(),
        }
    }

    #[test]
    fn test_health_reports_service_identity_and_registered_feeds() {
        let shared = Arc::new(RwLock::new(None));
        let (status, json) = route(&shared, "/health");
        assert_eq!(status, 200);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["service"], "hazmon_service");

        let feeds = json["feeds"].as_array().expect("health lists registered feeds");
        assert_eq!(feeds.len(), 2);
        assert!(feeds.iter().any(|f| f["id"] == "gdacs-tc"));
        assert!(feeds.iter().any(|f| f["kind"] == "earthquake"));
    }

    #[test]
    fn test_hazards_before_first_refresh_is_503() {
        let shared = Arc::new(RwLock::new(None));
        let (status, json) = route(&shared, "/hazards");
        assert_eq!(status, 503);
        assert!(json["error"].as_str().unwrap().contains("no snapshot"));
    }

    #[test]
    fn test_hazards_returns_published_snapshot() {
        let shared = shared_with_points(vec![quake("q1", 5.0), quake("q2", 6.0)]);
        let (status, json) = route(&shared, "/hazards");
        assert_eq!(status, 200);
        assert_eq!(json["count"], 2);
        assert_eq!(json["hazards"].as_array().unwrap().len(), 2);
        assert!(json["bounds"].is_object(), "snapshot should carry viewport bounds");
    }

    #[test]
    fn test_hazards_kind_subset_is_filtered() {
        let mut cyclone = quake("c1", 0.0);
        cyclone.kind = HazardKind::Cyclone;
        cyclone.magnitude = None;
        cyclone.depth_km = None;
        let shared = shared_with_points(vec![cyclone, quake("q1", 5.0)]);

        let (status, json) = route(&shared, "/hazards/earthquake");
        assert_eq!(status, 200);
        assert_eq!(json["count"], 1);
        assert_eq!(json["hazards"][0]["id"], "q1");
    }

    #[test]
    fn test_unknown_hazard_kind_is_404_with_known_kinds() {
        let shared = shared_with_points(vec![quake("q1", 5.0)]);
        let (status, json) = route(&shared, "/hazards/volcano");
        assert_eq!(status, 404);
        assert!(json["known_kinds"].is_array());
    }

    #[test]
    fn test_unknown_path_is_404_listing_endpoints() {
        let shared = Arc::new(RwLock::new(None));
        let (status, json) = route(&shared, "/nope");
        assert_eq!(status, 404);
        assert!(json["available_endpoints"].is_array());
    }
}
