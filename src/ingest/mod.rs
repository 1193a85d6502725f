/// Feed ingestion: one module per upstream source.
///
/// Each source module owns its URL construction and response parsing.
/// When another hazard source is added later (e.g. volcano advisories),
/// it gets its own file under ingest/ rather than bloating these.

pub mod gdacs;
pub mod usgs;

pub(crate) mod fixtures;

use crate::model::FeedError;

/// Fetches a URL and returns the response body as text. The body is handed
/// to the source-specific parser rather than deserialized here so that
/// parse failures carry the source's own error context.
///
/// No timeout is configured beyond reqwest's transport defaults; neither
/// feed request cancels the other.
pub fn fetch_text(client: &reqwest::blocking::Client, url: &str) -> Result<String, FeedError> {
    let response = client
        .get(url)
        .header("Accept", "application/json")
        .send()
        .map_err(|e| FeedError::Http(format!("request to {} failed: {}", url, e)))?;

    if !response.status().is_success() {
        return Err(FeedError::Http(format!(
            "{} returned status {}",
            url,
            response.status()
        )));
    }

    response
        .text()
        .map_err(|e| FeedError::Http(format!("reading body from {} failed: {}", url, e)))
}
