/// Test fixtures: representative JSON payloads from the GDACS and USGS
/// hazard feeds.
///
/// These fixtures are structurally complete but truncated to the minimum
/// needed to exercise the parsers.
///
/// GDACS event list envelopes seen in the wild (all three are modeled):
///   { "features": [ <record>, ... ] }
///   { "events":   [ <record>, ... ] }
///   [ <record>, ... ]
/// where a record's coordinates and event name may sit under `data.*`,
/// `properties.*`, or at the top level.
///
/// USGS GeoJSON summary shape:
///   response.features[]
///     .id                      — event id (string), carried over verbatim
///     .properties.mag          — magnitude, NULLABLE
///     .properties.place        — human-readable location, nullable
///     .properties.time         — epoch MILLISECONDS
///     .geometry.coordinates    — [lon, lat, depth_km]
///
/// Note the coordinate order: longitude first. Swapping the components puts
/// every event on the wrong continent while keeping the JSON well-formed.

/// Features-style GDACS envelope with coordinates nested under `data`.
/// Both storms are inside the Indian Ocean region.
#[cfg(test)]
pub(crate) fn fixture_gdacs_features_json() -> &'static str {
    r#"{
      "features": [
        {
          "data": {
            "lat": -18.2,
            "lon": 44.5,
            "eventname": "FREDDY-23",
            "fromdate": "2024-02-12T00:00:00Z"
          }
        },
        {
          "data": {
            "lat": -14.9,
            "lon": 63.0,
            "eventname": "BELAL-24",
            "fromdate": "2024-01-15T00:00:00Z"
          }
        }
      ]
    }"#
}

/// Events-style envelope with fields under `properties` instead of `data`.
#[cfg(test)]
pub(crate) fn fixture_gdacs_events_json() -> &'static str {
    r#"{
      "events": [
        {
          "properties": {
            "lat": 12.1,
            "lon": 90.3,
            "eventname": "MOCHA-24"
          },
          "fromdate": "2024-05-10T06:00:00Z"
        }
      ]
    }"#
}

/// Bare-array envelope with top-level coordinate fields and a `title`
/// where the nested shapes carry `eventname`.
#[cfg(test)]
pub(crate) fn fixture_gdacs_bare_array_json() -> &'static str {
    r#"[
      {
        "lat": 16.4,
        "lon": 88.0,
        "title": "Cyclone alert",
        "fromdate": "2024-05-20T12:00:00Z"
      }
    ]"#
}

/// Recognized envelope whose record carries no coordinates in any of the
/// known positions. The parser must fail the source rather than emit a
/// point at (0,0).
#[cfg(test)]
pub(crate) fn fixture_gdacs_missing_coordinates_json() -> &'static str {
    r#"{
      "features": [
        {
          "data": { "eventname": "GHOST-24", "fromdate": "2024-06-01T00:00:00Z" }
        }
      ]
    }"#
}

/// Two earthquakes: a strong one off Sumatra (inside the region, deriving
/// a tsunami-risk point) and a moderate one near Tokyo (outside).
/// 1714561200000 ms = 2024-05-01T11:00:00Z.
#[cfg(test)]
pub(crate) fn fixture_usgs_two_quakes_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "metadata": { "generated": 1714564800000, "title": "USGS Magnitude 4.5+ Earthquakes, Past Month" },
      "features": [
        {
          "type": "Feature",
          "id": "us7000abcd",
          "properties": {
            "mag": 7.2,
            "place": "120 km W of Sumatra, Indonesia",
            "time": 1714561200000,
            "tsunami": 1
          },
          "geometry": { "type": "Point", "coordinates": [94.1, 2.4, 26.3] }
        },
        {
          "type": "Feature",
          "id": "us7000wxyz",
          "properties": {
            "mag": 5.1,
            "place": "near the east coast of Honshu, Japan",
            "time": 1714561200000,
            "tsunami": 0
          },
          "geometry": { "type": "Point", "coordinates": [139.7, 35.7, 40.0] }
        }
      ]
    }"#
}

/// Single feature with a null magnitude and null place — both appear in
/// the live feed for preliminary solutions. Must parse, not default to 0.
#[cfg(test)]
pub(crate) fn fixture_usgs_null_magnitude_json() -> &'static str {
    r#"{
      "type": "FeatureCollection",
      "features": [
        {
          "type": "Feature",
          "id": "us7000null",
          "properties": { "mag": null, "place": null, "time": 1714561200000 },
          "geometry": { "type": "Point", "coordinates": [70.0, -10.0, 15.0] }
        }
      ]
    }"#
}
