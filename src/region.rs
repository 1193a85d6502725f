/// Region of interest: the fixed latitude/longitude bounding box used to
/// subset global hazard feeds to the Indian Ocean area.
///
/// The predicate is pure and total; both bounds are inclusive. Every point
/// retained by the aggregator satisfies `INDIAN_OCEAN.contains(lat, lon)`.

use crate::model::HazardPoint;
use serde::{Deserialize, Serialize};

/// An axis-aligned latitude/longitude bounding box, degrees WGS84.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// The Indian Ocean subset applied to all ingested feeds.
pub const INDIAN_OCEAN: Region = Region {
    min_lat: -45.0,
    max_lat: 30.0,
    min_lon: 20.0,
    max_lon: 120.0,
};

impl Region {
    /// True iff the coordinate lies inside the box, boundaries included.
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lon >= self.min_lon && lon <= self.max_lon
    }

    /// Expands the box by `frac` of its span on every side, for use as a
    /// viewport hint. The result is not clamped to valid WGS84 ranges;
    /// consumers fitting a map view handle wrap-around themselves.
    pub fn padded(&self, frac: f64) -> Region {
        let lat_pad = (self.max_lat - self.min_lat) * frac;
        let lon_pad = (self.max_lon - self.min_lon) * frac;
        Region {
            min_lat: self.min_lat - lat_pad,
            max_lat: self.max_lat + lat_pad,
            min_lon: self.min_lon - lon_pad,
            max_lon: self.max_lon + lon_pad,
        }
    }
}

/// Tight bounding box of a point set, or `None` for an empty set.
/// Used by the endpoint to report a viewport-fitting box alongside the
/// snapshot; fitting the view is the caller's reaction, not ours.
pub fn bounds_of(points: &[HazardPoint]) -> Option<Region> {
    let first = points.first()?;
    let mut bounds = Region {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lon: first.lon,
        max_lon: first.lon,
    };
    for p in &points[1..] {
        bounds.min_lat = bounds.min_lat.min(p.lat);
        bounds.max_lat = bounds.max_lat.max(p.lat);
        bounds.min_lon = bounds.min_lon.min(p.lon);
        bounds.max_lon = bounds.max_lon.max(p.lon);
    }
    Some(bounds)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HazardKind, SOURCE_USGS};

    fn point(lat: f64, lon: f64) -> HazardPoint {
        HazardPoint {
            id: format!("q-{}-{}", lat, lon),
            kind: HazardKind::Earthquake,
            lat,
            lon,
            title: "test".to_string(),
            date: "2024-05-01T12:00:00Z".to_string(),
            magnitude: Some(5.0),
            depth_km: Some(10.0),
            source: SOURCE_USGS.to_string(),
        }
    }

    #[test]
    fn test_contains_accepts_interior_point() {
        assert!(INDIAN_OCEAN.contains(10.5, 75.0), "central Indian Ocean must be inside");
    }

    #[test]
    fn test_contains_boundaries_are_inclusive() {
        assert!(INDIAN_OCEAN.contains(-45.0, 75.0), "lat=-45 is on the boundary, inclusive");
        assert!(INDIAN_OCEAN.contains(30.0, 75.0), "lat=30 is on the boundary, inclusive");
        assert!(INDIAN_OCEAN.contains(0.0, 20.0), "lon=20 is on the boundary, inclusive");
        assert!(INDIAN_OCEAN.contains(0.0, 120.0), "lon=120 is on the boundary, inclusive");
        assert!(INDIAN_OCEAN.contains(-45.0, 20.0), "corner must be inside");
    }

    #[test]
    fn test_contains_rejects_points_just_outside() {
        assert!(!INDIAN_OCEAN.contains(-45.01, 75.0));
        assert!(!INDIAN_OCEAN.contains(30.01, 75.0));
        assert!(!INDIAN_OCEAN.contains(0.0, 19.99));
        assert!(!INDIAN_OCEAN.contains(0.0, 120.01));
    }

    #[test]
    fn test_contains_rejects_far_away_points() {
        // Pacific ring-of-fire coordinates must not leak into the subset.
        assert!(!INDIAN_OCEAN.contains(35.7, 139.7), "Tokyo is outside the region");
        assert!(!INDIAN_OCEAN.contains(40.56, -89.99), "Illinois is outside the region");
    }

    #[test]
    fn test_bounds_of_empty_set_is_none() {
        assert!(bounds_of(&[]).is_none());
    }

    #[test]
    fn test_bounds_of_single_point_is_degenerate_box() {
        let b = bounds_of(&[point(10.0, 80.0)]).unwrap();
        assert_eq!(b.min_lat, 10.0);
        assert_eq!(b.max_lat, 10.0);
        assert_eq!(b.min_lon, 80.0);
        assert_eq!(b.max_lon, 80.0);
    }

    #[test]
    fn test_bounds_of_spans_all_points() {
        let b = bounds_of(&[point(-10.0, 60.0), point(20.0, 100.0), point(5.0, 40.0)]).unwrap();
        assert_eq!(b.min_lat, -10.0);
        assert_eq!(b.max_lat, 20.0);
        assert_eq!(b.min_lon, 40.0);
        assert_eq!(b.max_lon, 100.0);
    }

    #[test]
    fn test_padded_expands_each_side_by_fraction_of_span() {
        let b = Region { min_lat: 0.0, max_lat: 10.0, min_lon: 50.0, max_lon: 70.0 };
        let padded = b.padded(0.2);
        assert_eq!(padded.min_lat, -2.0);
        assert_eq!(padded.max_lat, 12.0);
        assert_eq!(padded.min_lon, 46.0);
        assert_eq!(padded.max_lon, 74.0);
    }
}
