/// Tsunami-risk derivation from normalized earthquake points.
///
/// Strong submarine earthquakes are the dominant tsunami trigger in the
/// Indian Ocean, so every earthquake at or above the magnitude threshold
/// is mirrored as a secondary tsunami-risk point. Derivation runs on the
/// region-filtered earthquake list; it is deterministic and stateless.

use crate::model::{HazardKind, HazardPoint};

/// Default derivation threshold. Earthquakes at or above this magnitude
/// produce a tsunami-risk point; feeds.toml may override it.
pub const TSUNAMI_MAGNITUDE_THRESHOLD: f64 = 6.5;

/// Returns one derived tsunami-risk point per earthquake at or above
/// `threshold`.
///
/// The derived point keeps the source event's coordinates, date, magnitude,
/// and depth; its id gains a `tsu-` prefix so the pair stays distinguishable,
/// and its title references the originating magnitude. Points without a
/// magnitude never qualify. Non-earthquake input points are ignored.
pub fn derive_tsunami_points(quakes: &[HazardPoint], threshold: f64) -> Vec<HazardPoint> {
    quakes
        .iter()
        .filter(|q| q.kind == HazardKind::Earthquake)
        .filter_map(|q| {
            let magnitude = q.magnitude.filter(|m| *m >= threshold)?;
            Some(HazardPoint {
                id: format!("tsu-{}", q.id),
                kind: HazardKind::Tsunami,
                title: format!("Tsunami risk (from M{})", magnitude),
                ..q.clone()
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
