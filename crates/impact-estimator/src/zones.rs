//! Damage zones and location-labeled estimates, in the shape the globe and
//! map layers draw them: concentric rings around ground zero.
//!
//! The crater ring is drawn with the crater *diameter* figure, which keeps the
//! rings nested: fireball <= crater <= thermal <= shockwave <= airblast.

use impact_core::TargetLocation;
use serde::{Deserialize, Serialize};

use crate::ImpactEstimate;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneKind {
    Fireball,
    Crater,
    Thermal,
    Shockwave,
    Airblast,
}

impl ZoneKind {
    /// Innermost first.
    pub const ALL: [ZoneKind; 5] = [
        ZoneKind::Fireball,
        ZoneKind::Crater,
        ZoneKind::Thermal,
        ZoneKind::Shockwave,
        ZoneKind::Airblast,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ZoneKind::Fireball => "Fireball",
            ZoneKind::Crater => "Crater",
            ZoneKind::Thermal => "Thermal radiation",
            ZoneKind::Shockwave => "Shockwave",
            ZoneKind::Airblast => "Airblast",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DamageZone {
    pub kind: ZoneKind,
    pub radius_km: f64,
}

impl ImpactEstimate {
    pub fn radius_km(&self, kind: ZoneKind) -> f64 {
        match kind {
            ZoneKind::Fireball => self.fireball_radius_km,
            ZoneKind::Crater => self.crater_diameter_km,
            ZoneKind::Thermal => self.thermal_radius_km,
            ZoneKind::Shockwave => self.shockwave_radius_km,
            ZoneKind::Airblast => self.airblast_radius_km,
        }
    }

    /// All rings, innermost first.
    pub fn zones(&self) -> [DamageZone; 5] {
        ZoneKind::ALL.map(|kind| DamageZone { kind, radius_km: self.radius_km(kind) })
    }
}

/// An estimate pinned to a place on the globe.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabeledEstimate {
    pub location: TargetLocation,
    pub estimate: ImpactEstimate,
}

/// Upper bound on points per ring outline.
pub const MAX_RING_SEGMENTS: usize = 4096;

impl LabeledEstimate {
    pub fn new(location: TargetLocation, estimate: ImpactEstimate) -> Self {
        Self { location, estimate }
    }

    /// Innermost zone containing `point`, or `None` outside the airblast ring.
    pub fn zone_at(&self, point: &TargetLocation) -> Option<DamageZone> {
        let d = self.location.great_circle_distance_km(point);
        self.estimate.zones().into_iter().find(|z| d <= z.radius_km)
    }

    /// Ring outline as `segments` points clockwise from north, clamped to
    /// `3..=MAX_RING_SEGMENTS`.
    pub fn ring_outline(&self, kind: ZoneKind, segments: usize) -> Vec<TargetLocation> {
        let segments = segments.clamp(3, MAX_RING_SEGMENTS);
        let radius_km = self.estimate.radius_km(kind);
        (0..segments)
            .map(|i| {
                #[allow(clippy::cast_precision_loss)]
                let bearing = 360.0 * i as f64 / segments as f64;
                self.location.destination(bearing, radius_km)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{estimate_impact, AsteroidParameters};
    use approx::assert_abs_diff_eq;

    fn over_london() -> LabeledEstimate {
        let loc = TargetLocation::new(51.5074, -0.1278).unwrap().named("London");
        let est = estimate_impact(&AsteroidParameters::new(500.0, 20.0)).unwrap();
        LabeledEstimate::new(loc, est)
    }

    #[test]
    fn zones_are_nested() {
        let zones = over_london().estimate.zones();
        assert_eq!(zones.map(|z| z.kind), ZoneKind::ALL);
        for pair in zones.windows(2) {
            assert!(pair[0].radius_km <= pair[1].radius_km, "{pair:?}");
        }
    }

    #[test]
    fn point_classification() {
        let le = over_london();
        assert_eq!(le.zone_at(&le.location).map(|z| z.kind), Some(ZoneKind::Fireball));

        // ~20 km east: beyond the crater (7.07 km), inside thermal (28.3 km)
        let east = le.location.destination(90.0, 20.0);
        assert_eq!(le.zone_at(&east).map(|z| z.kind), Some(ZoneKind::Thermal));

        // ~70 km: only the airblast ring (84.9 km) reaches
        let far = le.location.destination(180.0, 70.0);
        assert_eq!(le.zone_at(&far).map(|z| z.kind), Some(ZoneKind::Airblast));

        let paris = TargetLocation::new(48.8566, 2.3522).unwrap();
        assert_eq!(le.zone_at(&paris), None);
    }

    #[test]
    fn outline_points_sit_on_the_ring() {
        let le = over_london();
        let ring = le.ring_outline(ZoneKind::Shockwave, 36);
        assert_eq!(ring.len(), 36);
        for p in &ring {
            assert_abs_diff_eq!(
                le.location.great_circle_distance_km(p),
                le.estimate.shockwave_radius_km,
                epsilon = 1e-3
            );
        }
        assert_eq!(le.ring_outline(ZoneKind::Crater, 1).len(), 3);
    }

    #[test]
    fn huge_segment_counts_are_capped() {
        let le = over_london();
        assert_eq!(le.ring_outline(ZoneKind::Airblast, usize::MAX).len(), MAX_RING_SEGMENTS);
        assert_eq!(le.ring_outline(ZoneKind::Airblast, MAX_RING_SEGMENTS + 1).len(), MAX_RING_SEGMENTS);
    }
}
