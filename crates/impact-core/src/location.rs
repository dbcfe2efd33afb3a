//! Target locations on a spherical Earth.
//!
//! A location is a display label for an estimate; it never feeds the physics.
//! Distances use the mean Earth radius, which is accurate to ~0.5% and plenty
//! for drawing damage rings on a globe.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{require_in_range, InvalidParameterError, Parameter, EARTH_MEAN_RADIUS_KM};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetLocation {
    pub latitude: f64,  // [°N], -90..=90
    pub longitude: f64, // [°E], -180..=180
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl TargetLocation {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, InvalidParameterError> {
        let loc = Self { latitude, longitude, name: None };
        loc.validate()?;
        Ok(loc)
    }

    /// Attach a city (or other) name.
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Check coordinates of a location built from untrusted data (e.g. deserialized).
    pub fn validate(&self) -> Result<(), InvalidParameterError> {
        require_in_range(Parameter::Latitude, self.latitude, -90.0, 90.0)?;
        require_in_range(Parameter::Longitude, self.longitude, -180.0, 180.0)?;
        Ok(())
    }

    /// Name if present, otherwise formatted coordinates.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => format!("{:.4}, {:.4}", self.latitude, self.longitude),
        }
    }

    /// Earth-centered unit vector (x toward 0°E, z toward the north pole).
    pub fn unit_vector(&self) -> Vector3<f64> {
        let lat = self.latitude.to_radians();
        let lon = self.longitude.to_radians();
        Vector3::new(lat.cos() * lon.cos(), lat.cos() * lon.sin(), lat.sin())
    }

    /// Great-circle distance to `other` [km].
    pub fn great_circle_distance_km(&self, other: &TargetLocation) -> f64 {
        EARTH_MEAN_RADIUS_KM * self.unit_vector().angle(&other.unit_vector())
    }

    /// Point reached by travelling `distance_km` along the initial `bearing_deg`
    /// (0° = north, 90° = east). The result carries no name.
    pub fn destination(&self, bearing_deg: f64, distance_km: f64) -> TargetLocation {
        let phi1 = self.latitude.to_radians();
        let lambda1 = self.longitude.to_radians();
        let theta = bearing_deg.to_radians();
        let delta = distance_km / EARTH_MEAN_RADIUS_KM;

        let sin_phi2 = (phi1.sin() * delta.cos() + phi1.cos() * delta.sin() * theta.cos())
            .clamp(-1.0, 1.0);
        let phi2 = sin_phi2.asin();
        let lambda2 = lambda1
            + f64::atan2(
                theta.sin() * delta.sin() * phi1.cos(),
                delta.cos() - phi1.sin() * sin_phi2,
            );

        TargetLocation {
            latitude: phi2.to_degrees(),
            longitude: wrap_longitude(lambda2.to_degrees()),
            name: None,
        }
    }
}

// Fold any longitude into [-180, 180].
fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && lon > 0.0 { 180.0 } else { wrapped }
}
