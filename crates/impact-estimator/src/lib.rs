//! impact-estimator
//!
//! Maps an impactor's physical parameters to an energy release, a crater size
//! and concentric damage radii.
//! - Mass from a sphere of the given diameter and bulk density.
//! - Kinetic energy ½ m v², in joules and megatons of TNT.
//! - Crater diameter from a configurable `CraterModel` (kinematic by default).
//! - Fireball / thermal / shockwave / airblast radii as fixed ring multiples.
//!
//! Units on every output: lengths in **km**, mass in kg, energy in J and Mt.
//!
//! The estimator is a pure function of its input and configuration: no I/O,
//! no shared state, bit-identical output for identical input.
//!
//! ```
//! use impact_estimator::{estimate_impact, AsteroidParameters};
//!
//! let est = estimate_impact(&AsteroidParameters::new(500.0, 20.0)).unwrap();
//! assert!((est.crater_diameter_km - 7.071).abs() < 1e-3);
//! ```

use core::f64::consts::PI;

use impact_core::{
    joules_to_megatons, km_s_to_m_s, require_finite, require_in_range, require_positive,
    InvalidParameterError, Parameter, Violation,
};
use impact_models::{seismic_magnitude, CraterInput, CraterModel};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

mod config;
pub mod heuristics;
pub mod neo;
mod zones;

pub use config::{ConfigError, EstimatorConfig};
pub use impact_core::TargetLocation;
pub use impact_models::{CraterModelKind, EnergyScalingCrater, RingScaling, ThreatClass};
pub use zones::{DamageZone, LabeledEstimate, ZoneKind, MAX_RING_SEGMENTS};

/// Crater depth as a fraction of its diameter (simple bowl crater).
const CRATER_DEPTH_RATIO: f64 = 0.2;

/// Impactor inputs, as collected from a UI control or a NEO feed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AsteroidParameters {
    pub diameter_m: f64,     // m, > 0
    pub velocity_km_s: f64,  // km/s, > 0
    /// From the horizontal; config default (45°) when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_angle_deg: Option<f64>,
    /// Config default (3000 kg/m³) when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density_kg_m3: Option<f64>,
}

impl AsteroidParameters {
    pub fn new(diameter_m: f64, velocity_km_s: f64) -> Self {
        Self { diameter_m, velocity_km_s, impact_angle_deg: None, density_kg_m3: None }
    }

    #[must_use]
    pub fn with_angle(mut self, impact_angle_deg: f64) -> Self {
        self.impact_angle_deg = Some(impact_angle_deg);
        self
    }

    #[must_use]
    pub fn with_density(mut self, density_kg_m3: f64) -> Self {
        self.density_kg_m3 = Some(density_kg_m3);
        self
    }

    /// Diameter-only hazard class; independent of speed and angle.
    pub fn threat_class(&self) -> ThreatClass {
        ThreatClass::from_diameter_m(self.diameter_m)
    }
}

/// Everything derived from one set of `AsteroidParameters`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImpactEstimate {
    pub mass_kg: f64,
    pub energy_joules: f64,
    pub energy_megatons: f64,
    pub crater_diameter_km: f64,
    pub crater_depth_km: f64,
    pub fireball_radius_km: f64,
    pub thermal_radius_km: f64,
    pub shockwave_radius_km: f64,
    pub airblast_radius_km: f64,
    /// Moment-magnitude equivalent; `None` only for zero energy.
    pub seismic_magnitude: Option<f64>,
    /// The angle actually used, after defaulting and clamping.
    pub impact_angle_deg: f64,
}

/// Estimator bound to one validated configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    pub fn new(config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Validate `params` and run the estimate pipeline.
    pub fn estimate(&self, params: &AsteroidParameters) -> Result<ImpactEstimate, InvalidParameterError> {
        let diameter_m = require_positive(Parameter::Diameter, params.diameter_m)?;
        let velocity_km_s = require_positive(Parameter::Velocity, params.velocity_km_s)?;
        let density = match params.density_kg_m3 {
            Some(d) => require_positive(Parameter::Density, d)?,
            None => self.config.default_density_kg_m3,
        };
        let impact_angle_deg = self.resolve_angle(params.impact_angle_deg)?;

        // Spherical impactor
        let radius_m = diameter_m / 2.0;
        let volume_m3 = 4.0 / 3.0 * PI * radius_m.powi(3);
        let mass_kg = volume_m3 * density;
        if !mass_kg.is_finite() {
            return Err(InvalidParameterError::new(Parameter::Diameter, diameter_m, Violation::TooLarge));
        }

        let v_m_s = km_s_to_m_s(velocity_km_s);
        let energy_joules = 0.5 * mass_kg * v_m_s * v_m_s;
        if !energy_joules.is_finite() {
            return Err(InvalidParameterError::new(Parameter::Velocity, velocity_km_s, Violation::TooLarge));
        }
        let energy_megatons = joules_to_megatons(energy_joules);

        let crater_diameter_km = self.config.crater_model.crater_diameter_km(&CraterInput {
            diameter_m,
            velocity_km_s,
            impact_angle_deg,
            energy_j: energy_joules,
        });
        let rings = self.config.rings.apply(crater_diameter_km);
        if !rings.airblast_km.is_finite() {
            return Err(InvalidParameterError::new(Parameter::Diameter, diameter_m, Violation::TooLarge));
        }

        let estimate = ImpactEstimate {
            mass_kg,
            energy_joules,
            energy_megatons,
            crater_diameter_km,
            crater_depth_km: crater_diameter_km * CRATER_DEPTH_RATIO,
            fireball_radius_km: rings.fireball_km,
            thermal_radius_km: rings.thermal_km,
            shockwave_radius_km: rings.shockwave_km,
            airblast_radius_km: rings.airblast_km,
            seismic_magnitude: seismic_magnitude(energy_joules),
            impact_angle_deg,
        };

        debug!(
            diameter_m,
            velocity_km_s,
            impact_angle_deg,
            energy_mt = estimate.energy_megatons,
            crater_km = estimate.crater_diameter_km,
            shockwave_km = estimate.shockwave_radius_km,
            "impact estimated"
        );
        Ok(estimate)
    }

    fn resolve_angle(&self, angle: Option<f64>) -> Result<f64, InvalidParameterError> {
        let Some(angle) = angle else {
            return Ok(self.config.default_impact_angle_deg);
        };
        let angle = require_finite(Parameter::ImpactAngle, angle)?;
        if !self.config.clamp_angle {
            return require_in_range(Parameter::ImpactAngle, angle, 0.0, 90.0);
        }
        let clamped = angle.clamp(0.0, 90.0);
        if clamped != angle {
            warn!(requested = angle, used = clamped, "impact angle clamped to [0, 90]");
        }
        Ok(clamped)
    }
}

/// Estimate with the default configuration (kinematic crater, 4×/8× rings).
pub fn estimate_impact(params: &AsteroidParameters) -> Result<ImpactEstimate, InvalidParameterError> {
    Estimator::default().estimate(params)
}

/* ----------------------------------- tests ---------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn large_impactor_scenario() {
        let est = estimate_impact(&AsteroidParameters::new(500.0, 20.0).with_angle(45.0)).unwrap();
        assert_relative_eq!(est.crater_diameter_km, 7.0711, max_relative = 1e-4);
        assert_relative_eq!(est.thermal_radius_km, 28.284, max_relative = 1e-4);
        assert_relative_eq!(est.shockwave_radius_km, 56.569, max_relative = 1e-4);
        assert_relative_eq!(est.airblast_radius_km, 84.853, max_relative = 1e-4);
        assert_relative_eq!(est.fireball_radius_km, 2.3335, max_relative = 1e-4);
        assert_relative_eq!(est.crater_depth_km, 1.4142, max_relative = 1e-4);
    }

    #[test]
    fn omitted_angle_and_density_use_defaults() {
        let implicit = estimate_impact(&AsteroidParameters::new(120.0, 18.0)).unwrap();
        let explicit =
            estimate_impact(&AsteroidParameters::new(120.0, 18.0).with_angle(45.0).with_density(3000.0)).unwrap();
        assert_eq!(implicit, explicit);
        assert_eq!(implicit.impact_angle_deg, 45.0);
    }

    #[test]
    fn density_scales_mass_linearly() {
        let rock = estimate_impact(&AsteroidParameters::new(100.0, 20.0)).unwrap();
        let iron = estimate_impact(&AsteroidParameters::new(100.0, 20.0).with_density(7800.0)).unwrap();
        assert_relative_eq!(iron.mass_kg / rock.mass_kg, 2.6, max_relative = 1e-12);
        // kinematic crater does not depend on density
        assert_eq!(iron.crater_diameter_km, rock.crater_diameter_km);
    }

    #[test]
    fn angle_is_clamped_by_default() {
        let steep = estimate_impact(&AsteroidParameters::new(100.0, 20.0).with_angle(135.0)).unwrap();
        assert_eq!(steep.impact_angle_deg, 90.0);
        assert_relative_eq!(steep.crater_diameter_km, 2.0, max_relative = 1e-12);

        let below = estimate_impact(&AsteroidParameters::new(100.0, 20.0).with_angle(-10.0)).unwrap();
        assert_eq!(below.impact_angle_deg, 0.0);
        assert_eq!(below.crater_diameter_km, 0.0);
    }

    #[test]
    fn angle_rejected_when_clamping_disabled() {
        let est = Estimator::new(EstimatorConfig { clamp_angle: false, ..EstimatorConfig::default() }).unwrap();
        let err = est.estimate(&AsteroidParameters::new(100.0, 20.0).with_angle(95.0)).unwrap_err();
        assert_eq!(err.parameter, Parameter::ImpactAngle);
        assert!(est.estimate(&AsteroidParameters::new(100.0, 20.0).with_angle(90.0)).is_ok());
    }

    #[test]
    fn nan_angle_always_rejected() {
        let err = estimate_impact(&AsteroidParameters::new(100.0, 20.0).with_angle(f64::NAN)).unwrap_err();
        assert_eq!(err.violation, Violation::NotFinite);
    }

    #[test]
    fn invalid_density_rejected() {
        let err = estimate_impact(&AsteroidParameters::new(100.0, 20.0).with_density(0.0)).unwrap_err();
        assert_eq!(err.parameter, Parameter::Density);
    }

    #[test]
    fn overflowing_inputs_rejected() {
        let err = estimate_impact(&AsteroidParameters::new(1e200, 20.0)).unwrap_err();
        assert_eq!(err.violation, Violation::TooLarge);
        let err = estimate_impact(&AsteroidParameters::new(1e100, 1e150)).unwrap_err();
        assert_eq!(err.violation, Violation::TooLarge);
    }

    #[test]
    fn energy_scaling_model_selected_by_config() {
        let cfg = EstimatorConfig {
            crater_model: CraterModelKind::EnergyScaling(EnergyScalingCrater::default()),
            ..EstimatorConfig::default()
        };
        let est = Estimator::new(cfg).unwrap().estimate(&AsteroidParameters::new(20.0, 17.0)).unwrap();
        let expected_km = 0.07 * est.energy_joules.powf(1.0 / 3.4) / 1000.0;
        assert_relative_eq!(est.crater_diameter_km, expected_km, max_relative = 1e-12);
        assert_relative_eq!(est.thermal_radius_km, expected_km * 4.0, max_relative = 1e-12);
    }

    #[test]
    fn invalid_config_rejected() {
        let cfg = EstimatorConfig { default_density_kg_m3: f64::NAN, ..EstimatorConfig::default() };
        assert!(matches!(Estimator::new(cfg), Err(ConfigError::Default(_))));
    }

    #[test]
    fn parameters_json_shape() {
        let p: AsteroidParameters = serde_json::from_str(r#"{"diameter_m":20,"velocity_km_s":17}"#).unwrap();
        assert_eq!(p, AsteroidParameters::new(20.0, 17.0));
        assert_eq!(serde_json::to_string(&p).unwrap(), r#"{"diameter_m":20.0,"velocity_km_s":17.0}"#);
        assert_eq!(p.threat_class(), ThreatClass::MinimalThreat);
    }
}
