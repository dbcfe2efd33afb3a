//! Estimator configuration.
//!
//! Everything has a default, so an empty JSON object is a valid config:
//!
//! ```json
//! {
//!   "default_density_kg_m3": 3000.0,
//!   "default_impact_angle_deg": 45.0,
//!   "clamp_angle": true,
//!   "crater_model": { "model": "kinematic" },
//!   "rings": { "fireball": 0.33, "thermal": 4.0, "shockwave": 8.0, "airblast": 1.5 }
//! }
//! ```

use impact_core::{
    require_in_range, require_positive, InvalidParameterError, Parameter,
    DEFAULT_DENSITY_KG_M3, DEFAULT_IMPACT_ANGLE_DEG,
};
use impact_models::{CraterModelKind, ModelError, RingScaling};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid model constants: {0}")]
    Model(#[from] ModelError),
    #[error("invalid default: {0}")]
    Default(#[from] InvalidParameterError),
    #[error("malformed config JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Used when the caller omits a density [kg/m³].
    pub default_density_kg_m3: f64,
    /// Used when the caller omits an angle [°].
    pub default_impact_angle_deg: f64,
    /// Clamp supplied angles into [0, 90] instead of rejecting them.
    pub clamp_angle: bool,
    pub crater_model: CraterModelKind,
    pub rings: RingScaling,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            default_density_kg_m3: DEFAULT_DENSITY_KG_M3,
            default_impact_angle_deg: DEFAULT_IMPACT_ANGLE_DEG,
            clamp_angle: true,
            crater_model: CraterModelKind::Kinematic,
            rings: RingScaling::default(),
        }
    }
}

impl EstimatorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive(Parameter::Density, self.default_density_kg_m3)?;
        require_in_range(Parameter::ImpactAngle, self.default_impact_angle_deg, 0.0, 90.0)?;
        self.crater_model.validate()?;
        self.rings.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use impact_models::EnergyScalingCrater;

    #[test]
    fn empty_object_is_default() {
        let cfg = EstimatorConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, EstimatorConfig::default());
    }

    #[test]
    fn partial_override() {
        let cfg = EstimatorConfig::from_json_str(
            r#"{ "clamp_angle": false,
                 "crater_model": { "model": "energy_scaling", "k": 0.07, "exponent": 0.25 },
                 "rings": { "thermal": 3.0 } }"#,
        )
        .unwrap();
        assert!(!cfg.clamp_angle);
        assert_eq!(
            cfg.crater_model,
            CraterModelKind::EnergyScaling(EnergyScalingCrater { k: 0.07, exponent: 0.25 })
        );
        assert_eq!(cfg.rings.thermal, 3.0);
        assert_eq!(cfg.rings.shockwave, 8.0);
        assert_eq!(cfg.default_density_kg_m3, DEFAULT_DENSITY_KG_M3);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            EstimatorConfig::from_json_str(r#"{ "rings": { "thermal": 0.5 } }"#),
            Err(ConfigError::Model(ModelError::RingOrdering(_)))
        ));
        assert!(matches!(
            EstimatorConfig::from_json_str(r#"{ "default_density_kg_m3": -1.0 }"#),
            Err(ConfigError::Default(_))
        ));
        assert!(matches!(
            EstimatorConfig::from_json_str(r#"{ "default_impact_angle_deg": 120.0 }"#),
            Err(ConfigError::Default(_))
        ));
        assert!(matches!(EstimatorConfig::from_json_str("{ nope"), Err(ConfigError::Json(_))));
    }
}
