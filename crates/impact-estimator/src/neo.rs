//! Near-earth-object records.
//!
//! Deserializes the subset of a NASA NeoWs object (`/neo/{id}` or one entry of
//! `/feed`) that the impact view needs, and turns it into `AsteroidParameters`.
//! Fetching is the caller's business. Missing fields are reported as
//! `NeoError::Unavailable`; no stand-in value is ever guessed.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::{AsteroidParameters, Estimator, ImpactEstimate};
use impact_core::InvalidParameterError;

#[derive(Debug, Error)]
pub enum NeoError {
    #[error("NEO record has no `{0}`")]
    Unavailable(&'static str),
    #[error("NEO field `{field}` is not a number: {value:?}")]
    Number { field: &'static str, value: String },
    #[error("malformed NEO JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Invalid(#[from] InvalidParameterError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub estimated_diameter: Option<EstimatedDiameter>,
    #[serde(default)]
    pub close_approach_data: Vec<CloseApproach>,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    #[serde(default)]
    pub meters: Option<DiameterRange>,
    #[serde(default)]
    pub kilometers: Option<DiameterRange>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

// NeoWs encodes speeds and distances as decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloseApproach {
    #[serde(default)]
    pub close_approach_date: Option<String>,
    #[serde(default)]
    pub relative_velocity: Option<RelativeVelocity>,
    #[serde(default)]
    pub miss_distance: Option<MissDistance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_second: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: String,
}

impl NeoRecord {
    pub fn from_json_str(s: &str) -> Result<Self, NeoError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Diameter range in metres, from the `meters` block or else `kilometers`.
    pub fn diameter_range_m(&self) -> Result<DiameterRange, NeoError> {
        let est = self
            .estimated_diameter
            .as_ref()
            .ok_or(NeoError::Unavailable("estimated_diameter"))?;
        if let Some(m) = est.meters {
            return Ok(m);
        }
        est.kilometers
            .map(|km| DiameterRange {
                estimated_diameter_min: km.estimated_diameter_min * 1000.0,
                estimated_diameter_max: km.estimated_diameter_max * 1000.0,
            })
            .ok_or(NeoError::Unavailable("estimated_diameter.meters"))
    }

    pub fn mean_diameter_m(&self) -> Result<f64, NeoError> {
        let r = self.diameter_range_m()?;
        Ok(0.5 * (r.estimated_diameter_min + r.estimated_diameter_max))
    }

    fn first_approach(&self) -> Result<&CloseApproach, NeoError> {
        self.close_approach_data
            .first()
            .ok_or(NeoError::Unavailable("close_approach_data"))
    }

    /// Relative velocity at the first listed close approach [km/s].
    pub fn relative_velocity_km_s(&self) -> Result<f64, NeoError> {
        let rv = self
            .first_approach()?
            .relative_velocity
            .as_ref()
            .ok_or(NeoError::Unavailable("relative_velocity"))?;
        parse_decimal("relative_velocity.kilometers_per_second", &rv.kilometers_per_second)
    }

    /// Miss distance at the first listed close approach [km].
    pub fn miss_distance_km(&self) -> Result<f64, NeoError> {
        let md = self
            .first_approach()?
            .miss_distance
            .as_ref()
            .ok_or(NeoError::Unavailable("miss_distance"))?;
        parse_decimal("miss_distance.kilometers", &md.kilometers)
    }

    /// Mean diameter and first-approach speed as estimator input.
    pub fn to_parameters(&self) -> Result<AsteroidParameters, NeoError> {
        let params = self
            .mean_diameter_m()
            .and_then(|d| Ok(AsteroidParameters::new(d, self.relative_velocity_km_s()?)));
        if let Err(e) = &params {
            warn!(neo_id = %self.id, error = %e, "NEO record unusable for impact estimate");
        }
        params
    }
}

// Only finite decimals count; "NaN" and "inf" parse as f64 but are not data.
fn parse_decimal(field: &'static str, raw: &str) -> Result<f64, NeoError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| NeoError::Number { field, value: raw.to_owned() })
}

/// Estimate the impact of a catalogued object as if it struck at its
/// close-approach speed.
pub fn estimate_neo(
    estimator: &Estimator,
    record: &NeoRecord,
) -> Result<(AsteroidParameters, ImpactEstimate), NeoError> {
    let params = record.to_parameters()?;
    let estimate = estimator.estimate(&params)?;
    Ok((params, estimate))
}
