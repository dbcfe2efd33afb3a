//! Display heuristics for NEO dashboards.
//!
//! NOT physics. These scores rank catalogued objects for a list view the way
//! the hazardous-asteroid dashboard always has; they carry no probability of
//! impact and must never be presented as derived from the estimator.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::neo::{NeoError, NeoRecord};
use impact_core::{require_in_range, require_positive, Parameter};

/// A pluggable 0–100 scoring rule over NEO records.
pub trait RiskHeuristic {
    fn score(&self, record: &NeoRecord) -> Result<f64, NeoError>;
}

/// Weighted blend of size, speed and closeness.
///
/// - size: max diameter, 1 km → 100
/// - velocity: 30 km/s → 100
/// - proximity: 0 at 7.48 million km, 100 at contact
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightedRiskHeuristic {
    pub size_weight: f64,
    pub velocity_weight: f64,
    pub proximity_weight: f64,
}

impl Default for WeightedRiskHeuristic {
    fn default() -> Self {
        Self { size_weight: 0.4, velocity_weight: 0.3, proximity_weight: 0.3 }
    }
}

const FULL_SCORE_DIAMETER_M: f64 = 1000.0;
const FULL_SCORE_VELOCITY_KM_S: f64 = 30.0;
const ZERO_SCORE_MISS_KM: f64 = 7_480_000.0;

impl RiskHeuristic for WeightedRiskHeuristic {
    fn score(&self, record: &NeoRecord) -> Result<f64, NeoError> {
        // Each component must stay inside [0, 100].
        let diameter_m = require_positive(Parameter::Diameter, record.diameter_range_m()?.estimated_diameter_max)?;
        let velocity = require_positive(Parameter::Velocity, record.relative_velocity_km_s()?)?;
        let miss_km = require_in_range(Parameter::MissDistance, record.miss_distance_km()?, 0.0, f64::MAX)?;

        let size = (diameter_m / FULL_SCORE_DIAMETER_M * 100.0).min(100.0);
        let speed = (velocity / FULL_SCORE_VELOCITY_KM_S * 100.0).min(100.0);
        let proximity = (100.0 - miss_km / ZERO_SCORE_MISS_KM * 100.0).max(0.0);

        let raw = size * self.size_weight + speed * self.velocity_weight + proximity * self.proximity_weight;
        Ok((raw * 10.0).round() / 10.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreatLevel {
    Minimal,
    Low,
    Moderate,
    High,
    Extreme,
}

impl ThreatLevel {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 80.0 => ThreatLevel::Extreme,
            s if s >= 60.0 => ThreatLevel::High,
            s if s >= 40.0 => ThreatLevel::Moderate,
            s if s >= 20.0 => ThreatLevel::Low,
            _ => ThreatLevel::Minimal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub id: String,
    pub name: String,
    pub score: f64,
    pub level: ThreatLevel,
}

/// Score the potentially hazardous records, highest first. Records lacking
/// the fields the heuristic needs are skipped with a warning.
pub fn rank_by_risk<H: RiskHeuristic>(heuristic: &H, records: &[NeoRecord]) -> Vec<RiskAssessment> {
    let mut ranked: Vec<RiskAssessment> = records
        .iter()
        .filter(|r| r.is_potentially_hazardous_asteroid)
        .filter_map(|r| match heuristic.score(r) {
            Ok(score) => Some(RiskAssessment {
                id: r.id.clone(),
                name: r.name.clone(),
                score,
                level: ThreatLevel::from_score(score),
            }),
            Err(e) => {
                warn!(neo_id = %r.id, error = %e, "skipping NEO in risk ranking");
                None
            }
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
