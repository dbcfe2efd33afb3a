//! impact-models
//!
//! Closed-form scaling laws that turn an impactor's size, speed, angle and
//! kinetic energy into crater and damage-ring sizes.
//!
//! Crater models (all return a **final crater diameter in km**):
//!
//!   kinematic:       D_km = d_m * v_kms * sin(θ) / 1000
//!   energy-scaling:  D_m  = k * E_J^(1/3.4)          (k ≈ 0.07)
//!
//! The two laws are not numerically consistent with each other. The kinematic
//! law is the workspace default; the energy law is kept for comparison views.
//!
//! Damage rings are fixed multiples of the crater diameter:
//!
//!   fireball = 0.33 D,  thermal = 4 D,  shockwave = 8 D,  airblast = 1.5 * shockwave
//!
//! Exports:
//!   - `CraterModel`, `KinematicCrater`, `EnergyScalingCrater`, `CraterModelKind`
//!   - `RingScaling`, `Rings`
//!   - `seismic_magnitude(energy_j)`
//!   - `ThreatClass::from_diameter_m`

use thiserror::Error;

#[cfg(feature = "with-serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("model constant `{name}` must be finite and > 0, got {value}")]
    NonPositiveConstant { name: &'static str, value: f64 },
    #[error("ring factors violate fireball <= crater <= thermal <= shockwave <= airblast: {0}")]
    RingOrdering(String),
}

/* ----------------------------- crater models ----------------------------- */

/// Everything a crater law may look at. Inputs are assumed already validated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CraterInput {
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    /// From the horizontal, within [0, 90].
    pub impact_angle_deg: f64,
    pub energy_j: f64,
}

/// A crater-scaling law.
///
/// Implementations must be monotonically non-decreasing in diameter, velocity
/// and energy, and return a finite, non-negative diameter for valid input.
pub trait CraterModel {
    fn crater_diameter_km(&self, input: &CraterInput) -> f64;
}

/// Size × speed × sin(angle). Grazing (0°) impacts leave no crater.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicCrater;

impl CraterModel for KinematicCrater {
    fn crater_diameter_km(&self, input: &CraterInput) -> f64 {
        let sin_theta = input.impact_angle_deg.to_radians().sin().max(0.0);
        input.diameter_m * input.velocity_km_s * sin_theta / 1000.0
    }
}

/// Power law in kinetic energy: D_m = k * E^exponent. Angle-independent.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
pub struct EnergyScalingCrater {
    pub k: f64,
    pub exponent: f64,
}

impl EnergyScalingCrater {
    pub const DEFAULT_K: f64 = 0.07;
    pub const DEFAULT_EXPONENT: f64 = 1.0 / 3.4;

    pub fn validate(&self) -> Result<(), ModelError> {
        positive_constant("k", self.k)?;
        positive_constant("exponent", self.exponent)?;
        Ok(())
    }
}

impl Default for EnergyScalingCrater {
    fn default() -> Self {
        Self { k: Self::DEFAULT_K, exponent: Self::DEFAULT_EXPONENT }
    }
}

impl CraterModel for EnergyScalingCrater {
    fn crater_diameter_km(&self, input: &CraterInput) -> f64 {
        self.k * input.energy_j.max(0.0).powf(self.exponent) / 1000.0
    }
}

/// Serializable selection of a crater law, for configuration files.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(tag = "model", rename_all = "snake_case"))]
pub enum CraterModelKind {
    #[default]
    Kinematic,
    EnergyScaling(EnergyScalingCrater),
}

impl CraterModelKind {
    pub fn validate(&self) -> Result<(), ModelError> {
        match self {
            CraterModelKind::Kinematic => Ok(()),
            CraterModelKind::EnergyScaling(m) => m.validate(),
        }
    }
}

impl CraterModel for CraterModelKind {
    fn crater_diameter_km(&self, input: &CraterInput) -> f64 {
        match self {
            CraterModelKind::Kinematic => KinematicCrater.crater_diameter_km(input),
            CraterModelKind::EnergyScaling(m) => m.crater_diameter_km(input),
        }
    }
}

/* ------------------------------ damage rings ----------------------------- */

/// Multipliers from crater diameter to the damage rings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
pub struct RingScaling {
    /// × crater diameter
    pub fireball: f64,
    /// × crater diameter
    pub thermal: f64,
    /// × crater diameter
    pub shockwave: f64,
    /// × shockwave radius
    pub airblast: f64,
}

impl Default for RingScaling {
    fn default() -> Self {
        Self { fireball: 0.33, thermal: 4.0, shockwave: 8.0, airblast: 1.5 }
    }
}

/// Ring radii [km] derived from one crater diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rings {
    pub fireball_km: f64,
    pub thermal_km: f64,
    pub shockwave_km: f64,
    pub airblast_km: f64,
}

impl RingScaling {
    /// Factors must be positive and keep the rings nested around the crater.
    pub fn validate(&self) -> Result<(), ModelError> {
        positive_constant("fireball", self.fireball)?;
        positive_constant("thermal", self.thermal)?;
        positive_constant("shockwave", self.shockwave)?;
        positive_constant("airblast", self.airblast)?;

        if self.fireball > 1.0 {
            return Err(ModelError::RingOrdering(format!("fireball factor {} > 1", self.fireball)));
        }
        if self.thermal < 1.0 {
            return Err(ModelError::RingOrdering(format!("thermal factor {} < 1", self.thermal)));
        }
        if self.shockwave < self.thermal {
            return Err(ModelError::RingOrdering(format!(
                "shockwave factor {} < thermal factor {}",
                self.shockwave, self.thermal
            )));
        }
        if self.airblast < 1.0 {
            return Err(ModelError::RingOrdering(format!("airblast factor {} < 1", self.airblast)));
        }
        Ok(())
    }

    pub fn apply(&self, crater_km: f64) -> Rings {
        let shockwave_km = crater_km * self.shockwave;
        Rings {
            fireball_km: crater_km * self.fireball,
            thermal_km: crater_km * self.thermal,
            shockwave_km,
            airblast_km: shockwave_km * self.airblast,
        }
    }
}

#[inline]
fn positive_constant(name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::NonPositiveConstant { name, value })
    }
}

/* ------------------------------ side metrics ----------------------------- */

/// Moment-magnitude equivalent of the released energy (Gutenberg–Richter
/// energy relation): Mw = (log10 E - 4.8) / 1.5. `None` for E <= 0.
pub fn seismic_magnitude(energy_j: f64) -> Option<f64> {
    if energy_j.is_finite() && energy_j > 0.0 {
        Some((energy_j.log10() - 4.8) / 1.5)
    } else {
        None
    }
}

/// Coarse hazard class from impactor diameter alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "with-serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum ThreatClass {
    MinimalThreat,
    LocalDamage,
    CityDestroyer,
    RegionalCatastrophe,
    CivilizationThreatening,
    ExtinctionLevel,
}

impl ThreatClass {
    pub fn from_diameter_m(diameter_m: f64) -> Self {
        match diameter_m {
            d if d >= 1000.0 => ThreatClass::ExtinctionLevel,
            d if d >= 500.0 => ThreatClass::CivilizationThreatening,
            d if d >= 200.0 => ThreatClass::RegionalCatastrophe,
            d if d >= 100.0 => ThreatClass::CityDestroyer,
            d if d >= 50.0 => ThreatClass::LocalDamage,
            _ => ThreatClass::MinimalThreat,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThreatClass::MinimalThreat => "Minimal threat",
            ThreatClass::LocalDamage => "Local damage",
            ThreatClass::CityDestroyer => "City destroyer",
            ThreatClass::RegionalCatastrophe => "Regional catastrophe",
            ThreatClass::CivilizationThreatening => "Civilization threatening",
            ThreatClass::ExtinctionLevel => "Extinction level",
        }
    }
}

/* -------------------------------- tests -------------------------------- */
