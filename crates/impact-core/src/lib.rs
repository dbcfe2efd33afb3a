//! Core impact math utilities
//!
//! Includes:
//! - Physical constants (TNT equivalence, default asteroid density, Earth radius)
//! - Units & conversions (metric lengths/speeds, joules/megatons)
//! - Parameter validation and the shared `InvalidParameterError`
//! - Target locations and great-circle geometry on a spherical Earth

use uom::si::f64::{Length, Velocity};
use uom::si::length::{kilometer, meter};
use uom::si::velocity::{kilometer_per_second, meter_per_second};

mod error;
mod location;

pub use error::{InvalidParameterError, Parameter, Violation};
pub use location::TargetLocation;

/// -------------------------
/// Constants
/// -------------------------

/// Energy of one megaton of TNT [J].
pub const MEGATON_TNT_J: f64 = 4.184e15;

/// Energy of one kiloton of TNT [J].
pub const KILOTON_TNT_J: f64 = 4.184e12;

/// Bulk density of a typical stony asteroid [kg/m³].
pub const DEFAULT_DENSITY_KG_M3: f64 = 3000.0;

/// Entry angle measured from the horizontal [°]; 45° is the most probable impact angle.
pub const DEFAULT_IMPACT_ANGLE_DEG: f64 = 45.0;

/// Mean Earth radius (IUGG) [km].
pub const EARTH_MEAN_RADIUS_KM: f64 = 6371.0088;

/// -------------------------
/// Units & Conversions
/// -------------------------

pub fn m_to_km(m: f64) -> f64 {
    Length::new::<meter>(m).get::<kilometer>()
}

pub fn km_to_m(km: f64) -> f64 {
    Length::new::<kilometer>(km).get::<meter>()
}

pub fn km_s_to_m_s(v: f64) -> f64 {
    Velocity::new::<kilometer_per_second>(v).get::<meter_per_second>()
}

pub fn m_s_to_km_s(v: f64) -> f64 {
    Velocity::new::<meter_per_second>(v).get::<kilometer_per_second>()
}

pub fn joules_to_megatons(j: f64) -> f64 { j / MEGATON_TNT_J }
pub fn megatons_to_joules(mt: f64) -> f64 { mt * MEGATON_TNT_J }
pub fn joules_to_kilotons(j: f64) -> f64 { j / KILOTON_TNT_J }

/// -------------------------
/// Validation
/// -------------------------

/// Accept `value` only if it is finite.
pub fn require_finite(parameter: Parameter, value: f64) -> Result<f64, InvalidParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidParameterError::new(parameter, value, Violation::NotFinite))
    }
}

/// Accept `value` only if it is finite and strictly greater than zero.
pub fn require_positive(parameter: Parameter, value: f64) -> Result<f64, InvalidParameterError> {
    let value = require_finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(InvalidParameterError::new(parameter, value, Violation::NotPositive))
    }
}

/// Accept `value` only if it is finite and within `[min, max]`.
pub fn require_in_range(
    parameter: Parameter,
    value: f64,
    min: f64,
    max: f64,
) -> Result<f64, InvalidParameterError> {
    let value = require_finite(parameter, value)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InvalidParameterError::new(parameter, value, Violation::OutOfRange { min, max }))
    }
}

/* -------------------------------- tests -------------------------------- */
