use std::fmt;

use thiserror::Error;

/// Which physical input failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Diameter,
    Velocity,
    Density,
    ImpactAngle,
    Latitude,
    Longitude,
    MissDistance,
}

impl Parameter {
    /// Field name as it appears on the input records.
    pub fn field_name(self) -> &'static str {
        match self {
            Parameter::Diameter => "diameter_m",
            Parameter::Velocity => "velocity_km_s",
            Parameter::Density => "density_kg_m3",
            Parameter::ImpactAngle => "impact_angle_deg",
            Parameter::Latitude => "latitude",
            Parameter::Longitude => "longitude",
            Parameter::MissDistance => "miss_distance_km",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Violation {
    NotFinite,
    NotPositive,
    OutOfRange { min: f64, max: f64 },
    /// Finite on its own, but overflows the derived quantities.
    TooLarge,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::NotFinite => f.write_str("not finite"),
            Violation::NotPositive => f.write_str("not strictly positive"),
            Violation::OutOfRange { min, max } => write!(f, "outside [{min}, {max}]"),
            Violation::TooLarge => f.write_str("too large for a finite estimate"),
        }
    }
}

/// A physical input was non-finite, non-positive or out of range.
///
/// This is the only failure mode of the estimator: the computation itself
/// performs no I/O.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("invalid {parameter}: {value} is {violation}")]
pub struct InvalidParameterError {
    pub parameter: Parameter,
    pub value: f64,
    pub violation: Violation,
}

impl InvalidParameterError {
    pub fn new(parameter: Parameter, value: f64, violation: Violation) -> Self {
        Self { parameter, value, violation }
    }
}
