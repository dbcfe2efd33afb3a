// crates/impact-ffi-wasm/src/lib.rs
//
// WASM bindings: impact estimate, NEO records, ring outlines for the globe.

use wasm_bindgen::prelude::*;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;

// --- our crates ---
use impact_core::TargetLocation;
use impact_estimator::neo::{estimate_neo, NeoRecord};
use impact_estimator::{
    AsteroidParameters, DamageZone, Estimator, EstimatorConfig, ImpactEstimate, LabeledEstimate,
    ThreatClass, ZoneKind,
};

// Better panic messages in browser console
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
}

/* --------------------------- Shared DTOs (JS) --------------------------- */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsImpactInput {
    pub diameter_m: f64,
    pub velocity_km_s: f64,
    #[serde(default)]
    pub impact_angle_deg: Option<f64>,
    #[serde(default)]
    pub density_kg_m3: Option<f64>,
    /// Selected city; only labels the result.
    #[serde(default)]
    pub location: Option<TargetLocation>,
}

impl From<&JsImpactInput> for AsteroidParameters {
    fn from(j: &JsImpactInput) -> Self {
        AsteroidParameters {
            diameter_m: j.diameter_m,
            velocity_km_s: j.velocity_km_s,
            impact_angle_deg: j.impact_angle_deg,
            density_kg_m3: j.density_kg_m3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsImpactResult {
    pub estimate: ImpactEstimate,
    /// Innermost first.
    pub zones: Vec<DamageZone>,
    pub threat_class: ThreatClass,
    pub threat_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<TargetLocation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsRing {
    pub kind: ZoneKind,
    pub radius_km: f64,
    /// [lat, lon] pairs
    pub points: Vec<[f64; 2]>,
}

/* ------------------------------ plain Rust ------------------------------ */
// Kept free of JsValue so they run under native `cargo test`.

fn run_estimate(estimator: &Estimator, input: &JsImpactInput) -> Result<JsImpactResult, String> {
    if let Some(loc) = &input.location {
        loc.validate().map_err(|e| e.to_string())?;
    }
    let params = AsteroidParameters::from(input);
    let estimate = estimator.estimate(&params).map_err(|e| e.to_string())?;
    Ok(result_for(&params, estimate, input.location.clone()))
}

fn result_for(params: &AsteroidParameters, estimate: ImpactEstimate, location: Option<TargetLocation>) -> JsImpactResult {
    let threat_class = params.threat_class();
    JsImpactResult {
        estimate,
        zones: estimate.zones().to_vec(),
        threat_class,
        threat_label: threat_class.label().to_owned(),
        location,
    }
}

fn run_rings(input: &JsImpactInput, segments: usize) -> Result<Vec<JsRing>, String> {
    let result = run_estimate(&Estimator::default(), input)?;
    let location = result.location.ok_or("ring outlines need a location")?;
    let labeled = LabeledEstimate::new(location, result.estimate);
    Ok(ZoneKind::ALL
        .iter()
        .map(|&kind| JsRing {
            kind,
            radius_km: labeled.estimate.radius_km(kind),
            points: labeled
                .ring_outline(kind, segments)
                .into_iter()
                .map(|p| [p.latitude, p.longitude])
                .collect(),
        })
        .collect())
}

fn run_neo(record_json: &str) -> Result<JsImpactResult, String> {
    let record = NeoRecord::from_json_str(record_json).map_err(|e| e.to_string())?;
    let (params, estimate) = estimate_neo(&Estimator::default(), &record).map_err(|e| e.to_string())?;
    Ok(result_for(&params, estimate, None))
}

/* ------------------------------- exports -------------------------------- */

/// Estimate with the default configuration.
#[wasm_bindgen]
pub fn estimate_impact_js(input: JsValue) -> Result<JsValue, JsValue> {
    let inp: JsImpactInput = swb::from_value(input)?;
    let out = run_estimate(&Estimator::default(), &inp).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&out).map_err(|e| e.into())
}

/// Estimate with a JSON `EstimatorConfig` (crater model, ring factors, defaults).
#[wasm_bindgen]
pub fn estimate_with_config_js(input: JsValue, config_json: &str) -> Result<JsValue, JsValue> {
    let inp: JsImpactInput = swb::from_value(input)?;
    let estimator = EstimatorConfig::from_json_str(config_json)
        .and_then(Estimator::new)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    let out = run_estimate(&estimator, &inp).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&out).map_err(|e| e.into())
}

/// Estimate a catalogued NEO given its raw NeoWs JSON object.
#[wasm_bindgen]
pub fn estimate_neo_js(record_json: &str) -> Result<JsValue, JsValue> {
    let out = run_neo(record_json).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&out).map_err(|e| e.into())
}

/// Ring polygons around `input.location` for map/globe overlays.
#[wasm_bindgen]
pub fn ring_outlines_js(input: JsValue, segments: u32) -> Result<JsValue, JsValue> {
    let inp: JsImpactInput = swb::from_value(input)?;
    let rings = run_rings(&inp, segments as usize).map_err(|e| JsValue::from_str(&e))?;
    swb::to_value(&rings).map_err(|e| e.into())
}

#[wasm_bindgen]
pub fn threat_class_js(diameter_m: f64) -> String {
    ThreatClass::from_diameter_m(diameter_m).label().to_owned()
}

/* -------------------------------- tests --------------------------------- */

#[cfg(test)]
mod tests {
    use super::*;

    fn input(json: &str) -> JsImpactInput {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn input_converts_to_parameters() {
        let p = AsteroidParameters::from(&input(
            r#"{"diameter_m":20,"velocity_km_s":17,"impact_angle_deg":30,
                "location":{"latitude":0,"longitude":0}}"#,
        ));
        assert_eq!(p.diameter_m, 20.0);
        assert_eq!(p.velocity_km_s, 17.0);
        assert_eq!(p.impact_angle_deg, Some(30.0));
        assert_eq!(p.density_kg_m3, None);
    }

    #[test]
    fn estimate_carries_zones_and_label() {
        let out = run_estimate(
            &Estimator::default(),
            &input(r#"{"diameter_m":500,"velocity_km_s":20,
                       "location":{"latitude":40.7128,"longitude":-74.006,"name":"New York"}}"#),
        )
        .unwrap();
        assert_eq!(out.zones.len(), 5);
        assert_eq!(out.zones[1].kind, ZoneKind::Crater);
        assert_eq!(out.threat_class, ThreatClass::CivilizationThreatening);
        assert_eq!(out.location.unwrap().name.as_deref(), Some("New York"));
    }

    #[test]
    fn invalid_input_is_a_message() {
        let err = run_estimate(&Estimator::default(), &input(r#"{"diameter_m":0,"velocity_km_s":20}"#)).unwrap_err();
        assert!(err.contains("diameter_m"), "{err}");

        let err = run_estimate(
            &Estimator::default(),
            &input(r#"{"diameter_m":10,"velocity_km_s":20,"location":{"latitude":100,"longitude":0}}"#),
        )
        .unwrap_err();
        assert!(err.contains("latitude"), "{err}");
    }

    #[test]
    fn rings_need_a_location() {
        assert!(run_rings(&input(r#"{"diameter_m":100,"velocity_km_s":20}"#), 16).is_err());
        let rings = run_rings(
            &input(r#"{"diameter_m":100,"velocity_km_s":20,"location":{"latitude":0,"longitude":0}}"#),
            16,
        )
        .unwrap();
        assert_eq!(rings.len(), 5);
        assert!(rings.iter().all(|r| r.points.len() == 16));
    }

    #[test]
    fn ring_segments_are_capped() {
        let rings = run_rings(
            &input(r#"{"diameter_m":100,"velocity_km_s":20,"location":{"latitude":0,"longitude":0}}"#),
            u32::MAX as usize,
        )
        .unwrap();
        assert!(rings.iter().all(|r| r.points.len() == impact_estimator::MAX_RING_SEGMENTS));
    }

    #[test]
    fn neo_without_velocity_reports_unavailable() {
        let err = run_neo(
            r#"{"id":"1","name":"x","estimated_diameter":{"meters":
                {"estimated_diameter_min":10,"estimated_diameter_max":20}}}"#,
        )
        .unwrap_err();
        assert!(err.contains("close_approach_data"), "{err}");
    }

    #[test]
    fn threat_label() {
        assert_eq!(threat_class_js(150.0), "City destroyer");
    }
}
