// ==========================================
// Breather Advisor - Thermal Expansion Calculator
// ==========================================
// Derives the required breathing capacity (CFM) from oil/air thermal
// expansion across the widest operating-vs-ambient temperature span.
// Expansion coefficients follow the published sizing methodology.
// ==========================================

use crate::config::GlobalConfig;
use crate::engine::error::{SelectionError, SelectionResult};
use crate::engine::volume::VolumeEstimate;
use crate::domain::types::VolumeMethod;
use serde::{Deserialize, Serialize};

/// Oil thermal expansion coefficient γ, per °F.
pub const OIL_EXPANSION_COEFFICIENT: f64 = 0.0003611;
/// Air thermal expansion coefficient β, per °F.
pub const AIR_EXPANSION_COEFFICIENT: f64 = 0.001894;
/// US gallons per cubic foot.
pub const GALLONS_PER_CUBIC_FOOT: f64 = 7.48;
/// Default temperature differential when data is missing or the
/// observed span is implausibly small.
pub const DEFAULT_DELTA_T_F: f64 = 40.0;
/// Minimum plausible differential before the default kicks in.
pub const MIN_DELTA_T_F: f64 = 10.0;

// ==========================================
// Thermal Analysis
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalAnalysis {
    pub delta_t_f: f64,
    pub delta_v_oil_gal: f64,
    pub delta_v_air_gal: f64,
    pub cfm_required: f64,
    pub safety_factor: f64,
}

// ==========================================
// Thermal Expansion Calculator
// ==========================================
pub struct ThermalExpansionCalculator;

impl ThermalExpansionCalculator {
    /// Extract °F temperatures from a free-text descriptor such as
    /// `"125°F (51.7°C) - 150°F (65.6°C)"`.
    ///
    /// Only °F-suffixed numbers count; Celsius parentheticals must not
    /// pollute the bounds. Two or more matches give (min, max); a
    /// single match serves as both bounds; none gives `None`.
    pub fn extract_temperatures(text: &str) -> Option<(f64, f64)> {
        let temps = fahrenheit_values(text);
        match temps.len() {
            0 => None,
            1 => Some((temps[0], temps[0])),
            _ => {
                let min = temps.iter().cloned().fold(f64::INFINITY, f64::min);
                let max = temps.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                Some((min, max))
            }
        }
    }

    /// Temperature differential across all available operating and
    /// ambient bounds. Fewer than two values, or a span below 10°F,
    /// falls back to the fixed 40°F default.
    pub fn temperature_differential(
        operating: Option<(f64, f64)>,
        ambient: (f64, f64),
    ) -> f64 {
        let mut all: Vec<f64> = vec![ambient.0, ambient.1];
        if let Some((lo, hi)) = operating {
            all.push(lo);
            all.push(hi);
        }
        all.retain(|t| t.is_finite());

        if all.len() < 2 {
            return DEFAULT_DELTA_T_F;
        }
        let max = all.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min = all.iter().cloned().fold(f64::INFINITY, f64::min);
        let delta = max - min;
        if delta >= MIN_DELTA_T_F {
            delta
        } else {
            DEFAULT_DELTA_T_F
        }
    }

    /// Required CFM from thermal expansion of the oil and headspace
    /// air volumes. Fails when the volume estimate carried no data.
    pub fn required_cfm(
        volumes: &VolumeEstimate,
        operating_temp_text: Option<&str>,
        config: &GlobalConfig,
    ) -> SelectionResult<ThermalAnalysis> {
        if volumes.method == VolumeMethod::InsufficientData {
            return Err(SelectionError::InsufficientData(
                volumes
                    .warning
                    .clone()
                    .unwrap_or_else(|| "volume calculation impossible".to_string()),
            ));
        }

        let operating = operating_temp_text.and_then(Self::extract_temperatures);
        let ambient = (config.min_ambient_f, config.max_ambient_f);
        let delta_t = Self::temperature_differential(operating, ambient);

        let delta_v_oil = OIL_EXPANSION_COEFFICIENT * volumes.v_oil_gal * delta_t;
        let delta_v_air = AIR_EXPANSION_COEFFICIENT * volumes.v_air_gal * delta_t;
        let cfm_required =
            ((delta_v_oil + delta_v_air) / GALLONS_PER_CUBIC_FOOT) * config.safety_factor;

        tracing::debug!(
            delta_t,
            delta_v_oil,
            delta_v_air,
            cfm_required,
            "thermal expansion computed"
        );

        Ok(ThermalAnalysis {
            delta_t_f: delta_t,
            delta_v_oil_gal: delta_v_oil,
            delta_v_air_gal: delta_v_air,
            cfm_required: cfm_required.max(0.0),
            safety_factor: config.safety_factor,
        })
    }
}

/// Scan a string for numbers immediately followed by `°F`.
fn fahrenheit_values(text: &str) -> Vec<f64> {
    let mut out = Vec::new();
    let bytes: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == '.') {
                i += 1;
            }
            // Number must be directly suffixed with °F
            if i + 1 < bytes.len() && bytes[i] == '°' && (bytes[i + 1] == 'F' || bytes[i + 1] == 'f')
            {
                let number: String = bytes[start..i].iter().collect();
                if let Ok(v) = number.parse::<f64>() {
                    out.push(v);
                }
                i += 2;
            }
        } else {
            i += 1;
        }
    }
    out
}
