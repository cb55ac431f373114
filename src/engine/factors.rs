// ==========================================
// Breather Advisor - Operational Factor Extractor
// ==========================================
// Maps raw environmental descriptors into small closed categorical
// factors via fixed lookup matrices. Pure derivation, no filtering.
// Unparseable descriptors fall back to documented conservative
// defaults and are logged, never escalated to errors.
// ==========================================

use crate::config::GlobalConfig;
use crate::domain::types::{
    ContaminationIndex, HumidityLevel, ServiceLevel, VibrationDuty, WaterContactClass,
};
use crate::domain::AssetDescriptor;
use serde::{Deserialize, Serialize};

/// Relative-humidity threshold for the High humidity level.
pub const HIGH_HUMIDITY_THRESHOLD_PCT: f64 = 75.0;
/// Assumed average RH when the descriptor cannot be parsed.
pub const DEFAULT_HUMIDITY_PCT: f64 = 50.0;

// ==========================================
// Operational Factors
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationalFactors {
    pub contamination_index: ContaminationIndex,
    pub water_contact: WaterContactClass,
    pub desiccant_required: bool,
    pub service_level: ServiceLevel,
    pub humidity_level: HumidityLevel,
    pub avg_humidity_pct: f64,
    pub oil_mist_evidence: bool,
    pub vibration: VibrationDuty,
    pub mobile_required: bool,
    pub particle_filter_required: bool,
}

// ==========================================
// Operational Factor Extractor
// ==========================================
pub struct OperationalFactorExtractor;

impl OperationalFactorExtractor {
    pub fn extract(asset: &AssetDescriptor, config: &GlobalConfig) -> OperationalFactors {
        let contamination_index =
            Self::contamination_index(asset.contamination_text.as_deref().unwrap_or(""));
        let (water_contact, desiccant_required) =
            Self::water_contact(asset.water_contact_text.as_deref().unwrap_or(""));
        let service_level = config
            .esi_manual
            .unwrap_or_else(|| Self::service_level(contamination_index, water_contact));

        let (humidity_level, avg_humidity_pct) =
            Self::humidity(asset.humidity_text.as_deref().unwrap_or(""));
        let oil_mist_evidence = truthy(asset.oil_mist_text.as_deref().unwrap_or(""));
        let vibration = Self::vibration(asset.vibration_text.as_deref());

        let mobile_required = asset.mobile.unwrap_or(config.mobile_default);
        let particle_filter_required = config.force_high_particle_removal
            || contamination_index == ContaminationIndex::High;

        OperationalFactors {
            contamination_index,
            water_contact,
            desiccant_required,
            service_level,
            humidity_level,
            avg_humidity_pct,
            oil_mist_evidence,
            vibration,
            mobile_required,
            particle_filter_required,
        }
    }

    /// CI matrix: contamination-likelihood text -> index.
    /// Unknown text assumes Medium.
    pub fn contamination_index(text: &str) -> ContaminationIndex {
        match text.trim() {
            "Low" => ContaminationIndex::Low,
            "Medium" => ContaminationIndex::Medium,
            "Severe" | "Extreme" => ContaminationIndex::High,
            _ => ContaminationIndex::Medium,
        }
    }

    /// WCCI matrix: water-contact text -> (class, desiccant need).
    /// Unknown text assumes (Low, desiccant).
    pub fn water_contact(text: &str) -> (WaterContactClass, bool) {
        match text.trim() {
            "No Water Contact, Very Dry Conditions" => (WaterContactClass::VeryLow, false),
            "No Water Contact, Typical Humidity" => (WaterContactClass::Low, true),
            "Typical Humidity, but Occasional Rain"
            | "Nearby Steam/Spray"
            | "Other Mild Water Contact"
            | "Other Moderate Water Contact"
            | "Occasional Washdowns" => (WaterContactClass::Medium, true),
            "Severe Water Contact" | "Submerged in Water" => (WaterContactClass::High, true),
            _ => (WaterContactClass::Low, true),
        }
    }

    /// ESI matrix keyed by (CI, WCCI). Extended service for the
    /// aggressive quadrant, basic otherwise.
    pub fn service_level(ci: ContaminationIndex, wcci: WaterContactClass) -> ServiceLevel {
        use ContaminationIndex as Ci;
        use WaterContactClass as Wc;
        match (ci, wcci) {
            (Ci::Low, Wc::High) => ServiceLevel::Extended,
            (Ci::Medium, Wc::Medium) | (Ci::Medium, Wc::High) => ServiceLevel::Extended,
            (Ci::High, _) => ServiceLevel::Extended,
            _ => ServiceLevel::Basic,
        }
    }

    /// Parse the average RH and classify it. Unparseable text assumes
    /// 50% (Normal) with a warning.
    pub fn humidity(text: &str) -> (HumidityLevel, f64) {
        let cleaned = text.trim().replace('%', "");
        let avg = match cleaned.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                if !cleaned.is_empty() {
                    tracing::warn!(text, "unparseable humidity, assuming {DEFAULT_HUMIDITY_PCT}%");
                }
                DEFAULT_HUMIDITY_PCT
            }
        };
        let level = if avg >= HIGH_HUMIDITY_THRESHOLD_PCT {
            HumidityLevel::High
        } else {
            HumidityLevel::Normal
        };
        (level, avg)
    }

    /// Vibration class from text. Only ">0.4 ips" demands heavy-duty
    /// hardware; anything else (including unparseable text) assumes
    /// the Low/Medium class.
    pub fn vibration(text: Option<&str>) -> VibrationDuty {
        match text.map(|t| t.trim().to_lowercase()) {
            Some(t) if t == ">0.4 ips" => VibrationDuty::HeavyDuty,
            Some(t) if !t.is_empty() => VibrationDuty::Standard,
            _ => {
                tracing::debug!("no vibration data, assuming Low/Medium");
                VibrationDuty::Standard
            }
        }
    }
}

/// Truthy survey text: checkbox-style affirmative markers.
fn truthy(text: &str) -> bool {
    matches!(
        text.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "x" | "1" | "1.0" | "si" | "sí"
    )
}
