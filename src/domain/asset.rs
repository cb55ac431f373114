// ==========================================
// Breather Advisor - Asset Descriptor
// ==========================================
// One lubrication point as reported in the machinery survey.
// Immutable per run: the engine never mutates an AssetDescriptor.
// ==========================================

use crate::domain::types::{Criticality, SystemType};
use serde::{Deserialize, Serialize};

/// A single lubrication point to select a breather for.
///
/// Dimensional and environmental fields are optional: the engine is
/// required to degrade gracefully when survey data is incomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Stable row identity from the source report. Results are keyed
    /// and merged back by this id.
    pub asset_id: String,

    /// Machine the maintenance point belongs to (sibling lookup key).
    pub machine: Option<String>,
    /// Maintenance-point template text, e.g. "Pump (Oil)". Used for
    /// pump classification and per-template flow defaults.
    pub maintenance_point: Option<String>,

    /// Criticality class; falls back to the configured default when
    /// the survey row carries none.
    pub criticality: Option<Criticality>,
    pub system_type: SystemType,

    // ===== Volumetric data =====
    /// Declared oil capacity, liters.
    pub oil_capacity_l: Option<f64>,
    /// Housing height, inches (mm tolerated, normalized at load).
    pub height_in: Option<f64>,
    pub width_in: Option<f64>,
    pub length_in: Option<f64>,
    /// Distance from drain port to oil level, inches.
    pub oil_level_distance_in: Option<f64>,

    // ===== Flow data (circulating) =====
    pub flow_rate: Option<f64>,
    /// Flow rate unit text, "gpm" assumed when absent.
    pub flow_rate_unit: Option<String>,

    // ===== Environmental descriptors (free text from the survey) =====
    pub operating_temp_text: Option<String>,
    pub humidity_text: Option<String>,
    pub water_contact_text: Option<String>,
    pub contamination_text: Option<String>,
    pub vibration_text: Option<String>,
    pub oil_mist_text: Option<String>,
    /// Breather/fill port clearance text, drives the space-fit split.
    pub clearance_text: Option<String>,
    pub mounting_position: Option<String>,
    /// Mobile-equipment flag; falls back to the configured default.
    pub mobile: Option<bool>,
}

impl AssetDescriptor {
    /// Minimal descriptor with only identity and system type set.
    /// Everything else starts absent; loaders and tests fill in fields.
    pub fn new(asset_id: impl Into<String>, system_type: SystemType) -> Self {
        Self {
            asset_id: asset_id.into(),
            machine: None,
            maintenance_point: None,
            criticality: None,
            system_type,
            oil_capacity_l: None,
            height_in: None,
            width_in: None,
            length_in: None,
            oil_level_distance_in: None,
            flow_rate: None,
            flow_rate_unit: None,
            operating_temp_text: None,
            humidity_text: None,
            water_contact_text: None,
            contamination_text: None,
            vibration_text: None,
            oil_mist_text: None,
            clearance_text: None,
            mounting_position: None,
            mobile: None,
        }
    }

    /// Whether this maintenance point is a pump (sibling flow source).
    pub fn is_pump(&self) -> bool {
        self.maintenance_point
            .as_deref()
            .map(|mp| mp.to_lowercase().contains("pump"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pump_matches_template_text() {
        let mut asset = AssetDescriptor::new("A1", SystemType::Circulating);
        assert!(!asset.is_pump());

        asset.maintenance_point = Some("Pump (Oil)".to_string());
        assert!(asset.is_pump());

        asset.maintenance_point = Some("Gearbox Housing (Oil)".to_string());
        assert!(!asset.is_pump());
    }
}
