// ==========================================
// Breather Advisor - Breather Catalog Entry
// ==========================================
// Read-only reference data for a run. Column resolution and cell
// parsing happen exactly once at catalog load; the rule engine only
// ever sees these typed values.
// ==========================================

use crate::domain::types::{ProductType, SystemType};
use serde::{Deserialize, Serialize};

/// One breather product from the vendor catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreatherCandidate {
    /// Position in the loaded catalog. Ranking tie-breaks resolve to
    /// the lowest row, which keeps the total order strict and stable.
    pub row: usize,

    pub brand: String,
    pub model: String,
    pub product_type: ProductType,

    // ===== Capacity ratings =====
    /// Max air flow, CFM. Required by the catalog contract.
    pub max_air_flow_cfm: f64,
    /// Max fluid flow, GPM. Optional; absent means "not rated".
    pub max_fluid_flow_gpm: Option<f64>,

    // ===== Physical envelope =====
    pub height_in: Option<f64>,
    pub diameter_in: Option<f64>,

    /// Adsorption (desiccant) capacity, mL. Comma-formatted catalog
    /// strings are normalized at load; blank parses to 0.
    pub adsorption_ml: f64,

    // ===== Capability flags =====
    pub extended_service: bool,
    pub mobile_rated: bool,
    pub high_vibration: bool,
    pub oil_mist_control: bool,
    /// Rated for 25-75% relative humidity.
    pub rh_25_to_75: bool,
    /// Rated for >75% relative humidity.
    pub rh_over_75: bool,
    pub water_contact_low: bool,
    pub water_contact_medium: bool,
    pub water_contact_high: bool,

    // ===== Sump capacity ratings (gal), by system type =====
    pub sump_max_splash_gal: Option<f64>,
    pub sump_max_circulating_gal: Option<f64>,
}

impl BreatherCandidate {
    /// Full product identity for traces and rejection logs.
    pub fn identity(&self) -> String {
        format!("{} {}", self.brand, self.model)
    }

    /// Rated maximum sump capacity for the given system topology.
    pub fn rated_sump_gal(&self, system_type: SystemType) -> Option<f64> {
        match system_type {
            SystemType::Splash => self.sump_max_splash_gal,
            SystemType::Circulating => self.sump_max_circulating_gal,
        }
    }

    /// Whether the envelope fits within the given clearance limits.
    /// A missing dimension counts as not fitting when a limit exists:
    /// an unverifiable envelope must not be reported as a direct fit.
    pub fn fits_within(&self, height_limit: Option<f64>, diameter_limit: Option<f64>) -> bool {
        if let Some(h_limit) = height_limit {
            match self.height_in {
                Some(h) if h <= h_limit => {}
                _ => return false,
            }
        }
        if let Some(d_limit) = diameter_limit {
            match self.diameter_in {
                Some(d) if d <= d_limit => {}
                _ => return false,
            }
        }
        true
    }
}
