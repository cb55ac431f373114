// ==========================================
// Breather Advisor - Run Configuration
// ==========================================
// Immutable process-wide defaults plus per-asset override patches.
// effective_config = global ⊕ overrides[asset_id], override wins
// key-by-key. The merged value is passed explicitly through every
// call; there is no shared mutable configuration anywhere.
// ==========================================

use crate::domain::types::{Criticality, ServiceLevel};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Ambient temperature defaults, °F. Ambient bounds are never absent
/// in an effective configuration.
pub const DEFAULT_MIN_AMBIENT_F: f64 = 60.0;
pub const DEFAULT_MAX_AMBIENT_F: f64 = 80.0;

/// Default CFM safety factor.
pub const DEFAULT_SAFETY_FACTOR: f64 = 1.4;

// ==========================================
// Global Configuration
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    pub min_ambient_f: f64,
    pub max_ambient_f: f64,
    pub safety_factor: f64,
    /// Criticality assumed when the survey row carries none.
    pub default_criticality: Criticality,
    /// Restrict the catalog to one brand; `None` means all brands.
    pub brand_filter: Option<String>,
    /// Manual flow override for circulating systems.
    pub manual_flow_enabled: bool,
    pub manual_flow_gpm: f64,
    /// Manual extended-service override; `None` derives ESI from the
    /// contamination/water-contact matrix.
    pub esi_manual: Option<ServiceLevel>,
    pub force_high_particle_removal: bool,
    /// Mobile-equipment assumption when the asset carries no flag.
    pub mobile_default: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            min_ambient_f: DEFAULT_MIN_AMBIENT_F,
            max_ambient_f: DEFAULT_MAX_AMBIENT_F,
            safety_factor: DEFAULT_SAFETY_FACTOR,
            default_criticality: Criticality::A,
            brand_filter: None,
            manual_flow_enabled: false,
            manual_flow_gpm: 0.0,
            esi_manual: None,
            force_high_particle_removal: false,
            mobile_default: false,
        }
    }
}

// ==========================================
// Per-asset Override Patch
// ==========================================
/// Partial configuration applied on top of the global defaults for a
/// single asset. `None` fields leave the global value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigPatch {
    pub min_ambient_f: Option<f64>,
    pub max_ambient_f: Option<f64>,
    pub safety_factor: Option<f64>,
    pub criticality: Option<Criticality>,
    pub manual_flow_enabled: Option<bool>,
    pub manual_flow_gpm: Option<f64>,
    pub esi_manual: Option<ServiceLevel>,
    pub force_high_particle_removal: Option<bool>,
    pub mobile: Option<bool>,
}

/// Asset-id keyed override map.
pub type Overrides = HashMap<String, ConfigPatch>;

// ==========================================
// Effective Configuration
// ==========================================
impl GlobalConfig {
    /// Merge a per-asset patch on top of the global configuration.
    ///
    /// Ambient bounds are re-defaulted if any source left them
    /// non-finite: thermal calculation must never see an absent or
    /// NaN ambient temperature.
    pub fn resolve_effective(&self, patch: Option<&ConfigPatch>) -> GlobalConfig {
        let mut effective = self.clone();

        if let Some(patch) = patch {
            if let Some(v) = patch.min_ambient_f {
                effective.min_ambient_f = v;
            }
            if let Some(v) = patch.max_ambient_f {
                effective.max_ambient_f = v;
            }
            if let Some(v) = patch.safety_factor {
                effective.safety_factor = v;
            }
            if let Some(v) = patch.criticality {
                effective.default_criticality = v;
            }
            if let Some(v) = patch.manual_flow_enabled {
                effective.manual_flow_enabled = v;
            }
            if let Some(v) = patch.manual_flow_gpm {
                effective.manual_flow_gpm = v;
            }
            if let Some(v) = patch.esi_manual {
                effective.esi_manual = Some(v);
            }
            if let Some(v) = patch.force_high_particle_removal {
                effective.force_high_particle_removal = v;
            }
            if let Some(v) = patch.mobile {
                effective.mobile_default = v;
            }
        }

        if !effective.min_ambient_f.is_finite() {
            tracing::warn!("min_ambient_f invalid, falling back to {DEFAULT_MIN_AMBIENT_F}°F");
            effective.min_ambient_f = DEFAULT_MIN_AMBIENT_F;
        }
        if !effective.max_ambient_f.is_finite() {
            tracing::warn!("max_ambient_f invalid, falling back to {DEFAULT_MAX_AMBIENT_F}°F");
            effective.max_ambient_f = DEFAULT_MAX_AMBIENT_F;
        }
        if !(effective.safety_factor.is_finite() && effective.safety_factor > 0.0) {
            tracing::warn!("safety_factor invalid, falling back to {DEFAULT_SAFETY_FACTOR}");
            effective.safety_factor = DEFAULT_SAFETY_FACTOR;
        }

        effective
    }
}
