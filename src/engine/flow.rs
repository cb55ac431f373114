// ==========================================
// Breather Advisor - Flow Requirement Resolver
// ==========================================
// Circulating systems only. Resolves the required flow (GPM) and the
// derived breathing capacity (CFM), degrading through four sources:
// manual override -> sibling pump cross-reference -> oil-capacity
// estimate -> fixed per-template default, with a safety floor.
// The resolution method text is retained for the trace/report.
// ==========================================

use crate::config::GlobalConfig;
use crate::domain::AssetDescriptor;
use crate::engine::thermal::GALLONS_PER_CUBIC_FOOT;
use crate::engine::volume::LITERS_TO_GALLONS;
use serde::{Deserialize, Serialize};

/// LPM to GPM conversion.
pub const LPM_TO_GPM: f64 = 0.264172;
/// Divisor for the oil-capacity-based flow estimate.
pub const CAPACITY_ESTIMATE_DIVISOR: f64 = 3.0;
/// Safety-minimum flow floor, GPM.
pub const SAFETY_MINIMUM_GPM: f64 = 15.0;

// ==========================================
// Flow Analysis
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowAnalysis {
    pub total_gpm: f64,
    pub cfm_required: f64,
    /// How the flow was resolved, for the trace/report.
    pub method: String,
    pub safety_factor: f64,
}

// ==========================================
// Flow Requirement Resolver
// ==========================================
pub struct FlowRequirementResolver;

impl FlowRequirementResolver {
    /// Resolve the required flow for a circulating-system asset.
    ///
    /// `dataset` is the full survey snapshot used for the sibling
    /// pump cross-reference; it is never mutated.
    pub fn resolve(
        asset: &AssetDescriptor,
        dataset: &[AssetDescriptor],
        config: &GlobalConfig,
    ) -> FlowAnalysis {
        let (mut gpm, mut method) = Self::resolve_gpm(asset, dataset, config);

        if gpm <= 0.0 {
            gpm = SAFETY_MINIMUM_GPM;
            method = format!("Safety Minimum ({SAFETY_MINIMUM_GPM} GPM)");
        }

        let cfm_required = (gpm / GALLONS_PER_CUBIC_FOOT) * config.safety_factor;
        tracing::debug!(asset_id = %asset.asset_id, gpm, cfm_required, %method, "flow resolved");

        FlowAnalysis {
            total_gpm: gpm,
            cfm_required: cfm_required.max(0.0),
            method,
            safety_factor: config.safety_factor,
        }
    }

    fn resolve_gpm(
        asset: &AssetDescriptor,
        dataset: &[AssetDescriptor],
        config: &GlobalConfig,
    ) -> (f64, String) {
        // (a) manual override from configuration
        if config.manual_flow_enabled && config.manual_flow_gpm > 0.0 {
            return (
                config.manual_flow_gpm,
                format!("Manual Override ({} GPM)", config.manual_flow_gpm),
            );
        }

        // (b) cross-reference: sum of sibling pump flows on the machine
        let siblings = Self::pump_siblings(asset, dataset);
        if !siblings.is_empty() {
            let total: f64 = siblings
                .iter()
                .map(|s| to_gpm(s.flow_rate.unwrap_or(0.0), s.flow_rate_unit.as_deref()))
                .sum();
            if total > 0.0 {
                return (total, format!("Cross-Reference ({} pumps)", siblings.len()));
            }
        }

        // (c) capacity-based estimate
        if let Some(oil_cap_l) = asset.oil_capacity_l.filter(|v| *v > 0.0) {
            let gpm = (oil_cap_l / CAPACITY_ESTIMATE_DIVISOR) * LITERS_TO_GALLONS;
            return (gpm, format!("Estimated from Oil Capacity ({oil_cap_l:.1} L)"));
        }

        // (d) fixed per-template default
        let template = asset
            .maintenance_point
            .as_deref()
            .unwrap_or("")
            .to_lowercase();
        let (gpm, label) = if template.contains("turbine") {
            (60.0, "turbine")
        } else if template.contains("hydraulic") {
            (40.0, "hydraulic")
        } else if template.contains("reservoir") {
            (35.0, "reservoir")
        } else {
            (15.0, "other")
        };
        (gpm, format!("Fixed Estimate ({label})"))
    }

    /// Sibling records sharing the machine identity and classified as
    /// pumps with a positive flow rate. The asset itself is excluded.
    fn pump_siblings<'a>(
        asset: &AssetDescriptor,
        dataset: &'a [AssetDescriptor],
    ) -> Vec<&'a AssetDescriptor> {
        let machine = match asset.machine.as_deref().map(str::trim) {
            Some(m) if !m.is_empty() => m,
            _ => return Vec::new(),
        };

        dataset
            .iter()
            .filter(|other| other.asset_id != asset.asset_id)
            .filter(|other| {
                other
                    .machine
                    .as_deref()
                    .map(|m| m.trim() == machine)
                    .unwrap_or(false)
            })
            .filter(|other| other.is_pump())
            .filter(|other| other.flow_rate.map(|f| f > 0.0).unwrap_or(false))
            .collect()
    }
}

/// Convert a flow value to GPM based on the declared unit text.
/// GPM is assumed when the unit is absent or unrecognized.
fn to_gpm(value: f64, unit: Option<&str>) -> f64 {
    if value <= 0.0 || !value.is_finite() {
        return 0.0;
    }
    match unit {
        Some(u) if u.trim().to_lowercase().contains("lpm") => value * LPM_TO_GPM,
        _ => value,
    }
}
