// ==========================================
// Breather Advisor - Analysis Result
// ==========================================
// One result per asset. Created fresh, never mutated after return.
// Embeds the full decision trace and the capped rejection log so a
// downstream explainer can reconstruct every elimination.
// ==========================================

use crate::domain::breather::BreatherCandidate;
use crate::domain::types::{ResultStatus, VolumeMethod};
use serde::{Deserialize, Serialize};

// ==========================================
// Capacity Basis
// ==========================================
// How the required CFM was derived: thermal expansion for splash
// systems, flow-rate resolution for circulating systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CapacityBasis {
    Thermal {
        v_sump_gal: f64,
        v_oil_gal: f64,
        v_air_gal: f64,
        delta_t_f: f64,
        volume_method: VolumeMethod,
        safety_factor: f64,
    },
    Flow {
        total_gpm: f64,
        /// Resolution method text, retained for the report
        /// (manual override / cross-reference / estimate / default).
        method: String,
        safety_factor: f64,
    },
}

// ==========================================
// Recommendation
// ==========================================
/// A selected breather plus its installation annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub candidate: BreatherCandidate,
    /// Fit annotation, e.g. "Fits directly." or
    /// "Requires remote installation or space check."
    pub note: Option<String>,
}

impl Recommendation {
    pub fn new(candidate: BreatherCandidate) -> Self {
        Self { candidate, note: None }
    }

    pub fn with_note(candidate: BreatherCandidate, note: impl Into<String>) -> Self {
        Self {
            candidate,
            note: Some(note.into()),
        }
    }
}

// ==========================================
// Rejected Candidate
// ==========================================
/// A candidate dropped at a narrowing stage, kept for explanation.
/// At most the first two rejections per stage are sampled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RejectedCandidate {
    pub model: String,
    pub reason: String,
}

// ==========================================
// Analysis Result
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub asset_id: String,
    pub success: bool,
    pub status: ResultStatus,

    /// Required breathing capacity, CFM. Always >= 0.
    pub required_cfm: f64,
    pub capacity_basis: Option<CapacityBasis>,

    /// Default recommendation(s). One entry for standard criticality;
    /// criticality A yields the best rebuildable plus the best
    /// disposable.
    pub selected: Vec<Recommendation>,
    /// Life-cycle-cost pick (prefers rebuildable products).
    pub lcc: Option<Recommendation>,
    /// Cost-benefit pick (strictly disposable products).
    pub cost_benefit: Option<Recommendation>,

    pub installation_notes: String,
    pub error_message: Option<String>,

    /// Ordered rule trace, one line per rule application.
    pub trace: Vec<String>,
    /// Capped rejection sample (first 2 per rejecting stage).
    pub rejected: Vec<RejectedCandidate>,
}

impl AnalysisResult {
    /// Empty scaffold for an asset. The processor fills it in as the
    /// rules run; failures leave it in a consistent error shape.
    pub fn pending(asset_id: impl Into<String>) -> Self {
        Self {
            asset_id: asset_id.into(),
            success: false,
            status: ResultStatus::Error,
            required_cfm: 0.0,
            capacity_basis: None,
            selected: Vec::new(),
            lcc: None,
            cost_benefit: None,
            installation_notes: String::new(),
            error_message: None,
            trace: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Error-status result for an asset whose processing failed
    /// entirely (caught panic, malformed descriptor).
    pub fn error(asset_id: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            trace: vec![format!("Error: {}", message)],
            installation_notes: "Processing failed due to a critical error.".to_string(),
            error_message: Some(message),
            ..Self::pending(asset_id)
        }
    }
}
