// ==========================================
// Breather Advisor - Rule Engine Layer
// ==========================================
// Pure decision logic. Everything here operates on typed domain
// values; parsing and I/O live in the importer/report layers.
// ==========================================

pub mod error;
pub mod factors;
pub mod fallback;
pub mod filters;
pub mod flow;
pub mod processor;
pub mod ranker;
pub mod recorder;
pub mod thermal;
pub mod volume;

pub use error::{SelectionError, SelectionResult};
pub use factors::{OperationalFactorExtractor, OperationalFactors};
pub use fallback::{FallbackRelaxationController, RelaxationOutcome, RELAXATION_SEQUENCE};
pub use filters::{
    CandidateFilterPipeline, FilterOutcome, OperationalRule, SpaceLimits,
    OPERATIONAL_RULE_ORDER,
};
pub use flow::{FlowAnalysis, FlowRequirementResolver};
pub use processor::SelectionEngine;
pub use ranker::{RankingContext, SelectionRanker};
pub use recorder::DecisionRecorder;
pub use thermal::{ThermalAnalysis, ThermalExpansionCalculator};
pub use volume::{VolumeCalculator, VolumeEstimate};
