// ==========================================
// Breather Advisor - Domain Layer
// ==========================================
// Entities and closed categorical types. No I/O, no rules.
// ==========================================

pub mod asset;
pub mod breather;
pub mod result;
pub mod types;

pub use asset::AssetDescriptor;
pub use breather::BreatherCandidate;
pub use result::{AnalysisResult, CapacityBasis, Recommendation, RejectedCandidate};
pub use types::{
    ContaminationIndex, Criticality, HumidityLevel, ProductType, ResultStatus, ServiceLevel,
    SystemType, VibrationDuty, VolumeMethod, WaterContactClass,
};
