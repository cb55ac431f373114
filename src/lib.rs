// ==========================================
// Breather Advisor - Core Library
// ==========================================
// Decision engine for selecting desiccant breathers for lubricated
// industrial components. Deterministic rule pipeline: identical
// catalog, survey and configuration always produce identical
// recommendations.
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer: entities and closed categorical types
pub mod domain;

// Configuration layer: global defaults + per-asset overrides
pub mod config;

// Engine layer: the rule pipeline
pub mod engine;

// Importer layer: catalog and survey files
pub mod importer;

// Report layer: result merge and export
pub mod report;

// Logging
pub mod logging;

// ==========================================
// Core type re-exports
// ==========================================

// Domain types
pub use domain::types::{
    ContaminationIndex, Criticality, HumidityLevel, ProductType, ResultStatus, ServiceLevel,
    SystemType, VibrationDuty, VolumeMethod, WaterContactClass,
};

// Domain entities
pub use domain::{
    AnalysisResult, AssetDescriptor, BreatherCandidate, CapacityBasis, Recommendation,
    RejectedCandidate,
};

// Configuration
pub use config::{ConfigPatch, GlobalConfig, Overrides};

// Engine
pub use engine::{
    CandidateFilterPipeline, DecisionRecorder, FallbackRelaxationController,
    FlowRequirementResolver, OperationalFactorExtractor, SelectionEngine, SelectionError,
    SelectionRanker, SelectionResult, ThermalExpansionCalculator, VolumeCalculator,
};

// Importer
pub use importer::{AssetLoader, CatalogLoader, ImportError, ImportResult, SurveyData};

// Report
pub use report::{ReportBuilder, ReportOptions};

// ==========================================
// Constants
// ==========================================

// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Application name
pub const APP_NAME: &str = "Breather Advisor";
