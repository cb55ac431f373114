// ==========================================
// Breather Advisor - Selection Processor
// ==========================================
// Per-asset orchestration of the full decision sequence plus the
// batch fan-out. The engine itself is pure and synchronous; the batch
// layer moves each asset onto a blocking worker and isolates panics
// so one poisoned row can never take down a run. Catalog and survey
// snapshots are shared read-only behind an Arc.
// ==========================================

use crate::config::{GlobalConfig, Overrides};
use crate::domain::types::{ResultStatus, SystemType};
use crate::domain::{AnalysisResult, AssetDescriptor, BreatherCandidate, CapacityBasis};
use crate::engine::error::{SelectionError, SelectionResult};
use crate::engine::factors::OperationalFactorExtractor;
use crate::engine::fallback::FallbackRelaxationController;
use crate::engine::filters::{CandidateFilterPipeline, SpaceLimits};
use crate::engine::flow::FlowRequirementResolver;
use crate::engine::ranker::{RankingContext, SelectionRanker};
use crate::engine::recorder::DecisionRecorder;
use crate::engine::thermal::ThermalExpansionCalculator;
use crate::engine::volume::VolumeCalculator;
use std::sync::Arc;

// ==========================================
// Selection Engine
// ==========================================
pub struct SelectionEngine {
    catalog: Arc<Vec<BreatherCandidate>>,
    dataset: Arc<Vec<AssetDescriptor>>,
    config: GlobalConfig,
    overrides: Overrides,
}

impl SelectionEngine {
    /// Build an engine over immutable catalog and survey snapshots.
    /// The brand filter is applied once here; an empty post-filter
    /// catalog fails construction rather than every asset.
    pub fn new(
        catalog: Vec<BreatherCandidate>,
        dataset: Vec<AssetDescriptor>,
        config: GlobalConfig,
        overrides: Overrides,
    ) -> SelectionResult<Self> {
        let catalog = match config.brand_filter.as_deref() {
            Some(brand) => {
                let wanted = brand.trim().to_lowercase();
                catalog
                    .into_iter()
                    .filter(|c| c.brand.trim().to_lowercase() == wanted)
                    .collect()
            }
            None => catalog,
        };

        if catalog.is_empty() {
            let qualifier = match config.brand_filter.as_deref() {
                Some(brand) => format!(" (brand filter: {brand})"),
                None => String::new(),
            };
            return Err(SelectionError::MissingCatalog(qualifier));
        }

        tracing::info!(
            catalog = catalog.len(),
            assets = dataset.len(),
            "selection engine ready"
        );

        Ok(Self {
            catalog: Arc::new(catalog),
            dataset: Arc::new(dataset),
            config,
            overrides,
        })
    }

    pub fn dataset(&self) -> &[AssetDescriptor] {
        &self.dataset
    }

    /// Analyze one asset. Infallible by contract: every failure mode
    /// is folded into an Error-status result.
    pub fn analyze(&self, asset: &AssetDescriptor) -> AnalysisResult {
        let mut recorder = DecisionRecorder::new();
        match self.analyze_inner(asset, &mut recorder) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(asset_id = %asset.asset_id, %err, "asset analysis failed");
                let mut result = AnalysisResult::error(&asset.asset_id, err.to_string());
                // Incomplete survey data is a selection outcome, not a
                // processing failure; the asset is not retried.
                if matches!(err, SelectionError::InsufficientData(_)) {
                    result.status = ResultStatus::NoSolutionFound;
                    result.installation_notes =
                        "No selection possible: insufficient survey data for this component."
                            .to_string();
                }
                let (mut trace, rejected) = recorder.into_parts();
                trace.push(format!("Error: {err}"));
                result.trace = trace;
                result.rejected = rejected;
                result
            }
        }
    }

    fn analyze_inner(
        &self,
        asset: &AssetDescriptor,
        recorder: &mut DecisionRecorder,
    ) -> SelectionResult<AnalysisResult> {
        let config = self
            .config
            .resolve_effective(self.overrides.get(&asset.asset_id));

        let mut result = AnalysisResult::pending(&asset.asset_id);
        let mut notes: Vec<String> = Vec::new();

        // Criticality policy gate
        let criticality = asset.criticality.unwrap_or(config.default_criticality);
        recorder.line(format!(
            "Criticality {criticality}: breather {}",
            if criticality.breather_required() { "required" } else { "not required" }
        ));
        if !criticality.breather_required() {
            result.success = true;
            result.status = ResultStatus::NoBreatherRequired;
            result.installation_notes =
                "Criticality C: no desiccant breather required for this component.".to_string();
            let (trace, rejected) = std::mem::take(recorder).into_parts();
            result.trace = trace;
            result.rejected = rejected;
            return Ok(result);
        }

        // Capacity requirement, by system topology
        let volumes = VolumeCalculator::calculate(asset);
        if let Some(warning) = &volumes.warning {
            if volumes.method != crate::domain::types::VolumeMethod::InsufficientData {
                recorder.line(warning.clone());
                notes.push(warning.clone());
            }
        }

        let required_cfm;
        let mut required_gpm = None;
        match asset.system_type {
            SystemType::Splash => {
                let thermal = ThermalExpansionCalculator::required_cfm(
                    &volumes,
                    asset.operating_temp_text.as_deref(),
                    &config,
                )?;
                recorder.line(format!(
                    "Thermal basis: ΔT {:.1}°F over {:.2} gal sump, {:.4} CFM required",
                    thermal.delta_t_f, volumes.v_sump_gal, thermal.cfm_required
                ));
                required_cfm = thermal.cfm_required;
                result.capacity_basis = Some(CapacityBasis::Thermal {
                    v_sump_gal: volumes.v_sump_gal,
                    v_oil_gal: volumes.v_oil_gal,
                    v_air_gal: volumes.v_air_gal,
                    delta_t_f: thermal.delta_t_f,
                    volume_method: volumes.method,
                    safety_factor: thermal.safety_factor,
                });
            }
            SystemType::Circulating => {
                let flow = FlowRequirementResolver::resolve(asset, &self.dataset, &config);
                recorder.line(format!(
                    "Flow basis: {:.1} GPM via {}, {:.4} CFM required",
                    flow.total_gpm, flow.method, flow.cfm_required
                ));
                required_cfm = flow.cfm_required;
                required_gpm = Some(flow.total_gpm);
                notes.push(format!("Flow resolution: {}", flow.method));
                result.capacity_basis = Some(CapacityBasis::Flow {
                    total_gpm: flow.total_gpm,
                    method: flow.method,
                    safety_factor: flow.safety_factor,
                });
            }
        }
        result.required_cfm = required_cfm;

        // Operational factor extraction
        let factors = OperationalFactorExtractor::extract(asset, &config);
        recorder.line(format!(
            "Factors: CI={} WCCI={} ESI={} RH={:.0}% ({}) vibration={} mobile={}",
            factors.contamination_index,
            factors.water_contact,
            factors.service_level,
            factors.avg_humidity_pct,
            factors.humidity_level,
            factors.vibration,
            factors.mobile_required
        ));

        // Terminal gates
        let mut candidates: Vec<BreatherCandidate> = self.catalog.to_vec();
        if let Some(gpm) = required_gpm {
            candidates = CandidateFilterPipeline::fluid_flow_gate(&candidates, gpm, recorder);
            if candidates.is_empty() {
                return Ok(self.no_solution(result, recorder, notes));
            }
        }
        candidates = CandidateFilterPipeline::capacity_gate(&candidates, required_cfm, recorder);
        if candidates.is_empty() {
            return Ok(self.no_solution(result, recorder, notes));
        }

        // Operational pass with fallback relaxation
        let outcome = match FallbackRelaxationController::run(
            &candidates,
            &factors,
            volumes.v_sump_gal,
            recorder,
        ) {
            Some(outcome) => outcome,
            None => return Ok(self.no_solution(result, recorder, notes)),
        };
        let strict_pass = outcome.is_strict();
        if !strict_pass {
            notes.push(format!(
                "Suboptimal: selected after relaxing {}.",
                outcome
                    .relaxed
                    .iter()
                    .map(|r| r.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }

        // Sump gate and space-fit split
        let survivors = CandidateFilterPipeline::sump_gate(
            outcome.candidates,
            volumes.v_oil_gal,
            asset.system_type,
            recorder,
        );

        let limits = SpaceLimits::parse(asset.clearance_text.as_deref());
        let (fitting, non_fitting) =
            CandidateFilterPipeline::space_split(survivors.clone(), &limits, recorder);

        // Ranking and the three selection views
        let ctx = RankingContext {
            system_type: asset.system_type,
            required_cfm,
            v_oil_gal: volumes.v_oil_gal,
        };
        let selected = SelectionRanker::select(&fitting, &non_fitting, criticality, &ctx);
        if selected.is_empty() {
            return Ok(self.no_solution(result, recorder, notes));
        }
        result.lcc = SelectionRanker::lcc_pick(&survivors, &ctx).map(crate::domain::Recommendation::new);
        result.cost_benefit =
            SelectionRanker::cost_benefit_pick(&survivors, &ctx).map(crate::domain::Recommendation::new);

        // Status: only a missing port forces the remote-installation
        // status; a too-tight clearance is a suboptimal pick with a
        // remote-kit note.
        result.status = if limits.no_port {
            notes.push(
                "No direct port fit available; plan a remote installation kit.".to_string(),
            );
            ResultStatus::RemoteInstallation
        } else if fitting.is_empty() {
            notes.push(
                "No candidate fits the available clearance; plan a remote installation kit."
                    .to_string(),
            );
            ResultStatus::Suboptimal
        } else if strict_pass {
            ResultStatus::Optimal
        } else {
            ResultStatus::Suboptimal
        };
        result.success = true;
        result.selected = selected;
        recorder.line(format!(
            "Selected {} recommendation(s), status {}",
            result.selected.len(),
            result.status
        ));

        result.installation_notes = notes.join(" ");
        let (trace, rejected) = std::mem::take(recorder).into_parts();
        result.trace = trace;
        result.rejected = rejected;
        Ok(result)
    }

    /// Consistent NO_SOLUTION_FOUND shape.
    fn no_solution(
        &self,
        mut result: AnalysisResult,
        recorder: &mut DecisionRecorder,
        mut notes: Vec<String>,
    ) -> AnalysisResult {
        recorder.line("No breather satisfies the hard constraints");
        notes.push(
            "No catalog breather satisfies the hard constraints for this component.".to_string(),
        );
        result.success = false;
        result.status = ResultStatus::NoSolutionFound;
        result.installation_notes = notes.join(" ");
        let (trace, rejected) = std::mem::take(recorder).into_parts();
        result.trace = trace;
        result.rejected = rejected;
        result
    }

    /// Analyze the whole survey snapshot. One blocking task per asset;
    /// input order is preserved and a panicking task degrades to an
    /// Error-status result for that asset only.
    pub async fn analyze_all(self: &Arc<Self>) -> Vec<AnalysisResult> {
        let mut handles = Vec::with_capacity(self.dataset.len());
        for asset in self.dataset.iter().cloned() {
            let engine = Arc::clone(self);
            handles.push((
                asset.asset_id.clone(),
                tokio::task::spawn_blocking(move || engine.analyze(&asset)),
            ));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (asset_id, handle) in handles {
            match handle.await {
                Ok(result) => results.push(result),
                Err(join_err) => {
                    tracing::error!(%asset_id, %join_err, "analysis task panicked");
                    results.push(AnalysisResult::error(
                        asset_id,
                        format!("analysis task failed: {join_err}"),
                    ));
                }
            }
        }
        results
    }
}
