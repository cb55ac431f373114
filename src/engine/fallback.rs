// ==========================================
// Breather Advisor - Fallback Relaxation Controller
// ==========================================
// When the strict operational pass empties the candidate set, the
// pipeline is replayed from the post-capacity-gate set with a fixed
// sequence of relaxation sets. The sequence is ordered from least to
// most compromising; the first non-empty replay wins and any non-empty
// relaxation downgrades the result to SUBOPTIMAL. Mobile suitability
// is never a member of any set: every replay still applies it
// strictly.
// ==========================================

use crate::domain::BreatherCandidate;
use crate::engine::factors::OperationalFactors;
use crate::engine::filters::{CandidateFilterPipeline, OperationalRule};
use crate::engine::recorder::DecisionRecorder;

/// Relaxation sets in replay order. The capacity gate is never in any
/// set; it has already run before the controller is invoked.
pub const RELAXATION_SEQUENCE: [&[OperationalRule]; 5] = [
    &[OperationalRule::Vibration],
    &[OperationalRule::OilMist],
    &[OperationalRule::Vibration, OperationalRule::OilMist],
    &[OperationalRule::ExtendedService],
    &[
        OperationalRule::Vibration,
        OperationalRule::OilMist,
        OperationalRule::ExtendedService,
    ],
];

// ==========================================
// Relaxation Outcome
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationOutcome {
    pub candidates: Vec<BreatherCandidate>,
    /// Rules skipped to obtain the surviving set. Empty means the
    /// strict pass succeeded.
    pub relaxed: Vec<OperationalRule>,
}

impl RelaxationOutcome {
    pub fn is_strict(&self) -> bool {
        self.relaxed.is_empty()
    }
}

// ==========================================
// Fallback Relaxation Controller
// ==========================================
pub struct FallbackRelaxationController;

impl FallbackRelaxationController {
    /// Run the strict operational pass, then replay with each
    /// relaxation set until one survives. `candidates` is the
    /// post-capacity-gate set; every replay restarts from it.
    /// `None` means no relaxation rescued the asset.
    pub fn run(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
        v_sump_gal: f64,
        recorder: &mut DecisionRecorder,
    ) -> Option<RelaxationOutcome> {
        let strict = CandidateFilterPipeline::operational_stage(
            candidates.to_vec(),
            factors,
            v_sump_gal,
            &[],
            recorder,
        );
        if !strict.is_empty() {
            return Some(RelaxationOutcome {
                candidates: strict,
                relaxed: Vec::new(),
            });
        }

        recorder.line("Strict pass exhausted all candidates, attempting relaxation");
        for relaxed in RELAXATION_SEQUENCE {
            recorder.line(format!("Relaxation replay: skipping {}", rule_list(relaxed)));
            let survivors = CandidateFilterPipeline::operational_stage(
                candidates.to_vec(),
                factors,
                v_sump_gal,
                relaxed,
                recorder,
            );
            if !survivors.is_empty() {
                tracing::info!(relaxed = %rule_list(relaxed), "relaxation rescued the asset");
                return Some(RelaxationOutcome {
                    candidates: survivors,
                    relaxed: relaxed.to_vec(),
                });
            }
        }

        recorder.line("All relaxation replays exhausted, no solution");
        None
    }
}

fn rule_list(rules: &[OperationalRule]) -> String {
    rules
        .iter()
        .map(|r| r.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
