// ==========================================
// Breather Advisor - Decision Recorder
// ==========================================
// Accumulates one trace line per rule application and a capped sample
// of rejected candidates per narrowing stage. The final result embeds
// both verbatim; nothing is summarized.
// ==========================================

use crate::domain::{BreatherCandidate, RejectedCandidate};
use std::collections::HashSet;

/// How many rejections are sampled per rejecting stage.
pub const REJECTION_SAMPLE_PER_STAGE: usize = 2;

#[derive(Debug, Default)]
pub struct DecisionRecorder {
    trace: Vec<String>,
    rejected: Vec<RejectedCandidate>,
}

impl DecisionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one trace line.
    pub fn line(&mut self, line: impl Into<String>) {
        self.trace.push(line.into());
    }

    /// Append several trace lines in order.
    pub fn lines<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for l in lines {
            self.trace.push(l.into());
        }
    }

    /// Sample the first candidates dropped between two stage sets.
    pub fn record_rejections(
        &mut self,
        before: &[BreatherCandidate],
        after: &[BreatherCandidate],
        reason: &str,
    ) {
        if after.len() >= before.len() {
            return;
        }
        let surviving: HashSet<usize> = after.iter().map(|c| c.row).collect();
        for candidate in before
            .iter()
            .filter(|c| !surviving.contains(&c.row))
            .take(REJECTION_SAMPLE_PER_STAGE)
        {
            self.rejected.push(RejectedCandidate {
                model: candidate.identity(),
                reason: reason.to_string(),
            });
        }
    }

    pub fn trace(&self) -> &[String] {
        &self.trace
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<RejectedCandidate>) {
        (self.trace, self.rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProductType;

    fn candidate(row: usize, model: &str) -> BreatherCandidate {
        BreatherCandidate {
            row,
            brand: "Acme".to_string(),
            model: model.to_string(),
            product_type: ProductType::Disposable,
            max_air_flow_cfm: 1.0,
            max_fluid_flow_gpm: None,
            height_in: None,
            diameter_in: None,
            adsorption_ml: 0.0,
            extended_service: false,
            mobile_rated: false,
            high_vibration: false,
            oil_mist_control: false,
            rh_25_to_75: true,
            rh_over_75: false,
            water_contact_low: true,
            water_contact_medium: false,
            water_contact_high: false,
            sump_max_splash_gal: None,
            sump_max_circulating_gal: None,
        }
    }

    #[test]
    fn test_rejection_sample_capped_at_two() {
        let before = vec![
            candidate(0, "B0"),
            candidate(1, "B1"),
            candidate(2, "B2"),
            candidate(3, "B3"),
        ];
        let after = vec![candidate(3, "B3")];

        let mut recorder = DecisionRecorder::new();
        recorder.record_rejections(&before, &after, "Capacity gate");

        let (_, rejected) = recorder.into_parts();
        assert_eq!(rejected.len(), 2);
        assert_eq!(rejected[0].model, "Acme B0");
        assert_eq!(rejected[1].model, "Acme B1");
        assert_eq!(rejected[0].reason, "Capacity gate");
    }

    #[test]
    fn test_no_rejections_when_set_unchanged() {
        let set = vec![candidate(0, "B0")];
        let mut recorder = DecisionRecorder::new();
        recorder.record_rejections(&set, &set, "noop");
        let (_, rejected) = recorder.into_parts();
        assert!(rejected.is_empty());
    }
}
