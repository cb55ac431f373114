// ==========================================
// Breather Advisor - Candidate Filter Pipeline
// ==========================================
// Sequential catalog narrowing. Stage order:
//   1. fluid-flow gate (circulating only, terminal)
//   2. capacity gate (terminal, never relaxed)
//   3. operational filters (inclusive-fallback, mobile strict)
//   4. sump-capacity gate (inclusive-fallback)
//   5. space-fit split
// Every filter returns an explicit FilterOutcome; emptiness and
// fallback are values, never exceptions. The candidate set only
// shrinks within one pass.
// ==========================================

use crate::domain::types::{ContaminationIndex, HumidityLevel, ServiceLevel, SystemType,
    VibrationDuty, WaterContactClass};
use crate::domain::BreatherCandidate;
use crate::engine::factors::OperationalFactors;
use crate::engine::recorder::DecisionRecorder;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this sump volume (gal) mist protection is irrelevant and the
/// oil-mist filter is skipped entirely.
pub const OIL_MIST_MIN_SUMP_GAL: f64 = 15.0;

// ==========================================
// Operational Rules
// ==========================================
// Identifies a single operational filter, used both for trace labels
// and for the relaxation sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationalRule {
    WaterContact,
    ExtendedService,
    Humidity,
    Contamination,
    OilMist,
    Vibration,
    Mobile,
}

impl fmt::Display for OperationalRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationalRule::WaterContact => write!(f, "water contact"),
            OperationalRule::ExtendedService => write!(f, "extended service"),
            OperationalRule::Humidity => write!(f, "humidity"),
            OperationalRule::Contamination => write!(f, "contamination"),
            OperationalRule::OilMist => write!(f, "oil mist"),
            OperationalRule::Vibration => write!(f, "vibration"),
            OperationalRule::Mobile => write!(f, "mobile"),
        }
    }
}

/// Fixed application order of the operational filters.
pub const OPERATIONAL_RULE_ORDER: [OperationalRule; 7] = [
    OperationalRule::WaterContact,
    OperationalRule::ExtendedService,
    OperationalRule::Humidity,
    OperationalRule::Contamination,
    OperationalRule::OilMist,
    OperationalRule::Vibration,
    OperationalRule::Mobile,
];

// ==========================================
// Filter Outcome
// ==========================================
/// Result of one filter application.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
    /// The ideal subset was non-empty and is kept.
    Filtered(Vec<BreatherCandidate>),
    /// The ideal subset was empty; the pre-filter set is kept and the
    /// fallback recorded (inclusive-fallback policy).
    FallbackKept(Vec<BreatherCandidate>, String),
    /// The filter emptied the set and is not allowed to fall back
    /// (strict rules and terminal gates).
    Empty,
}

impl FilterOutcome {
    /// Inclusive-fallback constructor: keep the ideal subset when
    /// non-empty, else keep the original set with a fallback reason.
    fn inclusive(
        original: &[BreatherCandidate],
        ideal: Vec<BreatherCandidate>,
        fallback_reason: String,
    ) -> Self {
        if ideal.is_empty() {
            FilterOutcome::FallbackKept(original.to_vec(), fallback_reason)
        } else {
            FilterOutcome::Filtered(ideal)
        }
    }

    pub fn candidates(&self) -> &[BreatherCandidate] {
        match self {
            FilterOutcome::Filtered(c) | FilterOutcome::FallbackKept(c, _) => c,
            FilterOutcome::Empty => &[],
        }
    }
}

// ==========================================
// Space Limits
// ==========================================
/// Clearance limits parsed from the breather/fill-port text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpaceLimits {
    pub height_limit_in: Option<f64>,
    pub diameter_limit_in: Option<f64>,
    /// Whether the survey supplied any clearance data at all.
    pub provided: bool,
    /// "No port available": remote installation is the only option.
    pub no_port: bool,
}

impl SpaceLimits {
    pub fn unconstrained() -> Self {
        Self {
            height_limit_in: None,
            diameter_limit_in: None,
            provided: false,
            no_port: false,
        }
    }

    /// Parse the survey clearance text into limits. Unrecognized text
    /// is treated as unconstrained.
    pub fn parse(text: Option<&str>) -> Self {
        let text = match text.map(str::trim) {
            Some(t) if !t.is_empty() => t.to_lowercase(),
            _ => return Self::unconstrained(),
        };

        let with_limits = |h: Option<f64>, d: Option<f64>, no_port: bool| Self {
            height_limit_in: h,
            diameter_limit_in: d,
            provided: true,
            no_port,
        };

        if text.contains("less than 2 inches") {
            with_limits(Some(2.0), Some(2.0), false)
        } else if text.contains("2 to <4 inches") {
            with_limits(Some(4.0), Some(4.0), false)
        } else if text.contains("4 to <6 inches") {
            with_limits(Some(6.0), Some(6.0), false)
        } else if text.contains("greater than 6 inches") {
            with_limits(None, None, false)
        } else if text.contains("no port available") {
            with_limits(Some(0.0), Some(0.0), true)
        } else {
            tracing::warn!(%text, "unrecognized clearance text, treating as unconstrained");
            Self::unconstrained()
        }
    }
}

// ==========================================
// Candidate Filter Pipeline
// ==========================================
pub struct CandidateFilterPipeline;

impl CandidateFilterPipeline {
    /// Fluid-flow gate (circulating systems). Candidates with a rated
    /// max fluid flow below the required GPM are dropped; unrated
    /// candidates pass. Empty result is terminal.
    pub fn fluid_flow_gate(
        candidates: &[BreatherCandidate],
        required_gpm: f64,
        recorder: &mut DecisionRecorder,
    ) -> Vec<BreatherCandidate> {
        let survivors: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| c.max_fluid_flow_gpm.map(|g| g >= required_gpm).unwrap_or(true))
            .cloned()
            .collect();
        recorder.record_rejections(candidates, &survivors, "Fluid flow gate");
        recorder.line(format!(
            "Fluid flow gate: breather GPM >= {:.1} required, {} candidates remain",
            required_gpm,
            survivors.len()
        ));
        survivors
    }

    /// Capacity gate: max air flow >= required CFM. Terminal when
    /// empty; never relaxed.
    pub fn capacity_gate(
        candidates: &[BreatherCandidate],
        required_cfm: f64,
        recorder: &mut DecisionRecorder,
    ) -> Vec<BreatherCandidate> {
        let survivors: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| c.max_air_flow_cfm >= required_cfm)
            .cloned()
            .collect();
        recorder.record_rejections(candidates, &survivors, "Capacity gate");
        recorder.line(format!(
            "Capacity gate: CFM >= {:.2} required, {} candidates remain",
            required_cfm,
            survivors.len()
        ));
        survivors
    }

    /// Run the operational filters in their fixed order, skipping any
    /// rule named in `relaxed`. Non-mobile rules use the inclusive
    /// fallback; mobile is strict when required. The returned set may
    /// be empty (the relaxation controller deals with that).
    pub fn operational_stage(
        candidates: Vec<BreatherCandidate>,
        factors: &OperationalFactors,
        v_sump_gal: f64,
        relaxed: &[OperationalRule],
        recorder: &mut DecisionRecorder,
    ) -> Vec<BreatherCandidate> {
        let mut current = candidates;

        for rule in OPERATIONAL_RULE_ORDER {
            if relaxed.contains(&rule) {
                recorder.line(format!("Operational filter ({rule}): skipped (relaxed)"));
                continue;
            }
            if rule == OperationalRule::OilMist && v_sump_gal < OIL_MIST_MIN_SUMP_GAL {
                recorder.line(format!(
                    "Operational filter (oil mist): skipped, sump volume {:.2} gal < {} gal",
                    v_sump_gal, OIL_MIST_MIN_SUMP_GAL
                ));
                continue;
            }

            let before = current.clone();
            let outcome = Self::apply_rule(rule, &current, factors);
            match outcome {
                FilterOutcome::Filtered(survivors) => {
                    recorder.record_rejections(&before, &survivors, &rule_reason(rule));
                    recorder.line(format!(
                        "Operational filter ({rule}): {} candidates remain",
                        survivors.len()
                    ));
                    current = survivors;
                }
                FilterOutcome::FallbackKept(kept, reason) => {
                    recorder.line(format!("Operational filter ({rule}): {reason} (fallback)"));
                    current = kept;
                }
                FilterOutcome::Empty => {
                    recorder.record_rejections(&before, &[], &rule_reason(rule));
                    recorder.line(format!(
                        "Operational filter ({rule}): no compliant candidates (strict)"
                    ));
                    return Vec::new();
                }
            }
            if current.is_empty() {
                return current;
            }
        }
        current
    }

    /// Apply a single operational rule.
    pub fn apply_rule(
        rule: OperationalRule,
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        match rule {
            OperationalRule::WaterContact => Self::water_contact_filter(candidates, factors),
            OperationalRule::ExtendedService => Self::extended_service_filter(candidates, factors),
            OperationalRule::Humidity => Self::humidity_filter(candidates, factors),
            OperationalRule::Contamination => Self::contamination_filter(candidates, factors),
            OperationalRule::OilMist => Self::oil_mist_filter(candidates, factors),
            OperationalRule::Vibration => Self::vibration_filter(candidates, factors),
            OperationalRule::Mobile => Self::mobile_filter(candidates, factors),
        }
    }

    fn water_contact_filter(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        let wcci = factors.water_contact;
        let ideal: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| match wcci {
                WaterContactClass::VeryLow | WaterContactClass::Low => c.water_contact_low,
                WaterContactClass::Medium => c.water_contact_medium,
                WaterContactClass::High => c.water_contact_high,
            })
            .cloned()
            .collect();
        FilterOutcome::inclusive(
            candidates,
            ideal,
            format!("no candidates rated for WCCI={wcci}"),
        )
    }

    fn extended_service_filter(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        let want_extended = factors.service_level == ServiceLevel::Extended;
        let ideal: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| c.extended_service == want_extended)
            .cloned()
            .collect();
        let reason = if want_extended {
            "no extended-service candidates available".to_string()
        } else {
            "only extended-service candidates available".to_string()
        };
        FilterOutcome::inclusive(candidates, ideal, reason)
    }

    fn humidity_filter(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        let high = factors.humidity_level == HumidityLevel::High;
        let ideal: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| if high { c.rh_over_75 } else { c.rh_25_to_75 })
            .cloned()
            .collect();
        FilterOutcome::inclusive(
            candidates,
            ideal,
            format!(
                "no candidates rated for RH {:.1}% ({})",
                factors.avg_humidity_pct, factors.humidity_level
            ),
        )
    }

    /// High contamination (or the forced flag) demands high particle
    /// filtration, approximated by the extended-service line. Low CI
    /// without the forced flag applies no filter.
    fn contamination_filter(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        if factors.contamination_index == ContaminationIndex::Low
            && !factors.particle_filter_required
        {
            return FilterOutcome::Filtered(candidates.to_vec());
        }
        let ideal: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| c.extended_service)
            .cloned()
            .collect();
        FilterOutcome::inclusive(
            candidates,
            ideal,
            format!(
                "no high-filtration candidates for CI={}",
                factors.contamination_index
            ),
        )
    }

    fn oil_mist_filter(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        let need_mist = factors.oil_mist_evidence;
        let ideal: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| c.oil_mist_control == need_mist)
            .cloned()
            .collect();
        let reason = if need_mist {
            "oil mist control required but no capable candidates".to_string()
        } else {
            "only oil-mist-capable candidates available".to_string()
        };
        FilterOutcome::inclusive(candidates, ideal, reason)
    }

    fn vibration_filter(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        let heavy = factors.vibration == VibrationDuty::HeavyDuty;
        let ideal: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| c.high_vibration == heavy)
            .cloned()
            .collect();
        let reason = if heavy {
            "no heavy-duty candidates for high vibration".to_string()
        } else {
            "only heavy-duty candidates available".to_string()
        };
        FilterOutcome::inclusive(candidates, ideal, reason)
    }

    /// Mobile use is strict when required: a candidate without the
    /// mobile rating must never pass, even if that empties the set.
    /// When not required, mobile-only catalogs fall back inclusively.
    fn mobile_filter(
        candidates: &[BreatherCandidate],
        factors: &OperationalFactors,
    ) -> FilterOutcome {
        if factors.mobile_required {
            let compliant: Vec<BreatherCandidate> = candidates
                .iter()
                .filter(|c| c.mobile_rated)
                .cloned()
                .collect();
            if compliant.is_empty() {
                FilterOutcome::Empty
            } else {
                FilterOutcome::Filtered(compliant)
            }
        } else {
            let ideal: Vec<BreatherCandidate> = candidates
                .iter()
                .filter(|c| !c.mobile_rated)
                .cloned()
                .collect();
            FilterOutcome::inclusive(
                candidates,
                ideal,
                "only mobile-rated candidates available".to_string(),
            )
        }
    }

    /// Sump-capacity gate: rated max sump volume (column by system
    /// type) >= the asset's oil volume. Skipped when the oil volume
    /// is unknown; inclusive fallback with a warning when it would
    /// empty the set. Candidates without a rating are dropped from
    /// the ideal subset.
    pub fn sump_gate(
        candidates: Vec<BreatherCandidate>,
        v_oil_gal: f64,
        system_type: SystemType,
        recorder: &mut DecisionRecorder,
    ) -> Vec<BreatherCandidate> {
        if v_oil_gal <= 0.0 {
            recorder.line("Sump capacity gate: skipped (asset oil volume is 0)");
            return candidates;
        }

        let ideal: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| {
                c.rated_sump_gal(system_type)
                    .map(|rated| rated >= v_oil_gal)
                    .unwrap_or(false)
            })
            .cloned()
            .collect();

        if ideal.is_empty() {
            tracing::warn!(v_oil_gal, "no candidates meet sump volume, keeping pre-gate set");
            recorder.line(format!(
                "Sump capacity gate: no candidates rated for >= {v_oil_gal:.1} gal (fallback)"
            ));
            candidates
        } else {
            recorder.record_rejections(&candidates, &ideal, "Sump capacity gate");
            recorder.line(format!(
                "Sump capacity gate: {} candidates rated for >= {:.1} gal",
                ideal.len(),
                v_oil_gal
            ));
            ideal
        }
    }

    /// Space-fit split: partition by the clearance limits. Without
    /// clearance data all candidates are fitting ("no constraint").
    pub fn space_split(
        candidates: Vec<BreatherCandidate>,
        limits: &SpaceLimits,
        recorder: &mut DecisionRecorder,
    ) -> (Vec<BreatherCandidate>, Vec<BreatherCandidate>) {
        if !limits.provided
            || (limits.height_limit_in.is_none() && limits.diameter_limit_in.is_none())
        {
            recorder.line("Space fit: no constraint");
            return (candidates, Vec::new());
        }

        let (fitting, non_fitting): (Vec<_>, Vec<_>) = candidates
            .into_iter()
            .partition(|c| c.fits_within(limits.height_limit_in, limits.diameter_limit_in));

        recorder.line(format!(
            "Space fit: H<={:?}\" D<={:?}\", {} fit, {} do not",
            limits.height_limit_in,
            limits.diameter_limit_in,
            fitting.len(),
            non_fitting.len()
        ));
        (fitting, non_fitting)
    }
}

fn rule_reason(rule: OperationalRule) -> String {
    format!("Operational filter ({rule})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ProductType;

    fn base(row: usize, model: &str) -> BreatherCandidate {
        BreatherCandidate {
            row,
            brand: "Acme".to_string(),
            model: model.to_string(),
            product_type: ProductType::Disposable,
            max_air_flow_cfm: 5.0,
            max_fluid_flow_gpm: None,
            height_in: Some(5.0),
            diameter_in: Some(3.0),
            adsorption_ml: 100.0,
            extended_service: false,
            mobile_rated: false,
            high_vibration: false,
            oil_mist_control: false,
            rh_25_to_75: true,
            rh_over_75: false,
            water_contact_low: true,
            water_contact_medium: false,
            water_contact_high: false,
            sump_max_splash_gal: Some(40.0),
            sump_max_circulating_gal: Some(60.0),
        }
    }

    fn default_factors() -> OperationalFactors {
        OperationalFactors {
            contamination_index: ContaminationIndex::Low,
            water_contact: WaterContactClass::Low,
            desiccant_required: true,
            service_level: ServiceLevel::Basic,
            humidity_level: HumidityLevel::Normal,
            avg_humidity_pct: 50.0,
            oil_mist_evidence: false,
            vibration: VibrationDuty::Standard,
            mobile_required: false,
            particle_filter_required: false,
        }
    }

    #[test]
    fn test_capacity_gate_spec_example() {
        // required CFM = 2.5; X rated 2.0 is dropped, Y rated 3.0 stays
        let mut x = base(0, "X");
        x.max_air_flow_cfm = 2.0;
        let mut y = base(1, "Y");
        y.max_air_flow_cfm = 3.0;

        let mut recorder = DecisionRecorder::new();
        let survivors =
            CandidateFilterPipeline::capacity_gate(&[x, y], 2.5, &mut recorder);
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].model, "Y");

        let (_, rejected) = recorder.into_parts();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].model, "Acme X");
    }

    #[test]
    fn test_fluid_flow_gate_unrated_passes() {
        let mut rated_low = base(0, "L");
        rated_low.max_fluid_flow_gpm = Some(10.0);
        let mut rated_high = base(1, "H");
        rated_high.max_fluid_flow_gpm = Some(40.0);
        let unrated = base(2, "U");

        let mut recorder = DecisionRecorder::new();
        let survivors = CandidateFilterPipeline::fluid_flow_gate(
            &[rated_low, rated_high, unrated],
            20.0,
            &mut recorder,
        );
        let models: Vec<&str> = survivors.iter().map(|c| c.model.as_str()).collect();
        assert_eq!(models, vec!["H", "U"]);
    }

    #[test]
    fn test_mobile_strict_empties_set() {
        let candidates = vec![base(0, "A"), base(1, "B")]; // none mobile-rated
        let mut factors = default_factors();
        factors.mobile_required = true;

        let mut recorder = DecisionRecorder::new();
        let survivors = CandidateFilterPipeline::operational_stage(
            candidates,
            &factors,
            20.0,
            &[],
            &mut recorder,
        );
        assert!(survivors.is_empty());
    }

    #[test]
    fn test_mobile_not_relaxable_even_when_listed() {
        // Mobile is applied strictly regardless of the relaxation set;
        // the controller never lists it, but the pipeline itself does
        // not treat it as optional either.
        let candidates = vec![base(0, "A")];
        let mut factors = default_factors();
        factors.mobile_required = true;

        let mut recorder = DecisionRecorder::new();
        let survivors = CandidateFilterPipeline::operational_stage(
            candidates,
            &factors,
            20.0,
            &[OperationalRule::Vibration, OperationalRule::OilMist],
            &mut recorder,
        );
        assert!(survivors.is_empty());
    }

    #[test]
    fn test_inclusive_fallback_keeps_prefilter_set() {
        // High humidity required, no candidate rated: set is kept
        let candidates = vec![base(0, "A"), base(1, "B")];
        let mut factors = default_factors();
        factors.humidity_level = HumidityLevel::High;
        factors.avg_humidity_pct = 90.0;

        let mut recorder = DecisionRecorder::new();
        let survivors = CandidateFilterPipeline::operational_stage(
            candidates.clone(),
            &factors,
            20.0,
            &[],
            &mut recorder,
        );
        assert_eq!(survivors.len(), candidates.len());
        assert!(recorder
            .trace()
            .iter()
            .any(|l| l.contains("humidity") && l.contains("fallback")));
    }

    #[test]
    fn test_oil_mist_skipped_for_small_sump() {
        let mut misty = base(0, "M");
        misty.oil_mist_control = true;
        let candidates = vec![misty];
        let mut factors = default_factors();
        factors.oil_mist_evidence = false; // would normally exclude M

        let mut recorder = DecisionRecorder::new();
        let survivors = CandidateFilterPipeline::operational_stage(
            candidates,
            &factors,
            10.0, // < 15 gal
            &[],
            &mut recorder,
        );
        assert_eq!(survivors.len(), 1);
        assert!(recorder.trace().iter().any(|l| l.contains("skipped, sump volume")));
    }

    #[test]
    fn test_extended_service_preference_both_ways() {
        let mut es = base(0, "ES");
        es.extended_service = true;
        let basic = base(1, "BASIC");
        let candidates = vec![es, basic];

        let mut factors = default_factors();
        factors.service_level = ServiceLevel::Extended;
        let outcome =
            CandidateFilterPipeline::apply_rule(OperationalRule::ExtendedService, &candidates, &factors);
        assert_eq!(outcome.candidates()[0].model, "ES");

        factors.service_level = ServiceLevel::Basic;
        let outcome =
            CandidateFilterPipeline::apply_rule(OperationalRule::ExtendedService, &candidates, &factors);
        assert_eq!(outcome.candidates()[0].model, "BASIC");
    }

    #[test]
    fn test_sump_gate_filters_and_falls_back() {
        let mut small = base(0, "S");
        small.sump_max_splash_gal = Some(10.0);
        let mut large = base(1, "L");
        large.sump_max_splash_gal = Some(100.0);

        let mut recorder = DecisionRecorder::new();
        let survivors = CandidateFilterPipeline::sump_gate(
            vec![small.clone(), large.clone()],
            50.0,
            SystemType::Splash,
            &mut recorder,
        );
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].model, "L");

        // All too small: fallback keeps both
        let mut recorder = DecisionRecorder::new();
        let survivors = CandidateFilterPipeline::sump_gate(
            vec![small, large],
            500.0,
            SystemType::Splash,
            &mut recorder,
        );
        assert_eq!(survivors.len(), 2);
        assert!(recorder.trace().iter().any(|l| l.contains("fallback")));
    }

    #[test]
    fn test_space_split_partitions() {
        let mut tall = base(0, "TALL");
        tall.height_in = Some(8.0);
        let short = base(1, "SHORT"); // 5.0 in

        let limits = SpaceLimits::parse(Some("4 to <6 inches"));
        let mut recorder = DecisionRecorder::new();
        let (fitting, non_fitting) = CandidateFilterPipeline::space_split(
            vec![tall, short],
            &limits,
            &mut recorder,
        );
        assert_eq!(fitting.len(), 1);
        assert_eq!(fitting[0].model, "SHORT");
        assert_eq!(non_fitting.len(), 1);
        assert_eq!(non_fitting[0].model, "TALL");
    }

    #[test]
    fn test_space_limits_parse_bands() {
        let l = SpaceLimits::parse(Some("Less than 2 inches"));
        assert_eq!(l.height_limit_in, Some(2.0));
        let l = SpaceLimits::parse(Some("Greater than 6 inches"));
        assert_eq!(l.height_limit_in, None);
        assert!(l.provided);
        let l = SpaceLimits::parse(Some("No port available"));
        assert!(l.no_port);
        assert_eq!(l.height_limit_in, Some(0.0));
        let l = SpaceLimits::parse(None);
        assert!(!l.provided);
    }
}
