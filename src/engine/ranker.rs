// ==========================================
// Breather Advisor - Selection Ranker
// ==========================================
// Total ordering over the surviving candidates. The primary sort keys
// are the capacity margins (ascending: the tightest adequate unit is
// the least over-specified) with adsorption capacity descending as
// the tie-breaker and the catalog row as the final strict key, which
// keeps every ranking deterministic for identical inputs.
//
// Three views are produced from one surviving set:
//   default      best overall pick(s)
//   LCC          life-cycle-cost pick, prefers rebuildable hardware
//   cost-benefit strictly disposable pick
// ==========================================

use crate::domain::types::{Criticality, ProductType, SystemType};
use crate::domain::{BreatherCandidate, Recommendation};
use std::cmp::Ordering;

/// Annotation for a pick drawn from the space-fitting partition.
pub const NOTE_FITS: &str = "Fits directly.";
/// Annotation for a pick drawn from the non-fitting partition.
pub const NOTE_NO_FIT: &str = "Requires remote installation or space check.";

// ==========================================
// Ranking Context
// ==========================================
/// Per-asset inputs the comparators need.
#[derive(Debug, Clone, Copy)]
pub struct RankingContext {
    pub system_type: SystemType,
    pub required_cfm: f64,
    /// Asset oil volume (gal); 0 means no sump data and disables the
    /// sump-margin key.
    pub v_oil_gal: f64,
}

impl RankingContext {
    fn cfm_margin(&self, c: &BreatherCandidate) -> f64 {
        c.max_air_flow_cfm - self.required_cfm
    }

    /// Sump margin against the system-type rating. Unrated candidates
    /// sort last on this key.
    fn sump_margin(&self, c: &BreatherCandidate) -> f64 {
        c.rated_sump_gal(self.system_type)
            .map(|rated| rated - self.v_oil_gal)
            .unwrap_or(f64::INFINITY)
    }

    fn has_sump_data(&self) -> bool {
        self.v_oil_gal > 0.0
    }
}

// ==========================================
// Selection Ranker
// ==========================================
pub struct SelectionRanker;

impl SelectionRanker {
    /// Default comparator. Circulating systems weight the sump margin
    /// first; splash systems weight the CFM margin first; assets with
    /// no sump data use CFM margin only.
    pub fn default_cmp(
        a: &BreatherCandidate,
        b: &BreatherCandidate,
        ctx: &RankingContext,
    ) -> Ordering {
        let ord = if !ctx.has_sump_data() {
            Self::cmp_cfm(a, b, ctx)
        } else {
            match ctx.system_type {
                SystemType::Circulating => Self::cmp_sump(a, b, ctx)
                    .then_with(|| Self::cmp_cfm(a, b, ctx)),
                SystemType::Splash => Self::cmp_cfm(a, b, ctx)
                    .then_with(|| Self::cmp_sump(a, b, ctx)),
            }
        };
        ord.then_with(|| Self::cmp_adsorption(a, b))
            .then_with(|| a.row.cmp(&b.row))
    }

    fn cmp_cfm(a: &BreatherCandidate, b: &BreatherCandidate, ctx: &RankingContext) -> Ordering {
        ctx.cfm_margin(a).total_cmp(&ctx.cfm_margin(b))
    }

    fn cmp_sump(a: &BreatherCandidate, b: &BreatherCandidate, ctx: &RankingContext) -> Ordering {
        ctx.sump_margin(a).total_cmp(&ctx.sump_margin(b))
    }

    /// Adsorption capacity descending: more desiccant wins ties.
    fn cmp_adsorption(a: &BreatherCandidate, b: &BreatherCandidate) -> Ordering {
        b.adsorption_ml.total_cmp(&a.adsorption_ml)
    }

    /// Sort a set in place under the default ordering.
    pub fn rank(candidates: &mut [BreatherCandidate], ctx: &RankingContext) {
        candidates.sort_by(|a, b| Self::default_cmp(a, b, ctx));
    }

    /// Best candidate under the default ordering.
    pub fn best<'a>(
        candidates: &'a [BreatherCandidate],
        ctx: &RankingContext,
    ) -> Option<&'a BreatherCandidate> {
        candidates.iter().min_by(|a, b| Self::default_cmp(a, b, ctx))
    }

    /// Life-cycle-cost pick: the best rebuildable unit under
    /// (CFM margin ascending, adsorption descending); falls back to
    /// the best disposable, then to the best of the full set.
    pub fn lcc_pick(
        candidates: &[BreatherCandidate],
        ctx: &RankingContext,
    ) -> Option<BreatherCandidate> {
        let lcc_cmp = |a: &&BreatherCandidate, b: &&BreatherCandidate| {
            Self::cmp_cfm(a, b, ctx)
                .then_with(|| Self::cmp_adsorption(a, b))
                .then_with(|| a.row.cmp(&b.row))
        };

        for product_type in [ProductType::Rebuildable, ProductType::Disposable] {
            if let Some(pick) = candidates
                .iter()
                .filter(|c| c.product_type == product_type)
                .min_by(lcc_cmp)
            {
                return Some(pick.clone());
            }
        }
        Self::best(candidates, ctx).cloned()
    }

    /// Cost-benefit pick: strictly disposable hardware under the
    /// default ordering. `None` when the surviving set has none.
    pub fn cost_benefit_pick(
        candidates: &[BreatherCandidate],
        ctx: &RankingContext,
    ) -> Option<BreatherCandidate> {
        let disposables: Vec<BreatherCandidate> = candidates
            .iter()
            .filter(|c| c.product_type == ProductType::Disposable)
            .cloned()
            .collect();
        Self::best(&disposables, ctx).cloned()
    }

    /// Default recommendations for the asset. Criticality A gets the
    /// best rebuildable plus the best disposable over the union of
    /// both partitions, each annotated with its fit; every other
    /// class gets the single best pick, preferring the fitting
    /// partition.
    pub fn select(
        fitting: &[BreatherCandidate],
        non_fitting: &[BreatherCandidate],
        criticality: Criticality,
        ctx: &RankingContext,
    ) -> Vec<Recommendation> {
        if criticality == Criticality::A {
            return Self::select_criticality_a(fitting, non_fitting, ctx);
        }

        if let Some(pick) = Self::best(fitting, ctx) {
            return vec![Recommendation::with_note(pick.clone(), NOTE_FITS)];
        }
        if let Some(pick) = Self::best(non_fitting, ctx) {
            return vec![Recommendation::with_note(pick.clone(), NOTE_NO_FIT)];
        }
        Vec::new()
    }

    /// Criticality A policy: redundant recommendations spanning both
    /// product families, drawn from all survivors regardless of fit
    /// but annotated so the installer knows which need a remote kit.
    fn select_criticality_a(
        fitting: &[BreatherCandidate],
        non_fitting: &[BreatherCandidate],
        ctx: &RankingContext,
    ) -> Vec<Recommendation> {
        let fitting_rows: std::collections::HashSet<usize> =
            fitting.iter().map(|c| c.row).collect();
        let pool: Vec<BreatherCandidate> = fitting
            .iter()
            .chain(non_fitting.iter())
            .cloned()
            .collect();

        let mut picks = Vec::new();
        for product_type in [ProductType::Rebuildable, ProductType::Disposable] {
            let family: Vec<BreatherCandidate> = pool
                .iter()
                .filter(|c| c.product_type == product_type)
                .cloned()
                .collect();
            if let Some(best) = Self::best(&family, ctx) {
                let note = if fitting_rows.contains(&best.row) {
                    NOTE_FITS
                } else {
                    NOTE_NO_FIT
                };
                picks.push(Recommendation::with_note(best.clone(), note));
            }
        }

        // Degenerate catalogs may cover only one family; fall back to
        // the single best pick rather than returning nothing.
        if picks.is_empty() {
            if let Some(best) = Self::best(&pool, ctx) {
                let note = if fitting_rows.contains(&best.row) {
                    NOTE_FITS
                } else {
                    NOTE_NO_FIT
                };
                picks.push(Recommendation::with_note(best.clone(), note));
            }
        }
        picks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(row: usize, model: &str, cfm: f64, adsorption: f64) -> BreatherCandidate {
        BreatherCandidate {
            row,
            brand: "Acme".to_string(),
            model: model.to_string(),
            product_type: ProductType::Disposable,
            max_air_flow_cfm: cfm,
            max_fluid_flow_gpm: None,
            height_in: Some(5.0),
            diameter_in: Some(3.0),
            adsorption_ml: adsorption,
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

    fn ctx(system_type: SystemType, required_cfm: f64, v_oil: f64) -> RankingContext {
        RankingContext {
            system_type,
            required_cfm,
            v_oil_gal: v_oil,
        }
    }

    #[test]
    fn test_splash_prefers_tightest_cfm_margin() {
        let big = candidate(0, "BIG", 10.0, 500.0);
        let snug = candidate(1, "SNUG", 3.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 20.0);

        let pool = [big, snug];
        let best = SelectionRanker::best(&pool, &ctx).unwrap();
        assert_eq!(best.model, "SNUG");
    }

    #[test]
    fn test_circulating_prefers_tightest_sump_margin() {
        let mut loose = candidate(0, "LOOSE", 3.0, 100.0);
        loose.sump_max_circulating_gal = Some(200.0);
        let mut snug = candidate(1, "SNUG", 10.0, 100.0);
        snug.sump_max_circulating_gal = Some(60.0);
        let ctx = ctx(SystemType::Circulating, 2.5, 50.0);

        let pool = [loose, snug];
        let best = SelectionRanker::best(&pool, &ctx).unwrap();
        assert_eq!(best.model, "SNUG");
    }

    #[test]
    fn test_no_sump_data_uses_cfm_only() {
        let mut a = candidate(0, "A", 5.0, 100.0);
        a.sump_max_splash_gal = Some(25.0);
        let b = candidate(1, "B", 3.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let pool = [a, b];
        let best = SelectionRanker::best(&pool, &ctx).unwrap();
        assert_eq!(best.model, "B");
    }

    #[test]
    fn test_adsorption_breaks_ties_descending() {
        let small = candidate(0, "SMALL", 3.0, 100.0);
        let large = candidate(1, "LARGE", 3.0, 500.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let pool = [small, large];
        let best = SelectionRanker::best(&pool, &ctx).unwrap();
        assert_eq!(best.model, "LARGE");
    }

    #[test]
    fn test_row_is_final_stable_tiebreak() {
        let first = candidate(3, "FIRST", 3.0, 100.0);
        let second = candidate(7, "SECOND", 3.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let pool = [second.clone(), first.clone()];
        let best = SelectionRanker::best(&pool, &ctx).unwrap();
        assert_eq!(best.model, "FIRST");
    }

    #[test]
    fn test_lcc_prefers_rebuildable() {
        let mut reb = candidate(0, "REB", 9.0, 100.0);
        reb.product_type = ProductType::Rebuildable;
        let disp = candidate(1, "DISP", 3.0, 500.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let pick = SelectionRanker::lcc_pick(&[reb, disp], &ctx).unwrap();
        assert_eq!(pick.model, "REB");
    }

    #[test]
    fn test_lcc_falls_back_to_disposable() {
        let disp = candidate(0, "DISP", 3.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);
        let pick = SelectionRanker::lcc_pick(&[disp], &ctx).unwrap();
        assert_eq!(pick.model, "DISP");
    }

    #[test]
    fn test_cost_benefit_disposables_only() {
        let mut reb = candidate(0, "REB", 3.0, 100.0);
        reb.product_type = ProductType::Rebuildable;
        let disp = candidate(1, "DISP", 9.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let pick = SelectionRanker::cost_benefit_pick(&[reb.clone(), disp], &ctx).unwrap();
        assert_eq!(pick.model, "DISP");

        assert!(SelectionRanker::cost_benefit_pick(&[reb], &ctx).is_none());
    }

    #[test]
    fn test_select_prefers_fitting_partition() {
        let fit = candidate(0, "FIT", 9.0, 100.0);
        let no_fit = candidate(1, "NOFIT", 3.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let picks = SelectionRanker::select(&[fit], &[no_fit], Criticality::B1, &ctx);
        assert_eq!(picks.len(), 1);
        assert_eq!(picks[0].candidate.model, "FIT");
        assert_eq!(picks[0].note.as_deref(), Some(NOTE_FITS));
    }

    #[test]
    fn test_select_non_fitting_gets_remote_note() {
        let no_fit = candidate(0, "NOFIT", 3.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let picks = SelectionRanker::select(&[], &[no_fit], Criticality::B2, &ctx);
        assert_eq!(picks[0].note.as_deref(), Some(NOTE_NO_FIT));
    }

    #[test]
    fn test_criticality_a_gets_both_families() {
        let mut reb = candidate(0, "REB", 5.0, 100.0);
        reb.product_type = ProductType::Rebuildable;
        let disp = candidate(1, "DISP", 3.0, 100.0);
        let ctx = ctx(SystemType::Splash, 2.5, 0.0);

        let picks = SelectionRanker::select(&[disp], &[reb], Criticality::A, &ctx);
        assert_eq!(picks.len(), 2);
        assert_eq!(picks[0].candidate.model, "REB");
        assert_eq!(picks[0].note.as_deref(), Some(NOTE_NO_FIT));
        assert_eq!(picks[1].candidate.model, "DISP");
        assert_eq!(picks[1].note.as_deref(), Some(NOTE_FITS));
    }
}
