//! Engine entry point: answers plus catalog in, [`ScoringResult`] out.
//!
//! Pure and synchronous. No clock, no randomness, no I/O; the same inputs
//! always serialize to the same bytes.

use tracing::{info, instrument};

use scopewise_shared::{Answers, Catalog, ScoringResult};

use crate::aggregate::aggregate;
use crate::availability::DataAvailability;
use crate::dimensions::{
    ai_eligible, score_capacity, score_consultation, score_data, support_tier,
};
use crate::feature::{FeatureContext, score_feature};

/// Score a questionnaire against a feature catalog.
#[instrument(skip_all, fields(features = catalog.features.len(), answers = answers.len()))]
pub fn score(answers: &Answers, catalog: &Catalog) -> ScoringResult {
    let data = score_data(answers);
    let capacity = score_capacity(answers);
    let consultation = score_consultation(answers);
    let ai_eligible = ai_eligible(answers);
    let support_tier = support_tier(capacity.effective_score);
    let consultation_tier = consultation.level;

    let availability = DataAvailability::from_answers(answers, data.effective_score);
    let ctx = FeatureContext {
        answers,
        availability: &availability,
        ai_eligible,
        data_score: data.effective_score,
        capacity_score: capacity.effective_score,
        consultation_tier,
    };

    let scored = catalog
        .features
        .iter()
        .map(|feature| score_feature(feature, &ctx))
        .collect();
    let agg = aggregate(scored);

    info!(
        data = data.effective_score,
        capacity = capacity.effective_score,
        consultation = consultation.effective_score,
        support_tier = support_tier.number(),
        included = agg.work_breakdown.included,
        risk_flags = agg.risk_flags.len(),
        "scoring complete"
    );

    ScoringResult {
        data,
        capacity,
        consultation,
        support_tier,
        consultation_tier,
        ai_eligible,
        by_phase: agg.by_phase,
        work_breakdown: agg.work_breakdown,
        recommendation_counts: agg.recommendation_counts,
        risk_flags: agg.risk_flags,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use scopewise_shared::{
        DataLevel, Importance, Investment, Phase, Recommendation, SupportTier, keys,
    };

    fn strong_client() -> Answers {
        Answers::new()
            .with(keys::INDUSTRY, "grocery")
            .with(keys::CATALOG_BASIC, "yes")
            .with(keys::DESCRIPTIONS_QUALITY, "rich")
            .with(keys::ATTRIBUTES_EXIST, "yes")
            .with(keys::ATTRIBUTES_QUALITY, "search_ready")
            .with(keys::FACET_READINESS, "ready")
            .with(keys::RELATIONSHIP_DATA, "yes")
            .with(keys::BEHAVIORAL_DATA, "yes")
            .with(keys::TRANSACTIONAL_DATA, "yes")
            .with(keys::TEAM_OWNERSHIP, "dedicated")
            .with(keys::TEAM_ROLE, "search_specialist")
            .with(keys::ANALYTICS_REVIEW, "weekly")
            .with(keys::FEEDBACK_COLLECTION, "systematic")
            .with(keys::QUERY_TUNING, "regular")
            .with(keys::AB_TESTING, "regular")
            .with(keys::CONTENT_UPDATE_SPEED, "same_day")
            .with(keys::PAST_EXPERIENCE, "yes")
            .with(keys::REMEDIATION_APPROACH, "pay_now")
    }

    #[test]
    fn strong_client_gets_everything() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let result = score(&strong_client(), &catalog);

        assert_eq!(result.data.level, DataLevel::Rich);
        assert_eq!(result.support_tier, SupportTier::SelfService);
        assert_eq!(result.by_phase.len(), 4);
        assert_eq!(result.features().count(), catalog.features.len());
        assert!(
            result
                .features()
                .all(|f| f.recommendation == Recommendation::Include)
        );
        assert_eq!(result.work_breakdown.included, catalog.features.len());
    }

    #[test]
    fn empty_answers_still_produce_a_plan() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let result = score(&Answers::new(), &catalog);

        assert_eq!(result.data.effective_score, 0.0);
        assert_eq!(result.support_tier, SupportTier::ManagedService);
        assert_eq!(result.features().count(), catalog.features.len());
        // Nothing is available, so every day1 feature with a data need is limited.
        for feature in result.phase(Phase::Day1) {
            assert_eq!(feature.recommendation, Recommendation::Limited, "{}", feature.feature.id);
        }
    }

    #[test]
    fn scoring_is_deterministic() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let answers = strong_client()
            .with(keys::TIMELINE, "tight")
            .with_list(keys::PAIN_POINTS, &["zero_results", "reordering"]);

        let first = serde_json::to_string(&score(&answers, &catalog)).expect("serialize");
        let second = serde_json::to_string(&score(&answers, &catalog)).expect("serialize");
        assert_eq!(first, second);
    }

    #[test]
    fn tight_timeline_defers_day30_standard_features() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let answers = strong_client().with(keys::TIMELINE, "tight");
        let result = score(&answers, &catalog);

        let synonyms = result
            .phase(Phase::Day30)
            .iter()
            .find(|f| f.feature.id == "synonyms")
            .expect("synonyms scored");
        assert_eq!(synonyms.recommendation, Recommendation::Phase);

        for feature in result.phase(Phase::Day1) {
            assert_eq!(feature.recommendation, Recommendation::Include);
        }
    }

    #[test]
    fn critical_features_never_end_at_mvp() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let result = score(&strong_client(), &catalog);
        for feature in result.features() {
            if feature.feature.importance == Importance::Critical {
                assert_ne!(feature.investment, Investment::Mvp, "{}", feature.feature.id);
            }
        }
    }

    #[test]
    fn excluded_features_leave_the_breakdown_base() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let answers =
            strong_client().with_list(keys::EXCLUDED_FEATURES, &["visual_search", "ab_testing"]);
        let result = score(&answers, &catalog);

        assert_eq!(result.recommendation_counts[&Recommendation::Exclude], 2);
        assert_eq!(result.work_breakdown.included, catalog.features.len() - 2);
        assert!(!result.risk_flags.contains(&"visual_search".to_string()));
    }

    #[test]
    fn reordering_pain_point_marks_reorder_features() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let answers = strong_client().with_list(keys::PAIN_POINTS, &["reordering"]);
        let result = score(&answers, &catalog);

        let matched: Vec<&str> = result
            .features()
            .filter(|f| f.priority_match)
            .map(|f| f.feature.id.as_str())
            .collect();
        assert!(matched.contains(&"buy_again"));
        assert!(matched.contains(&"recently_purchased"));
        assert!(!matched.contains(&"synonyms"));
    }

    #[test]
    fn ai_remediation_bridges_enrichable_gaps() {
        let catalog = catalog::builtin().expect("built-in catalog");
        let answers = Answers::new()
            .with(keys::CATALOG_BASIC, "yes")
            .with(keys::DESCRIPTIONS_QUALITY, "basic")
            .with(keys::REMEDIATION_APPROACH, "ai")
            .with(keys::AI_APPROVAL_CAPACITY, "internal");
        let result = score(&answers, &catalog);

        assert!(result.ai_eligible);
        assert_eq!(result.data.effective_score, result.data.raw_score + 2.0);

        let facets = result
            .features()
            .find(|f| f.feature.id == "facets")
            .expect("facets scored");
        assert!(facets.needs_ai);
        assert_eq!(facets.recommendation, Recommendation::Include);
    }
}
