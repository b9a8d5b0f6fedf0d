use proptest::prelude::*;
use proptest::sample::subsequence;

use scopewise_core::catalog;
use scopewise_core::score;
use scopewise_shared::{Answers, Catalog, Importance, Investment, Recommendation, keys};

/// Every scored question with its known values plus one value nothing weights.
const QUESTIONS: &[(&str, &[&str])] = &[
    (keys::CATALOG_BASIC, &["yes", "partial", "no", "unknown"]),
    (keys::DESCRIPTIONS_QUALITY, &["rich", "basic", "minimal", "unknown"]),
    (keys::ATTRIBUTES_EXIST, &["yes", "partial", "no", "unknown"]),
    (keys::ATTRIBUTES_QUALITY, &["search_ready", "needs_cleanup", "inconsistent", "unknown"]),
    (keys::FACET_READINESS, &["ready", "partial", "none", "unknown"]),
    (keys::RELATIONSHIP_DATA, &["yes", "partial", "no", "unknown"]),
    (keys::BEHAVIORAL_DATA, &["yes", "partial", "no", "unknown"]),
    (keys::TRANSACTIONAL_DATA, &["yes", "partial", "no", "unknown"]),
    (keys::AI_APPROVAL_CAPACITY, &["internal", "assisted", "none", "unknown"]),
    (keys::TEAM_OWNERSHIP, &["dedicated", "shared", "unassigned", "unknown"]),
    (keys::TEAM_ROLE, &["search_specialist", "merchandiser", "developer", "marketing", "none"]),
    (keys::ANALYTICS_REVIEW, &["weekly", "monthly", "rarely", "unknown"]),
    (keys::FEEDBACK_COLLECTION, &["systematic", "ad_hoc", "none", "unknown"]),
    (keys::QUERY_TUNING, &["regular", "occasional", "never", "unknown"]),
    (keys::AB_TESTING, &["regular", "occasional", "never", "unknown"]),
    (keys::CONTENT_UPDATE_SPEED, &["same_day", "weekly", "slow", "unknown"]),
    (keys::DATA_PROBLEM_AWARENESS, &["aware", "suspects", "unaware", "unknown"]),
    (keys::PAST_EXPERIENCE, &["yes", "some", "no", "unknown"]),
    (keys::SEARCH_CONCEPT_COMFORT, &["high", "medium", "low", "unknown"]),
    (keys::ONGOING_CONSULTATION, &["no", "maybe", "yes", "unknown"]),
    (keys::TIMELINE, &["tight", "standard", "flexible", "unknown"]),
    (keys::REMEDIATION_APPROACH, &["pay_now", "pay_later", "ai", "unknown"]),
];

const PAIN_POINTS: &[&str] = &[
    "zero_results",
    "irrelevant_results",
    "poor_filters",
    "hard_navigation",
    "no_merch_control",
    "generic_experience",
    "no_insights",
    "slow_content_updates",
    "reordering",
];

fn builtin() -> Catalog {
    catalog::builtin().expect("built-in catalog")
}

fn feature_ids() -> Vec<String> {
    builtin().features.into_iter().map(|f| f.id).collect()
}

/// An answer set where each question is either unanswered or one of its values.
fn arb_answers() -> impl Strategy<Value = Answers> {
    let picks: Vec<_> = QUESTIONS
        .iter()
        .map(|(_, values)| proptest::option::of(0..values.len()))
        .collect();
    let pains = subsequence(PAIN_POINTS.to_vec(), 0..=PAIN_POINTS.len());
    let excluded = subsequence(feature_ids(), 0..=3);

    (picks, pains, excluded).prop_map(|(picks, pains, excluded)| {
        let mut answers = Answers::new();
        for ((key, values), pick) in QUESTIONS.iter().zip(picks) {
            if let Some(i) = pick {
                answers = answers.with(key, values[i]);
            }
        }
        let excluded: Vec<&str> = excluded.iter().map(String::as_str).collect();
        answers
            .with_list(keys::PAIN_POINTS, &pains)
            .with_list(keys::EXCLUDED_FEATURES, &excluded)
    })
}

// ── Dimension scores stay in bounds ──────────────────────────────────────

proptest! {
    #[test]
    fn dimension_scores_stay_in_bounds(answers in arb_answers()) {
        let result = score(&answers, &builtin());

        for (name, raw, effective, max) in [
            ("data", result.data.raw_score, result.data.effective_score, result.data.max_score),
            ("capacity", result.capacity.raw_score, result.capacity.effective_score, result.capacity.max_score),
            ("consultation", result.consultation.raw_score, result.consultation.effective_score, result.consultation.max_score),
        ] {
            prop_assert!((0.0..=max).contains(&raw), "{} raw {} out of [0, {}]", name, raw, max);
            prop_assert!((0.0..=max).contains(&effective), "{} effective {} out of [0, {}]", name, effective, max);
        }
    }
}

// ── Determinism ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn identical_inputs_serialize_identically(answers in arb_answers()) {
        let catalog = builtin();
        let first = serde_json::to_string(&score(&answers, &catalog)).expect("serialize");
        let second = serde_json::to_string(&score(&answers, &catalog)).expect("serialize");
        prop_assert_eq!(first, second);
    }
}

// ── Critical features never end at MVP ───────────────────────────────────

proptest! {
    #[test]
    fn critical_features_never_mvp(answers in arb_answers()) {
        let result = score(&answers, &builtin());
        for feature in result.features() {
            if feature.feature.importance == Importance::Critical {
                prop_assert_ne!(feature.investment, Investment::Mvp, "{}", feature.feature.id);
            }
        }
    }
}

// ── Work breakdown ───────────────────────────────────────────────────────

proptest! {
    #[test]
    fn excluded_features_leave_the_base(answers in arb_answers()) {
        let result = score(&answers, &builtin());
        let not_excluded = result
            .features()
            .filter(|f| f.recommendation != Recommendation::Exclude)
            .count();
        prop_assert_eq!(result.work_breakdown.included, not_excluded);

        let excluded = answers.list(keys::EXCLUDED_FEATURES);
        for feature in result.features() {
            let is_excluded = excluded.contains(&feature.feature.id.as_str());
            prop_assert_eq!(feature.recommendation == Recommendation::Exclude, is_excluded);
        }
    }

    #[test]
    fn breakdown_percentages_sum_to_hundred(answers in arb_answers()) {
        let breakdown = score(&answers, &builtin()).work_breakdown;
        prop_assume!(breakdown.included > 0);

        for (axis, total) in [
            ("scope", breakdown.scope.values().sum::<u32>()),
            ("layer", breakdown.layer.values().sum::<u32>()),
            ("priority", breakdown.priority.values().sum::<u32>()),
        ] {
            prop_assert!((99..=101).contains(&total), "{} sums to {}", axis, total);
        }
    }
}

// ── Grouping ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn every_feature_lands_in_its_static_phase(answers in arb_answers()) {
        let catalog = builtin();
        let result = score(&answers, &catalog);

        prop_assert_eq!(result.by_phase.len(), 4);
        prop_assert_eq!(result.features().count(), catalog.features.len());
        for (phase, features) in &result.by_phase {
            for feature in features {
                prop_assert_eq!(feature.feature.phase, *phase);
            }
        }
        let counted: usize = result.recommendation_counts.values().sum();
        prop_assert_eq!(counted, catalog.features.len());
    }
}
