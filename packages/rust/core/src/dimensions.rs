//! Dimension scorers: data readiness, client capacity, consultation load.
//!
//! Each scorer reduces the answer set to a bounded [`DimensionScore`].
//! Unanswered questions contribute zero; none of these can fail.

use tracing::debug;

use scopewise_shared::{
    Answers, CapacityLevel, ConsultationTier, DataLevel, DimensionScore, RemediationApproach,
    SupportTier, keys,
};

use crate::weights::{
    AI_BOOST, ATTRIBUTE_QUALITY, CAPACITY_HIGH_MIN, CAPACITY_MEDIUM_MIN, CAPACITY_WEIGHTS,
    CONSULTATION_HIGH_MIN, CONSULTATION_MEDIUM_MIN, CONSULTATION_WEIGHTS, DATA_ADEQUATE_MIN,
    DATA_RICH_MIN, DATA_WEIGHTS, PAY_LATER_PENALTY, SUPPORT_GUIDED_MIN, SUPPORT_PARTNERSHIP_MIN,
    SUPPORT_SELF_SERVICE_MIN,
};

/// Additive data readiness questions (attribute quality handled separately).
const DATA_KEYS: &[&str] = &[
    keys::CATALOG_BASIC,
    keys::DESCRIPTIONS_QUALITY,
    keys::ATTRIBUTES_EXIST,
    keys::FACET_READINESS,
    keys::RELATIONSHIP_DATA,
    keys::BEHAVIORAL_DATA,
    keys::TRANSACTIONAL_DATA,
];

const CAPACITY_KEYS: &[&str] = &[
    keys::TEAM_OWNERSHIP,
    keys::TEAM_ROLE,
    keys::ANALYTICS_REVIEW,
    keys::FEEDBACK_COLLECTION,
    keys::QUERY_TUNING,
    keys::AB_TESTING,
    keys::CONTENT_UPDATE_SPEED,
];

const CONSULTATION_KEYS: &[&str] = &[
    keys::DATA_PROBLEM_AWARENESS,
    keys::PAST_EXPERIENCE,
    keys::SEARCH_CONCEPT_COMFORT,
    keys::ONGOING_CONSULTATION,
];

/// Whether AI enrichment can bridge data gaps: the client chose AI
/// remediation and has someone to approve the enriched output.
pub fn ai_eligible(answers: &Answers) -> bool {
    answers.remediation() == Some(RemediationApproach::Ai)
        && matches!(
            answers.get(keys::AI_APPROVAL_CAPACITY),
            Some("internal" | "assisted")
        )
}

// ---------------------------------------------------------------------------
// Data readiness
// ---------------------------------------------------------------------------

/// Score catalog and behavioral data readiness.
pub fn score_data(answers: &Answers) -> DimensionScore<DataLevel> {
    let table = &*DATA_WEIGHTS;

    let mut sum: f64 = DATA_KEYS
        .iter()
        .map(|key| table.answer_weight(answers, key))
        .sum();

    // Quality only means something once attributes exist.
    if answers.is(keys::ATTRIBUTES_EXIST, "yes") {
        sum += answers
            .get(keys::ATTRIBUTES_QUALITY)
            .and_then(|q| ATTRIBUTE_QUALITY.get(q))
            .copied()
            .unwrap_or(0.0);
    }

    let boost = if ai_eligible(answers) { AI_BOOST } else { 0.0 };
    let raw_score = table.clamp(sum);
    let effective_score = table.clamp(sum + boost);

    let level = if effective_score >= DATA_RICH_MIN {
        DataLevel::Rich
    } else if effective_score >= DATA_ADEQUATE_MIN {
        DataLevel::Adequate
    } else {
        DataLevel::Gaps
    };

    debug!(raw_score, effective_score, ?level, "scored data readiness");

    DimensionScore {
        raw_score,
        effective_score,
        max_score: table.max_score,
        level,
    }
}

// ---------------------------------------------------------------------------
// Capacity
// ---------------------------------------------------------------------------

/// Score the client team's capacity to operate search.
pub fn score_capacity(answers: &Answers) -> DimensionScore<CapacityLevel> {
    let table = &*CAPACITY_WEIGHTS;

    let sum: f64 = CAPACITY_KEYS
        .iter()
        .map(|key| table.answer_weight(answers, key))
        .sum();
    let score = table.clamp(sum);

    let level = if score >= CAPACITY_HIGH_MIN {
        CapacityLevel::High
    } else if score >= CAPACITY_MEDIUM_MIN {
        CapacityLevel::Medium
    } else {
        CapacityLevel::Low
    };

    debug!(score, ?level, "scored capacity");

    DimensionScore {
        raw_score: score,
        effective_score: score,
        max_score: table.max_score,
        level,
    }
}

/// Map a capacity score onto the four half-open support bands.
pub fn support_tier(capacity_score: f64) -> SupportTier {
    if capacity_score >= SUPPORT_SELF_SERVICE_MIN {
        SupportTier::SelfService
    } else if capacity_score >= SUPPORT_GUIDED_MIN {
        SupportTier::Guided
    } else if capacity_score >= SUPPORT_PARTNERSHIP_MIN {
        SupportTier::Partnership
    } else {
        SupportTier::ManagedService
    }
}

// ---------------------------------------------------------------------------
// Consultation load
// ---------------------------------------------------------------------------

/// Score how much consultation the engagement will need.
pub fn score_consultation(answers: &Answers) -> DimensionScore<ConsultationTier> {
    let table = &*CONSULTATION_WEIGHTS;

    let sum: f64 = CONSULTATION_KEYS
        .iter()
        .map(|key| table.answer_weight(answers, key))
        .sum();

    let penalty = if answers.remediation() == Some(RemediationApproach::PayLater) {
        PAY_LATER_PENALTY
    } else {
        0.0
    };
    let raw_score = table.clamp(sum);
    let effective_score = table.clamp(sum + penalty);
    let level = consultation_tier(effective_score);

    debug!(raw_score, effective_score, ?level, "scored consultation load");

    DimensionScore {
        raw_score,
        effective_score,
        max_score: table.max_score,
        level,
    }
}

/// Consultation tier bands, first match wins.
pub fn consultation_tier(score: f64) -> ConsultationTier {
    if score >= CONSULTATION_HIGH_MIN {
        ConsultationTier::High
    } else if score >= CONSULTATION_MEDIUM_MIN {
        ConsultationTier::Medium
    } else {
        ConsultationTier::Low
    }
}
