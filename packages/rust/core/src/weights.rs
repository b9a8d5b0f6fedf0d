//! Static weight tables and tier thresholds.
//!
//! Each table maps a question key to the weight of each answer value. The
//! tables are built once on first use and never mutated.

use std::collections::HashMap;
use std::sync::LazyLock;

use scopewise_shared::{Answers, keys};

/// Question key to (answer value to weight), capped at `max_score`.
#[derive(Debug)]
pub struct WeightTable {
    weights: HashMap<&'static str, HashMap<&'static str, f64>>,
    pub max_score: f64,
}

impl WeightTable {
    fn new(max_score: f64, entries: &[(&'static str, &[(&'static str, f64)])]) -> Self {
        let weights = entries
            .iter()
            .map(|(key, values)| (*key, values.iter().copied().collect()))
            .collect();
        Self { weights, max_score }
    }

    /// Weight of one answer value. Unknown keys or values weigh nothing.
    pub fn weight(&self, key: &str, value: &str) -> f64 {
        self.weights
            .get(key)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0.0)
    }

    /// Weight of whatever the client answered for `key` (0 when unanswered).
    pub fn answer_weight(&self, answers: &Answers, key: &str) -> f64 {
        answers
            .get(key)
            .map(|value| self.weight(key, value))
            .unwrap_or(0.0)
    }

    /// Clamp a score into `[0, max_score]`.
    pub fn clamp(&self, score: f64) -> f64 {
        score.clamp(0.0, self.max_score)
    }
}

// ---------------------------------------------------------------------------
// Data readiness
// ---------------------------------------------------------------------------

/// Added to the data score when AI remediation is approved and staffed.
pub const AI_BOOST: f64 = 2.0;

pub const DATA_RICH_MIN: f64 = 7.0;
pub const DATA_ADEQUATE_MIN: f64 = 4.0;

/// `all` data is available only at or above this effective data score.
pub const DATA_ALL_MIN: f64 = 8.0;

/// Additive data readiness contributions. Attribute quality is looked up
/// separately in [`ATTRIBUTE_QUALITY`].
pub static DATA_WEIGHTS: LazyLock<WeightTable> = LazyLock::new(|| {
    WeightTable::new(
        10.0,
        &[
            (keys::CATALOG_BASIC, &[("yes", 2.0), ("partial", 1.0)]),
            (keys::DESCRIPTIONS_QUALITY, &[("rich", 2.0), ("basic", 1.0)]),
            (keys::ATTRIBUTES_EXIST, &[("yes", 1.0), ("partial", 0.5)]),
            (keys::FACET_READINESS, &[("ready", 1.0), ("partial", 0.5)]),
            (keys::RELATIONSHIP_DATA, &[("yes", 1.0), ("partial", 0.5)]),
            (keys::BEHAVIORAL_DATA, &[("yes", 1.0), ("partial", 0.5)]),
            (keys::TRANSACTIONAL_DATA, &[("yes", 1.0), ("partial", 0.5)]),
        ],
    )
});

/// Attribute quality, only counted when `attributesExist` is `yes`.
pub static ATTRIBUTE_QUALITY: LazyLock<HashMap<&'static str, f64>> = LazyLock::new(|| {
    HashMap::from([
        ("search_ready", 2.0),
        ("needs_cleanup", 1.0),
        ("inconsistent", 0.5),
    ])
});

// ---------------------------------------------------------------------------
// Capacity
// ---------------------------------------------------------------------------

pub const CAPACITY_HIGH_MIN: f64 = 7.0;
pub const CAPACITY_MEDIUM_MIN: f64 = 4.0;

/// Support tier band edges on the capacity score: `[0,3)`, `[3,5)`, `[5,7)`, `[7,max]`.
pub const SUPPORT_PARTNERSHIP_MIN: f64 = 3.0;
pub const SUPPORT_GUIDED_MIN: f64 = 5.0;
pub const SUPPORT_SELF_SERVICE_MIN: f64 = 7.0;

pub static CAPACITY_WEIGHTS: LazyLock<WeightTable> = LazyLock::new(|| {
    WeightTable::new(
        10.0,
        &[
            (keys::TEAM_OWNERSHIP, &[("dedicated", 2.0), ("shared", 1.0)]),
            (
                keys::TEAM_ROLE,
                &[
                    ("search_specialist", 2.0),
                    ("merchandiser", 1.5),
                    ("developer", 1.0),
                    ("marketing", 0.5),
                ],
            ),
            (keys::ANALYTICS_REVIEW, &[("weekly", 1.5), ("monthly", 1.0)]),
            (keys::FEEDBACK_COLLECTION, &[("systematic", 1.0), ("ad_hoc", 0.5)]),
            (keys::QUERY_TUNING, &[("regular", 1.5), ("occasional", 0.5)]),
            (keys::AB_TESTING, &[("regular", 1.0), ("occasional", 0.5)]),
            (keys::CONTENT_UPDATE_SPEED, &[("same_day", 1.0), ("weekly", 0.5)]),
        ],
    )
});

// ---------------------------------------------------------------------------
// Consultation load
// ---------------------------------------------------------------------------

/// Added to the consultation load when the client chose to pay later.
pub const PAY_LATER_PENALTY: f64 = 2.0;

pub const CONSULTATION_HIGH_MIN: f64 = 6.0;
pub const CONSULTATION_MEDIUM_MIN: f64 = 3.0;

pub static CONSULTATION_WEIGHTS: LazyLock<WeightTable> = LazyLock::new(|| {
    WeightTable::new(
        10.0,
        &[
            (keys::DATA_PROBLEM_AWARENESS, &[("unaware", 3.0), ("suspects", 1.5)]),
            (keys::PAST_EXPERIENCE, &[("no", 2.0), ("some", 1.0)]),
            (keys::SEARCH_CONCEPT_COMFORT, &[("low", 2.0), ("medium", 1.0)]),
            (keys::ONGOING_CONSULTATION, &[("yes", 2.0), ("maybe", 1.0)]),
        ],
    )
});

// ---------------------------------------------------------------------------
// Feature scorer thresholds
// ---------------------------------------------------------------------------

/// Investment rules: data score below which PREMIUM drops to POLISHED.
pub const PREMIUM_DATA_MIN: f64 = 4.0;
/// Data score below which a red-data POLISHED feature drops to STANDARD.
pub const POLISHED_DATA_MIN: f64 = 5.0;
/// Capacity below which STANDARD is raised to POLISHED.
pub const STANDARD_CAPACITY_MIN: f64 = 4.0;
/// Capacity below which MVP is raised to STANDARD.
pub const MVP_CAPACITY_MIN: f64 = 3.0;
/// Capacity below which a high-risk feature is flagged `caution`.
pub const CAUTION_CAPACITY_MIN: f64 = 5.0;

// ---------------------------------------------------------------------------
// Priority matching
// ---------------------------------------------------------------------------

/// Pain point to the bucket it makes a priority.
pub static PAIN_POINT_BUCKETS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| {
        HashMap::from([
            ("zero_results", "relevance"),
            ("irrelevant_results", "relevance"),
            ("poor_filters", "discovery"),
            ("hard_navigation", "discovery"),
            ("no_merch_control", "merchandising"),
            ("generic_experience", "personalization"),
            ("no_insights", "analytics"),
            ("slow_content_updates", "content"),
        ])
    });

/// The pain point matched by feature id instead of bucket.
pub const REORDERING_PAIN_POINT: &str = "reordering";

/// Features that answer the reordering pain point.
pub const REORDERING_FEATURES: &[&str] = &["buy_again", "recently_purchased", "order_history_search"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_keys_and_values_weigh_nothing() {
        assert_eq!(DATA_WEIGHTS.weight(keys::CATALOG_BASIC, "yes"), 2.0);
        assert_eq!(DATA_WEIGHTS.weight(keys::CATALOG_BASIC, "maybe"), 0.0);
        assert_eq!(DATA_WEIGHTS.weight("favoriteColor", "blue"), 0.0);
    }

    #[test]
    fn answer_weight_of_unanswered_is_zero() {
        let answers = Answers::new().with(keys::TEAM_OWNERSHIP, "dedicated");
        assert_eq!(CAPACITY_WEIGHTS.answer_weight(&answers, keys::TEAM_OWNERSHIP), 2.0);
        assert_eq!(CAPACITY_WEIGHTS.answer_weight(&answers, keys::TEAM_ROLE), 0.0);
    }

    #[test]
    fn best_capacity_answers_reach_the_cap() {
        let best = [
            (keys::TEAM_OWNERSHIP, "dedicated"),
            (keys::TEAM_ROLE, "search_specialist"),
            (keys::ANALYTICS_REVIEW, "weekly"),
            (keys::FEEDBACK_COLLECTION, "systematic"),
            (keys::QUERY_TUNING, "regular"),
            (keys::AB_TESTING, "regular"),
            (keys::CONTENT_UPDATE_SPEED, "same_day"),
        ];
        let total: f64 = best
            .iter()
            .map(|(k, v)| CAPACITY_WEIGHTS.weight(k, v))
            .sum();
        assert_eq!(total, CAPACITY_WEIGHTS.max_score);
    }

    #[test]
    fn clamp_bounds_scores() {
        assert_eq!(DATA_WEIGHTS.clamp(11.0), 10.0);
        assert_eq!(DATA_WEIGHTS.clamp(-1.0), 0.0);
        assert_eq!(DATA_WEIGHTS.clamp(6.5), 6.5);
    }
}
