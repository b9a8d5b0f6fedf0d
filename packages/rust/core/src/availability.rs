//! Data availability map.
//!
//! Translates the questionnaire's data answers into abstract data categories
//! so the feature scorer can ask "is the data this feature needs here?"
//! without knowing the questionnaire shape.

use std::collections::BTreeMap;

use scopewise_shared::{Answers, DataCategory, keys};

use crate::weights::DATA_ALL_MIN;

/// Which data categories the client can supply today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataAvailability {
    available: BTreeMap<DataCategory, bool>,
}

impl DataAvailability {
    /// Build the map from raw answers and the effective data score.
    pub fn from_answers(answers: &Answers, effective_data_score: f64) -> Self {
        let behavioral = answers.is(keys::BEHAVIORAL_DATA, "yes");
        let transactional = answers.is(keys::TRANSACTIONAL_DATA, "yes");

        let available = DataCategory::ALL
            .into_iter()
            .map(|category| {
                let has = match category {
                    DataCategory::None => true,
                    DataCategory::Catalog => {
                        matches!(answers.get(keys::CATALOG_BASIC), Some("yes" | "partial"))
                    }
                    DataCategory::Descriptions => matches!(
                        answers.get(keys::DESCRIPTIONS_QUALITY),
                        Some("rich" | "basic")
                    ),
                    DataCategory::Attributes => {
                        answers.is(keys::ATTRIBUTES_EXIST, "yes")
                            && matches!(
                                answers.get(keys::ATTRIBUTES_QUALITY),
                                Some("search_ready" | "needs_cleanup")
                            )
                    }
                    DataCategory::Facets => {
                        matches!(answers.get(keys::FACET_READINESS), Some("ready" | "partial"))
                    }
                    DataCategory::Relationships => answers.is(keys::RELATIONSHIP_DATA, "yes"),
                    DataCategory::Behavioral => behavioral,
                    DataCategory::Transactional => transactional,
                    DataCategory::BehavioralTransUser => behavioral && transactional,
                    DataCategory::All => effective_data_score >= DATA_ALL_MIN,
                };
                (category, has)
            })
            .collect();

        Self { available }
    }

    /// Whether the category is available. Categories never computed read as unavailable.
    pub fn has(&self, category: DataCategory) -> bool {
        self.available.get(&category).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_always_available() {
        let map = DataAvailability::from_answers(&Answers::new(), 0.0);
        assert!(map.has(DataCategory::None));
        assert!(!map.has(DataCategory::Catalog));
        assert!(!map.has(DataCategory::All));
    }

    #[test]
    fn all_requires_effective_score_of_eight() {
        let answers = Answers::new();
        assert!(!DataAvailability::from_answers(&answers, 7.5).has(DataCategory::All));
        assert!(DataAvailability::from_answers(&answers, 8.0).has(DataCategory::All));
    }

    #[test]
    fn behavioral_trans_user_needs_both() {
        let behavioral_only = Answers::new().with(keys::BEHAVIORAL_DATA, "yes");
        let map = DataAvailability::from_answers(&behavioral_only, 1.0);
        assert!(map.has(DataCategory::Behavioral));
        assert!(!map.has(DataCategory::BehavioralTransUser));

        let both = behavioral_only.with(keys::TRANSACTIONAL_DATA, "yes");
        let map = DataAvailability::from_answers(&both, 2.0);
        assert!(map.has(DataCategory::BehavioralTransUser));
    }

    #[test]
    fn attributes_need_existence_and_usable_quality() {
        let inconsistent = Answers::new()
            .with(keys::ATTRIBUTES_EXIST, "yes")
            .with(keys::ATTRIBUTES_QUALITY, "inconsistent");
        assert!(!DataAvailability::from_answers(&inconsistent, 1.5).has(DataCategory::Attributes));

        let cleanup = Answers::new()
            .with(keys::ATTRIBUTES_EXIST, "yes")
            .with(keys::ATTRIBUTES_QUALITY, "needs_cleanup");
        assert!(DataAvailability::from_answers(&cleanup, 2.0).has(DataCategory::Attributes));
    }

    #[test]
    fn partial_catalog_counts_as_available() {
        let answers = Answers::new()
            .with(keys::CATALOG_BASIC, "partial")
            .with(keys::FACET_READINESS, "none");
        let map = DataAvailability::from_answers(&answers, 1.0);
        assert!(map.has(DataCategory::Catalog));
        assert!(!map.has(DataCategory::Facets));
    }
}
