//! The client questionnaire answer set.
//!
//! Answers arrive as a flat map of question keys to categorical values, the
//! shape the hosting UI submits. Nothing here validates answer values: an
//! unknown or malformed value simply matches no weight and contributes zero.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::format::{DocumentFormat, read_document};

/// Question keys, as submitted by the questionnaire UI.
pub mod keys {
    pub const INDUSTRY: &str = "industry";

    pub const CATALOG_BASIC: &str = "catalogBasic";
    pub const DESCRIPTIONS_QUALITY: &str = "descriptionsQuality";
    pub const ATTRIBUTES_EXIST: &str = "attributesExist";
    pub const ATTRIBUTES_QUALITY: &str = "attributesQuality";
    pub const FACET_READINESS: &str = "facetReadiness";
    pub const RELATIONSHIP_DATA: &str = "relationshipData";
    pub const BEHAVIORAL_DATA: &str = "behavioralData";
    pub const TRANSACTIONAL_DATA: &str = "transactionalData";
    pub const AI_APPROVAL_CAPACITY: &str = "aiApprovalCapacity";

    pub const TEAM_OWNERSHIP: &str = "teamOwnership";
    pub const TEAM_ROLE: &str = "teamRole";
    pub const ANALYTICS_REVIEW: &str = "analyticsReview";
    pub const FEEDBACK_COLLECTION: &str = "feedbackCollection";
    pub const QUERY_TUNING: &str = "queryTuning";
    pub const AB_TESTING: &str = "abTesting";
    pub const CONTENT_UPDATE_SPEED: &str = "contentUpdateSpeed";

    pub const DATA_PROBLEM_AWARENESS: &str = "dataProblemAwareness";
    pub const PAST_EXPERIENCE: &str = "pastExperience";
    pub const SEARCH_CONCEPT_COMFORT: &str = "searchConceptComfort";
    pub const ONGOING_CONSULTATION: &str = "ongoingConsultation";

    pub const PAIN_POINTS: &str = "painPoints";
    pub const TIMELINE: &str = "timeline";
    pub const EXCLUDED_FEATURES: &str = "excludedFeatures";
    pub const REMEDIATION_APPROACH: &str = "remediationApproach";
}

// ---------------------------------------------------------------------------
// RemediationApproach
// ---------------------------------------------------------------------------

/// How the client intends to close data-quality gaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationApproach {
    /// Fix the data before launch.
    PayNow,
    /// Launch now, fix the data later (accepting the risk).
    PayLater,
    /// Bridge gaps with AI enrichment.
    Ai,
}

impl RemediationApproach {
    /// Parse a raw answer value. Unknown values yield `None`.
    pub fn from_answer(value: &str) -> Option<Self> {
        match value {
            "pay_now" => Some(Self::PayNow),
            "pay_later" => Some(Self::PayLater),
            "ai" => Some(Self::Ai),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayNow => "pay_now",
            Self::PayLater => "pay_later",
            Self::Ai => "ai",
        }
    }
}

// ---------------------------------------------------------------------------
// AnswerValue
// ---------------------------------------------------------------------------

/// A single answer: one choice, several choices, or something unusable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    One(String),
    Many(Vec<String>),
    /// Nulls, numbers, nested objects. Kept so the input round-trips, never scored.
    Other(serde_json::Value),
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// Immutable questionnaire answer set for one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers {
    values: BTreeMap<String, AnswerValue>,
}

impl Answers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a single-choice answer.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values
            .insert(key.to_string(), AnswerValue::One(value.to_string()));
        self
    }

    /// Builder: set a multi-select answer.
    pub fn with_list(mut self, key: &str, values: &[&str]) -> Self {
        self.values.insert(
            key.to_string(),
            AnswerValue::Many(values.iter().map(|v| (*v).to_string()).collect()),
        );
        self
    }

    /// Parse an answer set from a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        DocumentFormat::Json.parse(content)
    }

    /// Parse an answer set from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        DocumentFormat::Toml.parse(content)
    }

    /// Load an answer set from a `.json` or `.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let answers: Self = read_document(path)?;
        tracing::debug!(path = %path.display(), answered = answers.len(), "loaded answers");
        Ok(answers)
    }

    /// Single-choice answer for `key`, if one was given.
    pub fn get(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(AnswerValue::One(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Whether `key` was answered with exactly `value`.
    pub fn is(&self, key: &str, value: &str) -> bool {
        self.get(key) == Some(value)
    }

    /// Multi-select answer for `key`. A single string counts as one selection.
    pub fn list(&self, key: &str) -> Vec<&str> {
        match self.values.get(key) {
            Some(AnswerValue::Many(vs)) => vs.iter().map(String::as_str).collect(),
            Some(AnswerValue::One(v)) => vec![v.as_str()],
            _ => Vec::new(),
        }
    }

    /// The chosen remediation approach, if recognized.
    pub fn remediation(&self) -> Option<RemediationApproach> {
        self.get(keys::REMEDIATION_APPROACH)
            .and_then(RemediationApproach::from_answer)
    }

    /// Number of answered keys (including unusable values).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
