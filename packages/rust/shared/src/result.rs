//! Scoring output types: dimension scores, tiers, scored features, and the
//! full [`ScoringResult`] handed to the report layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{FeatureRecord, Investment, Layer, Phase, PriorityClass, Scope};

// ---------------------------------------------------------------------------
// Dimension scores
// ---------------------------------------------------------------------------

/// A bounded numeric score with its qualitative level.
///
/// `raw_score` is the clamped sum of weighted answers; `effective_score`
/// adds any conditional boost or penalty, clamped again to `[0, max_score]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionScore<L> {
    pub raw_score: f64,
    pub effective_score: f64,
    pub max_score: f64,
    pub level: L,
}

/// Data readiness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataLevel {
    Rich,
    Adequate,
    Gaps,
}

impl DataLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rich => "Rich",
            Self::Adequate => "Adequate",
            Self::Gaps => "Gaps",
        }
    }
}

/// Client capacity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CapacityLevel {
    High,
    Medium,
    Low,
}

impl CapacityLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

/// How much hands-on consultation the engagement will need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsultationTier {
    High,
    Medium,
    Low,
}

impl ConsultationTier {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::High => {
                "Plan for recurring working sessions; the client needs guidance on data, concepts, and tuning."
            }
            Self::Medium => "Periodic check-ins at each phase boundary, plus on-demand questions.",
            Self::Low => "Self-directed client; kickoff and launch reviews are enough.",
        }
    }
}

/// Ongoing support model, ordered worst (tier 4) to best (tier 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SupportTier {
    ManagedService,
    Partnership,
    Guided,
    SelfService,
}

impl SupportTier {
    /// Tier number: 4 for Managed Service down to 1 for Self-Service.
    pub fn number(&self) -> u8 {
        match self {
            Self::ManagedService => 4,
            Self::Partnership => 3,
            Self::Guided => 2,
            Self::SelfService => 1,
        }
    }

    /// Inverse of [`number`](Self::number). Unknown numbers fall back to
    /// the lowest tier, Managed Service.
    pub fn from_number(n: u8) -> Self {
        match n {
            1 => Self::SelfService,
            2 => Self::Guided,
            3 => Self::Partnership,
            _ => Self::ManagedService,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::ManagedService => "Managed Service",
            Self::Partnership => "Partnership",
            Self::Guided => "Guided",
            Self::SelfService => "Self-Service",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ManagedService => {
                "We operate search on the client's behalf: tuning, merchandising, and analytics reviews."
            }
            Self::Partnership => {
                "Shared ownership; we run the hard parts while the client team ramps up."
            }
            Self::Guided => "The client operates search with scheduled reviews and expert guidance.",
            Self::SelfService => "The client team owns search day to day; support on request.",
        }
    }
}

// ---------------------------------------------------------------------------
// Scored features
// ---------------------------------------------------------------------------

/// Risk derived from a feature's pillar colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// The engine's verdict on whether and how to include a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Include,
    Limited,
    Caution,
    Phase,
    Exclude,
}

impl Recommendation {
    pub const ALL: [Recommendation; 5] = [
        Recommendation::Include,
        Recommendation::Limited,
        Recommendation::Caution,
        Recommendation::Phase,
        Recommendation::Exclude,
    ];

    /// Lenient parse of a recommendation key. Unknown keys fall back to
    /// [`Recommendation::Phase`].
    pub fn from_key(key: &str) -> Self {
        match key.trim().to_ascii_lowercase().as_str() {
            "include" => Self::Include,
            "limited" => Self::Limited,
            "caution" => Self::Caution,
            "exclude" => Self::Exclude,
            _ => Self::Phase,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Limited => "limited",
            Self::Caution => "caution",
            Self::Phase => "phase",
            Self::Exclude => "exclude",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Include => "Include",
            Self::Limited => "Limited",
            Self::Caution => "Caution",
            Self::Phase => "Phase later",
            Self::Exclude => "Exclude",
        }
    }
}

/// Remediation tag attached to features whose data is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayNowPayLater {
    PayNow,
    PayLater,
}

impl PayNowPayLater {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PayNow => "pay_now",
            Self::PayLater => "pay_later",
        }
    }
}

/// A verdict that a later rule overwrote, kept for audit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupersededVerdict {
    pub recommendation: Recommendation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A catalog feature with this run's derived verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFeature {
    #[serde(flatten)]
    pub feature: FeatureRecord,
    pub risk_level: RiskLevel,
    pub priority_match: bool,
    pub investment: Investment,
    pub recommendation: Recommendation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consultation_note: Option<String>,
    #[serde(rename = "needsAI")]
    pub needs_ai: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_now_pay_later: Option<PayNowPayLater>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub superseded: Option<SupersededVerdict>,
}

// ---------------------------------------------------------------------------
// Aggregates
// ---------------------------------------------------------------------------

/// Percentage distribution of included features along three axes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkBreakdown {
    /// Number of features in the percentage base (recommendation != exclude).
    pub included: usize,
    pub scope: BTreeMap<Scope, u32>,
    pub layer: BTreeMap<Layer, u32>,
    pub priority: BTreeMap<PriorityClass, u32>,
}

/// The complete output of one scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringResult {
    pub data: DimensionScore<DataLevel>,
    pub capacity: DimensionScore<CapacityLevel>,
    pub consultation: DimensionScore<ConsultationTier>,
    pub support_tier: SupportTier,
    pub consultation_tier: ConsultationTier,
    /// Whether AI enrichment may bridge data gaps for this client.
    pub ai_eligible: bool,
    /// Scored features keyed by their static rollout phase.
    pub by_phase: BTreeMap<Phase, Vec<ScoredFeature>>,
    pub work_breakdown: WorkBreakdown,
    /// Count of features per recommendation.
    pub recommendation_counts: BTreeMap<Recommendation, usize>,
    /// Ids of high-risk features that were not excluded.
    pub risk_flags: Vec<String>,
}

impl ScoringResult {
    /// All scored features in phase order.
    pub fn features(&self) -> impl Iterator<Item = &ScoredFeature> {
        self.by_phase.values().flatten()
    }

    /// Scored features for one phase (empty if the phase has none).
    pub fn phase(&self, phase: Phase) -> &[ScoredFeature] {
        self.by_phase.get(&phase).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recommendation_from_key_falls_back_to_phase() {
        assert_eq!(Recommendation::from_key("include"), Recommendation::Include);
        assert_eq!(Recommendation::from_key(" Caution "), Recommendation::Caution);
        assert_eq!(Recommendation::from_key("postpone"), Recommendation::Phase);
        assert_eq!(Recommendation::from_key(""), Recommendation::Phase);
    }

    #[test]
    fn support_tier_from_number_falls_back_to_managed_service() {
        for tier in [
            SupportTier::ManagedService,
            SupportTier::Partnership,
            SupportTier::Guided,
            SupportTier::SelfService,
        ] {
            assert_eq!(SupportTier::from_number(tier.number()), tier);
        }
        assert_eq!(SupportTier::from_number(0), SupportTier::ManagedService);
        assert_eq!(SupportTier::from_number(9), SupportTier::ManagedService);
    }

    #[test]
    fn dimension_score_serializes_camel_case() {
        let score = DimensionScore {
            raw_score: 6.5,
            effective_score: 8.5,
            max_score: 10.0,
            level: DataLevel::Rich,
        };
        let json = serde_json::to_value(score).expect("serialize");
        assert_eq!(json["rawScore"], 6.5);
        assert_eq!(json["effectiveScore"], 8.5);
        assert_eq!(json["level"], "Rich");
    }

    #[test]
    fn phase_keys_serialize_as_map_keys() {
        let mut counts = BTreeMap::new();
        counts.insert(Phase::Day30, 2usize);
        counts.insert(Phase::Day1, 1usize);
        let json = serde_json::to_string(&counts).expect("serialize");
        assert_eq!(json, r#"{"day1":1,"day30":2}"#);
    }
}
