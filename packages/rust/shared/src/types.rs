//! Catalog domain types: feature and bucket records plus their enums.
//!
//! These are reference data. The engine reads them, never mutates them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// PlanId
// ---------------------------------------------------------------------------

/// A UUID v7 wrapper identifying one generated scope plan (time-sortable).
///
/// Stamped by the host when a report is produced, never by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(pub Uuid);

impl PlanId {
    /// Generate a new time-sortable plan identifier.
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for PlanId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PlanId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

// ---------------------------------------------------------------------------
// Pillars
// ---------------------------------------------------------------------------

/// Traffic-light color of a single qualitative risk pillar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PillarColor {
    Green,
    Yellow,
    Red,
}

/// The three qualitative risk axes of a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pillars {
    /// Data dependence.
    pub data: PillarColor,
    /// Governance need.
    pub gov: PillarColor,
    /// Operational safety.
    pub safe: PillarColor,
}

impl Pillars {
    /// Iterate the three pillar colors.
    pub fn colors(&self) -> [PillarColor; 3] {
        [self.data, self.gov, self.safe]
    }

    /// Number of pillars with the given color.
    pub fn count(&self, color: PillarColor) -> usize {
        self.colors().iter().filter(|c| **c == color).count()
    }
}

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Rollout phase a feature is scheduled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Day1,
    Day30,
    Day60,
    Day90,
}

impl Phase {
    /// All phases in rollout order.
    pub const ALL: [Phase; 4] = [Phase::Day1, Phase::Day30, Phase::Day60, Phase::Day90];

    /// Stable key used in serialized output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Day1 => "day1",
            Self::Day30 => "day30",
            Self::Day60 => "day60",
            Self::Day90 => "day90",
        }
    }

    /// Human-readable heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Day1 => "Day 1 (Launch)",
            Self::Day30 => "Day 30",
            Self::Day60 => "Day 60",
            Self::Day90 => "Day 90",
        }
    }
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

/// Build-out level for a feature, ordered cheapest to most polished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Investment {
    Mvp,
    Standard,
    Polished,
    Premium,
}

impl Investment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mvp => "MVP",
            Self::Standard => "STANDARD",
            Self::Polished => "POLISHED",
            Self::Premium => "PREMIUM",
        }
    }
}

impl std::fmt::Display for Investment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Data categories
// ---------------------------------------------------------------------------

/// Abstract data category a feature depends on.
///
/// Keys into the data availability map computed per scoring run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    None,
    Catalog,
    Descriptions,
    Attributes,
    Facets,
    Relationships,
    Behavioral,
    Transactional,
    BehavioralTransUser,
    All,
}

impl DataCategory {
    pub const ALL: [DataCategory; 10] = [
        DataCategory::None,
        DataCategory::Catalog,
        DataCategory::Descriptions,
        DataCategory::Attributes,
        DataCategory::Facets,
        DataCategory::Relationships,
        DataCategory::Behavioral,
        DataCategory::Transactional,
        DataCategory::BehavioralTransUser,
        DataCategory::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Catalog => "catalog",
            Self::Descriptions => "descriptions",
            Self::Attributes => "attributes",
            Self::Facets => "facets",
            Self::Relationships => "relationships",
            Self::Behavioral => "behavioral",
            Self::Transactional => "transactional",
            Self::BehavioralTransUser => "behavioral_trans_user",
            Self::All => "all",
        }
    }
}

// ---------------------------------------------------------------------------
// Classification enums
// ---------------------------------------------------------------------------

/// How essential a feature is to a credible launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Critical,
    Standard,
    Nice,
}

/// Reusability scope of the work behind a feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Universal,
    Industry,
    Client,
}

impl Scope {
    pub const ALL: [Scope; 3] = [Scope::Universal, Scope::Industry, Scope::Client];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Universal => "Universal",
            Self::Industry => "Industry",
            Self::Client => "Client-specific",
        }
    }
}

/// Work layer a feature mostly lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layer {
    Platform,
    Integration,
}

impl Layer {
    pub const ALL: [Layer; 2] = [Layer::Platform, Layer::Integration];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Platform => "Platform",
            Self::Integration => "Integration",
        }
    }
}

/// Delivery priority class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityClass {
    Essential,
    Enhanced,
    Specialized,
}

impl PriorityClass {
    pub const ALL: [PriorityClass; 3] = [
        PriorityClass::Essential,
        PriorityClass::Enhanced,
        PriorityClass::Specialized,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Essential => "Essential",
            Self::Enhanced => "Enhanced",
            Self::Specialized => "Specialized",
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A static catalog entry describing one sellable search capability.
///
/// Every field except `description` is required; a record missing one is
/// rejected when the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    pub id: String,
    pub title: String,
    /// Bucket id this feature belongs to.
    pub bucket: String,
    pub pillars: Pillars,
    pub phase: Phase,
    pub typical_investment: Investment,
    pub data_required: DataCategory,
    pub importance: Importance,
    pub scope: Scope,
    pub layer: Layer,
    pub priority: PriorityClass,
    pub ai_enrichable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A feature bucket (grouping of related capabilities).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRecord {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The feature catalog: buckets plus the features filed under them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub buckets: Vec<BucketRecord>,
    pub features: Vec<FeatureRecord>,
}

impl Catalog {
    /// Look up a feature by id.
    pub fn feature(&self, id: &str) -> Option<&FeatureRecord> {
        self.features.iter().find(|f| f.id == id)
    }

    /// Look up a bucket by id.
    pub fn bucket(&self, id: &str) -> Option<&BucketRecord> {
        self.buckets.iter().find(|b| b.id == id)
    }
}
