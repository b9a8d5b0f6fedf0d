//! Shared types, error model, and configuration for Scopewise.
//!
//! This crate is the foundation depended on by all other Scopewise crates.
//! It provides:
//! - [`ScopewiseError`]: the unified error type
//! - Questionnaire input ([`Answers`]) and catalog records ([`FeatureRecord`], [`Catalog`])
//! - Scoring output ([`ScoringResult`], [`ScoredFeature`], tiers)
//! - Configuration ([`AppConfig`], config loading)

pub mod answers;
pub mod config;
pub mod error;
pub mod format;
pub mod result;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use answers::{AnswerValue, Answers, RemediationApproach, keys};
pub use config::{
    AppConfig, DefaultsConfig, ReportConfig, config_dir, config_file_path, init_config,
    load_config, load_config_from, validate_config,
};
pub use error::{Result, ScopewiseError};
pub use format::{DocumentFormat, read_document};
pub use result::{
    CapacityLevel, ConsultationTier, DataLevel, DimensionScore, PayNowPayLater, Recommendation,
    RiskLevel, ScoredFeature, ScoringResult, SupersededVerdict, SupportTier, WorkBreakdown,
};
pub use types::{
    BucketRecord, Catalog, DataCategory, FeatureRecord, Importance, Investment, Layer, Phase,
    PillarColor, Pillars, PlanId, PriorityClass, Scope,
};
