//! Per-feature scoring: risk, priority match, investment, recommendation.
//!
//! Investment and recommendation are each an ordered list of rules applied
//! in a single pass. Later rules may overwrite earlier ones, so the order of
//! [`INVESTMENT_RULES`] and [`RECOMMENDATION_RULES`] is part of the contract.

use tracing::trace;

use scopewise_shared::{
    Answers, ConsultationTier, FeatureRecord, Importance, Investment, PayNowPayLater, Phase,
    PillarColor, Pillars, Recommendation, RemediationApproach, RiskLevel, ScoredFeature,
    SupersededVerdict, keys,
};

use crate::availability::DataAvailability;
use crate::weights::{
    CAUTION_CAPACITY_MIN, MVP_CAPACITY_MIN, PAIN_POINT_BUCKETS, POLISHED_DATA_MIN,
    PREMIUM_DATA_MIN, REORDERING_FEATURES, REORDERING_PAIN_POINT, STANDARD_CAPACITY_MIN,
};

/// Everything about the client a feature verdict depends on.
#[derive(Debug, Clone, Copy)]
pub struct FeatureContext<'a> {
    pub answers: &'a Answers,
    pub availability: &'a DataAvailability,
    pub ai_eligible: bool,
    /// Effective data readiness score.
    pub data_score: f64,
    pub capacity_score: f64,
    pub consultation_tier: ConsultationTier,
}

/// Score one catalog feature against the client context.
pub fn score_feature(feature: &FeatureRecord, ctx: &FeatureContext<'_>) -> ScoredFeature {
    let risk_level = risk_level(&feature.pillars);
    let priority_match = priority_match(feature, ctx.answers);
    let investment = adjust_investment(
        feature,
        &InvestmentInputs {
            data_score: ctx.data_score,
            capacity_score: ctx.capacity_score,
            priority_match,
        },
    );

    let raw_available = ctx.availability.has(feature.data_required);
    let data_available = raw_available || (feature.ai_enrichable && ctx.ai_eligible);

    let inputs = RuleInputs {
        feature,
        ctx,
        risk_level,
        data_available,
    };
    let mut verdict = Verdict::default();
    for rule in RECOMMENDATION_RULES {
        (rule.apply)(&mut verdict, &inputs);
    }
    apply_feature_notes(&mut verdict, feature, ctx);

    let needs_ai = ctx.ai_eligible && feature.ai_enrichable && !raw_available;
    let pay_now_pay_later = (!data_available).then(|| match ctx.answers.remediation() {
        Some(RemediationApproach::PayLater) => PayNowPayLater::PayLater,
        _ => PayNowPayLater::PayNow,
    });

    trace!(
        feature = %feature.id,
        ?risk_level,
        %investment,
        recommendation = verdict.recommendation.as_str(),
        "scored feature"
    );

    ScoredFeature {
        feature: feature.clone(),
        risk_level,
        priority_match,
        investment,
        recommendation: verdict.recommendation,
        reason: verdict.reason,
        consultation_note: verdict.consultation_note,
        needs_ai,
        pay_now_pay_later,
        superseded: verdict.superseded,
    }
}

// ---------------------------------------------------------------------------
// Risk and priority
// ---------------------------------------------------------------------------

/// Two or more red pillars is high risk; one red or two yellows is medium.
pub fn risk_level(pillars: &Pillars) -> RiskLevel {
    let red = pillars.count(PillarColor::Red);
    let yellow = pillars.count(PillarColor::Yellow);

    if red >= 2 {
        RiskLevel::High
    } else if red == 1 || yellow >= 2 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Whether any selected pain point targets this feature.
pub fn priority_match(feature: &FeatureRecord, answers: &Answers) -> bool {
    answers.list(keys::PAIN_POINTS).into_iter().any(|pain| {
        PAIN_POINT_BUCKETS.get(pain) == Some(&feature.bucket.as_str())
            || (pain == REORDERING_PAIN_POINT && REORDERING_FEATURES.contains(&feature.id.as_str()))
    })
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

/// Scores an investment rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct InvestmentInputs {
    pub data_score: f64,
    pub capacity_score: f64,
    pub priority_match: bool,
}

/// Moves investment `from` one level `to` another when `when` holds.
pub struct InvestmentRule {
    pub name: &'static str,
    pub from: Investment,
    pub to: Investment,
    pub when: fn(&FeatureRecord, &InvestmentInputs) -> bool,
}

/// Applied top to bottom; each rule sees the previous rule's result.
pub const INVESTMENT_RULES: &[InvestmentRule] = &[
    InvestmentRule {
        name: "thin_data_caps_premium",
        from: Investment::Premium,
        to: Investment::Polished,
        when: thin_data,
    },
    InvestmentRule {
        name: "red_data_caps_polished",
        from: Investment::Polished,
        to: Investment::Standard,
        when: red_data_below_polished_min,
    },
    InvestmentRule {
        name: "low_capacity_needs_polish",
        from: Investment::Standard,
        to: Investment::Polished,
        when: low_capacity,
    },
    InvestmentRule {
        name: "very_low_capacity_lifts_mvp",
        from: Investment::Mvp,
        to: Investment::Standard,
        when: very_low_capacity,
    },
    InvestmentRule {
        name: "critical_never_mvp",
        from: Investment::Mvp,
        to: Investment::Standard,
        when: is_critical,
    },
    InvestmentRule {
        name: "unmatched_nice_to_have_trimmed",
        from: Investment::Polished,
        to: Investment::Standard,
        when: unmatched_nice_to_have,
    },
];

fn thin_data(_: &FeatureRecord, i: &InvestmentInputs) -> bool {
    i.data_score < PREMIUM_DATA_MIN
}

fn red_data_below_polished_min(f: &FeatureRecord, i: &InvestmentInputs) -> bool {
    i.data_score < POLISHED_DATA_MIN && f.pillars.data == PillarColor::Red
}

fn low_capacity(_: &FeatureRecord, i: &InvestmentInputs) -> bool {
    i.capacity_score < STANDARD_CAPACITY_MIN
}

fn very_low_capacity(_: &FeatureRecord, i: &InvestmentInputs) -> bool {
    i.capacity_score < MVP_CAPACITY_MIN
}

fn is_critical(f: &FeatureRecord, _: &InvestmentInputs) -> bool {
    f.importance == Importance::Critical
}

fn unmatched_nice_to_have(f: &FeatureRecord, i: &InvestmentInputs) -> bool {
    f.importance == Importance::Nice && !i.priority_match
}

/// Run [`INVESTMENT_RULES`] over the feature's typical investment.
pub fn adjust_investment(feature: &FeatureRecord, inputs: &InvestmentInputs) -> Investment {
    INVESTMENT_RULES
        .iter()
        .fold(feature.typical_investment, |current, rule| {
            if current == rule.from && (rule.when)(feature, inputs) {
                trace!(feature = %feature.id, rule = rule.name, from = %current, to = %rule.to, "investment adjusted");
                rule.to
            } else {
                current
            }
        })
}

// ---------------------------------------------------------------------------
// Recommendation
// ---------------------------------------------------------------------------

/// The evolving recommendation while rules are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub recommendation: Recommendation,
    pub reason: Option<String>,
    pub consultation_note: Option<String>,
    pub superseded: Option<SupersededVerdict>,
}

impl Default for Verdict {
    fn default() -> Self {
        Self {
            recommendation: Recommendation::Include,
            reason: None,
            consultation_note: None,
            superseded: None,
        }
    }
}

impl Verdict {
    /// Replace the recommendation and reason, keeping any non-include
    /// verdict it overwrites in `superseded`.
    fn overwrite(&mut self, recommendation: Recommendation, reason: String) {
        if self.recommendation != Recommendation::Include {
            self.superseded = Some(SupersededVerdict {
                recommendation: self.recommendation,
                reason: self.reason.take(),
            });
        }
        self.recommendation = recommendation;
        self.reason = Some(reason);
    }

    fn add_note(&mut self, note: &str) {
        self.consultation_note = Some(match self.consultation_note.take() {
            Some(existing) => format!("{existing} {note}"),
            None => note.to_string(),
        });
    }
}

/// What a recommendation rule can see about the feature being scored.
pub struct RuleInputs<'a> {
    pub feature: &'a FeatureRecord,
    pub ctx: &'a FeatureContext<'a>,
    pub risk_level: RiskLevel,
    /// Data available directly or bridged by AI enrichment.
    pub data_available: bool,
}

pub struct RecommendationRule {
    pub name: &'static str,
    pub apply: fn(&mut Verdict, &RuleInputs<'_>),
}

/// Applied top to bottom. The tight-timeline deferral runs after the
/// caution escalation and client exclusion runs last.
pub const RECOMMENDATION_RULES: &[RecommendationRule] = &[
    RecommendationRule {
        name: "missing_data",
        apply: missing_data,
    },
    RecommendationRule {
        name: "high_risk_low_capacity",
        apply: high_risk_low_capacity,
    },
    RecommendationRule {
        name: "tight_timeline",
        apply: tight_timeline,
    },
    RecommendationRule {
        name: "client_excluded",
        apply: client_excluded,
    },
];

fn missing_data(verdict: &mut Verdict, input: &RuleInputs<'_>) {
    if input.data_available {
        return;
    }

    let category = input.feature.data_required.as_str();
    if input.feature.phase == Phase::Day1 {
        verdict.overwrite(
            Recommendation::Limited,
            format!("Launches with limited results until {category} data is in place"),
        );
    } else {
        verdict.overwrite(
            Recommendation::Phase,
            format!("Waiting for {category} data to accumulate"),
        );
    }

    if input.ctx.answers.remediation() == Some(RemediationApproach::PayLater) {
        verdict.add_note(
            "Pay-later remediation: document the data-quality risk and the client's sign-off before launch.",
        );
    }
}

fn high_risk_low_capacity(verdict: &mut Verdict, input: &RuleInputs<'_>) {
    if verdict.recommendation == Recommendation::Include
        && input.risk_level == RiskLevel::High
        && input.ctx.capacity_score < CAUTION_CAPACITY_MIN
    {
        verdict.overwrite(
            Recommendation::Caution,
            "High-risk feature for a team with limited capacity".to_string(),
        );
        verdict.add_note("Add managed support or team training before enabling.");
    }
}

fn tight_timeline(verdict: &mut Verdict, input: &RuleInputs<'_>) {
    if input.ctx.answers.is(keys::TIMELINE, "tight")
        && input.feature.phase != Phase::Day1
        && input.feature.importance != Importance::Critical
    {
        verdict.overwrite(
            Recommendation::Phase,
            "Deferred to keep a tight timeline focused on launch essentials".to_string(),
        );
    }
}

fn client_excluded(verdict: &mut Verdict, input: &RuleInputs<'_>) {
    let excluded = input.ctx.answers.list(keys::EXCLUDED_FEATURES);
    if excluded.contains(&input.feature.id.as_str()) {
        verdict.overwrite(Recommendation::Exclude, "Excluded by the client".to_string());
    }
}

// ---------------------------------------------------------------------------
// Feature-specific notes
// ---------------------------------------------------------------------------

/// An annotation attached to one feature by id. Never changes the recommendation.
struct FeatureNote {
    feature_id: &'static str,
    when: fn(&FeatureContext<'_>) -> bool,
    note: &'static str,
}

const FEATURE_NOTES: &[FeatureNote] = &[
    FeatureNote {
        feature_id: "synonyms",
        when: inexperienced,
        note: "Include synonym-management training; first-time teams over-expand synonyms.",
    },
    FeatureNote {
        feature_id: "merchandising_rules",
        when: no_merchandising_owner,
        note: "Walk the team through rule authoring; nobody on it owns merchandising today.",
    },
    FeatureNote {
        feature_id: "ab_testing",
        when: never_tested,
        note: "Set up an experimentation cadence with the client before the first test.",
    },
    FeatureNote {
        feature_id: "personalized_ranking",
        when: heavy_consultation,
        note: "Review personalization signals with the client in a dedicated session.",
    },
];

fn inexperienced(ctx: &FeatureContext<'_>) -> bool {
    !ctx.answers.is(keys::PAST_EXPERIENCE, "yes")
}

fn no_merchandising_owner(ctx: &FeatureContext<'_>) -> bool {
    !matches!(
        ctx.answers.get(keys::TEAM_ROLE),
        Some("merchandiser" | "search_specialist")
    )
}

fn never_tested(ctx: &FeatureContext<'_>) -> bool {
    matches!(ctx.answers.get(keys::AB_TESTING), None | Some("never"))
}

fn heavy_consultation(ctx: &FeatureContext<'_>) -> bool {
    ctx.consultation_tier == ConsultationTier::High
}

fn apply_feature_notes(verdict: &mut Verdict, feature: &FeatureRecord, ctx: &FeatureContext<'_>) {
    for note in FEATURE_NOTES {
        if note.feature_id == feature.id && (note.when)(ctx) {
            verdict.add_note(note.note);
        }
    }
}
