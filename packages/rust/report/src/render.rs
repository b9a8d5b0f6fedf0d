//! Markdown rendering of a [`ScoringResult`].
//!
//! Output is a single document with YAML frontmatter, readiness metrics,
//! the phased rollout, work-breakdown tables and a warnings section. The
//! renderer never reads the clock; plan id and timestamp come in via
//! [`ReportMeta`] so the same inputs always render the same text.

use std::fmt::Write as _;

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, instrument};

use scopewise_shared::{
    AppConfig, DimensionScore, PayNowPayLater, Phase, PlanId, Recommendation, ReportConfig,
    ScoredFeature, ScoringResult,
};

/// Host-stamped facts about one report.
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub plan_id: PlanId,
    pub generated_at: DateTime<Utc>,
    pub client_name: Option<String>,
    pub industry: Option<String>,
}

impl ReportMeta {
    pub fn new(plan_id: PlanId, generated_at: DateTime<Utc>) -> Self {
        Self {
            plan_id,
            generated_at,
            client_name: None,
            industry: None,
        }
    }
}

/// Rendering switches, normally taken from the `[report]` config section.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub show_reasons: bool,
    pub show_empty_phases: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for ReportOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            show_reasons: config.show_reasons,
            show_empty_phases: config.show_empty_phases,
        }
    }
}

impl From<&AppConfig> for ReportOptions {
    fn from(config: &AppConfig) -> Self {
        Self::from(&config.report)
    }
}

/// Render the full Markdown summary.
#[instrument(skip_all, fields(plan_id = %meta.plan_id))]
pub fn render_markdown(
    result: &ScoringResult,
    meta: &ReportMeta,
    options: &ReportOptions,
) -> String {
    let mut md = build_frontmatter(meta);

    match &meta.client_name {
        Some(client) => {
            let _ = writeln!(md, "# {}: {client}\n", options.title);
        }
        None => {
            let _ = writeln!(md, "# {}\n", options.title);
        }
    }

    render_readiness(&mut md, result);
    render_engagement(&mut md, result);
    render_rollout(&mut md, result, options);
    render_breakdown(&mut md, result);
    render_warnings(&mut md, result);

    debug!(bytes = md.len(), "rendered markdown report");
    md
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

fn render_readiness(md: &mut String, result: &ScoringResult) {
    md.push_str("## Readiness\n");
    let rows = vec![
        vec![
            "Data readiness".to_string(),
            score_cell(&result.data),
            result.data.level.label().to_string(),
        ],
        vec![
            "Team capacity".to_string(),
            score_cell(&result.capacity),
            result.capacity.level.label().to_string(),
        ],
        vec![
            "Consultation load".to_string(),
            score_cell(&result.consultation),
            result.consultation.level.label().to_string(),
        ],
    ];
    md.push_str(&markdown_table(&["Dimension", "Score", "Level"], &rows));
}

fn render_engagement(md: &mut String, result: &ScoringResult) {
    md.push_str("## Engagement model\n\n");
    let _ = writeln!(
        md,
        "- **Support tier {}: {}.** {}",
        result.support_tier.number(),
        result.support_tier.label(),
        result.support_tier.description()
    );
    let _ = writeln!(
        md,
        "- **Consultation: {}.** {}",
        result.consultation_tier.label(),
        result.consultation_tier.description()
    );
    if result.ai_eligible {
        md.push_str("- **AI enrichment** is approved to bridge catalog data gaps.\n");
    }
    md.push('\n');
}

fn render_rollout(md: &mut String, result: &ScoringResult, options: &ReportOptions) {
    md.push_str("## Rollout\n\n");
    for phase in Phase::ALL {
        let features = result.phase(phase);
        if features.is_empty() && !options.show_empty_phases {
            continue;
        }

        let _ = writeln!(md, "### {}\n", phase.label());
        if features.is_empty() {
            md.push_str("_No features in this phase._\n\n");
            continue;
        }
        for feature in features {
            render_feature(md, feature, options);
        }
        md.push('\n');
    }
}

fn render_feature(md: &mut String, feature: &ScoredFeature, options: &ReportOptions) {
    let _ = write!(
        md,
        "- **{}** ({}): {}",
        feature.feature.title,
        feature.investment,
        feature.recommendation.label()
    );
    if let Some(tag) = feature.pay_now_pay_later {
        let _ = write!(md, " `{}`", tag.as_str());
    }
    if feature.needs_ai {
        md.push_str(" `ai-enriched`");
    }
    md.push('\n');

    if !options.show_reasons {
        return;
    }
    if let Some(reason) = &feature.reason {
        let _ = writeln!(md, "  - {reason}");
    }
    if let Some(note) = &feature.consultation_note {
        let _ = writeln!(md, "  - Consultation: {note}");
    }
}

fn render_breakdown(md: &mut String, result: &ScoringResult) {
    let breakdown = &result.work_breakdown;
    md.push_str("## Work breakdown\n\n");
    let _ = writeln!(
        md,
        "Based on {} feature(s) in scope.",
        breakdown.included
    );

    let scope: Vec<Vec<String>> = breakdown
        .scope
        .iter()
        .map(|(k, pct)| vec![k.label().to_string(), format!("{pct}%")])
        .collect();
    let layer: Vec<Vec<String>> = breakdown
        .layer
        .iter()
        .map(|(k, pct)| vec![k.label().to_string(), format!("{pct}%")])
        .collect();
    let priority: Vec<Vec<String>> = breakdown
        .priority
        .iter()
        .map(|(k, pct)| vec![k.label().to_string(), format!("{pct}%")])
        .collect();

    md.push_str(&markdown_table(&["Scope", "Share"], &scope));
    md.push_str(&markdown_table(&["Layer", "Share"], &layer));
    md.push_str(&markdown_table(&["Priority", "Share"], &priority));
}

/// Every line is drawn from the listed features, so a filtered result
/// only warns about what it shows.
fn render_warnings(md: &mut String, result: &ScoringResult) {
    let caution = titles_where(result, |f| f.recommendation == Recommendation::Caution);
    let flagged = titles_where(result, |f| result.risk_flags.contains(&f.feature.id));
    let needs_ai = titles_where(result, |f| f.needs_ai);
    let pay_later = titles_where(result, |f| {
        f.pay_now_pay_later == Some(PayNowPayLater::PayLater)
    });

    md.push_str("## Warnings\n\n");
    if caution.is_empty() && flagged.is_empty() && needs_ai.is_empty() && pay_later.is_empty() {
        md.push_str("No warnings.\n");
        return;
    }

    warning_line(md, "Proceed with caution", &caution);
    warning_line(md, "High-risk features", &flagged);
    warning_line(md, "Needs AI enrichment", &needs_ai);
    warning_line(md, "Launching on pay-later data", &pay_later);
}

fn warning_line(md: &mut String, label: &str, titles: &[&str]) {
    if !titles.is_empty() {
        let _ = writeln!(md, "- **{label}:** {}", titles.join(", "));
    }
}

fn titles_where(result: &ScoringResult, pred: impl Fn(&ScoredFeature) -> bool) -> Vec<&str> {
    result
        .features()
        .filter(|f| pred(f))
        .map(|f| f.feature.title.as_str())
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn score_cell<L>(score: &DimensionScore<L>) -> String {
    if score.raw_score == score.effective_score {
        format!("{:.1} / {:.0}", score.effective_score, score.max_score)
    } else {
        format!(
            "{:.1} / {:.0} (raw {:.1})",
            score.effective_score, score.max_score, score.raw_score
        )
    }
}

/// Build a pipe table with a header row.
fn markdown_table(header: &[&str], rows: &[Vec<String>]) -> String {
    let mut md = String::from("\n");

    md.push_str("| ");
    md.push_str(&header.join(" | "));
    md.push_str(" |\n");

    md.push_str("| ");
    md.push_str(&header.iter().map(|_| "---").collect::<Vec<_>>().join(" | "));
    md.push_str(" |\n");

    for row in rows {
        md.push_str("| ");
        md.push_str(&row.join(" | "));
        md.push_str(" |\n");
    }

    md.push('\n');
    md
}

/// Build a YAML frontmatter block.
fn build_frontmatter(meta: &ReportMeta) -> String {
    let mut fm = String::from("---\n");
    fm.push_str(&format!("plan_id: \"{}\"\n", meta.plan_id));
    fm.push_str(&format!(
        "generated_at: \"{}\"\n",
        meta.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    if let Some(client) = &meta.client_name {
        fm.push_str(&format!("client: \"{}\"\n", escape_yaml_string(client)));
    }
    if let Some(industry) = &meta.industry {
        fm.push_str(&format!("industry: \"{}\"\n", escape_yaml_string(industry)));
    }
    fm.push_str("---\n\n");
    fm
}

/// Escape special characters in a YAML string value.
fn escape_yaml_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
