//! CLI command definitions, routing, and tracing setup.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use serde::Serialize;
use tracing::info;

use scopewise_core::catalog;
use scopewise_report::{ReportMeta, ReportOptions, render_markdown, report_filename, write_report};
use scopewise_shared::{
    AppConfig, Answers, Catalog, Phase, PlanId, Recommendation, ScoringResult, init_config, keys,
    load_config,
};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// Scopewise: turn a client questionnaire into a phased search implementation plan.
#[derive(Parser)]
#[command(
    name = "scopewise",
    version,
    about = "Score a client questionnaire against the feature catalog and produce a phased scope plan.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Plan output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OutputFormat {
    Markdown,
    Json,
}

impl OutputFormat {
    fn from_config(config: &AppConfig) -> Self {
        match config.defaults.output_format.as_str() {
            "json" => Self::Json,
            _ => Self::Markdown,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

/// Recommendation accepted by `--only`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub(crate) enum OnlyFilter {
    Include,
    Limited,
    Caution,
    Phase,
    Exclude,
}

impl From<OnlyFilter> for Recommendation {
    fn from(filter: OnlyFilter) -> Self {
        match filter {
            OnlyFilter::Include => Self::Include,
            OnlyFilter::Limited => Self::Limited,
            OnlyFilter::Caution => Self::Caution,
            OnlyFilter::Phase => Self::Phase,
            OnlyFilter::Exclude => Self::Exclude,
        }
    }
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Score a questionnaire and print or write the plan.
    Score {
        /// Answer file (.json or .toml).
        #[arg(short, long)]
        answers: PathBuf,

        /// Feature catalog file. Defaults to the configured or built-in catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,

        /// Output format. Defaults to `defaults.output_format`.
        #[arg(short, long)]
        format: Option<OutputFormat>,

        /// Write the plan to a directory instead of stdout. Without a value,
        /// uses `defaults.output_dir`.
        #[arg(short, long, num_args = 0..=1)]
        out: Option<Option<PathBuf>>,

        /// Client name for the report heading and filename.
        #[arg(long)]
        client: Option<String>,

        /// Only list features with this recommendation.
        #[arg(long)]
        only: Option<OnlyFilter>,
    },

    /// Feature catalog operations.
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Catalog subcommands.
#[derive(Subcommand)]
pub(crate) enum CatalogAction {
    /// List catalog features by phase.
    List {
        /// Catalog file. Defaults to the configured or built-in catalog.
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Validate a catalog file without scoring anything.
    Validate {
        /// Catalog file (.json or .toml).
        file: PathBuf,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "scopewise=info",
        1 => "scopewise=debug",
        _ => "scopewise=trace",
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so stdout stays a clean plan document.
    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(env_filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Score {
            answers,
            catalog,
            format,
            out,
            client,
            only,
        } => cmd_score(&ScoreArgs {
            answers,
            catalog,
            format,
            out,
            client,
            only,
        }),
        Command::Catalog { action } => match action {
            CatalogAction::List { catalog } => cmd_catalog_list(catalog.as_deref()),
            CatalogAction::Validate { file } => cmd_catalog_validate(&file),
        },
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

struct ScoreArgs {
    answers: PathBuf,
    catalog: Option<PathBuf>,
    format: Option<OutputFormat>,
    out: Option<Option<PathBuf>>,
    client: Option<String>,
    only: Option<OnlyFilter>,
}

/// JSON plan document: host stamps plus the scoring result.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PlanDocument<'a> {
    plan_id: &'a PlanId,
    generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    client: Option<&'a str>,
    #[serde(flatten)]
    result: &'a ScoringResult,
}

fn cmd_score(args: &ScoreArgs) -> Result<()> {
    let config = load_config()?;
    let answers = Answers::load(&args.answers)?;
    let catalog = resolve_catalog(args.catalog.as_deref(), &config)?;

    let mut result = scopewise_core::score(&answers, &catalog);
    if let Some(only) = args.only {
        retain_recommendation(&mut result, only.into());
    }

    let meta = ReportMeta {
        plan_id: PlanId::new(),
        generated_at: Utc::now(),
        client_name: args.client.clone(),
        industry: answers.get(keys::INDUSTRY).map(str::to_string),
    };

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_config(&config));
    let content = match format {
        OutputFormat::Markdown => render_markdown(&result, &meta, &ReportOptions::from(&config)),
        OutputFormat::Json => {
            let doc = PlanDocument {
                plan_id: &meta.plan_id,
                generated_at: meta.generated_at,
                client: meta.client_name.as_deref(),
                result: &result,
            };
            serde_json::to_string_pretty(&doc)?
        }
    };

    match &args.out {
        None => println!("{content}"),
        Some(dir) => {
            let dir = dir
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.defaults.output_dir));
            let filename = report_filename(&meta, format.extension());
            let artifact = write_report(&dir, &filename, &content)?;

            println!();
            println!("  Scope plan written!");
            println!("  Plan:    {}", meta.plan_id);
            println!("  Path:    {}", dir.join(&artifact.filename).display());
            println!("  Size:    {} bytes", artifact.size_bytes);
            println!("  SHA-256: {}", artifact.sha256);
            println!();
        }
    }

    info!(plan_id = %meta.plan_id, "score complete");
    Ok(())
}

/// `--catalog` flag, then `defaults.catalog_path`, then the built-in catalog.
fn resolve_catalog(flag: Option<&Path>, config: &AppConfig) -> Result<Catalog> {
    let catalog = match flag {
        Some(path) => catalog::load(path)?,
        None => match &config.defaults.catalog_path {
            Some(path) => catalog::load(Path::new(path))?,
            None => catalog::builtin()?,
        },
    };
    Ok(catalog)
}

/// Drop listed features with any other recommendation. Aggregates are
/// left as computed over the whole catalog.
fn retain_recommendation(result: &mut ScoringResult, only: Recommendation) {
    for features in result.by_phase.values_mut() {
        features.retain(|f| f.recommendation == only);
    }
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

fn cmd_catalog_list(path: Option<&Path>) -> Result<()> {
    let config = load_config()?;
    let catalog = resolve_catalog(path, &config)?;

    for phase in Phase::ALL {
        let features: Vec<_> = catalog.features.iter().filter(|f| f.phase == phase).collect();
        if features.is_empty() {
            continue;
        }
        println!("{}", phase.label());
        for f in features {
            println!(
                "  {:<24} {:<10} {:<16} {:?}",
                f.id,
                f.typical_investment.as_str(),
                f.bucket,
                f.importance
            );
        }
        println!();
    }
    println!(
        "{} features in {} buckets",
        catalog.features.len(),
        catalog.buckets.len()
    );
    Ok(())
}

fn cmd_catalog_validate(file: &Path) -> Result<()> {
    if !file.exists() {
        return Err(eyre!("catalog file '{}' does not exist", file.display()));
    }
    let catalog = catalog::load(file)?;
    println!(
        "Catalog OK: {} features in {} buckets",
        catalog.features.len(),
        catalog.buckets.len()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("Config initialized at: {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config: AppConfig = load_config()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{toml_str}");
    Ok(())
}
