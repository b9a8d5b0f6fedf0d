//! Feature catalog loading and validation.
//!
//! The catalog is static configuration, not user input, so anything
//! malformed is rejected here at load time rather than during scoring.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use scopewise_shared::{Catalog, DocumentFormat, Result, ScopewiseError, read_document};

/// The catalog shipped with the engine.
const BUILTIN_CATALOG: &str = include_str!("../data/catalog.json");

static ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9][a-z0-9_]*$").expect("valid regex"));

/// Parse and validate a JSON catalog document.
pub fn from_json_str(content: &str) -> Result<Catalog> {
    let catalog: Catalog = DocumentFormat::Json
        .parse(content)
        .map_err(|e| ScopewiseError::catalog(e.to_string()))?;
    validate(&catalog)?;
    Ok(catalog)
}

/// Parse and validate a TOML catalog document.
pub fn from_toml_str(content: &str) -> Result<Catalog> {
    let catalog: Catalog = DocumentFormat::Toml
        .parse(content)
        .map_err(|e| ScopewiseError::catalog(e.to_string()))?;
    validate(&catalog)?;
    Ok(catalog)
}

/// Load and validate a `.json` or `.toml` catalog file.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load(path: &Path) -> Result<Catalog> {
    let catalog: Catalog = read_document(path).map_err(|e| match e {
        ScopewiseError::Parse { message } => {
            ScopewiseError::catalog(format!("{}: {message}", path.display()))
        }
        other => other,
    })?;
    validate(&catalog)?;
    info!(
        features = catalog.features.len(),
        buckets = catalog.buckets.len(),
        "loaded feature catalog"
    );
    Ok(catalog)
}

/// The built-in catalog.
pub fn builtin() -> Result<Catalog> {
    debug!("loading built-in catalog");
    from_json_str(BUILTIN_CATALOG)
}

/// Check the structural rules serde cannot express.
pub fn validate(catalog: &Catalog) -> Result<()> {
    if catalog.features.is_empty() {
        return Err(ScopewiseError::catalog("catalog has no features"));
    }

    let mut bucket_ids = HashSet::new();
    for bucket in &catalog.buckets {
        check_id("bucket", &bucket.id)?;
        if !bucket_ids.insert(bucket.id.as_str()) {
            return Err(ScopewiseError::catalog(format!(
                "duplicate bucket id '{}'",
                bucket.id
            )));
        }
    }

    let mut feature_ids = HashSet::new();
    for feature in &catalog.features {
        check_id("feature", &feature.id)?;
        if !feature_ids.insert(feature.id.as_str()) {
            return Err(ScopewiseError::catalog(format!(
                "duplicate feature id '{}'",
                feature.id
            )));
        }
        if feature.title.trim().is_empty() {
            return Err(ScopewiseError::catalog(format!(
                "feature '{}' has an empty title",
                feature.id
            )));
        }
        if !bucket_ids.contains(feature.bucket.as_str()) {
            return Err(ScopewiseError::catalog(format!(
                "feature '{}' references unknown bucket '{}'",
                feature.id, feature.bucket
            )));
        }
    }

    Ok(())
}

fn check_id(kind: &str, id: &str) -> Result<()> {
    if ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(ScopewiseError::catalog(format!(
            "{kind} id '{id}' must be lowercase letters, digits and underscores"
        )))
    }
}
