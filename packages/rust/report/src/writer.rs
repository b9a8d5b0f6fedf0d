//! Atomic report writing.

use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use scopewise_shared::{Result, ScopewiseError};

use crate::render::ReportMeta;

/// Metadata for a written report file.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ReportArtifact {
    pub filename: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// Write `content` to `dir/filename` via a temp file and rename.
///
/// Creates `dir` if needed. Readers never observe a half-written report.
#[instrument(skip_all, fields(dir = %dir.display(), filename = %filename))]
pub fn write_report(dir: &Path, filename: &str, content: &str) -> Result<ReportArtifact> {
    if filename.is_empty() || filename.contains(['/', '\\']) || filename.starts_with('.') {
        return Err(ScopewiseError::validation(format!(
            "invalid report filename '{filename}'"
        )));
    }

    std::fs::create_dir_all(dir).map_err(|e| ScopewiseError::io(dir, e))?;

    let target = dir.join(filename);
    let temp = dir.join(format!(".{filename}.tmp"));

    std::fs::write(&temp, content).map_err(|e| ScopewiseError::io(&temp, e))?;
    if let Err(e) = std::fs::rename(&temp, &target) {
        let _ = std::fs::remove_file(&temp);
        return Err(ScopewiseError::io(&target, e));
    }

    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let sha256 = format!("{:x}", hasher.finalize());

    debug!(size = content.len(), "wrote report");
    info!(path = %target.display(), "report written");

    Ok(ReportArtifact {
        filename: filename.to_string(),
        sha256,
        size_bytes: content.len(),
    })
}

/// `scope-<client>-<plan id>.<extension>`, or `scope-<plan id>.<extension>`
/// without a client name.
pub fn report_filename(meta: &ReportMeta, extension: &str) -> String {
    match meta.client_name.as_deref().map(slugify) {
        Some(slug) if !slug.is_empty() => format!("scope-{slug}-{}.{extension}", meta.plan_id),
        _ => format!("scope-{}.{extension}", meta.plan_id),
    }
}

/// Lowercase ASCII alphanumerics joined by single dashes.
fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use chrono::Utc;
    use scopewise_shared::PlanId;

    fn temp_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "scopewise-writer-test-{}",
            uuid::Uuid::now_v7()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn writes_file_with_checksum() {
        let tmp = temp_dir();
        let artifact = write_report(&tmp, "plan.md", "# Plan\n").unwrap();

        assert_eq!(artifact.filename, "plan.md");
        assert_eq!(artifact.size_bytes, 7);
        assert_eq!(artifact.sha256.len(), 64);
        assert_eq!(std::fs::read_to_string(tmp.join("plan.md")).unwrap(), "# Plan\n");
        assert!(!tmp.join(".plan.md.tmp").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn creates_missing_directory() {
        let tmp = temp_dir();
        let nested = tmp.join("reports").join("2026");
        write_report(&nested, "plan.json", "{}").unwrap();
        assert!(nested.join("plan.json").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn overwrite_is_idempotent() {
        let tmp = temp_dir();
        let first = write_report(&tmp, "plan.md", "same").unwrap();
        let second = write_report(&tmp, "plan.md", "same").unwrap();
        assert_eq!(first.sha256, second.sha256);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let tmp = temp_dir();
        // A non-empty directory at the target path makes the rename fail.
        let blocker = tmp.join("plan.md");
        std::fs::create_dir_all(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), "x").unwrap();

        let err = write_report(&tmp, "plan.md", "# Plan\n").unwrap_err();
        assert!(matches!(err, ScopewiseError::Io { .. }));
        assert!(!tmp.join(".plan.md.tmp").exists());
        assert!(blocker.join("keep").exists());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_path_like_filenames() {
        let tmp = temp_dir();
        for bad in ["", "../escape.md", "nested/plan.md", ".hidden"] {
            let err = write_report(&tmp, bad, "x").unwrap_err();
            assert!(matches!(err, ScopewiseError::Validation { .. }), "{bad}");
        }

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn filename_includes_client_slug() {
        let mut meta = ReportMeta::new(PlanId::new(), Utc::now());
        assert_eq!(
            report_filename(&meta, "md"),
            format!("scope-{}.md", meta.plan_id)
        );

        meta.client_name = Some("Acme Fresh  Foods!".into());
        assert_eq!(
            report_filename(&meta, "json"),
            format!("scope-acme-fresh-foods-{}.json", meta.plan_id)
        );

        meta.client_name = Some("???".into());
        assert_eq!(
            report_filename(&meta, "md"),
            format!("scope-{}.md", meta.plan_id)
        );
    }
}
