use anyhow::{anyhow, Context};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::catalog;
use crate::model::AppSnapshot;

pub const EXPORT_PREFIX: &str = "degree-tracker-";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImportFormatError {
    #[error("could not read {path}: {reason}")]
    Unreadable { path: String, reason: String },
    #[error("file is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("file has no majors list")]
    MissingMajors,
    #[error("file does not match the snapshot format: {0}")]
    Shape(String),
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub bytes: usize,
}

pub fn export_file_name(date: NaiveDate) -> String {
    format!("{}{}.json", EXPORT_PREFIX, date.format("%Y-%m-%d"))
}

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Pretty JSON with two-space indentation.
pub fn render_snapshot(snapshot: &AppSnapshot) -> anyhow::Result<String> {
    serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")
}

pub fn export_snapshot(
    snapshot: &AppSnapshot,
    out_dir: &Path,
    date: NaiveDate,
) -> anyhow::Result<ExportSummary> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create directory {}", out_dir.to_string_lossy()))?;
    let text = render_snapshot(snapshot)?;
    let out_path = out_dir.join(export_file_name(date));
    let tmp_path = out_path.with_extension("json.writing");

    let mut out = File::create(&tmp_path).with_context(|| {
        format!(
            "failed to create output file {}",
            tmp_path.to_string_lossy()
        )
    })?;
    out.write_all(text.as_bytes())
        .context("failed to write snapshot")?;
    out.flush().context("failed to flush snapshot")?;
    drop(out);

    std::fs::rename(&tmp_path, &out_path).with_context(|| {
        format!(
            "failed to move export into place at {}",
            out_path.to_string_lossy()
        )
    })?;
    if !out_path.is_file() {
        return Err(anyhow!(
            "export missing after write: {}",
            out_path.to_string_lossy()
        ));
    }

    Ok(ExportSummary {
        path: out_path,
        bytes: text.len(),
    })
}

pub fn parse_snapshot(text: &str) -> Result<AppSnapshot, ImportFormatError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| ImportFormatError::InvalidJson(e.to_string()))?;
    match value.get("majors") {
        Some(serde_json::Value::Array(_)) => {}
        _ => return Err(ImportFormatError::MissingMajors),
    }
    let mut snapshot: AppSnapshot =
        serde_json::from_value(value).map_err(|e| ImportFormatError::Shape(e.to_string()))?;
    catalog::attach_legacy_schemes(&mut snapshot);
    Ok(snapshot)
}

pub fn import_snapshot_file(path: &Path) -> Result<AppSnapshot, ImportFormatError> {
    let bytes = std::fs::read(path).map_err(|e| ImportFormatError::Unreadable {
        path: path.to_string_lossy().to_string(),
        reason: e.to_string(),
    })?;
    let text = String::from_utf8(bytes).map_err(|e| ImportFormatError::Unreadable {
        path: path.to_string_lossy().to_string(),
        reason: format!("not UTF-8 text: {e}"),
    })?;
    parse_snapshot(text.trim_start_matches('\u{feff}'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_name_uses_iso_date() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 7).expect("date");
        assert_eq!(export_file_name(d), "degree-tracker-2025-03-07.json");
    }

    #[test]
    fn pretty_output_uses_two_space_indent() {
        let text = render_snapshot(&catalog::default_snapshot()).expect("render");
        assert!(text.starts_with("{\n  \"owner\""));
    }

    #[test]
    fn import_requires_majors_array() {
        assert_eq!(
            parse_snapshot(r#"{"owner":"x"}"#),
            Err(ImportFormatError::MissingMajors)
        );
        assert_eq!(
            parse_snapshot(r#"{"owner":"x","majors":{}}"#),
            Err(ImportFormatError::MissingMajors)
        );
        assert!(matches!(
            parse_snapshot("{not json"),
            Err(ImportFormatError::InvalidJson(_))
        ));
        assert!(matches!(
            parse_snapshot(r#"{"majors":[{"title":"no key"}]}"#),
            Err(ImportFormatError::Shape(_))
        ));
    }

    #[test]
    fn legacy_export_without_scheme_gets_one() {
        let text = r#"{
          "owner": "A",
          "majors": [{
            "key": "symsys",
            "title": "Symbolic Systems",
            "sections": [{
              "key": "concentration-selection",
              "title": "Concentration Selection",
              "rule": { "type": "oneOf" },
              "items": [{ "code": "concentration", "title": "Select", "units": 0, "status": "computer-music" }]
            }]
          }]
        }"#;
        let snap = parse_snapshot(text).expect("parse legacy");
        let major = snap.major("symsys").expect("major");
        assert!(major.concentration.is_some());
    }
}
