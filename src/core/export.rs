//! # Export
//!
//! Serialize the current component list to a JSON artifact named
//! `components_<filename-or-"export">_<date>.json`.
//!
//! The record shape is flat: location fields are lifted to the top level
//! with `"N/A"` substituted when absent, so downstream spreadsheets never
//! have to deal with nested optionals. Writes are atomic (`.tmp` + rename).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::api::{AnalysisStats, ComponentType, IdentifiedComponent, ReusePotential};

/// One exported component. `page` and `section` are either their real
/// values or the string `"N/A"`.
#[derive(Serialize, Debug, PartialEq)]
pub struct ExportRecord {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: ComponentType,
    pub title: String,
    pub text: String,
    pub confidence: f64,
    pub reuse_potential: ReusePotential,
    pub rationale: String,
    pub page: Value,
    pub section: Value,
}

fn not_available() -> Value {
    Value::String("N/A".to_string())
}

/// Flatten components into export records with 1-based ids.
pub fn export_records(components: &[IdentifiedComponent]) -> Vec<ExportRecord> {
    components
        .iter()
        .enumerate()
        .map(|(index, comp)| {
            let location = comp.location.as_ref();
            ExportRecord {
                id: index + 1,
                kind: comp.kind,
                title: comp.title.clone(),
                text: comp.text.clone(),
                confidence: comp.confidence,
                reuse_potential: comp.reuse_potential,
                rationale: comp.rationale.clone(),
                page: location
                    .and_then(|loc| loc.page)
                    .map(Value::from)
                    .unwrap_or_else(not_available),
                section: location
                    .and_then(|loc| loc.section.clone())
                    .map(Value::from)
                    .unwrap_or_else(not_available),
            }
        })
        .collect()
}

/// Artifact name: `components_<stem>_<date>.json`, where `<stem>` is the
/// uploaded file's name if the last analysis was an upload, else `"export"`.
pub fn export_file_name(filename: Option<&str>, date: NaiveDate) -> String {
    let stem = filename.unwrap_or("export");
    format!("components_{stem}_{}.json", date.format("%Y-%m-%d"))
}

/// Write the component list to `dir`, returning the path written.
pub fn write_export(
    components: &[IdentifiedComponent],
    stats: Option<&AnalysisStats>,
    dir: &Path,
) -> io::Result<PathBuf> {
    let records = export_records(components);
    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let name = export_file_name(
        stats.and_then(|s| s.filename.as_deref()),
        chrono::Local::now().date_naive(),
    );
    let path = dir.join(name);

    // Atomic write: never leave a half-serialized artifact behind.
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, &path)?;
    Ok(path)
}
