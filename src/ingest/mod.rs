//! Analytics-export ingestion.
//!
//! Finds the newest export file in a directory, parses it, and validates
//! the column layout before any row reaches the record builder. Layout
//! problems are fatal here; per-field problems (an unparseable date or
//! impression count) degrade to `None` on that field only.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::dataset::records::PostRecord;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("no export file found in {}", .0.display())]
    NoExportFound(PathBuf),

    #[error("export file {} has no rows", .0.display())]
    EmptyExport(PathBuf),

    #[error("unexpected column layout: [{found}]")]
    UnexpectedColumns { found: String },
}

/// Newest `.csv` file in the export directory, by modification time.
pub fn latest_export(dir: &Path) -> Result<PathBuf, IngestError> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("csv") {
            continue;
        }
        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().is_none_or(|(t, _)| modified > *t) {
            newest = Some((modified, path));
        }
    }
    newest
        .map(|(_, path)| path)
        .ok_or_else(|| IngestError::NoExportFound(dir.to_path_buf()))
}

/// Parse an export file into typed post records.
pub fn parse_export(path: &Path) -> Result<Vec<PostRecord>, IngestError> {
    let text = fs::read_to_string(path)?;
    let rows = parse_rows(&text);
    let Some((header, body)) = rows.split_first() else {
        return Err(IngestError::EmptyExport(path.to_path_buf()));
    };

    let layout = ColumnLayout::from_header(header)?;
    debug!(?layout, "resolved export column layout");

    let records: Vec<PostRecord> = body
        .iter()
        .filter(|row| !is_blank(row))
        .map(|row| layout.record(row))
        .collect();

    info!(
        "parsed {} post records from {}",
        records.len(),
        path.display()
    );
    Ok(records)
}

/// Positions of the columns we consume. Extra columns in the export are
/// ignored; missing required ones abort ingestion.
#[derive(Debug)]
struct ColumnLayout {
    url: usize,
    impressions: usize,
    date: Option<usize>,
}

impl ColumnLayout {
    fn from_header(header: &[String]) -> Result<Self, IngestError> {
        let names: Vec<String> = header.iter().map(|h| canonical_header(h)).collect();
        let position = |wanted: &[&str]| {
            names
                .iter()
                .position(|name| wanted.contains(&name.as_str()))
        };

        let url = position(&["post_url"]);
        let impressions = position(&["impressions"]);
        let date = position(&["publish_date", "created_date", "date"]);

        match (url, impressions) {
            (Some(url), Some(impressions)) => Ok(Self {
                url,
                impressions,
                date,
            }),
            _ => Err(IngestError::UnexpectedColumns {
                found: names.join(", "),
            }),
        }
    }

    fn record(&self, row: &[String]) -> PostRecord {
        PostRecord {
            post_url: canonical_url(row.get(self.url).map(String::as_str).unwrap_or_default()),
            publish_date: self
                .date
                .and_then(|i| row.get(i))
                .and_then(|field| parse_date(field)),
            impressions: row.get(self.impressions).and_then(|f| parse_impressions(f)),
        }
    }
}

/// Export headers vary in casing and spacing ("Post URL", "post_url").
fn canonical_header(raw: &str) -> String {
    raw.trim().to_lowercase().replace(' ', "_")
}

/// Share URLs carry tracking query parameters; the permalink is everything
/// before the `?`.
fn canonical_url(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.split('?').next().unwrap_or(trimmed).to_string()
}

fn parse_impressions(field: &str) -> Option<u64> {
    let cleaned: String = field.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Ok(n) = cleaned.parse::<u64>() {
        return Some(n);
    }
    // Spreadsheet tools sometimes round-trip counts as floats ("1523.0")
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f as u64)
}

fn parse_date(field: &str) -> Option<NaiveDate> {
    let trimmed = field.trim();
    for format in ["%Y-%m-%d", "%m/%d/%Y", "%m/%d/%y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    None
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|field| field.trim().is_empty())
}

/// Minimal quote-aware CSV parsing (double-quote escapes, CRLF tolerant).
fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            ',' if !in_quotes => {
                row.push(std::mem::take(&mut field));
            }
            '\r' | '\n' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(std::mem::take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(std::mem::take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing row without a final newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}
