//! CSV serialization for the finished dataset.
//!
//! Stable snake_case column order, RFC-4180 style quoting. Absent optional
//! values render as empty fields so the downstream regression tooling sees
//! proper missing values.

use std::io::{self, Write};

use crate::dataset::records::DatasetRow;
use crate::extractor::features::weekday_name;

pub const COLUMNS: [&str; 9] = [
    "post_url",
    "publish_date",
    "impressions",
    "post_text",
    "word_count",
    "tag_count",
    "has_external_link",
    "has_media",
    "day_of_week",
];

pub fn write_dataset<W: Write>(mut w: W, rows: &[DatasetRow]) -> io::Result<()> {
    write_record(&mut w, COLUMNS.iter().copied())?;
    for row in rows {
        write_record(&mut w, render(row).iter().map(String::as_str))?;
    }
    w.flush()
}

fn render(row: &DatasetRow) -> Vec<String> {
    let record = &row.record;
    let features = &row.features;
    vec![
        record.post_url.clone(),
        record
            .publish_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
        record
            .impressions
            .map(|n| n.to_string())
            .unwrap_or_default(),
        features.post_text.clone(),
        features.word_count.to_string(),
        features.tag_count.to_string(),
        features.has_external_link.to_string(),
        features.has_media.to_string(),
        features
            .day_of_week
            .map(|d| weekday_name(d).to_string())
            .unwrap_or_default(),
    ]
}

fn write_record<'a, W, I>(w: &mut W, fields: I) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a str>,
{
    let mut first = true;
    for field in fields {
        if !first {
            write!(w, ",")?;
        }
        first = false;
        if needs_quotes(field) {
            write!(w, "\"{}\"", field.replace('"', "\"\""))?;
        } else {
            write!(w, "{}", field)?;
        }
    }
    writeln!(w)
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}
