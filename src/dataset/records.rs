use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::extractor::PostFeatures;

/// One row of the analytics export, already typed by the ingest layer.
///
/// Immutable once read; the URL has had its query string (share tracking
/// parameters) stripped at ingest time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub post_url: String,
    pub publish_date: Option<NaiveDate>,
    pub impressions: Option<u64>,
}

/// One finished dataset row: the input record plus the features derived
/// from its fetched page. Assembled once by the builder, never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRow {
    pub record: PostRecord,
    pub features: PostFeatures,
}
