//! Record builder: turns input records into dataset rows.
//!
//! Each row is processed independently against the injected fetch
//! collaborator, so the batch runs on a bounded worker pool. Output order
//! always matches input order, whatever the completion order. A failed
//! fetch degrades that one row to the all-zero feature set; it never aborts
//! the batch.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::{Instrument, info, info_span, warn};

use crate::dataset::records::{DatasetRow, PostRecord};
use crate::extractor::{self, PostFeatures, features};
use crate::fetcher::Fetch;

pub async fn build(
    records: &[PostRecord],
    fetcher: Arc<dyn Fetch>,
    concurrency: usize,
) -> Vec<DatasetRow> {
    let total = records.len();
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut handles = Vec::with_capacity(total);
    for (index, record) in records.iter().cloned().enumerate() {
        let semaphore = semaphore.clone();
        let fetcher = fetcher.clone();
        let span = info_span!("post", index, url = %record.post_url);
        handles.push(tokio::spawn(
            async move {
                // Never closed, so acquisition only fails if the semaphore
                // is dropped first; proceed unthrottled in that case.
                let _permit = semaphore.acquire_owned().await.ok();
                info!("processing post {}/{}", index + 1, total);
                build_row(fetcher.as_ref(), record).await
            }
            .instrument(span),
        ));
    }

    // Awaiting the handles in spawn order reassembles input order.
    let mut rows = Vec::with_capacity(total);
    for (index, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok(row) => rows.push(row),
            Err(err) => {
                warn!("row task {} panicked: {}", index, err);
                let record = records[index].clone();
                let day = features::day_of_week(record.publish_date);
                rows.push(DatasetRow {
                    record,
                    features: PostFeatures::empty(day),
                });
            }
        }
    }
    rows
}

async fn build_row(fetcher: &dyn Fetch, record: PostRecord) -> DatasetRow {
    let features = match fetcher.fetch(&record.post_url).await {
        Ok(response) => {
            let features = extractor::analyze(&response.body_utf8, record.publish_date);
            info!(
                words = features.word_count,
                tags = features.tag_count,
                external_link = features.has_external_link,
                media = features.has_media,
                "extracted features"
            );
            features
        }
        Err(err) => {
            warn!("fetch failed, emitting degraded row: {}", err);
            PostFeatures::empty(features::day_of_week(record.publish_date))
        }
    };

    DatasetRow { record, features }
}
