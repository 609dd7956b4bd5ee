pub mod client;
pub mod errors;
pub mod pipeline;
pub mod types;

pub use client::{LiveFetcher, fetch};
pub use errors::FetchError;
pub use types::{Charset, PageResponse};

use async_trait::async_trait;

/// Document-fetch collaborator injected into the record builder.
///
/// Implementations own their own throttling, timeouts and retry decisions;
/// the builder calls this exactly once per input row.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<PageResponse, FetchError>;
}
