use crate::fetcher::{Fetch, errors::FetchError, pipeline::process_response, types::PageResponse};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use rand::Rng;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use tracing::{debug, instrument};

const MAX_BODY_SIZE: u64 = 5 * 1024 * 1024; // 5MB

// The share pages only render server-side for browser user agents, so the
// client presents itself as one.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    ClientBuilder::new()
        .connect_timeout(Duration::from_secs(10))
        .timeout(Duration::from_secs(30))
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .default_headers({
            let mut headers = reqwest::header::HeaderMap::new();
            headers.insert(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"
                    .parse()
                    .unwrap(),
            );
            headers.insert(
                reqwest::header::ACCEPT_LANGUAGE,
                "en-US,en;q=0.5".parse().unwrap(),
            );
            headers
        })
        .build()
        .expect("Failed to build HTTP client")
});

#[instrument(skip_all, fields(url = %url))]
pub async fn fetch(url: &str) -> Result<PageResponse, FetchError> {
    let parsed_url = url::Url::parse(url)?;

    let response = HTTP_CLIENT
        .get(parsed_url.clone())
        .send()
        .await
        .map_err(FetchError::from_reqwest_error)?;

    // Check content length before downloading
    if let Some(content_length) = response.content_length()
        && content_length > MAX_BODY_SIZE
    {
        return Err(FetchError::BodyTooLarge(content_length));
    }

    let final_url = response.url().clone();
    let status = response.status();

    if !status.is_success() {
        return Err(FetchError::Http {
            status,
            retriable: status.is_server_error(),
        });
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("text/html")
        .to_string();

    if !content_type.contains("text/html") && !content_type.contains("application/xhtml") {
        return Err(FetchError::UnsupportedContentType(content_type));
    }

    let body_bytes = response
        .bytes()
        .await
        .map_err(|e| FetchError::Io(e.to_string()))?;

    // Content-Length may have been missing
    if body_bytes.len() as u64 > MAX_BODY_SIZE {
        return Err(FetchError::BodyTooLarge(body_bytes.len() as u64));
    }

    process_response(final_url, status, body_bytes, &content_type)
}

/// Production fetcher: the shared HTTP client plus politeness throttling.
///
/// Each call sleeps a random duration drawn from the configured range before
/// hitting the network, keeping the request rate against the source site low.
pub struct LiveFetcher {
    delay_ms: (u64, u64),
}

impl LiveFetcher {
    pub fn new(delay_ms: (u64, u64)) -> Self {
        Self { delay_ms }
    }

    /// No throttling; used by tests against a local server.
    pub fn unthrottled() -> Self {
        Self { delay_ms: (0, 0) }
    }
}

#[async_trait]
impl Fetch for LiveFetcher {
    async fn fetch(&self, url: &str) -> Result<PageResponse, FetchError> {
        let (min, max) = self.delay_ms;
        if max > 0 {
            let wait = rand::thread_rng().gen_range(min..=max);
            debug!(wait_ms = wait, "throttling before fetch");
            tokio::time::sleep(Duration::from_millis(wait)).await;
        }
        fetch(url).await
    }
}
