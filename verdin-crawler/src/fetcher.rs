use crate::error::{CrawlError, Result};
use reqwest::Client;
use reqwest::header::ACCEPT;
use std::time::Instant;
use tracing::debug;
use url::Url;

/// One fetched page: body, status and the response headers in wire order.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested.
    pub url: String,
    /// Where the request ended up after redirects.
    pub final_url: String,
    pub status: u16,
    pub body: String,
    /// Header (name, values) pairs, response order preserved.
    pub headers: Vec<(String, Vec<String>)>,
}

/// HTTP fetcher with content negotiation for Turtle pages.
///
/// Non-2xx statuses are not treated as errors here: the body and headers
/// are returned as-is and the caller decides what to do with them.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new() -> Self {
        Self::with_timeout(10)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let client = Client::builder()
            .user_agent(concat!("Verdin/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        Url::parse(url).map_err(|e| CrawlError::InvalidUrl(format!("{url}: {e}")))?;

        debug!("Fetching {}", url);
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "text/turtle")
            .send()
            .await?;

        let status = response.status().as_u16();
        let final_url = response.url().to_string();
        let mut headers = Vec::new();
        for name in response.headers().keys() {
            let values = response
                .headers()
                .get_all(name)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .map(str::to_string)
                .collect();
            headers.push((name.as_str().to_string(), values));
        }

        let body = response.text().await?;
        debug!(
            "Fetched {} ({} bytes, status {}) in {:?}",
            url,
            body.len(),
            status,
            start.elapsed()
        );

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status,
            body,
            headers,
        })
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}
