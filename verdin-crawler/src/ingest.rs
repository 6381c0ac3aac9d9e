//! Dataset upload: POST Turtle fixtures to a stream server ahead of a
//! conformance run. A thin shell over the HTTP client; no retries.

use crate::error::Result;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::path::Path;
use tracing::info;

/// The outcome of posting one dataset file.
#[derive(Debug, Clone)]
pub struct PostOutcome {
    pub name: String,
    pub status: u16,
    pub body: String,
}

/// POST a single dataset to the endpoint.
pub async fn post_dataset(
    client: &Client,
    dataset: Vec<u8>,
    content_type: &str,
    endpoint: &str,
) -> Result<(u16, String)> {
    let response = client
        .post(endpoint)
        .header(CONTENT_TYPE, content_type)
        .body(dataset)
        .send()
        .await?;
    let status = response.status().as_u16();
    let body = response.text().await?;
    Ok((status, body))
}

/// POST each file to the endpoint, in the order given.
pub async fn post_dataset_files(
    paths: &[impl AsRef<Path>],
    content_type: &str,
    endpoint: &str,
) -> Result<Vec<PostOutcome>> {
    let client = Client::new();
    let mut outcomes = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let dataset = tokio::fs::read(path).await?;
        let (status, body) = post_dataset(&client, dataset, content_type, endpoint).await?;
        info!(
            "Posted dataset [{}] to [{}] as [{}] with response code [{}]",
            name, endpoint, content_type, status
        );
        outcomes.push(PostOutcome { name, status, body });
    }

    Ok(outcomes)
}
