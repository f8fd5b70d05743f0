use crate::error::{PollError, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Trait to abstract the statistics endpoint for better testing
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Fetch one raw statistics body. No retries.
    async fn fetch(&self) -> Result<String>;
}

/// Fetches statistics over HTTP with a single reusable client
#[derive(Debug, Clone)]
pub struct HttpStatsSource {
    client: Client,
    url: String,
}

impl HttpStatsSource {
    pub fn new(url: String, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PollError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PollError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }
}
