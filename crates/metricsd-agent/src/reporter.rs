//! Outbound delivery of metric updates.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use metricsd_core::error::{MetricsError, Result};
use metricsd_core::protocol::update::TEXT_PLAIN;
use metricsd_core::Update;

/// Delivers one update to the collector and returns its confirmation text.
#[async_trait]
pub trait Reporter: Send + Sync {
    async fn report(&self, update: &Update) -> Result<String>;
}

/// Posts updates as `POST {base}/update/<kind>/<name>/<value>` with an empty
/// `text/plain` body. Non-2xx answers are errors; nothing is retried.
pub struct HttpReporter {
    client: reqwest::Client,
    base: String,
}

impl HttpReporter {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| MetricsError::Transport(format!("http client init failed: {e}")))?;
        Ok(Self {
            client,
            base: server_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, update: &Update) -> Result<String> {
        Ok(format!("{}{}", self.base, update.to_path()?))
    }
}

#[async_trait]
impl Reporter for HttpReporter {
    async fn report(&self, update: &Update) -> Result<String> {
        let url = self.url_for(update)?;
        let resp = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, TEXT_PLAIN)
            .send()
            .await
            .map_err(|e| MetricsError::Transport(format!("POST {url} failed: {e}")))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| MetricsError::Transport(format!("POST {url}: reading body failed: {e}")))?;

        if !status.is_success() {
            return Err(MetricsError::Transport(format!(
                "POST {url} rejected with {status}: {}",
                body.trim_end()
            )));
        }
        Ok(body)
    }
}
