//! Short-form broadcast sink.
//!
//! Mirrors incident summaries to a status feed. The feed retired from the
//! daily run a while back, so the sink only activates when a `[broadcast]`
//! table is configured.

use std::time::Duration;

use async_trait::async_trait;
use blotter_extract::pipeline::{NotificationSink, SinkError};

use crate::NotifyError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`NotificationSink`] posting summaries to a status endpoint.
pub struct StatusSink {
    client: reqwest::Client,
    url: String,
    token: String,
}

impl StatusSink {
    /// Creates a sink posting to `url`, authenticating with `token`.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str, token: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl NotificationSink for StatusSink {
    async fn post(&self, destination: &str, body: &str) -> Result<(), SinkError> {
        let payload = serde_json::json!({ "status": body });

        self.client
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(NotifyError::Http)?
            .error_for_status()
            .map_err(NotifyError::Http)?;

        log::debug!("broadcast {} chars to {destination}", body.chars().count());

        Ok(())
    }
}
