//! Slack channel sink.
//!
//! Delivers with `chat.postMessage`; see
//! <https://api.slack.com/methods/chat.postMessage>. Slack wraps every reply
//! in an envelope whose `ok` field carries success, so a `200` alone does not
//! mean the message landed.

use std::time::Duration;

use async_trait::async_trait;
use blotter_extract::pipeline::{NotificationSink, SinkError};

use crate::NotifyError;

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// [`NotificationSink`] delivering to a Slack channel.
pub struct SlackSink {
    client: reqwest::Client,
    token: String,
}

impl SlackSink {
    /// Creates a sink authenticating with the given bot token.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(token: &str) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            token: token.to_string(),
        })
    }
}

#[async_trait]
impl NotificationSink for SlackSink {
    async fn post(&self, destination: &str, body: &str) -> Result<(), SinkError> {
        let payload = serde_json::json!({
            "channel": destination,
            "text": body,
        });

        let response = self
            .client
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await
            .map_err(NotifyError::Http)?
            .error_for_status()
            .map_err(NotifyError::Http)?;

        let reply: serde_json::Value = response.json().await.map_err(NotifyError::Http)?;
        check_reply(&reply)?;

        log::debug!("posted {} chars to {destination}", body.chars().count());

        Ok(())
    }
}

/// Accepts Slack's response envelope, surfacing the `error` field when `ok`
/// is anything but `true`.
fn check_reply(reply: &serde_json::Value) -> Result<(), NotifyError> {
    if reply["ok"].as_bool() == Some(true) {
        Ok(())
    } else {
        Err(NotifyError::Api {
            message: reply["error"]
                .as_str()
                .unwrap_or("unknown error")
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ok_envelope() {
        let reply = serde_json::json!({"ok": true, "ts": "1725343800.000100"});

        assert!(check_reply(&reply).is_ok());
    }

    #[test]
    fn surfaces_named_error() {
        let reply = serde_json::json!({"ok": false, "error": "channel_not_found"});

        let error = check_reply(&reply).unwrap_err();

        assert_eq!(error.to_string(), "API error: channel_not_found");
    }

    #[test]
    fn rejects_envelope_without_ok() {
        let reply = serde_json::json!({"warning": "missing_charset"});

        let error = check_reply(&reply).unwrap_err();

        assert_eq!(error.to_string(), "API error: unknown error");
    }
}
