//! TOML configuration for the blotter binary.
//!
//! A minimal file needs the export path and the Slack channel; everything
//! else has a default or can ride in from the environment:
//!
//! ```toml
//! [export]
//! path = "reports.csv"
//!
//! [notify]
//! channel = "C5NAM8SN8"
//! ```

use std::path::{Path, PathBuf};

use blotter_extract::pipeline::ErrorPolicy;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable consulted when `[notify]` carries no token.
pub const SLACK_TOKEN_ENV: &str = "BLOTTER_SLACK_TOKEN";

/// Errors from loading or validating the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML or is missing required keys.
    #[error("cannot parse config: {0}")]
    Toml(#[from] toml::de::Error),
    /// No Slack token in the file or the environment.
    #[error("no Slack token: set [notify] token or the BLOTTER_SLACK_TOKEN environment variable")]
    MissingToken,
}

/// Root configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `[source]` table; defaults to the department's report page.
    #[serde(default)]
    pub source: SourceConfig,
    /// `[export]` table.
    pub export: ExportConfig,
    /// `[notify]` table.
    pub notify: NotifyConfig,
    /// `[broadcast]` table; absent leaves the broadcast path inactive.
    #[serde(default)]
    pub broadcast: Option<BroadcastConfig>,
    /// `[pipeline]` table.
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Loads the configuration at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Toml`] when it does not parse.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::de::from_str(&text)?)
    }
}

/// Where the report page lives.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Page URL.
    #[serde(default = "default_page_url")]
    pub url: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: default_page_url(),
        }
    }
}

fn default_page_url() -> String {
    blotter_fetch::DEFAULT_PAGE_URL.to_string()
}

/// CSV export target.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// File the day's rows are written to.
    pub path: PathBuf,
}

/// Slack delivery.
#[derive(Debug, Clone, Deserialize)]
pub struct NotifyConfig {
    /// Channel id the narratives go to.
    pub channel: String,
    /// Bot token; [`SLACK_TOKEN_ENV`] is the fallback.
    #[serde(default)]
    pub token: Option<String>,
}

impl NotifyConfig {
    /// The Slack token, from the file or the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingToken`] when neither is set.
    pub fn resolve_token(&self) -> Result<String, ConfigError> {
        if let Some(token) = &self.token
            && !token.is_empty()
        {
            return Ok(token.clone());
        }
        std::env::var(SLACK_TOKEN_ENV).map_err(|_| ConfigError::MissingToken)
    }
}

/// Optional short-form mirror of the incident summaries.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastConfig {
    /// Status endpoint URL.
    pub url: String,
    /// Bearer token for the endpoint.
    pub token: String,
    /// Feed label handed to the sink.
    pub destination: String,
}

/// Batch behavior.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineConfig {
    /// What to do when one incident fails to extract.
    #[serde(default)]
    pub on_error: ErrorPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::de::from_str(
            r#"
            [source]
            url = "https://example.edu/reports/MainPage.aspx"

            [export]
            path = "/var/blotter/reports.csv"

            [notify]
            channel = "C5NAM8SN8"
            token = "xoxb-test"

            [broadcast]
            url = "https://status.example.edu/api/v1/statuses"
            token = "feed-token"
            destination = "campus-blotter"

            [pipeline]
            on_error = "skip"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.url, "https://example.edu/reports/MainPage.aspx");
        assert_eq!(config.export.path, PathBuf::from("/var/blotter/reports.csv"));
        assert_eq!(config.notify.channel, "C5NAM8SN8");
        assert_eq!(config.notify.token.as_deref(), Some("xoxb-test"));
        let broadcast = config.broadcast.unwrap();
        assert_eq!(broadcast.destination, "campus-blotter");
        assert_eq!(config.pipeline.on_error, ErrorPolicy::Skip);
    }

    #[test]
    fn minimal_config_fills_defaults() {
        let config: Config = toml::de::from_str(
            r#"
            [export]
            path = "reports.csv"

            [notify]
            channel = "C5NAM8SN8"
            "#,
        )
        .unwrap();

        assert_eq!(config.source.url, blotter_fetch::DEFAULT_PAGE_URL);
        assert!(config.notify.token.is_none());
        assert!(config.broadcast.is_none());
        assert_eq!(config.pipeline.on_error, ErrorPolicy::Abort);
    }

    #[test]
    fn missing_export_table_is_an_error() {
        let parsed: Result<Config, _> = toml::de::from_str(
            r#"
            [notify]
            channel = "C5NAM8SN8"
            "#,
        );

        assert!(parsed.is_err());
    }

    #[test]
    fn configured_token_wins() {
        let notify = NotifyConfig {
            channel: "C5NAM8SN8".to_string(),
            token: Some("xoxb-test".to_string()),
        };

        assert_eq!(notify.resolve_token().unwrap(), "xoxb-test");
    }

    #[test]
    fn empty_token_falls_through() {
        let notify = NotifyConfig {
            channel: "C5NAM8SN8".to_string(),
            token: Some(String::new()),
        };

        // The empty string must not be accepted as a token; with the
        // variable unset this lands on MissingToken.
        match notify.resolve_token() {
            Ok(token) => assert_ne!(token, ""),
            Err(error) => assert!(matches!(error, ConfigError::MissingToken)),
        }
    }
}
