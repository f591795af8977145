#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Delivery sinks for rendered blotter messages.
//!
//! [`slack::SlackSink`] posts full narratives to a channel,
//! [`status::StatusSink`] mirrors short summaries to a broadcast feed, and
//! [`console::ConsoleSink`] prints either one for dry runs.

pub mod console;
pub mod slack;
pub mod status;

use thiserror::Error;

/// Errors from delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The service accepted the request but reported a failure.
    #[error("API error: {message}")]
    Api {
        /// Failure name returned by the service.
        message: String,
    },
}
