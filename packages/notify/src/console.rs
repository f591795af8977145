//! Console sink for dry runs.

use async_trait::async_trait;
use blotter_extract::pipeline::{NotificationSink, SinkError};

/// [`NotificationSink`] that prints messages instead of delivering them.
pub struct ConsoleSink;

#[async_trait]
impl NotificationSink for ConsoleSink {
    async fn post(&self, destination: &str, body: &str) -> Result<(), SinkError> {
        println!("--- {destination} ---");
        println!("{body}");
        println!();

        Ok(())
    }
}
