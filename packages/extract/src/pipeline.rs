//! Batch extraction and dispatch.
//!
//! Extraction is synchronous: the page is parsed and every incident node
//! reduced to an [`IncidentRecord`] before the first sink call, so the
//! non-Send `Html` tree never lives across an `.await` and the returned
//! future stays `Send`. Dispatch then walks the records in document order,
//! one incident fully exported and notified before the next begins.

use std::collections::BTreeMap;

use async_trait::async_trait;
use blotter_report_models::{IncidentRecord, REPORT_HEADERS};
use blotter_render::notification::{self, Notification};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::locator::FieldLocator;
use crate::{ExtractError, occurrence};

/// Control id of the list container holding the day's incidents.
pub const SUMMARY_SECTION_ID: &str = "ctl00_ContentPlaceHolder1_SummarySection_HTML";

/// Boxed error type returned by sink implementations.
pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

/// Receives the export rows.
#[async_trait]
pub trait RowSink: Send {
    /// Called once per batch, before any row, with the column order.
    ///
    /// # Errors
    ///
    /// Returns the sink's own error if the header cannot be written.
    async fn write_header(&mut self, headers: &[&'static str]) -> Result<(), SinkError>;

    /// Writes one incident's cells, keyed by header name.
    ///
    /// # Errors
    ///
    /// Returns the sink's own error if the row cannot be written.
    async fn write_row(&mut self, row: &BTreeMap<&'static str, String>) -> Result<(), SinkError>;
}

/// Delivers notification text to a human-facing channel.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Posts `body` to `destination` (a channel id, account name, etc.).
    ///
    /// # Errors
    ///
    /// Returns the sink's own error if delivery fails.
    async fn post(&self, destination: &str, body: &str) -> Result<(), SinkError>;
}

/// What to do when one incident fails to extract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Fail the whole batch on the first bad incident.
    #[default]
    Abort,
    /// Log the bad incident and keep going.
    Skip,
}

/// Batch failure: either extraction or a downstream sink.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The page drifted from the expected structure.
    #[error(transparent)]
    Extract(#[from] ExtractError),
    /// The row-export sink failed; the batch stops where it was.
    #[error("row export failed: {0}")]
    Export(SinkError),
    /// A notification sink failed; the batch stops where it was.
    #[error("notification failed: {0}")]
    Notify(SinkError),
}

/// The sinks one batch writes into.
pub struct Sinks<'a> {
    /// Tabular export target.
    pub rows: &'a mut dyn RowSink,
    /// Narrative notification target.
    pub notifications: &'a dyn NotificationSink,
    /// Short-form broadcast; `None` leaves that path inactive.
    pub broadcast: Option<&'a dyn NotificationSink>,
}

/// Per-batch dispatch options.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Destination id handed to the notification sink.
    pub channel: String,
    /// Destination id for the broadcast sink, when one is wired.
    pub broadcast_destination: Option<String>,
    /// Failure handling for individual incidents.
    pub on_error: ErrorPolicy,
}

/// One incident fully processed into its output forms.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedIncident {
    /// The normalized record.
    pub record: IncidentRecord,
    /// Its rendered notification messages.
    pub notification: Notification,
}

/// Extracts every incident on the page and drives the per-incident side
/// effects: the header once, then per record a row write, the narrative
/// post, and (when wired) the short-summary broadcast, strictly in document
/// order.
///
/// # Errors
///
/// Returns [`PipelineError::Extract`] per the configured [`ErrorPolicy`]
/// when the page drifts from the expected structure, and
/// [`PipelineError::Export`] or [`PipelineError::Notify`] when a sink fails;
/// sink failures always abort the batch.
pub async fn run(
    page_html: &str,
    sinks: &mut Sinks<'_>,
    options: &BatchOptions,
) -> Result<Vec<ProcessedIncident>, PipelineError> {
    let records = extract_batch(page_html, options.on_error)?;

    sinks
        .rows
        .write_header(&REPORT_HEADERS)
        .await
        .map_err(PipelineError::Export)?;

    let mut processed = Vec::with_capacity(records.len());
    for record in records {
        let rendered = notification::render(&record);
        sinks
            .rows
            .write_row(&record.to_row())
            .await
            .map_err(PipelineError::Export)?;
        sinks
            .notifications
            .post(&options.channel, &rendered.narrative)
            .await
            .map_err(PipelineError::Notify)?;
        if let (Some(broadcast), Some(destination)) =
            (sinks.broadcast, options.broadcast_destination.as_deref())
        {
            broadcast
                .post(destination, &rendered.summary)
                .await
                .map_err(PipelineError::Notify)?;
        }
        log::debug!("dispatched case {}", record.case_number);
        processed.push(ProcessedIncident {
            record,
            notification: rendered,
        });
    }

    log::info!("batch complete: {} incidents dispatched", processed.len());
    Ok(processed)
}

/// Extracts the day's incidents without touching any sink.
///
/// The `Html` tree lives only inside this call, keeping [`run`]'s future
/// `Send`.
///
/// # Errors
///
/// Returns [`ExtractError::MissingSection`] when the incident list container
/// is absent, and surfaces per-incident failures according to `on_error`.
pub fn extract_batch(
    page_html: &str,
    on_error: ErrorPolicy,
) -> Result<Vec<IncidentRecord>, ExtractError> {
    let document = Html::parse_document(page_html);
    let nodes = incident_nodes(&document)?;
    if nodes.is_empty() {
        log::info!("no incidents listed on the page");
    }

    let mut records = Vec::with_capacity(nodes.len());
    for (position, node) in nodes.into_iter().enumerate() {
        match extract_incident(node, position) {
            Ok(record) => records.push(record),
            Err(e) => match on_error {
                ErrorPolicy::Abort => return Err(e),
                ErrorPolicy::Skip => log::warn!("skipping incident {position}: {e}"),
            },
        }
    }
    Ok(records)
}

/// Reduces one incident node to a record.
///
/// # Errors
///
/// Returns [`ExtractError`] when a sub-node is missing or a value fails to
/// parse; a failed incident never yields a partial record.
pub fn extract_incident(
    node: ElementRef<'_>,
    position: usize,
) -> Result<IncidentRecord, ExtractError> {
    let fields = FieldLocator::new(node, position);
    Ok(IncidentRecord {
        case_number: fields.case_number()?,
        code: fields.code()?,
        report_time: fields.report_time()?,
        status: fields.status()?,
        occurred: occurrence::resolve(fields.occurred_element()?, position)?,
        building: fields.building()?,
        location: fields.location()?,
        stolen: fields.stolen()?,
        damaged: fields.damaged()?,
        description: fields.description()?,
    })
}

fn incident_nodes(document: &Html) -> Result<Vec<ElementRef<'_>>, ExtractError> {
    let section_selector = Selector::parse(&format!("[id='{SUMMARY_SECTION_ID}']"))
        .unwrap_or_else(|_| unreachable!());
    let item_selector = Selector::parse("li").unwrap_or_else(|_| unreachable!());
    let section = document
        .select(&section_selector)
        .next()
        .ok_or(ExtractError::MissingSection {
            id: SUMMARY_SECTION_ID,
        })?;
    Ok(section.select(&item_selector).collect())
}
