#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! `WebForms` postback fetcher for the daily police report page.
//!
//! The department publishes one page per day, addressed not by URL but by an
//! `ASP.NET` postback: the date selector fires `__doPostBack` with the number
//! of days since 2000-01-01. Fetching a day is therefore a GET (collecting
//! the hidden form state) followed by a POST replaying that state plus the
//! postback target and the day number.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use scraper::{Html, Selector};
use thiserror::Error;

/// Report page this tool was built against.
pub const DEFAULT_PAGE_URL: &str = "https://scsapps.unl.edu/policereports/MainPage.aspx";

/// Postback target of the page's date-selection control.
const DATE_SELECTION_TARGET: &str = "ctl00$ContentPlaceHolder1$DateSelection";

/// Errors from fetching a day's page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    /// The landing page did not carry the expected `WebForms` state.
    #[error("postback form state missing: {message}")]
    Form {
        /// What was missing.
        message: String,
    },
}

/// Supplies a day's report page HTML.
///
/// The orchestration layer injects an implementation; the extraction core
/// never owns a session.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetches the report page for `date`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the page cannot be retrieved.
    async fn fetch_day(&self, date: NaiveDate) -> Result<String, FetchError>;
}

/// [`ReportSource`] that replays the page's own date-selection postback.
pub struct PostbackSource {
    client: reqwest::Client,
    url: String,
}

impl PostbackSource {
    /// Creates a source for the report page at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built.
    pub fn new(url: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent("campus-blotter/0.1")
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait]
impl ReportSource for PostbackSource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<String, FetchError> {
        let landing = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        // Collect the form state in a block so the non-Send `Html` is
        // dropped before the next `.await`.
        let mut form = {
            let document = Html::parse_document(&landing);
            hidden_fields(&document)
        };
        if !form.contains_key("__VIEWSTATE") {
            return Err(FetchError::Form {
                message: "__VIEWSTATE not present on the landing page".to_string(),
            });
        }

        let days = day_number(date);
        form.insert("__EVENTTARGET".to_string(), DATE_SELECTION_TARGET.to_string());
        form.insert("__EVENTARGUMENT".to_string(), days.to_string());

        log::debug!("posting date selection for {date} (day {days})");
        let page = self
            .client
            .post(&self.url)
            .form(&form)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        log::info!("fetched report page for {date} ({} bytes)", page.len());
        Ok(page)
    }
}

/// Days from the page's epoch (2000-01-01) to `date`, the value the date
/// selector posts as its event argument.
#[must_use]
pub fn day_number(date: NaiveDate) -> i64 {
    let epoch = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_else(|| unreachable!());
    (date - epoch).num_days()
}

/// Collects the page's hidden form inputs, keyed by name.
fn hidden_fields(document: &Html) -> BTreeMap<String, String> {
    let selector =
        Selector::parse(r#"input[type="hidden"]"#).unwrap_or_else(|_| unreachable!());
    document
        .select(&selector)
        .filter_map(|input| {
            let name = input.value().attr("name")?;
            let value = input.value().attr("value").unwrap_or_default();
            Some((name.to_string(), value.to_string()))
        })
        .collect()
}
