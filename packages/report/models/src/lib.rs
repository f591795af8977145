#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Record types for parsed police incident reports.
//!
//! Every report extracted from the daily blotter page becomes an
//! [`IncidentRecord`]. A record renders into two downstream forms: an ordered
//! row keyed by [`REPORT_HEADERS`] for tabular export, and a narrative
//! notification message (built by the `blotter_render` crate).

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column headers for tabular export, in the order rows are written.
///
/// This list is a compatibility contract: consumers of the exported file key
/// on these exact names in this exact order.
pub const REPORT_HEADERS: [&str; 11] = [
    "Case Number",
    "Code",
    "Report Time",
    "Status",
    "Occurred1",
    "Occurred2",
    "Building",
    "Location",
    "Stolen",
    "Damaged",
    "Description",
];

/// When an incident took place: a single instant, or a window the source
/// expressed as two timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Occurrence {
    /// The report gives one occurrence instant.
    At(NaiveDateTime),
    /// The report gives a window the incident occurred within.
    Between {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl Occurrence {
    /// The start (or only) occurrence instant.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        match self {
            Self::At(at) => *at,
            Self::Between { start, .. } => *start,
        }
    }

    /// The end of the occurrence window, when the report gave one.
    #[must_use]
    pub const fn end(&self) -> Option<NaiveDateTime> {
        match self {
            Self::At(_) => None,
            Self::Between { end, .. } => Some(*end),
        }
    }
}

/// One parsed police incident report.
///
/// Constructed once per incident node by the extraction pipeline, rendered
/// into its output forms, and dropped; records are never mutated and carry no
/// identity beyond the current batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncidentRecord {
    /// Case number as printed on the report (unique within a day's batch).
    pub case_number: String,
    /// Short offense classification (e.g., "LARCENY FROM MOTOR VEHICLE").
    pub code: String,
    /// When the report was filed.
    pub report_time: NaiveDateTime,
    /// Free-text case status (e.g., "Inactive").
    pub status: String,
    /// When the incident occurred.
    pub occurred: Occurrence,
    /// Campus building descriptor.
    pub building: String,
    /// Street address or location description.
    pub location: String,
    /// Reported value of stolen property, in dollars.
    pub stolen: f64,
    /// Reported property damage, in dollars.
    pub damaged: f64,
    /// Free-text narrative description.
    pub description: String,
}

impl IncidentRecord {
    /// Column headers for [`Self::to_row`], in write order.
    #[must_use]
    pub const fn headers() -> &'static [&'static str; 11] {
        &REPORT_HEADERS
    }

    /// Projects the record onto the export columns.
    ///
    /// Keys match [`REPORT_HEADERS`] exactly. `Occurred2` is the empty string
    /// when the report gave a single occurrence instant. Timestamps use the
    /// plain `YYYY-MM-DD HH:MM:SS` rendering.
    #[must_use]
    pub fn to_row(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("Case Number", self.case_number.clone()),
            ("Code", self.code.clone()),
            ("Report Time", self.report_time.to_string()),
            ("Status", self.status.clone()),
            ("Occurred1", self.occurred.start().to_string()),
            (
                "Occurred2",
                self.occurred
                    .end()
                    .map_or_else(String::new, |end| end.to_string()),
            ),
            ("Building", self.building.clone()),
            ("Location", self.location.clone()),
            ("Stolen", self.stolen.to_string()),
            ("Damaged", self.damaged.to_string()),
            ("Description", self.description.clone()),
        ])
    }
}
