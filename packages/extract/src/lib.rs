#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Extraction core for the daily police report page.
//!
//! The page renders each incident as a list item whose sub-fields carry
//! position-dependent `WebForms` control ids (see [`labels`]).
//! [`locator::FieldLocator`] resolves and cleans each logical attribute,
//! [`occurrence`] reconciles the one-or-two-date occurred field, and
//! [`pipeline`] drives a whole batch plus its export and notification side
//! effects.

pub mod labels;
pub mod locator;
pub mod occurrence;
pub mod parsing;
pub mod pipeline;

use thiserror::Error;

/// Extraction failure for one incident, or for the document as a whole.
///
/// Every per-incident variant carries the incident's position index and the
/// logical attribute involved, enough context for the caller to log the
/// failure precisely. None of these are transient: the cause is structural
/// drift in the source page, so no retry logic exists anywhere.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The incident list container is absent from the page.
    #[error("summary section '{id}' not found in page")]
    MissingSection {
        /// Control id of the missing container.
        id: &'static str,
    },
    /// An expected sub-node is absent from an incident node.
    #[error("incident {position}: no node '{node_id}' for {attribute}")]
    MissingField {
        /// 0-based position of the incident in the batch.
        position: usize,
        /// Logical attribute being resolved.
        attribute: &'static str,
        /// Control id that matched nothing.
        node_id: String,
    },
    /// A value was present but failed to parse.
    #[error("incident {position}: malformed {attribute} value {text:?}")]
    MalformedValue {
        /// 0-based position of the incident in the batch.
        position: usize,
        /// Logical attribute being resolved.
        attribute: &'static str,
        /// The offending raw text.
        text: String,
    },
    /// The occurred field held neither one nor two date spans.
    #[error("incident {position}: occurred field has {count} date spans, expected 1 or 2")]
    UnsupportedShape {
        /// 0-based position of the incident in the batch.
        position: usize,
        /// Number of date spans actually found.
        count: usize,
    },
}
