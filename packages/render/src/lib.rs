#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Output rendering for parsed incident reports.
//!
//! Two text forms leave this crate: AP-style narrative timestamps
//! ([`ap_style`]) and the per-incident notification messages ([`notification`])
//! posted to chat and broadcast channels.

pub mod ap_style;
pub mod notification;
