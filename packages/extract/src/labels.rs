//! Positional-parity field addressing for the report page.
//!
//! Each incident's sub-fields carry `WebForms` auto-ids of the form
//! `ctl00_ContentPlaceHolder1_Results_ctl<NN>_Label<M>`, where `<NN>` is the
//! incident's position in the result list, zero-padded to two digits. `<M>`
//! is not stable per attribute: the page alternates between two fixed suffix
//! layouts depending on whether the position is even or odd. Both
//! permutations live here as named tables so the extraction logic itself
//! stays parity-agnostic.

/// Shared prefix of every per-incident control id.
pub const CONTROL_PREFIX: &str = "ctl00_ContentPlaceHolder1_Results_ctl";

/// Label suffixes for the nine labeled attributes of one incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelTable {
    pub code: u8,
    pub report_time: u8,
    pub status: u8,
    pub occurred: u8,
    pub building: u8,
    pub location: u8,
    pub stolen: u8,
    pub damaged: u8,
    pub description: u8,
}

/// Suffix layout for incidents at even positions.
pub const EVEN_LABELS: LabelTable = LabelTable {
    code: 5,
    report_time: 2,
    status: 3,
    occurred: 4,
    building: 8,
    location: 11,
    stolen: 12,
    damaged: 13,
    description: 14,
};

/// Suffix layout for incidents at odd positions.
pub const ODD_LABELS: LabelTable = LabelTable {
    code: 1,
    report_time: 6,
    status: 7,
    occurred: 9,
    building: 10,
    location: 15,
    stolen: 16,
    damaged: 17,
    description: 18,
};

impl LabelTable {
    /// Selects the suffix layout for an incident by position parity.
    #[must_use]
    pub const fn for_position(position: usize) -> &'static Self {
        if position % 2 == 0 {
            &EVEN_LABELS
        } else {
            &ODD_LABELS
        }
    }
}

/// Composes the control id of a labeled sub-field.
#[must_use]
pub fn label_id(position: usize, label: u8) -> String {
    format!("{CONTROL_PREFIX}{position:02}_Label{label}")
}

/// Composes the control id of an incident's case-number link.
#[must_use]
pub fn case_link_id(position: usize) -> String {
    format!("{CONTROL_PREFIX}{position:02}_IncidentNumberLink")
}
