//! Per-attribute field location within one incident node.
//!
//! A [`FieldLocator`] binds an incident node to its position in the batch,
//! picks the parity-appropriate label table, and resolves each logical
//! attribute to its sub-node by composed control id. Lookups never read
//! outside the incident node they were built for.

use chrono::NaiveDateTime;
use scraper::{ElementRef, Selector};

use crate::labels::{self, LabelTable};
use crate::{ExtractError, parsing};

/// Resolves the labeled sub-fields of one incident node.
pub struct FieldLocator<'a> {
    node: ElementRef<'a>,
    position: usize,
    labels: &'static LabelTable,
}

impl<'a> FieldLocator<'a> {
    /// Binds a locator to an incident node and its 0-based batch position.
    #[must_use]
    pub fn new(node: ElementRef<'a>, position: usize) -> Self {
        Self {
            node,
            position,
            labels: LabelTable::for_position(position),
        }
    }

    /// Case number from the incident-number link.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the link is absent or
    /// empty; a vacant link means the node carries no usable identity.
    pub fn case_number(&self) -> Result<String, ExtractError> {
        let id = labels::case_link_id(self.position);
        let text = self.text_of(&id, "case_number")?;
        if text.is_empty() {
            return Err(ExtractError::MissingField {
                position: self.position,
                attribute: "case_number",
                node_id: id,
            });
        }
        Ok(text)
    }

    /// Offense classification text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is absent.
    pub fn code(&self) -> Result<String, ExtractError> {
        self.label_text("code", self.labels.code)
    }

    /// Report-filing timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is
    /// absent, [`ExtractError::MalformedValue`] when its text is not a
    /// `month/day/year hour:minute` timestamp.
    pub fn report_time(&self) -> Result<NaiveDateTime, ExtractError> {
        let text = self.label_text("report_time", self.labels.report_time)?;
        parsing::parse_report_time(&text).ok_or_else(|| ExtractError::MalformedValue {
            position: self.position,
            attribute: "report_time",
            text,
        })
    }

    /// Case status text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is absent.
    pub fn status(&self) -> Result<String, ExtractError> {
        self.label_text("status", self.labels.status)
    }

    /// The occurred field's element, handed to the occurrence resolver.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is absent.
    pub fn occurred_element(&self) -> Result<ElementRef<'a>, ExtractError> {
        self.find(&labels::label_id(self.position, self.labels.occurred), "occurred")
    }

    /// Building descriptor text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is absent.
    pub fn building(&self) -> Result<String, ExtractError> {
        self.label_text("building", self.labels.building)
    }

    /// Address/location text.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is absent.
    pub fn location(&self) -> Result<String, ExtractError> {
        self.label_text("location", self.labels.location)
    }

    /// Stolen-property dollar amount.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is
    /// absent, [`ExtractError::MalformedValue`] when its text is not a
    /// non-negative currency amount.
    pub fn stolen(&self) -> Result<f64, ExtractError> {
        self.currency("stolen", self.labels.stolen)
    }

    /// Property-damage dollar amount.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is
    /// absent, [`ExtractError::MalformedValue`] when its text is not a
    /// non-negative currency amount.
    pub fn damaged(&self) -> Result<f64, ExtractError> {
        self.currency("damaged", self.labels.damaged)
    }

    /// Free-text narrative description.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::MissingField`] when the labeled node is absent.
    pub fn description(&self) -> Result<String, ExtractError> {
        self.label_text("description", self.labels.description)
    }

    fn currency(&self, attribute: &'static str, label: u8) -> Result<f64, ExtractError> {
        let text = self.label_text(attribute, label)?;
        parsing::parse_currency(&text).ok_or_else(|| ExtractError::MalformedValue {
            position: self.position,
            attribute,
            text,
        })
    }

    fn label_text(&self, attribute: &'static str, label: u8) -> Result<String, ExtractError> {
        self.text_of(&labels::label_id(self.position, label), attribute)
    }

    fn text_of(&self, id: &str, attribute: &'static str) -> Result<String, ExtractError> {
        let element = self.find(id, attribute)?;
        Ok(element.text().collect::<String>().trim().to_string())
    }

    fn find(&self, id: &str, attribute: &'static str) -> Result<ElementRef<'a>, ExtractError> {
        // Composed ids only contain `[A-Za-z0-9_]`, so the selector is
        // always valid.
        let selector =
            Selector::parse(&format!("[id='{id}']")).unwrap_or_else(|_| unreachable!());
        self.node
            .select(&selector)
            .next()
            .ok_or_else(|| ExtractError::MissingField {
                position: self.position,
                attribute,
                node_id: id.to_string(),
            })
    }
}
