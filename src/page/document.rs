//! In-memory model of the fraud assessment page

use std::collections::{BTreeMap, BTreeSet};

use thiserror::Error;

use super::ids;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("element `{0}` not found on the page")]
    MissingElement(String),
}

/// Which forms the page carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageLayout {
    SingleTransaction,
    TransactionRange,
    #[default]
    Combined,
}

impl PageLayout {
    pub fn has_single_check(self) -> bool {
        matches!(self, PageLayout::SingleTransaction | PageLayout::Combined)
    }

    pub fn has_range_analysis(self) -> bool {
        matches!(self, PageLayout::TransactionRange | PageLayout::Combined)
    }
}

/// Inline `display` style of an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Unset,
    Block,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub text: String,
    pub class: Option<String>,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            class: None,
        }
    }

    pub fn styled(text: impl Into<String>, class: &str) -> Self {
        Self {
            text: text.into(),
            class: Some(class.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableRow {
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub text: String,
    pub src: Option<String>,
    pub display: Display,
    pub disabled: bool,
    /// Header labels, tables only
    pub columns: Vec<String>,
    /// Body rows, tables only
    pub rows: Vec<TableRow>,
    classes: BTreeSet<String>,
}

impl Element {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = columns.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    /// Replace the whole class list, like assigning `className`
    pub fn set_classes<'a>(&mut self, classes: impl IntoIterator<Item = &'a str>) {
        self.classes = classes.into_iter().map(str::to_string).collect();
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    /// Hidden either by the `hidden` class or by `display: none`
    pub fn is_hidden(&self) -> bool {
        self.has_class(ids::HIDDEN_CLASS) || self.display == Display::None
    }
}

/// The page: elements addressed by id, plus the blocking alerts not yet shown
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    alerts: Vec<String>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the page markup for the given layout
    pub fn for_layout(layout: PageLayout) -> Self {
        let mut doc = Self::new();

        if layout.has_single_check() {
            doc.insert(ids::SINGLE_CHECK_FORM, Element::new());
            doc.insert(
                ids::RESULT_BOX,
                Element::new().with_class(ids::RESULT_BOX_CLASS),
            );
        }

        if layout.has_range_analysis() {
            let sample_columns = ["Merchant ID", "First Name", "Last Name", "Amount", "Status"];

            doc.insert(ids::RANGE_ANALYSIS_FORM, Element::new());
            doc.insert(
                ids::ANALYZE_BUTTON,
                Element::new().with_text(ids::ANALYZE_IDLE_LABEL),
            );
            for section in ids::RESULT_SECTIONS {
                doc.insert(
                    section,
                    Element::new().with_class(ids::HIDDEN_CLASS),
                );
            }
            doc.insert(ids::STATS_CONTENT, Element::new());
            doc.insert(
                ids::FIRST_TWO_TABLE,
                Element::new().with_columns(&sample_columns),
            );
            doc.insert(
                ids::LAST_TWO_TABLE,
                Element::new().with_columns(&sample_columns),
            );
            doc.insert(ids::LINE_CHART, Element::new());
            doc.insert(ids::PIE_CHART, Element::new());
        }

        doc
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.elements.contains_key(id)
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Result<&mut Element, RenderError> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| RenderError::MissingElement(id.to_string()))
    }

    /// Raise a blocking alert
    pub fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    /// Alerts raised and not yet shown, oldest first
    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }

    pub fn last_alert(&self) -> Option<&str> {
        self.alerts.last().map(String::as_str)
    }

    /// Hand over the pending alerts, leaving none behind
    pub fn take_alerts(&mut self) -> Vec<String> {
        std::mem::take(&mut self.alerts)
    }
}
