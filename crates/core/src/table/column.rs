//! Column descriptors.

use super::TableRow;

/// Turns a raw cell value into display text.
pub type CellFormatter = fn(&str) -> String;

/// One column of a table.
#[derive(Debug, Clone)]
pub struct Column {
    /// Row key the column reads.
    pub key: String,
    /// Header text.
    pub heading: String,
    /// Display formatter; raw text is shown when absent.
    pub formatter: Option<CellFormatter>,
}

impl Column {
    /// Creates a column without a formatter.
    #[must_use]
    pub fn new(key: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            heading: heading.into(),
            formatter: None,
        }
    }

    /// Sets the display formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: CellFormatter) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Display text of this column for `row`. Missing cells render empty.
    pub fn render<R: TableRow + ?Sized>(&self, row: &R) -> String {
        let raw = row.cell(&self.key).unwrap_or_default();
        match self.formatter {
            Some(format) => format(&raw),
            None => raw,
        }
    }
}
