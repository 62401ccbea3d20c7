//! Generic filter + sort table.
//!
//! A table is described by [`Column`]s and driven by a [`TableState`]. Rows are
//! anything implementing [`TableRow`]. Filtering and sorting work on the raw
//! cell text; formatters only apply when rendering.

mod column;
mod row;

#[cfg(test)]
mod table_props;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

use rust_decimal::Decimal;

pub use column::{CellFormatter, Column};
pub use row::{TableRow, ledger_columns, liability_columns, user_columns};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// The other direction.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// The active sort column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    /// Column key.
    pub key: String,
    /// Direction.
    pub direction: SortDirection,
}

/// Filters and sort of one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableState {
    filters: BTreeMap<String, String>,
    sort: Option<SortState>,
}

impl TableState {
    /// Creates a state with no filters and no sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter text for a column. Empty text removes the filter.
    pub fn set_filter(&mut self, key: impl Into<String>, text: impl Into<String>) {
        let key = key.into();
        let text = text.into();
        if text.is_empty() {
            self.filters.remove(&key);
        } else {
            self.filters.insert(key, text);
        }
    }

    /// Builder form of [`TableState::set_filter`].
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.set_filter(key, text);
        self
    }

    /// Removes every filter.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Filter text for a column, if any.
    #[must_use]
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.filters.get(key).map(String::as_str)
    }

    /// Active sort, if any.
    #[must_use]
    pub fn sort(&self) -> Option<&SortState> {
        self.sort.as_ref()
    }

    /// Handles a click on a column header.
    ///
    /// The active column toggles its direction; any other column becomes active
    /// in ascending order.
    pub fn click_header(&mut self, key: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.key == key => SortState {
                direction: current.direction.toggled(),
                ..current
            },
            _ => SortState {
                key: key.to_string(),
                direction: SortDirection::Ascending,
            },
        });
    }

    /// Returns true if `row` passes every filter.
    pub fn matches<R: TableRow + ?Sized>(&self, row: &R) -> bool {
        self.filters.iter().all(|(key, text)| {
            let needle = text.to_lowercase();
            row.cell(key)
                .unwrap_or_default()
                .to_lowercase()
                .contains(&needle)
        })
    }

    /// Filtered and sorted view over `rows`.
    ///
    /// Rows that compare equal keep their relative order.
    pub fn apply<'a, R: TableRow>(&self, rows: &'a [R]) -> Vec<&'a R> {
        let mut view: Vec<&R> = rows.iter().filter(|row| self.matches(*row)).collect();
        if let Some(sort) = &self.sort {
            view.sort_by(|a, b| {
                let ordering = compare_cells(
                    a.cell(&sort.key).as_deref().unwrap_or_default(),
                    b.cell(&sort.key).as_deref().unwrap_or_default(),
                );
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        view
    }
}

/// Compares two cell values: numerically when both parse as numbers,
/// lexicographically when neither does. Numbers rank before text.
#[must_use]
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn parse_number(raw: &str) -> Option<Decimal> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .ok()
}

/// Renders `rows` as text, one `Vec<String>` per row, formatters applied.
pub fn render<R: TableRow>(columns: &[Column], rows: &[&R]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| columns.iter().map(|column| column.render(*row)).collect())
        .collect()
}
