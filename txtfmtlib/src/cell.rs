//! The cell model shared by every formatter.
//!
//! A [`Cell`] is decided once at ingestion: a number, a piece of text, or a
//! missing value. Formatters match on the tag instead of probing the value.

use serde::{Deserialize, Serialize};

/// A single value in a report vector or table.
///
/// Serialized untagged, so JSON numbers, strings and `null` map directly
/// onto the three variants.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// A numeric value
    Numeric(f64),
    /// Text, possibly holding a decorated number (`"p = 0.03"`)
    Text(String),
    /// A missing value (NA)
    #[default]
    Missing,
}

impl Cell {
    /// Create a numeric cell. `NaN` becomes [`Cell::Missing`].
    pub fn numeric(value: f64) -> Self {
        if value.is_nan() {
            Cell::Missing
        } else {
            Cell::Numeric(value)
        }
    }

    /// Create a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Check if this is a missing value
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Check if this is a numeric value
    pub fn is_numeric(&self) -> bool {
        matches!(self, Cell::Numeric(_))
    }

    /// Borrow the text, if this is a text cell
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::numeric(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Numeric(value as f64)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Numeric(f64::from(value))
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map_or(Cell::Missing, Into::into)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Numeric(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
            Cell::Missing => f.write_str("NA"),
        }
    }
}
