//! Integer formatting with thousands separators.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::numeric::extract_number;

/// Options for [`txt_int`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntOptions {
    /// Language code; `"en"` groups with `,`, anything else with a space
    pub language: String,
    /// Emit the space separator as `&nbsp;`
    pub html: bool,
}

impl Default for IntOptions {
    fn default() -> Self {
        Self {
            language: "en".to_string(),
            html: true,
        }
    }
}

impl IntOptions {
    /// Create new default options (English, HTML).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the language code.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Toggle HTML output.
    pub fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    fn separator(&self) -> &'static str {
        if self.language == "en" {
            ","
        } else if self.html {
            "&nbsp;"
        } else {
            " "
        }
    }
}

/// Format an integer with the language's thousands separator.
pub fn txt_int(value: i64, options: &IntOptions) -> String {
    let digits = value.unsigned_abs().to_string();
    let sep = options.separator();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * sep.len() + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(sep);
        }
        out.push(ch);
    }
    out
}

/// Format a cell as an integer.
///
/// Fractional values are rounded to the nearest integer. Non-numeric text
/// passes through and missing values become the empty string.
pub fn txt_int_cell(cell: &Cell, options: &IntOptions) -> String {
    let value = match cell {
        Cell::Missing => return String::new(),
        Cell::Numeric(v) => *v,
        Cell::Text(text) => match extract_number(text, '.') {
            Some(v) => v,
            None => return text.clone(),
        },
    };

    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    if value.fract() != 0.0 {
        tracing::warn!(value, "not an integer; rounding before formatting");
    }
    txt_int(value.round() as i64, options)
}

/// Format a slice of cells as integers.
pub fn txt_int_vec(cells: &[Cell], options: &IntOptions) -> Vec<String> {
    cells.iter().map(|c| txt_int_cell(c, options)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_grouping() {
        let opts = IntOptions::default();
        assert_eq!(txt_int(0, &opts), "0");
        assert_eq!(txt_int(999, &opts), "999");
        assert_eq!(txt_int(1000, &opts), "1,000");
        assert_eq!(txt_int(1234567, &opts), "1,234,567");
        assert_eq!(txt_int(-123456, &opts), "-123,456");
    }

    #[test]
    fn test_other_language_grouping() {
        let html = IntOptions::new().language("sv");
        assert_eq!(txt_int(12345, &html), "12&nbsp;345");

        let plain = IntOptions::new().language("sv").html(false);
        assert_eq!(txt_int(12345, &plain), "12 345");
    }

    #[test]
    fn test_extreme_values() {
        let opts = IntOptions::default();
        assert_eq!(txt_int(i64::MIN, &opts), "-9,223,372,036,854,775,808");
    }

    #[test]
    fn test_int_cells() {
        let opts = IntOptions::default();
        assert_eq!(txt_int_cell(&Cell::from(2500), &opts), "2,500");
        assert_eq!(txt_int_cell(&Cell::from(2499.6), &opts), "2,500");
        assert_eq!(txt_int_cell(&Cell::from("n = 10000"), &opts), "10,000");
        assert_eq!(txt_int_cell(&Cell::from("none"), &opts), "none");
        assert_eq!(txt_int_cell(&Cell::Missing, &opts), "");
    }

    #[test]
    fn test_int_vec() {
        let cells = vec![Cell::from(1), Cell::from(1000000)];
        assert_eq!(
            txt_int_vec(&cells, &IntOptions::default()),
            vec!["1", "1,000,000"]
        );
    }
}
