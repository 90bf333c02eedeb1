//! Input options for the rounding formatters.
//!
//! This module contains the configuration types that control how values
//! are rounded and which parts of a table are touched.

use serde::{Deserialize, Serialize};

use crate::error::TxtFmtError;
use crate::exclusion::Exclusion;
use crate::Result;

/// Number of fractional digits, either for everything or per target.
///
/// Deserializes from a JSON integer (`2`) or an integer array (`[1, 2]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DigitSpec {
    /// Same digit count for every value or column
    Uniform(usize),
    /// One digit count per value (vectors) or per working column (tables)
    PerItem(Vec<usize>),
}

impl Default for DigitSpec {
    fn default() -> Self {
        DigitSpec::Uniform(0)
    }
}

impl From<usize> for DigitSpec {
    fn from(digits: usize) -> Self {
        DigitSpec::Uniform(digits)
    }
}

impl From<Vec<usize>> for DigitSpec {
    fn from(digits: Vec<usize>) -> Self {
        DigitSpec::PerItem(digits)
    }
}

impl From<&[usize]> for DigitSpec {
    fn from(digits: &[usize]) -> Self {
        DigitSpec::PerItem(digits.to_vec())
    }
}

impl DigitSpec {
    /// Number of entries in the spec
    pub fn len(&self) -> usize {
        match self {
            DigitSpec::Uniform(_) => 1,
            DigitSpec::PerItem(digits) => digits.len(),
        }
    }

    /// True for an empty per-item spec
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Expand to exactly `targets` digit counts, broadcasting a single entry.
    ///
    /// `argument` names the offending argument in the error message.
    pub fn resolve(&self, targets: usize, argument: &'static str) -> Result<Vec<usize>> {
        match self {
            DigitSpec::Uniform(d) => Ok(vec![*d; targets]),
            DigitSpec::PerItem(digits) if digits.len() == 1 => Ok(vec![digits[0]; targets]),
            DigitSpec::PerItem(digits) if digits.len() == targets => Ok(digits.clone()),
            DigitSpec::PerItem(digits) => Err(TxtFmtError::digits_length(
                argument,
                targets,
                digits.len(),
            )),
        }
    }
}

/// Options for rounding cells, vectors and tables.
#[derive(Debug, Clone)]
pub struct RoundOptions {
    /// Fractional digits to emit
    pub digits: DigitSpec,
    /// Upper bound for extra digits when a non-zero value would round to zero
    pub digits_nonzero: Option<usize>,
    /// Rows left untouched (tables only)
    pub exclude_rows: Option<Exclusion>,
    /// Columns left untouched (tables only)
    pub exclude_cols: Option<Exclusion>,
    /// Text emitted for missing values
    pub na_placeholder: String,
    /// Decimal marker expected in text input
    pub decimal_marker: char,
    /// Decimal marker used in the output
    pub output_marker: char,
}

impl Default for RoundOptions {
    fn default() -> Self {
        Self {
            digits: DigitSpec::default(),
            digits_nonzero: None,
            exclude_rows: None,
            exclude_cols: None,
            na_placeholder: String::new(),
            decimal_marker: '.',
            output_marker: '.',
        }
    }
}

impl RoundOptions {
    /// Create new default options (0 digits, `.` markers, empty NA text).
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the same digit count everywhere.
    pub fn digits(mut self, digits: usize) -> Self {
        self.digits = DigitSpec::Uniform(digits);
        self
    }

    /// One digit count per element (vectors) or per working column (tables).
    pub fn digits_per_item(mut self, digits: Vec<usize>) -> Self {
        self.digits = DigitSpec::PerItem(digits);
        self
    }

    /// Set the digit specification directly.
    pub fn digit_spec(mut self, spec: DigitSpec) -> Self {
        self.digits = spec;
        self
    }

    /// Allow up to `max` digits so small non-zero values don't print as zero.
    pub fn digits_nonzero(mut self, max: usize) -> Self {
        self.digits_nonzero = Some(max);
        self
    }

    /// Leave the selected rows untouched.
    pub fn exclude_rows(mut self, exclusion: Exclusion) -> Self {
        self.exclude_rows = Some(exclusion);
        self
    }

    /// Leave the selected columns untouched.
    pub fn exclude_cols(mut self, exclusion: Exclusion) -> Self {
        self.exclude_cols = Some(exclusion);
        self
    }

    /// Set the placeholder for missing values.
    pub fn na_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.na_placeholder = placeholder.into();
        self
    }

    /// Set the decimal marker used by text input.
    pub fn decimal_marker(mut self, marker: char) -> Self {
        self.decimal_marker = marker;
        self
    }

    /// Set the decimal marker used in formatted output.
    pub fn output_marker(mut self, marker: char) -> Self {
        self.output_marker = marker;
        self
    }

    /// Check both markers before any formatting happens.
    pub(crate) fn validate(&self) -> Result<()> {
        crate::numeric::validate_marker(self.decimal_marker)?;
        crate::numeric::validate_marker(self.output_marker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_options_default() {
        let opts = RoundOptions::default();
        assert_eq!(opts.digits, DigitSpec::Uniform(0));
        assert_eq!(opts.na_placeholder, "");
        assert_eq!(opts.decimal_marker, '.');
        assert_eq!(opts.output_marker, '.');
        assert!(opts.digits_nonzero.is_none());
        assert!(opts.exclude_rows.is_none());
        assert!(opts.exclude_cols.is_none());
    }

    #[test]
    fn test_round_options_builder() {
        let opts = RoundOptions::new()
            .digits_per_item(vec![1, 2])
            .na_placeholder("-")
            .decimal_marker(',')
            .output_marker(',')
            .digits_nonzero(4);
        assert_eq!(opts.digits, DigitSpec::PerItem(vec![1, 2]));
        assert_eq!(opts.na_placeholder, "-");
        assert_eq!(opts.decimal_marker, ',');
        assert_eq!(opts.digits_nonzero, Some(4));
    }

    #[test]
    fn test_digit_spec_broadcast() {
        assert_eq!(DigitSpec::Uniform(2).resolve(3, "digits").unwrap(), vec![2, 2, 2]);
        assert_eq!(
            DigitSpec::PerItem(vec![1]).resolve(2, "digits").unwrap(),
            vec![1, 1]
        );
        assert_eq!(
            DigitSpec::PerItem(vec![1, 3]).resolve(2, "digits").unwrap(),
            vec![1, 3]
        );
    }

    #[test]
    fn test_digit_spec_mismatch() {
        let err = DigitSpec::PerItem(vec![1, 2]).resolve(4, "digits").unwrap_err();
        assert_eq!(
            err,
            TxtFmtError::Configuration {
                argument: "digits",
                expected: "1 or 4 values".to_string(),
                actual: "2 values".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid 'digits': expected 1 or 4 values, got 2 values"
        );
    }

    #[test]
    fn test_digit_spec_json() {
        let uniform: DigitSpec = serde_json::from_str("2").unwrap();
        assert_eq!(uniform, DigitSpec::Uniform(2));
        let per_item: DigitSpec = serde_json::from_str("[0, 1, 2]").unwrap();
        assert_eq!(per_item, DigitSpec::PerItem(vec![0, 1, 2]));
    }

    #[test]
    fn test_invalid_markers() {
        assert!(RoundOptions::new().decimal_marker(',').validate().is_ok());
        assert_eq!(
            RoundOptions::new().decimal_marker('1').validate(),
            Err(TxtFmtError::InvalidDecimalMarker('1'))
        );
        assert!(RoundOptions::new().output_marker(' ').validate().is_err());
    }
}
