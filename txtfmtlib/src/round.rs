//! Fixed-decimal rounding of cells and vectors.
//!
//! [`round_cell`] is the primitive every other rounding entry point
//! delegates to:
//!
//! - missing values become the NA placeholder
//! - numbers are formatted with exactly `digits` fractional places
//! - numeric-looking text is extracted (see [`crate::numeric`]) and formatted
//! - any other text is returned unchanged
//!
//! A value that rounds to zero is always printed as unsigned zero, so
//! `-0.0001` at two digits gives `0.00`, never `-0.00`.

use crate::cell::Cell;
use crate::numeric::extract_number;
use crate::options::RoundOptions;
use crate::Result;

/// Round a single cell to `digits` fractional places.
///
/// `options.digits` is ignored here; the caller has already resolved which
/// digit count applies to this cell.
pub fn round_cell(cell: &Cell, digits: usize, options: &RoundOptions) -> String {
    match cell {
        Cell::Missing => options.na_placeholder.clone(),
        Cell::Numeric(v) if v.is_nan() => options.na_placeholder.clone(),
        Cell::Numeric(v) => format_number(*v, digits, options),
        Cell::Text(text) => match extract_number(text, options.decimal_marker) {
            Some(v) => format_number(v, digits, options),
            None => {
                tracing::trace!(text = %text, "passing non-numeric text through");
                text.clone()
            }
        },
    }
}

/// Round a scalar cell using `options.digits`, which must hold one entry.
pub fn txt_round(cell: impl Into<Cell>, options: &RoundOptions) -> Result<String> {
    options.validate()?;
    let digits = options.digits.resolve(1, "digits")?;
    Ok(round_cell(&cell.into(), digits[0], options))
}

/// Round a vector of cells; `options.digits` is broadcast or matched
/// element-for-element.
pub fn txt_round_vec(cells: &[Cell], options: &RoundOptions) -> Result<Vec<String>> {
    options.validate()?;
    let digits = options.digits.resolve(cells.len(), "digits")?;
    Ok(cells
        .iter()
        .zip(digits)
        .map(|(cell, d)| round_cell(cell, d, options))
        .collect())
}

/// Format a number with `digits` fractional places, honouring
/// `digits_nonzero` and the output marker.
pub fn format_number(value: f64, digits: usize, options: &RoundOptions) -> String {
    let mut out = format_fixed(value, digits);

    if let Some(max) = options.digits_nonzero {
        let mut extra = digits;
        while value != 0.0 && is_zero(&out) && extra < max {
            extra += 1;
            out = format_fixed(value, extra);
        }
    }

    if options.output_marker != '.' {
        out = out.replace('.', options.output_marker.encode_utf8(&mut [0; 4]));
    }
    out
}

fn format_fixed(value: f64, digits: usize) -> String {
    if value.is_infinite() {
        return if value > 0.0 { "Inf" } else { "-Inf" }.to_string();
    }
    let out = format!("{:.*}", digits, value);
    if is_zero(&out) {
        format!("{:.*}", digits, 0.0)
    } else {
        out
    }
}

/// True when a formatted number has no non-zero digit.
fn is_zero(formatted: &str) -> bool {
    !formatted.bytes().any(|b| matches!(b, b'1'..=b'9'))
}
