//! P-value formatting.
//!
//! Precision depends on where the p-value sits relative to two limits:
//!
//! - below `lim_sig`: shown as `< lim_sig` (e.g. `< 0.0001`)
//! - below `lim_2dec`: one significant digit (`0.0056` -> `0.006`)
//! - otherwise: two significant digits (`0.056` -> `0.056`, `0.5` -> `0.50`)

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::TxtFmtError;
use crate::numeric::extract_number;
use crate::options::RoundOptions;
use crate::round::format_number;
use crate::Result;

/// Options for [`txt_pval`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PvalOptions {
    /// Values below this are reported as `< lim_sig`
    pub lim_sig: f64,
    /// Values at or above this get two significant digits
    pub lim_2dec: f64,
    /// Escape `<` as `&lt;`
    pub html: bool,
}

impl Default for PvalOptions {
    fn default() -> Self {
        Self {
            lim_sig: 1e-4,
            lim_2dec: 1e-2,
            html: true,
        }
    }
}

impl PvalOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the significance floor.
    pub fn lim_sig(mut self, lim: f64) -> Self {
        self.lim_sig = lim;
        self
    }

    /// Set the two-digit limit.
    pub fn lim_2dec(mut self, lim: f64) -> Self {
        self.lim_2dec = lim;
        self
    }

    /// Toggle HTML escaping.
    pub fn html(mut self, html: bool) -> Self {
        self.html = html;
        self
    }

    fn validate(&self) -> Result<()> {
        let ordered = self.lim_sig > 0.0 && self.lim_sig <= self.lim_2dec && self.lim_2dec < 1.0;
        if !ordered {
            return Err(TxtFmtError::Configuration {
                argument: "lim_sig/lim_2dec",
                expected: "0 < lim_sig <= lim_2dec < 1".to_string(),
                actual: format!("lim_sig = {}, lim_2dec = {}", self.lim_sig, self.lim_2dec),
            });
        }
        Ok(())
    }
}

/// Format a single p-value.
///
/// Missing values give the empty string; text that isn't numeric passes
/// through unchanged.
pub fn txt_pval(cell: &Cell, options: &PvalOptions) -> Result<String> {
    options.validate()?;

    let p = match cell {
        Cell::Missing => return Ok(String::new()),
        Cell::Numeric(p) => *p,
        Cell::Text(text) => match extract_number(text, '.') {
            Some(p) => p,
            None => {
                tracing::warn!(text = %text, "p-value is not numeric; passing through");
                return Ok(text.clone());
            }
        },
    };

    if p.is_nan() {
        return Ok(String::new());
    }
    if !(0.0..=1.0).contains(&p) {
        return Err(TxtFmtError::InvalidPvalue(p));
    }

    if p < options.lim_sig {
        let lt = if options.html { "&lt;" } else { "<" };
        return Ok(format!("{} {}", lt, options.lim_sig));
    }

    let magnitude = p.log10().floor() as i64;
    let decimals = if p >= options.lim_2dec {
        1 - magnitude
    } else {
        -magnitude
    };
    Ok(format_number(
        p,
        decimals.max(0) as usize,
        &RoundOptions::default(),
    ))
}

/// Format a slice of p-values.
pub fn txt_pval_vec(cells: &[Cell], options: &PvalOptions) -> Result<Vec<String>> {
    cells.iter().map(|c| txt_pval(c, options)).collect()
}
