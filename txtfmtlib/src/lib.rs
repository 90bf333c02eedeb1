//! # txtfmtlib
//!
//! Presentation-layer formatters that turn numbers and number-like strings
//! into display text for statistical report tables (HTML or LaTeX).
//!
//! ## Overview
//!
//! The core is the rounding engine:
//!
//! - **Cells**: every value is a [`Cell`]: numeric, text, or missing
//! - **Rounding**: fixed-decimal output with per-value or per-column digits
//! - **Extraction**: numbers embedded in text (`"p = 0.031"`, `"1 234,5"`)
//!   are found with a decimal-marker-aware pattern
//! - **Tables**: rows and columns can be excluded by position or by a name
//!   pattern; excluded cells are copied through untouched
//! - **Passthrough**: text that isn't numeric-looking is returned unchanged
//!
//! Alongside it live small companion formatters for integers with thousands
//! separators ([`txt_int`]), p-values ([`txt_pval`]) and multi-line cells
//! ([`txt_merge_lines`]).
//!
//! ## Example
//!
//! ```rust
//! use txtfmtlib::{txt_round, txt_round_table, Cell, Exclusion, RoundOptions, Table};
//!
//! let opts = RoundOptions::new().digits(2);
//! assert_eq!(txt_round(4.56789, &opts).unwrap(), "4.57");
//! assert_eq!(txt_round("not-a-number", &opts).unwrap(), "not-a-number");
//!
//! let table = Table::new(vec![
//!     vec![Cell::from(1.234), Cell::from("n/a")],
//!     vec![Cell::from(2.5), Cell::Missing],
//! ])
//! .unwrap()
//! .with_col_names(["est", "note"])
//! .unwrap();
//!
//! let opts = RoundOptions::new()
//!     .digits(1)
//!     .na_placeholder("-")
//!     .exclude_cols(Exclusion::pattern("^note$").unwrap());
//! let out = txt_round_table(&table, &opts).unwrap();
//! assert_eq!(out.get(0, 0), Some(&Cell::text("1.2")));
//! assert_eq!(out.get(1, 1), Some(&Cell::Missing));
//! ```

pub mod cell;
pub mod error;
pub mod exclusion;
pub mod int;
pub mod merge;
pub mod numeric;
pub mod options;
pub mod pval;
pub mod round;
pub mod table;

pub use cell::Cell;
pub use error::TxtFmtError;
pub use exclusion::Exclusion;
pub use int::{txt_int, txt_int_cell, txt_int_vec, IntOptions};
pub use merge::txt_merge_lines;
pub use options::{DigitSpec, RoundOptions};
pub use pval::{txt_pval, txt_pval_vec, PvalOptions};
pub use round::{round_cell, txt_round, txt_round_vec};
pub use table::{txt_round_table, Table};

/// Result type for txtfmtlib operations
pub type Result<T> = std::result::Result<T, TxtFmtError>;
