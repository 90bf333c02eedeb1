//! Two-dimensional rounding.
//!
//! A [`Table`] is a rectangular grid of [`Cell`]s with optional row and
//! column names. [`txt_round_table`] resolves the row/column exclusions into
//! working sets, then delegates every working row to the cell primitive with
//! one digit count per working column. Everything outside the working sets is
//! copied through untouched, so shape, positions and names are preserved.

use serde::{Deserialize, Serialize};

use crate::cell::Cell;
use crate::error::TxtFmtError;
use crate::exclusion::working_set;
use crate::options::RoundOptions;
use crate::round::round_cell;
use crate::Result;

/// Unchecked table shape, as it arrives from serialized input.
#[derive(Debug, Clone, Deserialize)]
struct RawTable {
    #[serde(default)]
    row_names: Option<Vec<String>>,
    #[serde(default)]
    col_names: Option<Vec<String>>,
    rows: Vec<Vec<Cell>>,
}

impl TryFrom<RawTable> for Table {
    type Error = TxtFmtError;

    fn try_from(raw: RawTable) -> Result<Self> {
        let mut table = Table::new(raw.rows)?;
        if let Some(names) = raw.row_names {
            table = table.with_row_names(names)?;
        }
        if let Some(names) = raw.col_names {
            table = table.with_col_names(names)?;
        }
        Ok(table)
    }
}

/// A rectangular table of cells with optional row and column names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTable")]
pub struct Table {
    #[serde(skip_serializing_if = "Option::is_none")]
    row_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    col_names: Option<Vec<String>>,
    rows: Vec<Vec<Cell>>,
    #[serde(skip)]
    n_cols: usize,
}

impl Table {
    /// Build a table from rows, checking that every row has the same length.
    pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some((row, cells)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_cols) {
            return Err(TxtFmtError::RaggedTable {
                row,
                expected: n_cols,
                actual: cells.len(),
            });
        }
        Ok(Table {
            row_names: None,
            col_names: None,
            rows,
            n_cols,
        })
    }

    /// Attach row names; there must be one per row.
    pub fn with_row_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if names.len() != self.rows.len() {
            return Err(TxtFmtError::NamesLength {
                axis: "row",
                expected: self.rows.len(),
                actual: names.len(),
            });
        }
        self.row_names = Some(names);
        Ok(self)
    }

    /// Attach column names; there must be one per column.
    ///
    /// On a table without rows the names define the column count.
    pub fn with_col_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        if self.rows.is_empty() {
            self.n_cols = names.len();
        } else if names.len() != self.n_cols {
            return Err(TxtFmtError::NamesLength {
                axis: "column",
                expected: self.n_cols,
                actual: names.len(),
            });
        }
        self.col_names = Some(names);
        Ok(self)
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// Row names, if any
    pub fn row_names(&self) -> Option<&[String]> {
        self.row_names.as_deref()
    }

    /// Column names, if any
    pub fn col_names(&self) -> Option<&[String]> {
        self.col_names.as_deref()
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(col)
    }
}

/// Round the working intersection of a table.
///
/// Steps:
/// 1. Resolve the column exclusion; no columns left is [`TxtFmtError::NoColumns`]
/// 2. Resolve the row exclusion; no rows left is [`TxtFmtError::NoRows`]
/// 3. Match `options.digits` to the working columns (1 entry, or one per
///    working column in order)
/// 4. Replace each working cell with its rounded text; copy the rest
pub fn txt_round_table(table: &Table, options: &RoundOptions) -> Result<Table> {
    options.validate()?;

    let cols = working_set(
        options.exclude_cols.as_ref(),
        table.col_names(),
        table.n_cols(),
    );
    if cols.is_empty() {
        return Err(TxtFmtError::NoColumns);
    }

    let rows = working_set(
        options.exclude_rows.as_ref(),
        table.row_names(),
        table.n_rows(),
    );
    if rows.is_empty() {
        return Err(TxtFmtError::NoRows);
    }

    let digits = options.digits.resolve(cols.len(), "digits")?;
    tracing::debug!(?rows, ?cols, ?digits, "rounding table");

    let mut out = table.clone();
    for &r in &rows {
        round_row(&mut out.rows[r], &cols, &digits, options);
    }
    Ok(out)
}

/// Round the `cols` positions of one row in place.
fn round_row(row: &mut [Cell], cols: &[usize], digits: &[usize], options: &RoundOptions) {
    for (&c, &d) in cols.iter().zip(digits) {
        row[c] = Cell::Text(round_cell(&row[c], d, options));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exclusion::Exclusion;
    use proptest::prelude::*;

    fn sample_table() -> Table {
        Table::new(vec![
            vec![Cell::from(1.234), Cell::from(10.5), Cell::from("12%")],
            vec![Cell::from("2.71828"), Cell::Missing, Cell::from(0.5)],
            vec![Cell::from(-0.0001), Cell::from("n/a"), Cell::from(3)],
        ])
        .unwrap()
        .with_row_names(["a", "b", "total"])
        .unwrap()
        .with_col_names(["mean", "sd", "pct"])
        .unwrap()
    }

    fn text(s: &str) -> Cell {
        Cell::text(s)
    }

    #[test]
    fn test_round_whole_table() {
        let out = txt_round_table(&sample_table(), &RoundOptions::new().digits(1)).unwrap();

        assert_eq!(out.rows()[0], vec![text("1.2"), text("10.5"), text("12%")]);
        assert_eq!(out.rows()[1], vec![text("2.7"), text(""), text("0.5")]);
        assert_eq!(out.rows()[2], vec![text("0.0"), text("n/a"), text("3.0")]);
    }

    #[test]
    fn test_shape_and_names_preserved() {
        let table = sample_table();
        let out = txt_round_table(&table, &RoundOptions::new().digits(2)).unwrap();

        assert_eq!(out.n_rows(), 3);
        assert_eq!(out.n_cols(), 3);
        assert_eq!(out.row_names(), table.row_names());
        assert_eq!(out.col_names(), table.col_names());
    }

    #[test]
    fn test_exclude_column_by_index() {
        let table = sample_table();
        let options = RoundOptions::new()
            .digits(2)
            .exclude_cols(Exclusion::indices([1]));
        let out = txt_round_table(&table, &options).unwrap();

        for r in 0..3 {
            assert_eq!(out.get(r, 1), table.get(r, 1));
        }
        assert_eq!(out.get(0, 0), Some(&text("1.23")));
        assert_eq!(out.get(1, 2), Some(&text("0.50")));
    }

    #[test]
    fn test_exclude_column_by_pattern() {
        let table = sample_table();
        let options = RoundOptions::new()
            .digits_per_item(vec![1, 3])
            .exclude_cols(Exclusion::pattern("^sd$").unwrap());
        let out = txt_round_table(&table, &options).unwrap();

        assert_eq!(out.get(0, 0), Some(&text("1.2")));
        assert_eq!(out.get(1, 2), Some(&text("0.500")));
        assert_eq!(out.get(0, 1), Some(&Cell::Numeric(10.5)));
    }

    #[test]
    fn test_exclude_rows() {
        let table = sample_table();
        let options = RoundOptions::new()
            .digits(1)
            .exclude_rows(Exclusion::pattern("total").unwrap());
        let out = txt_round_table(&table, &options).unwrap();

        assert_eq!(out.rows()[2], table.rows()[2]);
        assert_eq!(out.get(0, 0), Some(&text("1.2")));
    }

    #[test]
    fn test_excluded_cells_keep_type() {
        let table = sample_table();
        let options = RoundOptions::new()
            .digits(1)
            .exclude_rows(Exclusion::indices([1]));
        let out = txt_round_table(&table, &options).unwrap();

        assert_eq!(out.get(1, 1), Some(&Cell::Missing));
        assert_eq!(out.get(1, 2), Some(&Cell::Numeric(0.5)));
    }

    #[test]
    fn test_per_column_digits() {
        let options = RoundOptions::new().digits_per_item(vec![0, 1, 2]);
        let out = txt_round_table(&sample_table(), &options).unwrap();

        assert_eq!(out.get(0, 0), Some(&text("1")));
        assert_eq!(out.get(0, 1), Some(&text("10.5")));
        assert_eq!(out.get(2, 2), Some(&text("3.00")));
    }

    #[test]
    fn test_mismatched_digits() {
        let table = Table::new(vec![vec![Cell::from(1.0); 4]; 2]).unwrap();
        let options = RoundOptions::new().digits_per_item(vec![1, 2]);
        let err = txt_round_table(&table, &options).unwrap_err();

        assert_eq!(
            err,
            TxtFmtError::Configuration {
                argument: "digits",
                expected: "1 or 4 values".to_string(),
                actual: "2 values".to_string(),
            }
        );
    }

    #[test]
    fn test_digits_counted_against_working_columns() {
        let table = Table::new(vec![vec![Cell::from(1.0); 4]; 2]).unwrap();
        let options = RoundOptions::new()
            .digits_per_item(vec![1, 2])
            .exclude_cols(Exclusion::indices([0, 2]));
        let out = txt_round_table(&table, &options).unwrap();

        assert_eq!(out.get(0, 1), Some(&text("1.0")));
        assert_eq!(out.get(0, 3), Some(&text("1.00")));
        assert_eq!(out.get(0, 0), Some(&Cell::Numeric(1.0)));
    }

    #[test]
    fn test_all_columns_excluded() {
        let options = RoundOptions::new().exclude_cols(Exclusion::indices(0..3));
        assert_eq!(
            txt_round_table(&sample_table(), &options),
            Err(TxtFmtError::NoColumns)
        );
    }

    #[test]
    fn test_all_rows_excluded() {
        let options = RoundOptions::new().exclude_rows(Exclusion::pattern(".").unwrap());
        assert_eq!(
            txt_round_table(&sample_table(), &options),
            Err(TxtFmtError::NoRows)
        );
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new(vec![]).unwrap();
        assert_eq!(
            txt_round_table(&table, &RoundOptions::new()),
            Err(TxtFmtError::NoColumns)
        );

        let headed = Table::new(vec![]).unwrap().with_col_names(["x"]).unwrap();
        assert_eq!(
            txt_round_table(&headed, &RoundOptions::new()),
            Err(TxtFmtError::NoRows)
        );
    }

    #[test]
    fn test_ragged_table() {
        let err = Table::new(vec![vec![Cell::from(1.0)], vec![]]).unwrap_err();
        assert_eq!(
            err,
            TxtFmtError::RaggedTable {
                row: 1,
                expected: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn test_names_length() {
        let table = Table::new(vec![vec![Cell::from(1.0)]]).unwrap();
        assert!(matches!(
            table.clone().with_row_names(["a", "b"]),
            Err(TxtFmtError::NamesLength { axis: "row", .. })
        ));
        assert!(matches!(
            table.with_col_names(Vec::<String>::new()),
            Err(TxtFmtError::NamesLength { axis: "column", .. })
        ));
    }

    #[test]
    fn test_table_json() {
        let json = r#"{
            "col_names": ["est", "label"],
            "rows": [[1.2345, "x"], [null, "2,5"]]
        }"#;
        let table: Table = serde_json::from_str(json).unwrap();
        assert_eq!(table.n_cols(), 2);
        assert!(table.row_names().is_none());

        let options = RoundOptions::new().digits(1).decimal_marker(',');
        let out = txt_round_table(&table, &options).unwrap();
        let value = serde_json::to_value(&out).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "col_names": ["est", "label"],
                "rows": [["1.2", "x"], ["", "2.5"]]
            })
        );
    }

    #[test]
    fn test_table_json_rejects_ragged() {
        let result: std::result::Result<Table, _> =
            serde_json::from_str(r#"{"rows": [[1, 2], [3]]}"#);
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn prop_shape_preserved(
            values in prop::collection::vec(prop::collection::vec(-1.0e3f64..1.0e3, 3), 1..6),
            digits in 0usize..4,
            excluded in 0usize..3,
        ) {
            let rows: Vec<Vec<Cell>> = values
                .iter()
                .map(|r| r.iter().copied().map(Cell::from).collect())
                .collect();
            let table = Table::new(rows).unwrap();
            let options = RoundOptions::new()
                .digits(digits)
                .exclude_cols(Exclusion::indices([excluded]));
            let out = txt_round_table(&table, &options).unwrap();

            prop_assert_eq!(out.n_rows(), table.n_rows());
            prop_assert_eq!(out.n_cols(), 3);
            for r in 0..table.n_rows() {
                prop_assert_eq!(out.get(r, excluded), table.get(r, excluded));
            }
        }
    }
}
