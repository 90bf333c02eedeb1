//! Text and JSON rendering for CLI output

use console::{measure_text_width, pad_str, Alignment, Style};
use txtfmtlib::{Cell, Table};

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Plain text: one value per line, or an aligned table view
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputMode {
    /// Map the `--output` argument; unknown values fall back to text
    pub fn from_arg(value: &str) -> Self {
        match value {
            "json" => OutputMode::Json,
            _ => OutputMode::Text,
        }
    }
}

/// Render a flat list of formatted values
pub fn render_values(values: &[String], mode: OutputMode) -> anyhow::Result<String> {
    match mode {
        OutputMode::Json => Ok(format!("{}\n", serde_json::to_string_pretty(values)?)),
        OutputMode::Text => Ok(values.iter().map(|v| format!("{}\n", v)).collect()),
    }
}

/// Render a table: JSON mirrors the input shape, text is an aligned grid
/// with names on the left and a bold header.
pub fn render_table(table: &Table, mode: OutputMode) -> anyhow::Result<String> {
    if mode == OutputMode::Json {
        return Ok(format!("{}\n", serde_json::to_string_pretty(table)?));
    }

    let row_names: Vec<String> = table
        .row_names()
        .map(|n| n.to_vec())
        .unwrap_or_default();
    let body: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|r| r.iter().map(Cell::to_string).collect())
        .collect();

    let name_width = row_names
        .iter()
        .map(|n| measure_text_width(n))
        .max()
        .unwrap_or(0);

    let mut widths = vec![0usize; table.n_cols()];
    if let Some(cols) = table.col_names() {
        for (w, name) in widths.iter_mut().zip(cols) {
            *w = measure_text_width(name);
        }
    }
    for row in &body {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(measure_text_width(cell));
        }
    }

    let mut out = String::new();
    let indent = if name_width > 0 { name_width + 2 } else { 0 };

    if let Some(cols) = table.col_names() {
        let header = Style::new().bold();
        out.push_str(&" ".repeat(indent));
        let cells: Vec<String> = cols
            .iter()
            .zip(&widths)
            .map(|(name, w)| {
                header
                    .apply_to(pad_str(name, *w, Alignment::Right, None))
                    .to_string()
            })
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }

    for (i, row) in body.iter().enumerate() {
        if name_width > 0 {
            let name = row_names.get(i).map(|s| s.as_str()).unwrap_or("");
            out.push_str(&pad_str(name, name_width, Alignment::Left, None));
            out.push_str("  ");
        }
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad_str(cell, *w, Alignment::Right, None).into_owned())
            .collect();
        out.push_str(&cells.join("  "));
        out.push('\n');
    }

    Ok(out)
}
