//! Merge several lines into one multi-line table cell.

use crate::error::TxtFmtError;
use crate::Result;

/// Join lines for a single header or cell.
///
/// Every argument is first split on `\n`. HTML output joins with `<br>`;
/// LaTeX output stacks the lines as `\vbox{\hbox{\strut ...}...}`.
pub fn txt_merge_lines<S: AsRef<str>>(parts: &[S], html: bool) -> Result<String> {
    let lines: Vec<&str> = parts.iter().flat_map(|p| p.as_ref().split('\n')).collect();
    if lines.is_empty() {
        return Err(TxtFmtError::NoLines);
    }

    if html {
        return Ok(lines.join("<br>"));
    }

    let mut out = String::from("\\vbox{");
    for line in &lines {
        out.push_str("\\hbox{\\strut ");
        out.push_str(line);
        out.push('}');
    }
    out.push('}');
    Ok(out)
}
