//! Numeric extraction from decorated text.
//!
//! Extraction runs in three explicit steps:
//!
//! 1. [`find_token`] locates the first numeric token, written with the
//!    locale decimal marker, and splits the text into prefix, token and suffix
//! 2. [`normalize_marker`] rewrites the marker inside the token to `.`
//! 3. [`parse_token`] strips grouping spaces and converts the token
//!
//! The token grammar is:
//!
//! - a prefix with no digits, no decimal marker and no `-`
//! - an optional minus sign
//! - an integer part, optionally followed by space-separated groups of three
//!   digits (`1 234 567`), with an optional marker fraction; or a bare fraction
//! - a suffix that is empty or starts with whitespace
//!
//! Only the marker is special in the prefix, so with `,` as the marker the
//! text `"Est. 12,5"` still yields 12.5. The suffix rule keeps unit-bearing
//! text such as `"12%"` or `"1e-5"` out of the numeric path: those cells pass
//! through unchanged.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::TxtFmtError;
use crate::Result;

/// Numeric token pattern for the default `.` marker.
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&token_pattern('.')).expect("default token pattern is valid")
});

/// Build the token pattern for `marker`.
fn token_pattern(marker: char) -> String {
    let m = regex::escape(marker.encode_utf8(&mut [0; 4]));
    format!(
        r"(?s)^(?P<prefix>[^0-9{m}\-]*)(?P<number>-?(?:[0-9]+(?: [0-9]{{3}})*(?:{m}[0-9]+)?|{m}[0-9]+))(?P<suffix>(?:\s.*)?)$"
    )
}

fn token_regex(marker: char) -> Option<Cow<'static, Regex>> {
    if marker == '.' {
        return Some(Cow::Borrowed(&*TOKEN_REGEX));
    }
    Regex::new(&token_pattern(marker)).ok().map(Cow::Owned)
}

/// A numeric token located inside a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericToken<'a> {
    /// Decoration before the number
    pub prefix: &'a str,
    /// The number itself, as written (grouping spaces, locale marker)
    pub number: &'a str,
    /// Decoration after the number
    pub suffix: &'a str,
}

/// Check that a character can act as a decimal marker.
pub fn validate_marker(marker: char) -> Result<()> {
    if marker.is_ascii_digit() || marker == '-' || marker.is_whitespace() {
        return Err(TxtFmtError::InvalidDecimalMarker(marker));
    }
    Ok(())
}

/// Rewrite `marker` to `.` so the token can be handed to the float parser.
pub fn normalize_marker(text: &str, marker: char) -> Cow<'_, str> {
    if marker == '.' || !text.contains(marker) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.replace(marker, "."))
    }
}

/// Find the first numeric token in `text`, with `marker` as the decimal point.
pub fn find_token(text: &str, marker: char) -> Option<NumericToken<'_>> {
    let re = token_regex(marker)?;
    let caps = re.captures(text)?;
    Some(NumericToken {
        prefix: caps.name("prefix").map_or("", |m| m.as_str()),
        number: caps.name("number")?.as_str(),
        suffix: caps.name("suffix").map_or("", |m| m.as_str()),
    })
}

/// Convert a token found by [`find_token`] into a number.
pub fn parse_token(number: &str, marker: char) -> Option<f64> {
    let compact: String = normalize_marker(number, marker)
        .chars()
        .filter(|c| *c != ' ')
        .collect();
    compact.parse::<f64>().ok()
}

/// Extract the first number embedded in `text`, using `marker` as the
/// decimal point. Returns `None` when the text isn't numeric-looking.
pub fn extract_number(text: &str, marker: char) -> Option<f64> {
    let token = find_token(text, marker)?;
    parse_token(token.number, marker)
}
