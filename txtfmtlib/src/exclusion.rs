//! Row and column exclusion for table rounding.
//!
//! An [`Exclusion`] picks the rows or columns that rounding must leave
//! alone, either by position or by a regular expression over the names.
//! It is resolved once per call into a concrete index set.

use std::collections::BTreeSet;

use regex::Regex;

use crate::error::TxtFmtError;
use crate::Result;

/// Selector for rows or columns to leave untouched.
#[derive(Debug, Clone)]
pub enum Exclusion {
    /// Zero-based positions; out-of-range positions are ignored
    ByIndex(Vec<usize>),
    /// Regular expression searched in each row/column name
    ByNamePattern(Regex),
}

impl Exclusion {
    /// Exclude by position.
    pub fn indices(indices: impl IntoIterator<Item = usize>) -> Self {
        Exclusion::ByIndex(indices.into_iter().collect())
    }

    /// Exclude every name matching `pattern`.
    pub fn pattern(pattern: &str) -> Result<Self> {
        let re = Regex::new(pattern).map_err(|e| TxtFmtError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;
        Ok(Exclusion::ByNamePattern(re))
    }

    /// Resolve to the set of excluded positions on an axis of length `len`.
    ///
    /// A name pattern on an axis without names excludes nothing.
    pub fn resolve(&self, names: Option<&[String]>, len: usize) -> BTreeSet<usize> {
        match self {
            Exclusion::ByIndex(indices) => {
                if indices.iter().any(|&i| i >= len) {
                    tracing::debug!(?indices, len, "ignoring out-of-range exclusion indices");
                }
                indices.iter().copied().filter(|&i| i < len).collect()
            }
            Exclusion::ByNamePattern(re) => match names {
                Some(names) => names
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| re.is_match(name))
                    .map(|(i, _)| i)
                    .collect(),
                None => {
                    tracing::warn!(
                        pattern = re.as_str(),
                        "name pattern given for an axis without names; nothing excluded"
                    );
                    BTreeSet::new()
                }
            },
        }
    }
}

/// Positions on an axis of length `len` that remain after `exclusion`.
pub fn working_set(
    exclusion: Option<&Exclusion>,
    names: Option<&[String]>,
    len: usize,
) -> Vec<usize> {
    match exclusion {
        None => (0..len).collect(),
        Some(exclusion) => {
            let excluded = exclusion.resolve(names, len);
            (0..len).filter(|i| !excluded.contains(i)).collect()
        }
    }
}
