//! Credential file parsing.
//!
//! A credentials file holds one `key = value` pair per line:
//!
//! ```text
//! server = dw.example.com
//! database = Warehouse
//! username = reporting
//! password = hunter2
//! ```

use crate::error::{DwError, Result};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Separator between element and value on each line.
const SEPARATOR: &str = " = ";

/// A single parsed line of a credentials file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    /// Key on the left of the separator, trimmed.
    pub element: String,

    /// Value on the right of the separator, trimmed. `None` when the line has no separator.
    pub value: Option<String>,
}

/// Ordered key-value pairs read from a credentials file.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialRecord {
    entries: Vec<CredentialEntry>,
}

impl CredentialRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses credential text. Blank lines are skipped.
    pub fn parse(content: &str) -> Self {
        let entries = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| match line.split_once(SEPARATOR) {
                Some((element, value)) => CredentialEntry {
                    element: element.trim().to_string(),
                    value: Some(value.trim().to_string()),
                },
                None => {
                    warn!("Credential line has no '{}' separator", SEPARATOR.trim());
                    CredentialEntry {
                        element: line.trim().to_string(),
                        value: None,
                    }
                }
            })
            .collect();

        Self { entries }
    }

    /// Appends an entry, keeping file order.
    #[cfg(test)]
    pub fn push(&mut self, element: impl Into<String>, value: impl Into<String>) {
        self.entries.push(CredentialEntry {
            element: element.into(),
            value: Some(value.into()),
        });
    }

    /// Returns the parsed entries in file order.
    pub fn entries(&self) -> &[CredentialEntry] {
        &self.entries
    }

    /// Returns true if no lines were parsed.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of parsed lines.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Looks up the unique value for `element`.
    ///
    /// Repeated lines with the same value are accepted. Distinct values fail
    /// with [`DwError::AmbiguousCredential`]. Lines for `element` without a
    /// value are ignored, so an element with only such lines yields `None`.
    pub fn get(&self, element: &str) -> Result<Option<&str>> {
        let mut found: Option<&str> = None;

        for value in self
            .entries
            .iter()
            .filter(|e| e.element == element)
            .filter_map(|e| e.value.as_deref())
        {
            match found {
                None => found = Some(value),
                Some(existing) if existing == value => {}
                Some(_) => {
                    return Err(DwError::ambiguous(format!(
                        "'{element}' has more than one distinct value"
                    )));
                }
            }
        }

        Ok(found)
    }
}

impl FromStr for CredentialRecord {
    type Err = DwError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self::parse(s))
    }
}

// Values are secrets; only element names are printed.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|e| &e.element))
            .finish()
    }
}

/// Reads and parses a credentials file.
///
/// Fails with [`DwError::NotFound`] if `path` is not an existing file.
pub fn read_credentials(path: &Path) -> Result<CredentialRecord> {
    if !path.is_file() {
        return Err(DwError::not_found(format!(
            "credentials file '{}' does not exist",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        DwError::invalid_input(format!(
            "Failed to read credentials file '{}': {e}",
            path.display()
        ))
    })?;

    let record = CredentialRecord::parse(&content);
    debug!(
        "Read {} credential entries from {}",
        record.len(),
        path.display()
    );

    Ok(record)
}
