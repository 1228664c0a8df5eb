//! Rendering of query results for the command-line binary.

use crate::db::{ColumnInfo, QueryResult, Row};
use crate::error::{DwError, Result};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// Output format for printed results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Text,
    /// JSON array of row objects keyed by column name.
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = DwError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(DwError::invalid_input(format!(
                "Invalid output format: {s}. Expected: text or json"
            ))),
        }
    }
}

/// Renders `result` in the requested format.
pub fn render(result: &QueryResult, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(result)),
        OutputFormat::Json => render_json(result),
    }
}

/// Renders a column-aligned table followed by a row count line.
pub fn render_text(result: &QueryResult) -> String {
    let headers: Vec<&str> = result.columns.iter().map(|c| c.name.as_str()).collect();
    let cells: Vec<Vec<String>> = result
        .rows
        .iter()
        .map(|row| row.iter().map(|v| v.to_display_string()).collect())
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (i, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let format_line = |values: &[&str]| -> String {
        values
            .iter()
            .zip(&widths)
            .map(|(v, &w)| format!("{v:<w$}"))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    if !headers.is_empty() {
        out.push_str(&format_line(&headers));
        out.push('\n');
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        out.push_str(&rule.join("-+-"));
        out.push('\n');
    }
    for row in &cells {
        let values: Vec<&str> = row.iter().map(String::as_str).collect();
        out.push_str(&format_line(&values));
        out.push('\n');
    }

    let noun = if result.row_count == 1 { "row" } else { "rows" };
    out.push_str(&format!("({} {noun})", result.row_count));
    out
}

/// One result row serialized as an object keyed by column name.
struct RowObject<'a> {
    columns: &'a [ColumnInfo],
    row: &'a Row,
}

impl Serialize for RowObject<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (col, value) in self.columns.iter().zip(self.row) {
            map.serialize_entry(&col.name, value)?;
        }
        map.end()
    }
}

/// Renders rows as a JSON array of objects.
pub fn render_json(result: &QueryResult) -> Result<String> {
    let rows: Vec<RowObject<'_>> = result
        .rows
        .iter()
        .map(|row| RowObject {
            columns: &result.columns,
            row,
        })
        .collect();

    serde_json::to_string_pretty(&rows)
        .map_err(|e| DwError::invalid_input(format!("Failed to serialize result: {e}")))
}
