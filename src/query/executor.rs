//! Query resolution and execution.

use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info};

use crate::db::{DatabaseClient, QueryResult};
use crate::error::{DwError, Result};
use crate::query::apply_dim_date_id;

/// Where the SQL text of a query comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuerySource {
    /// Literal SQL text.
    Inline(String),
    /// Path to a `.sql` file whose full contents is the query.
    File(PathBuf),
}

impl QuerySource {
    /// Classifies `input`: a `.sql` suffix (any case) means a file path.
    pub fn resolve(input: &str) -> Result<Self> {
        if input.trim().is_empty() {
            return Err(DwError::invalid_input(
                "query must be non-empty SQL text or a path to a .sql file",
            ));
        }

        if input.to_lowercase().ends_with(".sql") {
            Ok(Self::File(PathBuf::from(input)))
        } else {
            Ok(Self::Inline(input.to_string()))
        }
    }

    /// Returns the SQL text, reading the file for `File` sources.
    pub fn sql(&self) -> Result<String> {
        match self {
            Self::Inline(sql) => Ok(sql.clone()),
            Self::File(path) => read_sql_file(path),
        }
    }
}

impl fmt::Display for QuerySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inline(sql) => {
                let first_line = sql.trim().lines().next().unwrap_or_default();
                write!(f, "query '{first_line}'")
            }
            Self::File(path) => write!(f, "file '{}'", path.display()),
        }
    }
}

fn read_sql_file(path: &Path) -> Result<String> {
    let sql = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            DwError::not_found(format!("query file '{}' does not exist", path.display()))
        }
        _ => DwError::invalid_input(format!(
            "Failed to read query file '{}': {e}",
            path.display()
        )),
    })?;

    if sql.trim().is_empty() {
        return Err(DwError::invalid_input(format!(
            "query file '{}' is empty",
            path.display()
        )));
    }

    Ok(sql)
}

/// Runs inline SQL or a `.sql` file against `client`.
///
/// A `DimDateID` column in the result is converted to dates; see
/// [`apply_dim_date_id`].
pub fn run_query(query_or_path: &str, client: &dyn DatabaseClient) -> Result<QueryResult> {
    let source = QuerySource::resolve(query_or_path)?;
    let sql = source.sql()?;
    debug!("Executing {}", source);

    let start = Instant::now();
    let mut result = client
        .execute_query(&sql)
        .map_err(|e| with_source(e, &source))?;
    apply_dim_date_id(&mut result).map_err(|e| with_source(e, &source))?;

    info!(
        "{} returned {} rows in {:?}",
        source,
        result.row_count,
        start.elapsed()
    );

    Ok(result)
}

/// Appends the query source to query errors.
fn with_source(err: DwError, source: &QuerySource) -> DwError {
    match err {
        DwError::Query(msg) => DwError::query(format!("{msg} (in {source})")),
        other => other,
    }
}
