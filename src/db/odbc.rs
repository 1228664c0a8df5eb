//! ODBC database client implementation.
//!
//! Provides the `OdbcDriver` and `OdbcClient` types that implement the
//! `Driver` and `DatabaseClient` traits using odbc-api.

use crate::config::OdbcSettings;
use crate::db::{ColumnInfo, DatabaseClient, Driver, QueryResult, Row, Value};
use crate::error::{DwError, Result};
use odbc_api::{
    Connection, ConnectionOptions, Cursor, DataType, Environment, ResultSetMetadata,
};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::debug;

static ENVIRONMENT: OnceLock<Environment> = OnceLock::new();

/// Returns the process-wide ODBC environment, allocating it on first use.
fn environment() -> Result<&'static Environment> {
    if let Some(env) = ENVIRONMENT.get() {
        return Ok(env);
    }

    let env = Environment::new()
        .map_err(|e| DwError::connection(format!("Failed to allocate ODBC environment: {e}")))?;
    // A concurrent initializer may have won; either environment is usable.
    let _ = ENVIRONMENT.set(env);

    ENVIRONMENT
        .get()
        .ok_or_else(|| DwError::connection("ODBC environment unavailable"))
}

/// Driver backed by the system ODBC driver manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct OdbcDriver;

impl OdbcDriver {
    pub fn new() -> Self {
        Self
    }
}

impl Driver for OdbcDriver {
    fn open(
        &self,
        connection_string: &str,
        settings: &OdbcSettings,
    ) -> Result<Box<dyn DatabaseClient>> {
        let env = environment()?;

        let options = ConnectionOptions {
            login_timeout_sec: settings.login_timeout_secs,
            ..ConnectionOptions::default()
        };

        let connection = env
            .connect_with_connection_string(connection_string, options)
            .map_err(|e| DwError::connection(e.to_string()))?;

        debug!("ODBC connection established using driver '{}'", settings.driver);
        Ok(Box::new(OdbcClient { connection }))
    }
}

/// A live ODBC connection.
pub struct OdbcClient {
    connection: Connection<'static>,
}

impl DatabaseClient for OdbcClient {
    fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let start = Instant::now();

        let cursor = self
            .connection
            .execute(sql, ())
            .map_err(|e| DwError::query(e.to_string()))?;

        let Some(mut cursor) = cursor else {
            debug!("Statement produced no result set");
            return Ok(QueryResult::new().with_execution_time(start.elapsed()));
        };

        let columns = read_columns(&mut cursor)?;
        let kinds: Vec<ValueKind> = columns
            .iter()
            .map(|c| ValueKind::from_type_name(&c.data_type))
            .collect();

        let mut rows: Vec<Row> = Vec::new();
        let mut buf = Vec::new();

        while let Some(mut row) = cursor
            .next_row()
            .map_err(|e| DwError::query(format!("Failed to fetch row: {e}")))?
        {
            let mut values = Vec::with_capacity(kinds.len());
            for (i, kind) in kinds.iter().enumerate() {
                buf.clear();
                let col = (i + 1) as u16;
                let not_null = row
                    .get_text(col, &mut buf)
                    .map_err(|e| DwError::query(format!("Failed to read column {col}: {e}")))?;

                values.push(if not_null {
                    kind.convert(String::from_utf8_lossy(&buf).into_owned())
                } else {
                    Value::Null
                });
            }
            rows.push(values);
        }

        Ok(QueryResult::with_data(columns, rows).with_execution_time(start.elapsed()))
    }
}

fn read_columns(cursor: &mut impl ResultSetMetadata) -> Result<Vec<ColumnInfo>> {
    let count = cursor
        .num_result_cols()
        .map_err(|e| DwError::query(format!("Failed to read result metadata: {e}")))?;

    (1..=count as u16)
        .map(|col| {
            let name = cursor
                .col_name(col)
                .map_err(|e| DwError::query(format!("Failed to read column name: {e}")))?;
            let data_type = cursor
                .col_data_type(col)
                .map_err(|e| DwError::query(format!("Failed to read column type: {e}")))?;
            Ok(ColumnInfo::new(name, type_name(data_type)))
        })
        .collect()
}

/// Maps an ODBC data type onto the name stored in `ColumnInfo`.
fn type_name(data_type: DataType) -> &'static str {
    match data_type {
        DataType::TinyInt | DataType::SmallInt | DataType::Integer | DataType::BigInt => {
            "integer"
        }
        DataType::Real | DataType::Double | DataType::Float { .. } => "float",
        DataType::Bit => "bit",
        DataType::Date => "date",
        DataType::Time { .. } => "time",
        DataType::Timestamp { .. } => "timestamp",
        DataType::Decimal { .. } | DataType::Numeric { .. } => "decimal",
        DataType::Binary { .. } | DataType::Varbinary { .. } | DataType::LongVarbinary { .. } => {
            "binary"
        }
        _ => "text",
    }
}

/// How text read from the driver is turned into a `Value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Int,
    Float,
    Bool,
    Text,
}

impl ValueKind {
    fn from_type_name(name: &str) -> Self {
        match name {
            "integer" => Self::Int,
            "float" => Self::Float,
            "bit" => Self::Bool,
            _ => Self::Text,
        }
    }

    fn convert(self, text: String) -> Value {
        match self {
            Self::Int => text.trim().parse().map(Value::Int).unwrap_or(Value::String(text)),
            Self::Float => text
                .trim()
                .parse()
                .map(Value::Float)
                .unwrap_or(Value::String(text)),
            Self::Bool => match text.trim() {
                "1" => Value::Bool(true),
                "0" => Value::Bool(false),
                _ => Value::String(text),
            },
            Self::Text => Value::String(text),
        }
    }
}
