//! Mock driver and clients for testing.
//!
//! Provides in-memory implementations that never touch the network.

use super::{ColumnInfo, DatabaseClient, Driver, QueryResult, Value};
use crate::config::OdbcSettings;
use crate::error::{DwError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A driver that records connection strings instead of connecting.
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    opened: Arc<Mutex<Vec<String>>>,
    failure: Option<String>,
    results: HashMap<String, QueryResult>,
}

impl MockDriver {
    /// Creates a driver whose connections answer with [`MockDatabaseClient`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a driver that rejects every connection with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Registers a canned result handed to every client this driver opens.
    pub fn with_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(sql.into().trim().to_string(), result);
        self
    }

    /// Returns every connection string passed to [`Driver::open`], in order.
    pub fn connection_strings(&self) -> Vec<String> {
        self.opened
            .lock()
            .map(|opened| opened.clone())
            .unwrap_or_default()
    }
}

impl Driver for MockDriver {
    fn open(
        &self,
        connection_string: &str,
        _settings: &OdbcSettings,
    ) -> Result<Box<dyn DatabaseClient>> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(connection_string.to_string());
        }

        if let Some(message) = &self.failure {
            return Err(DwError::connection(message.clone()));
        }

        Ok(Box::new(MockDatabaseClient {
            results: self.results.clone(),
        }))
    }
}

/// A mock database client that returns predefined results.
#[derive(Debug, Clone, Default)]
pub struct MockDatabaseClient {
    results: HashMap<String, QueryResult>,
}

impl MockDatabaseClient {
    /// Creates a new mock database client with no canned results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a result returned for this SQL text, ignoring surrounding whitespace.
    pub fn with_result(mut self, sql: impl Into<String>, result: QueryResult) -> Self {
        self.results.insert(sql.into().trim().to_string(), result);
        self
    }
}

impl DatabaseClient for MockDatabaseClient {
    fn execute_query(&self, sql: &str) -> Result<QueryResult> {
        let sql = sql.trim();

        if let Some(result) = self.results.get(sql) {
            return Ok(result.clone());
        }

        // `SELECT <integer>` yields one unnamed integer column, as SQL Server does.
        let literal = sql
            .get(..7)
            .filter(|head| head.eq_ignore_ascii_case("SELECT "))
            .and_then(|_| sql[7..].trim().trim_end_matches(';').parse::<i64>().ok());

        match literal {
            Some(n) => Ok(QueryResult::with_data(
                vec![ColumnInfo::new("", "integer")],
                vec![vec![Value::Int(n)]],
            )
            .with_execution_time(Duration::from_millis(1))),
            None => Err(DwError::query(format!("Incorrect syntax near '{sql}'"))),
        }
    }
}

/// A client whose queries always fail, for error-path tests.
#[derive(Debug, Clone)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl DatabaseClient for FailingDatabaseClient {
    fn execute_query(&self, _sql: &str) -> Result<QueryResult> {
        Err(DwError::query(self.message.clone()))
    }
}
