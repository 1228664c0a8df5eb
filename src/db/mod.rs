//! Database abstraction layer for dw-connect.
//!
//! Provides a trait-based interface for opening connections and running
//! queries, so the ODBC driver can be swapped for a fake in tests.

mod mock;
mod odbc;
mod options;
mod types;

pub use mock::{FailingDatabaseClient, MockDatabaseClient, MockDriver};
pub use odbc::{OdbcClient, OdbcDriver};
pub use options::{ConnectOptions, Credentials};
pub use types::{ColumnInfo, QueryResult, Row, Value};

use crate::config::OdbcSettings;
use crate::error::Result;
use tracing::info;

/// Opens database connections from a connection string.
pub trait Driver {
    /// Opens a live connection. Failures are reported as connection errors.
    fn open(
        &self,
        connection_string: &str,
        settings: &OdbcSettings,
    ) -> Result<Box<dyn DatabaseClient>>;
}

/// Trait defining the interface for database clients.
///
/// Implementations are not required to be thread-safe. The connection is
/// released when the client is dropped.
pub trait DatabaseClient {
    /// Executes a SQL query and returns the results.
    fn execute_query(&self, sql: &str) -> Result<QueryResult>;
}

/// Creates a database client from connection options.
///
/// This is the central factory function for database connections. Exactly
/// one credential shape must be present in `options`; see
/// [`ConnectOptions::resolve`].
pub fn connect(
    driver: &dyn Driver,
    options: &ConnectOptions,
    settings: &OdbcSettings,
) -> Result<Box<dyn DatabaseClient>> {
    let credentials = options.resolve()?;
    let conn_str = credentials.to_connection_string(settings);

    info!("Connecting to {}", credentials.display_string(settings));
    let client = driver.open(&conn_str, settings)?;
    info!("Connected to {}", credentials.database);

    Ok(client)
}
