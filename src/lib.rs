//! dw-connect - credential parsing, ODBC connection, and query helpers for
//! SQL Server data warehouses.
//!
//! The three steps are independent and synchronous:
//!
//! 1. [`credentials::read_credentials`] parses a `key = value` file.
//! 2. [`db::connect`] opens a connection from explicit fields or a record.
//! 3. [`query::run_query`] runs inline SQL or a `.sql` file.

pub mod cli;
pub mod config;
pub mod credentials;
pub mod db;
pub mod error;
pub mod logging;
pub mod output;
pub mod query;

pub use credentials::{read_credentials, CredentialRecord};
pub use db::{connect, ConnectOptions, DatabaseClient, Driver, QueryResult, Value};
pub use error::{DwError, Result};
pub use query::run_query;
