//! Live ODBC integration tests.
//!
//! These tests require a reachable SQL Server and an installed ODBC driver.
//! Set DW_TEST_CONNECTION_STRING to a full ODBC connection string to run them.

use dw_connect::config::OdbcSettings;
use dw_connect::db::{DatabaseClient, Driver, OdbcDriver, Value};
use dw_connect::{run_query, DwError};

/// Helper to open a client from the environment.
fn get_test_client() -> Option<Box<dyn DatabaseClient>> {
    let conn_str = std::env::var("DW_TEST_CONNECTION_STRING").ok()?;
    OdbcDriver::new()
        .open(&conn_str, &OdbcSettings::default())
        .ok()
}

#[test]
fn test_select_one() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DW_TEST_CONNECTION_STRING not set");
        return;
    };

    let result = run_query("SELECT 1 AS num", client.as_ref()).unwrap();

    assert_eq!(result.columns.len(), 1);
    assert_eq!(result.columns[0].name, "num");
    assert_eq!(result.rows, vec![vec![Value::Int(1)]]);
}

#[test]
fn test_dim_date_id_conversion() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DW_TEST_CONNECTION_STRING not set");
        return;
    };

    let result = run_query("SELECT 20230101 AS DimDateID, NULL AS Other", client.as_ref()).unwrap();

    assert_eq!(result.rows[0][0].to_display_string(), "2023-01-02");
    assert_eq!(result.rows[0][1], Value::Null);
}

#[test]
fn test_invalid_sql() {
    let Some(client) = get_test_client() else {
        eprintln!("Skipping test: DW_TEST_CONNECTION_STRING not set");
        return;
    };

    let err = run_query("SELECT * FROM dbo.__definitely_missing__", client.as_ref()).unwrap_err();
    assert!(matches!(err, DwError::Query(_)));
}

#[test]
fn test_unreachable_server_is_connection_error() {
    if std::env::var("DW_TEST_CONNECTION_STRING").is_err() {
        eprintln!("Skipping test: DW_TEST_CONNECTION_STRING not set");
        return;
    }

    let settings = OdbcSettings {
        login_timeout_secs: Some(2),
        ..OdbcSettings::default()
    };
    let err = OdbcDriver::new()
        .open(
            "DRIVER={ODBC Driver 17 for SQL Server};SERVER=192.0.2.1;PORT=1433;DATABASE=x;UID=x;PWD=x",
            &settings,
        )
        .err()
        .unwrap();
    assert!(matches!(err, DwError::Connection(_)));
}
