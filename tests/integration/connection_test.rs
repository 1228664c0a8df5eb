//! Connection factory integration tests.
//!
//! Uses the mock driver to inspect the generated connection string.

use dw_connect::config::OdbcSettings;
use dw_connect::db::{connect, ConnectOptions, MockDriver};
use dw_connect::{read_credentials, CredentialRecord, DwError};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const EXPECTED: &str = "DRIVER={ODBC Driver 17 for SQL Server};SERVER=dw.local;PORT=1433;\
                        DATABASE=Sales;UID=reader;PWD=pw";

fn record() -> CredentialRecord {
    CredentialRecord::parse("server = dw.local\ndatabase = Sales\nusername = reader\npassword = pw")
}

#[test]
fn test_explicit_fields_build_expected_string() {
    let driver = MockDriver::new();
    let options = ConnectOptions::explicit("dw.local", "Sales", "reader", "pw");

    connect(&driver, &options, &OdbcSettings::default()).unwrap();

    assert_eq!(driver.connection_strings(), vec![EXPECTED.to_string()]);
}

#[test]
fn test_explicit_fields_with_empty_record() {
    let driver = MockDriver::new();
    let mut options = ConnectOptions::explicit("dw.local", "Sales", "reader", "pw");
    options.credentials = Some(CredentialRecord::new());

    connect(&driver, &options, &OdbcSettings::default()).unwrap();
    assert_eq!(driver.connection_strings(), vec![EXPECTED.to_string()]);
}

#[test]
fn test_credentials_file_builds_same_string() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("creds.txt");
    std::fs::write(
        &path,
        "server = dw.local\ndatabase = Sales\nusername = reader\npassword = pw\n",
    )
    .unwrap();

    let driver = MockDriver::new();
    let options = ConnectOptions::from_record(read_credentials(&path).unwrap());
    connect(&driver, &options, &OdbcSettings::default()).unwrap();

    assert_eq!(driver.connection_strings(), vec![EXPECTED.to_string()]);
}

#[test]
fn test_both_shapes_fail_without_connecting() {
    let driver = MockDriver::new();
    let mut options = ConnectOptions::explicit("dw.local", "Sales", "reader", "pw");
    options.credentials = Some(record());

    let err = connect(&driver, &options, &OdbcSettings::default()).err().unwrap();

    assert!(matches!(err, DwError::InvalidCredentialConfiguration(_)));
    assert!(driver.connection_strings().is_empty());
}

#[test]
fn test_neither_shape_fails() {
    let driver = MockDriver::new();
    let err = connect(&driver, &ConnectOptions::default(), &OdbcSettings::default())
        .err()
        .unwrap();

    assert!(matches!(err, DwError::InvalidCredentialConfiguration(_)));
    assert!(driver.connection_strings().is_empty());
}

#[test]
fn test_partial_explicit_fails() {
    let options = ConnectOptions {
        server: Some("dw.local".to_string()),
        password: Some("pw".to_string()),
        ..Default::default()
    };

    let err = connect(&MockDriver::new(), &options, &OdbcSettings::default())
        .err()
        .unwrap();
    assert!(matches!(err, DwError::InvalidCredentialConfiguration(_)));
}

#[test]
fn test_configured_driver_and_port() {
    let driver = MockDriver::new();
    let settings = OdbcSettings {
        driver: "ODBC Driver 18 for SQL Server".to_string(),
        port: 14330,
        login_timeout_secs: Some(5),
    };

    connect(&driver, &ConnectOptions::from_record(record()), &settings).unwrap();

    assert_eq!(
        driver.connection_strings(),
        vec![
            "DRIVER={ODBC Driver 18 for SQL Server};SERVER=dw.local;PORT=14330;\
             DATABASE=Sales;UID=reader;PWD=pw"
                .to_string()
        ]
    );
}

#[test]
fn test_driver_failure_is_connection_error() {
    let driver = MockDriver::failing("[Microsoft][ODBC Driver 17 for SQL Server]Login timeout expired");
    let options = ConnectOptions::explicit("dw.local", "Sales", "reader", "pw");

    let err = connect(&driver, &options, &OdbcSettings::default()).err().unwrap();

    assert!(matches!(err, DwError::Connection(_)));
    assert!(err.to_string().contains("Login timeout expired"));
}
