//! End-to-end tests: credentials file -> connection -> query.

use chrono::NaiveDate;
use dw_connect::config::OdbcSettings;
use dw_connect::db::{connect, ColumnInfo, ConnectOptions, MockDriver, QueryResult, Value};
use dw_connect::{read_credentials, run_query, DwError};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

const SALES_SQL: &str = "SELECT DimDateID, Amount FROM fact.Sales";

fn sales_result() -> QueryResult {
    QueryResult::with_data(
        vec![
            ColumnInfo::new("DimDateID", "integer"),
            ColumnInfo::new("Amount", "float"),
        ],
        vec![
            vec![Value::Int(20230101), Value::Float(10.0)],
            vec![Value::Int(20231230), Value::Float(12.5)],
        ],
    )
}

#[test]
fn test_credentials_connect_and_query_file() {
    let dir = tempdir().unwrap();
    let creds = dir.path().join("creds.txt");
    std::fs::write(
        &creds,
        "server = dw.local\ndatabase = Sales\nusername = reader\npassword = pw\n",
    )
    .unwrap();
    let query = dir.path().join("daily_sales.SQL");
    std::fs::write(&query, SALES_SQL).unwrap();

    let driver = MockDriver::new().with_result(SALES_SQL, sales_result());
    let options = ConnectOptions::from_record(read_credentials(&creds).unwrap());
    let client = connect(&driver, &options, &OdbcSettings::default()).unwrap();

    let result = run_query(query.to_str().unwrap(), client.as_ref()).unwrap();

    assert_eq!(result.columns[0], ColumnInfo::new("DimDateID", "date"));
    assert_eq!(
        result.rows,
        vec![
            vec![
                Value::Date(NaiveDate::from_ymd_opt(2023, 1, 2).unwrap()),
                Value::Float(10.0)
            ],
            vec![
                Value::Date(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
                Value::Float(12.5)
            ],
        ]
    );
}

#[test]
fn test_select_one_inline_and_from_file() {
    let dir = tempdir().unwrap();
    let query = dir.path().join("query.sql");
    std::fs::write(&query, "SELECT 1").unwrap();

    let driver = MockDriver::new();
    let options = ConnectOptions::explicit("dw.local", "Sales", "reader", "pw");
    let client = connect(&driver, &options, &OdbcSettings::default()).unwrap();

    let inline = run_query("SELECT 1", client.as_ref()).unwrap();
    let from_file = run_query(query.to_str().unwrap(), client.as_ref()).unwrap();

    assert_eq!(inline.row_count, 1);
    assert_eq!(inline.columns.len(), 1);
    assert_eq!(inline.rows, vec![vec![Value::Int(1)]]);
    assert_eq!(from_file.rows, inline.rows);
    assert_eq!(from_file.columns, inline.columns);
}

#[test]
fn test_bad_sql_is_query_error() {
    let driver = MockDriver::new();
    let options = ConnectOptions::explicit("dw.local", "Sales", "reader", "pw");
    let client = connect(&driver, &options, &OdbcSettings::default()).unwrap();

    let err = run_query("SELEC nonsense", client.as_ref()).unwrap_err();
    assert!(matches!(err, DwError::Query(_)));
    assert!(err.to_string().contains("SELEC nonsense"));
}

#[test]
fn test_empty_query_is_invalid_input() {
    let driver = MockDriver::new();
    let options = ConnectOptions::explicit("dw.local", "Sales", "reader", "pw");
    let client = connect(&driver, &options, &OdbcSettings::default()).unwrap();

    assert!(matches!(
        run_query("", client.as_ref()).unwrap_err(),
        DwError::InvalidInput(_)
    ));
}
