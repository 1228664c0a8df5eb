//! Credential file integration tests.

use dw_connect::{read_credentials, DwError};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

#[test]
fn test_round_trip_known_values() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("credentials.txt");
    std::fs::write(
        &path,
        "server = dw-prod.example.com\n\
         database = EnterpriseDW\n\
         username = etl_reader\n\
         password = C0rrect-Horse\n",
    )
    .unwrap();

    let record = read_credentials(&path).unwrap();

    assert_eq!(record.get("server").unwrap(), Some("dw-prod.example.com"));
    assert_eq!(record.get("database").unwrap(), Some("EnterpriseDW"));
    assert_eq!(record.get("username").unwrap(), Some("etl_reader"));
    assert_eq!(record.get("password").unwrap(), Some("C0rrect-Horse"));
    assert_eq!(record.len(), 4);
}

#[test]
fn test_whitespace_around_separator_is_ignored() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("credentials.txt");
    std::fs::write(
        &path,
        "server   =   a\n\tdatabase = b\t\nusername =  c\npassword = d   \n",
    )
    .unwrap();

    let record = read_credentials(&path).unwrap();

    let values: Vec<_> = ["server", "database", "username", "password"]
        .iter()
        .map(|k| record.get(k).unwrap().unwrap().to_string())
        .collect();
    assert_eq!(values, vec!["a", "b", "c", "d"]);
}

#[test]
fn test_nonexistent_path_is_not_found() {
    let dir = tempdir().unwrap();
    let err = read_credentials(&dir.path().join("missing.txt")).unwrap_err();
    assert!(matches!(err, DwError::NotFound(_)));
}

#[test]
fn test_windows_line_endings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("credentials.txt");
    std::fs::write(&path, "server = a\r\ndatabase = b\r\n").unwrap();

    let record = read_credentials(&path).unwrap();
    assert_eq!(record.get("server").unwrap(), Some("a"));
    assert_eq!(record.get("database").unwrap(), Some("b"));
}
