//! Connection options and connection string construction.

use crate::config::OdbcSettings;
use crate::credentials::CredentialRecord;
use crate::error::{DwError, Result};
use std::fmt;

/// Resolved login parameters for one database.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Builds the ODBC connection string for these credentials.
    ///
    /// Format: `DRIVER={driver};SERVER=..;PORT=..;DATABASE=..;UID=..;PWD=..`
    pub fn to_connection_string(&self, settings: &OdbcSettings) -> String {
        format!(
            "DRIVER={{{}}};SERVER={};PORT={};DATABASE={};UID={};PWD={}",
            settings.driver,
            quote_attribute(&self.server),
            settings.port,
            quote_attribute(&self.database),
            quote_attribute(&self.username),
            quote_attribute(&self.password),
        )
    }

    /// Returns a display-safe string (no credentials) for logs.
    pub fn display_string(&self, settings: &OdbcSettings) -> String {
        format!("{} @ {}:{}", self.database, self.server, settings.port)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Wraps an attribute value in braces when ODBC would otherwise misparse it.
fn quote_attribute(value: &str) -> String {
    let needs_braces = value.contains([';', '{', '}'])
        || value.starts_with(' ')
        || value.ends_with(' ');

    if needs_braces {
        format!("{{{}}}", value.replace('}', "}}"))
    } else {
        value.to_string()
    }
}

/// Inputs to the connection factory.
///
/// Either all four explicit fields are set, or a non-empty credential record
/// is given. Any other combination is rejected by [`ConnectOptions::resolve`].
#[derive(Clone, Default)]
pub struct ConnectOptions {
    pub server: Option<String>,
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub credentials: Option<CredentialRecord>,
}

impl ConnectOptions {
    /// Options with all four explicit fields and no credential record.
    pub fn explicit(
        server: impl Into<String>,
        database: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server: Some(server.into()),
            database: Some(database.into()),
            username: Some(username.into()),
            password: Some(password.into()),
            credentials: None,
        }
    }

    /// Options backed by a parsed credential record.
    pub fn from_record(record: CredentialRecord) -> Self {
        Self {
            credentials: Some(record),
            ..Default::default()
        }
    }

    fn explicit_fields(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("server", self.server.as_deref()),
            ("database", self.database.as_deref()),
            ("username", self.username.as_deref()),
            ("password", self.password.as_deref()),
        ]
    }

    /// Checks that exactly one credential shape is supplied and resolves it.
    pub fn resolve(&self) -> Result<Credentials> {
        let fields = self.explicit_fields();
        let set_count = fields.iter().filter(|(_, v)| v.is_some()).count();
        let record = self.credentials.as_ref().filter(|r| !r.is_empty());

        match (set_count, record) {
            (0, Some(record)) => from_record(record),
            (0, None) => Err(DwError::invalid_credentials(
                "no explicit credentials and no credential record supplied",
            )),
            (_, Some(_)) => Err(DwError::invalid_credentials(
                "explicit credentials and a credential record are mutually exclusive",
            )),
            (n, None) if n < fields.len() => {
                let missing: Vec<&str> = fields
                    .iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(k, _)| *k)
                    .collect();
                Err(DwError::invalid_credentials(format!(
                    "incomplete explicit credentials, missing: {}",
                    missing.join(", ")
                )))
            }
            (_, None) => {
                if let Some((key, _)) = fields.iter().find(|(_, v)| v.is_some_and(str::is_empty))
                {
                    return Err(DwError::invalid_credentials(format!(
                        "explicit credential '{key}' is empty"
                    )));
                }
                let [server, database, username, password] =
                    fields.map(|(_, v)| v.unwrap_or_default().to_string());
                Ok(Credentials {
                    server,
                    database,
                    username,
                    password,
                })
            }
        }
    }
}

impl fmt::Debug for ConnectOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectOptions")
            .field("server", &self.server)
            .field("database", &self.database)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("credentials", &self.credentials)
            .finish()
    }
}

fn from_record(record: &CredentialRecord) -> Result<Credentials> {
    let value = |key: &str| -> Result<String> {
        record
            .get(key)?
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                DwError::invalid_credentials(format!("credential record has no value for '{key}'"))
            })
    };

    Ok(Credentials {
        server: value("server")?,
        database: value("database")?,
        username: value("username")?,
        password: value("password")?,
    })
}
