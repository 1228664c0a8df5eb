//! Command-line argument parsing for dwconnect.
//!
//! Uses clap to parse CLI arguments.

use crate::config::{Config, OdbcSettings};
use crate::credentials::read_credentials;
use crate::db::ConnectOptions;
use crate::error::Result;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// Run a query against a SQL Server warehouse over ODBC.
#[derive(Parser, Debug)]
#[command(name = "dwconnect")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQL text, or a path ending in .sql whose contents is the query
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Credentials file with `key = value` lines (server, database, username, password)
    #[arg(short = 'f', long, value_name = "PATH")]
    pub credentials: Option<PathBuf>,

    /// Database server
    #[arg(short = 'S', long, value_name = "SERVER")]
    pub server: Option<String>,

    /// Database name
    #[arg(short = 'd', long, value_name = "DATABASE")]
    pub database: Option<String>,

    /// Login user
    #[arg(short = 'U', long, value_name = "USER")]
    pub username: Option<String>,

    /// Login password
    #[arg(short = 'P', long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// ODBC driver name (overrides config)
    #[arg(long, value_name = "NAME")]
    pub driver: Option<String>,

    /// Server port (overrides config)
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Output format: text or json
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: String,

    /// Enable debug logging when RUST_LOG is unset
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Loads settings from the config file and applies `--driver`/`--port`.
    pub fn odbc_settings(&self) -> Result<OdbcSettings> {
        let config = Config::load_from_file(&self.config_path())?;
        Ok(config
            .odbc
            .with_overrides(self.driver.as_deref(), self.port))
    }

    /// Builds connection options from the explicit flags and the credentials file.
    ///
    /// Both may be given; [`ConnectOptions::resolve`] rejects the combination.
    pub fn connect_options(&self) -> Result<ConnectOptions> {
        let credentials = self
            .credentials
            .as_deref()
            .map(read_credentials)
            .transpose()?;

        Ok(ConnectOptions {
            server: self.server.clone(),
            database: self.database.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            credentials,
        })
    }

    /// Parses the output format from the --format argument.
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.format.parse()
    }
}
