//! Error types for dw-connect.
//!
//! Defines the main error enum used throughout the crate.

use thiserror::Error;

/// Main error type for dw-connect operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DwError {
    /// A referenced file (credentials or `.sql`) does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed arguments (empty query, unreadable file, bad CLI value, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Neither, both, or only part of the credential shapes were supplied.
    #[error("Invalid credential configuration: {0}")]
    InvalidCredentialConfiguration(String),

    /// A credential key appears with more than one distinct value.
    #[error("Ambiguous credential: {0}")]
    AmbiguousCredential(String),

    /// Driver failed to open a connection (bad login, unreachable host, missing driver)
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution or result post-processing failed.
    #[error("Query error: {0}")]
    Query(String),

    /// Configuration errors (invalid config file, unreadable path, etc.)
    #[error("Configuration error: {0}")]
    Config(String),
}

impl DwError {
    /// Creates a not-found error with the given message.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates an invalid-input error with the given message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates an invalid credential configuration error with the given message.
    pub fn invalid_credentials(msg: impl Into<String>) -> Self {
        Self::InvalidCredentialConfiguration(msg.into())
    }

    /// Creates an ambiguous credential error with the given message.
    pub fn ambiguous(msg: impl Into<String>) -> Self {
        Self::AmbiguousCredential(msg.into())
    }

    /// Creates a connection error with the given message.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error with the given message.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "Not Found",
            Self::InvalidInput(_) => "Invalid Input",
            Self::InvalidCredentialConfiguration(_) => "Invalid Credential Configuration",
            Self::AmbiguousCredential(_) => "Ambiguous Credential",
            Self::Connection(_) => "Connection Error",
            Self::Query(_) => "Query Error",
            Self::Config(_) => "Configuration Error",
        }
    }
}

/// Result type alias using DwError.
pub type Result<T> = std::result::Result<T, DwError>;
