//! Typed errors for the sources crate.

use std::fmt;

/// Errors that can occur while fetching or decoding a table.
#[derive(Debug)]
pub enum ProviderError {
    /// The provider has no such table for the requested version.
    NotFound(String),
    /// Transport or I/O failure while fetching a table.
    FetchFailed(String),
    /// A table was fetched but its rows do not have the expected shape.
    MalformedRows {
        table: String,
        row: Option<usize>,
        reason: String,
    },
    /// Invalid or missing provider configuration.
    ConfigError(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::NotFound(msg) => write!(f, "table not found: {}", msg),
            ProviderError::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            ProviderError::MalformedRows {
                table,
                row: Some(row),
                reason,
            } => write!(f, "malformed row {} in table {}: {}", row, table, reason),
            ProviderError::MalformedRows {
                table,
                row: None,
                reason,
            } => write!(f, "malformed table {}: {}", table, reason),
            ProviderError::ConfigError(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for ProviderError {}

impl From<std::io::Error> for ProviderError {
    fn from(e: std::io::Error) -> Self {
        ProviderError::FetchFailed(e.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        ProviderError::FetchFailed(e.to_string())
    }
}

impl From<url::ParseError> for ProviderError {
    fn from(e: url::ParseError) -> Self {
        ProviderError::ConfigError(e.to_string())
    }
}
