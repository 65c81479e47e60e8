use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the tariff report.
#[derive(Error, Debug)]
pub enum TariffError {
    /// The export file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A report file could not be written.
    #[error("Failed to write file {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The export document or an embedded session body is not valid JSON,
    /// or lacks a required field.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A signed session payload is missing its format prefix.
    #[error("Malformed signed session: {0}")]
    MalformedSession(String),

    /// A meter reading value is not a finite number.
    #[error("Invalid meter reading value: {0}")]
    InvalidReading(String),

    /// A reading timestamp did not match any recognised format.
    #[error("Invalid timestamp format: {0}")]
    TimestampParse(String),

    /// A session envelope lacks a field required to attribute its readings.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The configured installation timezone is not an IANA identifier.
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

impl TariffError {
    /// Returns `true` for errors caused by malformed or incomplete input data.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            TariffError::JsonParse(_)
                | TariffError::MalformedSession(_)
                | TariffError::InvalidReading(_)
                | TariffError::TimestampParse(_)
                | TariffError::MissingField(_)
        )
    }
}

/// Convenience alias used throughout the tariff crates.
pub type Result<T> = std::result::Result<T, TariffError>;
