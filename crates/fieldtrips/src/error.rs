//! Error types for fieldtrips.
//!
//! This module defines all error types used throughout the fieldtrips crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

use crate::validate::ValidationReport;

/// The main error type for fieldtrips operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Storage Errors ===
    /// Failed to open or create the database.
    #[error("failed to open database at {path}: {source}")]
    DatabaseOpen {
        /// Path to the database file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: rusqlite::Error,
    },

    /// A database query failed.
    #[error("database query failed: {0}")]
    DatabaseQuery(#[from] rusqlite::Error),

    /// The stored schema version is not one this build understands.
    #[error("unsupported schema version: {message}")]
    SchemaVersion {
        /// Description of the version mismatch.
        message: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Domain Errors ===
    /// A trip draft failed field validation.
    #[error("invalid trip draft: {0}")]
    InvalidDraft(ValidationReport),

    /// A team tag outside the fixed five-team roster.
    #[error("unknown team tag '{0}' (expected HEHS, WPE, CP, PRoL or EWBN)")]
    UnknownTeam(String),

    /// A date string could not be parsed.
    #[error("invalid date: {0}")]
    DateParse(#[from] chrono::ParseError),

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Export Errors ===
    /// Writing an export document failed.
    #[error("export failed: {message}")]
    Export {
        /// Description of what went wrong.
        message: String,
    },
}

/// A specialized Result type for fieldtrips operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new export error.
    #[must_use]
    pub fn export(message: impl Into<String>) -> Self {
        Self::Export {
            message: message.into(),
        }
    }

    /// Create a new configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error is a rejected draft.
    #[must_use]
    pub fn is_invalid_draft(&self) -> bool {
        matches!(self, Self::InvalidDraft(_))
    }

    /// The validation report carried by a rejected draft, if any.
    #[must_use]
    pub fn validation_report(&self) -> Option<&ValidationReport> {
        match self {
            Self::InvalidDraft(report) => Some(report),
            _ => None,
        }
    }
}
