// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Domain error types
//!
//! This module defines the error taxonomy for edfveil. All errors are
//! file-scoped: a failure on one recording must never abort the batch, so
//! every variant carries enough context to be reported per file.

use thiserror::Error;

/// Main edfveil error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum EdfveilError {
    /// Bad identity or offset input (aborts that identity's processing)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An EDF header that cannot be parsed (skip file, log, continue batch)
    #[error("Malformed EDF header: {0}")]
    MalformedHeader(String),

    /// An annotation document that cannot be parsed as a well-formed tree
    #[error("Malformed annotation document: {0}")]
    MalformedDocument(String),

    /// Output would violate the fixed-length header contract
    ///
    /// Fatal for the file in question; the header is never silently
    /// truncated or padded beyond its format width.
    #[error("Format invariant violated: {0}")]
    FormatInvariant(String),

    /// A file references a patient identity absent from the offset registry
    #[error("No day-offset registered for patient '{0}'")]
    MissingOffset(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Audit recording/reporting errors
    #[error("Audit error: {0}")]
    Audit(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

impl EdfveilError {
    /// Whether the error is file-scoped (skip the file, continue the batch)
    /// as opposed to a run-level configuration problem.
    pub fn is_file_scoped(&self) -> bool {
        matches!(
            self,
            EdfveilError::MalformedHeader(_)
                | EdfveilError::MalformedDocument(_)
                | EdfveilError::FormatInvariant(_)
                | EdfveilError::MissingOffset(_)
        )
    }
}

impl From<std::io::Error> for EdfveilError {
    fn from(err: std::io::Error) -> Self {
        EdfveilError::Io(err.to_string())
    }
}

impl From<csv::Error> for EdfveilError {
    fn from(err: csv::Error) -> Self {
        EdfveilError::Audit(err.to_string())
    }
}

impl From<toml::de::Error> for EdfveilError {
    fn from(err: toml::de::Error) -> Self {
        EdfveilError::Configuration(format!("TOML parse error: {err}"))
    }
}
