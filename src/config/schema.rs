// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Configuration schema
//!
//! Typed configuration sections with serde defaults and validation.

use crate::core::annotation::{MetadataConsistency, ScrubMode};
use crate::domain::errors::EdfveilError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EdfveilConfig {
    #[serde(default)]
    pub application: ApplicationConfig,

    #[serde(default)]
    pub annotations: AnnotationConfig,

    #[serde(default)]
    pub audit: AuditConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EdfveilConfig {
    /// Validates every section
    pub fn validate(&self) -> Result<()> {
        self.application.validate()?;
        self.annotations.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_app_name() -> String {
    "edfveil".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
        if !LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(EdfveilError::Configuration(format!(
                "invalid log level '{}', expected one of: {}",
                self.log_level,
                LEVELS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Annotation processing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnotationConfig {
    /// createTime handling: `remove` (default) or `shift`
    #[serde(default)]
    pub mode: ScrubMode,

    /// `trust` (default) or `strict` comparison of repeated
    /// annotator/creatorId values within one document
    #[serde(default)]
    pub metadata_consistency: MetadataConsistency,

    /// Regex matching annotation filenames; the first capture group is the
    /// patient identity
    #[serde(default = "default_filename_pattern")]
    pub filename_pattern: String,
}

fn default_filename_pattern() -> String {
    r"PRV-[^-]+-([^-]+)-[^-]+-annotations\.xml$".to_string()
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self {
            mode: ScrubMode::default(),
            metadata_consistency: MetadataConsistency::default(),
            filename_pattern: default_filename_pattern(),
        }
    }
}

impl AnnotationConfig {
    fn validate(&self) -> Result<()> {
        let re = regex::Regex::new(&self.filename_pattern).map_err(|e| {
            EdfveilError::Configuration(format!(
                "invalid annotations.filename_pattern: {e}"
            ))
        })?;
        if re.captures_len() < 2 {
            return Err(EdfveilError::Configuration(
                "annotations.filename_pattern needs one capture group for the patient identity"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Structured audit log settings (the CSV reports are always written)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable the JSONL audit log
    #[serde(default)]
    pub enabled: bool,

    /// JSONL audit log path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/edfveil.jsonl")
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable file logging in addition to the console
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for rotated log files
    #[serde(default = "default_log_dir")]
    pub local_path: String,

    /// Rotation: daily or hourly
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

fn default_log_dir() -> String {
    "./logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_dir(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        if !["daily", "hourly"].contains(&self.local_rotation.as_str()) {
            return Err(EdfveilError::Configuration(format!(
                "invalid logging.local_rotation '{}', expected daily or hourly",
                self.local_rotation
            )));
        }
        Ok(())
    }
}
