// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Structured audit log
//!
//! Optional line-per-entry JSON log, appended as entries are recorded.
//! Complements the end-of-run CSV reports with an as-it-happened trail.

use super::recorder::AuditEntry;
use crate::domain::{EdfveilError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Append-only JSONL audit log
pub struct AuditLog {
    log_path: PathBuf,
    enabled: bool,
}

impl AuditLog {
    /// Creates an audit log, ensuring the parent directory exists
    pub fn new(log_path: PathBuf, enabled: bool) -> Result<Self> {
        if enabled {
            if let Some(parent) = log_path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        EdfveilError::Audit(format!(
                            "failed to create audit log directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
        }
        Ok(Self { log_path, enabled })
    }

    /// Appends one entry as a JSON line; a no-op when disabled
    pub fn append(&self, entry: &AuditEntry) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                EdfveilError::Audit(format!(
                    "failed to open audit log {}: {e}",
                    self.log_path.display()
                ))
            })?;

        let line = serde_json::to_string(entry)
            .map_err(|e| EdfveilError::Audit(format!("failed to serialize audit entry: {e}")))?;
        writeln!(file, "{line}")
            .map_err(|e| EdfveilError::Audit(format!("failed to write audit entry: {e}")))?;

        Ok(())
    }
}
