// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Batch run summary
//!
//! Per-file failures never abort a batch; what happened across the whole
//! run is collected here and printed by the CLI.

use std::time::Duration;

/// One per-file error captured during a run
#[derive(Debug, Clone)]
pub struct FileError {
    pub file: String,
    pub message: String,
}

/// Summary of one batch run
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Files considered by the run
    pub total_files: usize,
    /// Files fully processed and written out
    pub succeeded: usize,
    /// Files that failed with a file-scoped error
    pub failed: usize,
    /// Files skipped before processing (e.g. identity not extractable)
    pub skipped: usize,
    /// Wall-clock duration of the run
    pub duration: Duration,
    /// Per-file errors, in processing order
    pub errors: Vec<FileError>,
}

impl RunSummary {
    /// Creates an empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a successful file
    pub fn add_success(&mut self) {
        self.total_files += 1;
        self.succeeded += 1;
    }

    /// Records a failed file
    pub fn add_failure(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.total_files += 1;
        self.failed += 1;
        self.errors.push(FileError {
            file: file.into(),
            message: message.into(),
        });
    }

    /// Records a skipped file
    pub fn add_skip(&mut self) {
        self.total_files += 1;
        self.skipped += 1;
    }

    /// Exit code for the run: non-zero only when zero files succeeded
    ///
    /// Partial failure is a reporting concern (counts in the summary, rows
    /// in the report CSV), not a process-level failure.
    pub fn exit_code(&self) -> i32 {
        if self.total_files > 0 && self.succeeded == 0 {
            1
        } else {
            0
        }
    }

    /// Whether every considered file succeeded
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.skipped == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut summary = RunSummary::new();
        summary.add_success();
        summary.add_failure("a.edf", "too short");
        summary.add_skip();

        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors.len(), 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_exit_code_partial_failure_is_zero() {
        let mut summary = RunSummary::new();
        summary.add_success();
        summary.add_failure("a.edf", "boom");
        assert_eq!(summary.exit_code(), 0);
    }

    #[test]
    fn test_exit_code_total_failure_is_nonzero() {
        let mut summary = RunSummary::new();
        summary.add_failure("a.edf", "boom");
        summary.add_failure("b.edf", "boom");
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_exit_code_empty_run_is_zero() {
        assert_eq!(RunSummary::new().exit_code(), 0);
    }
}
