// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Audit trail
//!
//! # Modules
//!
//! - [`recorder`] - append-only, insertion-ordered entry accumulation
//! - [`report`] - end-of-run CSV reports per stage
//! - [`logger`] - optional JSONL line-per-entry log

pub mod logger;
pub mod recorder;
pub mod report;

pub use logger::AuditLog;
pub use recorder::{
    AnnotationAudit, AuditEntry, AuditRecorder, AuditStage, FileFailure, HeaderAudit,
};
pub use report::{write_annotation_report, write_header_report};
