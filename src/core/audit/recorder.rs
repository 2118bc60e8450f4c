// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Append-only audit recorder
//!
//! Every processed file yields one audit entry per stage, recording the
//! original and shifted values so the de-identification can be validated
//! afterwards. Entries are never mutated, merged, or deduplicated, and
//! insertion order is preserved for deterministic reports.

use crate::core::annotation::AnnotationScrub;
use crate::domain::PatientId;
use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

/// Which pipeline stage produced an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStage {
    Header,
    Annotation,
}

/// Original↔shifted values for one rewritten EDF header
#[derive(Debug, Clone, Serialize)]
pub struct HeaderAudit {
    pub file: String,
    pub patient_id: PatientId,
    pub original_date: NaiveDate,
    pub original_time: NaiveTime,
    pub offset_days: i32,
    pub new_date: NaiveDate,
    /// Sub-second correction supplied by an external collaborator feed;
    /// pass-through only
    pub start_marker_usecs: Option<i64>,
}

/// Findings for one scrubbed annotation document
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationAudit {
    pub file: String,
    pub patient_id: PatientId,
    #[serde(flatten)]
    pub scrub: AnnotationScrub,
}

/// A file that could not be processed
///
/// Failures surface through the report output rather than aborting the
/// batch, so they are first-class audit entries.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file: String,
    pub patient_id: Option<PatientId>,
    pub stage: AuditStage,
    pub error: String,
}

/// One audit entry, tagged by stage
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditEntry {
    Header(HeaderAudit),
    Annotation(AnnotationAudit),
    Failure(FileFailure),
}

impl AuditEntry {
    /// Source file the entry refers to
    pub fn file(&self) -> &str {
        match self {
            AuditEntry::Header(h) => &h.file,
            AuditEntry::Annotation(a) => &a.file,
            AuditEntry::Failure(f) => &f.file,
        }
    }

    /// Pipeline stage the entry belongs to
    pub fn stage(&self) -> AuditStage {
        match self {
            AuditEntry::Header(_) => AuditStage::Header,
            AuditEntry::Annotation(_) => AuditStage::Annotation,
            AuditEntry::Failure(f) => f.stage,
        }
    }

    /// Patient identity, when one was established before failure
    pub fn patient_id(&self) -> Option<&PatientId> {
        match self {
            AuditEntry::Header(h) => Some(&h.patient_id),
            AuditEntry::Annotation(a) => Some(&a.patient_id),
            AuditEntry::Failure(f) => f.patient_id.as_ref(),
        }
    }
}

/// Accumulates audit entries for the life of a run
#[derive(Debug, Default)]
pub struct AuditRecorder {
    entries: Vec<AuditEntry>,
}

impl AuditRecorder {
    /// Creates an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry; entries are immutable once recorded
    pub fn record(&mut self, entry: AuditEntry) {
        self.entries.push(entry);
    }

    /// All entries in insertion order
    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
