// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Annotation scrubbing and offset propagation
//!
//! Walks every entry of an annotation document exactly once, strips
//! identifying metadata, handles creation timestamps per the configured
//! mode, and detects multi-layer documents for manual follow-up.

use super::model::AnnotationDocument;
use crate::core::registry::DayOffset;
use crate::domain::{EdfveilError, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// How creation timestamps are handled
///
/// Deletion is the default: once established that createTime reflects
/// annotation authoring time rather than recording time, removing it is the
/// safer de-identification. Shifting is a distinct, explicitly configured
/// mode and is never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrubMode {
    /// Delete the createTime attribute entirely
    #[default]
    Remove,
    /// Shift the createTime date by the patient day-offset, clock time kept
    Shift,
}

/// Whether repeated annotator/creatorId values are checked against the
/// first-seen value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataConsistency {
    /// Trust the first occurrence; later occurrences are not compared
    #[default]
    Trust,
    /// Compare later occurrences against the first and flag mismatches
    Strict,
}

/// Options controlling one scrub pass
#[derive(Debug, Clone, Default)]
pub struct ScrubOptions {
    pub mode: ScrubMode,
    pub metadata_consistency: MetadataConsistency,
    /// Recording start date, when known; in shift mode a first createTime
    /// on a different date is logged (the shift is applied regardless)
    pub expected_original_date: Option<NaiveDate>,
}

/// Per-document findings from one scrub pass
#[derive(Debug, Clone, Serialize)]
pub struct AnnotationScrub {
    /// First-seen source actor identifier (canonical audit value)
    pub annotator: Option<String>,
    /// First-seen creator identifier (canonical audit value)
    pub creator_id: Option<String>,
    /// Distinct layer values observed, in sorted order
    pub layers: Vec<String>,
    /// More than one distinct layer in the same document
    pub more_than_one_layer: bool,
    /// Set in strict mode when a later annotator/creatorId differed from
    /// the first-seen value
    pub metadata_mismatch: bool,
    pub create_times_removed: usize,
    pub create_times_shifted: usize,
    /// Elapsed microseconds of the first "Start Recording" marker,
    /// pass-through for the collaborator that consumes it
    pub start_marker_usecs: Option<i64>,
}

/// Result of scrubbing one document
#[derive(Debug, Clone)]
pub struct ScrubOutcome {
    pub document: AnnotationDocument,
    pub audit: AnnotationScrub,
    /// True when more than one distinct layer was observed, a reporting
    /// concern for manual review rather than a hard error
    pub layer_flag: bool,
}

/// Scrubs a document with the given patient offset
///
/// The input document is never mutated; a derived copy is returned. Every
/// entry, regular or start-marker, loses its annotator, creatorId, and
/// channel list unconditionally. createTime is deleted or shifted per
/// options.
///
/// # Errors
///
/// Returns `EdfveilError::MalformedDocument` if shift mode meets a
/// createTime that does not parse as an ISO 8601 timestamp.
pub fn scrub(
    doc: &AnnotationDocument,
    offset: DayOffset,
    options: &ScrubOptions,
) -> Result<ScrubOutcome> {
    let mut layers: BTreeSet<String> = BTreeSet::new();
    let mut audit = AnnotationScrub {
        annotator: None,
        creator_id: None,
        layers: Vec::new(),
        more_than_one_layer: false,
        metadata_mismatch: false,
        create_times_removed: 0,
        create_times_shifted: 0,
        start_marker_usecs: None,
    };

    let mut entries = Vec::with_capacity(doc.entries.len());
    let mut first_create_time_seen = false;

    for entry in &doc.entries {
        if let Some(layer) = &entry.layer {
            layers.insert(layer.clone());
        }

        capture_metadata(
            &mut audit.annotator,
            entry.annotator.as_deref(),
            options.metadata_consistency,
            &mut audit.metadata_mismatch,
            "annotator",
        );
        capture_metadata(
            &mut audit.creator_id,
            entry.creator_id.as_deref(),
            options.metadata_consistency,
            &mut audit.metadata_mismatch,
            "creatorId",
        );

        if audit.start_marker_usecs.is_none() {
            if let super::model::EntryKind::StartMarker { elapsed_usecs } = &entry.kind {
                audit.start_marker_usecs = *elapsed_usecs;
            }
        }

        let mut scrubbed = entry.clone();
        scrubbed.annotator = None;
        scrubbed.creator_id = None;
        scrubbed.channels.clear();

        if let Some(create_time) = entry.create_time.as_deref() {
            match options.mode {
                ScrubMode::Remove => {
                    scrubbed.create_time = None;
                    audit.create_times_removed += 1;
                }
                ScrubMode::Shift => {
                    let shifted =
                        shift_create_time(create_time, offset, &mut first_create_time_seen, options)?;
                    scrubbed.create_time = Some(shifted);
                    audit.create_times_shifted += 1;
                }
            }
        }

        entries.push(scrubbed);
    }

    audit.more_than_one_layer = layers.len() > 1;
    audit.layers = layers.into_iter().collect();
    let layer_flag = audit.more_than_one_layer;

    if layer_flag {
        tracing::warn!(
            layers = ?audit.layers,
            "Document spans more than one annotation layer, flagging for manual review"
        );
    }

    Ok(ScrubOutcome {
        document: AnnotationDocument {
            root_name: doc.root_name.clone(),
            entries,
        },
        audit,
        layer_flag,
    })
}

fn capture_metadata(
    canonical: &mut Option<String>,
    observed: Option<&str>,
    consistency: MetadataConsistency,
    mismatch: &mut bool,
    field: &str,
) {
    let Some(observed) = observed else {
        return;
    };
    match canonical {
        None => *canonical = Some(observed.to_string()),
        Some(first) => {
            if consistency == MetadataConsistency::Strict && first != observed {
                tracing::warn!(
                    field,
                    first_seen = %first,
                    observed = %observed,
                    "Metadata differs from first-seen value within one document"
                );
                *mismatch = true;
            }
        }
    }
}

/// Shifts one createTime value by the patient offset, preserving clock time
///
/// Accepts `YYYY-MM-DDTHH:MM:SS` with an optional trailing `Z`, which is
/// kept on output when present.
fn shift_create_time(
    raw: &str,
    offset: DayOffset,
    first_seen: &mut bool,
    options: &ScrubOptions,
) -> Result<String> {
    let (stamp, zulu) = match raw.strip_suffix('Z') {
        Some(stripped) => (stripped, true),
        None => (raw, false),
    };

    let parsed = NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S").map_err(|e| {
        EdfveilError::MalformedDocument(format!("createTime '{raw}' is not ISO 8601: {e}"))
    })?;

    if !*first_seen {
        *first_seen = true;
        if let Some(expected) = options.expected_original_date {
            if parsed.date() != expected {
                tracing::warn!(
                    create_time_date = %parsed.date(),
                    recording_start = %expected,
                    "First createTime date differs from the recording start date; shifting anyway"
                );
            }
        }
    }

    let shifted = parsed
        .checked_add_signed(Duration::days(i64::from(offset.days())))
        .ok_or_else(|| {
            EdfveilError::MalformedDocument(format!(
                "createTime '{raw}' cannot be shifted by {} days",
                offset.days()
            ))
        })?;

    let mut formatted = shifted.format("%Y-%m-%dT%H:%M:%S").to_string();
    if zulu {
        formatted.push('Z');
    }
    Ok(formatted)
}
