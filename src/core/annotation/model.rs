// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Typed annotation document tree
//!
//! Annotation documents are a flat tree: a root element holding annotation
//! entries. Entries are tagged as regular annotations or "Start Recording"
//! markers, with explicit presence/absence for the attributes this tool
//! cares about. Attributes it does not interpret travel through untouched.

use serde::Serialize;

/// A parsed annotation document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDocument {
    /// Root element name, usually `annotations`
    pub root_name: String,
    /// Entries in document order
    pub entries: Vec<AnnotationEntry>,
}

impl AnnotationDocument {
    /// Number of entries carrying a creation timestamp
    pub fn create_time_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.create_time.is_some())
            .count()
    }
}

/// What kind of entry an annotation element represents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EntryKind {
    /// An ordinary annotation
    Regular,
    /// A "Start Recording" marker carrying an elapsed-microseconds value
    ///
    /// The microseconds value is consumed by an adjacent collaborator; here
    /// it is pass-through only.
    StartMarker { elapsed_usecs: Option<i64> },
}

/// One annotation entry
///
/// `extra_attributes` preserves, in document order, every attribute the
/// model does not give a typed field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationEntry {
    pub kind: EntryKind,
    /// Layer grouping value; more than one distinct layer per document is a
    /// structural anomaly that gets flagged, not corrected
    pub layer: Option<String>,
    /// Authoring timestamp, ISO 8601 (e.g. `2020-08-20T18:24:35Z`)
    pub create_time: Option<String>,
    /// Source actor identifier
    pub annotator: Option<String>,
    /// Creator identifier
    pub creator_id: Option<String>,
    /// Channel list from a nested `<channels>` block
    pub channels: Vec<String>,
    pub extra_attributes: Vec<(String, String)>,
    /// Character content of the entry element
    pub text: Option<String>,
}

impl AnnotationEntry {
    /// An empty regular annotation entry
    pub fn new(kind: EntryKind) -> Self {
        Self {
            kind,
            layer: None,
            create_time: None,
            annotator: None,
            creator_id: None,
            channels: Vec::new(),
            extra_attributes: Vec::new(),
            text: None,
        }
    }

    /// Whether this entry is a "Start Recording" marker
    pub fn is_start_marker(&self) -> bool {
        matches!(self.kind, EntryKind::StartMarker { .. })
    }
}
