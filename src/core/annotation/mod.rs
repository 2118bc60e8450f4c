// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Annotation document processing
//!
//! # Modules
//!
//! - [`model`] - typed tree of tagged annotation entries
//! - [`xml`] - XML parse/serialize
//! - [`scrubber`] - metadata scrubbing, createTime handling, layer detection

pub mod model;
pub mod scrubber;
pub mod xml;

pub use model::{AnnotationDocument, AnnotationEntry, EntryKind};
pub use scrubber::{
    scrub, AnnotationScrub, MetadataConsistency, ScrubMode, ScrubOptions, ScrubOutcome,
};
pub use xml::{parse_document, write_document};
