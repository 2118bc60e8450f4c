// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Core de-identification logic.
//!
//! # Modules
//!
//! - [`registry`] - one immutable random day-offset per patient identity
//! - [`header`] - EDF header date parsing, shifting, and rewrite
//! - [`annotation`] - annotation tree scrubbing and offset propagation
//! - [`audit`] - append-only original↔shifted audit trail and reports
//! - [`batch`] - per-run summary and exit-code policy
//!
//! # Workflow
//!
//! 1. **Registry**: assign (or load) one day-offset per unique identity,
//!    before any file is touched.
//! 2. **Headers**: rewrite each EDF startdate by the patient's offset,
//!    byte-length preserving, time-of-day untouched.
//! 3. **Annotations**: propagate the identical offset into the companion
//!    document and strip identifying metadata.
//! 4. **Audit**: every original↔shifted pair lands in the recorder and the
//!    stage reports; failures become report rows, not batch aborts.

pub mod annotation;
pub mod audit;
pub mod batch;
pub mod header;
pub mod registry;
