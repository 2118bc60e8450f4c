// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! # edfveil - EEG Recording De-identification
//!
//! edfveil de-identifies clinical EEG recordings for research use. It shifts
//! the start date embedded in EDF file headers by a random per-patient
//! day-offset and scrubs the matching annotation XML exports, so that the
//! two artifacts of one recording stay temporally consistent while the real
//! recording dates are gone.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Assigning** one random day-offset per patient identity, stable across
//!   every file belonging to that patient
//! - **Shifting** EDF header start dates with full calendar rollover, at the
//!   exact byte offsets and field widths the format fixes
//! - **Scrubbing** annotation documents: annotator, creator, and channel
//!   metadata removed, creation timestamps deleted or shifted by the same
//!   offset
//! - **Auditing** every processed file into reviewable CSV reports and an
//!   optional JSONL trail
//!
//! ## Architecture
//!
//! edfveil follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (offset registry, header codec, annotation
//!   scrubbing, audit)
//! - [`domain`] - Core domain types and the error taxonomy
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use edfveil::core::header::{shift_start_date, HeaderRecord};
//! use edfveil::core::registry::load_registry;
//! use edfveil::domain::PatientId;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = load_registry("random_number_output.csv")?;
//!
//!     let bytes = std::fs::read("recording.edf")?;
//!     let header = HeaderRecord::from_bytes(bytes)?;
//!     let patient_id = header.patient_id()?;
//!
//!     let offset = registry.offset_for(&patient_id)?;
//!     let (shifted, shift) = shift_start_date(&header, offset)?;
//!
//!     println!("{} -> {}", shift.original_date, shift.new_date);
//!     std::fs::write("shifted.edf", shifted.as_bytes())?;
//!     Ok(())
//! }
//! ```
//!
//! ## Safety Model
//!
//! Every error is file-scoped: one malformed recording never aborts the
//! batch. Failures surface as rows in the audit reports, and a run exits
//! non-zero only when no file succeeded at all.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
