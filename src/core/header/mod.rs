// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! EDF header parsing and date shifting
//!
//! # Modules
//!
//! - [`layout`] - fixed byte offsets and widths of the EDF header
//! - [`codec`] - parse, shift, and width-preserving re-serialize

pub mod codec;
pub mod layout;

pub use codec::{shift_start_date, HeaderRecord, HeaderShift};
