// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! EDF header byte layout
//!
//! The EDF header is a fixed-layout sequence of ASCII fields at the start of
//! every recording file. Only the fields this tool touches are named here;
//! byte offsets and widths are format constants and must be preserved
//! exactly on rewrite.
//!
//! Layout of the first 256 bytes:
//! - bytes 0..8    version
//! - bytes 8..88   local patient identification (space padded)
//! - bytes 88..168 local recording identification
//! - bytes 168..176 startdate, `dd.mm.yy`
//! - bytes 176..184 starttime, `hh.mm.ss`

use std::ops::Range;

/// Minimum byte length of a valid EDF header
pub const MIN_HEADER_LEN: usize = 256;

/// Local patient identification field
pub const PATIENT_FIELD: Range<usize> = 8..88;

/// Startdate field, `dd.mm.yy`
pub const START_DATE_FIELD: Range<usize> = 168..176;

/// Starttime field, `hh.mm.ss`
pub const START_TIME_FIELD: Range<usize> = 176..184;

/// Width of the startdate field in bytes
pub const DATE_FIELD_LEN: usize = 8;

/// Two-digit years at or above this value belong to the 1900s
///
/// EDF startdates are representable from 1985 through 2084; `85` means 1985
/// and `84` means 2084.
pub const YEAR_PIVOT: u32 = 85;

/// First startdate year representable in `dd.mm.yy`
pub const MIN_YEAR: i32 = 1985;

/// Last startdate year representable in `dd.mm.yy`
pub const MAX_YEAR: i32 = 2084;
