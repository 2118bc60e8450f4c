// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Patient-to-offset registry
//!
//! Maps each patient identity to one immutable random day-offset. The
//! registry is built once per run, before any file is processed, and is
//! read-only from then on: it is the only state shared across files.
//!
//! # Example
//!
//! ```
//! use edfveil::core::registry::OffsetRegistry;
//! use edfveil::domain::PatientId;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = OffsetRegistry::new();
//! let ids = vec![PatientId::new("5WPR")?, PatientId::new("5Y4Z")?];
//! registry.assign(ids)?;
//!
//! let offset = registry.offset_for(&PatientId::new("5WPR")?)?;
//! assert!(offset.days().abs() <= 1095);
//! # Ok(())
//! # }
//! ```

pub mod store;

pub use store::{load_registry, save_registry};

use crate::domain::{EdfveilError, PatientId, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Largest permitted day-offset magnitude (about three years)
pub const MAX_OFFSET_DAYS: i32 = 1095;

/// Signed day-offset applied to every date belonging to one patient
///
/// Always within `[-MAX_OFFSET_DAYS, MAX_OFFSET_DAYS]`; construction
/// enforces the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayOffset(i32);

impl DayOffset {
    /// Creates a day-offset, validating the permitted range
    ///
    /// # Errors
    ///
    /// Returns `EdfveilError::InvalidInput` if `days` falls outside
    /// `[-1095, 1095]`.
    pub fn new(days: i32) -> Result<Self> {
        if !(-MAX_OFFSET_DAYS..=MAX_OFFSET_DAYS).contains(&days) {
            return Err(EdfveilError::InvalidInput(format!(
                "day-offset {days} outside permitted range [-{MAX_OFFSET_DAYS}, {MAX_OFFSET_DAYS}]"
            )));
        }
        Ok(Self(days))
    }

    /// Returns the offset in days
    pub fn days(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for DayOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registry of day-offsets, one per unique patient identity
///
/// Offsets are assigned once and never reassigned within a run. Repeated
/// `assign` calls return the already-assigned offset for a known identity,
/// so assignment is order-independent and idempotent per identity.
#[derive(Debug, Default)]
pub struct OffsetRegistry {
    offsets: BTreeMap<PatientId, DayOffset>,
}

impl OffsetRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from an existing mapping (e.g. a loaded CSV)
    pub fn from_map(offsets: BTreeMap<PatientId, DayOffset>) -> Self {
        Self { offsets }
    }

    /// Assigns a uniformly random day-offset to each distinct identity
    ///
    /// Input identities are deduplicated before assignment. Identities that
    /// already hold an offset keep it; an offset is never reassigned.
    ///
    /// Returns the full mapping after assignment.
    pub fn assign<I>(&mut self, identities: I) -> Result<&BTreeMap<PatientId, DayOffset>>
    where
        I: IntoIterator<Item = PatientId>,
    {
        self.assign_with_rng(identities, &mut rand::thread_rng())
    }

    /// Assigns offsets drawing from the provided random source
    ///
    /// Split out from [`assign`](Self::assign) so tests can pass a seeded
    /// generator.
    pub fn assign_with_rng<I, R>(
        &mut self,
        identities: I,
        rng: &mut R,
    ) -> Result<&BTreeMap<PatientId, DayOffset>>
    where
        I: IntoIterator<Item = PatientId>,
        R: Rng + ?Sized,
    {
        for identity in identities {
            self.offsets.entry(identity).or_insert_with(|| {
                // gen_range over the closed range keeps both endpoints reachable
                DayOffset(rng.gen_range(-MAX_OFFSET_DAYS..=MAX_OFFSET_DAYS))
            });
        }
        Ok(&self.offsets)
    }

    /// Looks up the offset for a patient
    ///
    /// # Errors
    ///
    /// Returns `EdfveilError::MissingOffset` if the identity was never
    /// assigned; the file cannot be de-identified without one.
    pub fn offset_for(&self, identity: &PatientId) -> Result<DayOffset> {
        self.offsets
            .get(identity)
            .copied()
            .ok_or_else(|| EdfveilError::MissingOffset(identity.to_string()))
    }

    /// Iterates over (identity, offset) pairs in identity order
    pub fn iter(&self) -> impl Iterator<Item = (&PatientId, &DayOffset)> {
        self.offsets.iter()
    }

    /// Number of registered identities
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// Whether the registry holds no identities
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}
