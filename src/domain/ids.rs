// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Domain identifier types with validation
//!
//! The patient identifier is the sole join key between header-stage and
//! annotation-stage processing, so it gets a newtype with validation rather
//! than a bare `String`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Patient identifier newtype wrapper
///
/// Extracted from the local-patient-identification field of an EDF header
/// or from an annotation filename. Stable and comparable; all files carrying
/// the same identifier receive the identical day-offset.
///
/// # Examples
///
/// ```
/// use edfveil::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let patient_id = PatientId::from_str("5WPR").unwrap();
/// assert_eq!(patient_id.as_str(), "5WPR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    ///
    /// Leading/trailing whitespace is trimmed, since EDF pads the patient
    /// field with spaces to its fixed width.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the identifier is empty after trimming.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err("Patient identifier cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
