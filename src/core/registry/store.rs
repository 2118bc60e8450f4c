// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! CSV persistence for the offset registry
//!
//! The registry travels between pipeline stages as a two-column CSV:
//! `patient_identifier,random_number`, one row per unique identity, the
//! offset as a signed integer string.

use super::{DayOffset, OffsetRegistry};
use crate::domain::{EdfveilError, PatientId, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct RegistryRow {
    patient_identifier: String,
    random_number: i32,
}

/// Loads an offset registry from a CSV file
///
/// # Errors
///
/// Returns `EdfveilError::InvalidInput` if the file is missing, a row fails
/// to parse, an identity is empty, an offset is out of range, or the same
/// identity appears twice with conflicting offsets.
pub fn load_registry(path: impl AsRef<Path>) -> Result<OffsetRegistry> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        EdfveilError::InvalidInput(format!("cannot read offset CSV {}: {e}", path.display()))
    })?;

    let mut offsets: BTreeMap<PatientId, DayOffset> = BTreeMap::new();
    for (index, record) in reader.deserialize::<RegistryRow>().enumerate() {
        let row = record.map_err(|e| {
            EdfveilError::InvalidInput(format!(
                "offset CSV {} row {}: {e}",
                path.display(),
                index + 1
            ))
        })?;
        let identity = PatientId::new(row.patient_identifier).map_err(EdfveilError::InvalidInput)?;
        let offset = DayOffset::new(row.random_number)?;

        if let Some(existing) = offsets.get(&identity) {
            if *existing != offset {
                return Err(EdfveilError::InvalidInput(format!(
                    "identity '{identity}' listed twice with conflicting offsets"
                )));
            }
        }
        offsets.insert(identity, offset);
    }

    tracing::debug!(
        path = %path.display(),
        identities = offsets.len(),
        "Loaded offset registry"
    );

    Ok(OffsetRegistry::from_map(offsets))
}

/// Writes the registry to a CSV file, one row per identity in identity order
pub fn save_registry(registry: &OffsetRegistry, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for (identity, offset) in registry.iter() {
        writer.serialize(RegistryRow {
            patient_identifier: identity.to_string(),
            random_number: offset.days(),
        })?;
    }
    writer.flush()?;

    tracing::debug!(
        path = %path.display(),
        identities = registry.len(),
        "Saved offset registry"
    );

    Ok(())
}
