// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Shift-headers command implementation
//!
//! Rewrites the startdate of every EDF file in a directory by the
//! registered per-patient day-offset, writes the shifted copies to the
//! output directory, and emits the header audit report.

use crate::cli::commands::{files_with_extension, print_summary};
use crate::config::load_config_or_default;
use crate::core::audit::{
    write_header_report, AuditEntry, AuditLog, AuditRecorder, AuditStage, FileFailure,
    HeaderAudit,
};
use crate::core::batch::RunSummary;
use crate::core::header::{shift_start_date, HeaderRecord};
use crate::core::registry::{load_registry, OffsetRegistry};
use crate::domain::{EdfveilError, PatientId};
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the shift-headers command
#[derive(Args, Debug)]
pub struct ShiftArgs {
    /// Directory containing the original EDF files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory the shifted copies are written to
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Offset registry CSV produced by the offsets command
    #[arg(long)]
    pub offsets: PathBuf,

    /// Output path for the header audit report CSV
    #[arg(long, default_value = "edf_date_audit.csv")]
    pub report: PathBuf,

    /// Overwrite files already present in the output directory
    #[arg(long)]
    pub force: bool,
}

impl ShiftArgs {
    /// Execute the shift-headers command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config_or_default(config_path)?;
        let started = Instant::now();

        let registry = load_registry(&self.offsets)?;
        tracing::info!(
            identities = registry.len(),
            registry = %self.offsets.display(),
            "Loaded offset registry"
        );

        let files = files_with_extension(&self.input_dir, "edf")?;
        if files.is_empty() {
            eprintln!("No EDF files found in {}", self.input_dir.display());
            return Ok(1);
        }
        std::fs::create_dir_all(&self.output_dir)?;

        let audit_log = AuditLog::new(config.audit.log_path.clone(), config.audit.enabled)?;
        let mut recorder = AuditRecorder::new();
        let mut summary = RunSummary::new();

        for path in &files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            let destination = self.output_dir.join(&file_name);

            if destination.exists() && !self.force {
                tracing::warn!(file = %file_name, "Output already exists, skipping");
                summary.add_skip();
                continue;
            }

            match shift_one(path, &destination, &registry) {
                Ok(entry) => {
                    tracing::info!(
                        file = %file_name,
                        patient = %entry.patient_id,
                        offset_days = entry.offset_days,
                        "Header shifted"
                    );
                    recorder.record(AuditEntry::Header(entry));
                    summary.add_success();
                }
                Err((patient_id, e)) => {
                    tracing::error!(file = %file_name, error = %e, "Header shift failed");
                    summary.add_failure(file_name.clone(), e.to_string());
                    recorder.record(AuditEntry::Failure(FileFailure {
                        file: file_name,
                        patient_id,
                        stage: AuditStage::Header,
                        error: e.to_string(),
                    }));
                }
            }
        }

        for entry in recorder.entries() {
            audit_log.append(entry)?;
        }
        write_header_report(recorder.entries(), &self.report)?;
        tracing::info!(report = %self.report.display(), "Header audit report written");

        summary.duration = started.elapsed();
        print_summary("Header shift", &summary);

        Ok(summary.exit_code())
    }
}

/// Shifts a single file, pairing any error with the identity established
/// before the failure so the report can still name the patient
fn shift_one(
    source: &Path,
    destination: &Path,
    registry: &OffsetRegistry,
) -> std::result::Result<HeaderAudit, (Option<PatientId>, EdfveilError)> {
    let bytes = std::fs::read(source).map_err(|e| (None, EdfveilError::from(e)))?;
    let header = HeaderRecord::from_bytes(bytes).map_err(|e| (None, e))?;
    let patient_id = header.patient_id().map_err(|e| (None, e))?;

    let offset = registry
        .offset_for(&patient_id)
        .map_err(|e| (Some(patient_id.clone()), e))?;
    let (shifted, shift) =
        shift_start_date(&header, offset).map_err(|e| (Some(patient_id.clone()), e))?;

    std::fs::write(destination, shifted.as_bytes())
        .map_err(|e| (Some(patient_id.clone()), EdfveilError::from(e)))?;

    Ok(HeaderAudit {
        file: source.display().to_string(),
        patient_id,
        original_date: shift.original_date,
        original_time: shift.original_time,
        offset_days: shift.offset.days(),
        new_date: shift.new_date,
        start_marker_usecs: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::registry::{save_registry, DayOffset};
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_edf(patient: &str, date: &str) -> Vec<u8> {
        let mut bytes = vec![b' '; 300];
        bytes[8..8 + patient.len()].copy_from_slice(patient.as_bytes());
        bytes[168..176].copy_from_slice(date.as_bytes());
        bytes[176..184].copy_from_slice(b"08.15.30");
        bytes
    }

    fn registry_with(patient: &str, days: i32) -> OffsetRegistry {
        let mut map = BTreeMap::new();
        map.insert(
            PatientId::new(patient).unwrap(),
            DayOffset::new(days).unwrap(),
        );
        OffsetRegistry::from_map(map)
    }

    #[test]
    fn test_shift_one_rewrites_date() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("rec.edf");
        let destination = dir.path().join("out.edf");
        std::fs::write(&source, sample_edf("5WPR", "01.03.19")).unwrap();

        let entry = shift_one(&source, &destination, &registry_with("5WPR", 37)).unwrap();
        assert_eq!(entry.offset_days, 37);
        assert_eq!(entry.new_date.to_string(), "2019-04-07");

        let written = std::fs::read(&destination).unwrap();
        assert_eq!(&written[168..176], b"07.04.19");
        // starttime untouched
        assert_eq!(&written[176..184], b"08.15.30");
    }

    #[test]
    fn test_shift_one_unregistered_patient_keeps_identity() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("rec.edf");
        std::fs::write(&source, sample_edf("5Y4Z", "29.02.20")).unwrap();

        let err = shift_one(
            &source,
            &dir.path().join("out.edf"),
            &registry_with("5WPR", 37),
        )
        .unwrap_err();
        assert_eq!(err.0.unwrap().as_str(), "5Y4Z");
        assert!(matches!(err.1, EdfveilError::MissingOffset(_)));
    }

    #[test]
    fn test_execute_end_to_end() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in");
        let output = dir.path().join("out");
        std::fs::create_dir(&input).unwrap();
        std::fs::write(input.join("a.edf"), sample_edf("5Y4Z", "29.02.20")).unwrap();

        let offsets = dir.path().join("offsets.csv");
        save_registry(&registry_with("5Y4Z", -400), &offsets).unwrap();

        let args = ShiftArgs {
            input_dir: input,
            output_dir: output.clone(),
            offsets,
            report: dir.path().join("report.csv"),
            force: false,
        };
        let code = args.execute("no-such-config.toml").unwrap();
        assert_eq!(code, 0);

        let written = std::fs::read(output.join("a.edf")).unwrap();
        assert_eq!(&written[168..176], b"25.01.19");

        let report = std::fs::read_to_string(dir.path().join("report.csv")).unwrap();
        assert!(report.contains("5Y4Z"));
        assert!(report.contains("-400"));
        assert!(report.contains("success"));
    }
}
