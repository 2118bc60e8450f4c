// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Scrub-annotations command implementation
//!
//! Walks a directory of annotation XML files, derives the patient identity
//! from each filename, scrubs identifying metadata, applies the registered
//! day-offset to creation timestamps when shift mode is configured, and
//! emits the annotation audit report.

use crate::cli::commands::{files_with_extension, print_summary};
use crate::config::load_config_or_default;
use crate::core::annotation::{parse_document, scrub, write_document, ScrubMode, ScrubOptions};
use crate::core::audit::{
    write_annotation_report, AnnotationAudit, AuditEntry, AuditLog, AuditRecorder, AuditStage,
    FileFailure,
};
use crate::core::batch::RunSummary;
use crate::core::registry::{load_registry, OffsetRegistry};
use crate::domain::{EdfveilError, PatientId};
use clap::Args;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the scrub-annotations command
#[derive(Args, Debug)]
pub struct ScrubArgs {
    /// Directory containing annotation XML files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Directory the scrubbed copies are written to
    #[arg(long)]
    pub output_dir: PathBuf,

    /// Offset registry CSV produced by the offsets command
    #[arg(long)]
    pub offsets: PathBuf,

    /// Output path for the annotation audit report CSV
    #[arg(long, default_value = "annotation_audit.csv")]
    pub report: PathBuf,

    /// Override the configured createTime mode (remove or shift)
    #[arg(long)]
    pub mode: Option<String>,

    /// Header report CSV from shift-headers; in shift mode, createTime
    /// dates are checked against each patient's original start date
    #[arg(long)]
    pub header_report: Option<PathBuf>,

    /// Overwrite files already present in the output directory
    #[arg(long)]
    pub force: bool,
}

impl ScrubArgs {
    /// Execute the scrub-annotations command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = load_config_or_default(config_path)?;
        let started = Instant::now();

        let mode = match self.mode.as_deref() {
            None => config.annotations.mode,
            Some("remove") => ScrubMode::Remove,
            Some("shift") => ScrubMode::Shift,
            Some(other) => {
                anyhow::bail!("invalid --mode '{other}', expected remove or shift");
            }
        };
        let options = ScrubOptions {
            mode,
            metadata_consistency: config.annotations.metadata_consistency,
            expected_original_date: None,
        };
        let original_dates = match &self.header_report {
            Some(path) => load_original_dates(path)?,
            None => BTreeMap::new(),
        };
        let pattern = Regex::new(&config.annotations.filename_pattern).map_err(|e| {
            anyhow::anyhow!("invalid annotations.filename_pattern: {e}")
        })?;

        let registry = load_registry(&self.offsets)?;
        tracing::info!(
            identities = registry.len(),
            registry = %self.offsets.display(),
            "Loaded offset registry"
        );

        let files = files_with_extension(&self.input_dir, "xml")?;
        if files.is_empty() {
            eprintln!("No XML files found in {}", self.input_dir.display());
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

            let Some(patient_id) = identity_from_name(&pattern, &file_name) else {
                tracing::warn!(file = %file_name, "Filename does not match the annotation pattern, skipping");
                summary.add_skip();
                continue;
            };

            let destination = self.output_dir.join(&file_name);
            if destination.exists() && !self.force {
                tracing::warn!(file = %file_name, "Output already exists, skipping");
                summary.add_skip();
                continue;
            }

            let mut file_options = options.clone();
            file_options.expected_original_date = original_dates.get(&patient_id).copied();

            match scrub_one(path, &destination, &patient_id, &registry, &file_options) {
                Ok(entry) => {
                    tracing::info!(
                        file = %file_name,
                        patient = %entry.patient_id,
                        removed = entry.scrub.create_times_removed,
                        shifted = entry.scrub.create_times_shifted,
                        "Annotations scrubbed"
                    );
                    recorder.record(AuditEntry::Annotation(entry));
                    summary.add_success();
                }
                Err(e) => {
                    tracing::error!(file = %file_name, error = %e, "Annotation scrub failed");
                    summary.add_failure(file_name.clone(), e.to_string());
                    recorder.record(AuditEntry::Failure(FileFailure {
                        file: file_name,
                        patient_id: Some(patient_id),
                        stage: AuditStage::Annotation,
                        error: e.to_string(),
                    }));
                }
            }
        }

        for entry in recorder.entries() {
            audit_log.append(entry)?;
        }
        write_annotation_report(recorder.entries(), &self.report)?;
        tracing::info!(report = %self.report.display(), "Annotation audit report written");

        summary.duration = started.elapsed();
        print_summary("Annotation scrub", &summary);

        Ok(summary.exit_code())
    }
}

/// Loads patient -> original startdate pairs from a shift-headers report
///
/// Failed rows have an empty date column and are skipped; a patient seen
/// in several recordings keeps the first date (the warn is advisory).
fn load_original_dates(
    path: &Path,
) -> crate::domain::Result<BTreeMap<PatientId, chrono::NaiveDate>> {
    #[derive(serde::Deserialize)]
    struct ReportRow {
        patient_identifier: String,
        original_startdate: String,
    }

    let mut reader = csv::Reader::from_path(path).map_err(|e| {
        EdfveilError::InvalidInput(format!(
            "cannot read header report {}: {e}",
            path.display()
        ))
    })?;

    let mut dates = BTreeMap::new();
    for record in reader.deserialize::<ReportRow>() {
        let row = record.map_err(|e| {
            EdfveilError::InvalidInput(format!(
                "header report {}: {e}",
                path.display()
            ))
        })?;
        let Ok(patient_id) = PatientId::new(row.patient_identifier) else {
            continue;
        };
        let Ok(date) = row.original_startdate.parse::<chrono::NaiveDate>() else {
            continue;
        };
        dates.entry(patient_id).or_insert(date);
    }
    Ok(dates)
}

/// Extracts the patient identity from a filename via the first capture group
fn identity_from_name(pattern: &Regex, file_name: &str) -> Option<PatientId> {
    let captures = pattern.captures(file_name)?;
    let raw = captures.get(1)?.as_str();
    PatientId::new(raw).ok()
}

fn scrub_one(
    source: &Path,
    destination: &Path,
    patient_id: &PatientId,
    registry: &OffsetRegistry,
    options: &ScrubOptions,
) -> crate::domain::Result<AnnotationAudit> {
    let offset = registry.offset_for(patient_id)?;
    let xml = std::fs::read_to_string(source).map_err(EdfveilError::from)?;
    let document = parse_document(&xml)?;
    let outcome = scrub(&document, offset, options)?;
    std::fs::write(destination, write_document(&outcome.document)?)?;

    Ok(AnnotationAudit {
        file: source.display().to_string(),
        patient_id: patient_id.clone(),
        scrub: outcome.audit,
    })
}
