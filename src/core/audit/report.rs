// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! CSV report generation
//!
//! Renders the audit trail as validation CSVs, one per stage. Failed files
//! appear as rows with a non-success status so that a reviewer sees the
//! whole batch in one place.

use super::recorder::{AuditEntry, AuditStage};
use crate::domain::{EdfveilError, Result};
use serde::Serialize;
use std::path::Path;

const DATE_FMT: &str = "%Y-%m-%d";
const TIME_FMT: &str = "%H:%M:%S";

#[derive(Debug, Serialize)]
struct HeaderRow {
    edf_file: String,
    patient_identifier: String,
    original_startdate: String,
    original_starttime: String,
    new_startdate: String,
    new_starttime: String,
    random_days_offset: String,
    status: String,
    error_message: String,
}

#[derive(Debug, Serialize)]
struct AnnotationRow {
    xml_file: String,
    patient_identifier: String,
    annotator: String,
    creator_id: String,
    layers: String,
    more_than_one_layer: String,
    metadata_mismatch: String,
    create_times_removed: String,
    create_times_shifted: String,
    start_marker_usecs: String,
    status: String,
    error_message: String,
}

fn yes_no(value: bool) -> String {
    if value { "yes" } else { "no" }.to_string()
}

/// Writes the header-stage report CSV
///
/// One row per header-stage entry, in audit insertion order.
pub fn write_header_report(entries: &[AuditEntry], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;

    for entry in entries.iter().filter(|e| e.stage() == AuditStage::Header) {
        let row = match entry {
            AuditEntry::Header(h) => HeaderRow {
                edf_file: h.file.clone(),
                patient_identifier: h.patient_id.to_string(),
                original_startdate: h.original_date.format(DATE_FMT).to_string(),
                original_starttime: h.original_time.format(TIME_FMT).to_string(),
                new_startdate: h.new_date.format(DATE_FMT).to_string(),
                // time-of-day is invariant under shifting
                new_starttime: h.original_time.format(TIME_FMT).to_string(),
                random_days_offset: h.offset_days.to_string(),
                status: "success".to_string(),
                error_message: String::new(),
            },
            AuditEntry::Failure(f) => HeaderRow {
                edf_file: f.file.clone(),
                patient_identifier: f
                    .patient_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                original_startdate: String::new(),
                original_starttime: String::new(),
                new_startdate: String::new(),
                new_starttime: String::new(),
                random_days_offset: String::new(),
                status: "failed".to_string(),
                error_message: f.error.clone(),
            },
            AuditEntry::Annotation(_) => continue,
        };
        writer.serialize(row)?;
    }

    writer.flush().map_err(|e| EdfveilError::Audit(e.to_string()))?;
    Ok(())
}

/// Writes the annotation-stage report CSV
pub fn write_annotation_report(entries: &[AuditEntry], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let mut writer = csv::Writer::from_path(path)?;

    for entry in entries
        .iter()
        .filter(|e| e.stage() == AuditStage::Annotation)
    {
        let row = match entry {
            AuditEntry::Annotation(a) => AnnotationRow {
                xml_file: a.file.clone(),
                patient_identifier: a.patient_id.to_string(),
                annotator: a.scrub.annotator.clone().unwrap_or_default(),
                creator_id: a.scrub.creator_id.clone().unwrap_or_default(),
                layers: a.scrub.layers.join(";"),
                more_than_one_layer: yes_no(a.scrub.more_than_one_layer),
                metadata_mismatch: yes_no(a.scrub.metadata_mismatch),
                create_times_removed: a.scrub.create_times_removed.to_string(),
                create_times_shifted: a.scrub.create_times_shifted.to_string(),
                start_marker_usecs: a
                    .scrub
                    .start_marker_usecs
                    .map(|u| u.to_string())
                    .unwrap_or_default(),
                status: "success".to_string(),
                error_message: String::new(),
            },
            AuditEntry::Failure(f) => AnnotationRow {
                xml_file: f.file.clone(),
                patient_identifier: f
                    .patient_id
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                annotator: String::new(),
                creator_id: String::new(),
                layers: String::new(),
                more_than_one_layer: String::new(),
                metadata_mismatch: String::new(),
                create_times_removed: String::new(),
                create_times_shifted: String::new(),
                start_marker_usecs: String::new(),
                status: "failed".to_string(),
                error_message: f.error.clone(),
            },
            AuditEntry::Header(_) => continue,
        };
        writer.serialize(row)?;
    }

    writer.flush().map_err(|e| EdfveilError::Audit(e.to_string()))?;
    Ok(())
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::annotation::AnnotationScrub;
    use crate::core::audit::recorder::{AnnotationAudit, FileFailure, HeaderAudit};
    use crate::domain::PatientId;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    fn sample_entries() -> Vec<AuditEntry> {
        vec![
            AuditEntry::Header(HeaderAudit {
                file: "rec1.edf".to_string(),
                patient_id: PatientId::new("5WPR").unwrap(),
                original_date: NaiveDate::from_ymd_opt(2019, 3, 1).unwrap(),
                original_time: NaiveTime::from_hms_opt(8, 15, 30).unwrap(),
                offset_days: 37,
                new_date: NaiveDate::from_ymd_opt(2019, 4, 7).unwrap(),
                start_marker_usecs: None,
            }),
            AuditEntry::Failure(FileFailure {
                file: "rec2.edf".to_string(),
                patient_id: None,
                stage: AuditStage::Header,
                error: "file is 100 bytes".to_string(),
            }),
            AuditEntry::Annotation(AnnotationAudit {
                file: "rec1-annotations.xml".to_string(),
                patient_id: PatientId::new("5WPR").unwrap(),
                scrub: AnnotationScrub {
                    annotator: Some("tech01".to_string()),
                    creator_id: Some("u-17".to_string()),
                    layers: vec!["1".to_string(), "2".to_string()],
                    more_than_one_layer: true,
                    metadata_mismatch: false,
                    create_times_removed: 2,
                    create_times_shifted: 0,
                    start_marker_usecs: Some(1_500_000),
                },
            }),
        ]
    }

    #[test]
    fn test_header_report_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("datetime_edf.csv");
        write_header_report(&sample_entries(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(
            lines.next().unwrap(),
            "edf_file,patient_identifier,original_startdate,original_starttime,\
             new_startdate,new_starttime,random_days_offset,status,error_message"
        );
        assert_eq!(
            lines.next().unwrap(),
            "rec1.edf,5WPR,2019-03-01,08:15:30,2019-04-07,08:15:30,37,success,"
        );
        let failure = lines.next().unwrap();
        assert!(failure.starts_with("rec2.edf,"));
        assert!(failure.contains("failed"));
        // annotation entries never leak into the header report
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_annotation_report_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("validation_edf_xml.csv");
        write_annotation_report(&sample_entries(), &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let data_line = content.lines().nth(1).unwrap();
        assert!(data_line.starts_with("rec1-annotations.xml,5WPR,tech01,u-17,1;2,yes,no,2,0"));
    }

    #[test]
    fn test_reports_create_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/reports/out.csv");
        write_header_report(&sample_entries(), &path).unwrap();
        assert!(path.exists());
    }
}
