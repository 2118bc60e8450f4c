// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Offsets command implementation
//!
//! Scans a directory of EDF files, collects the unique patient identities
//! from their headers, assigns one random day-offset per identity, and
//! writes the registry CSV consumed by the other commands.

use crate::cli::commands::{files_with_extension, print_summary};
use crate::config::load_config_or_default;
use crate::core::batch::RunSummary;
use crate::core::header::{layout, HeaderRecord};
use crate::core::registry::{save_registry, OffsetRegistry};
use crate::domain::PatientId;
use clap::Args;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Arguments for the offsets command
#[derive(Args, Debug)]
pub struct OffsetsArgs {
    /// Directory containing EDF files
    #[arg(long)]
    pub input_dir: PathBuf,

    /// Output path for the offset registry CSV
    #[arg(long, default_value = "random_number_output.csv")]
    pub output: PathBuf,
}

impl OffsetsArgs {
    /// Execute the offsets command
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let _config = load_config_or_default(config_path)?;
        let started = Instant::now();

        let files = files_with_extension(&self.input_dir, "edf")?;
        if files.is_empty() {
            eprintln!("No EDF files found in {}", self.input_dir.display());
            return Ok(1);
        }
        tracing::info!(count = files.len(), "Collecting patient identities");

        let mut summary = RunSummary::new();
        let mut identities: Vec<PatientId> = Vec::new();

        for path in &files {
            match read_identity(path) {
                Ok(identity) => {
                    tracing::debug!(file = %path.display(), patient = %identity, "Identity found");
                    identities.push(identity);
                    summary.add_success();
                }
                Err(e) => {
                    tracing::error!(file = %path.display(), error = %e, "Skipping unreadable header");
                    summary.add_failure(path.display().to_string(), e.to_string());
                }
            }
        }

        let mut registry = OffsetRegistry::new();
        registry.assign(identities)?;
        save_registry(&registry, &self.output)?;

        summary.duration = started.elapsed();
        print_summary("Offset assignment", &summary);
        println!(
            "  Registered {} unique identities to {}",
            registry.len(),
            self.output.display()
        );

        Ok(summary.exit_code())
    }
}

/// Reads just the fixed header of an EDF file and extracts the identity
fn read_identity(path: &Path) -> crate::domain::Result<PatientId> {
    let mut file = std::fs::File::open(path)?;
    let mut buffer = vec![0u8; layout::MIN_HEADER_LEN];
    file.read_exact(&mut buffer).map_err(|_| {
        crate::domain::EdfveilError::MalformedHeader(format!(
            "{}: shorter than the {}-byte EDF header",
            path.display(),
            layout::MIN_HEADER_LEN
        ))
    })?;
    HeaderRecord::from_bytes(buffer)?.patient_id()
}
