// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Init command implementation
//!
//! Writes a starter configuration file with every section spelled out so
//! that new deployments edit values instead of guessing key names.

use clap::Args;
use std::path::PathBuf;

const TEMPLATE: &str = r#"# edfveil configuration

[application]
name = "edfveil"
# trace, debug, info, warn, error
log_level = "info"

[annotations]
# createTime handling: "remove" deletes the attribute, "shift" moves its
# date by the patient's day-offset while keeping the clock time
mode = "remove"
# "trust" accepts the first annotator/creatorId seen per document;
# "strict" flags later values that differ
metadata_consistency = "trust"
# The first capture group is the patient identity
filename_pattern = 'PRV-[^-]+-([^-]+)-[^-]+-annotations\.xml$'

[audit]
# Line-per-entry JSON audit log, in addition to the CSV reports
enabled = false
log_path = "./audit/edfveil.jsonl"

[logging]
# File logging in addition to the console
local_enabled = false
local_path = "./logs"
# daily or hourly
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path for the new configuration file
    #[arg(long, default_value = "edfveil.toml")]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub fn execute(&self) -> anyhow::Result<i32> {
        if self.output.exists() && !self.force {
            eprintln!(
                "{} already exists, pass --force to overwrite",
                self.output.display()
            );
            return Ok(1);
        }

        std::fs::write(&self.output, TEMPLATE)?;
        println!("Wrote configuration template to {}", self.output.display());
        Ok(0)
    }
}
