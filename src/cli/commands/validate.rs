// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    ///
    /// Loads the configuration strictly (a missing file is an error here,
    /// unlike the processing commands) and prints the effective settings.
    pub fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        println!("Validating configuration: {config_path}");
        println!();

        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid");
                println!();
                println!("Application:");
                println!("  Name:      {}", config.application.name);
                println!("  Log level: {}", config.application.log_level);
                println!();
                println!("Annotations:");
                println!("  Mode:                 {:?}", config.annotations.mode);
                println!(
                    "  Metadata consistency: {:?}",
                    config.annotations.metadata_consistency
                );
                println!("  Filename pattern:     {}", config.annotations.filename_pattern);
                println!();
                println!("Audit:");
                println!("  Enabled:  {}", config.audit.enabled);
                println!("  Log path: {}", config.audit.log_path.display());
                println!();
                println!("Logging:");
                println!("  File logging: {}", config.logging.local_enabled);
                if config.logging.local_enabled {
                    println!("  Directory:    {}", config.logging.local_path);
                    println!("  Rotation:     {}", config.logging.local_rotation);
                }
                Ok(0)
            }
            Err(e) => {
                eprintln!("Configuration is invalid: {e}");
                Ok(2)
            }
        }
    }
}
