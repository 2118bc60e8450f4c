// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for edfveil using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// edfveil - EEG recording de-identification tool
#[derive(Parser, Debug)]
#[command(name = "edfveil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "edfveil.toml", env = "EDFVEIL_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "EDFVEIL_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Assign random day-offsets to the patients found in a directory of EDF files
    Offsets(commands::offsets::OffsetsArgs),

    /// Shift the start date of EDF headers by each patient's registered offset
    ShiftHeaders(commands::shift::ShiftArgs),

    /// Scrub annotation documents and propagate patient offsets
    ScrubAnnotations(commands::scrub::ScrubArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_offsets() {
        let cli = Cli::parse_from(["edfveil", "offsets", "--input-dir", "in", "--output", "o.csv"]);
        assert_eq!(cli.config, "edfveil.toml");
        assert!(matches!(cli.command, Commands::Offsets(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from([
            "edfveil",
            "--config",
            "custom.toml",
            "validate-config",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_shift_headers() {
        let cli = Cli::parse_from([
            "edfveil",
            "shift-headers",
            "--offsets",
            "offsets.csv",
            "--input-dir",
            "in",
            "--output-dir",
            "out",
        ]);
        assert!(matches!(cli.command, Commands::ShiftHeaders(_)));
    }

    #[test]
    fn test_cli_parse_scrub_annotations_with_log_level() {
        let cli = Cli::parse_from([
            "edfveil",
            "--log-level",
            "debug",
            "scrub-annotations",
            "--offsets",
            "offsets.csv",
            "--input-dir",
            "in",
            "--output-dir",
            "out",
        ]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
        assert!(matches!(cli.command, Commands::ScrubAnnotations(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["edfveil", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
