// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::EdfveilConfig;
use crate::core::annotation::{MetadataConsistency, ScrubMode};
use crate::domain::errors::EdfveilError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (`${VAR}` syntax)
/// 3. Parses the TOML into [`EdfveilConfig`]
/// 4. Applies environment variable overrides (`EDFVEIL_*` prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns `EdfveilError::Configuration` if the file cannot be read, TOML
/// parsing fails, a referenced environment variable is unset, or validation
/// fails.
pub fn load_config(path: impl AsRef<Path>) -> Result<EdfveilConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(EdfveilError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        EdfveilError::Configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: EdfveilConfig = toml::from_str(&contents)
        .map_err(|e| EdfveilError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;
    config.validate()?;

    Ok(config)
}

/// Loads configuration, falling back to defaults when the file is absent
///
/// Commands use this so a bare invocation works without a config file;
/// `validate-config` uses the strict [`load_config`] instead.
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<EdfveilConfig> {
    let path = path.as_ref();
    if path.exists() {
        load_config(path)
    } else {
        tracing::debug!(path = %path.display(), "No configuration file, using defaults");
        let mut config = EdfveilConfig::default();
        apply_env_overrides(&mut config)?;
        config.validate()?;
        Ok(config)
    }
}

/// Substitutes environment variables in the format `${VAR_NAME}`
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();
    let mut result = String::new();
    let mut missing_vars = Vec::new();

    // Process line by line to skip comments
    for line in input.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{}}}", var_name);
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.contains(&var_name.to_string()) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(EdfveilError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the `EDFVEIL_*` prefix
fn apply_env_overrides(config: &mut EdfveilConfig) -> Result<()> {
    if let Ok(val) = std::env::var("EDFVEIL_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("EDFVEIL_ANNOTATIONS_MODE") {
        config.annotations.mode = match val.to_lowercase().as_str() {
            "remove" => ScrubMode::Remove,
            "shift" => ScrubMode::Shift,
            _ => {
                return Err(EdfveilError::Configuration(format!(
                    "Invalid EDFVEIL_ANNOTATIONS_MODE: {val}"
                )))
            }
        };
    }

    if let Ok(val) = std::env::var("EDFVEIL_ANNOTATIONS_METADATA_CONSISTENCY") {
        config.annotations.metadata_consistency = match val.to_lowercase().as_str() {
            "trust" => MetadataConsistency::Trust,
            "strict" => MetadataConsistency::Strict,
            _ => {
                return Err(EdfveilError::Configuration(format!(
                    "Invalid EDFVEIL_ANNOTATIONS_METADATA_CONSISTENCY: {val}"
                )))
            }
        };
    }

    if let Ok(val) = std::env::var("EDFVEIL_AUDIT_ENABLED") {
        config.audit.enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("EDFVEIL_AUDIT_LOG_PATH") {
        config.audit.log_path = val.into();
    }

    if let Ok(val) = std::env::var("EDFVEIL_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("EDFVEIL_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }

    Ok(())
}
