// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Configuration management for edfveil.
//!
//! TOML-based configuration loading, parsing, and validation with:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - `EDFVEIL_*` environment overrides
//! - Default values for every optional setting
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [annotations]
//! mode = "remove"                 # or "shift"
//! metadata_consistency = "trust"  # or "strict"
//!
//! [audit]
//! enabled = true
//! log_path = "./audit/edfveil.jsonl"
//!
//! [logging]
//! local_enabled = true
//! local_path = "./logs"
//! local_rotation = "daily"
//! ```

pub mod loader;
pub mod schema;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    AnnotationConfig, ApplicationConfig, AuditConfig, EdfveilConfig, LoggingConfig,
};
