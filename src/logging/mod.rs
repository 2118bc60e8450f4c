// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Logging and observability
//!
//! Structured logging with configurable log levels, optional JSON file
//! output with rotation, and console output for interactive use.
//!
//! # Example
//!
//! ```no_run
//! use edfveil::logging::init_logging;
//! use edfveil::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};
