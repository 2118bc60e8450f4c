// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Domain models and types for edfveil.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`])
//! - **Error types** ([`EdfveilError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! edfveil uses the newtype pattern for the patient identifier to keep the
//! join key between header and annotation processing from being confused
//! with free-form strings:
//!
//! ```rust
//! use edfveil::domain::PatientId;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let patient_id = PatientId::new("5WPR")?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::EdfveilError;
pub use ids::PatientId;
pub use result::Result;
