// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Result type alias for edfveil
//!
//! Provides a convenient Result type alias that uses EdfveilError as the
//! error type.

use super::errors::EdfveilError;

/// Result type alias for edfveil operations
///
/// # Examples
///
/// ```
/// use edfveil::domain::result::Result;
/// use edfveil::domain::errors::EdfveilError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EdfveilError::InvalidInput("empty identity".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EdfveilError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::EdfveilError;

    #[test]
    fn test_result_ok() {
        let result: Result<i32> = Ok(42);
        assert!(result.is_ok());
    }

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(EdfveilError::InvalidInput("test error".to_string()));
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
