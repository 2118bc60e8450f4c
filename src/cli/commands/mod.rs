// edfveil - EEG Recording De-identification Tool
// Copyright (c) 2026 edfveil Contributors
// Licensed under the MIT License

//! Command implementations

pub mod init;
pub mod offsets;
pub mod scrub;
pub mod shift;
pub mod validate;

use crate::core::batch::RunSummary;
use std::path::{Path, PathBuf};

/// Lists files in `dir` with the given extension, sorted for deterministic
/// processing order
pub(crate) fn files_with_extension(dir: &Path, extension: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case(extension))
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Prints the end-of-run summary the same way for every batch command
pub(crate) fn print_summary(label: &str, summary: &RunSummary) {
    println!();
    println!("{label} summary:");
    println!("  Total files: {}", summary.total_files);
    println!("  Succeeded:   {}", summary.succeeded);
    println!("  Failed:      {}", summary.failed);
    println!("  Skipped:     {}", summary.skipped);
    println!("  Duration:    {:.2}s", summary.duration.as_secs_f64());

    if !summary.errors.is_empty() {
        println!();
        println!("  Failures:");
        for error in &summary.errors {
            println!("    - {}: {}", error.file, error.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_files_with_extension_sorted_and_filtered() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("b.edf"), b"x").unwrap();
        std::fs::write(dir.path().join("a.edf"), b"x").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        std::fs::create_dir(dir.path().join("sub.edf")).unwrap();

        let files = files_with_extension(dir.path(), "edf").unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.edf", "b.edf"]);
    }
}
