//! JSON ingestion and export.
//!
//! Thin adapter between files on disk and the in-memory graph, fleet and
//! plan. Nothing in the routing engine depends on this module.

mod document;

use std::fs;
use std::path::Path;

pub use document::{EdgeRecord, NodeRecord, ProblemDocument, SolutionDocument, VehicleRecord};

use crate::error::{Result, RoutingError};

fn io_error(path: &Path, source: std::io::Error) -> RoutingError {
    RoutingError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Reads a problem document from a JSON file.
///
/// # Errors
///
/// Returns [`RoutingError::Io`] if the file cannot be read and
/// [`RoutingError::Json`] if it is not a valid problem document.
pub fn load_problem(path: impl AsRef<Path>) -> Result<ProblemDocument> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(serde_json::from_str(&text)?)
}

/// Writes a solution document as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`RoutingError::Io`] if the file cannot be written.
pub fn save_solution(path: impl AsRef<Path>, solution: &SolutionDocument) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(solution)?;
    fs::write(path, text).map_err(|e| io_error(path, e))
}

/// Writes a problem document as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`RoutingError::Io`] if the file cannot be written.
pub fn save_problem(path: impl AsRef<Path>, problem: &ProblemDocument) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(problem)?;
    fs::write(path, text).map_err(|e| io_error(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("relief-routing-{}-{name}", std::process::id()))
    }

    #[test]
    fn test_problem_file_roundtrip() {
        let path = scratch_path("problem.json");
        let doc = ProblemDocument {
            nodes: vec![NodeRecord {
                id: 1,
                demand: 2,
                priority: 3,
            }],
            ..ProblemDocument::default()
        };
        save_problem(&path, &doc).expect("writable temp dir");
        let loaded = load_problem(&path).expect("readable");
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = scratch_path("does-not-exist.json");
        assert!(matches!(load_problem(&path), Err(RoutingError::Io { .. })));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        let path = scratch_path("malformed.json");
        fs::write(&path, "{ nodes: ").expect("writable temp dir");
        let result = load_problem(&path);
        let _ = fs::remove_file(&path);
        assert!(matches!(result, Err(RoutingError::Json(_))));
    }

    #[test]
    fn test_save_solution_writes_json() {
        let path = scratch_path("solution.json");
        save_solution(&path, &SolutionDocument::default()).expect("writable temp dir");
        let text = fs::read_to_string(&path).expect("readable");
        let _ = fs::remove_file(&path);
        assert!(text.contains("\"total_score\""));
    }
}
