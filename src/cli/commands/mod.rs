//! CLI command handlers for `VertexRecords`.
//!
//! Each command is implemented in its own submodule. The record commands
//! share snapshot loading and JSON printing from here.

pub mod config;
pub mod gpa;
pub mod progress;
pub mod transcript;

use serde::Serialize;
use std::path::Path;

use vertex_records::config::Config;
use vertex_records::core::models::CourseRecord;
use vertex_records::core::{RecordReconciler, SourceSnapshot};
use vertex_records::{error, info, verbose};

/// Label shown for records whose semester could not be determined
const FALLBACK_UNRESOLVED_LABEL: &str = "Unknown Semester";

/// Load a snapshot and reconcile its sources.
///
/// The path is looked up in the configured snapshots directory when it does
/// not exist as given.
///
/// # Errors
/// Returns a printable message if the snapshot cannot be read or parsed.
pub fn load_records(
    snapshot: &Path,
    config: &Config,
) -> Result<(SourceSnapshot, Vec<CourseRecord>), String> {
    let path = config.resolve_snapshot_path(snapshot);
    let source = SourceSnapshot::load(&path).map_err(|e| {
        error!("Failed to load snapshot {}: {e}", path.display());
        format!("✗ Failed to load {}: {e}", path.display())
    })?;
    info!("Snapshot loaded: {}", path.display());
    verbose!(
        "✓ Loaded {} enrollments, {} grades, {} LMS grades, {} semesters from {}",
        source.enrollments.len(),
        source.grades.len(),
        source.lms_grades.len(),
        source.semesters.len(),
        path.display()
    );

    let records = RecordReconciler::reconcile_sources(&source);
    info!("Reconciled {} course records", records.len());
    Ok((source, records))
}

/// Label for the unresolved-semester bucket from config
pub fn unresolved_label(config: &Config) -> &str {
    let label = config.academics.unresolved_label.trim();
    if label.is_empty() {
        FALLBACK_UNRESOLVED_LABEL
    } else {
        label
    }
}

/// Pretty-print a value as JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> bool {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            true
        }
        Err(e) => {
            error!("Failed to serialize output: {e}");
            eprintln!("✗ Failed to serialize output: {e}");
            false
        }
    }
}
