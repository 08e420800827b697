//! GPA command handler

use std::path::Path;

use super::{load_records, print_json};
use crate::args::OutputFormat;
use vertex_records::config::Config;
use vertex_records::core::models::SemesterRef;
use vertex_records::core::reconcile::SemesterResolver;
use vertex_records::core::{GpaCalculator, RecordReconciler, Scope, SourceSnapshot};
use vertex_records::{error, info};

/// Run the GPA command.
///
/// # Arguments
/// * `snapshot` - Path to the source snapshot
/// * `semester` - Optional semester label to restrict the GPA to
/// * `current` - Restrict to the calendar's current semester
/// * `format` - Output format
/// * `config` - Loaded configuration
///
/// # Returns
/// `false` when the snapshot could not be processed or no current semester exists.
pub fn run(
    snapshot: &Path,
    semester: Option<&str>,
    current: bool,
    format: OutputFormat,
    config: &Config,
) -> bool {
    let (source, records) = match load_records(snapshot, config) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("GPA failed for {}: {err}", snapshot.display());
            eprintln!("{err}");
            return false;
        }
    };

    let scope = match select_scope(&source, semester, current) {
        Ok(scope) => scope,
        Err(err) => {
            eprintln!("{err}");
            return false;
        }
    };

    let result = GpaCalculator::compute(&records, &scope);
    let label = match &scope {
        Scope::Cumulative => "Cumulative".to_string(),
        Scope::Semester(semester) => semester.label().to_string(),
    };
    info!("GPA for {label}: {:.2}", result.gpa);

    match format {
        OutputFormat::Json => print_json(&result),
        OutputFormat::Text => {
            println!(
                "{label} GPA: {:.2} ({} credits, {:.2} points)",
                result.gpa, result.total_credits, result.total_points
            );
            true
        }
    }
}

/// Build the scope from the command flags.
///
/// A label resolves exactly as it would inside a record. One that matches no
/// calendar entry still selects records carrying that raw label.
fn select_scope(
    source: &SourceSnapshot,
    semester: Option<&str>,
    current: bool,
) -> Result<Scope, String> {
    if current {
        return source
            .current_semester()
            .map(|s| Scope::Semester(SemesterRef::Resolved(s)))
            .ok_or_else(|| "✗ The semester calendar marks no semester as current".to_string());
    }

    Ok(semester.map_or(Scope::Cumulative, |label| {
        let calendar = RecordReconciler::effective_calendar(source);
        let matched = SemesterResolver::new(&calendar).by_label(label).cloned();
        Scope::Semester(matched.map_or_else(
            || SemesterRef::Unresolved {
                label: Some(label.trim().to_string()),
                reference_id: None,
            },
            SemesterRef::Resolved,
        ))
    }))
}
