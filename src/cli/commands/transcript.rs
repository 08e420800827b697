//! Transcript command handler

use serde::Serialize;
use std::path::Path;

use super::{load_records, print_json, unresolved_label};
use crate::args::OutputFormat;
use vertex_records::config::Config;
use vertex_records::core::{AcademicStanding, GradeScale, TranscriptAssembler, TranscriptView};
use vertex_records::{error, info, Lang};

#[derive(Serialize)]
struct TranscriptReport<'a> {
    #[serde(flatten)]
    view: &'a TranscriptView,
    earned_credits: u32,
    standing: AcademicStanding,
}

/// Run the transcript command.
///
/// # Arguments
/// * `snapshot` - Path to the source snapshot
/// * `format` - Output format
/// * `lang` - Label language for text output
/// * `config` - Loaded configuration
///
/// # Returns
/// `false` when the snapshot could not be processed.
pub fn run(snapshot: &Path, format: OutputFormat, lang: Lang, config: &Config) -> bool {
    let records = match load_records(snapshot, config) {
        Ok((_, records)) => records,
        Err(err) => {
            error!("Transcript failed for {}: {err}", snapshot.display());
            eprintln!("{err}");
            return false;
        }
    };

    let view = TranscriptAssembler::assemble(&records);
    let standing = AcademicStanding::from_gpa(view.cumulative.gpa);
    info!(
        "Transcript assembled: {} semester(s), cumulative GPA {:.2}, labels in {lang}",
        view.semesters.len(),
        view.cumulative.gpa
    );

    match format {
        OutputFormat::Json => print_json(&TranscriptReport {
            view: &view,
            earned_credits: view.earned_credits(),
            standing,
        }),
        OutputFormat::Text => {
            print_text(&view, standing, lang, unresolved_label(config));
            true
        }
    }
}

fn print_text(view: &TranscriptView, standing: AcademicStanding, lang: Lang, fallback: &str) {
    println!("\n=== Transcript ===\n");
    if view.semesters.is_empty() {
        println!("No course records.");
    }

    for group in &view.semesters {
        println!(
            "{}  (GPA {:.2}, earned {}/{} credits)",
            group.semester.display_label(lang, fallback),
            group.gpa,
            group.earned_credits,
            group.total_credits
        );
        for course in &group.courses {
            let grade = course.grade.as_deref().unwrap_or("-");
            let description = course
                .grade
                .as_deref()
                .and_then(|g| GradeScale::label(g, lang))
                .unwrap_or("");
            println!(
                "  {:<10} {:<40} {:>2} cr  {:<3} {}",
                course.course_code,
                course.title(lang),
                course.credits,
                grade,
                description
            );
        }
        println!();
    }

    println!(
        "Cumulative GPA: {:.2} over {} credits",
        view.cumulative.gpa, view.cumulative.total_credits
    );
    println!("Standing: {}", standing.label(lang));
}
