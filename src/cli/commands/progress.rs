//! Progress command handler

use std::path::Path;

use super::{load_records, print_json};
use crate::args::OutputFormat;
use vertex_records::config::Config;
use vertex_records::core::CreditProgressTracker;
use vertex_records::{error, info};

/// Run the progress command.
///
/// # Returns
/// `false` when the snapshot could not be processed.
pub fn run(snapshot: &Path, format: OutputFormat, config: &Config) -> bool {
    let (source, records) = match load_records(snapshot, config) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("Progress failed for {}: {err}", snapshot.display());
            eprintln!("{err}");
            return false;
        }
    };

    let tracker = CreditProgressTracker::new(config.academics.default_required_credits);
    let progress = tracker.compute_from_records(&source.profile(), &records);
    info!(
        "Credit progress: {}/{} ({}%)",
        progress.completed, progress.total_required, progress.percentage
    );

    match format {
        OutputFormat::Json => print_json(&progress),
        OutputFormat::Text => {
            println!("\n=== Credit Progress ===\n");
            println!("Completed:  {}", progress.completed);
            println!("Current:    {}", progress.current);
            println!("Remaining:  {}", progress.remaining);
            println!("Required:   {}", progress.total_required);
            println!("Progress:   {}%", progress.percentage);
            true
        }
    }
}
