//! Core academic-record engine: grading, semester ordering, reconciliation and
//! the derived GPA, credit-progress and transcript views.

pub mod config;
pub mod gpa;
pub mod grade_scale;
pub mod models;
pub mod progress;
pub mod reconcile;
pub mod semester_key;
pub mod snapshot;
pub mod standing;
pub mod transcript;

pub use gpa::{GpaCalculator, GpaResult, Scope};
pub use grade_scale::GradeScale;
pub use progress::{CreditProgress, CreditProgressTracker};
pub use reconcile::RecordReconciler;
pub use semester_key::{order_key, SemesterKey, Term};
pub use snapshot::SourceSnapshot;
pub use standing::AcademicStanding;
pub use transcript::{SemesterGroup, TranscriptAssembler, TranscriptView};
