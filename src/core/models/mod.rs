//! Data models for `VertexRecords`

pub mod profile;
pub mod record;
pub mod semester;

pub use profile::StudentAcademicProfile;
pub use record::{CourseRecord, CourseStatus};
pub use semester::{Semester, SemesterRef};
