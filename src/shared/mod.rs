//! Shared module for common functionality across all targets

pub mod lang;

pub use lang::Lang;

/// Returns the current version of the `VertexRecords` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
