//! Shared library for `VertexRecords`
//! Contains the academic-record engine used by the CLI and by embedding applications

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
