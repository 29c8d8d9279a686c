//! Input handling module

pub mod glob_resolver;
pub mod sources;

pub use glob_resolver::resolve_patterns;
pub use sources::{open_sources, report_failures, STDIN_ARG};
