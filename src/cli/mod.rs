//! Command-line interface for resume-match.

mod commands;
pub mod helpers;

pub use commands::{is_verbose, run};
