//! CLI module - argument parsing and the interactive dashboard

mod args;
pub mod dashboard;

pub use args::{default_export_path, default_schema_path, Cli, Commands};
pub use dashboard::run_dashboard;
