//! Command-line argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::config::DEFAULT_SCHEMA_FILE;

/// rewardlens - Descriptive statistics dashboard for self-reward survey data
#[derive(Parser, Debug)]
#[command(name = "rewardlens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input survey CSV file
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Schema file (TOML) describing the survey columns.
    /// Defaults to ./rewardlens.toml when present, else the built-in survey schema.
    #[arg(short, long, global = true)]
    pub schema: Option<PathBuf>,

    /// Number of categories shown per bar chart
    #[arg(long, global = true, value_parser = validate_positive)]
    pub top_n: Option<usize>,

    /// Number of histogram bins
    #[arg(long, global = true, value_parser = validate_positive)]
    pub bins: Option<usize>,

    /// Keep columns whose name contains a private marker (e.g. "Nama", "Whatsapp")
    #[arg(long, global = true, default_value = "false")]
    pub keep_private: bool,

    /// Print the static report instead of opening the interactive dashboard
    #[arg(long, default_value = "false")]
    pub no_interactive: bool,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, global = true, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export the dashboard statistics as JSON
    Export {
        /// Input survey CSV file
        input: PathBuf,

        /// Output file path (optional, defaults to <input>_dashboard.json)
        output: Option<PathBuf>,
    },

    /// Write the default schema file for editing
    InitSchema {
        /// Destination (defaults to ./rewardlens.toml)
        path: Option<PathBuf>,
    },
}

impl Cli {
    pub fn input(&self) -> Option<&PathBuf> {
        self.input.as_ref()
    }

    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        }
    }

    /// Log filter directive: `--verbose` wins, then `RUST_LOG`, then the default level
    pub fn log_filter(&self, rust_log: Option<&str>) -> String {
        match rust_log {
            Some(directive) if !self.verbose && !directive.trim().is_empty() => {
                directive.to_string()
            }
            _ => self.log_level().as_str().to_lowercase(),
        }
    }
}

/// Default export path: same directory as the input with a '_dashboard.json' suffix
pub fn default_export_path(input: &Path) -> PathBuf {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("survey");
    parent.join(format!("{}_dashboard.json", stem))
}

pub fn default_schema_path() -> PathBuf {
    PathBuf::from(DEFAULT_SCHEMA_FILE)
}

/// Validator for counts that must be at least 1
fn validate_positive(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid positive integer", s))?;

    if value == 0 {
        Err("value must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
