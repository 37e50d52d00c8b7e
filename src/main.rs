//! rewardlens: Survey Dashboard CLI
//!
//! Loads a self-reward survey CSV once and renders its descriptive
//! statistics as an interactive dashboard, a static report or JSON.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use polars::prelude::DataFrame;
use tracing::{debug, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use rewardlens::cli::{default_export_path, default_schema_path, run_dashboard, Cli, Commands};
use rewardlens::config::SurveySchema;
use rewardlens::pipeline::{drop_private_columns, load_dataset_with_progress, DashboardData, DatasetCache};
use rewardlens::report::{export_dashboard, DashboardReport};
use rewardlens::utils::{
    create_spinner, finish_with_success, print_banner, print_config, print_count, print_footer,
    print_info, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);
    debug!("Arguments: {:?}", cli);

    // Handle subcommands
    if let Some(command) = &cli.command {
        return match command {
            Commands::Export { input, output } => run_export(&cli, input, output.as_deref()),
            Commands::InitSchema { path } => {
                let path = path.clone().unwrap_or_else(default_schema_path);
                run_init_schema(&path)
            }
        };
    }

    let input = cli.input().ok_or_else(|| {
        anyhow::anyhow!("Input file is required. Use -i/--input to specify a file.")
    })?;

    let schema = resolve_schema(&cli)?;

    if cli.no_interactive {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(input, schema.top_n, schema.histogram_bins, !cli.keep_private);
    }

    let cache = load_cache(input, cli.infer_schema_length, cli.no_interactive)?;
    let (df, dropped) = filtered_frame(&cache, &schema, cli.keep_private)?;

    if cli.no_interactive {
        if !dropped.is_empty() {
            print_count("private column(s) removed", dropped.len(), None);
        }
        let data = DashboardData::compute(&df, &schema)
            .context("Failed to compute dashboard statistics")?;
        DashboardReport::new(&data).display();
        print_footer();
    } else {
        run_dashboard(&df, &schema)?;
    }

    Ok(())
}

fn init_logging(cli: &Cli) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = EnvFilter::try_new(cli.log_filter(rust_log.as_deref()))
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().as_str().to_lowercase()));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Warning: logging was already initialised");
    }
}

/// Schema file first, then CLI overrides
fn resolve_schema(cli: &Cli) -> Result<SurveySchema> {
    let mut schema = SurveySchema::resolve(cli.schema.as_deref())?;
    if let Some(top_n) = cli.top_n {
        schema.top_n = top_n;
    }
    if let Some(bins) = cli.bins {
        schema.histogram_bins = bins;
    }
    debug!(?schema, "schema resolved");
    Ok(schema)
}

/// Load the survey into the process-wide cache, with progress output when requested
fn load_cache(input: &Path, infer_schema_length: usize, show_progress: bool) -> Result<DatasetCache> {
    if !show_progress {
        let cache = DatasetCache::new(input, infer_schema_length);
        cache.get()?;
        return Ok(cache);
    }

    let (df, rows, cols, memory_mb) = load_dataset_with_progress(input, infer_schema_length)?;
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);

    Ok(DatasetCache::with_frame(input, df))
}

fn filtered_frame(
    cache: &DatasetCache,
    schema: &SurveySchema,
    keep_private: bool,
) -> Result<(DataFrame, Vec<String>)> {
    let df = cache.get()?;
    if keep_private {
        return Ok((df.clone(), Vec::new()));
    }

    let (filtered, dropped) = drop_private_columns(df, &schema.private_markers);
    if !dropped.is_empty() {
        info!(count = dropped.len(), "private columns removed");
    }
    Ok((filtered, dropped))
}

fn run_export(cli: &Cli, input: &Path, output: Option<&Path>) -> Result<()> {
    let output_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_export_path(input));

    let schema = resolve_schema(cli)?;
    let cache = load_cache(input, cli.infer_schema_length, true)?;
    let (df, dropped) = filtered_frame(&cache, &schema, cli.keep_private)?;

    let spinner = create_spinner("Computing dashboard statistics...");
    let data = DashboardData::compute(&df, &schema)
        .context("Failed to compute dashboard statistics")?;
    export_dashboard(&data, &input.display().to_string(), &dropped, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));

    if data.categories.iter().all(|c| c.counts.is_empty()) {
        warn!("no indicator columns matched any category prefix");
        print_info("No indicator columns matched the configured category prefixes");
    }

    Ok(())
}

fn run_init_schema(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first or edit it manually.",
            path.display()
        );
    }

    let toml = SurveySchema::default().to_toml()?;
    std::fs::write(path, toml)
        .with_context(|| format!("Failed to write schema file: {}", path.display()))?;
    print_success(&format!("Wrote default schema to {}", path.display()));

    Ok(())
}
