use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use std::{fs, path::PathBuf, process::ExitCode};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod workflow;

use config::IngestSettings;

/// Ingest fabrication batch workbooks into an archive directory.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// A workbook (.xlsx, .xls, .ods, .csv) or a directory of workbooks
    input: PathBuf,

    /// YAML settings file; missing means defaults
    #[arg(short, long, default_value = "batchforge.yaml")]
    config: PathBuf,

    /// Archive container for every workbook (default: each workbook's file stem)
    #[arg(long)]
    container_id: Option<String>,

    /// Root directory of the archive
    #[arg(short, long)]
    output_root: Option<PathBuf>,

    /// Leave existing documents in place; edited ones are reported
    #[arg(long)]
    skip_existing: bool,

    /// Location for process steps without a Location column
    #[arg(long)]
    location: Option<String>,

    /// Batch id instead of the one derived from the first sample id
    #[arg(long)]
    batch_id: Option<String>,

    /// CSV file receiving one line per document outcome
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Log filter when RUST_LOG is unset, e.g. `debug`
    #[arg(long)]
    log_level: Option<String>,

    /// Fixed emission time (RFC 3339) for reproducible documents
    #[arg(long)]
    timestamp: Option<DateTime<Utc>>,

    /// Plan all documents and print the summary without writing
    #[arg(long)]
    dry_run: bool,

    /// Write the JSON summary here instead of stdout
    #[arg(long)]
    summary: Option<PathBuf>,
}

impl Cli {
    /// Flags win over the config file.
    fn apply(&self, settings: &mut IngestSettings) {
        if let Some(container_id) = &self.container_id {
            settings.container_id = Some(container_id.clone());
        }
        if let Some(output_root) = &self.output_root {
            settings.output_root = output_root.clone();
        }
        if self.skip_existing {
            settings.overwrite = false;
        }
        if let Some(location) = &self.location {
            settings.location = Some(location.clone());
        }
        if let Some(batch_id) = &self.batch_id {
            settings.batch_id = Some(batch_id.clone());
        }
        if let Some(manifest) = &self.manifest {
            settings.manifest = Some(manifest.clone());
        }
        if let Some(log_level) = &self.log_level {
            settings.log_level = Some(log_level.clone());
        }
    }
}

fn init_tracing(settings: &IngestSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(settings.log_level.as_deref().unwrap_or("info"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut settings = IngestSettings::load(&cli.config)?;
    cli.apply(&mut settings);
    init_tracing(&settings);

    let summary = workflow::run(&cli.input, &settings, cli.timestamp, cli.dry_run)?;
    let json = serde_json::to_string_pretty(&summary).context("Failed to serialize run summary")?;
    match &cli.summary {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write summary: {:?}", path))?;
            info!("Summary written to {:?}", path);
        }
        None => println!("{}", json),
    }

    info!(
        "{} workbook(s): {} written, {} skipped, {} issues",
        summary.workbooks, summary.written, summary.skipped, summary.errors
    );
    Ok(if summary.is_clean() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
