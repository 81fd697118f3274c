use crate::config::IngestSettings;
use anyhow::{bail, Context, Result};
use batchforge_core::{
    ingest::state::{IngestIssue, IngestReport, IssueStage},
    logger::RunManifest,
    reference::ContainerId,
    sink::{ArchiveSink, FsSink},
    workbook, Ingestion, IngestionBuilder,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
    thread,
};
use tracing::{info, warn};

/// One workbook's outcome and the container it went into.
#[derive(Debug, Serialize)]
pub struct BatchRun {
    pub container_id: String,
    #[serde(flatten)]
    pub report: IngestReport,
}

/// Totals over every workbook of one run, plus the per-workbook reports.
#[derive(Debug, Serialize)]
pub struct RunSummary {
    pub output_root: PathBuf,
    pub dry_run: bool,
    pub workbooks: usize,
    pub written: usize,
    pub skipped: usize,
    pub errors: usize,
    pub batches: Vec<BatchRun>,
}

impl RunSummary {
    fn new(output_root: PathBuf, dry_run: bool, batches: Vec<BatchRun>) -> Self {
        let total = |count: fn(&IngestReport) -> usize| -> usize {
            batches.iter().map(|b| count(&b.report)).sum()
        };
        Self {
            output_root,
            dry_run,
            workbooks: batches.len(),
            written: total(|r| r.written.len()),
            skipped: total(|r| r.skipped.len()),
            errors: total(|r| r.errors.len()),
            batches,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.batches.iter().all(|b| b.report.is_clean())
    }
}

/// The workbooks to ingest: `input` itself, or every eligible workbook
/// directly inside it, sorted by path.
pub fn collect_workbooks(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }
    if !input.is_dir() {
        bail!("Input does not exist: {:?}", input);
    }
    let mut workbooks = Vec::new();
    for entry in fs::read_dir(input).with_context(|| format!("Failed to read directory: {:?}", input))? {
        let path = entry?.path();
        if path.is_file() && workbook::is_eligible(&path) {
            workbooks.push(path);
        }
    }
    workbooks.sort();
    Ok(workbooks)
}

/// The configured container id, else the workbook's file stem.
pub fn container_for(settings: &IngestSettings, workbook: &Path) -> ContainerId {
    let id = settings.container_id.clone().unwrap_or_else(|| {
        workbook
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "batch".to_string())
    });
    ContainerId::new(id)
}

pub fn build_ingestion(
    settings: &IngestSettings,
    container: ContainerId,
    sink: Arc<dyn ArchiveSink>,
    manifest: Option<Arc<Mutex<RunManifest>>>,
    timestamp: Option<DateTime<Utc>>,
) -> Result<Ingestion> {
    let mut builder = IngestionBuilder::new()
        .with_container_id(container)
        .with_sink(sink)
        .with_overwrite(settings.overwrite);
    if let Some(location) = &settings.location {
        builder = builder.with_location(location);
    }
    if let Some(batch_id) = &settings.batch_id {
        builder = builder.with_batch_id(batch_id);
    }
    if let Some(timestamp) = timestamp {
        builder = builder.with_timestamp(timestamp);
    }
    if let Some(manifest) = manifest {
        builder = builder.with_manifest(manifest);
    }
    builder.build().context("Failed to configure ingestion")
}

fn open_manifest(path: &Path) -> Result<Arc<Mutex<RunManifest>>> {
    let path_str = path
        .to_str()
        .with_context(|| format!("Manifest path is not valid UTF-8: {:?}", path))?;
    let manifest = RunManifest::new(path_str)
        .with_context(|| format!("Failed to create manifest file: {:?}", path))?;
    Ok(Arc::new(Mutex::new(manifest)))
}

/// Ingests `input` (a workbook or a directory of workbooks) into the
/// filesystem archive under `settings.output_root`. All workbooks share
/// one sink and one manifest.
pub fn run(
    input: &Path,
    settings: &IngestSettings,
    timestamp: Option<DateTime<Utc>>,
    dry_run: bool,
) -> Result<RunSummary> {
    let workbooks = collect_workbooks(input)?;
    if workbooks.is_empty() {
        warn!("No eligible workbooks found in {:?}", input);
    }
    if !dry_run {
        fs::create_dir_all(&settings.output_root)
            .with_context(|| format!("Failed to create output directory: {:?}", settings.output_root))?;
    }

    let sink: Arc<dyn ArchiveSink> = Arc::new(FsSink::new(&settings.output_root));
    let manifest = match &settings.manifest {
        Some(path) if !dry_run => Some(open_manifest(path)?),
        _ => None,
    };
    let ingestions = workbooks
        .iter()
        .map(|path| {
            let container = container_for(settings, path);
            build_ingestion(settings, container, sink.clone(), manifest.clone(), timestamp)
        })
        .collect::<Result<Vec<_>>>()?;

    info!(
        "Ingesting {} workbook(s) into {:?}{}",
        workbooks.len(),
        settings.output_root,
        if dry_run { " (dry run)" } else { "" }
    );
    let reports = if dry_run {
        ingestions
            .iter()
            .zip(&workbooks)
            .map(|(ingestion, path)| ingestion.plan_path(path))
            .collect()
    } else {
        ingest_all(&ingestions, &workbooks)
    };

    let batches = ingestions
        .iter()
        .zip(reports)
        .map(|(ingestion, report)| BatchRun {
            container_id: ingestion.container().to_string(),
            report,
        })
        .collect();
    Ok(RunSummary::new(settings.output_root.clone(), dry_run, batches))
}

/// One scoped thread per workbook; reports come back in input order.
fn ingest_all(ingestions: &[Ingestion], workbooks: &[PathBuf]) -> Vec<IngestReport> {
    thread::scope(|scope| {
        let handles: Vec<_> = ingestions
            .iter()
            .zip(workbooks)
            .map(|(ingestion, path)| scope.spawn(move || ingestion.ingest_path(path)))
            .collect();
        handles
            .into_iter()
            .zip(workbooks)
            .map(|(handle, path)| {
                handle.join().unwrap_or_else(|_| {
                    IngestReport::rejected(
                        &path.display().to_string(),
                        IngestIssue::new(IssueStage::Detect, "ingestion thread panicked"),
                    )
                })
            })
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKBOOK: &str = "\
Experiment Info,,Cleaning
Nomad ID,Substrate material,Solvent 1
HZB_P_1_1,Glass,IPA
HZB_P_1_2,Glass,IPA
";

    fn settings(root: &Path) -> IngestSettings {
        IngestSettings {
            container_id: Some("u1".to_string()),
            output_root: root.join("archive"),
            ..IngestSettings::default()
        }
    }

    #[test]
    fn directories_yield_only_eligible_workbooks() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.csv"), WORKBOOK).unwrap();
        fs::write(dir.path().join("a.csv"), WORKBOOK.replace("HZB_P_1", "HZB_P_2")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a workbook").unwrap();
        fs::write(dir.path().join("other.csv"), "Samples\nNomad ID\nS_1\n").unwrap();

        let found = collect_workbooks(dir.path()).unwrap();
        assert_eq!(found, vec![dir.path().join("a.csv"), dir.path().join("b.csv")]);
        assert!(collect_workbooks(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn container_defaults_to_the_file_stem() {
        let defaults = IngestSettings::default();
        assert_eq!(container_for(&defaults, Path::new("/data/HZB_P_1.xlsx")).as_str(), "HZB_P_1");
        assert_eq!(container_for(&defaults, Path::new("/")).as_str(), "batch");
        let configured = IngestSettings {
            container_id: Some("u9".to_string()),
            ..IngestSettings::default()
        };
        assert_eq!(container_for(&configured, Path::new("/data/x.xlsx")).as_str(), "u9");
    }

    #[test]
    fn directory_runs_give_each_workbook_its_own_container() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("one.csv"), WORKBOOK).unwrap();
        fs::write(input.join("two.csv"), WORKBOOK.replace("HZB_P_1", "HZB_P_2")).unwrap();

        let settings = IngestSettings {
            container_id: None,
            manifest: Some(dir.path().join("manifest.csv")),
            ..settings(dir.path())
        };
        let summary = run(&input, &settings, None, false).unwrap();
        assert!(summary.is_clean());
        assert_eq!(summary.workbooks, 2);
        assert_eq!(summary.written, 10);
        assert_eq!(summary.batches[0].container_id, "one");
        assert_eq!(summary.batches[1].container_id, "two");
        assert!(settings.output_root.join("one/HZB_P_1.archive.json").is_file());
        assert!(settings.output_root.join("two/HZB_P_2.archive.json").is_file());

        let manifest = fs::read_to_string(dir.path().join("manifest.csv")).unwrap();
        assert_eq!(manifest.lines().count(), 11);

        let again = run(&input, &settings, None, false).unwrap();
        assert!(again.is_clean());
        assert_eq!(again.written, 10);
        assert_eq!(again.skipped, 0);

        let keeping = IngestSettings {
            overwrite: false,
            ..settings.clone()
        };
        let unchanged = run(&input, &keeping, None, false).unwrap();
        assert!(unchanged.is_clean());
        assert_eq!(unchanged.written, 0);
        assert_eq!(unchanged.skipped, 10);
    }

    #[test]
    fn a_shared_container_reports_colliding_local_ids() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input");
        fs::create_dir(&input).unwrap();
        fs::write(input.join("one.csv"), WORKBOOK).unwrap();
        fs::write(input.join("two.csv"), WORKBOOK.replace("HZB_P_1", "HZB_P_2")).unwrap();

        let settings = IngestSettings {
            overwrite: false,
            ..settings(dir.path())
        };
        let summary = run(&input, &settings, None, false).unwrap();
        // Both batches plan `0_substrate` and `1_0_cleaning` with different lab ids.
        assert_eq!(summary.written, 8);
        assert_eq!(summary.skipped, 2);
        assert_eq!(summary.errors, 2);
    }

    #[test]
    fn dry_runs_write_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("batch.csv");
        fs::write(&input, WORKBOOK).unwrap();

        let settings = settings(dir.path());
        let summary = run(&input, &settings, None, true).unwrap();
        assert!(summary.dry_run);
        assert_eq!(summary.written, 0);
        assert_eq!(summary.batches[0].report.references.len(), 5);
        assert!(!settings.output_root.exists());
    }
}
