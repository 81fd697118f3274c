//! One workbook in, one batch of archive documents out.

pub mod assembler;
pub mod builder;
pub mod state;

use self::{
    assembler::{assemble, AssemblyContext},
    state::{Assembly, DocumentReference, IngestIssue, IngestReport, IssueStage},
};
use crate::{
    error::IngestError,
    logger::{DocumentStatus, RunManifest},
    mapping::MapperRegistry,
    reference::{ContainerId, ReferenceMinter},
    sink::{self, ArchiveSink},
    workbook::Workbook,
};
use chrono::{DateTime, Utc};
use std::{
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};
use tracing::{info, warn};

/// A configured ingestion, shareable between threads; each call handles
/// one workbook independently.
pub struct Ingestion {
    pub(super) container: ContainerId,
    pub(super) minter: ReferenceMinter,
    pub(super) sink: Arc<dyn ArchiveSink>,
    pub(super) registry: MapperRegistry,
    pub(super) overwrite: bool,
    pub(super) location: Option<String>,
    pub(super) batch_id: Option<String>,
    pub(super) timestamp: Option<DateTime<Utc>>,
    pub(super) manifest: Option<Arc<Mutex<RunManifest>>>,
}

impl Ingestion {
    pub fn container(&self) -> &ContainerId {
        &self.container
    }

    /// Opens the workbook at `path` and ingests it.
    pub fn ingest_path<P: AsRef<Path>>(&self, path: P) -> IngestReport {
        let source = path.as_ref().display().to_string();
        match Workbook::open(path.as_ref()) {
            Ok(workbook) => self.ingest_workbook(&workbook, &source),
            Err(e) => self.reject(&source, e),
        }
    }

    pub fn ingest_workbook(&self, workbook: &Workbook, source: &str) -> IngestReport {
        match self.eligible_assembly(workbook, source) {
            Ok(assembly) => self.emit(source, assembly),
            Err(e) => self.reject(source, e),
        }
    }

    /// Like `ingest_path`, but nothing is written.
    pub fn plan_path<P: AsRef<Path>>(&self, path: P) -> IngestReport {
        let source = path.as_ref().display().to_string();
        let assembly = Workbook::open(path.as_ref())
            .and_then(|workbook| self.eligible_assembly(&workbook, &source));
        match assembly {
            Ok(assembly) => {
                info!("Planned '{}': {} documents", source, assembly.documents.len());
                IngestReport::planned(&source, assembly)
            }
            Err(e) => self.reject(&source, e),
        }
    }

    /// Builds every document of the workbook without writing any.
    pub fn assemble(&self, workbook: &Workbook, source: &str) -> Result<Assembly, IngestError> {
        let ctx = AssemblyContext {
            container: &self.container,
            minter: &self.minter,
            registry: &self.registry,
            location: self.location.as_deref(),
            batch_id: self.batch_id.as_deref(),
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
        };
        assemble(workbook, source, &ctx)
    }

    fn eligible_assembly(&self, workbook: &Workbook, source: &str) -> Result<Assembly, IngestError> {
        if !workbook.has_sample_ids() {
            let reason = format!("no '{}' group with sample ids", crate::workbook::EXPERIMENT_INFO);
            return Err(IngestError::Ineligible(source.to_string(), reason));
        }
        self.assemble(workbook, source)
    }

    /// Reference of a previously written sample whose id starts with `partial_id`.
    pub fn resolve_sample_reference(&self, partial_id: &str) -> Result<Option<String>, IngestError> {
        Ok(sink::resolve_sample_reference(
            self.sink.as_ref(),
            &self.minter,
            &self.container,
            partial_id,
        )?)
    }

    fn reject(&self, source: &str, error: IngestError) -> IngestReport {
        warn!("Skipping '{}': {}", source, error);
        IngestReport::rejected(source, IngestIssue::new(IssueStage::Detect, error.to_string()))
    }

    fn emit(&self, source: &str, assembly: Assembly) -> IngestReport {
        let mut report = IngestReport {
            source: source.to_string(),
            batch: Some(assembly.batch),
            errors: assembly.issues,
            ..IngestReport::default()
        };

        for planned in assembly.documents {
            let entity = planned.document.data.definition();
            report.references.push(DocumentReference {
                filename: planned.filename.clone(),
                reference: planned.reference.clone(),
            });

            let outcome = planned
                .document
                .to_json_value()
                .map_err(IngestError::from)
                .and_then(|payload| {
                    self.sink
                        .write(&self.container, &planned.filename, &payload, self.overwrite)
                        .map_err(IngestError::from)
                });
            let status = match outcome {
                Ok(true) => {
                    report.written.push(planned.filename.clone());
                    DocumentStatus::Written
                }
                Ok(false) => {
                    report.skipped.push(planned.filename.clone());
                    DocumentStatus::Skipped
                }
                Err(e) => {
                    report.skipped.push(planned.filename.clone());
                    report.errors.push(IngestIssue::new(IssueStage::Sink, e.to_string()));
                    DocumentStatus::Rejected
                }
            };

            if let Some(manifest) = &self.manifest {
                let mut manifest = manifest.lock().unwrap_or_else(PoisonError::into_inner);
                if let Err(e) = manifest.record(&planned.filename, entity, status, &planned.reference) {
                    report
                        .errors
                        .push(IngestIssue::new(IssueStage::Sink, format!("manifest: {}", e)));
                }
            }
        }

        for issue in &report.errors {
            warn!("{}: {}", source, issue);
        }
        info!(
            "Ingested '{}': {} written, {} skipped, {} issues",
            source,
            report.written.len(),
            report.skipped.len(),
            report.errors.len()
        );
        report
    }
}
