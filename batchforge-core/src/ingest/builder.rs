use super::Ingestion;
use crate::{
    error::IngestError,
    logger::RunManifest,
    mapping::MapperRegistry,
    reference::{ContainerId, ReferenceMinter},
    sink::ArchiveSink,
};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};

/// A fluent builder for constructing an `Ingestion`.
///
/// Only the container id and the sink are required. By default the
/// standard mappers and the SHA-512 minter are used, and documents that
/// already exist are replaced.
pub struct IngestionBuilder {
    container_id: Option<ContainerId>,
    minter: Option<ReferenceMinter>,
    sink: Option<Arc<dyn ArchiveSink>>,
    registry: Option<MapperRegistry>,
    overwrite: bool,
    location: Option<String>,
    batch_id: Option<String>,
    timestamp: Option<DateTime<Utc>>,
    manifest_path: Option<String>,
    manifest: Option<Arc<Mutex<RunManifest>>>,
}

impl Default for IngestionBuilder {
    fn default() -> Self {
        Self {
            container_id: None,
            minter: None,
            sink: None,
            registry: None,
            overwrite: true,
            location: None,
            batch_id: None,
            timestamp: None,
            manifest_path: None,
            manifest: None,
        }
    }
}

impl IngestionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the archive container every document is written into.
    pub fn with_container_id(mut self, container_id: ContainerId) -> Self {
        self.container_id = Some(container_id);
        self
    }

    pub fn with_minter(mut self, minter: ReferenceMinter) -> Self {
        self.minter = Some(minter);
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn ArchiveSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_registry(mut self, registry: MapperRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// `false` leaves existing documents in place: unchanged ones are
    /// skipped, edited ones are reported as sink issues.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Location used for process steps whose block has no `Location` value.
    pub fn with_location(mut self, location: &str) -> Self {
        self.location = Some(location.to_string());
        self
    }

    /// Overrides the batch id otherwise derived from the first sample id.
    pub fn with_batch_id(mut self, batch_id: &str) -> Self {
        self.batch_id = Some(batch_id.to_string());
        self
    }

    /// Fixes the emission time instead of reading the clock per workbook.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Appends one CSV line per document outcome to the given file.
    pub fn with_manifest_logging_to_file(mut self, path: &str) -> Self {
        self.manifest_path = Some(path.to_string());
        self
    }

    /// Records into a manifest shared with other ingestions.
    pub fn with_manifest(mut self, manifest: Arc<Mutex<RunManifest>>) -> Self {
        self.manifest = Some(manifest);
        self
    }

    /// # Errors
    ///
    /// Returns an `IngestError` if the container id or the sink is missing,
    /// or if the manifest file cannot be created.
    pub fn build(self) -> Result<Ingestion, IngestError> {
        let container = self.container_id.ok_or(IngestError::ContainerNotDefined)?;
        let sink = self.sink.ok_or(IngestError::SinkNotDefined)?;

        let manifest = match self.manifest_path {
            Some(path) => Some(Arc::new(Mutex::new(
                RunManifest::new(&path).map_err(|e| IngestError::FileIO(path.clone(), e))?,
            ))),
            None => self.manifest,
        };

        Ok(Ingestion {
            container,
            minter: self.minter.unwrap_or_default(),
            sink,
            registry: self.registry.unwrap_or_default(),
            overwrite: self.overwrite,
            location: self.location,
            batch_id: self.batch_id,
            timestamp: self.timestamp,
            manifest,
        })
    }
}
