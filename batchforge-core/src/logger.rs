//! CSV run manifest: one line per document outcome.

use csv::Writer;
use serde::Serialize;
use std::fs;
use std::io;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Written,
    Skipped,
    Rejected,
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    filename: &'a str,
    entity: &'a str,
    status: DocumentStatus,
    reference: &'a str,
}

pub struct RunManifest {
    writer: Writer<fs::File>,
}

impl RunManifest {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let writer = Writer::from_path(path)?;
        Ok(Self { writer })
    }

    pub fn record(
        &mut self,
        filename: &str,
        entity: &str,
        status: DocumentStatus,
        reference: &str,
    ) -> Result<(), anyhow::Error> {
        self.writer.serialize(ManifestEntry {
            filename,
            entity,
            status,
            reference,
        })?;
        self.writer.flush()?;
        Ok(())
    }
}
