use crate::{
    batch::{Batch, Sample, Substrate},
    process::ProcessStep,
};
use serde::{Deserialize, Serialize};

/// The archive suffix every emitted document carries.
pub const ARCHIVE_SUFFIX: &str = ".archive.json";

/// Any entity that is written as a standalone archive document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "m_def")]
pub enum Entity {
    Batch(Batch),
    Sample(Sample),
    Substrate(Substrate),
    Process(ProcessStep),
}

impl Entity {
    pub fn lab_id(&self) -> &str {
        match self {
            Entity::Batch(b) => &b.lab_id,
            Entity::Sample(s) => &s.lab_id,
            Entity::Substrate(s) => &s.lab_id,
            Entity::Process(p) => &p.lab_id,
        }
    }

    /// Discriminator value written under `data.m_def`.
    pub fn definition(&self) -> &'static str {
        match self {
            Entity::Batch(_) => "Batch",
            Entity::Sample(_) => "Sample",
            Entity::Substrate(_) => "Substrate",
            Entity::Process(_) => "Process",
        }
    }
}

/// On-disk shape of one document: `{"data": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveDocument {
    pub data: Entity,
}

impl ArchiveDocument {
    pub fn new(data: Entity) -> Self {
        Self { data }
    }

    pub fn to_json_value(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    pub fn from_json_value(value: serde_json::Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }
}

/// `<local_id>.archive.json`
pub fn archive_filename(local_id: &str) -> String {
    format!("{}{}", local_id, ARCHIVE_SUFFIX)
}
