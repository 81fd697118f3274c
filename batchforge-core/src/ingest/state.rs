use batchforge_schemas::{batch::Batch, file_formats::ArchiveDocument};
use serde::Serialize;
use std::fmt;

/// Pipeline stage an issue was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueStage {
    Detect,
    Header,
    Map,
    Convert,
    Sink,
}

impl fmt::Display for IssueStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            IssueStage::Detect => "detect",
            IssueStage::Header => "header",
            IssueStage::Map => "map",
            IssueStage::Convert => "convert",
            IssueStage::Sink => "sink",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestIssue {
    pub stage: IssueStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_position: Option<usize>,
    /// 0-based data row, not counting the two header rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row: Option<usize>,
    pub message: String,
}

impl IngestIssue {
    pub fn new(stage: IssueStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            block_position: None,
            row: None,
            message: message.into(),
        }
    }

    pub fn at_block(mut self, position: usize) -> Self {
        self.block_position = Some(position);
        self
    }

    pub fn at_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }
}

impl fmt::Display for IngestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.stage)?;
        if let Some(position) = self.block_position {
            write!(f, " block {}", position)?;
        }
        if let Some(row) = self.row {
            write!(f, " row {}", row)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// A document whose filename and reference are fixed before any write.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedDocument {
    pub filename: String,
    pub reference: String,
    pub document: ArchiveDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReference {
    pub filename: String,
    pub reference: String,
}

/// Everything assembled from one workbook, in emission order.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub batch: Batch,
    pub documents: Vec<PlannedDocument>,
    pub issues: Vec<IngestIssue>,
}

/// Outcome of ingesting one workbook.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<Batch>,
    pub written: Vec<String>,
    pub skipped: Vec<String>,
    pub errors: Vec<IngestIssue>,
    pub references: Vec<DocumentReference>,
}

impl IngestReport {
    /// A report for a workbook that never reached assembly.
    pub fn rejected(source: &str, issue: IngestIssue) -> Self {
        Self {
            source: source.to_string(),
            errors: vec![issue],
            ..Self::default()
        }
    }

    /// What ingesting would write, without writing: every planned
    /// document is listed under `references` only.
    pub fn planned(source: &str, assembly: Assembly) -> Self {
        Self {
            source: source.to_string(),
            batch: Some(assembly.batch),
            errors: assembly.issues,
            references: assembly
                .documents
                .into_iter()
                .map(|d| DocumentReference {
                    filename: d.filename,
                    reference: d.reference,
                })
                .collect(),
            ..Self::default()
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}
