use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Workbook '{0}' is not an eligible batch workbook: {1}")]
    Ineligible(String, String),

    #[error("Workbook header is malformed: {0}")]
    HeaderMalformed(String),

    #[error("Unsupported workbook format '{0}'")]
    UnsupportedFormat(String),

    #[error("Archive container id is missing")]
    ContainerNotDefined,

    #[error("Archive sink is missing")]
    SinkNotDefined,

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to read spreadsheet '{0}': {1}")]
    Spreadsheet(String, #[source] calamine::Error),

    #[error("Failed to read CSV workbook '{0}': {1}")]
    CsvError(String, #[source] csv::Error),

    #[error("Failed to serialize document: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("'{filename}' already holds a different entity ({existing}), refusing to overwrite")]
    Conflict { filename: String, existing: String },

    #[error("'{filename}' already holds {existing} with different content, refusing to overwrite")]
    Changed { filename: String, existing: String },

    #[error("I/O error for archive '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Archive '{0}' is not valid JSON: {1}")]
    Corrupt(String, #[source] serde_json::Error),

    #[error("'{0}' is not a valid archive filename")]
    InvalidFilename(String),
}

/// A mapper could not turn a row into an entity.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MapError {
    #[error("row carries no {0}")]
    MissingSection(&'static str),
}
