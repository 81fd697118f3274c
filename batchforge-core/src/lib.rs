//! Turns two-row-header batch workbooks into cross-referenced archive
//! documents.

pub mod chemical;
pub mod classify;
pub mod coerce;
pub mod dedup;
pub mod error;
pub mod ingest;
pub mod logger;
pub mod mapping;
pub mod reference;
pub mod sink;
pub mod workbook;

pub use error::{IngestError, SinkError};
pub use ingest::{builder::IngestionBuilder, state::IngestReport, Ingestion};
