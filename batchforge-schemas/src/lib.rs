//! Data model for fabrication batches as written to the archive.

pub mod batch;
pub mod chemical;
pub mod deposition;
pub mod file_formats;
pub mod measurement;
pub mod process;
pub mod treatment;
pub mod vapor;
