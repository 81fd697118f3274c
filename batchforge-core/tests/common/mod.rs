#![allow(dead_code)]

use batchforge_core::{
    ingest::state::IngestReport,
    reference::ContainerId,
    sink::MemorySink,
    workbook::Workbook,
    IngestionBuilder,
};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;
use std::sync::Arc;

pub const CONTAINER: &str = "upload-test";

pub fn timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap()
}

/// A two-row-header workbook. Each block is `(group label, leaf labels)`;
/// each row lists the cells of all blocks left to right.
pub fn workbook(blocks: &[(&str, &[&str])], rows: &[&[&str]]) -> Workbook {
    let quote = |s: &str| format!("\"{}\"", s.replace('"', "\"\""));
    let mut groups = Vec::new();
    let mut leaves = Vec::new();
    for (label, columns) in blocks {
        for (i, column) in columns.iter().enumerate() {
            groups.push(if i == 0 { quote(label) } else { String::new() });
            leaves.push(quote(column));
        }
    }
    let mut csv = format!("{}\n{}\n", groups.join(","), leaves.join(","));
    for row in rows {
        let cells: Vec<String> = row.iter().map(|c| quote(c)).collect();
        csv.push_str(&cells.join(","));
        csv.push('\n');
    }
    Workbook::from_csv_reader(csv.as_bytes(), "test.csv").unwrap()
}

pub fn container() -> ContainerId {
    ContainerId::new(CONTAINER)
}

pub fn ingest_into(sink: &Arc<MemorySink>, workbook: &Workbook) -> IngestReport {
    IngestionBuilder::new()
        .with_container_id(container())
        .with_sink(sink.clone())
        .with_timestamp(timestamp())
        .build()
        .unwrap()
        .ingest_workbook(workbook, "test.csv")
}

/// Like `ingest_into`, leaving documents that already exist in place.
pub fn ingest_keeping_existing(sink: &Arc<MemorySink>, workbook: &Workbook) -> IngestReport {
    IngestionBuilder::new()
        .with_container_id(container())
        .with_sink(sink.clone())
        .with_timestamp(timestamp())
        .with_overwrite(false)
        .build()
        .unwrap()
        .ingest_workbook(workbook, "test.csv")
}

pub fn ingest(workbook: &Workbook) -> (IngestReport, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let report = ingest_into(&sink, workbook);
    (report, sink)
}

/// The `data` object of a stored document.
pub fn data(sink: &MemorySink, filename: &str) -> Value {
    sink.documents(&container())
        .into_iter()
        .find(|(name, _)| name == filename)
        .map(|(_, payload)| payload["data"].clone())
        .unwrap_or_else(|| panic!("{} was not written", filename))
}

/// Filenames of stored documents with the given `m_def`, in write order.
pub fn filenames_of(sink: &MemorySink, m_def: &str) -> Vec<String> {
    sink.documents(&container())
        .into_iter()
        .filter(|(_, payload)| payload["data"]["m_def"] == m_def)
        .map(|(name, _)| name)
        .collect()
}

pub fn as_f64(value: &Value) -> f64 {
    value.as_f64().unwrap_or_else(|| panic!("{} is not a number", value))
}

pub fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(f64::MIN_POSITIVE);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{} differs from {}",
        actual,
        expected
    );
}

pub fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap_or_else(|| panic!("{} is not an array", value))
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

pub const SUBSTRATE_COLUMNS: &[&str] = &[
    "Nomad ID",
    "Sample dimension",
    "Sample area [cm^2]",
    "Number of pixels",
    "Pixel area [cm^2]",
    "Substrate material",
    "Substrate conductive layer",
];
