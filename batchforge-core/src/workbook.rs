//! Two-row-header workbooks.
//!
//! Row 1 carries group labels (merged across the columns of a group, so
//! blank cells inherit the label to their left), row 2 carries leaf
//! column labels, and every further row is data. Groups are contiguous
//! runs of columns sharing a label, in workbook order.

use crate::error::IngestError;
use calamine::{open_workbook_auto, Data, Reader, Xlsx};
use std::fs::File;
use std::io::{Cursor, Read};
use std::ops::Range;
use std::path::Path;

pub const EXPERIMENT_INFO: &str = "Experiment Info";
pub const SAMPLE_ID_COLUMN: &str = "Nomad ID";

/// One spreadsheet cell as read from the file.
#[derive(Debug, Clone)]
pub enum Cell {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

impl Cell {
    /// Empty, NaN, or whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => n.is_nan(),
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Bool(_) => false,
        }
    }
}

/// Blank equals blank (empty, NaN, or whitespace text); anything else compares structurally.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        if self.is_blank() || other.is_blank() {
            return self.is_blank() && other.is_blank();
        }
        match (self, other) {
            (Cell::Number(a), Cell::Number(b)) => a == b,
            (Cell::Text(a), Cell::Text(b)) => a == b,
            (Cell::Bool(a), Cell::Bool(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&Data> for Cell {
    fn from(data: &Data) -> Self {
        match data {
            Data::Empty | Data::Error(_) => Cell::Empty,
            Data::String(s) if s.is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Bool(b) => Cell::Bool(*b),
            Data::DateTime(dt) => Cell::Number(dt.as_f64()),
            Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Workbook {
    group_labels: Vec<String>,
    labels: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// A first-level group: a label and the contiguous columns under it.
#[derive(Debug, Clone, Copy)]
pub struct Group<'a> {
    workbook: &'a Workbook,
    columns: &'a [String],
    label: &'a str,
    range: (usize, usize),
}

/// One data row restricted to the columns of a group.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    labels: &'a [String],
    cells: &'a [Cell],
}

impl Workbook {
    /// Opens a workbook by extension: `.csv` through the CSV reader, any
    /// spreadsheet format through calamine (first worksheet).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, IngestError> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "csv" => {
                let file = File::open(path).map_err(|e| IngestError::FileIO(display.clone(), e))?;
                Self::from_csv_reader(file, &display)
            }
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => {
                let mut sheets = open_workbook_auto(path)
                    .map_err(|e| IngestError::Spreadsheet(display.clone(), e))?;
                let range = sheets
                    .worksheet_range_at(0)
                    .ok_or_else(|| IngestError::HeaderMalformed(format!("'{}' has no worksheet", display)))?
                    .map_err(|e| IngestError::Spreadsheet(display.clone(), e))?;
                Self::from_grid(range.rows().map(|row| row.iter().map(Cell::from).collect()).collect())
            }
            other => Err(IngestError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Reads an `.xlsx` container held in memory.
    pub fn from_xlsx_bytes(bytes: Vec<u8>) -> Result<Self, IngestError> {
        let source = "<xlsx bytes>".to_string();
        let mut xlsx: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| IngestError::Spreadsheet(source.clone(), e.into()))?;
        let range = xlsx
            .worksheet_range_at(0)
            .ok_or_else(|| IngestError::HeaderMalformed("workbook has no worksheet".to_string()))?
            .map_err(|e| IngestError::Spreadsheet(source, e.into()))?;
        Self::from_grid(range.rows().map(|row| row.iter().map(Cell::from).collect()).collect())
    }

    /// Reads a CSV stream whose first two records are the header rows.
    pub fn from_csv_reader<R: Read>(reader: R, source: &str) -> Result<Self, IngestError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut grid = Vec::new();
        for record in csv_reader.records() {
            let record = record.map_err(|e| IngestError::CsvError(source.to_string(), e))?;
            grid.push(
                record
                    .iter()
                    .map(|field| {
                        if field.is_empty() {
                            Cell::Empty
                        } else {
                            Cell::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }
        Self::from_grid(grid)
    }

    pub fn from_grid(mut grid: Vec<Vec<Cell>>) -> Result<Self, IngestError> {
        if grid.len() < 2 {
            return Err(IngestError::HeaderMalformed(
                "expected two header rows".to_string(),
            ));
        }
        let data = grid.split_off(2);
        let leaf_row = grid.pop().unwrap_or_default();
        let group_row = grid.pop().unwrap_or_default();

        let header_text = |row: &[Cell], i: usize| {
            row.get(i).and_then(|c| crate::coerce::coerce_string(Some(c)))
        };
        let width = (0..group_row.len().max(leaf_row.len()))
            .rev()
            .find(|&i| header_text(&group_row, i).is_some() || header_text(&leaf_row, i).is_some())
            .map_or(0, |last| last + 1);
        if width == 0 {
            return Err(IngestError::HeaderMalformed("header rows are empty".to_string()));
        }

        let mut group_labels = Vec::with_capacity(width);
        let mut labels = Vec::with_capacity(width);
        let mut current_group: Option<String> = None;
        for i in 0..width {
            if let Some(label) = header_text(&group_row, i) {
                current_group = Some(label);
            }
            let group = current_group.clone().ok_or_else(|| {
                IngestError::HeaderMalformed("first column has no group label".to_string())
            })?;
            group_labels.push(group);
            labels.push(header_text(&leaf_row, i).unwrap_or_else(|| format!("Unnamed: {}", i)));
        }

        let rows = data
            .into_iter()
            .map(|mut row| {
                row.resize(width, Cell::Empty);
                row
            })
            .collect();

        Ok(Self {
            group_labels,
            labels,
            rows,
        })
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// First-level groups in column order.
    pub fn groups(&self) -> Vec<Group<'_>> {
        let mut groups = Vec::new();
        let mut start = 0;
        for i in 1..=self.group_labels.len() {
            if i == self.group_labels.len() || self.group_labels[i] != self.group_labels[start] {
                groups.push(Group {
                    workbook: self,
                    columns: &self.labels[start..i],
                    label: &self.group_labels[start],
                    range: (start, i),
                });
                start = i;
            }
        }
        groups
    }

    pub fn group(&self, label: &str) -> Option<Group<'_>> {
        self.groups().into_iter().find(|g| g.label == label)
    }

    /// True iff the Experiment-Info group exists and has at least one sample id.
    pub fn has_sample_ids(&self) -> bool {
        self.group(EXPERIMENT_INFO).map_or(false, |info| {
            info.contains(SAMPLE_ID_COLUMN)
                && (0..info.row_count()).any(|r| {
                    info.row(r)
                        .get(SAMPLE_ID_COLUMN)
                        .map_or(false, |c| !c.is_blank())
                })
        })
    }
}

impl<'a> Group<'a> {
    pub fn label(&self) -> &'a str {
        self.label
    }

    pub fn columns(&self) -> &'a [String] {
        self.columns
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    pub fn row_count(&self) -> usize {
        self.workbook.rows.len()
    }

    fn range(&self) -> Range<usize> {
        self.range.0..self.range.1
    }

    pub fn row(&self, index: usize) -> RowView<'a> {
        let workbook: &'a Workbook = self.workbook;
        RowView {
            labels: self.columns,
            cells: &workbook.rows[index][self.range()],
        }
    }
}

impl<'a> RowView<'a> {
    /// First cell under `label`, if the column exists.
    pub fn get(&self, label: &str) -> Option<&'a Cell> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| &self.cells[i])
    }

    pub fn labels(&self) -> &'a [String] {
        self.labels
    }

    pub fn cells(&self) -> &'a [Cell] {
        self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> + 'a {
        let labels: &'a [String] = self.labels;
        let cells: &'a [Cell] = self.cells;
        labels.iter().map(String::as_str).zip(cells.iter())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_blank)
    }
}

/// Eligibility check that never fails: header present, Experiment-Info
/// group present, and at least one sample id filled in.
pub fn is_eligible<P: AsRef<Path>>(path: P) -> bool {
    match Workbook::open(path.as_ref()) {
        Ok(workbook) => workbook.has_sample_ids(),
        Err(e) => {
            tracing::debug!("{} is not eligible: {}", path.as_ref().display(), e);
            false
        }
    }
}
