//! Per-block mappers: one workbook row of a process block to the
//! kind-specific part of a process document.
//!
//! Columns are looked up by their label without the unit bracket, so a
//! mapper asks for `Annealing time` and gets the value converted from
//! whatever unit the workbook declared (`[min]`, `[s]`, ...). A sub-section
//! is only emitted when at least one of its fields came out non-empty.

pub mod ald;
pub mod cleaning;
pub mod coating;
pub mod common;
pub mod evaporation;
pub mod generic;
pub mod inkjet;
pub mod laser;
pub mod recycling;
pub mod sputtering;
pub mod units;

use crate::{coerce, error::MapError, workbook::{Cell, RowView}};
use batchforge_schemas::{
    measurement::Quantity,
    process::{ProcessDetails, ProcessKind},
};
use chrono::{DateTime, Utc};
use std::{cell::RefCell, collections::HashMap, fmt};

/// A cell that should have held a number but did not.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    pub column: String,
    pub value: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column '{}' holds non-numeric value '{}'", self.column, self.value)
    }
}

/// Typed access to one row of a block, collecting conversion problems
/// on the side instead of failing the row.
pub struct BlockRow<'a> {
    group_label: &'a str,
    row: RowView<'a>,
    issues: RefCell<Vec<FieldIssue>>,
}

impl<'a> BlockRow<'a> {
    pub fn new(group_label: &'a str, row: RowView<'a>) -> Self {
        Self {
            group_label,
            row,
            issues: RefCell::new(Vec::new()),
        }
    }

    pub fn group_label(&self) -> &'a str {
        self.group_label
    }

    /// First column whose label, without unit, equals `name`.
    pub fn column(&self, name: &str) -> Option<(&'a str, &'a Cell)> {
        self.row
            .iter()
            .find(|(label, _)| units::label_name(label) == name)
    }

    pub fn cell(&self, name: &str) -> Option<&'a Cell> {
        self.column(name).map(|(_, cell)| cell)
    }

    /// True if any of `names` exists and is non-blank.
    pub fn any(&self, names: &[&str]) -> bool {
        names
            .iter()
            .any(|n| self.cell(n).map_or(false, |c| !c.is_blank()))
    }

    pub fn string(&self, name: &str) -> Option<String> {
        coerce::coerce_string(self.cell(name))
    }

    /// First non-blank string among `names`.
    pub fn string_of(&self, names: &[&str]) -> Option<String> {
        names.iter().find_map(|n| self.string(n))
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        let (label, cell) = self.column(name)?;
        let value = coerce::coerce_number(Some(cell));
        if value.is_none() && !cell.is_blank() {
            self.record(label, cell);
        }
        value
    }

    pub fn count(&self, name: &str) -> Option<u32> {
        let (label, cell) = self.column(name)?;
        let value = coerce::coerce_count(Some(cell));
        if value.is_none() && !cell.is_blank() {
            self.record(label, cell);
        }
        value
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        coerce::coerce_bool(self.cell(name))
    }

    pub fn datetime(&self, name: &str) -> Option<DateTime<Utc>> {
        coerce::coerce_datetime(self.cell(name))
    }

    /// The number converted from the label's unit to the stored unit.
    pub fn quantity(&self, name: &str) -> Option<Quantity> {
        let (label, cell) = self.column(name)?;
        let declared = units::label_unit(label).unwrap_or("");
        let (factor, unit) = units::conversion(declared);
        let Some(read) = coerce::coerce_quantity(Some(cell), declared) else {
            if !cell.is_blank() {
                self.record(label, cell);
            }
            return None;
        };
        Some(read.converted(factor, unit))
    }

    /// Indices `i` for which a column named `pattern` with `{}` replaced
    /// by `i` exists, ascending.
    pub fn indices(&self, pattern: &str) -> Vec<usize> {
        let (prefix, suffix) = pattern.split_once("{}").unwrap_or((pattern, ""));
        let mut found: Vec<usize> = self
            .row
            .labels()
            .iter()
            .filter_map(|label| {
                units::label_name(label)
                    .strip_prefix(prefix)?
                    .strip_suffix(suffix)?
                    .trim()
                    .parse()
                    .ok()
            })
            .collect();
        found.sort_unstable();
        found.dedup();
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> + 'a {
        self.row.iter()
    }

    pub fn into_issues(self) -> Vec<FieldIssue> {
        self.issues.into_inner()
    }

    fn record(&self, label: &str, cell: &Cell) {
        self.issues.borrow_mut().push(FieldIssue {
            column: label.to_string(),
            value: coerce::coerce_string(Some(cell)).unwrap_or_default(),
        });
    }
}

/// `pattern` with `{}` replaced by `index`.
pub fn indexed(pattern: &str, index: usize) -> String {
    pattern.replacen("{}", &index.to_string(), 1)
}

/// `Some(value)` unless every field is empty.
pub fn non_empty<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

pub type MapperFn = fn(&BlockRow<'_>) -> Result<ProcessDetails, MapError>;

/// Which mapper handles which process kind. Built once and handed to the
/// ingestion; entries may be replaced.
#[derive(Clone)]
pub struct MapperRegistry {
    mappers: HashMap<ProcessKind, MapperFn>,
}

impl MapperRegistry {
    pub fn empty() -> Self {
        Self {
            mappers: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(ProcessKind::Cleaning, cleaning::map_cleaning);
        registry.register(ProcessKind::SpinCoating, coating::map_spin_coating);
        registry.register(ProcessKind::SlotDieCoating, coating::map_slot_die_coating);
        registry.register(ProcessKind::DipCoating, coating::map_dip_coating);
        registry.register(ProcessKind::InkjetPrinting, inkjet::map_inkjet_printing);
        registry.register(ProcessKind::Evaporation, evaporation::map_evaporation);
        registry.register(ProcessKind::CoEvaporation, evaporation::map_co_evaporation);
        registry.register(ProcessKind::Sputtering, sputtering::map_sputtering);
        registry.register(ProcessKind::Ald, ald::map_ald);
        registry.register(ProcessKind::LaserScribing, laser::map_laser_scribing);
        registry.register(ProcessKind::InkRecycling, recycling::map_ink_recycling);
        registry.register(ProcessKind::GenericProcess, generic::map_generic_process);
        registry
    }

    /// Installs `mapper` for `kind`, returning the one it replaces.
    pub fn register(&mut self, kind: ProcessKind, mapper: MapperFn) -> Option<MapperFn> {
        self.mappers.insert(kind, mapper)
    }

    pub fn get(&self, kind: ProcessKind) -> Option<MapperFn> {
        self.mappers.get(&kind).copied()
    }
}

impl Default for MapperRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.mappers.keys().map(ProcessKind::tag).collect();
        kinds.sort_unstable();
        f.debug_struct("MapperRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::workbook::Workbook;

    /// A two-row-header workbook with one block and the given rows.
    pub fn block(group: &str, header: &[&str], rows: &[&[&str]]) -> Workbook {
        let quote = |s: &str| format!("\"{}\"", s.replace('"', "\"\""));
        let mut csv = String::new();
        let mut groups = vec![quote("Experiment Info")];
        groups.push(quote(group));
        groups.extend(header.iter().skip(1).map(|_| String::new()));
        csv.push_str(&groups.join(","));
        csv.push('\n');
        let mut leaves = vec![quote("Nomad ID")];
        leaves.extend(header.iter().map(|h| quote(h)));
        csv.push_str(&leaves.join(","));
        csv.push('\n');
        for (i, row) in rows.iter().enumerate() {
            let mut cells = vec![format!("S_{}", i + 1)];
            cells.extend(row.iter().map(|c| quote(c)));
            csv.push_str(&cells.join(","));
            csv.push('\n');
        }
        Workbook::from_csv_reader(csv.as_bytes(), "test").unwrap()
    }
}
