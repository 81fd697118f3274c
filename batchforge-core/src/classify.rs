//! Group label to block kind.

use crate::workbook::EXPERIMENT_INFO;
use batchforge_schemas::process::ProcessKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Info,
    Process(ProcessKind),
}

/// Case-insensitive substring rules; the first matching rule wins.
/// Labels that match nothing become generic processes.
pub fn classify(label: &str) -> BlockKind {
    if label.trim() == EXPERIMENT_INFO {
        return BlockKind::Info;
    }
    let label = label.to_lowercase();
    let has = |needles: &[&str]| needles.iter().all(|n| label.contains(n));

    let kind = if has(&["cleaning"]) {
        ProcessKind::Cleaning
    } else if has(&["laser", "scribing"]) {
        ProcessKind::LaserScribing
    } else if has(&["ink", "recycling"]) {
        ProcessKind::InkRecycling
    } else if has(&["generic", "process"]) {
        ProcessKind::GenericProcess
    } else if has(&["co", "evaporation"]) {
        ProcessKind::CoEvaporation
    } else if has(&["evaporation"]) {
        ProcessKind::Evaporation
    } else if has(&["spin", "coating"]) {
        ProcessKind::SpinCoating
    } else if has(&["slot", "die", "coating"]) {
        ProcessKind::SlotDieCoating
    } else if has(&["dip", "coating"]) {
        ProcessKind::DipCoating
    } else if has(&["inkjet", "printing"]) {
        ProcessKind::InkjetPrinting
    } else if has(&["sputtering"]) {
        ProcessKind::Sputtering
    } else if has(&["ald"]) {
        ProcessKind::Ald
    } else {
        ProcessKind::GenericProcess
    };
    BlockKind::Process(kind)
}
