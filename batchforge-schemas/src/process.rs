use crate::{deposition, treatment, vapor};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of fabrication step kinds a workbook block can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessKind {
    Cleaning,
    SpinCoating,
    SlotDieCoating,
    DipCoating,
    InkjetPrinting,
    Evaporation,
    CoEvaporation,
    Sputtering,
    Ald,
    LaserScribing,
    InkRecycling,
    GenericProcess,
}

impl ProcessKind {
    pub const ALL: [ProcessKind; 12] = [
        ProcessKind::Cleaning,
        ProcessKind::SpinCoating,
        ProcessKind::SlotDieCoating,
        ProcessKind::DipCoating,
        ProcessKind::InkjetPrinting,
        ProcessKind::Evaporation,
        ProcessKind::CoEvaporation,
        ProcessKind::Sputtering,
        ProcessKind::Ald,
        ProcessKind::LaserScribing,
        ProcessKind::InkRecycling,
        ProcessKind::GenericProcess,
    ];

    /// Tag used both as the document discriminator and inside filenames.
    pub fn tag(&self) -> &'static str {
        match self {
            ProcessKind::Cleaning => "cleaning",
            ProcessKind::SpinCoating => "spin_coating",
            ProcessKind::SlotDieCoating => "slot_die_coating",
            ProcessKind::DipCoating => "dip_coating",
            ProcessKind::InkjetPrinting => "inkjet_printing",
            ProcessKind::Evaporation => "evaporation",
            ProcessKind::CoEvaporation => "co_evaporation",
            ProcessKind::Sputtering => "sputtering",
            ProcessKind::Ald => "ald",
            ProcessKind::LaserScribing => "laser_scribing",
            ProcessKind::InkRecycling => "ink_recycling",
            ProcessKind::GenericProcess => "generic_process",
        }
    }

    /// Human-readable prefix for process names.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProcessKind::Cleaning => "Cleaning",
            ProcessKind::SpinCoating => "Spin Coating",
            ProcessKind::SlotDieCoating => "Slot Die Coating",
            ProcessKind::DipCoating => "Dip Coating",
            ProcessKind::InkjetPrinting => "Inkjet Printing",
            ProcessKind::Evaporation => "Evaporation",
            ProcessKind::CoEvaporation => "Co-Evaporation",
            ProcessKind::Sputtering => "Sputtering",
            ProcessKind::Ald => "Atomic Layer Deposition",
            ProcessKind::LaserScribing => "Laser Scribing",
            ProcessKind::InkRecycling => "Ink Recycling",
            ProcessKind::GenericProcess => "Generic Process",
        }
    }

    /// Deposition-type kinds only materialize when a material name is given.
    pub fn requires_material_name(&self) -> bool {
        !matches!(
            self,
            ProcessKind::Cleaning
                | ProcessKind::LaserScribing
                | ProcessKind::InkRecycling
                | ProcessKind::GenericProcess
        )
    }
}

impl fmt::Display for ProcessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub layer_type: String,
    pub material_name: String,
}

/// One fabrication step shared by every sample of an equivalence class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessStep {
    pub lab_id: String,
    pub name: String,
    pub position_in_experimental_plan: usize,
    pub datetime: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    pub sample_ids: Vec<String>,
    pub sample_references: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layer: Option<Layer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_process: Option<String>,
    #[serde(flatten)]
    pub details: ProcessDetails,
}

impl ProcessStep {
    pub fn kind(&self) -> ProcessKind {
        self.details.kind()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProcessDetails {
    Cleaning(treatment::CleaningDetails),
    SpinCoating(deposition::SpinCoatingDetails),
    SlotDieCoating(deposition::SlotDieCoatingDetails),
    DipCoating(deposition::DipCoatingDetails),
    InkjetPrinting(deposition::InkjetPrintingDetails),
    Evaporation(vapor::EvaporationDetails),
    CoEvaporation(vapor::CoEvaporationDetails),
    Sputtering(vapor::SputteringDetails),
    Ald(vapor::AldDetails),
    LaserScribing(treatment::LaserScribingDetails),
    InkRecycling(treatment::InkRecyclingDetails),
    GenericProcess(treatment::GenericProcessDetails),
}

impl ProcessDetails {
    pub fn kind(&self) -> ProcessKind {
        match self {
            ProcessDetails::Cleaning(_) => ProcessKind::Cleaning,
            ProcessDetails::SpinCoating(_) => ProcessKind::SpinCoating,
            ProcessDetails::SlotDieCoating(_) => ProcessKind::SlotDieCoating,
            ProcessDetails::DipCoating(_) => ProcessKind::DipCoating,
            ProcessDetails::InkjetPrinting(_) => ProcessKind::InkjetPrinting,
            ProcessDetails::Evaporation(_) => ProcessKind::Evaporation,
            ProcessDetails::CoEvaporation(_) => ProcessKind::CoEvaporation,
            ProcessDetails::Sputtering(_) => ProcessKind::Sputtering,
            ProcessDetails::Ald(_) => ProcessKind::Ald,
            ProcessDetails::LaserScribing(_) => ProcessKind::LaserScribing,
            ProcessDetails::InkRecycling(_) => ProcessKind::InkRecycling,
            ProcessDetails::GenericProcess(_) => ProcessKind::GenericProcess,
        }
    }
}
