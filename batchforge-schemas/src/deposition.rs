//! Solution-based deposition steps and the sub-sections they share.

use crate::{
    chemical::{PureSubstanceReference, SolutionChemical},
    measurement::Quantity,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solution {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solvents: Vec<SolutionChemical>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solutes: Vec<SolutionChemical>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Annealing {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<String>,
}

/// Ambient conditions in the glovebox or room during the step.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Atmosphere {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxygen_level: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_level: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpinCoatingRecipeStep {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceleration: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AntisolventQuenching {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub antisolvent: Option<PureSubstanceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropping_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropping_speed: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropping_height: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GasQuenching {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_rate: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nozzle_shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nozzle_size: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VacuumQuenching {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AirKnifeQuenching {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<Quantity>,
    /// Distance between knife and film, stored in µm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bead_volume: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drying_speed: Option<Quantity>,
}

/// Post-deposition solvent removal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Quenching {
    Antisolvent(AntisolventQuenching),
    Gas(GasQuenching),
    Vacuum(VacuumQuenching),
    AirKnife(AirKnifeQuenching),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SpinCoatingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recipe_steps: Vec<SpinCoatingRecipeStep>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quenching: Vec<Quenching>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annealing: Option<Annealing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlotDieProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow_rate: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_gap: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_speed: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chuck_temperature: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SlotDieCoatingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<SlotDieProperties>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quenching: Vec<Quenching>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annealing: Option<Annealing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DipCoatingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dipping_duration: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annealing: Option<Annealing>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrintHeadProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_nozzle_count: Option<u32>,
    /// Free-form nozzle selector as typed, e.g. `"1-128"` or `"all"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_nozzles: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droplet_density_x: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droplet_density_y: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droplet_frequency: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub droplet_volume: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_angle: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_to_substrate_distance: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_speed: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrintTableProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cartridge_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate_temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate_thickness: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub printed_area: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PrintHeadPath {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directional: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swaths: Option<u32>,
}

/// Gas-assisted vacuum drying after printing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GavdQuenching {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacuum_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vacuum_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_flow_duration: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_flow_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nozzle_shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nozzle_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InkjetPrintingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Solution>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_head: Option<PrintHeadProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<PrintTableProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print_head_path: Option<PrintHeadPath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nozzle_voltage_config_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atmosphere: Option<Atmosphere>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gavd: Option<GavdQuenching>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annealing: Option<Annealing>,
}
