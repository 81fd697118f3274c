//! Steps that are not layer depositions: cleaning, scribing, ink recovery,
//! and free-form lab processes.

use crate::{
    chemical::{PureSubstanceReference, SolutionChemical},
    measurement::Quantity,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolventCleaning {
    pub solvent: PureSubstanceReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlasmaCleaning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UvOzoneCleaning {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Quantity>,
}

/// Any non-empty combination of solvent baths, plasma and UV-ozone.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CleaningDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solvent_steps: Vec<SolventCleaning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plasma: Option<PlasmaCleaning>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uv_ozone: Option<UvOzoneCleaning>,
}

impl CleaningDetails {
    pub fn is_empty(&self) -> bool {
        self.solvent_steps.is_empty() && self.plasma.is_none() && self.uv_ozone.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaserScribingProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laser_wavelength: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laser_pulse_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laser_pulse_frequency: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fluence: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power_in_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dead_area: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell_width: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_cells: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LaserScribingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<LaserScribingProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecyclingInk {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solvents: Vec<SolutionChemical>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub solutes: Vec<SolutionChemical>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub precursors: Vec<PureSubstanceReference>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FunctionalLiquid {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dissolving_temperature: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecyclingFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecyclingResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovered_solute: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yield_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InkRecyclingDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ink: Option<RecyclingInk>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functional_liquid: Option<FunctionalLiquid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<RecyclingFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<RecyclingResults>,
}

/// Exactly one of the two value slots is occupied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ParameterValue {
    #[serde(rename = "value_number")]
    Number(f64),
    #[serde(rename = "value_string")]
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessParameter {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub value: ParameterValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GenericProcessDetails {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ProcessParameter>,
}
