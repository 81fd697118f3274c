use crate::measurement::Quantity;
use serde::{Deserialize, Serialize};

/// A lightweight handle to a chemical.
///
/// Looking the substance up in a registry is left to whoever consumes the
/// archive, so `load_data` stays `false` in every document written here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PureSubstanceReference {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default)]
    pub load_data: bool,
}

/// One chemical inside a solution, with whichever amounts were recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolutionChemical {
    pub substance: PureSubstanceReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration_mol: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concentration_mass: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_relative: Option<f64>,
}

impl SolutionChemical {
    pub fn of(substance: PureSubstanceReference) -> Self {
        Self {
            substance,
            volume: None,
            mass: None,
            concentration_mol: None,
            concentration_mass: None,
            amount_relative: None,
        }
    }
}
