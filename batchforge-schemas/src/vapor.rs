//! Vacuum and vapor-phase deposition steps.

use crate::{chemical::PureSubstanceReference, measurement::Quantity};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaporationSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substance: Option<PureSubstanceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_rate: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_rate: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooling_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pressure: Option<Quantity>,
    /// `[start, end]`, either end `null` when not recorded; empty when
    /// neither was.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_temperature: Vec<Option<Quantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate_temperature: Option<Quantity>,
}

/// Exactly one of `organic` / `inorganic` is filled by the mapper.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaporationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organic: Option<EvaporationSource>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inorganic: Option<EvaporationSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoEvaporationMaterial {
    pub material: PureSubstanceReference,
    /// Same `[start, end]` layout as `EvaporationSource::source_temperature`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub source_temperature: Vec<Option<Quantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate_temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooling_factor: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoEvaporationDetails {
    /// Ordered by the material index in the column labels.
    pub materials: Vec<CoEvaporationMaterial>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SputteringRun {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PureSubstanceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas: Option<PureSubstanceReference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deposition_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub burn_in_time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation_rate: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gas_flow_rate: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SputteringDetails {
    pub run: SputteringRun,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AldProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_cycles: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AldMaterial {
    pub material: PureSubstanceReference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pulse_duration: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifold_temperature: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bottle_temperature: Option<Quantity>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AldDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<AldProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precursor: Option<AldMaterial>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oxidizer_reducer: Option<AldMaterial>,
}
