//! Batch-level entities: the batch aggregate, its samples, and the
//! substrates those samples were built on.

use crate::measurement::Quantity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A set of samples fabricated together under one experimental plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub lab_id: String,
    pub name: String,
    pub datetime: DateTime<Utc>,
    /// Sample ids in workbook row order.
    pub sample_ids: Vec<String>,
    /// Archive references of the samples, parallel to `sample_ids`.
    pub sample_references: Vec<String>,
}

/// One physical device, exactly one per Experiment-Info row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub lab_id: String,
    pub name: String,
    pub datetime: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to the emitted substrate document.
    pub substrate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_junctions: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subbatch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substrate {
    pub lab_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_area: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pixel_area: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_pixels: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub substrate_material: Option<String>,
    /// Kept verbatim as written in the workbook.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conductive_layers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
