//! Free-form blocks: every filled column becomes a parameter.

use super::{units, BlockRow};
use crate::{coerce, error::MapError};
use batchforge_schemas::{
    process::ProcessDetails,
    treatment::{GenericProcessDetails, ParameterValue, ProcessParameter},
};

/// Columns that name or annotate the step rather than parametrize it.
/// `Date`, `Operator` and `Location` also fill the step's own fields but
/// are kept as parameters.
const RESERVED: &[&str] = &["Name", "Notes"];

pub fn map_generic_process(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let parameters = row
        .iter()
        .filter(|(label, _)| !RESERVED.contains(&units::label_name(label)))
        .filter_map(|(label, cell)| {
            let value = match coerce::coerce_number(Some(cell)) {
                Some(n) => ParameterValue::Number(n),
                None => ParameterValue::Text(coerce::coerce_string(Some(cell))?),
            };
            Some(ProcessParameter {
                name: units::label_name(label).to_string(),
                unit: units::label_unit(label).map(str::to_string),
                value,
            })
        })
        .collect();
    Ok(ProcessDetails::GenericProcess(GenericProcessDetails { parameters }))
}
