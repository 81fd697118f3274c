use super::{common, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    process::ProcessDetails,
    vapor::{SputteringDetails, SputteringRun},
};

pub fn map_sputtering(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let run = SputteringRun {
        target: common::substance(row, "Target", "Target chemical ID"),
        gas: common::substance(row, "Gas", "Gas chemical ID"),
        temperature: row.quantity("Temperature"),
        pressure: row.quantity("Pressure"),
        deposition_time: row.quantity("Deposition time"),
        burn_in_time: row.quantity("Burn in time"),
        power: row.quantity("Power"),
        rotation_rate: row.quantity("Rotation rate"),
        thickness: row.quantity("Thickness"),
        gas_flow_rate: row.quantity("Gas flow rate"),
    };
    Ok(ProcessDetails::Sputtering(SputteringDetails { run }))
}
