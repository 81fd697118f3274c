use super::{non_empty, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    process::ProcessDetails,
    treatment::{LaserScribingDetails, LaserScribingProperties},
};

pub fn map_laser_scribing(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let properties = non_empty(LaserScribingProperties {
        laser_wavelength: row.quantity("Laser wavelength"),
        laser_pulse_time: row.quantity("Laser pulse time"),
        laser_pulse_frequency: row.quantity("Laser pulse frequency"),
        speed: row.quantity("Speed"),
        fluence: row.quantity("Fluence"),
        power_in_percent: row.number("Power"),
        dead_area: row.quantity("Dead area"),
        cell_width: row.quantity("Cell width"),
        number_of_cells: row.count("Number of cells"),
    });
    Ok(ProcessDetails::LaserScribing(LaserScribingDetails {
        properties,
        recipe_file: row.string("Recipe file"),
    }))
}
