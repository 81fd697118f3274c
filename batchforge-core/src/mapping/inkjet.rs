use super::{common, non_empty, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    deposition::{
        GavdQuenching, InkjetPrintingDetails, PrintHeadPath, PrintHeadProperties,
        PrintTableProperties,
    },
    process::ProcessDetails,
};

pub fn map_inkjet_printing(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let print_head = non_empty(PrintHeadProperties {
        name: row.string("Printhead name"),
        active_nozzle_count: row.count("Number of active nozzles"),
        active_nozzles: row.string("Active nozzles"),
        droplet_density_x: row.quantity("Droplet density X"),
        droplet_density_y: row.quantity("Droplet density Y"),
        droplet_frequency: row.quantity("Droplet frequency"),
        droplet_volume: row.quantity("Droplet volume"),
        head_temperature: row.quantity("Printhead temperature"),
        head_angle: row.quantity("Printhead angle"),
        head_to_substrate_distance: row.quantity("Printhead distance to substrate"),
        print_speed: row.quantity("Print speed"),
    });
    let table = non_empty(PrintTableProperties {
        cartridge_pressure: row.quantity("Ink reservoir pressure"),
        substrate_temperature: row.quantity("Table temperature"),
        substrate_thickness: row.quantity("Substrate thickness"),
        printed_area: row.quantity("Printed area"),
        image_name: row.string("Image name"),
    });
    let print_head_path = non_empty(PrintHeadPath {
        quality_factor: row.number("Quality factor"),
        step_size: row.number("Step size"),
        directional: row.string("Directional"),
        swaths: row.count("Number of swaths"),
    });
    let gavd = non_empty(GavdQuenching {
        gas: row.string("GAVD Gas"),
        start_time: row.quantity("GAVD start time"),
        vacuum_pressure: row.quantity("GAVD vacuum pressure"),
        temperature: row.quantity("GAVD temperature"),
        vacuum_time: row.quantity("GAVD vacuum time"),
        gas_flow_duration: row.quantity("GAVD gas flow duration"),
        gas_flow_pressure: row.quantity("GAVD gas flow pressure"),
        nozzle_shape: row.string("GAVD nozzle shape"),
        nozzle_type: row.string("GAVD nozzle type"),
        comment: row.string("GAVD comment"),
    });

    Ok(ProcessDetails::InkjetPrinting(InkjetPrintingDetails {
        solution: common::solution(row),
        print_head,
        table,
        print_head_path,
        nozzle_voltage_config_file: row.string("Nozzle voltage config file"),
        atmosphere: common::atmosphere(row),
        gavd,
        annealing: common::annealing(row),
    }))
}
