//! Thermal evaporation from one source, or from several at once.

use super::{common, indexed, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    measurement::Quantity,
    process::ProcessDetails,
    vapor::{CoEvaporationDetails, CoEvaporationMaterial, EvaporationDetails, EvaporationSource},
};

/// The `Organic` flag decides which of the two sources is filled; only an
/// organic source names its substance.
pub fn map_evaporation(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let organic = row.bool("Organic").unwrap_or(false);
    let source = EvaporationSource {
        substance: if organic {
            common::substance(row, common::MATERIAL_NAME, "Chemical ID")
        } else {
            None
        },
        thickness: row.quantity("Thickness"),
        start_rate: row.quantity("Rate start"),
        target_rate: row.quantity("Rate target"),
        tooling_factor: row.number("Tooling factor"),
        base_pressure: row.quantity("Base pressure"),
        start_pressure: row.quantity("Pressure start"),
        end_pressure: row.quantity("Pressure end"),
        source_temperature: source_temperatures(
            row,
            "Source temperature start",
            "Source temperature end",
        ),
        substrate_temperature: row.quantity("Substrate temperature"),
    };
    let details = if organic {
        EvaporationDetails {
            organic: Some(source),
            inorganic: None,
        }
    } else {
        EvaporationDetails {
            organic: None,
            inorganic: Some(source),
        }
    };
    Ok(ProcessDetails::Evaporation(details))
}

/// One entry per `Material name i` with a name, `i` ascending.
pub fn map_co_evaporation(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let materials: Vec<_> = row
        .indices("Material name {}")
        .into_iter()
        .filter_map(|i| {
            let at = |pattern: &str| indexed(pattern, i);
            Some(CoEvaporationMaterial {
                material: common::substance(row, &at("Material name {}"), &at("Chemical ID {}"))?,
                source_temperature: source_temperatures(
                    row,
                    &at("Source temperature start {}"),
                    &at("Source temperature end {}"),
                ),
                thickness: row.quantity(&at("Thickness {}")),
                rate: row.quantity(&at("Rate {}")),
                base_pressure: row.quantity(&at("Base pressure {}")),
                start_pressure: row.quantity(&at("Pressure start {}")),
                end_pressure: row.quantity(&at("Pressure end {}")),
                substrate_temperature: row.quantity(&at("Substrate temperature {}")),
                tooling_factor: row.number(&at("Tooling factor {}")),
            })
        })
        .collect();
    if materials.is_empty() {
        return Err(MapError::MissingSection("co-evaporation material"));
    }
    Ok(ProcessDetails::CoEvaporation(CoEvaporationDetails { materials }))
}

/// Always both positions, so an end-only reading is not taken for a start.
fn source_temperatures(row: &BlockRow<'_>, start: &str, end: &str) -> Vec<Option<Quantity>> {
    match (row.quantity(start), row.quantity(end)) {
        (None, None) => Vec::new(),
        (start, end) => vec![start, end],
    }
}
