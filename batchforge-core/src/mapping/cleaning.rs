use super::{common, indexed, non_empty, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    process::ProcessDetails,
    treatment::{CleaningDetails, PlasmaCleaning, SolventCleaning, UvOzoneCleaning},
};

/// Solvent baths `Solvent i` / `Time i` / `Temperature i`, then the
/// optional plasma and UV-ozone steps.
pub fn map_cleaning(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let solvent_steps = row
        .indices("Solvent {}")
        .into_iter()
        .filter_map(|i| {
            Some(SolventCleaning {
                solvent: common::substance(row, &indexed("Solvent {}", i), "")?,
                time: row.quantity(&indexed("Time {}", i)),
                temperature: row.quantity(&indexed("Temperature {}", i)),
            })
        })
        .collect();

    let details = CleaningDetails {
        solvent_steps,
        plasma: non_empty(PlasmaCleaning {
            gas: row.string("Gas-Plasma Gas"),
            time: row.quantity("Gas-Plasma Time"),
            power: row.quantity("Gas-Plasma Power"),
        }),
        uv_ozone: non_empty(UvOzoneCleaning {
            time: row.quantity("UV-Ozone Time"),
        }),
    };
    if details.is_empty() {
        return Err(MapError::MissingSection("cleaning step"));
    }
    Ok(ProcessDetails::Cleaning(details))
}
