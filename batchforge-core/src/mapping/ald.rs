//! Atomic layer deposition.

use super::{common, non_empty, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    process::ProcessDetails,
    vapor::{AldDetails, AldMaterial, AldProperties},
};

pub fn map_ald(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let properties = non_empty(AldProperties {
        source: row.string("Source"),
        thickness: row.quantity("Thickness"),
        temperature: row.quantity("Temperature"),
        rate: row.quantity("Rate"),
        time: row.quantity("Time"),
        number_of_cycles: row.count("Number of cycles"),
    });
    let precursor = common::substance(row, "Precursor 1", "Precursor 1 chemical ID").map(|material| {
        AldMaterial {
            material,
            pulse_duration: row.quantity("Pulse duration 1"),
            manifold_temperature: row.quantity("Manifold temperature 1"),
            bottle_temperature: row.quantity("Bottle temperature 1"),
        }
    });
    let oxidizer_reducer = common::substance(
        row,
        "Precursor 2 (Oxidizer/Reducer)",
        "Precursor 2 chemical ID",
    )
    .map(|material| AldMaterial {
        material,
        pulse_duration: row.quantity("Pulse duration 2"),
        manifold_temperature: row.quantity("Manifold temperature 2"),
        bottle_temperature: None,
    });

    Ok(ProcessDetails::Ald(AldDetails {
        properties,
        precursor,
        oxidizer_reducer,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::test_support::block;
    use batchforge_schemas::measurement::Quantity;

    #[test]
    fn precursor_and_oxidizer_are_separate_materials() {
        let wb = block(
            "ALD",
            &[
                "Material name",
                "Thickness [nm]",
                "Number of cycles",
                "Precursor 1",
                "Pulse duration 1 [s]",
                "Bottle temperature 1 [°C]",
                "Precursor 2 (Oxidizer/Reducer)",
                "Manifold temperature 2 [°C]",
            ],
            &[&["SnO2", "20", "150", "TDMASn", "1.2", "65", "H2O", "80"]],
        );
        let group = wb.groups()[1];
        let ProcessDetails::Ald(details) = map_ald(&BlockRow::new(group.label(), group.row(0))).unwrap() else {
            panic!("not an ALD");
        };
        let properties = details.properties.unwrap();
        assert_eq!(properties.number_of_cycles, Some(150));
        assert_eq!(properties.thickness, Some(Quantity::new(20.0, "nm")));
        let precursor = details.precursor.unwrap();
        assert_eq!(precursor.material.name, "TDMASn");
        assert_eq!(precursor.bottle_temperature, Some(Quantity::new(65.0, "°C")));
        let oxidizer = details.oxidizer_reducer.unwrap();
        assert_eq!(oxidizer.material.name, "H2O");
        assert_eq!(oxidizer.manifold_temperature, Some(Quantity::new(80.0, "°C")));
        assert_eq!(oxidizer.pulse_duration, None);
    }
}
