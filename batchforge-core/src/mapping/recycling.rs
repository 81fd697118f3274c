//! Recovering solutes from used ink.

use super::{common, indexed, non_empty, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    chemical::SolutionChemical,
    process::ProcessDetails,
    treatment::{FunctionalLiquid, InkRecyclingDetails, RecyclingFilter, RecyclingInk, RecyclingResults},
};

pub fn map_ink_recycling(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let solvents = row
        .indices("Solvent {} name")
        .into_iter()
        .filter_map(|i| {
            let mut chemical = SolutionChemical::of(common::substance(
                row,
                &indexed("Solvent {} name", i),
                &indexed("Solvent {} chemical ID", i),
            )?);
            chemical.volume = row.quantity(&indexed("Solvent {} volume", i));
            Some(chemical)
        })
        .collect();
    let solutes = row
        .indices("Solute {} name")
        .into_iter()
        .filter_map(|i| {
            let mut chemical = SolutionChemical::of(common::substance(
                row,
                &indexed("Solute {} name", i),
                &indexed("Solute {} chemical ID", i),
            )?);
            chemical.mass = row.quantity(&indexed("Solute {} mass", i));
            chemical.concentration_mol = row.quantity(&indexed("Solute {} Concentration", i));
            Some(chemical)
        })
        .collect();
    let precursors = row
        .indices("Precursor {} name")
        .into_iter()
        .filter_map(|i| {
            common::substance(
                row,
                &indexed("Precursor {} name", i),
                &indexed("Precursor {} chemical ID", i),
            )
        })
        .collect();

    Ok(ProcessDetails::InkRecycling(InkRecyclingDetails {
        ink: non_empty(RecyclingInk {
            solvents,
            solutes,
            precursors,
        }),
        functional_liquid: non_empty(FunctionalLiquid {
            name: row.string("Functional liquid name"),
            volume: row.quantity("Functional liquid volume"),
            dissolving_temperature: row.quantity("Dissolving temperature"),
        }),
        filter: non_empty(RecyclingFilter {
            material_type: row.string("Filter material"),
            size: row.quantity("Filter size"),
            weight: row.quantity("Filter weight"),
        }),
        results: non_empty(RecyclingResults {
            recovered_solute: row.quantity("Recovered solute"),
            yield_percent: row.number("Yield"),
        }),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::test_support::block;
    use batchforge_schemas::measurement::Quantity;

    #[test]
    fn precursors_are_plain_substances() {
        let wb = block(
            "Ink Recycling",
            &["Precursor 1 name", "Precursor 1 chemical ID", "Precursor 2 name", "Filter size [mm]"],
            &[&["PbI2", "10101-63-0", "", "0.45"]],
        );
        let group = wb.groups()[1];
        let ProcessDetails::InkRecycling(details) =
            map_ink_recycling(&BlockRow::new(group.label(), group.row(0))).unwrap()
        else {
            panic!("not an ink recycling");
        };
        let ink = details.ink.unwrap();
        assert_eq!(ink.precursors.len(), 1);
        assert_eq!(ink.precursors[0].external_id.as_deref(), Some("10101-63-0"));
        assert!(ink.solvents.is_empty());
        assert_eq!(details.filter.unwrap().size, Some(Quantity::new(0.45, "mm")));
        assert_eq!(details.results, None);
    }
}
