//! Wet-coating blocks: spin, slot-die and dip coating.

use super::{common, indexed, non_empty, BlockRow};
use crate::error::MapError;
use batchforge_schemas::{
    deposition::{
        AirKnifeQuenching, AntisolventQuenching, DipCoatingDetails, GasQuenching, Quenching,
        SlotDieCoatingDetails, SlotDieProperties, SpinCoatingDetails, SpinCoatingRecipeStep,
        VacuumQuenching,
    },
    process::ProcessDetails,
};

pub fn map_spin_coating(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let mut quenching = Vec::new();
    quenching.extend(antisolvent(row).map(Quenching::Antisolvent));
    quenching.extend(gas_quenching(row).map(Quenching::Gas));
    quenching.extend(vacuum_quenching(row).map(Quenching::Vacuum));

    Ok(ProcessDetails::SpinCoating(SpinCoatingDetails {
        solution: common::solution(row),
        recipe_steps: recipe_steps(row),
        quenching,
        annealing: common::annealing(row),
        atmosphere: common::atmosphere(row),
    }))
}

pub fn map_slot_die_coating(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    let air_knife = non_empty(AirKnifeQuenching {
        angle: row.quantity("Air knife angle"),
        gap: row.quantity("Air knife gap"),
        bead_volume: row.quantity("Bead volume"),
        drying_speed: row.quantity("Drying speed"),
    });
    Ok(ProcessDetails::SlotDieCoating(SlotDieCoatingDetails {
        solution: common::solution(row),
        properties: non_empty(SlotDieProperties {
            flow_rate: row.quantity("Flow rate"),
            head_gap: row.quantity("Head gap"),
            head_speed: row.quantity("Speed"),
            chuck_temperature: row.quantity("Chuck temperature"),
        }),
        quenching: air_knife.map(Quenching::AirKnife).into_iter().collect(),
        annealing: common::annealing(row),
        atmosphere: common::atmosphere(row),
    }))
}

pub fn map_dip_coating(row: &BlockRow<'_>) -> Result<ProcessDetails, MapError> {
    Ok(ProcessDetails::DipCoating(DipCoatingDetails {
        solution: common::solution(row),
        dipping_duration: row.quantity("Dipping duration"),
        annealing: common::annealing(row),
        atmosphere: common::atmosphere(row),
    }))
}

/// A single unindexed step, or one step per `Rotation speed i`.
fn recipe_steps(row: &BlockRow<'_>) -> Vec<SpinCoatingRecipeStep> {
    let step = |speed: &str, time: &str, acceleration: &str| {
        non_empty(SpinCoatingRecipeStep {
            speed: row.quantity(speed),
            time: row.quantity(time),
            acceleration: row.quantity(acceleration),
        })
    };
    if let Some(single) = step("Rotation speed", "Rotation time", "Acceleration") {
        return vec![single];
    }
    row.indices("Rotation speed {}")
        .into_iter()
        .filter_map(|i| {
            step(
                &indexed("Rotation speed {}", i),
                &indexed("Rotation time {}", i),
                &indexed("Acceleration {}", i),
            )
        })
        .collect()
}

fn antisolvent(row: &BlockRow<'_>) -> Option<AntisolventQuenching> {
    non_empty(AntisolventQuenching {
        antisolvent: common::substance(row, "Anti solvent name", "Anti solvent chemical ID"),
        volume: row.quantity("Anti solvent volume"),
        dropping_time: row.quantity("Anti solvent dropping time"),
        dropping_speed: row.quantity("Anti solvent dropping speed"),
        dropping_height: row.quantity("Anti solvent dropping height"),
    })
}

fn gas_quenching(row: &BlockRow<'_>) -> Option<GasQuenching> {
    non_empty(GasQuenching {
        gas: row.string("Gas"),
        start_time: row.quantity("Gas quenching start time"),
        duration: row.quantity("Gas quenching duration"),
        flow_rate: row.quantity("Gas quenching flow rate"),
        pressure: row.quantity("Gas quenching pressure"),
        velocity: row.quantity("Gas quenching velocity"),
        height: row.quantity("Gas quenching height"),
        nozzle_shape: row.string("Nozzle shape"),
        nozzle_size: row.quantity("Nozzle size"),
    })
}

fn vacuum_quenching(row: &BlockRow<'_>) -> Option<VacuumQuenching> {
    non_empty(VacuumQuenching {
        start_time: row.quantity("Vacuum quenching start time"),
        duration: row.quantity("Vacuum quenching duration"),
        pressure: row.quantity("Vacuum quenching pressure"),
    })
}
