//! Sub-sections shared between block kinds.

use super::{indexed, non_empty, BlockRow};
use crate::chemical;
use batchforge_schemas::{
    chemical::{PureSubstanceReference, SolutionChemical},
    deposition::{Annealing, Atmosphere, Solution},
    process::{Layer, ProcessKind},
};

pub const MATERIAL_NAME: &str = "Material name";

/// The material a deposition block lays down. Co-evaporation blocks list
/// their sources as `Material name i`; those are joined with `:`.
pub fn material_name(row: &BlockRow<'_>, kind: ProcessKind) -> Option<String> {
    if let Some(name) = row.string(MATERIAL_NAME) {
        return Some(name);
    }
    if kind != ProcessKind::CoEvaporation {
        return None;
    }
    let names: Vec<String> = row
        .indices("Material name {}")
        .into_iter()
        .filter_map(|i| row.string(&indexed("Material name {}", i)))
        .collect();
    (!names.is_empty()).then(|| names.join(":"))
}

pub fn layer(row: &BlockRow<'_>, material: &str) -> Layer {
    Layer {
        layer_type: row
            .string("Layer type")
            .unwrap_or_else(|| infer_layer_type(material).to_string()),
        material_name: material.to_string(),
    }
}

/// Guesses the role of a layer from keywords in its material name.
pub fn infer_layer_type(material: &str) -> &'static str {
    const RULES: &[(&[&str], &str)] = &[
        (&["perovskite", "pbi", "fapbi", "mapbi", "cspb"], "Absorber"),
        (&["sno2", "tio2", "zno", "pcbm", "c60", "bcp"], "Electron Transport Layer"),
        (&["spiro", "ptaa", "nio", "2pacz", "pedot", "p3ht"], "Hole Transport Layer"),
        (&["lif"], "Buffer Layer"),
    ];
    const ELECTRODES: &[&str] = &["au", "ag", "cu", "al", "ito", "izo"];

    let lower = material.to_lowercase();
    if let Some((_, layer_type)) = RULES
        .iter()
        .find(|(keys, _)| keys.iter().any(|k| lower.contains(k)))
    {
        return *layer_type;
    }
    // Electrode symbols are too short for substring matching.
    let is_electrode = lower
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .all(|t| ELECTRODES.contains(&t));
    if is_electrode && !lower.trim().is_empty() {
        "Electrode"
    } else {
        "Other"
    }
}

/// A substance from a name column and an optional id column.
pub fn substance(row: &BlockRow<'_>, name: &str, id: &str) -> Option<PureSubstanceReference> {
    let name = row.string(name)?;
    Some(chemical::resolve(&name, row.string(id).as_deref()))
}

pub fn annealing(row: &BlockRow<'_>) -> Option<Annealing> {
    non_empty(Annealing {
        time: row.quantity("Annealing time"),
        temperature: row.quantity("Annealing temperature"),
        atmosphere: row.string_of(&["Annealing athmosphere", "Annealing atmosphere"]),
    })
}

pub fn atmosphere(row: &BlockRow<'_>) -> Option<Atmosphere> {
    non_empty(Atmosphere {
        relative_humidity: row.quantity("rel. humidity"),
        oxygen_level: row.quantity("O2"),
        water_level: row.quantity("H2O"),
    })
}

/// Solvents and solutes of a coating solution, in index order.
pub fn solution(row: &BlockRow<'_>) -> Option<Solution> {
    let solvents = row
        .indices("Solvent {} name")
        .into_iter()
        .filter_map(|i| {
            let mut chemical = SolutionChemical::of(substance(
                row,
                &indexed("Solvent {} name", i),
                &indexed("Solvent {} chemical ID", i),
            )?);
            chemical.volume = row.quantity(&indexed("Solvent {} volume", i));
            chemical.amount_relative = row.number(&indexed("Solvent {} relative amount", i));
            Some(chemical)
        })
        .collect();
    let solutes = row
        .indices("Solute {} name")
        .into_iter()
        .filter_map(|i| {
            let mut chemical = SolutionChemical::of(substance(
                row,
                &indexed("Solute {} name", i),
                &indexed("Solute {} chemical ID", i),
            )?);
            chemical.concentration_mol = row.quantity(&indexed("Solute {} Concentration", i));
            Some(chemical)
        })
        .collect();
    non_empty(Solution {
        solvents,
        solutes,
        volume: row.quantity("Solution volume"),
    })
}
