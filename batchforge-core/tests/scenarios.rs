mod common;

use batchforge_core::reference::ReferenceMinter;
use common::*;

const GLASS_ITO: &[&str] = &["1x1 cm", "0.16", "6", "0.16", "Glass", "ITO"];

fn info_row(id: &str, rest: &[&str]) -> Vec<String> {
    let mut row = vec![id.to_string()];
    row.extend(GLASS_ITO.iter().map(|s| s.to_string()));
    row.extend(rest.iter().map(|s| s.to_string()));
    row
}

fn rows(rows: &[Vec<String>]) -> Vec<Vec<&str>> {
    rows.iter().map(|r| r.iter().map(String::as_str).collect()).collect()
}

fn refs<'a, 'b>(rows: &'a [Vec<&'b str>]) -> Vec<&'a [&'b str]> {
    rows.iter().map(Vec::as_slice).collect()
}

#[test]
fn info_only_workbook_yields_batch_substrate_and_samples() {
    let owned = vec![
        info_row("HZB_P_1_1", &[]),
        info_row("HZB_P_1_2", &[]),
        info_row("HZB_P_1_3", &[]),
    ];
    let cells = rows(&owned);
    let wb = workbook(&[("Experiment Info", SUBSTRATE_COLUMNS)], &refs(&cells));
    let (report, sink) = ingest(&wb);

    assert!(report.is_clean(), "{:?}", report.errors);
    assert_eq!(report.written.len(), 5);
    assert_eq!(
        report.written,
        [
            "HZB_P_1.archive.json",
            "0_substrate.archive.json",
            "HZB_P_1_1.archive.json",
            "HZB_P_1_2.archive.json",
            "HZB_P_1_3.archive.json",
        ]
    );
    assert!(filenames_of(&sink, "Process").is_empty());

    let batch = data(&sink, "HZB_P_1.archive.json");
    assert_eq!(batch["m_def"], "Batch");
    assert_eq!(strings(&batch["sample_ids"]), ["HZB_P_1_1", "HZB_P_1_2", "HZB_P_1_3"]);

    let substrate = data(&sink, "0_substrate.archive.json");
    assert_eq!(substrate["substrate_material"], "Glass");
    assert_eq!(strings(&substrate["conductive_layers"]), ["ITO"]);
    assert_eq!(substrate["number_of_pixels"], 6);
    assert_close(as_f64(&substrate["active_area"]["value"]), 0.16);
    assert_eq!(substrate["active_area"]["unit"], "cm^2");

    let substrate_ref = ReferenceMinter::default().mint(&container(), "0_substrate.archive.json");
    for id in ["HZB_P_1_1", "HZB_P_1_2", "HZB_P_1_3"] {
        let sample = data(&sink, &format!("{}.archive.json", id));
        assert_eq!(sample["lab_id"], id);
        assert_eq!(sample["substrate"], substrate_ref.as_str());
    }
}

#[test]
fn shared_spin_coat_parameters_collapse_to_one_process() {
    let spin_columns: &[&str] = &[
        "Material name",
        "Solvent 1 name",
        "Solvent 1 volume [uL]",
        "Solute 1 name",
        "Solute 1 Concentration [mM]",
        "Rotation speed [rpm]",
        "Rotation time [s]",
        "Acceleration [rpm/s]",
        "Annealing time [min]",
        "Annealing temperature [°C]",
        "Annealing athmosphere",
    ];
    let spin = ["PbI2", "DMF", "10", "PbI2", "1.42", "1500", "30", "500", "30", "120", "N2"];
    let owned = vec![info_row("HZB_P_1_1", &spin), info_row("HZB_P_1_2", &spin)];
    let cells = rows(&owned);
    let wb = workbook(
        &[("Experiment Info", SUBSTRATE_COLUMNS), ("Spin Coating", spin_columns)],
        &refs(&cells),
    );
    let (report, sink) = ingest(&wb);
    assert!(report.is_clean(), "{:?}", report.errors);

    assert_eq!(filenames_of(&sink, "Process"), ["1_0_spin_coating_PbI2.archive.json"]);
    let process = data(&sink, "1_0_spin_coating_PbI2.archive.json");
    assert_eq!(process["kind"], "spin_coating");
    assert_eq!(process["position_in_experimental_plan"], 1);
    assert_eq!(strings(&process["sample_ids"]), ["HZB_P_1_1", "HZB_P_1_2"]);
    assert_eq!(process["layer"]["material_name"], "PbI2");
    assert_eq!(process["layer"]["layer_type"], "Absorber");

    let solvent = &process["solution"]["solvents"][0];
    assert_eq!(solvent["substance"]["name"], "DMF");
    assert_eq!(solvent["substance"]["load_data"], false);
    assert_close(as_f64(&solvent["volume"]["value"]), 0.01);
    assert_eq!(solvent["volume"]["unit"], "ml");

    let solute = &process["solution"]["solutes"][0];
    assert_close(as_f64(&solute["concentration_mol"]["value"]), 0.00142);
    assert_eq!(solute["concentration_mol"]["unit"], "mol/L");

    let step = &process["recipe_steps"][0];
    assert_close(as_f64(&step["speed"]["value"]), 1500.0);
    assert_close(as_f64(&step["time"]["value"]), 30.0);
    assert_close(as_f64(&step["acceleration"]["value"]), 500.0);

    assert_close(as_f64(&process["annealing"]["time"]["value"]), 1800.0);
    assert_eq!(process["annealing"]["time"]["unit"], "s");
    assert_close(as_f64(&process["annealing"]["temperature"]["value"]), 120.0);
    assert_eq!(process["annealing"]["atmosphere"], "N2");
}

#[test]
fn diverging_cleaning_rows_split_into_classes() {
    let cleaning_columns: &[&str] = &["Solvent 1", "Time 1 [s]", "Temperature 1 [°C]"];
    let owned = vec![
        info_row("HZB_P_1_1", &["Hellmanex", "30", "60"]),
        info_row("HZB_P_1_2", &["Hellmanex", "30", "61"]),
        info_row("HZB_P_1_3", &["Hellmanex", "30", "60"]),
    ];
    let cells = rows(&owned);
    let wb = workbook(
        &[("Experiment Info", SUBSTRATE_COLUMNS), ("Cleaning", cleaning_columns)],
        &refs(&cells),
    );
    let (report, sink) = ingest(&wb);
    assert!(report.is_clean(), "{:?}", report.errors);

    assert_eq!(
        filenames_of(&sink, "Process"),
        ["1_0_cleaning.archive.json", "1_1_cleaning.archive.json"]
    );
    let first = data(&sink, "1_0_cleaning.archive.json");
    let second = data(&sink, "1_1_cleaning.archive.json");
    assert_eq!(strings(&first["sample_ids"]), ["HZB_P_1_1", "HZB_P_1_3"]);
    assert_eq!(strings(&second["sample_ids"]), ["HZB_P_1_2"]);
    assert_eq!(first["position_in_experimental_plan"], 1);
    assert_eq!(second["position_in_experimental_plan"], 1);
    assert_close(as_f64(&second["solvent_steps"][0]["temperature"]["value"]), 61.0);
    assert!(first.get("layer").is_none());
}

#[test]
fn blank_material_name_suppresses_the_deposition_only() {
    let evaporation_columns: &[&str] = &["Material name", "Thickness [nm]", "Rate start [angstrom/s]"];
    let cleaning_columns: &[&str] = &["Solvent 1", "Time 1 [s]"];
    let owned = vec![
        info_row("HZB_P_1_1", &["", "80", "0.5", "IPA", "10"]),
        info_row("HZB_P_1_2", &["Au", "80", "0.5", "IPA", "10"]),
    ];
    let cells = rows(&owned);
    let wb = workbook(
        &[
            ("Experiment Info", SUBSTRATE_COLUMNS),
            ("Evaporation", evaporation_columns),
            ("Cleaning", cleaning_columns),
        ],
        &refs(&cells),
    );
    let (report, sink) = ingest(&wb);
    assert!(report.is_clean(), "{:?}", report.errors);

    let evaporation = data(&sink, "1_1_evaporation_Au.archive.json");
    assert_eq!(strings(&evaporation["sample_ids"]), ["HZB_P_1_2"]);
    assert_eq!(filenames_of(&sink, "Process").len(), 2);

    let batch = data(&sink, "HZB_P_1.archive.json");
    assert!(strings(&batch["sample_ids"]).contains(&"HZB_P_1_1".to_string()));
    let cleaning = data(&sink, "2_0_cleaning.archive.json");
    assert_eq!(strings(&cleaning["sample_ids"]), ["HZB_P_1_1", "HZB_P_1_2"]);
}

#[test]
fn co_evaporation_keeps_every_material_in_index_order() {
    let columns: &[&str] = &[
        "Material name 1",
        "Source temperature start 1 [°C]",
        "Thickness 1 [nm]",
        "Rate 1 [angstrom/s]",
        "Material name 2",
        "Source temperature start 2 [°C]",
        "Thickness 2 [nm]",
        "Rate 2 [angstrom/s]",
    ];
    let owned = vec![info_row(
        "HZB_P_1_1",
        &["Cu", "1200", "5", "0.2", "Au", "1100", "10", "0.4"],
    )];
    let cells = rows(&owned);
    let wb = workbook(
        &[("Experiment Info", SUBSTRATE_COLUMNS), ("Co-Evaporation", columns)],
        &refs(&cells),
    );
    let (report, sink) = ingest(&wb);
    assert!(report.is_clean(), "{:?}", report.errors);

    let process = data(&sink, "1_0_co_evaporation_Cu_Au.archive.json");
    assert_eq!(process["kind"], "co_evaporation");
    let materials = process["materials"].as_array().unwrap();
    assert_eq!(materials.len(), 2);
    assert_eq!(materials[0]["material"]["name"], "Cu");
    assert_eq!(materials[1]["material"]["name"], "Au");
    assert_close(as_f64(&materials[0]["source_temperature"][0]["value"]), 1200.0);
    assert_close(as_f64(&materials[1]["thickness"]["value"]), 10.0);
    assert_close(as_f64(&materials[1]["rate"]["value"]), 0.4);
    assert_eq!(process["layer"]["material_name"], "Cu:Au");
}

#[test]
fn ink_recycling_record_is_complete() {
    let columns: &[&str] = &[
        "Solvent 1 name",
        "Solvent 1 volume [mL]",
        "Solute 1 name",
        "Solute 1 mass [g]",
        "Solute 1 Concentration [mol/L]",
        "Functional liquid name",
        "Functional liquid volume [mL]",
        "Dissolving temperature [°C]",
        "Filter material",
        "Filter size [mm]",
        "Filter weight [g]",
        "Recovered solute [g]",
        "Yield [%]",
    ];
    let owned = vec![info_row(
        "HZB_P_1_1",
        &["DMF", "10", "PbI2", "5", "1.5", "FL", "25", "60", "paper", "0.45", "0.5", "4.2", "84"],
    )];
    let cells = rows(&owned);
    let wb = workbook(
        &[("Experiment Info", SUBSTRATE_COLUMNS), ("Ink Recycling", columns)],
        &refs(&cells),
    );
    let (report, sink) = ingest(&wb);
    assert!(report.is_clean(), "{:?}", report.errors);

    let process = data(&sink, "1_0_ink_recycling.archive.json");
    assert_eq!(process["kind"], "ink_recycling");
    assert_close(as_f64(&process["results"]["yield_percent"]), 84.0);
    assert_close(as_f64(&process["results"]["recovered_solute"]["value"]), 4.2);
    assert_eq!(process["results"]["recovered_solute"]["unit"], "g");

    let ink = &process["ink"];
    assert_eq!(ink["solvents"].as_array().unwrap().len(), 1);
    assert_eq!(ink["solutes"].as_array().unwrap().len(), 1);
    assert_close(as_f64(&ink["solvents"][0]["volume"]["value"]), 10.0);
    assert_eq!(ink["solvents"][0]["volume"]["unit"], "ml");
    assert_close(as_f64(&ink["solutes"][0]["mass"]["value"]), 5.0);
    assert_eq!(ink["solutes"][0]["mass"]["unit"], "g");
    assert_close(as_f64(&ink["solutes"][0]["concentration_mol"]["value"]), 1.5);
    assert_eq!(ink["solutes"][0]["concentration_mol"]["unit"], "mol/L");

    assert_eq!(process["functional_liquid"]["name"], "FL");
    assert_close(as_f64(&process["functional_liquid"]["volume"]["value"]), 25.0);
    assert_close(as_f64(&process["functional_liquid"]["dissolving_temperature"]["value"]), 60.0);
    assert_eq!(process["filter"]["material_type"], "paper");
    assert_close(as_f64(&process["filter"]["size"]["value"]), 0.45);
    assert_close(as_f64(&process["filter"]["weight"]["value"]), 0.5);
    assert!(process.get("layer").is_none());
}
