//! Bill of materials built from complete designs.

mod common;

use common::{block, calculate, input_with_blocks, reference_input};
use pv_sizing::bom::build_bom;
use pv_sizing::bom::export::{BomFormat, write_bom};
use pv_sizing::catalog::WiringConfig;

#[test]
fn line_count_grows_with_groups() {
    let one = reference_input();
    let three = input_with_blocks(vec![
        block("a", 4, 50.0, WiringConfig::ThreePhaseThreeWire, 70.0),
        block("b", 2, 25.0, WiringConfig::ThreePhaseFourWire, 30.0),
        block("c", 1, 110.0, WiringConfig::ThreePhaseThreeWire, 90.0),
    ]);
    let bom_one = build_bom(&one, &calculate(&one));
    let bom_three = build_bom(&three, &calculate(&three));
    // one inverter line plus breaker, cable and conduit per group
    assert_eq!(bom_three.len() - bom_one.len(), 2 * 4);
}

#[test]
fn group_lines_appear_in_input_order() {
    let input = input_with_blocks(vec![
        block("a", 4, 50.0, WiringConfig::ThreePhaseThreeWire, 70.0),
        block("b", 2, 25.0, WiringConfig::ThreePhaseFourWire, 30.0),
    ]);
    let items = build_bom(&input, &calculate(&input));
    let cables: Vec<(&str, f64)> = items
        .iter()
        .filter(|i| i.description.starts_with("AC Cable Group"))
        .map(|i| (i.description.as_str(), i.quantity))
        .collect();
    assert_eq!(
        cables,
        [("AC Cable Group 1", 4.0 * 3.0 * 70.0), ("AC Cable Group 2", 2.0 * 4.0 * 30.0)]
    );
    let trunk = items
        .iter()
        .find(|i| i.description == "AC Cable Tray Trunk")
        .expect("trunk tray line");
    assert_eq!(trunk.quantity, 70.0);
}

#[test]
fn parallel_main_runs_multiply_cable_length() {
    let input = input_with_blocks(vec![block(
        "central",
        9,
        110.0,
        WiringConfig::ThreePhaseThreeWire,
        45.0,
    )]);
    let report = calculate(&input);
    let items = build_bom(&input, &report);
    let cable = items
        .iter()
        .find(|i| i.description == "Main Output Cable")
        .expect("main cable line");
    let runs = report.main.main_cable_runs;
    assert!(runs > 1);
    assert_eq!(cable.quantity, f64::from(runs) * 3.0 * 15.0);
    assert_eq!(cable.remarks, format!("{runs} runs (3P3W)"));
}

#[test]
fn exported_table_has_one_row_per_item() {
    let input = reference_input();
    let items = build_bom(&input, &calculate(&input));
    let mut buf = Vec::new();
    write_bom(&items, &mut buf, BomFormat::Csv).expect("write to memory");

    let mut rdr = csv::Reader::from_reader(buf.as_slice());
    let headers = rdr.headers().expect("header row").clone();
    assert_eq!(headers.len(), 6);
    let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().expect("rows");
    assert_eq!(rows.len(), items.len());
    assert_eq!(&rows[0][1], "PV Modules");
    assert_eq!(&rows[0][4], "480");
}
