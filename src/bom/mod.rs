//! Bill-of-materials transcription from a calculated design.
//!
//! Quantities combine engine selections with pass-through run lengths from
//! the input; nothing here re-sizes a component.

pub mod export;

use serde::Serialize;

use crate::sizing::{CalculationInput, DesignReport};

/// Conductors per main output run (3P3W grid connection).
const MAIN_WIRES_PER_RUN: f64 = 3.0;

/// One BOM row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BomLineItem {
    /// 1-based position in the list.
    pub sequence_number: u32,
    pub description: String,
    pub specification: String,
    pub unit: &'static str,
    pub quantity: f64,
    pub remarks: String,
}

/// Sequential line-item builder.
struct BomList {
    items: Vec<BomLineItem>,
}

impl BomList {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn push(
        &mut self,
        description: impl Into<String>,
        specification: impl Into<String>,
        unit: &'static str,
        quantity: f64,
        remarks: impl Into<String>,
    ) {
        let sequence_number = u32::try_from(self.items.len() + 1).unwrap_or(u32::MAX);
        self.items.push(BomLineItem {
            sequence_number,
            description: description.into(),
            specification: specification.into(),
            unit,
            quantity,
            remarks: remarks.into(),
        });
    }
}

/// Builds the full line-item list for one design.
pub fn build_bom(input: &CalculationInput, report: &DesignReport) -> Vec<BomLineItem> {
    let mut bom = BomList::new();
    let strings = f64::from(input.string_count);
    let dc = &report.dc;
    let main = &report.main;

    bom.push(
        "PV Modules",
        format!("{}W (Voc: 39.41V)", input.panel_power_w),
        "pcs",
        f64::from(input.panel_count),
        format!("Total DC: {} kWp", input.dc_capacity_kwp),
    );

    for (i, block) in input.inverter_blocks.iter().enumerate() {
        bom.push(
            format!("Inverter Group {}", i + 1),
            format!(
                "{}kW, {}V ({})",
                block.unit_power_kw, block.output_voltage, block.wiring
            ),
            "Set",
            f64::from(block.unit_count),
            format!("Subtotal: {} kW", block.total_power_kw()),
        );
    }

    bom.push(
        "DC Cable",
        format!("PV 1000V 1C-{}mm²", dc.cable_cross_section_mm2),
        "m",
        input.dc_run_length_m * strings * 2.0,
        format!("For {} Strings", input.string_count),
    );
    bom.push(
        "Grounding Cable",
        "PVC 3.5mm²",
        "m",
        input.dc_run_length_m * strings,
        "Est. BoS",
    );
    bom.push(
        "DC Cable Tray",
        dc.tray.description.clone(),
        "m",
        input.dc_run_length_m * f64::from(dc.tray.quantity),
        format!("Fill: {:.1}%", dc.tray.fill_ratio_pct),
    );

    for (i, res) in report.inverters.iter().enumerate() {
        let group = i + 1;
        let conductor_length = f64::from(res.wire_count()) * res.run_length_m;
        bom.push(
            format!("Inverter Breaker Group {group}"),
            res.breaker.to_string(),
            "pcs",
            f64::from(res.unit_count),
            format!("Per Inv ({:.0}A)", res.design_current_a),
        );
        bom.push(
            format!("AC Cable Group {group}"),
            format!("XLPE 600V 1C-{}mm²", res.cable_size_mm2),
            "m",
            conductor_length,
            res.wiring.to_string(),
        );
        bom.push(
            format!("AC Conduit Group {group}"),
            conduit_spec(res.conduit_diameter_mm),
            "m",
            conductor_length,
            "1 Wire/Conduit",
        );
    }

    bom.push(
        "AC Cable Tray Trunk",
        main.trunk_tray.description.clone(),
        "m",
        input.max_inverter_run_m(),
        format!("Trunk Fill: {:.1}%", main.trunk_tray.fill_ratio_pct),
    );
    bom.push(
        "Main Breaker",
        main.breaker.to_string(),
        "pcs",
        1.0,
        format!("Main Switchboard ({} kW)", input.ac_capacity_kw),
    );
    bom.push(
        "Copper Busbar",
        main.busbar.description.clone(),
        "Set",
        1.0,
        format!("Rated for {:.0}A", main.design_current_a),
    );

    let main_conductor_length =
        f64::from(main.main_cable_runs) * MAIN_WIRES_PER_RUN * input.main_run_length_m;
    bom.push(
        "Main Output Cable",
        format!("XLPE 600V 1C-{}mm²", main.main_cable_size_mm2),
        "m",
        main_conductor_length,
        format!("{} runs (3P3W)", main.main_cable_runs),
    );
    bom.push(
        "Main Conduit",
        conduit_spec(main.main_conduit_diameter_mm),
        "m",
        main_conductor_length,
        "1 Wire/Conduit Rule",
    );

    bom.push(
        "Mounting Structure",
        "Aluminum/Hot-Dip Galv.",
        "kW",
        input.dc_capacity_kwp,
        "BoS Item",
    );
    bom.push("Weather Station", "Pyranometer + Temp", "Set", 1.0, "BoS Item");
    bom.push("Data Logger", "Standard", "Set", 1.0, "BoS Item");

    bom.items
}

fn conduit_spec(diameter_mm: Option<u32>) -> String {
    match diameter_mm {
        Some(d) => format!("RSG {d}mm"),
        None => "RSG (not tabulated)".to_string(),
    }
}
