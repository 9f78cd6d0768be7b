//! Shared fixtures for integration tests.

#![allow(dead_code)]

use pv_sizing::catalog::{Catalog, WiringConfig};
use pv_sizing::config::ProjectConfig;
use pv_sizing::sizing::{CalculationInput, DesignReport, InverterBlock};

/// Reference installation (480 x 445 W, 24 strings, 6 x 30 kW 3P4W, 380 V).
pub fn reference_input() -> CalculationInput {
    ProjectConfig::default_plant().to_input()
}

/// Inverter group at 380 V.
pub fn block(id: &str, count: u32, kw: f64, wiring: WiringConfig, run_m: f64) -> InverterBlock {
    InverterBlock {
        id: id.to_string(),
        unit_count: count,
        unit_power_kw: kw,
        output_voltage: 380.0,
        wiring,
        run_length_m: run_m,
    }
}

/// Reference system parameters with the given groups and a consistent AC capacity.
pub fn input_with_blocks(blocks: Vec<InverterBlock>) -> CalculationInput {
    let ac_capacity_kw = blocks.iter().map(InverterBlock::total_power_kw).sum();
    CalculationInput {
        ac_capacity_kw,
        inverter_blocks: blocks,
        ..reference_input()
    }
}

/// Runs the full pipeline against the built-in tables.
pub fn calculate(input: &CalculationInput) -> DesignReport {
    DesignReport::calculate(input, &Catalog::standard())
}

/// Absolute-tolerance float comparison.
pub fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}
