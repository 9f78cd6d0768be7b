//! DC string wiring stage.

use tracing::debug;

use crate::catalog::Catalog;

use super::current::bundle_area_mm2;
use super::tray::select_tray;
use super::types::{CalculationInput, DcResult};

/// Sizes the DC string wiring: two fixed-size conductors per string, all in
/// one tray run. No breaker or conduit is sized at this stage.
pub fn compute_dc_stage(input: &CalculationInput, catalog: &Catalog) -> DcResult {
    let cable = catalog.dc_cable();
    let total_wire_count = input.string_count.saturating_mul(2);
    let total_area = bundle_area_mm2(total_wire_count, cable.outer_diameter_mm);
    let tray = select_tray(catalog, total_area);

    debug!(
        strings = input.string_count,
        wires = total_wire_count,
        area_mm2 = total_area,
        "dc stage sized"
    );

    DcResult {
        cable_outer_diameter_mm: cable.outer_diameter_mm,
        cable_cross_section_mm2: cable.cross_section_mm2,
        total_wire_count,
        total_cross_section_area_mm2: total_area,
        tray,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_with_strings(string_count: u32) -> CalculationInput {
        CalculationInput {
            dc_capacity_kwp: 0.0,
            ac_capacity_kw: 0.0,
            string_count,
            panel_count: 0,
            panel_power_w: 0.0,
            inverter_blocks: Vec::new(),
            grid_voltage: 380.0,
            dc_run_length_m: 40.0,
            main_run_length_m: 15.0,
        }
    }

    #[test]
    fn twenty_four_strings() {
        let dc = compute_dc_stage(&input_with_strings(24), &Catalog::standard());
        assert_eq!(dc.total_wire_count, 48);
        assert_eq!(dc.cable_cross_section_mm2, 4);
        assert_eq!(dc.cable_outer_diameter_mm, 7.54);
        assert!((dc.total_cross_section_area_mm2 - 2143.2).abs() < 0.1);
        assert_eq!(dc.tray.description, "200x100 mm");
        assert_eq!(dc.tray.quantity, 1);
    }

    #[test]
    fn no_strings_is_empty_tray() {
        let dc = compute_dc_stage(&input_with_strings(0), &Catalog::standard());
        assert_eq!(dc.total_wire_count, 0);
        assert_eq!(dc.tray.quantity, 1);
        assert_eq!(dc.tray.fill_ratio_pct, 0.0);
    }

    #[test]
    fn very_large_array_needs_several_trays() {
        // 500 strings -> 1000 wires -> ~44 650 mm², five 500x100 trays.
        let dc = compute_dc_stage(&input_with_strings(500), &Catalog::standard());
        assert_eq!(dc.tray.quantity, 5);
        assert!(dc.tray.description.starts_with("5 x"));
    }
}
