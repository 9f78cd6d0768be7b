//! Per-group inverter output sizing.

use tracing::{debug, warn};

use crate::catalog::Catalog;

use super::current::{bundle_area_mm2, design_current, three_phase_current};
use super::tray::select_tray;
use super::types::{InverterBlock, InverterResult};

/// Sizes breaker, cable, conduit and a reference tray for one inverter group.
///
/// `index` is the group's position in the input and only drives the display
/// name. Groups are independent of each other at this stage.
pub fn compute_inverter_block(
    block: &InverterBlock,
    index: usize,
    catalog: &Catalog,
) -> InverterResult {
    let output_current_a = three_phase_current(block.unit_power_kw, block.output_voltage);
    let design_current_a = design_current(output_current_a);

    let (breaker, breaker_clamped) = match catalog.breaker_for(design_current_a) {
        Some(b) => (b, false),
        None => {
            let largest = catalog.largest_breaker();
            warn!(
                group = %block.id,
                design_current_a,
                breaker = %largest,
                "design current above breaker catalog, using largest"
            );
            (largest, true)
        }
    };

    // The cable must carry what the breaker lets through, not just the design current.
    let (wire, cable_clamped) = match catalog.wire_for(block.wiring, f64::from(breaker.trip_at)) {
        Some(w) => (w, false),
        None => {
            let largest = catalog.largest_wire(block.wiring);
            warn!(
                group = %block.id,
                trip_at = breaker.trip_at,
                wiring = %block.wiring,
                size_mm2 = largest.size_mm2,
                "no cable rated for breaker, using largest defined size"
            );
            (largest, true)
        }
    };

    let conduit_diameter_mm = catalog.conduit_for(wire.size_mm2, 1);
    let cable_outer_diameter_mm = catalog.single_core_od(wire.size_mm2).unwrap_or_else(|| {
        warn!(size_mm2 = wire.size_mm2, "no outer diameter for cable size");
        0.0
    });

    let wire_count = block
        .unit_count
        .saturating_mul(block.wiring.wires_per_unit());
    let local_tray = select_tray(catalog, bundle_area_mm2(wire_count, cable_outer_diameter_mm));

    debug!(
        group = %block.id,
        design_current_a,
        breaker = %breaker,
        cable_mm2 = wire.size_mm2,
        "inverter group sized"
    );

    InverterResult {
        block_id: block.id.clone(),
        display_name: format!("Group {}", index + 1),
        output_current_a,
        design_current_a,
        breaker,
        breaker_clamped,
        cable_size_mm2: wire.size_mm2,
        cable_clamped,
        cable_outer_diameter_mm,
        conduit_diameter_mm,
        local_tray,
        wiring: block.wiring,
        unit_count: block.unit_count,
        run_length_m: block.run_length_m,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::WiringConfig;

    fn block(power_kw: f64, voltage: f64, wiring: WiringConfig) -> InverterBlock {
        InverterBlock {
            id: "inv".to_string(),
            unit_count: 6,
            unit_power_kw: power_kw,
            output_voltage: voltage,
            wiring,
            run_length_m: 60.0,
        }
    }

    #[test]
    fn thirty_kw_three_wire() {
        let res = compute_inverter_block(
            &block(30.0, 380.0, WiringConfig::ThreePhaseThreeWire),
            0,
            &Catalog::standard(),
        );
        assert!((res.output_current_a - 45.58).abs() < 0.01);
        assert!((res.design_current_a - 56.98).abs() < 0.01);
        assert_eq!(res.breaker.trip_at, 60);
        assert_eq!(res.breaker.frame_af, 100);
        assert_eq!(res.cable_size_mm2, 14);
        assert_eq!(res.cable_outer_diameter_mm, 8.7);
        assert_eq!(res.conduit_diameter_mm, Some(16));
        assert_eq!(res.display_name, "Group 1");
        assert!(!res.breaker_clamped && !res.cable_clamped);
    }

    #[test]
    fn cable_sized_to_breaker_not_design_current() {
        // 50 kW @ 380 V: design 94.97 A -> 100 AT. 3P4W 22 mm² carries 84 A,
        // 38 mm² carries 117 A, so the 100 AT breaker forces 38 mm².
        let res = compute_inverter_block(
            &block(50.0, 380.0, WiringConfig::ThreePhaseFourWire),
            2,
            &Catalog::standard(),
        );
        assert_eq!(res.breaker.trip_at, 100);
        assert_eq!(res.cable_size_mm2, 38);
        assert_eq!(res.display_name, "Group 3");
        assert_eq!(res.wire_count(), 24);
    }

    #[test]
    fn four_wire_fallback_skips_undefined_sizes() {
        // 250 kW @ 380 V: design 474.8 A -> 500 AT; no 4-wire size reaches 500 A.
        let res = compute_inverter_block(
            &block(250.0, 380.0, WiringConfig::ThreePhaseFourWire),
            0,
            &Catalog::standard(),
        );
        assert_eq!(res.breaker.trip_at, 500);
        assert_eq!(res.cable_size_mm2, 325);
        assert!(res.cable_clamped);
        assert_eq!(res.conduit_diameter_mm, Some(54));
    }

    #[test]
    fn three_wire_uses_larger_sizes() {
        let res = compute_inverter_block(
            &block(250.0, 380.0, WiringConfig::ThreePhaseThreeWire),
            0,
            &Catalog::standard(),
        );
        assert_eq!(res.cable_size_mm2, 400);
        assert!(!res.cable_clamped);
    }

    #[test]
    fn oversize_group_clamps_to_largest_breaker() {
        let res = compute_inverter_block(
            &block(1000.0, 380.0, WiringConfig::ThreePhaseThreeWire),
            0,
            &Catalog::standard(),
        );
        assert_eq!(res.breaker.trip_at, 1600);
        assert!(res.breaker_clamped);
        assert_eq!(res.cable_size_mm2, 500);
        assert!(res.cable_clamped);
    }

    #[test]
    fn zero_voltage_and_zero_units_do_not_produce_nan() {
        let mut b = block(30.0, 0.0, WiringConfig::ThreePhaseFourWire);
        b.unit_count = 0;
        let res = compute_inverter_block(&b, 0, &Catalog::standard());
        assert_eq!(res.output_current_a, 0.0);
        assert_eq!(res.design_current_a, 0.0);
        assert_eq!(res.breaker.trip_at, 3);
        assert_eq!(res.local_tray.fill_ratio_pct, 0.0);
        assert!(res.local_tray.fill_ratio_pct.is_finite());
    }

    #[test]
    fn breaker_and_cable_monotonic_in_power() {
        let cat = Catalog::standard();
        let mut last = (0, 0);
        for kw in (1..=600).map(f64::from) {
            let res =
                compute_inverter_block(&block(kw, 380.0, WiringConfig::ThreePhaseFourWire), 0, &cat);
            let now = (res.breaker.trip_at, res.cable_size_mm2);
            assert!(now.0 >= last.0 && now.1 >= last.1, "decreased at {kw} kW");
            last = now;
        }
    }
}
