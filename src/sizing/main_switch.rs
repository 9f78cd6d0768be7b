//! Main switchboard aggregation across all inverter groups.

use tracing::{debug, warn};

use crate::catalog::{Catalog, WiringConfig};

use super::current::{bundle_area_mm2, design_current, three_phase_current};
use super::escalate::{MAX_PARALLEL_RUNS, escalate};
use super::tray::select_tray;
use super::types::{
    BusbarSelection, CalculationInput, InverterResult, MainBreaker, MainSwitchResult,
};

/// The grid interconnection is always three-phase three-wire.
const MAIN_CABLE_WIRING: WiringConfig = WiringConfig::ThreePhaseThreeWire;

/// Sizes the main breaker, busbar, output cable, conduit and the trunk tray.
///
/// Total power is recomputed from the raw input blocks; current uses the grid
/// voltage for every group. `inverter_results` only feeds the trunk tray.
pub fn compute_main_switch(
    input: &CalculationInput,
    inverter_results: &[InverterResult],
    catalog: &Catalog,
) -> MainSwitchResult {
    let total_power_kw: f64 = input
        .inverter_blocks
        .iter()
        .map(|b| b.total_power_kw())
        .sum();
    let total_current_a = three_phase_current(total_power_kw, input.grid_voltage);
    let design_current_a = design_current(total_current_a);

    let breaker = select_main_breaker(catalog, design_current_a);
    let busbar = select_busbar(catalog, design_current_a);

    let trunk_area: f64 = inverter_results
        .iter()
        .map(|r| bundle_area_mm2(r.wire_count(), r.cable_outer_diameter_mm))
        .sum();
    let trunk_tray = select_tray(catalog, trunk_area);

    let largest_wire = catalog.largest_wire(MAIN_CABLE_WIRING);
    let cable = escalate(
        design_current_a,
        MAX_PARALLEL_RUNS,
        |amps| catalog.wire_for(MAIN_CABLE_WIRING, amps),
        largest_wire,
        f64::from(catalog.max_ampacity(MAIN_CABLE_WIRING)),
    );
    if cable.exhausted {
        warn!(
            design_current_a,
            runs = cable.runs,
            "main cable exceeds {MAX_PARALLEL_RUNS} parallel runs, using largest size"
        );
    }
    let main_conduit_diameter_mm = catalog.conduit_for(cable.item.size_mm2, 1);

    debug!(
        total_power_kw,
        design_current_a,
        breaker = %breaker,
        busbar = %busbar,
        cable_mm2 = cable.item.size_mm2,
        cable_runs = cable.runs,
        trunk_tray = %trunk_tray,
        "main switchboard sized"
    );

    MainSwitchResult {
        total_power_kw,
        total_current_a,
        design_current_a,
        breaker,
        busbar,
        main_cable_size_mm2: cable.item.size_mm2,
        main_cable_runs: cable.runs,
        main_cable_run_limit_exceeded: cable.exhausted,
        main_conduit_diameter_mm,
        trunk_tray,
    }
}

fn select_main_breaker(catalog: &Catalog, design_current_a: f64) -> MainBreaker {
    match catalog.breaker_for(design_current_a) {
        Some(breaker) => MainBreaker::Catalog { breaker },
        None => {
            let largest_catalog_at = catalog.largest_breaker().trip_at;
            warn!(
                design_current_a,
                largest_catalog_at, "main breaker beyond catalog, custom ACB required"
            );
            MainBreaker::Custom { largest_catalog_at }
        }
    }
}

fn select_busbar(catalog: &Catalog, design_current_a: f64) -> BusbarSelection {
    let strongest = catalog.strongest_busbar();
    let pick = escalate(
        design_current_a,
        MAX_PARALLEL_RUNS,
        |amps| catalog.busbar_for(amps),
        strongest,
        f64::from(strongest.ampacity),
    );
    if pick.exhausted {
        warn!(
            design_current_a,
            runs = pick.runs,
            "busbar exceeds {MAX_PARALLEL_RUNS} parallel runs, using strongest bar"
        );
    }
    BusbarSelection::new(pick.item, pick.runs, pick.exhausted)
}
