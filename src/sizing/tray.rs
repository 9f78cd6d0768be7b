//! Cable tray selection by required conductor area.

use tracing::debug;

use crate::catalog::Catalog;

use super::current::ratio_pct;
use super::escalate::escalate;
use super::types::TraySelection;

/// Picks the smallest tray whose allowable (20%) area covers `required_mm2`.
///
/// If no single tray suffices, returns `ceil(required / allowable)` copies of
/// the largest tray. A zero requirement yields one smallest tray at 0% fill.
pub fn select_tray(catalog: &Catalog, required_mm2: f64) -> TraySelection {
    let required = if required_mm2.is_finite() {
        required_mm2.max(0.0)
    } else {
        0.0
    };

    let largest = catalog.largest_tray();
    // Trays never split into smaller parallel sizes: one run, then repeat the largest.
    let pick = escalate(
        required,
        1,
        |area| catalog.tray_for(area),
        largest,
        f64::from(largest.allowable_area_mm2),
    );

    let total_area = f64::from(pick.item.area_mm2) * f64::from(pick.runs);
    let selection = TraySelection::new(pick.item, pick.runs, ratio_pct(required, total_area));
    debug!(
        required_mm2 = required,
        tray = %selection,
        fill_pct = selection.fill_ratio_pct,
        "tray selected"
    );
    selection
}
