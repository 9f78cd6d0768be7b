//! Selection and sizing engine.
//!
//! Every calculator is a pure function of its input record and a
//! [`Catalog`](crate::catalog::Catalog); the only ordering constraint is that
//! the main switchboard stage consumes all inverter-group results.

/// Three-phase current and conductor-area formulas.
pub mod current;
pub mod dc;
pub mod design;
/// Single-then-parallel catalog search.
pub mod escalate;
pub mod inverter;
pub mod main_switch;
/// Cable tray selection.
pub mod tray;
pub mod types;

pub use dc::compute_dc_stage;
pub use design::{DesignReport, DesignWarning};
pub use inverter::compute_inverter_block;
pub use main_switch::compute_main_switch;
pub use tray::select_tray;
pub use types::{
    BusbarSelection, CalculationInput, DcResult, InverterBlock, InverterResult, MainBreaker,
    MainSwitchResult, TraySelection,
};
