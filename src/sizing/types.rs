//! Engine input and result records.

use std::fmt;

use serde::Serialize;

use crate::catalog::{Breaker, Busbar, CableTray, WiringConfig};

/// Regulatory ceiling on bundled-conductor fill of a tray (percent).
pub const MAX_FILL_RATIO_PCT: f64 = 20.0;

/// DC/AC capacity ratio above which the design is flagged as oversized.
pub const DC_AC_RATIO_LIMIT: f64 = 1.3;

/// One group of identical inverters sharing output voltage, wiring and run length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterBlock {
    pub id: String,
    /// Number of inverter units in the group.
    pub unit_count: u32,
    /// Rated AC output per unit (kW).
    pub unit_power_kw: f64,
    /// Line-to-line output voltage (V).
    pub output_voltage: f64,
    pub wiring: WiringConfig,
    /// One-way cable run from the group to the main switchboard (m).
    pub run_length_m: f64,
}

impl InverterBlock {
    /// Installed AC power of the group (kW).
    pub fn total_power_kw(&self) -> f64 {
        f64::from(self.unit_count) * self.unit_power_kw
    }
}

/// Frozen snapshot of one installation, as consumed by the engine.
///
/// `dc_capacity_kwp` and `ac_capacity_kw` are carried as given; the engine
/// never recomputes them from the panel and inverter fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationInput {
    pub dc_capacity_kwp: f64,
    pub ac_capacity_kw: f64,
    pub string_count: u32,
    pub panel_count: u32,
    pub panel_power_w: f64,
    pub inverter_blocks: Vec<InverterBlock>,
    /// Main bus / grid interconnection voltage (V).
    pub grid_voltage: f64,
    pub dc_run_length_m: f64,
    pub main_run_length_m: f64,
}

impl CalculationInput {
    /// DC/AC capacity ratio, 0 when no AC capacity is declared.
    pub fn dc_ac_ratio(&self) -> f64 {
        if self.ac_capacity_kw > 0.0 {
            self.dc_capacity_kwp / self.ac_capacity_kw
        } else {
            0.0
        }
    }

    /// Longest inverter-group run, 0 without groups.
    pub fn max_inverter_run_m(&self) -> f64 {
        self.inverter_blocks
            .iter()
            .map(|b| b.run_length_m)
            .fold(0.0, f64::max)
    }
}

/// Tray pick: one catalog tray, or `quantity` copies of the largest one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraySelection {
    pub tray: CableTray,
    pub quantity: u32,
    pub fill_ratio_pct: f64,
    pub description: String,
}

impl TraySelection {
    pub fn new(tray: CableTray, quantity: u32, fill_ratio_pct: f64) -> Self {
        let description = if quantity > 1 {
            format!("{quantity} x ({tray})")
        } else {
            tray.to_string()
        };
        Self {
            tray,
            quantity,
            fill_ratio_pct,
            description,
        }
    }

    pub fn within_fill_limit(&self) -> bool {
        self.fill_ratio_pct <= MAX_FILL_RATIO_PCT
    }
}

impl fmt::Display for TraySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// DC string wiring summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DcResult {
    pub cable_outer_diameter_mm: f64,
    pub cable_cross_section_mm2: u32,
    /// Positive and negative conductor per string.
    pub total_wire_count: u32,
    pub total_cross_section_area_mm2: f64,
    pub tray: TraySelection,
}

/// Sizing of one inverter group.
///
/// Carries forward `unit_count`, `wiring`, `run_length_m` and the selected
/// cable's outer diameter so the main switchboard stage can size the trunk
/// tray without re-deriving the cable choice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterResult {
    pub block_id: String,
    pub display_name: String,
    pub output_current_a: f64,
    pub design_current_a: f64,
    pub breaker: Breaker,
    /// Design current exceeded the catalog; largest breaker used.
    pub breaker_clamped: bool,
    pub cable_size_mm2: u32,
    /// No wire size was rated for the breaker; largest defined size used.
    pub cable_clamped: bool,
    pub cable_outer_diameter_mm: f64,
    /// Single-conductor RSG conduit, `None` when not tabulated.
    pub conduit_diameter_mm: Option<u32>,
    /// Tray for this group's conductors alone, for reference.
    pub local_tray: TraySelection,
    pub wiring: WiringConfig,
    pub unit_count: u32,
    pub run_length_m: f64,
}

impl InverterResult {
    /// Total single-core conductors run by the group.
    pub fn wire_count(&self) -> u32 {
        self.unit_count.saturating_mul(self.wiring.wires_per_unit())
    }
}

/// Main breaker: a catalog entry, or a custom air-circuit-breaker marker when
/// the design current exceeds every catalog trip rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MainBreaker {
    Catalog { breaker: Breaker },
    Custom { largest_catalog_at: u32 },
}

impl MainBreaker {
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }

    pub fn catalog_entry(&self) -> Option<Breaker> {
        match self {
            Self::Catalog { breaker } => Some(*breaker),
            Self::Custom { .. } => None,
        }
    }
}

impl fmt::Display for MainBreaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog { breaker } => write!(f, "{breaker}"),
            Self::Custom { largest_catalog_at } => {
                write!(f, "ACB (Custom > {largest_catalog_at}A)")
            }
        }
    }
}

/// Busbar pick, possibly `runs` bars in parallel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BusbarSelection {
    pub busbar: Busbar,
    pub runs: u32,
    /// The parallel search ran out and `runs` was derived from the strongest bar.
    pub run_limit_exceeded: bool,
    pub description: String,
}

impl BusbarSelection {
    pub fn new(busbar: Busbar, runs: u32, run_limit_exceeded: bool) -> Self {
        let description = if runs > 1 {
            format!(
                "{runs} x ({}x{} mm, {}c)",
                busbar.width_mm, busbar.thickness_mm, busbar.conductors
            )
        } else {
            format!(
                "{}x{} mm ({} conductor)",
                busbar.width_mm, busbar.thickness_mm, busbar.conductors
            )
        };
        Self {
            busbar,
            runs,
            run_limit_exceeded,
            description,
        }
    }
}

impl fmt::Display for BusbarSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Aggregate sizing of the main switchboard and grid interconnection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MainSwitchResult {
    pub total_power_kw: f64,
    pub total_current_a: f64,
    pub design_current_a: f64,
    pub breaker: MainBreaker,
    pub busbar: BusbarSelection,
    /// Main output cable size, always sized for 3P3W.
    pub main_cable_size_mm2: u32,
    /// Parallel runs per phase.
    pub main_cable_runs: u32,
    pub main_cable_run_limit_exceeded: bool,
    pub main_conduit_diameter_mm: Option<u32>,
    /// Shared tray downstream of all inverter groups.
    pub trunk_tray: TraySelection,
}
