//! Full calculation pass: DC stage, every inverter group, then the main switchboard.

use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::catalog::Catalog;

use super::dc::compute_dc_stage;
use super::escalate::MAX_PARALLEL_RUNS;
use super::inverter::compute_inverter_block;
use super::main_switch::compute_main_switch;
use super::types::{
    CalculationInput, DC_AC_RATIO_LIMIT, DcResult, InverterResult, MAX_FILL_RATIO_PCT,
    MainSwitchResult, TraySelection,
};

/// Condition the design tolerated but the reader should review.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DesignWarning {
    HighDcAcRatio { ratio: f64 },
    TrayOverfilled { location: String, fill_pct: f64 },
    BlockBreakerClamped { group: String, design_current_a: f64 },
    BlockCableClamped { group: String, size_mm2: u32 },
    MainBreakerCustom { design_current_a: f64 },
    BusbarRunLimit { runs: u32 },
    MainCableRunLimit { runs: u32 },
}

impl fmt::Display for DesignWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighDcAcRatio { ratio } => write!(
                f,
                "DC/AC ratio {ratio:.2} exceeds {DC_AC_RATIO_LIMIT}; consider adjusting panels or inverters"
            ),
            Self::TrayOverfilled { location, fill_pct } => write!(
                f,
                "{location} tray fill {fill_pct:.2}% exceeds {MAX_FILL_RATIO_PCT}%"
            ),
            Self::BlockBreakerClamped {
                group,
                design_current_a,
            } => write!(
                f,
                "{group}: design current {design_current_a:.0} A exceeds the breaker catalog; largest breaker used"
            ),
            Self::BlockCableClamped { group, size_mm2 } => write!(
                f,
                "{group}: no cable rated for the breaker; largest defined size {size_mm2} mm² used"
            ),
            Self::MainBreakerCustom { design_current_a } => write!(
                f,
                "main design current {design_current_a:.0} A requires a custom air circuit breaker"
            ),
            Self::BusbarRunLimit { runs } => write!(
                f,
                "busbar needs {runs} parallel bars, beyond the {MAX_PARALLEL_RUNS}-run search; approximate"
            ),
            Self::MainCableRunLimit { runs } => write!(
                f,
                "main cable needs {runs} parallel runs, beyond the {MAX_PARALLEL_RUNS}-run search; approximate"
            ),
        }
    }
}

/// Every result of one calculation pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignReport {
    pub dc: DcResult,
    /// Same order and count as the input's inverter blocks.
    pub inverters: Vec<InverterResult>,
    pub main: MainSwitchResult,
    pub warnings: Vec<DesignWarning>,
}

impl DesignReport {
    /// Runs the full sizing pipeline. Deterministic; never fails.
    pub fn calculate(input: &CalculationInput, catalog: &Catalog) -> Self {
        let dc = compute_dc_stage(input, catalog);
        let inverters: Vec<InverterResult> = input
            .inverter_blocks
            .iter()
            .enumerate()
            .map(|(i, block)| compute_inverter_block(block, i, catalog))
            .collect();
        let main = compute_main_switch(input, &inverters, catalog);
        let warnings = collect_warnings(input, &dc, &inverters, &main);

        info!(
            groups = inverters.len(),
            total_power_kw = main.total_power_kw,
            warnings = warnings.len(),
            "design calculated"
        );

        Self {
            dc,
            inverters,
            main,
            warnings,
        }
    }

    /// True when any selection left the catalog or needed an approximation.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn collect_warnings(
    input: &CalculationInput,
    dc: &DcResult,
    inverters: &[InverterResult],
    main: &MainSwitchResult,
) -> Vec<DesignWarning> {
    let mut warnings = Vec::new();

    let ratio = input.dc_ac_ratio();
    if ratio > DC_AC_RATIO_LIMIT {
        warnings.push(DesignWarning::HighDcAcRatio { ratio });
    }

    check_fill(&mut warnings, "DC", &dc.tray);
    for inv in inverters {
        if inv.breaker_clamped {
            warnings.push(DesignWarning::BlockBreakerClamped {
                group: inv.display_name.clone(),
                design_current_a: inv.design_current_a,
            });
        }
        if inv.cable_clamped {
            warnings.push(DesignWarning::BlockCableClamped {
                group: inv.display_name.clone(),
                size_mm2: inv.cable_size_mm2,
            });
        }
    }

    if main.breaker.is_custom() {
        warnings.push(DesignWarning::MainBreakerCustom {
            design_current_a: main.design_current_a,
        });
    }
    if main.busbar.run_limit_exceeded {
        warnings.push(DesignWarning::BusbarRunLimit {
            runs: main.busbar.runs,
        });
    }
    if main.main_cable_run_limit_exceeded {
        warnings.push(DesignWarning::MainCableRunLimit {
            runs: main.main_cable_runs,
        });
    }
    check_fill(&mut warnings, "AC trunk", &main.trunk_tray);

    warnings
}

fn check_fill(warnings: &mut Vec<DesignWarning>, location: &str, tray: &TraySelection) {
    if !tray.within_fill_limit() {
        warnings.push(DesignWarning::TrayOverfilled {
            location: location.to_string(),
            fill_pct: tray.fill_ratio_pct,
        });
    }
}
