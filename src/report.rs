//! Human-readable rendering of design results.

use std::fmt;

use crate::sizing::types::TraySelection;
use crate::sizing::{DcResult, DesignReport, InverterResult, MainSwitchResult};

fn fill_status(tray: &TraySelection) -> &'static str {
    if tray.within_fill_limit() { "ok" } else { "OVER" }
}

fn conduit(diameter_mm: Option<u32>) -> String {
    diameter_mm.map_or_else(|| "n/a".to_string(), |d| format!("RSG {d} mm"))
}

impl fmt::Display for DcResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- DC system ---")?;
        writeln!(
            f,
            "Cable:                 {} mm² (OD {} mm)",
            self.cable_cross_section_mm2, self.cable_outer_diameter_mm
        )?;
        writeln!(
            f,
            "Total wires:           {} ({:.1} mm²)",
            self.total_wire_count, self.total_cross_section_area_mm2
        )?;
        write!(
            f,
            "Cable tray:            {} ({:.2}% fill, {})",
            self.tray,
            self.tray.fill_ratio_pct,
            fill_status(&self.tray)
        )
    }
}

impl fmt::Display for InverterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} [{}]: {} unit(s) @ {} m, {}",
            self.display_name, self.block_id, self.unit_count, self.run_length_m, self.wiring
        )?;
        writeln!(
            f,
            "  Current:             {:.1} A (design {:.1} A)",
            self.output_current_a, self.design_current_a
        )?;
        writeln!(f, "  Breaker:             {}", self.breaker)?;
        writeln!(f, "  Cable:               XLPE {} mm²", self.cable_size_mm2)?;
        writeln!(f, "  Conduit:             {}", conduit(self.conduit_diameter_mm))?;
        write!(
            f,
            "  Local tray (ref):    {} ({:.2}% fill)",
            self.local_tray, self.local_tray.fill_ratio_pct
        )
    }
}

impl fmt::Display for MainSwitchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Main switchboard ---")?;
        writeln!(f, "Total power:           {:.1} kW", self.total_power_kw)?;
        writeln!(
            f,
            "Current:               {:.1} A (design {:.1} A)",
            self.total_current_a, self.design_current_a
        )?;
        writeln!(f, "Main breaker:          {}", self.breaker)?;
        writeln!(f, "Busbar:                {}", self.busbar)?;
        writeln!(
            f,
            "Main cable:            {} x XLPE {} mm² per phase (3P3W)",
            self.main_cable_runs, self.main_cable_size_mm2
        )?;
        writeln!(
            f,
            "Main conduit:          {}",
            conduit(self.main_conduit_diameter_mm)
        )?;
        write!(
            f,
            "Trunk tray:            {} ({:.2}% fill, {})",
            self.trunk_tray,
            self.trunk_tray.fill_ratio_pct,
            fill_status(&self.trunk_tray)
        )
    }
}

impl fmt::Display for DesignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.dc)?;
        writeln!(f)?;
        writeln!(f, "--- Inverter groups ---")?;
        for inv in &self.inverters {
            writeln!(f, "{inv}")?;
        }
        writeln!(f)?;
        write!(f, "{}", self.main)?;
        if !self.warnings.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "--- Warnings ---")?;
            for w in &self.warnings {
                write!(f, "\n! {w}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::config::ProjectConfig;
    use crate::sizing::DesignReport;

    #[test]
    fn default_report_lists_every_section() {
        let input = ProjectConfig::default_plant().to_input();
        let report = DesignReport::calculate(&input, &Catalog::standard());
        let text = report.to_string();
        assert!(text.contains("--- DC system ---"));
        assert!(text.contains("Cable tray:            200x100 mm (10.72% fill, ok)"));
        assert!(text.contains("Group 1 [default-1]: 6 unit(s) @ 60 m, 3P4W"));
        assert!(text.contains("Main breaker:          400AF / 350AT"));
        assert!(!text.contains("--- Warnings ---"));
    }

    #[test]
    fn warnings_section_rendered() {
        let input = ProjectConfig::large_plant().to_input();
        let report = DesignReport::calculate(&input, &Catalog::standard());
        let text = report.to_string();
        assert!(text.contains("--- Warnings ---"));
        assert!(text.contains("custom air circuit breaker"));
    }
}
