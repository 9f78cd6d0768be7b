//! TOML-based project description and preset definitions.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::WiringConfig;
use crate::sizing::types::{CalculationInput, InverterBlock};

/// Top-level project configuration parsed from TOML.
///
/// Missing sections take the defaults of the reference installation. Load
/// from TOML with [`ProjectConfig::from_toml_file`] or use
/// [`ProjectConfig::default_plant`] for the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Array, grid and cable-run parameters.
    #[serde(default)]
    pub system: SystemConfig,
    /// Inverter groups, one per inverter type.
    #[serde(default = "default_inverter_groups")]
    pub inverters: Vec<InverterConfig>,
}

/// Array, grid and cable-run parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// Number of PV modules.
    pub panel_count: u32,
    /// Rated power per module (W).
    pub panel_power_w: f64,
    /// Number of DC strings.
    pub string_count: u32,
    /// Main bus / grid voltage, line to line (V).
    pub grid_voltage: f64,
    /// DC string run length (m).
    pub dc_run_length_m: f64,
    /// Main switchboard to grid connection run length (m).
    pub main_run_length_m: f64,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            panel_count: 480,
            panel_power_w: 445.0,
            string_count: 24,
            grid_voltage: 380.0,
            dc_run_length_m: 40.0,
            main_run_length_m: 15.0,
        }
    }
}

/// One inverter group. Unset fields take the defaults of a newly added group.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InverterConfig {
    /// Group identifier; generated from the position when empty.
    pub id: String,
    /// Number of identical units.
    pub count: u32,
    /// Rated AC output per unit (kW).
    pub power_kw: f64,
    /// Output voltage (V).
    pub voltage: f64,
    /// `"3P3W"` or `"3P4W"`.
    pub wiring: WiringConfig,
    /// Run length to the main switchboard (m).
    pub run_length_m: f64,
}

impl Default for InverterConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            count: 1,
            power_kw: 30.0,
            voltage: 380.0,
            wiring: WiringConfig::ThreePhaseThreeWire,
            run_length_m: 60.0,
        }
    }
}

fn default_inverter_groups() -> Vec<InverterConfig> {
    vec![InverterConfig {
        id: "default-1".to_string(),
        count: 6,
        power_kw: 30.0,
        voltage: 380.0,
        wiring: WiringConfig::ThreePhaseFourWire,
        run_length_m: 60.0,
    }]
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"inverters[0].count"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self::default_plant()
    }
}

impl ProjectConfig {
    /// Returns the reference installation: 480 x 445 W modules on 24 strings,
    /// six 30 kW 3P4W inverters, 380 V grid.
    pub fn default_plant() -> Self {
        Self {
            system: SystemConfig::default(),
            inverters: default_inverter_groups(),
        }
    }

    /// Returns a multi-group plant whose main switchboard exceeds the breaker
    /// catalog and needs parallel busbars and main cable runs.
    pub fn large_plant() -> Self {
        Self {
            system: SystemConfig {
                panel_count: 2800,
                panel_power_w: 550.0,
                string_count: 140,
                grid_voltage: 380.0,
                dc_run_length_m: 120.0,
                main_run_length_m: 30.0,
            },
            inverters: vec![
                InverterConfig {
                    id: "string-50".to_string(),
                    count: 12,
                    power_kw: 50.0,
                    wiring: WiringConfig::ThreePhaseThreeWire,
                    run_length_m: 80.0,
                    ..InverterConfig::default()
                },
                InverterConfig {
                    id: "central-110".to_string(),
                    count: 4,
                    power_kw: 110.0,
                    wiring: WiringConfig::ThreePhaseThreeWire,
                    run_length_m: 45.0,
                    ..InverterConfig::default()
                },
                InverterConfig {
                    id: "roof-25".to_string(),
                    count: 8,
                    power_kw: 25.0,
                    wiring: WiringConfig::ThreePhaseFourWire,
                    run_length_m: 95.0,
                    ..InverterConfig::default()
                },
            ],
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["default", "large_plant"];

    /// Loads a project from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "default" => Ok(Self::default_plant()),
            "large_plant" => Ok(Self::large_plant()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a project from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("project", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a project from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid. Zero values are
    /// accepted; the engine tolerates them.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.system;

        for (field, value) in [
            ("system.panel_power_w", s.panel_power_w),
            ("system.grid_voltage", s.grid_voltage),
            ("system.dc_run_length_m", s.dc_run_length_m),
            ("system.main_run_length_m", s.main_run_length_m),
        ] {
            check_non_negative(&mut errors, field, value);
        }

        if self.inverters.is_empty() {
            errors.push(ConfigError::new(
                "inverters",
                "at least one inverter group is required",
            ));
        }

        let mut seen = HashSet::new();
        for (i, inv) in self.inverters.iter().enumerate() {
            check_non_negative(&mut errors, &format!("inverters[{i}].power_kw"), inv.power_kw);
            check_non_negative(&mut errors, &format!("inverters[{i}].voltage"), inv.voltage);
            check_non_negative(
                &mut errors,
                &format!("inverters[{i}].run_length_m"),
                inv.run_length_m,
            );
            if !inv.id.is_empty() && !seen.insert(inv.id.as_str()) {
                errors.push(ConfigError::new(
                    format!("inverters[{i}].id"),
                    format!("duplicate id \"{}\"", inv.id),
                ));
            }
        }

        errors
    }

    /// Builds the engine input, deriving DC and AC capacities (3 decimals).
    pub fn to_input(&self) -> CalculationInput {
        let s = &self.system;
        let inverter_blocks: Vec<InverterBlock> = self
            .inverters
            .iter()
            .enumerate()
            .map(|(i, inv)| InverterBlock {
                id: if inv.id.is_empty() {
                    format!("group-{}", i + 1)
                } else {
                    inv.id.clone()
                },
                unit_count: inv.count,
                unit_power_kw: inv.power_kw,
                output_voltage: inv.voltage,
                wiring: inv.wiring,
                run_length_m: inv.run_length_m,
            })
            .collect();
        let ac_capacity_kw: f64 = inverter_blocks.iter().map(InverterBlock::total_power_kw).sum();

        CalculationInput {
            dc_capacity_kwp: round3(f64::from(s.panel_count) * s.panel_power_w / 1000.0),
            ac_capacity_kw: round3(ac_capacity_kw),
            string_count: s.string_count,
            panel_count: s.panel_count,
            panel_power_w: s.panel_power_w,
            inverter_blocks,
            grid_voltage: s.grid_voltage,
            dc_run_length_m: s.dc_run_length_m,
            main_run_length_m: s.main_run_length_m,
        }
    }
}

fn check_non_negative(errors: &mut Vec<ConfigError>, field: &str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        errors.push(ConfigError::new(field, "must be a finite number >= 0"));
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
