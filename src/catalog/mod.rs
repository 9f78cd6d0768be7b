//! Reference tables consumed by the sizing engine.
//!
//! The engine never hardcodes a catalog entry: every selection goes through a
//! [`Catalog`], so a different regulatory table set can be loaded from TOML
//! with [`Catalog::from_toml_file`] without touching the calculators.

mod standard;

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Number of bundle columns in the conduit table (1 to 5 wires).
pub const CONDUIT_BUNDLE_COLUMNS: usize = 5;

/// AC wiring configuration of an inverter output or feeder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WiringConfig {
    /// Three-phase, three-wire (no neutral).
    #[serde(rename = "3P3W")]
    ThreePhaseThreeWire,
    /// Three-phase, four-wire (with neutral).
    #[serde(rename = "3P4W")]
    ThreePhaseFourWire,
}

impl WiringConfig {
    /// Number of single-core conductors run per inverter unit.
    pub fn wires_per_unit(self) -> u32 {
        match self {
            Self::ThreePhaseThreeWire => 3,
            Self::ThreePhaseFourWire => 4,
        }
    }
}

impl fmt::Display for WiringConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThreePhaseThreeWire => write!(f, "3P3W"),
            Self::ThreePhaseFourWire => write!(f, "3P4W"),
        }
    }
}

/// Cable tray catalog size. `allowable_area_mm2` is the 20% fill allowance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CableTray {
    pub width_mm: u32,
    pub height_mm: u32,
    pub area_mm2: u32,
    pub allowable_area_mm2: u32,
}

impl fmt::Display for CableTray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} mm", self.width_mm, self.height_mm)
    }
}

/// Molded-case breaker: trip rating (AT) within a frame (AF).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Breaker {
    pub trip_at: u32,
    pub frame_af: u32,
}

impl fmt::Display for Breaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}AF / {}AT", self.frame_af, self.trip_at)
    }
}

/// Ampacity row for one conductor cross-section. Zero means "not defined".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WireAmpacity {
    pub size_mm2: u32,
    pub ampacity_3w: u32,
    pub ampacity_4w: u32,
}

impl WireAmpacity {
    /// Ampacity for the given wiring configuration, `None` when undefined.
    pub fn ampacity(&self, config: WiringConfig) -> Option<u32> {
        let amps = match config {
            WiringConfig::ThreePhaseThreeWire => self.ampacity_3w,
            WiringConfig::ThreePhaseFourWire => self.ampacity_4w,
        };
        (amps > 0).then_some(amps)
    }
}

/// Outer diameters of a conductor size (single-core and multi-core cable).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CableDimension {
    pub size_mm2: u32,
    pub single_core_od_mm: f64,
    pub multi_core_od_mm: f64,
}

/// Copper busbar catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Busbar {
    pub width_mm: u32,
    pub thickness_mm: u32,
    pub conductors: u32,
    pub ampacity: u32,
}

/// RSG conduit diameters for one conductor size, indexed by bundle count - 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConduitRow {
    pub size_mm2: u32,
    pub diameters_mm: [u32; CONDUIT_BUNDLE_COLUMNS],
}

/// Fixed DC string conductor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DcCable {
    pub cross_section_mm2: u32,
    pub outer_diameter_mm: f64,
}

/// Raw table set as read from TOML, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogTables {
    pub dc_cable: DcCable,
    pub trays: Vec<CableTray>,
    pub breakers: Vec<Breaker>,
    pub wires: Vec<WireAmpacity>,
    pub cable_dimensions: Vec<CableDimension>,
    pub busbars: Vec<Busbar>,
    pub conduits: Vec<ConduitRow>,
}

impl CatalogTables {
    /// The built-in tables.
    pub fn standard() -> Self {
        standard::tables()
    }

    /// Validates table contents and ordering, returning every problem found.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let dc_od = self.dc_cable.outer_diameter_mm;
        if !dc_od.is_finite() || dc_od <= 0.0 {
            errors.push(ConfigError::new(
                "catalog.dc_cable.outer_diameter_mm",
                "must be > 0",
            ));
        }

        for (field, empty) in [
            ("catalog.trays", self.trays.is_empty()),
            ("catalog.breakers", self.breakers.is_empty()),
            ("catalog.wires", self.wires.is_empty()),
            ("catalog.busbars", self.busbars.is_empty()),
        ] {
            if empty {
                errors.push(ConfigError::new(field, "must not be empty"));
            }
        }

        if self.trays.iter().any(|t| t.area_mm2 == 0) {
            errors.push(ConfigError::new("catalog.trays", "area_mm2 must be > 0"));
        }
        for (i, t) in self.trays.iter().enumerate() {
            if t.allowable_area_mm2 == 0 || t.allowable_area_mm2 > t.area_mm2 {
                errors.push(ConfigError::new(
                    format!("catalog.trays[{i}].allowable_area_mm2"),
                    format!("must be in 1..={}", t.area_mm2),
                ));
            }
        }
        if !self.trays.iter().map(|t| t.allowable_area_mm2).is_sorted() {
            errors.push(ConfigError::new(
                "catalog.trays",
                "must be ordered by ascending allowable_area_mm2",
            ));
        }
        if !self.breakers.iter().map(|b| b.trip_at).is_sorted() {
            errors.push(ConfigError::new(
                "catalog.breakers",
                "must be ordered by ascending trip_at",
            ));
        }
        if !self.wires.iter().map(|w| w.size_mm2).is_sorted() {
            errors.push(ConfigError::new(
                "catalog.wires",
                "must be ordered by ascending size_mm2",
            ));
        }
        for config in [
            WiringConfig::ThreePhaseThreeWire,
            WiringConfig::ThreePhaseFourWire,
        ] {
            if !self.wires.is_empty() && self.wires.iter().all(|w| w.ampacity(config).is_none()) {
                errors.push(ConfigError::new(
                    "catalog.wires",
                    format!("no size has a defined {config} ampacity"),
                ));
            }
        }
        // Every selectable size needs an outer diameter for tray fill and a
        // single-conductor conduit.
        for w in self.wires.iter().filter(|w| w.ampacity_3w > 0 || w.ampacity_4w > 0) {
            let has_od = self.cable_dimensions.iter().any(|d| {
                d.size_mm2 == w.size_mm2
                    && d.single_core_od_mm.is_finite()
                    && d.single_core_od_mm > 0.0
            });
            if !has_od {
                errors.push(ConfigError::new(
                    "catalog.cable_dimensions",
                    format!("no single-core outer diameter for {} mm²", w.size_mm2),
                ));
            }
            let has_conduit = self
                .conduits
                .iter()
                .any(|c| c.size_mm2 == w.size_mm2 && c.diameters_mm[0] > 0);
            if !has_conduit {
                errors.push(ConfigError::new(
                    "catalog.conduits",
                    format!("no single-conductor conduit for {} mm²", w.size_mm2),
                ));
            }
        }
        if self.busbars.iter().all(|b| b.ampacity == 0) && !self.busbars.is_empty() {
            errors.push(ConfigError::new(
                "catalog.busbars",
                "at least one busbar must have ampacity > 0",
            ));
        }

        errors
    }
}

/// Validated, immutable reference table set.
///
/// Every table is non-empty and the scanned tables are in ascending order, so
/// "first entry that meets the requirement" scans return the smallest match.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: CatalogTables,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TryFrom<CatalogTables> for Catalog {
    type Error = Vec<ConfigError>;

    fn try_from(tables: CatalogTables) -> Result<Self, Self::Error> {
        let errors = tables.validate();
        if errors.is_empty() {
            Ok(Self { tables })
        } else {
            Err(errors)
        }
    }
}

impl Catalog {
    /// Returns the built-in catalog.
    pub fn standard() -> Self {
        Self {
            tables: CatalogTables::standard(),
        }
    }

    /// Loads and validates a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns every `ConfigError` found: unreadable file, invalid TOML, or
    /// table validation failures.
    pub fn from_toml_file(path: &Path) -> Result<Self, Vec<ConfigError>> {
        let content = fs::read_to_string(path).map_err(|e| {
            vec![ConfigError::new(
                "catalog",
                format!("cannot read \"{}\": {e}", path.display()),
            )]
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a catalog from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns every `ConfigError` found in parsing or validation.
    pub fn from_toml_str(s: &str) -> Result<Self, Vec<ConfigError>> {
        let tables: CatalogTables =
            toml::from_str(s).map_err(|e| vec![ConfigError::new("catalog.toml", e.to_string())])?;
        Self::try_from(tables)
    }

    pub fn tables(&self) -> &CatalogTables {
        &self.tables
    }

    pub fn dc_cable(&self) -> DcCable {
        self.tables.dc_cable
    }

    pub fn trays(&self) -> &[CableTray] {
        &self.tables.trays
    }

    /// Smallest tray whose allowable area covers `required_mm2`.
    pub fn tray_for(&self, required_mm2: f64) -> Option<CableTray> {
        self.tables
            .trays
            .iter()
            .find(|t| f64::from(t.allowable_area_mm2) >= required_mm2)
            .copied()
    }

    pub fn largest_tray(&self) -> CableTray {
        self.tables.trays[self.tables.trays.len() - 1]
    }

    /// Smallest breaker whose trip rating covers `current_a`.
    pub fn breaker_for(&self, current_a: f64) -> Option<Breaker> {
        self.tables
            .breakers
            .iter()
            .find(|b| f64::from(b.trip_at) >= current_a)
            .copied()
    }

    pub fn largest_breaker(&self) -> Breaker {
        self.tables.breakers[self.tables.breakers.len() - 1]
    }

    /// Smallest wire size with a defined ampacity of at least `min_ampacity_a`.
    pub fn wire_for(&self, config: WiringConfig, min_ampacity_a: f64) -> Option<WireAmpacity> {
        self.tables
            .wires
            .iter()
            .find(|w| {
                w.ampacity(config)
                    .is_some_and(|amps| f64::from(amps) >= min_ampacity_a)
            })
            .copied()
    }

    /// Largest wire size that has a defined ampacity for `config`.
    pub fn largest_wire(&self, config: WiringConfig) -> WireAmpacity {
        self.tables
            .wires
            .iter()
            .rev()
            .find(|w| w.ampacity(config).is_some())
            .copied()
            .unwrap_or(self.tables.wires[self.tables.wires.len() - 1])
    }

    /// Highest defined ampacity for `config` across the wire table.
    pub fn max_ampacity(&self, config: WiringConfig) -> u32 {
        self.tables
            .wires
            .iter()
            .filter_map(|w| w.ampacity(config))
            .max()
            .unwrap_or(0)
    }

    /// Single-core outer diameter for a conductor size, if listed.
    pub fn single_core_od(&self, size_mm2: u32) -> Option<f64> {
        self.tables
            .cable_dimensions
            .iter()
            .find(|d| d.size_mm2 == size_mm2)
            .map(|d| d.single_core_od_mm)
            .filter(|od| *od > 0.0)
    }

    /// Conduit diameter for `bundle` wires (1..=5) of the given size.
    pub fn conduit_for(&self, size_mm2: u32, bundle: usize) -> Option<u32> {
        if bundle == 0 || bundle > CONDUIT_BUNDLE_COLUMNS {
            return None;
        }
        self.tables
            .conduits
            .iter()
            .find(|c| c.size_mm2 == size_mm2)
            .map(|c| c.diameters_mm[bundle - 1])
            .filter(|d| *d > 0)
    }

    /// First busbar in catalog order rated for `current_a`.
    pub fn busbar_for(&self, current_a: f64) -> Option<Busbar> {
        self.tables
            .busbars
            .iter()
            .find(|b| f64::from(b.ampacity) >= current_a)
            .copied()
    }

    /// Busbar with the highest ampacity.
    pub fn strongest_busbar(&self) -> Busbar {
        self.tables
            .busbars
            .iter()
            .max_by_key(|b| b.ampacity)
            .copied()
            .unwrap_or(self.tables.busbars[0])
    }
}
