//! Photovoltaic balance-of-system sizing engine and bill-of-materials generator.

pub mod bom;
/// Reference tables: trays, breakers, wire ampacity, busbars, conduits.
pub mod catalog;
pub mod config;
pub mod report;
/// Selection and sizing calculators.
pub mod sizing;
