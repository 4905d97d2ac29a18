//! Presentation Views
//!
//! View models for the three dashboard panels. They hold no rendering
//! code; [`crate::render`] and the HTTP API present them.
//!
//! - [`ResourceEffectView`]: technology grid, detail panel, comparison
//! - [`CarbonFootprintView`]: payback and emission cards
//! - [`EnergyUsageView`]: usage chart and source selector

mod carbon_footprint;
mod energy_usage;
mod fetch;
mod resource_effect;

pub use carbon_footprint::{CarbonFootprintView, CARBON_ERROR_MESSAGE};
pub use energy_usage::{EnergySlice, EnergyUsage, EnergyUsageView, ENERGY_ERROR_MESSAGE};
pub use fetch::{FetchState, Mounted};
pub use resource_effect::{compare, Comparison, ComparisonRow, ResourceEffectView, Side};
