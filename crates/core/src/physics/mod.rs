//! Fire-behaviour model for savanna grass fires
//!
//! Stateless empirical regressions consumed by the spread engine. Coefficients
//! are reproduced exactly; the simulation's results depend on them.

pub mod fuel_moisture;
pub mod ignition;
pub mod spread_rate;

pub use fuel_moisture::{degree_of_curing, fuel_availability, grass_fuel_moisture};
pub use ignition::{
    fireline_intensity, initial_ignition_probability, secondary_ignition_probability, HEAT_YIELD,
};
pub use spread_rate::{directional_rate_of_spread, headfire_rate_of_spread, length_to_breadth_ratio};

use crate::core_types::{Cell, WeatherSnapshot};

/// Fuel state of one cell under the current weather
///
/// Bundles the per-cell quantities the engine needs in every pass so they are
/// computed once per cell and step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelConditions {
    /// Total fuel load (g/m²)
    pub fuel_load: f32,
    /// Fuel moisture content (fraction)
    pub moisture: f32,
    /// Fuel that burns in the flaming front (g/m²)
    pub available_fuel: f32,
    /// Headfire rate of spread (m/s)
    pub headfire_rate: f32,
}

impl FuelConditions {
    /// Evaluate the fuel model for `cell` under `weather`
    #[must_use]
    pub fn evaluate(cell: &Cell, weather: &WeatherSnapshot) -> Self {
        let fuel_load = cell.fuel_load();
        let moisture = cell_moisture(cell, weather);
        let available_fuel = fuel_load * fuel_availability(moisture);
        let headfire_rate = headfire_rate_of_spread(
            fuel_load,
            moisture,
            weather.relative_humidity.value(),
            weather.wind_speed.value(),
        );
        FuelConditions {
            fuel_load,
            moisture,
            available_fuel,
            headfire_rate,
        }
    }
}

/// Moisture of a cell's grass under `weather`
#[must_use]
pub fn cell_moisture(cell: &Cell, weather: &WeatherSnapshot) -> f32 {
    grass_fuel_moisture(
        weather.temperature.value(),
        weather.relative_humidity.value(),
        degree_of_curing(cell.live_biomass, cell.dead_biomass),
    )
}
