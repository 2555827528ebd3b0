//! Savanna Fire Simulation Core Library
//!
//! Cellular grass-fire spread over a raster landscape. Each burning cell grows
//! an elliptical fire front from the corner it caught at; fronts reaching a
//! corner become point ignition sources that may ignite the neighbouring cells.
//!
//! ## Components
//!
//! - Fire-behaviour regressions for savanna grass (moisture, rate of spread,
//!   fireline intensity, ignition probabilities)
//! - Raster Huygens spread engine with per-run seeded randomness
//! - Stochastic fire weather from monthly statistics, or fixed weather
//! - Landscapes generated from parameters or imported from ASCII grids

// Core types and utilities
pub mod core_types;
pub mod error;
pub mod sim_rng;

// Inputs
pub mod grid;
pub mod io;
pub mod weather;

// Fire model
pub mod physics;
pub mod simulation;

// Re-export core types
pub use core_types::{Cell, CellState, Month, MonthTable, Octant, VegetationType, WeatherSnapshot};
pub use error::ConfigError;
pub use sim_rng::{SimRng, DEFAULT_SEED};

// Re-export inputs
pub use grid::{GridLandscape, Landscape, LandscapeParameters};
pub use weather::{FireWeatherSimulator, FixedWeather, MeteorologicalParameters, WeatherProvider};

// Re-export simulation types
pub use simulation::{
    FireSpreadEngine, IgnitionPolicy, RunResult, SimulationConfig, SimulationRun, StepRecord,
    StopReason,
};
