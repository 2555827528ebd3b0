//! Fire spread simulation
//!
//! [`FireSpreadEngine`] owns the burning cells and advances them one timestep
//! at a time. [`SimulationRun`] drives the engine from ignition to extinction,
//! querying a [`WeatherProvider`](crate::weather::WeatherProvider) at every
//! whole hour of burning.

pub mod config;
pub mod engine;
pub mod front;
pub mod run;

pub use config::{IgnitionPolicy, SimulationConfig};
pub use engine::{FireSpreadEngine, StepOutcome, SELF_EXTINCTION_INTENSITY};
pub use front::{BurningCellFront, PointIgnitionSource, SpreadSlot};
pub use run::{RunResult, SimulationRun, StepRecord, StopReason, WeatherRecord};
