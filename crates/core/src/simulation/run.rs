//! One fire from ignition to extinction

use super::config::SimulationConfig;
use super::engine::FireSpreadEngine;
use crate::core_types::WeatherSnapshot;
use crate::error::ConfigError;
use crate::grid::Landscape;
use crate::weather::WeatherProvider;
use rand::RngCore;
use tracing::{debug, info};

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Seeding lit no cell
    NotIgnited,
    /// Every burning cell burned out
    Extinguished,
    /// The step ceiling was reached with fire still burning
    StepLimit,
}

/// State of the fire after one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepRecord {
    pub step: u32,
    /// Burn duration at the end of the step (s)
    pub elapsed_seconds: u64,
    /// Cells burning after the step
    pub burning: usize,
    /// Cells burned out so far
    pub burned_out: usize,
    /// Mean of the burning cells' mean fireline intensities (kJ/s/m)
    pub mean_intensity: f32,
}

/// Weather in force from `hours` of burning on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeatherRecord {
    pub hours: f32,
    pub snapshot: WeatherSnapshot,
}

/// Everything a finished run leaves behind
#[derive(Debug, Clone)]
pub struct RunResult<L> {
    /// Landscape with the final cell states
    pub landscape: L,
    /// Engine with the fronts still burning at a step-limit stop
    pub engine: FireSpreadEngine,
    pub steps: Vec<StepRecord>,
    pub weather_log: Vec<WeatherRecord>,
    /// Cells lit by seeding
    pub ignited_cells: usize,
    pub stop_reason: StopReason,
}

impl<L> RunResult<L> {
    /// Burn duration at the last step (s)
    pub fn elapsed_seconds(&self) -> u64 {
        self.steps.last().map_or(0, |record| record.elapsed_seconds)
    }

    /// Cells burned out by the end of the run
    pub fn burned_out(&self) -> usize {
        self.steps.last().map_or(0, |record| record.burned_out)
    }
}

/// A landscape, a weather source and the settings to burn one through the other
pub struct SimulationRun<L, W> {
    landscape: L,
    weather: W,
    config: SimulationConfig,
}

impl<L: Landscape, W: WeatherProvider> SimulationRun<L, W> {
    /// Prepare a run
    ///
    /// # Errors
    /// Whatever [`SimulationConfig::validate`] rejects.
    pub fn new(landscape: L, weather: W, config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(SimulationRun {
            landscape,
            weather,
            config,
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed a fire and advance it until it dies out or the step ceiling is hit
    ///
    /// Weather is queried before seeding and again each time the burn duration
    /// passes a whole hour.
    pub fn run<R: RngCore>(self, rng: &mut R) -> RunResult<L> {
        let SimulationRun {
            mut landscape,
            mut weather,
            config,
        } = self;
        let month = config.month;
        let timestep = config.timestep_seconds;
        let mut engine = FireSpreadEngine::new(config.ignition);

        let mut snapshot = weather.snapshot(month, 0, rng);
        let mut weather_log = vec![WeatherRecord {
            hours: 0.0,
            snapshot,
        }];
        debug!("Initial weather: {}", snapshot);

        let ignited_cells = if config.centered_ignition {
            engine.ignite_center_vertex(&mut landscape, &snapshot, rng)
        } else {
            engine.ignite_random_vertex(&mut landscape, &snapshot, rng)
        };

        let mut steps = Vec::new();
        let mut burned_out = 0;
        let mut next_hour = 1.0_f32;
        let mut duration_hours = 0.0_f32;
        let mut stop_reason = if ignited_cells == 0 {
            StopReason::NotIgnited
        } else {
            StopReason::StepLimit
        };

        for step in 1..=config.max_steps {
            if engine.is_extinguished() {
                if ignited_cells > 0 {
                    stop_reason = StopReason::Extinguished;
                }
                break;
            }

            if duration_hours >= next_hour {
                let hours = duration_hours.floor();
                snapshot = weather.snapshot(month, hours as u32, rng);
                weather_log.push(WeatherRecord { hours, snapshot });
                debug!("Weather after {} h: {}", hours, snapshot);
                next_hour = hours + 1.0;
            }

            let outcome = engine.advance(&mut landscape, &snapshot, timestep, rng);
            burned_out += outcome.burned_out;
            let elapsed_seconds = u64::from(step) * u64::from(timestep);
            duration_hours = elapsed_seconds as f32 / 3600.0;

            steps.push(StepRecord {
                step,
                elapsed_seconds,
                burning: engine.burning_cell_count(),
                burned_out,
                mean_intensity: engine.mean_intensity(),
            });
        }

        if stop_reason == StopReason::StepLimit && engine.is_extinguished() {
            stop_reason = StopReason::Extinguished;
        }

        info!(
            "Run finished ({:?}) after {} steps: {} cells burned out, {} burning",
            stop_reason,
            steps.len(),
            burned_out,
            engine.burning_cell_count()
        );

        RunResult {
            landscape,
            engine,
            steps,
            weather_log,
            ignited_cells,
            stop_reason,
        }
    }
}
