//! Run configuration

use crate::core_types::Month;
use crate::error::ConfigError;
use crate::sim_rng::DEFAULT_SEED;
use serde::{Deserialize, Serialize};

/// Minimum fuel load a cell needs to catch a seeding ignition (g/m²)
///
/// Random ignitions model a natural or accidental start and require a
/// substantial load; centred ignitions are experimental starts and accept any
/// load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IgnitionPolicy {
    pub random_min_fuel: f32,
    pub centered_min_fuel: f32,
}

impl Default for IgnitionPolicy {
    fn default() -> Self {
        IgnitionPolicy {
            random_min_fuel: 200.0,
            centered_min_fuel: 0.0,
        }
    }
}

/// Settings of a batch of simulation runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Length of one spread step (s)
    pub timestep_seconds: u32,
    /// Step ceiling per run
    pub max_steps: u32,
    /// Number of independent runs
    pub runs: u32,
    /// Base seed; run `i` draws from stream `i` of this seed
    pub seed: u64,
    /// Ignite at the centre vertex instead of a random one
    pub centered_ignition: bool,
    /// Clock hour at which the fire starts
    pub start_hour: u32,
    /// Month selecting the weather statistics
    pub month: Month,
    pub ignition: IgnitionPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            timestep_seconds: 15,
            max_steps: 5400,
            runs: 1,
            seed: DEFAULT_SEED,
            centered_ignition: false,
            start_hour: 12,
            month: Month::January,
            ignition: IgnitionPolicy::default(),
        }
    }
}

impl SimulationConfig {
    /// Check value ranges
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for a zero timestep, step ceiling or run
    /// count, a start hour outside `0..24`, or a negative fuel threshold.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timestep_seconds == 0 {
            return Err(ConfigError::invalid("timestep", "must be at least one second"));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::invalid("maximum fire duration", "must be at least one step"));
        }
        if self.runs == 0 {
            return Err(ConfigError::invalid("number of runs", "must be at least one"));
        }
        if self.start_hour >= 24 {
            return Err(ConfigError::invalid(
                "start hour",
                format!("must be in 0..24, got {}", self.start_hour),
            ));
        }
        for (name, value) in [
            ("random ignition minimum fuel", self.ignition.random_min_fuel),
            ("centred ignition minimum fuel", self.ignition.centered_min_fuel),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ConfigError::invalid(name, format!("must not be negative, got {value}")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.timestep_seconds, 15);
        assert_eq!(config.max_steps, 5400);
        assert_eq!(config.ignition.random_min_fuel, 200.0);
        assert_eq!(config.ignition.centered_min_fuel, 0.0);
    }

    #[test]
    fn zero_timestep_is_rejected() {
        let config = SimulationConfig {
            timestep_seconds: 0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { name: "timestep", .. })
        ));
    }

    #[test]
    fn negative_fuel_threshold_is_rejected() {
        let config = SimulationConfig {
            ignition: IgnitionPolicy {
                random_min_fuel: -1.0,
                centered_min_fuel: 0.0,
            },
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
