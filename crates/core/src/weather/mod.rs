//! Weather providers
//!
//! The run loop asks a [`WeatherProvider`] for a [`WeatherSnapshot`] at the start
//! of a fire and again at each whole hour of burning. The snapshot is then
//! passed unchanged to every spread step until the next query.

pub mod fire_weather;

pub use fire_weather::{FireWeatherSimulator, MeteorologicalParameters, MonthlyWeather};

use crate::core_types::{Celsius, MetersPerSecond, Month, Octant, Percent, WeatherSnapshot};
use crate::error::ConfigError;
use crate::io::params::ParameterRecords;
use rand::RngCore;
use std::path::Path;

/// Number of lines in a fixed weather file
pub const FIXED_WEATHER_PARAMETER_COUNT: usize = 4;

/// Source of fire weather
pub trait WeatherProvider {
    /// Weather for `month` after `elapsed_hours` whole hours of burning
    fn snapshot(
        &mut self,
        month: Month,
        elapsed_hours: u32,
        rng: &mut dyn RngCore,
    ) -> WeatherSnapshot;
}

impl<W: WeatherProvider + ?Sized> WeatherProvider for Box<W> {
    fn snapshot(
        &mut self,
        month: Month,
        elapsed_hours: u32,
        rng: &mut dyn RngCore,
    ) -> WeatherSnapshot {
        (**self).snapshot(month, elapsed_hours, rng)
    }
}

/// Constant weather for the whole fire
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedWeather(pub WeatherSnapshot);

impl FixedWeather {
    /// Decode temperature, humidity, wind speed and wind direction, one per line
    ///
    /// # Errors
    /// Wrong line count, unparsable values, or a wind direction outside `0..8`.
    pub fn from_records(records: &ParameterRecords) -> Result<Self, ConfigError> {
        records.expect_lines("fixed weather", FIXED_WEATHER_PARAMETER_COUNT)?;
        let temperature: f32 = records.scalar(0, "temperature")?;
        let relative_humidity: f32 = records.scalar(1, "relative humidity")?;
        let wind_speed: f32 = records.scalar(2, "wind speed")?;
        let direction: u8 = records.scalar(3, "wind direction")?;

        let wind_direction = Octant::from_index(direction).ok_or_else(|| {
            ConfigError::invalid("wind direction", format!("must be in 0..8, got {direction}"))
        })?;
        if temperature.is_nan() || temperature < -273.15 {
            return Err(ConfigError::invalid(
                "temperature",
                format!("below absolute zero: {temperature}"),
            ));
        }
        if wind_speed.is_nan() || wind_speed < 0.0 {
            return Err(ConfigError::invalid(
                "wind speed",
                format!("must not be negative, got {wind_speed}"),
            ));
        }

        Ok(FixedWeather(WeatherSnapshot::new(
            MetersPerSecond::new(wind_speed),
            wind_direction,
            Percent::new(relative_humidity),
            Celsius::new(temperature),
        )))
    }

    /// Read a fixed weather file
    ///
    /// # Errors
    /// See [`FixedWeather::from_records`].
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        Self::from_records(&ParameterRecords::read(path)?)
    }
}

impl WeatherProvider for FixedWeather {
    fn snapshot(&mut self, _month: Month, _elapsed_hours: u32, _rng: &mut dyn RngCore) -> WeatherSnapshot {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim_rng::SimRng;

    #[test]
    fn fixed_weather_file_is_decoded_in_order() {
        let records = ParameterRecords::parse("# T\n30\n# RH\n25\n5.5\n3\n");
        let mut weather = FixedWeather::from_records(&records).unwrap();
        let snapshot = weather.snapshot(Month::July, 3, &mut SimRng::default());
        assert_eq!(snapshot.temperature.value(), 30.0);
        assert_eq!(snapshot.relative_humidity.value(), 25.0);
        assert_eq!(snapshot.wind_speed.value(), 5.5);
        assert_eq!(snapshot.wind_direction, Octant::EAST);
    }

    #[test]
    fn fixed_weather_never_changes() {
        let mut weather = FixedWeather::from_records(&ParameterRecords::parse("20\n40\n2\n1\n")).unwrap();
        let mut rng = SimRng::default();
        let first = weather.snapshot(Month::January, 0, &mut rng);
        for hour in 1..48 {
            assert_eq!(weather.snapshot(Month::January, hour, &mut rng), first);
        }
    }

    #[test]
    fn invalid_wind_direction_is_rejected() {
        let records = ParameterRecords::parse("20\n40\n2\n8\n");
        assert!(matches!(
            FixedWeather::from_records(&records),
            Err(ConfigError::InvalidValue {
                name: "wind direction",
                ..
            })
        ));
        let negative = ParameterRecords::parse("20\n40\n-2\n1\n");
        assert!(FixedWeather::from_records(&negative).is_err());
    }

    #[test]
    fn boxed_provider_forwards() {
        let fixed = FixedWeather::from_records(&ParameterRecords::parse("25\n30\n4\n2\n")).unwrap();
        let mut boxed: Box<dyn WeatherProvider> = Box::new(fixed);
        let snapshot = boxed.snapshot(Month::March, 0, &mut SimRng::default());
        assert_eq!(snapshot, fixed.0);
    }
}
