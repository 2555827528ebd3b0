//! Stochastic hourly fire weather from monthly climate statistics
//!
//! # Model
//! - Daily minimum, maximum and next-day minimum temperatures are drawn from
//!   normal distributions when the fire starts and at every midnight.
//! - The hourly temperature follows a diurnal curve: a sine rise from the
//!   minimum at sunrise to the maximum four hours before sunset, a sine decay
//!   to the sunset temperature, and a square-root decline overnight toward the
//!   next day's minimum.
//! - Relative humidity is uniform between the monthly bounds.
//! - Wind alternates between calm and windy as a two-state Markov chain. Windy
//!   hours draw a direction from per-octant probabilities and a Weibull speed.
//!
//! # References
//! - Cesaraccio, C. et al. (2001). "An improved model for determining degree-day
//!   values from daily temperature data." Int. J. Biometeorology, 45, 161-169

use super::WeatherProvider;
use crate::core_types::{
    Celsius, MetersPerSecond, Month, Octant, Percent, WeatherSnapshot, OCTANT_COUNT,
};
use crate::error::ConfigError;
use crate::io::params::ParameterRecords;
use rand::{Rng, RngCore};
use rand_distr::{Distribution, Normal, Weibull};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;
use tracing::debug;

/// Number of lines in a meteorological parameter file
pub const METEOROLOGICAL_PARAMETER_COUNT: usize = 20;

/// Hours between the daily maximum temperature and sunset
const MAXIMUM_BEFORE_SUNSET: f32 = 4.0;

/// Share of the diurnal range lost between the daily maximum and sunset
/// (empirical, Californian stations)
const SUNSET_COOLING: f32 = 0.39;

/// Climate statistics of one calendar month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyWeather {
    pub humidity_min: f32,
    pub humidity_max: f32,
    pub min_temperature_mean: f32,
    pub min_temperature_sd: f32,
    pub max_temperature_mean: f32,
    pub max_temperature_sd: f32,
    /// Weibull shape of the wind speed distribution
    pub wind_speed_shape: f32,
    /// Weibull scale of the wind speed distribution (m/s)
    pub wind_speed_scale: f32,
    /// Per-octant selection probability, indexed by octant
    pub direction_probabilities: [f32; OCTANT_COUNT as usize],
    /// Probability that a calm hour stays calm
    pub stay_calm: f32,
    /// Probability that a windy hour turns calm
    pub windy_to_calm: f32,
    /// Hour of sunrise (0-24)
    pub sunrise: f32,
    /// Hour of sunset (0-24)
    pub sunset: f32,
}

impl MonthlyWeather {
    fn validate(&self, month: usize) -> Result<(), ConfigError> {
        for (name, value) in [
            ("wind direction probability", self.direction_probabilities.iter().copied().fold(0.0_f32, f32::max)),
            ("stay-calm probability", self.stay_calm),
            ("windy-to-calm probability", self.windy_to_calm),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::invalid(
                    name,
                    format!("month {}: must lie in [0, 1], got {value}", month + 1),
                ));
            }
        }
        if self.direction_probabilities.iter().any(|p| p.is_nan() || *p < 0.0) {
            return Err(ConfigError::invalid(
                "wind direction probability",
                format!("month {}: must not be negative", month + 1),
            ));
        }
        // Octant 0 is overwritten by any later hit and never ends the search
        if !self.direction_probabilities[1..].iter().any(|p| *p > 0.0) {
            return Err(ConfigError::UnreachableWindDirection { month });
        }
        if !(0.0..24.0).contains(&self.sunrise)
            || !(0.0..=24.0).contains(&self.sunset)
            || self.sunset - MAXIMUM_BEFORE_SUNSET <= self.sunrise
        {
            return Err(ConfigError::invalid(
                "sunrise/sunset",
                format!(
                    "month {}: need 0 <= sunrise < sunset - {MAXIMUM_BEFORE_SUNSET} <= 20, got {} and {}",
                    month + 1,
                    self.sunrise,
                    self.sunset
                ),
            ));
        }
        Ok(())
    }
}

/// Twelve months of climate statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeteorologicalParameters {
    months: Vec<MonthlyWeather>,
}

impl MeteorologicalParameters {
    /// Wrap twelve monthly records, January first
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for out-of-range probabilities or
    /// sun times, [`ConfigError::UnreachableWindDirection`] when a month can
    /// never produce a wind direction.
    pub fn new(months: [MonthlyWeather; 12]) -> Result<Self, ConfigError> {
        for (index, month) in months.iter().enumerate() {
            month.validate(index)?;
        }
        Ok(MeteorologicalParameters {
            months: months.to_vec(),
        })
    }

    /// Decode twenty parameter lines with one column per month
    ///
    /// Line order: humidity min and max, daily minimum temperature mean and
    /// sd, daily maximum temperature mean and sd, wind speed Weibull shape and
    /// scale, eight wind direction probabilities, stay-calm probability,
    /// windy-to-calm probability, sunrise hour, sunset hour.
    ///
    /// # Errors
    /// Wrong line or column counts, unparsable values and anything
    /// [`MeteorologicalParameters::new`] rejects.
    pub fn from_records(records: &ParameterRecords) -> Result<Self, ConfigError> {
        records.expect_lines("meteorological parameters", METEOROLOGICAL_PARAMETER_COUNT)?;
        records.expect_columns("meteorological parameters", Month::ALL.len())?;

        let mut months = [MonthlyWeather::default(); 12];
        for (column, month) in months.iter_mut().enumerate() {
            let value = |line: usize, what: &str| records.value::<f32>(line, column, what);
            let mut direction_probabilities = [0.0; OCTANT_COUNT as usize];
            for (octant, probability) in direction_probabilities.iter_mut().enumerate() {
                *probability = value(8 + octant, "wind direction probability")?;
            }
            *month = MonthlyWeather {
                humidity_min: value(0, "minimum relative humidity")?,
                humidity_max: value(1, "maximum relative humidity")?,
                min_temperature_mean: value(2, "mean daily minimum temperature")?,
                min_temperature_sd: value(3, "sd of daily minimum temperature")?,
                max_temperature_mean: value(4, "mean daily maximum temperature")?,
                max_temperature_sd: value(5, "sd of daily maximum temperature")?,
                wind_speed_shape: value(6, "wind speed shape")?,
                wind_speed_scale: value(7, "wind speed scale")?,
                direction_probabilities,
                stay_calm: value(16, "stay-calm probability")?,
                windy_to_calm: value(17, "windy-to-calm probability")?,
                sunrise: value(18, "sunrise")?,
                sunset: value(19, "sunset")?,
            };
        }
        Self::new(months)
    }

    /// Read a meteorological parameter file
    ///
    /// # Errors
    /// See [`MeteorologicalParameters::from_records`].
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        Self::from_records(&ParameterRecords::read(path)?)
    }

    #[must_use]
    pub fn month(&self, month: Month) -> &MonthlyWeather {
        &self.months[month.index()]
    }
}

impl Default for MonthlyWeather {
    fn default() -> Self {
        MonthlyWeather {
            humidity_min: 20.0,
            humidity_max: 40.0,
            min_temperature_mean: 15.0,
            min_temperature_sd: 2.0,
            max_temperature_mean: 30.0,
            max_temperature_sd: 2.0,
            wind_speed_shape: 2.0,
            wind_speed_scale: 4.0,
            direction_probabilities: [0.125; OCTANT_COUNT as usize],
            stay_calm: 0.5,
            windy_to_calm: 0.2,
            sunrise: 6.0,
            sunset: 18.0,
        }
    }
}

/// Sampling distributions of one month
#[derive(Debug, Clone)]
struct MonthlyDistributions {
    min_temperature: Normal<f32>,
    max_temperature: Normal<f32>,
    wind_speed: Weibull<f32>,
}

impl MonthlyDistributions {
    fn new(weather: &MonthlyWeather, month: usize) -> Result<Self, ConfigError> {
        let invalid = |name: &'static str, detail: String| {
            ConfigError::invalid(name, format!("month {}: {detail}", month + 1))
        };
        Ok(MonthlyDistributions {
            min_temperature: Normal::new(weather.min_temperature_mean, weather.min_temperature_sd)
                .map_err(|e| invalid("daily minimum temperature", e.to_string()))?,
            max_temperature: Normal::new(weather.max_temperature_mean, weather.max_temperature_sd)
                .map_err(|e| invalid("daily maximum temperature", e.to_string()))?,
            wind_speed: Weibull::new(weather.wind_speed_scale, weather.wind_speed_shape)
                .map_err(|e| invalid("wind speed distribution", e.to_string()))?,
        })
    }
}

/// Temperatures governing one day's diurnal curve
#[derive(Debug, Clone, Copy, PartialEq)]
struct DailyTemperatures {
    /// Minimum at sunrise
    minimum: f32,
    /// Maximum in the afternoon
    maximum: f32,
    /// Minimum at the following sunrise
    next_minimum: f32,
}

/// Hourly weather generator driven by [`MeteorologicalParameters`]
#[derive(Debug, Clone)]
pub struct FireWeatherSimulator {
    parameters: MeteorologicalParameters,
    distributions: Vec<MonthlyDistributions>,
    start_hour: u32,
    windy: bool,
    daily: Option<DailyTemperatures>,
}

impl FireWeatherSimulator {
    /// Simulator for a fire igniting at `start_hour` o'clock
    ///
    /// Fires start in windy conditions.
    ///
    /// # Errors
    /// [`ConfigError::InvalidValue`] for a start hour outside `0..24` or a
    /// negative standard deviation or non-positive Weibull parameter.
    pub fn new(parameters: MeteorologicalParameters, start_hour: u32) -> Result<Self, ConfigError> {
        if start_hour >= 24 {
            return Err(ConfigError::invalid(
                "start hour",
                format!("must be in 0..24, got {start_hour}"),
            ));
        }
        let distributions = parameters
            .months
            .iter()
            .enumerate()
            .map(|(index, month)| MonthlyDistributions::new(month, index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FireWeatherSimulator {
            parameters,
            distributions,
            start_hour,
            windy: true,
            daily: None,
        })
    }

    /// Whether the last snapshot was windy
    pub fn is_windy(&self) -> bool {
        self.windy
    }

    fn draw_daily(distributions: &MonthlyDistributions, rng: &mut dyn RngCore) -> DailyTemperatures {
        DailyTemperatures {
            minimum: distributions.min_temperature.sample(rng),
            maximum: distributions.max_temperature.sample(rng),
            next_minimum: distributions.min_temperature.sample(rng),
        }
    }

    /// Temperature at clock hour `hour` on the diurnal curve
    fn temperature(weather: &MonthlyWeather, daily: DailyTemperatures, hour: f32) -> f32 {
        let sunrise = weather.sunrise;
        let sunset = weather.sunset;
        let peak = sunset - MAXIMUM_BEFORE_SUNSET;
        let at_sunset = daily.maximum - SUNSET_COOLING * (daily.maximum - daily.next_minimum);

        if hour > sunrise && hour <= peak {
            let range = daily.maximum - daily.minimum;
            daily.minimum + range * (((hour - sunrise) / (peak - sunrise)) * FRAC_PI_2).sin()
        } else if hour > peak && hour < sunset {
            let range = daily.maximum - at_sunset;
            at_sunset + range * (FRAC_PI_2 + ((hour - peak) / MAXIMUM_BEFORE_SUNSET) * FRAC_PI_2).sin()
        } else {
            let night = sunrise + 24.0 - sunset;
            let since_sunset = if hour >= sunset {
                hour - sunset
            } else {
                hour + 24.0 - sunset
            };
            let decline = (daily.next_minimum - at_sunset) / night.sqrt();
            at_sunset + decline * since_sunset.sqrt()
        }
    }

    /// Relative humidity uniform in `[min, max)`
    fn relative_humidity(weather: &MonthlyWeather, rng: &mut dyn RngCore) -> f32 {
        if weather.humidity_max > weather.humidity_min {
            rng.random_range(weather.humidity_min..weather.humidity_max)
        } else {
            weather.humidity_min
        }
    }

    /// Pass over all octants, keeping the last one whose draw succeeds, until
    /// a pass ends on a non-zero octant
    fn wind_direction(weather: &MonthlyWeather, rng: &mut dyn RngCore) -> Octant {
        loop {
            let mut selected = Octant::NORTH_WEST;
            for octant in Octant::all() {
                if rng.random::<f32>() < weather.direction_probabilities[usize::from(octant.index())] {
                    selected = octant;
                }
            }
            if selected != Octant::NORTH_WEST {
                return selected;
            }
        }
    }
}

impl WeatherProvider for FireWeatherSimulator {
    fn snapshot(&mut self, month: Month, elapsed_hours: u32, rng: &mut dyn RngCore) -> WeatherSnapshot {
        let weather = *self.parameters.month(month);
        let distributions = &self.distributions[month.index()];
        let hour = (self.start_hour + elapsed_hours) % 24;

        let daily = match self.daily {
            Some(daily) if elapsed_hours != 0 && hour != 0 => daily,
            _ => {
                let daily = Self::draw_daily(distributions, rng);
                debug!(
                    "Daily temperatures for {}: min {:.1}, max {:.1}, next min {:.1}",
                    month, daily.minimum, daily.maximum, daily.next_minimum
                );
                self.daily = Some(daily);
                daily
            }
        };

        let temperature = Self::temperature(&weather, daily, hour as f32).max(-273.15);
        let relative_humidity = Self::relative_humidity(&weather, rng);

        let change = rng.random::<f32>();
        let threshold = if self.windy {
            weather.windy_to_calm
        } else {
            weather.stay_calm
        };
        self.windy = change >= threshold;

        let humidity = Percent::new(relative_humidity);
        let temperature = Celsius::new(temperature);
        if self.windy {
            let direction = Self::wind_direction(&weather, rng);
            let speed = distributions.wind_speed.sample(rng);
            WeatherSnapshot::new(MetersPerSecond::new(speed), direction, humidity, temperature)
        } else {
            WeatherSnapshot::calm(humidity, temperature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim_rng::SimRng;
    use approx::assert_relative_eq;

    fn parameters(weather: MonthlyWeather) -> MeteorologicalParameters {
        MeteorologicalParameters::new([weather; 12]).unwrap()
    }

    fn steady_month() -> MonthlyWeather {
        MonthlyWeather {
            min_temperature_sd: 0.0,
            max_temperature_sd: 0.0,
            ..MonthlyWeather::default()
        }
    }

    #[test]
    fn diurnal_curve_is_continuous_at_its_joints() {
        let weather = steady_month();
        let daily = DailyTemperatures {
            minimum: 15.0,
            maximum: 30.0,
            next_minimum: 16.0,
        };
        let t = |hour: f32| FireWeatherSimulator::temperature(&weather, daily, hour);
        // peak at 14:00, sunset at 18:00
        assert_relative_eq!(t(14.0), 30.0, epsilon = 1e-4);
        assert_relative_eq!(t(14.0001), 30.0, epsilon = 1e-3);
        let at_sunset = 30.0 - 0.39 * (30.0 - 16.0);
        assert_relative_eq!(t(18.0), at_sunset, epsilon = 1e-4);
        assert_relative_eq!(t(17.9999), at_sunset, epsilon = 1e-3);
        // back to the next minimum at sunrise
        assert_relative_eq!(t(6.0), 16.0, epsilon = 1e-4);
        assert!(t(10.0) > 15.0 && t(10.0) < 30.0);
        assert!(t(2.0) < at_sunset && t(2.0) > 16.0);
    }

    #[test]
    fn humidity_stays_within_monthly_bounds() {
        let weather = steady_month();
        let mut rng = SimRng::from_seed_u64(1);
        for _ in 0..500 {
            let rh = FireWeatherSimulator::relative_humidity(&weather, &mut rng);
            assert!((20.0..40.0).contains(&rh));
        }
        let flat = MonthlyWeather {
            humidity_min: 35.0,
            humidity_max: 35.0,
            ..weather
        };
        assert_eq!(FireWeatherSimulator::relative_humidity(&flat, &mut rng), 35.0);
    }

    #[test]
    fn always_calm_month_stays_calm_after_first_hour() {
        let weather = MonthlyWeather {
            stay_calm: 1.0,
            windy_to_calm: 1.0,
            ..steady_month()
        };
        let mut simulator = FireWeatherSimulator::new(parameters(weather), 12).unwrap();
        let mut rng = SimRng::from_seed_u64(5);
        for hour in 0..24 {
            let snapshot = simulator.snapshot(Month::October, hour, &mut rng);
            assert_eq!(snapshot.wind_speed.value(), 0.0);
            assert!(!simulator.is_windy());
        }
    }

    #[test]
    fn windy_hours_pick_a_non_zero_octant() {
        let weather = MonthlyWeather {
            stay_calm: 0.0,
            windy_to_calm: 0.0,
            ..steady_month()
        };
        let mut simulator = FireWeatherSimulator::new(parameters(weather), 12).unwrap();
        let mut rng = SimRng::from_seed_u64(8);
        for hour in 0..100 {
            let snapshot = simulator.snapshot(Month::March, hour, &mut rng);
            assert_ne!(snapshot.wind_direction, Octant::NORTH_WEST);
            assert!(snapshot.wind_speed.value() >= 0.0);
        }
    }

    #[test]
    fn single_direction_month_always_blows_that_way() {
        let mut direction_probabilities = [0.0; 8];
        direction_probabilities[3] = 0.5;
        let weather = MonthlyWeather {
            direction_probabilities,
            windy_to_calm: 0.0,
            ..steady_month()
        };
        let mut simulator = FireWeatherSimulator::new(parameters(weather), 0).unwrap();
        let mut rng = SimRng::from_seed_u64(2);
        for hour in 0..20 {
            assert_eq!(
                simulator.snapshot(Month::May, hour, &mut rng).wind_direction,
                Octant::EAST
            );
        }
    }

    #[test]
    fn zero_variance_temperatures_follow_the_curve() {
        let mut simulator = FireWeatherSimulator::new(parameters(steady_month()), 12).unwrap();
        let mut rng = SimRng::from_seed_u64(3);
        let noon = simulator.snapshot(Month::January, 0, &mut rng);
        let afternoon = simulator.snapshot(Month::January, 2, &mut rng);
        // sunrise 6, peak 14: noon is on the rising limb
        assert!(noon.temperature.value() < afternoon.temperature.value());
        assert_relative_eq!(afternoon.temperature.value(), 30.0, epsilon = 1e-4);
    }

    #[test]
    fn unreachable_wind_direction_is_rejected() {
        let mut direction_probabilities = [0.0; 8];
        direction_probabilities[0] = 1.0;
        let weather = MonthlyWeather {
            direction_probabilities,
            ..MonthlyWeather::default()
        };
        let mut months = [MonthlyWeather::default(); 12];
        months[4] = weather;
        assert!(matches!(
            MeteorologicalParameters::new(months),
            Err(ConfigError::UnreachableWindDirection { month: 4 })
        ));
    }

    #[test]
    fn negative_deviation_is_rejected() {
        let weather = MonthlyWeather {
            max_temperature_sd: -1.0,
            ..MonthlyWeather::default()
        };
        assert!(FireWeatherSimulator::new(parameters(weather), 12).is_err());
        assert!(FireWeatherSimulator::new(parameters(MonthlyWeather::default()), 24).is_err());
    }

    #[test]
    fn parameter_file_has_one_column_per_month() {
        let rows = [
            "20", "40", "15", "2", "30", "2", "2", "4", "0.1", "0.1", "0.1", "0.1", "0.1", "0.1",
            "0.1", "0.1", "0.5", "0.2", "6", "18",
        ];
        let text: String = rows
            .iter()
            .map(|value| format!("{}\n", vec![*value; 12].join(",")))
            .collect();
        let parameters =
            MeteorologicalParameters::from_records(&ParameterRecords::parse(&text)).unwrap();
        assert_eq!(parameters.month(Month::December).sunset, 18.0);
        assert_eq!(parameters.month(Month::June).direction_probabilities[7], 0.1);

        let short: String = rows
            .iter()
            .map(|value| format!("{}\n", vec![*value; 11].join(",")))
            .collect();
        assert!(matches!(
            MeteorologicalParameters::from_records(&ParameterRecords::parse(&short)),
            Err(ConfigError::ColumnCount { expected: 12, found: 11, .. })
        ));
    }
}
