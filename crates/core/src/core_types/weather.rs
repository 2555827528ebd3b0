//! Weather snapshot consumed by the spread engine, and calendar months
//!
//! A [`WeatherSnapshot`] is produced once per step by a weather provider and
//! handed to the engine by value. Nothing inside a step can change it.

use super::octant::Octant;
use super::units::{Celsius, MetersPerSecond, Percent};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Fire weather at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Wind speed, never negative
    pub wind_speed: MetersPerSecond,
    /// Octant the wind is blowing toward
    pub wind_direction: Octant,
    pub relative_humidity: Percent,
    pub temperature: Celsius,
}

impl WeatherSnapshot {
    /// Create a snapshot. Negative wind speeds are clamped to calm.
    #[must_use]
    pub fn new(
        wind_speed: MetersPerSecond,
        wind_direction: Octant,
        relative_humidity: Percent,
        temperature: Celsius,
    ) -> Self {
        WeatherSnapshot {
            wind_speed: MetersPerSecond::new(wind_speed.value().max(0.0)),
            wind_direction,
            relative_humidity,
            temperature,
        }
    }

    /// Calm conditions with the given humidity and temperature
    #[must_use]
    pub fn calm(relative_humidity: Percent, temperature: Celsius) -> Self {
        Self::new(
            MetersPerSecond::new(0.0),
            Octant::NORTH_WEST,
            relative_humidity,
            temperature,
        )
    }
}

impl fmt::Display for WeatherSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "T={} RH={} wind={} toward octant {}",
            self.temperature, self.relative_humidity, self.wind_speed, self.wind_direction
        )
    }
}

/// Calendar month, used to select monthly weather parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Which abbreviation table [`Month::from_abbreviation`] decodes with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthTable {
    /// One-to-one `JAN..DEC` mapping
    #[default]
    Corrected,
    /// The historical table: `JUL` decodes to June, `AUG` to July, and August
    /// cannot be selected. Kept so older parameter studies can be replayed.
    Legacy,
}

const ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

const LEGACY_TABLE: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::June,
    Month::July,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

impl Month {
    /// All months, January first
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// Zero-based month index (January = 0)
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Three-letter upper-case abbreviation
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        ABBREVIATIONS[self as usize]
    }

    /// Decode a three-letter abbreviation (case-insensitive)
    ///
    /// Returns `None` for unknown names. With [`MonthTable::Legacy`] a warning is
    /// logged whenever the decoded month differs from the abbreviation's own month.
    #[must_use]
    pub fn from_abbreviation(name: &str, table: MonthTable) -> Option<Month> {
        let upper = name.trim().to_ascii_uppercase();
        let position = ABBREVIATIONS.iter().position(|abbr| *abbr == upper)?;
        let month = match table {
            MonthTable::Corrected => Month::ALL[position],
            MonthTable::Legacy => {
                let legacy = LEGACY_TABLE[position];
                if legacy != Month::ALL[position] {
                    warn!(
                        "Legacy month table decodes '{}' as {:?}, not {:?}",
                        upper,
                        legacy,
                        Month::ALL[position]
                    );
                }
                legacy
            }
        };
        Some(month)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrected_table_is_one_to_one() {
        for month in Month::ALL {
            assert_eq!(
                Month::from_abbreviation(month.abbreviation(), MonthTable::Corrected),
                Some(month)
            );
        }
        assert_eq!(
            Month::from_abbreviation("aug", MonthTable::Corrected),
            Some(Month::August)
        );
    }

    #[test]
    fn legacy_table_reproduces_shifted_summer() {
        assert_eq!(
            Month::from_abbreviation("JUL", MonthTable::Legacy),
            Some(Month::June)
        );
        assert_eq!(
            Month::from_abbreviation("AUG", MonthTable::Legacy),
            Some(Month::July)
        );
        assert!(Month::ALL
            .iter()
            .all(|m| Month::from_abbreviation(m.abbreviation(), MonthTable::Legacy)
                != Some(Month::August)));
        assert_eq!(
            Month::from_abbreviation("SEP", MonthTable::Legacy),
            Some(Month::September)
        );
    }

    #[test]
    fn unknown_month_is_none() {
        assert_eq!(Month::from_abbreviation("SMR", MonthTable::Corrected), None);
    }

    #[test]
    fn snapshot_clamps_negative_wind() {
        let weather = WeatherSnapshot::new(
            MetersPerSecond::new(-2.0),
            Octant::EAST,
            Percent::new(30.0),
            Celsius::new(25.0),
        );
        assert_eq!(weather.wind_speed.value(), 0.0);
    }
}
