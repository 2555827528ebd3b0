//! Semantic unit types for the weather quantities that drive fire behaviour
//!
//! Newtype wrappers keep wind speeds, temperatures and humidities from being
//! mixed up when they travel between the weather provider and the spread engine.
//! All wrap `f32`, the precision of the fire-behaviour regressions, and `Deref`
//! to the raw value.
//!
//! ```
//! use savanna_fire_core::core_types::units::MetersPerSecond;
//!
//! let wind = MetersPerSecond::new(5.0);
//! assert!((*wind * 3.6 - 18.0).abs() < 1e-5);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Air temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Celsius(f32);

impl Deref for Celsius {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Celsius {
    /// Create a temperature. Asserts value >= absolute zero (-273.15°C).
    #[inline]
    #[must_use]
    #[track_caller]
    pub const fn new(value: f32) -> Self {
        assert!(
            value >= -273.15,
            "Celsius::new: value is below absolute zero (-273.15°C)"
        );
        Celsius(value)
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Celsius {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}°C", self.0)
    }
}

/// Relative humidity in percent (0-100)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Percent(f32);

impl Deref for Percent {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl Percent {
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        Percent(value)
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}%", self.0)
    }
}

/// Wind speed in metres per second
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct MetersPerSecond(f32);

impl Deref for MetersPerSecond {
    type Target = f32;
    #[inline]
    fn deref(&self) -> &f32 {
        &self.0
    }
}

impl MetersPerSecond {
    #[inline]
    #[must_use]
    pub const fn new(value: f32) -> Self {
        MetersPerSecond(value)
    }

    #[inline]
    #[must_use]
    pub fn value(self) -> f32 {
        self.0
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m/s", self.0)
    }
}
