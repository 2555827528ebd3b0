//! Grass fire rate of spread: headfire regression and elliptical direction model
//!
//! The headfire rate is the forward spread rate of a fire driven by the wind.
//! Spread in other directions follows an ellipse with the ignition point at its
//! rear focus, so the flanks and back of the fire move more slowly.
//!
//! # References
//! - Higgins, S.I. et al. (2008). "Fire in savanna ecosystems: a semi-empirical
//!   grass fire spread model." Journal of Ecology
//! - Alexander, M.E. (1985). "Estimating the length-to-breadth ratio of elliptical
//!   forest fire patterns." Proc. 8th Conf. Fire and Forest Meteorology, 287-304
//!   (McArthur's grassland relation)
//! - Anderson, H.E. (1983). "Predicting wind-driven wild land fire size and shape."
//!   USDA Forest Service Research Paper INT-305

use crate::core_types::octant::Octant;

/// Headfire rate of spread (m/s)
///
/// Linear regression over fuel load, moisture, humidity and wind speed fitted to
/// savanna grass fires.
///
/// # Formula
/// ```text
/// R = 0.4745 + 0.0002·W − 0.6648·M − 0.0023·H + 0.0441·U
/// ```
///
/// # Arguments
/// * `fuel_load` - Total grass fuel load (g/m²)
/// * `moisture` - Fuel moisture content (fraction)
/// * `relative_humidity` - Relative humidity (%)
/// * `wind_speed` - Wind speed (m/s)
///
/// # Returns
/// Headfire rate of spread in m/s (may be negative for very wet fuel)
#[must_use]
pub fn headfire_rate_of_spread(
    fuel_load: f32,
    moisture: f32,
    relative_humidity: f32,
    wind_speed: f32,
) -> f32 {
    0.4745 + (0.0002 * fuel_load) - (0.6648 * moisture) - (0.0023 * relative_humidity)
        + (0.0441 * wind_speed)
}

/// Length-to-breadth ratio of the fire ellipse (McArthur, in Alexander 1985)
///
/// # Arguments
/// * `wind_speed_kmh` - Wind speed (km/h)
///
/// # Returns
/// Ratio, never below 1 (a circle)
#[must_use]
pub fn length_to_breadth_ratio(wind_speed_kmh: f32) -> f32 {
    let ratio = 1.1 * wind_speed_kmh.powf(0.464);
    if ratio < 1.0 {
        1.0
    } else {
        ratio
    }
}

/// Rate of spread toward one octant (m/s)
///
/// The headfire rate is the distance from the rear focus of the ellipse to its
/// head. With semi-axes `a`, `b` and linear eccentricity `c`:
///
/// ```text
/// a = R / (1 + √(1 − LB⁻²))      b = a / LB      c = R − a
/// r(θ) = b·(a + c·cos θ) / √(a²·sin²θ + b²·cos²θ)
/// ```
///
/// where `θ = (wind − spread) × 45°`. Calm air (0 km/h) degenerates to a circle
/// and every direction spreads at the headfire rate.
///
/// # Arguments
/// * `wind_speed` - Wind speed (m/s)
/// * `wind_direction` - Octant the wind blows toward
/// * `headfire_rate` - Headfire rate of spread (m/s)
/// * `spread_direction` - Octant of spread
///
/// # Returns
/// Directional rate of spread in m/s
#[must_use]
pub fn directional_rate_of_spread(
    wind_speed: f32,
    wind_direction: Octant,
    headfire_rate: f32,
    spread_direction: Octant,
) -> f32 {
    let wind_speed_kmh = wind_speed * 3.6;
    if wind_speed_kmh == 0.0 {
        return headfire_rate;
    }

    let ratio = length_to_breadth_ratio(wind_speed_kmh);
    let a = headfire_rate / (1.0 + (1.0 - ratio.powf(-2.0)).sqrt());
    let b = a / ratio;
    let c = headfire_rate - a;

    let theta = Octant::angular_offset(wind_direction, spread_direction);
    let (sin_theta, cos_theta) = theta.sin_cos();

    (b * (a + c * cos_theta)) / (a.powi(2) * sin_theta.powi(2) + b.powi(2) * cos_theta.powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn headfire_regression_coefficients() {
        let rate = headfire_rate_of_spread(1000.0, 0.25, 30.0, 5.0);
        let expected = 0.4745 + 0.2 - 0.6648 * 0.25 - 0.069 + 0.2205;
        assert_relative_eq!(rate, expected, epsilon = 1e-6);
    }

    #[test]
    fn wetter_fuel_spreads_slower() {
        let dry = headfire_rate_of_spread(1000.0, 0.1, 30.0, 5.0);
        let wet = headfire_rate_of_spread(1000.0, 0.4, 30.0, 5.0);
        assert!(wet < dry);
    }

    #[test]
    fn calm_wind_spreads_equally_in_all_directions() {
        for wind in Octant::all() {
            for direction in Octant::all() {
                assert_eq!(directional_rate_of_spread(0.0, wind, 0.42, direction), 0.42);
            }
        }
    }

    #[test]
    fn head_of_ellipse_spreads_at_headfire_rate() {
        let rate = directional_rate_of_spread(5.0, Octant::EAST, 0.6, Octant::EAST);
        assert_relative_eq!(rate, 0.6, epsilon = 1e-5);
    }

    #[test]
    fn backing_fire_is_slowest() {
        let head = directional_rate_of_spread(5.0, Octant::NORTH, 0.6, Octant::NORTH);
        let flank = directional_rate_of_spread(5.0, Octant::NORTH, 0.6, Octant::EAST);
        let back = directional_rate_of_spread(5.0, Octant::NORTH, 0.6, Octant::SOUTH);
        assert!(head > flank);
        assert!(flank > back);
        assert!(back > 0.0);
        // Back rate of an ellipse with focus at the origin: a − c
        let ratio = length_to_breadth_ratio(18.0);
        let a = 0.6 / (1.0 + (1.0 - ratio.powf(-2.0)).sqrt());
        assert_relative_eq!(back, a - (0.6 - a), epsilon = 1e-5);
    }

    #[test]
    fn light_wind_keeps_circular_shape() {
        // 1.1·U^0.464 < 1 below roughly 0.81 km/h
        assert_eq!(length_to_breadth_ratio(0.5), 1.0);
        let rate = directional_rate_of_spread(0.1, Octant::NORTH, 0.3, Octant::SOUTH);
        assert_relative_eq!(rate, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn spread_is_symmetric_about_the_wind_axis() {
        let left = directional_rate_of_spread(4.0, Octant::NORTH, 0.5, Octant::NORTH_WEST);
        let right = directional_rate_of_spread(4.0, Octant::NORTH, 0.5, Octant::NORTH_EAST);
        assert_relative_eq!(left, right, epsilon = 1e-6);
    }
}
