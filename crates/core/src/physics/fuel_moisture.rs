//! Grass fuel moisture and fuel availability
//!
//! Fine grass fuels respond to the weather within minutes, so moisture is
//! estimated directly from the current snapshot instead of a timelag model.
//!
//! # Scientific References
//! - McArthur, A.G. (1966). "Weather and grassland fire behaviour."
//!   Commonwealth of Australia Forestry and Timber Bureau Leaflet 100 (Mark V meter)
//! - Noble, I.R., Bary, G.A.V., Gill, A.M. (1980). "McArthur's fire-danger meters
//!   expressed as equations." Australian Journal of Ecology, 5, 201-203
//! - Hély, C. et al. (2003). "Regional fuel load for two climatically contrasting
//!   years in southern Africa." Journal of Geophysical Research, 108(D13)

/// Moisture content (percent) above which only part of the grass load burns
pub const AVAILABILITY_MOISTURE_THRESHOLD: f32 = 20.0;

/// Degree of curing: dead share of the total grass load
///
/// An empty cell has no dead fraction; it is reported as uncured (0) so that
/// [`grass_fuel_moisture`] treats it as saturated instead of dividing by zero.
///
/// # Arguments
/// * `live_biomass` - Live grass biomass (g/m²)
/// * `dead_biomass` - Dead grass biomass (g/m²)
///
/// # Returns
/// Fraction of cured fuel (0-1)
#[inline]
#[must_use]
pub fn degree_of_curing(live_biomass: f32, dead_biomass: f32) -> f32 {
    let fuel_load = live_biomass + dead_biomass;
    if fuel_load <= 0.0 {
        return 0.0;
    }
    dead_biomass / fuel_load
}

/// Estimate grass fuel moisture with the McArthur Mark V grassland meter
///
/// # Formula
/// ```text
/// M = ((97.7 + 4.06·H)/(T + 6) − 0.00854·H + 3000/C − 30) / 100
/// ```
///
/// Where:
/// - **T** = Air temperature (°C)
/// - **H** = Relative humidity (%)
/// - **C** = Degree of curing (%)
///
/// Completely green grass (curing = 0) is returned as fully moist (1.0).
///
/// # Arguments
/// * `temperature` - Air temperature (°C)
/// * `relative_humidity` - Relative humidity (%)
/// * `curing` - Degree of curing (fraction 0-1)
///
/// # Returns
/// Fuel moisture content as a fraction of dry weight
///
/// # References
/// Noble et al. (1980)
#[must_use]
pub fn grass_fuel_moisture(temperature: f32, relative_humidity: f32, curing: f32) -> f32 {
    if curing == 0.0 {
        return 1.0;
    }
    (((97.7 + 4.06 * relative_humidity) / (temperature + 6.0)) - 0.00854 * relative_humidity
        + (3000.0 / (curing * 100.0))
        - 30.0)
        / 100.0
}

/// Share of the grass load consumed by the flaming front
///
/// Below 20% moisture the whole load burns; above it the combustion
/// completeness falls linearly.
///
/// # Arguments
/// * `moisture` - Fuel moisture content (fraction)
///
/// # Returns
/// Fuel availability factor
#[must_use]
pub fn fuel_availability(moisture: f32) -> f32 {
    let moisture_percent = moisture * 100.0;
    if moisture_percent > AVAILABILITY_MOISTURE_THRESHOLD {
        (113.1407 - 0.6325 * moisture_percent) / 100.0
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn moisture_matches_mark_v_closed_form() {
        // ((97.7 + 162.4)/31 − 0.3416 + 50 − 30)/100
        let expected = ((97.7_f64 + 4.06 * 40.0) / 31.0 - 0.00854 * 40.0 + 3000.0 / 60.0 - 30.0)
            / 100.0;
        let moisture = grass_fuel_moisture(25.0, 40.0, 0.6);
        assert_abs_diff_eq!(f64::from(moisture), expected, epsilon = 1e-5);
        assert_abs_diff_eq!(moisture, 0.28048, epsilon = 1e-5);
    }

    #[test]
    fn uncured_grass_is_saturated() {
        assert_eq!(grass_fuel_moisture(25.0, 40.0, 0.0), 1.0);
        assert_eq!(grass_fuel_moisture(-5.0, 100.0, 0.0), 1.0);
    }

    #[test]
    fn moisture_rises_with_humidity_and_falls_with_curing() {
        let dry = grass_fuel_moisture(30.0, 20.0, 0.9);
        let humid = grass_fuel_moisture(30.0, 80.0, 0.9);
        let green = grass_fuel_moisture(30.0, 20.0, 0.4);
        assert!(humid > dry);
        assert!(green > dry);
    }

    #[test]
    fn curing_of_empty_cell_is_zero() {
        assert_eq!(degree_of_curing(0.0, 0.0), 0.0);
        assert_abs_diff_eq!(degree_of_curing(400.0, 600.0), 0.6, epsilon = 1e-6);
    }

    #[test]
    fn availability_is_full_up_to_twenty_percent() {
        assert_eq!(fuel_availability(0.05), 1.0);
        assert_eq!(fuel_availability(0.20), 1.0);
        assert_abs_diff_eq!(
            fuel_availability(0.30),
            (113.1407 - 0.6325 * 30.0) / 100.0,
            epsilon = 1e-6
        );
        assert!(fuel_availability(0.5) < fuel_availability(0.3));
    }
}
