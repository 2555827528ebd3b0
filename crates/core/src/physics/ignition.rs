//! Fireline intensity and cell ignition probabilities
//!
//! # References
//! - Byram, G.M. (1959). "Combustion of forest fuels." In: Forest Fire: Control and Use
//! - Willis, M.J. (1987). "Fuel model for Acacia nilotica savannas." (initial
//!   ignition curve, extinction moisture 20%)

/// Heat yield of grass fuel (kJ/kg)
pub const HEAT_YIELD: f32 = 17000.0;

/// Byram's fireline intensity (kJ/s/m)
///
/// # Formula
/// ```text
/// I = H · w · r
/// ```
///
/// # Arguments
/// * `rate_of_spread` - Rate of spread (m/s)
/// * `available_fuel` - Available fuel load (g/m², converted to kg/m² here)
///
/// # Returns
/// Fireline intensity in kJ/s/m
#[inline]
#[must_use]
pub fn fireline_intensity(rate_of_spread: f32, available_fuel: f32) -> f32 {
    rate_of_spread * (available_fuel / 1000.0) * HEAT_YIELD
}

/// Probability that a seeding ignition catches (logistic in moisture percent)
///
/// ```text
/// p = 1 / (1 + e^−(4.2 − 0.18·M%))
/// ```
///
/// Falls steeply around the 20% extinction moisture of savanna grass.
#[must_use]
pub fn initial_ignition_probability(moisture: f32) -> f32 {
    1.0 / (1.0 + (-(4.2 - 0.18 * (moisture * 100.0))).exp())
}

/// Probability that an arriving fire front ignites a neighbouring cell
///
/// ```text
/// p = 1 / (1 + e^−(−5.6 − 6.8·M + e^(−0.15 + I^0.117)))
/// ```
///
/// # Arguments
/// * `intensity` - Fireline intensity of the arriving front (kJ/s/m)
/// * `moisture` - Fuel moisture of the receiving cell (fraction)
///
/// Zero for a front without positive finite intensity, which is what
/// saturated grass with negative available fuel produces.
#[must_use]
pub fn secondary_ignition_probability(intensity: f32, moisture: f32) -> f32 {
    if intensity <= 0.0 || !intensity.is_finite() || !moisture.is_finite() {
        return 0.0;
    }
    1.0 / (1.0 + (-(-5.6 - 6.8 * moisture + (-0.15 + intensity.powf(0.117)).exp())).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn intensity_converts_grams_to_kilograms() {
        // 0.5 m/s through 1 kg/m² of grass
        assert_relative_eq!(fireline_intensity(0.5, 1000.0), 8500.0, epsilon = 1e-2);
    }

    #[test]
    fn initial_probability_is_half_near_twenty_three_percent() {
        assert_relative_eq!(
            initial_ignition_probability(4.2 / 18.0),
            0.5,
            epsilon = 1e-5
        );
        assert!(initial_ignition_probability(0.05) > 0.95);
        assert!(initial_ignition_probability(0.40) < 0.05);
    }

    #[test]
    fn probabilities_decrease_with_moisture() {
        let moistures = [0.0_f32, 0.05, 0.1, 0.2, 0.3, 0.5, 0.8, 1.0];
        for pair in moistures.windows(2) {
            assert!(initial_ignition_probability(pair[0]) > initial_ignition_probability(pair[1]));
            for intensity in [50.0_f32, 500.0, 5000.0] {
                assert!(
                    secondary_ignition_probability(intensity, pair[0])
                        > secondary_ignition_probability(intensity, pair[1]),
                    "intensity {intensity}, moisture {pair:?}"
                );
            }
        }
    }

    #[test]
    fn fronts_without_positive_intensity_never_ignite() {
        // Green grass at 276% moisture burns with negative available fuel
        assert_eq!(secondary_ignition_probability(-82594.78, 2.76), 0.0);
        assert_eq!(secondary_ignition_probability(0.0, 0.1), 0.0);
        assert_eq!(secondary_ignition_probability(f32::NAN, 0.1), 0.0);
        assert_eq!(secondary_ignition_probability(f32::INFINITY, 0.1), 0.0);
        assert_eq!(secondary_ignition_probability(500.0, f32::NAN), 0.0);
    }

    #[test]
    fn secondary_probability_rises_with_intensity() {
        let weak = secondary_ignition_probability(100.0, 0.25);
        let strong = secondary_ignition_probability(10000.0, 0.25);
        assert!(strong > weak);
        assert!((0.0..=1.0).contains(&weak));
        assert!((0.0..=1.0).contains(&strong));
    }
}
