//! # Rational Method Peak Discharge
//!
//! Design flood for small catchments: Kirpich time of concentration,
//! Mononobe rainfall intensity from daily rainfall, and the rational formula.
//!
//! ```text
//! tc = 0.0195 · L^0.77 · S^-0.385        (minutes, L in m, S in m/m)
//! I  = (R24 / 24) · (24 / tc)^(2/3)      (mm/h, tc in hours)
//! Q  = C · I · A / 3.6                   (m³/s, A in km²)
//! ```

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{require_non_negative, require_positive, CalcError, CalcResult};

/// Kirpich time of concentration in minutes.
pub fn kirpich_time_of_concentration(length_m: f64, slope: f64) -> f64 {
    0.0195 * length_m.powf(0.77) * slope.powf(-0.385)
}

/// Mononobe rainfall intensity (mm/h) for a duration in hours.
pub fn mononobe_intensity(rainfall_24h_mm: f64, duration_h: f64) -> f64 {
    rainfall_24h_mm / 24.0 * (24.0 / duration_h).powf(2.0 / 3.0)
}

/// Rational formula Q = C I A / 3.6 in m³/s.
///
/// # Example
/// ```rust
/// use sipil_core::hydrology::rational::rational_peak_discharge;
///
/// assert!((rational_peak_discharge(0.5, 100.0, 3.6) - 50.0).abs() < 1e-9);
/// ```
pub fn rational_peak_discharge(runoff_coefficient: f64, intensity_mm_h: f64, area_km2: f64) -> f64 {
    runoff_coefficient * intensity_mm_h * area_km2 / 3.6
}

/// Catchment and rainfall data.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Saluran Primer",
///   "runoff_coefficient": 0.6,
///   "catchment_area_km2": 2.5,
///   "rainfall_24h_mm": 120.0,
///   "channel_length_m": 2000.0,
///   "channel_slope": 0.01
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationalInput {
    pub label: String,
    /// Runoff coefficient C, 0 < C ≤ 1
    pub runoff_coefficient: f64,
    pub catchment_area_km2: f64,
    /// Maximum daily rainfall for the return period (mm)
    pub rainfall_24h_mm: f64,
    /// Longest flow path (m)
    pub channel_length_m: f64,
    /// Average slope along the flow path (m/m)
    pub channel_slope: f64,
}

impl RationalInput {
    pub fn validate(&self) -> CalcResult<()> {
        require_positive("runoff_coefficient", self.runoff_coefficient)?;
        if self.runoff_coefficient > 1.0 {
            return Err(CalcError::invalid_input(
                "runoff_coefficient",
                self.runoff_coefficient.to_string(),
                "Runoff coefficient cannot exceed 1.0",
            ));
        }
        require_positive("catchment_area_km2", self.catchment_area_km2)?;
        require_non_negative("rainfall_24h_mm", self.rainfall_24h_mm)?;
        require_positive("channel_length_m", self.channel_length_m)?;
        require_positive("channel_slope", self.channel_slope)?;
        Ok(())
    }
}

/// Results of a peak discharge calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RationalResult {
    pub time_of_concentration_min: f64,
    pub time_of_concentration_h: f64,
    /// Rainfall intensity over tc (mm/h)
    pub intensity_mm_h: f64,
    /// Peak discharge (m³/s)
    pub peak_discharge_m3_s: f64,
}

/// Calculate design peak discharge.
///
/// # Errors
///
/// * `CalcError::InvalidInput` - if the catchment or rainfall data is out of range
pub fn calculate(input: &RationalInput) -> CalcResult<RationalResult> {
    input.validate()?;

    let tc_min = kirpich_time_of_concentration(input.channel_length_m, input.channel_slope);
    let tc_h = tc_min / 60.0;
    let intensity = mononobe_intensity(input.rainfall_24h_mm, tc_h);
    let q = rational_peak_discharge(input.runoff_coefficient, intensity, input.catchment_area_km2);

    debug!(
        "Discharge '{}': tc={:.1} min, I={:.1} mm/h, Q={:.2} m3/s",
        input.label, tc_min, intensity, q
    );

    Ok(RationalResult {
        time_of_concentration_min: tc_min,
        time_of_concentration_h: tc_h,
        intensity_mm_h: intensity,
        peak_discharge_m3_s: q,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn catchment() -> RationalInput {
        RationalInput {
            label: "DAS-1".to_string(),
            runoff_coefficient: 0.6,
            catchment_area_km2: 2.5,
            rainfall_24h_mm: 120.0,
            channel_length_m: 1000.0,
            channel_slope: 0.01,
        }
    }

    #[test]
    fn test_rational_formula() {
        assert_relative_eq!(rational_peak_discharge(0.5, 100.0, 3.6), 50.0, epsilon = 1e-9);
    }

    #[test]
    fn test_kirpich() {
        // 1 km at 1 % slope is roughly 23 minutes
        assert_relative_eq!(kirpich_time_of_concentration(1000.0, 0.01), 23.44, epsilon = 0.05);
    }

    #[test]
    fn test_mononobe_full_day() {
        assert_relative_eq!(mononobe_intensity(120.0, 24.0), 5.0, epsilon = 1e-12);
        assert!(mononobe_intensity(120.0, 1.0) > mononobe_intensity(120.0, 2.0));
    }

    #[test]
    fn test_calculate_chain() {
        let result = calculate(&catchment()).unwrap();
        let expected_i = mononobe_intensity(120.0, result.time_of_concentration_h);
        assert_relative_eq!(result.intensity_mm_h, expected_i);
        assert_relative_eq!(result.peak_discharge_m3_s, 0.6 * expected_i * 2.5 / 3.6);
    }

    #[test]
    fn test_zero_rainfall() {
        let mut input = catchment();
        input.rainfall_24h_mm = 0.0;
        assert_eq!(calculate(&input).unwrap().peak_discharge_m3_s, 0.0);
    }

    #[test]
    fn test_validation() {
        let mut input = catchment();
        input.runoff_coefficient = 1.2;
        assert!(calculate(&input).is_err());

        let mut input = catchment();
        input.channel_slope = 0.0;
        assert!(calculate(&input).is_err());

        let mut input = catchment();
        input.catchment_area_km2 = -1.0;
        assert!(calculate(&input).is_err());
    }
}
